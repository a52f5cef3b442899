use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::model::{Dog, DogFilter, DogPatch, NewDog, Window};
use crate::repository::DogRepository;

#[derive(Default)]
struct MemoryTable {
    next_id: u64,
    rows: BTreeMap<u64, Dog>,
}

/// Process-local repository. Rows are kept after a soft delete, like the SQL
/// store does, so ids are never reused.
#[derive(Default)]
pub struct MemoryDogRepository {
    table: RwLock<MemoryTable>,
}

impl MemoryDogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DogRepository for MemoryDogRepository {
    async fn create(&self, dog: NewDog) -> Result<Dog> {
        let mut table = self.table.write().await;
        table.next_id += 1;

        let now = Utc::now();
        let row = Dog {
            id: table.next_id,
            name: dog.name,
            breed: dog.breed,
            age: dog.age,
            weight: dog.weight,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_all(&self, filter: DogFilter, window: Option<Window>) -> Result<Vec<Dog>> {
        let table = self.table.read().await;
        let live = table
            .rows
            .values()
            .filter(|d| !d.is_deleted() && filter.matches(d))
            .cloned();

        Ok(match window {
            Some(w) => live
                .skip(usize::try_from(w.offset).unwrap_or(usize::MAX))
                .take(usize::try_from(w.limit).unwrap_or(usize::MAX))
                .collect(),
            None => live.collect(),
        })
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Dog>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).filter(|d| !d.is_deleted()).cloned())
    }

    async fn update(&self, id: u64, patch: DogPatch) -> Result<Option<Dog>> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.get_mut(&id).filter(|d| !d.is_deleted()) else {
            return Ok(None);
        };

        if !patch.is_empty() {
            patch.apply_to(row);
            row.updated_at = Utc::now();
        }
        Ok(Some(row.clone()))
    }

    async fn soft_delete(&self, id: u64) -> Result<bool> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.get_mut(&id).filter(|d| !d.is_deleted()) else {
            return Ok(false);
        };

        let now = Utc::now();
        row.deleted_at = Some(now);
        row.updated_at = now;
        Ok(true)
    }
}
