use anyhow::Result;
use async_trait::async_trait;

use crate::model::{Dog, DogFilter, DogPatch, NewDog, Window};

/// Persistence seam for dog records.
///
/// Implementations own ids and audit timestamps. Soft-deleted records are
/// invisible to every method: reads skip them, and `update` / `soft_delete`
/// behave as if they did not exist.
#[async_trait]
pub trait DogRepository: Send + Sync {
    /// Insert a record and return it with its assigned id.
    async fn create(&self, dog: NewDog) -> Result<Dog>;

    /// Live records matching `filter`, ascending by id, optionally windowed.
    async fn find_all(&self, filter: DogFilter, window: Option<Window>) -> Result<Vec<Dog>>;

    async fn find_by_id(&self, id: u64) -> Result<Option<Dog>>;

    /// Apply `patch` to a live record. `None` when no such record exists.
    async fn update(&self, id: u64, patch: DogPatch) -> Result<Option<Dog>>;

    /// Mark a live record deleted. `false` when no such record exists.
    async fn soft_delete(&self, id: u64) -> Result<bool>;

    /// Release connections at shutdown. No-op by default.
    async fn close(&self) {}
}
