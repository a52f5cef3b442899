use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kennel_core::{Dog, DogFilter, DogPatch, DogRepository, NewDog, Window};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::schema::ensure_schema;

const SELECT_DOGS: &str =
    "SELECT id, name, breed, age, weight, created_at, updated_at, deleted_at FROM dogs";

#[derive(Debug, FromRow)]
struct DogRow {
    id: i64,
    name: String,
    breed: String,
    age: i16,
    weight: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<DogRow> for Dog {
    fn from(row: DogRow) -> Self {
        Self {
            // AUTOINCREMENT ids start at 1
            id: row.id as u64,
            name: row.name,
            breed: row.breed,
            age: row.age,
            weight: row.weight,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

/// `DogRepository` over a SQLite pool.
#[derive(Clone)]
pub struct SqliteDogRepository {
    pool: SqlitePool,
}

impl SqliteDogRepository {
    /// Open (creating the file if needed) and migrate.
    ///
    /// In-memory URLs get a single connection that is never recycled, since
    /// every SQLite in-memory connection is its own database.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url {url}"))?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections.max(1));
        if is_memory_url(url) {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("connecting to {url}"))?;

        info!(url, "connected to sqlite");
        Self::from_pool(pool).await
    }

    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:", 1).await
    }

    /// Wrap an existing pool; the schema is created when missing.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Ids beyond `i64::MAX` cannot exist in SQLite.
fn db_id(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

fn db_count(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[async_trait]
impl DogRepository for SqliteDogRepository {
    async fn create(&self, dog: NewDog) -> Result<Dog> {
        let now = Utc::now();
        let res = sqlx::query(
            "INSERT INTO dogs (name, breed, age, weight, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&dog.name)
        .bind(&dog.breed)
        .bind(dog.age)
        .bind(dog.weight)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("inserting dog")?;

        Ok(Dog {
            id: res.last_insert_rowid() as u64,
            name: dog.name,
            breed: dog.breed,
            age: dog.age,
            weight: dog.weight,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    async fn find_all(&self, filter: DogFilter, window: Option<Window>) -> Result<Vec<Dog>> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_DOGS);
        qb.push(" WHERE deleted_at IS NULL");
        if let Some(age_below) = filter.age_below {
            qb.push(" AND age < ").push_bind(age_below);
        }
        qb.push(" ORDER BY id ASC");
        if let Some(w) = window {
            qb.push(" LIMIT ")
                .push_bind(db_count(w.limit))
                .push(" OFFSET ")
                .push_bind(db_count(w.offset));
        }

        let rows = qb
            .build_query_as::<DogRow>()
            .fetch_all(&self.pool)
            .await
            .context("listing dogs")?;

        Ok(rows.into_iter().map(Dog::from).collect())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Dog>> {
        let Some(id) = db_id(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, DogRow>(&format!(
            "{SELECT_DOGS} WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("loading dog {id}"))?;

        Ok(row.map(Dog::from))
    }

    async fn update(&self, id: u64, patch: DogPatch) -> Result<Option<Dog>> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }
        let Some(row_id) = db_id(id) else {
            return Ok(None);
        };

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE dogs SET updated_at = ");
        qb.push_bind(Utc::now());
        if let Some(age) = patch.age {
            qb.push(", age = ").push_bind(age);
        }
        if let Some(weight) = patch.weight {
            qb.push(", weight = ").push_bind(weight);
        }
        qb.push(" WHERE id = ")
            .push_bind(row_id)
            .push(" AND deleted_at IS NULL");

        let res = qb
            .build()
            .execute(&self.pool)
            .await
            .with_context(|| format!("updating dog {id}"))?;

        if res.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn soft_delete(&self, id: u64) -> Result<bool> {
        let Some(row_id) = db_id(id) else {
            return Ok(false);
        };

        let now = Utc::now();
        let res = sqlx::query(
            "UPDATE dogs SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(row_id)
        .execute(&self.pool)
        .await
        .with_context(|| format!("deleting dog {id}"))?;

        Ok(res.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
        debug!("sqlite pool closed");
    }
}
