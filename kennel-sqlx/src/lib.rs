//! kennel-sqlx: SQLite record store for Kennel.

pub mod schema;
pub mod store;

pub use schema::ensure_schema;
pub use store::SqliteDogRepository;
