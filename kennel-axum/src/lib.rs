//! kennel-axum: Axum adapter for Kennel.
//!
//! Exposes the dog operations of [`kennel_core::DogsService`] as JSON
//! endpoints under `/api/v1/dogs`.

pub mod app;
pub mod params;
pub mod response;
pub mod rest;
pub mod state;
mod error;
pub use error::KennelAxumError;
pub use response::Envelope;
pub use state::KennelState;

pub use app::{axum, KennelAxumApp};
pub use rest::{dogs_router, DOGS_BASE_PATH};
