//! kennel-core: transport- and storage-agnostic core of the Kennel dog registry.

pub mod config;
pub mod errors;
pub mod memory;
pub mod model;
pub mod repository;
pub mod service;

pub use config::{KennelConfig, KennelConfigSnapshot};
pub use errors::{ErrorKind, KennelError, KennelResult};
pub use memory::MemoryDogRepository;
pub use model::{
    Dog, DogFilter, DogForm, DogPatch, FormattedDog, NewDog, PatchOutcome, Window, PUPPY_AGE_LIMIT,
};
pub use repository::DogRepository;
pub use service::{DogsService, DEFAULT_PAGE_SIZE};
