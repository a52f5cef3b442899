use std::sync::Arc;

use kennel_core::DogsService;

/// Shared handler state. Cloned per request; the service behind it is shared.
#[derive(Clone)]
pub struct KennelState {
    pub dogs: Arc<DogsService>,
}

impl KennelState {
    pub fn from_arc(dogs: Arc<DogsService>) -> Self {
        Self { dogs }
    }
}
