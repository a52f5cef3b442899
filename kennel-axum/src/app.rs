use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use kennel_core::DogsService;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::rest::{dogs_router, DOGS_BASE_PATH};
use crate::KennelState;

#[derive(Clone)]
pub struct KennelAxumApp {
    pub state: KennelState,
    pub router: Router<()>,
}

impl KennelAxumApp {
    /// Dog routes under [`DOGS_BASE_PATH`], `/health`, request ids and tracing.
    pub fn new(dogs: Arc<DogsService>) -> Self {
        let state = KennelState::from_arc(dogs);
        let router = Router::new()
            .merge(dogs_router(DOGS_BASE_PATH, state.clone()))
            .route("/health", get(|| async { "ok" }))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            );

        Self { state, router }
    }

    /// Mount an extra router next to the dog routes.
    pub fn merge(mut self, router: Router<()>) -> Self {
        self.router = self.router.merge(router);
        self
    }

    /// Serve until ctrl-c.
    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "ctrl-c handler unavailable, serving until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

pub fn axum(dogs: DogsService) -> KennelAxumApp {
    KennelAxumApp::new(Arc::new(dogs))
}
