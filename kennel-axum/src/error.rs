use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kennel_core::errors::{ErrorKind, KennelError};

#[derive(Debug)]
pub struct KennelAxumError(pub anyhow::Error);

impl From<anyhow::Error> for KennelAxumError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for KennelAxumError {
    fn into_response(self) -> Response {
        // A KennelError anywhere in the chain keeps its status and message
        if let Some(kennel) = KennelError::from_anyhow(&self.0) {
            if kennel.kind != ErrorKind::GeneralError {
                let safe = kennel.sanitize_for_client();
                let status =
                    StatusCode::from_u16(safe.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                return (status, Json(safe.to_json())).into_response();
            }
        }

        // Everything else is a store or programming failure: log it, hide it
        let err = KennelError::general_error(format!("{:#}", self.0)).with_source(self.0);
        tracing::error!("request failed: {}", err.message);
        let safe = err.sanitize_for_client();
        (StatusCode::INTERNAL_SERVER_ERROR, Json(safe.to_json())).into_response()
    }
}
