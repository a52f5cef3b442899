use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// The uniform JSON wrapper every endpoint answers with.
///
/// `status` mirrors the HTTP status; exactly one of `data` / `message` is set,
/// plus `resourceId` on creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T = ()> {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<u64>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: None,
            data: Some(data),
            resource_id: None,
        }
    }
}

impl Envelope {
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: Some(message.into()),
            data: None,
            resource_id: None,
        }
    }

    pub fn created(resource_id: u64, message: impl Into<String>) -> Self {
        Self {
            resource_id: Some(resource_id),
            ..Self::message(StatusCode::CREATED, message)
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
