//! Shared response envelope types for API handlers.
//!
//! Every success body is the contract envelope `{message, data,
//! status_code}`; use [`envelope`] instead of ad-hoc `json!` blocks so the
//! `status_code` field always mirrors the transport status.

use axum::http::StatusCode;
use axum::Json;
use multiverse_core::pagination::PageInfo;
use serde::Serialize;

/// Standard `{message, data, status_code}` response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub message: String,
    pub data: T,
    pub status_code: u16,
}

/// Payload of a paged listing: link info plus one page of records.
#[derive(Debug, Serialize)]
pub struct Paged<T: Serialize> {
    pub info: PageInfo,
    pub data: Vec<T>,
}

/// Wrap a payload in the contract envelope at the given status.
pub fn envelope<T: Serialize>(
    status: StatusCode,
    message: impl Into<String>,
    data: T,
) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        status,
        Json(ApiResponse {
            message: message.into(),
            data,
            status_code: status.as_u16(),
        }),
    )
}
