//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Page-number pagination (`?page=N`), 1-indexed. Values below 1 are
/// clamped in the handler via `clamp_page`.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
}
