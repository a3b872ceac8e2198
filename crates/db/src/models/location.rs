//! Location entity model and DTOs.

use multiverse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A location row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub dimension: String,
    /// Ordered list of resident character URLs.
    pub residents: Vec<String>,
    pub url: String,
    pub created: Timestamp,
}

/// Wire DTO for `POST /create_location`.
///
/// `residents` carries character *names*; the handler resolves them to the
/// URLs of matching characters and drops names that match nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dimension: String,
    #[serde(default)]
    pub residents: Vec<String>,
}

/// Wire DTO for `PUT /update_location/{id}`, applied field-by-field after
/// validation. `residents` here is the stored form (URLs) and passes
/// through unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub dimension: Option<String>,
    pub residents: Option<Vec<String>>,
}

/// Validated input for [`LocationRepo::create`], with `residents` already
/// resolved to character URLs.
///
/// [`LocationRepo::create`]: crate::repositories::LocationRepo::create
#[derive(Debug, Clone)]
pub struct NewLocation {
    pub name: String,
    pub dimension: String,
    pub residents: Vec<String>,
}
