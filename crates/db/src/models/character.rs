//! Character entity model and DTOs.

use multiverse_core::character::{CharacterStatus, Gender};
use multiverse_core::refs::LocationRef;
use multiverse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

/// A character row, with its location references resolved.
///
/// `origin` and `location` are assembled from the stored target ids plus
/// display names joined in from the locations table, so the row type needs
/// a hand-written [`FromRow`].
#[derive(Debug, Clone, Serialize)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub status: CharacterStatus,
    pub species: String,
    pub gender: Gender,
    pub origin: LocationRef,
    pub location: LocationRef,
    pub url: String,
    pub created: Timestamp,
}

impl FromRow<'_, PgRow> for Character {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let gender: String = row.try_get("gender")?;
        Ok(Character {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            status: status
                .parse()
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
            species: row.try_get("species")?,
            gender: gender
                .parse()
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
            origin: LocationRef::from_columns(
                row.try_get("origin_id")?,
                row.try_get("origin_name")?,
            ),
            location: LocationRef::from_columns(
                row.try_get("location_id")?,
                row.try_get("location_name")?,
            ),
            url: row.try_get("url")?,
            created: row.try_get("created")?,
        })
    }
}

/// Wire DTO for `POST /create_char`.
///
/// Every field is required by contract; missing keys deserialize to empty
/// strings so the handler reports them as empty-payload validation errors
/// instead of a deserializer rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub location: String,
}

/// Wire DTO for `PUT /update_char/{id}`. All fields are optional; only
/// present fields are validated and applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCharacter {
    pub name: Option<String>,
    pub status: Option<String>,
    pub species: Option<String>,
    pub gender: Option<String>,
    pub origin: Option<String>,
    pub location: Option<String>,
}

/// Fully validated input for [`CharacterRepo::create`], with enum fields
/// parsed and both references resolved.
///
/// [`CharacterRepo::create`]: crate::repositories::CharacterRepo::create
#[derive(Debug, Clone)]
pub struct NewCharacter {
    pub name: String,
    pub status: CharacterStatus,
    pub species: String,
    pub gender: Gender,
    pub origin: LocationRef,
    pub location: LocationRef,
}

/// Validated partial update for [`CharacterRepo::update`]. `None` leaves a
/// field untouched; a present reference may be the Unknown sentinel.
///
/// [`CharacterRepo::update`]: crate::repositories::CharacterRepo::update
#[derive(Debug, Clone, Default)]
pub struct CharacterPatch {
    pub name: Option<String>,
    pub status: Option<CharacterStatus>,
    pub species: Option<String>,
    pub gender: Option<Gender>,
    pub origin: Option<LocationRef>,
    pub location: Option<LocationRef>,
}
