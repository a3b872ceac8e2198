//! Location references held by characters, and canonical record URLs.

use serde::ser::{Serialize, SerializeTuple, Serializer};

use crate::types::DbId;

/// Canonical record URL bases. The `url` columns in the database are
/// generated from the same literals; keep the migrations in sync.
pub const CHARACTER_URL_BASE: &str = "https://multiverse.example/api/character/";
pub const LOCATION_URL_BASE: &str = "https://multiverse.example/api/location/";

/// Canonical URL of the character with the given id.
pub fn character_url(id: DbId) -> String {
    format!("{CHARACTER_URL_BASE}{id}")
}

/// Canonical URL of the location with the given id.
pub fn location_url(id: DbId) -> String {
    format!("{LOCATION_URL_BASE}{id}")
}

/// A character's pointer at a location (its `origin` or `location` field).
///
/// Replaces the name+url string pair of the upstream data model: the
/// "unknown" sentinel is a variant rather than a magic string, and the
/// display name is resolved from the target id at read time, so a renamed
/// or deleted location can never leave a stale pair behind.
///
/// Serializes as the contract's two-element `[name, url]` array, with
/// `Unknown` as `["unknown", ""]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationRef {
    Unknown,
    Resolved { id: DbId, name: String },
}

impl LocationRef {
    /// Assemble a reference from nullable columns: the stored target id and
    /// the display name joined in from the locations table.
    pub fn from_columns(id: Option<DbId>, name: Option<String>) -> Self {
        match (id, name) {
            (Some(id), Some(name)) => LocationRef::Resolved { id, name },
            _ => LocationRef::Unknown,
        }
    }

    pub fn resolved(id: DbId, name: impl Into<String>) -> Self {
        LocationRef::Resolved {
            id,
            name: name.into(),
        }
    }

    /// The referenced location id, if the reference is resolved.
    pub fn target(&self) -> Option<DbId> {
        match self {
            LocationRef::Unknown => None,
            LocationRef::Resolved { id, .. } => Some(*id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LocationRef::Unknown => "unknown",
            LocationRef::Resolved { name, .. } => name,
        }
    }

    /// The referenced location's canonical URL; empty for `Unknown`.
    pub fn url(&self) -> String {
        match self {
            LocationRef::Unknown => String::new(),
            LocationRef::Resolved { id, .. } => location_url(*id),
        }
    }
}

impl Serialize for LocationRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(self.name())?;
        pair.serialize_element(&self.url())?;
        pair.end()
    }
}
