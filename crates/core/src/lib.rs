//! Domain vocabulary for the multiverse catalog.
//!
//! Pure types shared by the db and api crates: id/timestamp aliases, the
//! domain error, enumerated character fields, location references, and
//! page math. Nothing in here touches the database or the HTTP layer.

pub mod character;
pub mod error;
pub mod pagination;
pub mod refs;
pub mod types;
