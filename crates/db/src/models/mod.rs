//! Entity models and DTOs for the two catalog collections.

pub mod character;
pub mod location;
