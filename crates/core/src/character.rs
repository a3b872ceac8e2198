//! Enumerated character fields.
//!
//! `status` and `gender` accept a fixed value list; anything outside it is
//! rejected at the request boundary as a validation error. Both are stored
//! as TEXT and parsed back into the enum at the row boundary.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// Life status of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CharacterStatus {
    Alive,
    Dead,
    #[serde(rename = "unknown")]
    Unknown,
}

impl CharacterStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CharacterStatus::Alive => "Alive",
            CharacterStatus::Dead => "Dead",
            CharacterStatus::Unknown => "unknown",
        }
    }
}

impl FromStr for CharacterStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Alive" => Ok(CharacterStatus::Alive),
            "Dead" => Ok(CharacterStatus::Dead),
            "unknown" => Ok(CharacterStatus::Unknown),
            other => Err(CoreError::Validation(format!(
                "status value '{other}' not in [Alive, Dead, unknown]"
            ))),
        }
    }
}

impl fmt::Display for CharacterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
    Genderless,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Genderless => "Genderless",
            Gender::Unknown => "unknown",
        }
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Genderless" => Ok(Gender::Genderless),
            "unknown" => Ok(Gender::Unknown),
            other => Err(CoreError::Validation(format!(
                "gender value '{other}' not in [Male, Female, Genderless, unknown]"
            ))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for s in ["Alive", "Dead", "unknown"] {
            assert_eq!(s.parse::<CharacterStatus>().unwrap().as_str(), s);
        }
    }

    #[test]
    fn status_rejects_values_outside_the_list() {
        assert!("alive".parse::<CharacterStatus>().is_err());
        assert!("Deceased".parse::<CharacterStatus>().is_err());
        assert!("".parse::<CharacterStatus>().is_err());
    }

    #[test]
    fn gender_round_trips_through_str() {
        for s in ["Male", "Female", "Genderless", "unknown"] {
            assert_eq!(s.parse::<Gender>().unwrap().as_str(), s);
        }
    }

    #[test]
    fn gender_rejects_values_outside_the_list() {
        assert!("male".parse::<Gender>().is_err());
        assert!("Unknown".parse::<Gender>().is_err());
    }

    #[test]
    fn enums_serialize_with_contract_casing() {
        assert_eq!(
            serde_json::to_string(&CharacterStatus::Unknown).unwrap(),
            "\"unknown\""
        );
        assert_eq!(serde_json::to_string(&Gender::Genderless).unwrap(), "\"Genderless\"");
    }
}
