use crate::error::{HobbyistError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr};

/// Length of a record identifier in hex characters.
pub const ID_LENGTH: usize = 24;

const HEX_ALPHABET: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

/// Opaque store-assigned identifier: 24 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        RecordId(nanoid::format(
            nanoid::rngs::default,
            &HEX_ALPHABET,
            ID_LENGTH,
        ))
    }

    /// Coerces caller input into an identifier.
    ///
    /// Uppercase hex is accepted and normalized; anything else of the wrong
    /// length or alphabet is an `InvalidArgument`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.len() != ID_LENGTH || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HobbyistError::InvalidArgument(format!(
                "'{}' is not a valid id (expected {} hex characters)",
                input, ID_LENGTH
            )));
        }
        Ok(RecordId(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = HobbyistError;

    fn from_str(s: &str) -> Result<Self> {
        RecordId::parse(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        RecordId::parse(&s).map_err(de::Error::custom)
    }
}
