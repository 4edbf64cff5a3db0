#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::enums::Side;
use crate::error::MappingError;

/// Stable identity of a field, independent of its position.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String")]
pub struct FieldId(String);

impl FieldId {
    pub fn new(value: impl Into<String>) -> Result<Self, MappingError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MappingError::InvalidId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Registry-assigned id: the side prefix followed by a counter value.
    pub fn sequential(side: Side, n: u64) -> Self {
        Self(format!("{}{n}", side.id_prefix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FieldId {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for FieldId {
    type Error = MappingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Identity of a correspondence within one mapping store.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String")]
pub struct CorrespondenceId(String);

impl CorrespondenceId {
    pub fn new(value: impl Into<String>) -> Result<Self, MappingError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MappingError::InvalidId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Store-assigned id (`c1`, `c2`, ...).
    pub fn sequential(n: u64) -> Self {
        Self(format!("c{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrespondenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CorrespondenceId {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CorrespondenceId {
    type Error = MappingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_ids_are_rejected() {
        assert!(matches!(
            FieldId::new("   "),
            Err(MappingError::InvalidId(_))
        ));
        assert!(CorrespondenceId::new("").is_err());
    }

    #[test]
    fn ids_are_trimmed() {
        assert_eq!(FieldId::new(" s2 ").unwrap().as_str(), "s2");
        assert_eq!("c7".parse::<CorrespondenceId>().unwrap().as_str(), "c7");
    }

    #[test]
    fn sequential_ids_carry_side_prefix() {
        assert_eq!(FieldId::sequential(Side::Source, 3).as_str(), "s3");
        assert_eq!(FieldId::sequential(Side::Target, 12).as_str(), "t12");
        assert_eq!(CorrespondenceId::sequential(1).to_string(), "c1");
    }
}
