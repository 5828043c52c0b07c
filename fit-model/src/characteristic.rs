use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// Biological sex as recorded by the health store. The store's "not set"
/// value has no variant here; it is reported as absence.
#[derive(AsRefStr, Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BiologicalSex {
    Female,
    Male,
    Other,
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[derive(AsRefStr, Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CharacteristicType {
    DateOfBirth,
    BiologicalSex,
}

impl fmt::Display for CharacteristicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}
