use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::PolicyError;

/// How project costs are derived: from estimated hours or from man days.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CalculationMethod {
    #[default]
    Hourly,
    ManDays,
}

impl CalculationMethod {
    /// Parses the wire value, rejecting anything but the two known methods.
    pub fn parse(value: &str) -> Result<Self, PolicyError> {
        Self::from_str(value).map_err(|_| PolicyError::InvalidMethod(value.to_string()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hourly => "Hourly Rates",
            Self::ManDays => "Man Days",
        }
    }
}
