use std::fmt;

use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::PolicyError;

/// Working hours in one man day, used to convert between hours and man days.
///
/// Always within `[1, 24]` and carried with one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HoursPerDay(Decimal);

impl HoursPerDay {
    pub const MIN: Decimal = Decimal::ONE;
    pub const MAX: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

    /// Range is checked on the raw value; only then is it rounded to one decimal.
    pub fn new(value: Decimal) -> Result<Self, PolicyError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(PolicyError::InvalidHoursPerDay(format!(
                "{value} is outside 1-24"
            )));
        }

        Ok(Self(
            value
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
                .normalize(),
        ))
    }

    pub fn from_f64(value: f64) -> Result<Self, PolicyError> {
        if !value.is_finite() {
            return Err(PolicyError::InvalidHoursPerDay(
                "value is not a number".to_string(),
            ));
        }
        if !(1.0..=24.0).contains(&value) {
            return Err(PolicyError::InvalidHoursPerDay(format!(
                "{value} is outside 1-24"
            )));
        }

        let decimal = Decimal::try_from(value)
            .map_err(|_| PolicyError::InvalidHoursPerDay(format!("{value} is not representable")))?;
        Self::new(decimal)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(8.0)
    }
}

impl Default for HoursPerDay {
    fn default() -> Self {
        Self(Decimal::from(8))
    }
}

impl fmt::Display for HoursPerDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl TryFrom<Decimal> for HoursPerDay {
    type Error = PolicyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HoursPerDay> for Decimal {
    fn from(value: HoursPerDay) -> Self {
        value.0
    }
}

impl Serialize for HoursPerDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for HoursPerDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Self::from_f64(raw).map_err(de::Error::custom)
    }
}
