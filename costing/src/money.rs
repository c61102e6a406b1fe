use std::fmt;

use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::PolicyError;

/// Rounds to two decimals, half away from zero (half-up for the
/// non-negative values this crate deals in).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A non-negative monetary amount with two decimals of precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Largest amount a `NUMERIC(14, 2)` column holds.
    pub const MAX: Money = Money(Decimal::from_parts(276_447_231, 23_283, 0, false, 2));

    /// `field` names the input in the error, e.g. `"budget"`.
    pub fn new(value: Decimal, field: &'static str) -> Result<Self, PolicyError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PolicyError::InvalidAmount { field });
        }
        let rounded = round_money(value);
        if rounded > Self::MAX.0 {
            return Err(PolicyError::InvalidAmount { field });
        }
        Ok(Self(rounded))
    }

    pub fn from_f64(value: f64, field: &'static str) -> Result<Self, PolicyError> {
        if !value.is_finite() {
            return Err(PolicyError::InvalidAmount { field });
        }
        let decimal = Decimal::try_from(value).map_err(|_| PolicyError::InvalidAmount { field })?;
        Self::new(decimal, field)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Self::from_f64(raw, "amount").map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up_to_cents() {
        assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_money(Decimal::new(12344, 3)), Decimal::new(1234, 2));
        assert_eq!(
            Money::from_f64(1999.999, "budget").unwrap().amount(),
            Decimal::new(200000, 2)
        );
    }

    #[test]
    fn negative_amounts_are_rejected_with_field() {
        assert_eq!(
            Money::from_f64(-0.01, "budget").unwrap_err(),
            PolicyError::InvalidAmount { field: "budget" }
        );
        assert_eq!(
            Money::new(Decimal::new(-5, 0), "fixed_cost").unwrap_err(),
            PolicyError::InvalidAmount {
                field: "fixed_cost"
            }
        );
    }

    #[test]
    fn zero_is_allowed() {
        assert_eq!(Money::from_f64(0.0, "budget").unwrap(), Money::ZERO);
        assert_eq!(Money::from_f64(-0.0, "budget").unwrap(), Money::ZERO);
    }

    #[test]
    fn amounts_beyond_storage_precision_are_rejected() {
        assert_eq!(Money::MAX.to_string(), "999999999999.99");
        assert_eq!(
            Money::from_f64(1e20, "budget").unwrap_err(),
            PolicyError::InvalidAmount { field: "budget" }
        );
        assert_eq!(
            Money::new(Decimal::from(1_000_000_000_000_i64), "man_day_rate").unwrap_err(),
            PolicyError::InvalidAmount {
                field: "man_day_rate"
            }
        );
        assert_eq!(
            Money::new(Decimal::new(99_999_999_999_999, 2), "budget").unwrap(),
            Money::MAX
        );
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_f64(12.5, "budget").unwrap().to_string(), "12.50");
    }
}
