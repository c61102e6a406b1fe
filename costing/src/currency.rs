use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::PolicyError;

/// Currencies a project budget can be expressed in.
///
/// Stored and serialized lowercase; parsing is case-insensitive.
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
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Inr,
    Lkr,
    Aud,
    Cad,
    Nzd,
    Jpy,
    Cny,
    Sgd,
    Chf,
    Sek,
    Nok,
    Dkk,
    Zar,
    Aed,
    Brl,
}

impl Currency {
    pub fn parse(value: &str) -> Result<Self, PolicyError> {
        Self::from_str(value.trim()).map_err(|_| PolicyError::InvalidCurrency(value.to_string()))
    }

    /// ISO-4217 code as shown next to amounts, e.g. `USD`.
    pub fn code(&self) -> String {
        self.to_string().to_uppercase()
    }

    pub fn all() -> impl Iterator<Item = Currency> {
        Self::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Currency::parse("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::parse("LKR").unwrap(), Currency::Lkr);
        assert_eq!(Currency::parse(" Eur ").unwrap(), Currency::Eur);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(
            Currency::parse("doge").unwrap_err(),
            PolicyError::InvalidCurrency("doge".to_string())
        );
    }

    #[test]
    fn stored_lowercase_displayed_uppercase() {
        assert_eq!(Currency::Gbp.to_string(), "gbp");
        assert_eq!(Currency::Gbp.code(), "GBP");
        assert_eq!(serde_json::to_string(&Currency::Gbp).unwrap(), "\"gbp\"");
    }

    #[test]
    fn every_currency_round_trips_through_its_code() {
        for currency in Currency::all() {
            assert_eq!(Currency::parse(&currency.code()).unwrap(), currency);
        }
    }
}
