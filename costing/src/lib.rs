mod config;
mod currency;
mod error;
mod hours;
mod method;
mod money;
mod policy;

pub use config::*;
pub use currency::*;
pub use error::*;
pub use hours::*;
pub use method::*;
pub use money::*;
pub use policy::*;

pub use rust_decimal::Decimal;
