pub(crate) mod error;
pub(crate) mod organization;
pub(crate) mod project_finance;
pub(crate) mod projects;
pub(crate) mod rate_cards;

pub(crate) use error::ApiError;
