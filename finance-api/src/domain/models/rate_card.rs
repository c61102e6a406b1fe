use costing::{Currency, Money};
use rust_decimal::Decimal;

use super::{JobTitleId, OrganizationId, ProjectId, ProjectRateCardRoleId, RateCardId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateCard {
    pub id: RateCardId,
    pub organization_id: OrganizationId,
    pub name: String,
    pub currency: Currency,
    pub roles: Vec<RateCardRole>,
}

/// A job title and its hourly rate on an organization rate card.
///
/// Roles without a job title or rate are skipped when imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateCardRole {
    pub job_title_id: Option<JobTitleId>,
    pub job_title: Option<String>,
    pub rate: Option<Decimal>,
}

impl RateCardRole {
    pub fn is_importable(&self) -> bool {
        self.job_title_id.is_some() && self.rate.is_some()
    }
}

/// A rate card role after import into a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRateCardRole {
    pub id: ProjectRateCardRoleId,
    pub project_id: ProjectId,
    pub job_title_id: JobTitleId,
    pub job_title: String,
    pub rate: Money,
    pub man_day_rate: Money,
}

/// A rate card as shown for the organization's active method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateCardDetails {
    pub card: RateCard,
    pub rate_column_label: &'static str,
}
