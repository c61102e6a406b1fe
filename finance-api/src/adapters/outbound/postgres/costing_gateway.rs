use async_trait::async_trait;
use costing::{CalculationMethod, CostingConfig, Currency, Decimal, HoursPerDay, Money};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::{
    models::{CostingScope, NewProject, Organization, OrganizationId, Project, ProjectId},
    ports::outbound::{CostingGateway, OrganizationRepository, ProjectRepository},
    FinanceError,
};

use super::storage_error;

/// Costing, budget and currency persistence for organizations and projects.
pub struct PostgresCostingRepository {
    pool: PgPool,
}

impl PostgresCostingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct OrganizationRow {
    id: Uuid,
    name: String,
    calculation_method: String,
    hours_per_day: Decimal,
}

#[derive(FromRow)]
struct ProjectRow {
    id: Uuid,
    organization_id: Uuid,
    name: String,
    currency: String,
    budget: Decimal,
    calculation_method: String,
    hours_per_day: Decimal,
}

/// Reads a stored `(method, hours_per_day)` pair.
pub(super) fn stored_costing(
    method: &str,
    hours_per_day: Decimal,
) -> Result<(CostingConfig, HoursPerDay), FinanceError> {
    let method = CalculationMethod::parse(method)
        .map_err(|err| FinanceError::persistence(format!("stored costing is invalid: {err}")))?;
    let hours = HoursPerDay::new(hours_per_day)
        .map_err(|err| FinanceError::persistence(format!("stored costing is invalid: {err}")))?;
    Ok((CostingConfig::from_stored(method, hours), hours))
}

impl TryFrom<OrganizationRow> for Organization {
    type Error = FinanceError;

    fn try_from(row: OrganizationRow) -> Result<Self, Self::Error> {
        let (costing, stored_hours_per_day) =
            stored_costing(&row.calculation_method, row.hours_per_day)?;
        Ok(Organization {
            id: row.id.into(),
            name: row.name,
            costing,
            stored_hours_per_day,
        })
    }
}

impl TryFrom<ProjectRow> for Project {
    type Error = FinanceError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let (costing, stored_hours_per_day) =
            stored_costing(&row.calculation_method, row.hours_per_day)?;
        let currency = Currency::parse(&row.currency)
            .map_err(|err| FinanceError::persistence(format!("stored currency is invalid: {err}")))?;
        let budget = Money::new(row.budget, "budget")
            .map_err(|err| FinanceError::persistence(format!("stored budget is invalid: {err}")))?;
        Ok(Project {
            id: row.id.into(),
            organization_id: row.organization_id.into(),
            name: row.name,
            currency,
            budget,
            costing,
            stored_hours_per_day,
        })
    }
}

const PROJECT_COLUMNS: &str =
    "id, organization_id, name, currency, budget, calculation_method, hours_per_day";

#[async_trait]
impl CostingGateway for PostgresCostingRepository {
    async fn save_costing(
        &self,
        scope: &CostingScope,
        config: &CostingConfig,
    ) -> Result<(), FinanceError> {
        let (table, id, not_found) = match scope {
            CostingScope::Organization(id) => {
                ("organizations", id.as_uuid(), FinanceError::OrganizationNotFound)
            }
            CostingScope::Project(id) => ("projects", id.as_uuid(), FinanceError::ProjectNotFound),
        };

        // Hourly passes NULL so the last man-day factor is kept.
        let sql = format!(
            r#"
            UPDATE {table}
            SET calculation_method = $2,
                hours_per_day = COALESCE($3, hours_per_day)
            WHERE id = $1
            "#
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(config.method().to_string())
            .bind(config.hours_per_day().map(Decimal::from))
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found);
        }
        Ok(())
    }

    async fn save_budget(
        &self,
        project_id: &ProjectId,
        budget: Money,
        currency: Currency,
    ) -> Result<(), FinanceError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET budget = $2, currency = $3
            WHERE id = $1
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(budget.amount())
        .bind(currency.to_string())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(FinanceError::ProjectNotFound);
        }
        Ok(())
    }

    async fn save_currency(
        &self,
        project_id: &ProjectId,
        currency: Currency,
    ) -> Result<(), FinanceError> {
        let result = sqlx::query("UPDATE projects SET currency = $2 WHERE id = $1")
            .bind(project_id.as_uuid())
            .bind(currency.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(FinanceError::ProjectNotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl OrganizationRepository for PostgresCostingRepository {
    async fn get_organization(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<Organization>, FinanceError> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT id, name, calculation_method, hours_per_day
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(Organization::try_from).transpose()
    }
}

#[async_trait]
impl ProjectRepository for PostgresCostingRepository {
    async fn create_project(&self, project: &NewProject) -> Result<Project, FinanceError> {
        let sql = format!(
            r#"
            INSERT INTO projects (id, organization_id, name, calculation_method, hours_per_day)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PROJECT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(project.organization_id.as_uuid())
            .bind(&project.name)
            .bind(project.costing.method().to_string())
            .bind(project.stored_hours_per_day.value())
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        Project::try_from(row)
    }

    async fn get_project(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectId,
    ) -> Result<Option<Project>, FinanceError> {
        let sql = format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM projects
            WHERE id = $1 AND organization_id = $2
            "#
        );
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(id.as_uuid())
            .bind(organization_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.map(Project::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_rows_keep_the_stored_factor_aside() {
        let (config, stored) = stored_costing("hourly", Decimal::new(75, 1)).unwrap();
        assert_eq!(config, CostingConfig::Hourly);
        assert_eq!(stored.value(), Decimal::new(75, 1));
    }

    #[test]
    fn man_day_rows_use_the_stored_factor() {
        let (config, _) = stored_costing("man_days", Decimal::from(6)).unwrap();
        assert_eq!(config.hours_per_day().unwrap().value(), Decimal::from(6));
    }

    #[test]
    fn corrupt_rows_are_persistence_failures() {
        assert!(matches!(
            stored_costing("weekly", Decimal::from(8)),
            Err(FinanceError::PersistenceFailure(_))
        ));
        assert!(matches!(
            stored_costing("man_days", Decimal::from(30)),
            Err(FinanceError::PersistenceFailure(_))
        ));
    }
}
