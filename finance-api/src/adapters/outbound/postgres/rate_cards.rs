use async_trait::async_trait;
use costing::{Currency, Decimal};
use itertools::Itertools;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::{
    models::{OrganizationId, ProjectId, ProjectRateCardRole, RateCard, RateCardId, RateCardRole},
    ports::outbound::RateCardRepository,
    FinanceError,
};

use super::{finance::ProjectRoleRow, storage_error};

pub struct PostgresRateCardRepository {
    pool: PgPool,
}

impl PostgresRateCardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn roles_of(&self, card_ids: Vec<Uuid>) -> Result<Vec<RoleRow>, FinanceError> {
        sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT rcr.rate_card_id, rcr.job_title_id, jt.name AS job_title, rcr.rate
            FROM rate_card_roles rcr
            LEFT JOIN job_titles jt ON jt.id = rcr.job_title_id
            WHERE rcr.rate_card_id = ANY($1)
            ORDER BY jt.name
            "#,
        )
        .bind(card_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)
    }
}

#[derive(FromRow)]
struct RateCardRow {
    id: Uuid,
    organization_id: Uuid,
    name: String,
    currency: String,
}

#[derive(FromRow)]
struct RoleRow {
    rate_card_id: Uuid,
    job_title_id: Option<Uuid>,
    job_title: Option<String>,
    rate: Option<Decimal>,
}

fn assemble(cards: Vec<RateCardRow>, roles: Vec<RoleRow>) -> Result<Vec<RateCard>, FinanceError> {
    let mut roles_by_card = roles.into_iter().into_group_map_by(|role| role.rate_card_id);

    cards
        .into_iter()
        .map(|card| {
            let currency = Currency::parse(&card.currency).map_err(|err| {
                FinanceError::persistence(format!("stored currency is invalid: {err}"))
            })?;
            let roles = roles_by_card
                .remove(&card.id)
                .unwrap_or_default()
                .into_iter()
                .map(|role| RateCardRole {
                    job_title_id: role.job_title_id.map(Into::into),
                    job_title: role.job_title,
                    rate: role.rate,
                })
                .collect();
            Ok(RateCard {
                id: card.id.into(),
                organization_id: card.organization_id.into(),
                name: card.name,
                currency,
                roles,
            })
        })
        .collect()
}

#[async_trait]
impl RateCardRepository for PostgresRateCardRepository {
    async fn list_rate_cards(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<RateCard>, FinanceError> {
        let cards = sqlx::query_as::<_, RateCardRow>(
            r#"
            SELECT id, organization_id, name, currency
            FROM rate_cards
            WHERE organization_id = $1
            ORDER BY name
            "#,
        )
        .bind(organization_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let roles = self.roles_of(cards.iter().map(|card| card.id).collect()).await?;
        assemble(cards, roles)
    }

    async fn get_rate_card(
        &self,
        organization_id: &OrganizationId,
        id: &RateCardId,
    ) -> Result<Option<RateCard>, FinanceError> {
        let card = sqlx::query_as::<_, RateCardRow>(
            r#"
            SELECT id, organization_id, name, currency
            FROM rate_cards
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(organization_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        let Some(card) = card else {
            return Ok(None);
        };
        let roles = self.roles_of(vec![card.id]).await?;
        Ok(assemble(vec![card], roles)?.pop())
    }

    async fn project_roles(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectRateCardRole>, FinanceError> {
        let rows = sqlx::query_as::<_, ProjectRoleRow>(
            r#"
            SELECT prr.id, prr.project_id, prr.job_title_id, jt.name AS job_title,
                   prr.rate, prr.man_day_rate
            FROM project_rate_card_roles prr
            JOIN job_titles jt ON jt.id = prr.job_title_id
            WHERE prr.project_id = $1
            ORDER BY jt.name
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(ProjectRateCardRole::try_from).collect()
    }

    async fn import_roles(
        &self,
        project_id: &ProjectId,
        card: &RateCard,
    ) -> Result<Vec<ProjectRateCardRole>, FinanceError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;
        let mut imported = Vec::new();

        for role in card.roles.iter().filter(|role| role.is_importable()) {
            let (Some(job_title_id), Some(rate)) = (role.job_title_id, role.rate) else {
                continue;
            };
            let row = sqlx::query_as::<_, ProjectRoleRow>(
                r#"
                WITH inserted AS (
                    INSERT INTO project_rate_card_roles (id, project_id, job_title_id, rate)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (project_id, job_title_id) DO NOTHING
                    RETURNING id, project_id, job_title_id, rate, man_day_rate
                )
                SELECT i.id, i.project_id, i.job_title_id, jt.name AS job_title,
                       i.rate, i.man_day_rate
                FROM inserted i
                JOIN job_titles jt ON jt.id = i.job_title_id
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(project_id.as_uuid())
            .bind(job_title_id.as_uuid())
            .bind(rate)
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage_error)?;

            if let Some(row) = row {
                imported.push(ProjectRateCardRole::try_from(row)?);
            }
        }

        tx.commit().await.map_err(storage_error)?;
        Ok(imported)
    }

    async fn clear_project_roles(&self, project_id: &ProjectId) -> Result<u64, FinanceError> {
        let result = sqlx::query("DELETE FROM project_rate_card_roles WHERE project_id = $1")
            .bind(project_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected())
    }
}
