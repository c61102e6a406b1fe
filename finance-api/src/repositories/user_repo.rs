use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::{models::UserId, Role, User};

use super::repo_error::RepositoryError;

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    /// Finds an active account that signs in with a password.
    ///
    /// Accounts linked to Google sign-in or marked deleted are never returned.
    async fn find_password_user(&self, email: &str) -> Result<Option<User>, RepositoryError>;
}

pub struct UserRepositoryImpl {
    pool: PgPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    organization_id: Uuid,
    email: String,
    name: String,
    role: String,
    password: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id.into(),
            organization_id: row.organization_id.into(),
            email: row.email,
            name: row.name,
            role: Role::from(row.role),
            password_hash: row.password.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, organization_id, email, name, role, password
            FROM users
            WHERE id = $1 AND is_deleted IS FALSE
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_password_user(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, organization_id, email, name, role, password
            FROM users
            WHERE email = $1
              AND google_id IS NULL
              AND is_deleted IS FALSE
              AND password IS NOT NULL
            "#,
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }
}
