use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use axum_login::{AuthnBackend, AuthzBackend, UserId as SessionUserId};
use serde::Deserialize;
use sqlx::PgPool;
use tokio::task;

use crate::{
    domain::{Role, User},
    repositories::{RepositoryError, UserRepository, UserRepositoryImpl},
};

use super::password::verify_password;

#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &"[redacted]")
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error(transparent)]
    Sqlx(#[from] RepositoryError),

    #[error(transparent)]
    TaskJoin(#[from] task::JoinError),
}

#[derive(Clone)]
pub struct AuthBackend {
    users: Arc<dyn UserRepository>,
}

impl AuthBackend {
    pub fn new(db: PgPool) -> Self {
        Self::with_repository(Arc::new(UserRepositoryImpl::new(db)))
    }

    pub fn with_repository(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

impl std::fmt::Debug for AuthBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthBackend").finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthnBackend for AuthBackend {
    type User = User;
    type Credentials = Credentials;
    type Error = BackendError;

    /// `Ok(None)` both for unknown accounts and wrong passwords.
    async fn authenticate(
        &self,
        creds: Self::Credentials,
    ) -> Result<Option<Self::User>, Self::Error> {
        let Some(user) = self.users.find_password_user(&creds.email).await? else {
            return Ok(None);
        };

        // Argon2 is CPU bound, keep it off the async workers.
        let stored_hash = user.password_hash.clone();
        let verified =
            task::spawn_blocking(move || verify_password(&creds.password, &stored_hash)).await?;

        Ok(verified.then_some(user))
    }

    async fn get_user(
        &self,
        user_id: &SessionUserId<Self>,
    ) -> Result<Option<Self::User>, Self::Error> {
        Ok(self.users.get_user(user_id).await?)
    }
}

#[async_trait]
impl AuthzBackend for AuthBackend {
    type Permission = Role;

    async fn get_user_permissions(
        &self,
        user: &Self::User,
    ) -> Result<HashSet<Self::Permission>, Self::Error> {
        let perms = match user.role {
            Role::Admin => HashSet::from([Role::Admin, Role::Member]),
            Role::Member => HashSet::from([Role::Member]),
        };
        Ok(perms)
    }
}

pub type AuthSession = axum_login::AuthSession<AuthBackend>;
