use anyhow::Context;
use async_trait::async_trait;
use costing::{CostingConfig, Currency, Money};
use reqwest::{
    cookie::{CookieStore, Jar},
    Client, RequestBuilder, Response, StatusCode, Url,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::{
    CreateProjectRequest, ErrorBody, LoginRequest, Me, UpdateBudgetRequest,
    UpdateCalculationMethodRequest, Updated,
};
use crate::gateway::{FinanceGateway, GatewayError};
use crate::models::{OrganizationSettings, ProjectSettings};

const SESSION_COOKIE: &str = "id";

/// finance-api over HTTP, authenticated by the session cookie.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    jar: Arc<Jar>,
}

impl ApiClient {
    pub fn new(base_url: &str, session_id: Option<&str>) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid API URL: {}", base_url))?;
        let jar = Arc::new(Jar::default());

        if let Some(session_id) = session_id {
            jar.add_cookie_str(
                &format!("{}={}; Path=/", SESSION_COOKIE, session_id),
                &base_url,
            );
        }

        let client = Client::builder()
            .cookie_provider(jar.clone())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            jar,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path)
            .with_context(|| format!("Failed to build URL for path {}", path))
            .map_err(GatewayError::from)
    }

    /// Current session cookie, if the server has set one.
    pub fn session_id(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let header = header.to_str().ok()?;
        header.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE).then(|| value.to_string())
        })
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response, GatewayError> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to call {}. Is finance-api running?", call_name))?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(GatewayError::Unauthorized),
            StatusCode::FORBIDDEN => Err(GatewayError::Forbidden),
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound),
            status => Err(GatewayError::Rejected(error_message(response, status).await)),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, GatewayError> {
        let response = self.send(request, call_name).await?;
        let body = response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {} response", call_name))?;
        Ok(body)
    }

    /// Signs in and keeps the session cookie in the jar.
    ///
    /// A 400 or 401 carries the server's message, e.g. "Incorrect email or
    /// password".
    pub async fn login(&self, email: &str, password: &str) -> Result<Me, GatewayError> {
        let response = self
            .client
            .post(self.endpoint("/login")?)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .context("Failed to call POST /login. Is finance-api running?")?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Rejected(error_message(response, status).await));
        }
        let me = response
            .json::<Me>()
            .await
            .context("Failed to parse POST /login response")?;
        Ok(me)
    }

    pub async fn me(&self) -> Result<Me, GatewayError> {
        self.get_json(self.client.get(self.endpoint("/me")?), "GET /me")
            .await
    }

    pub async fn logout(&self) -> Result<(), GatewayError> {
        self.send(self.client.get(self.endpoint("/logout")?), "GET /logout")
            .await?;
        Ok(())
    }

    pub async fn create_project(&self, name: &str) -> Result<ProjectSettings, GatewayError> {
        self.get_json(
            self.client
                .post(self.endpoint("/projects")?)
                .json(&CreateProjectRequest { name }),
            "POST /projects",
        )
        .await
    }
}

async fn error_message(response: Response, status: StatusCode) -> String {
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("Request failed with status {}", status),
    }
}

#[async_trait]
impl FinanceGateway for ApiClient {
    async fn organization(&self) -> Result<OrganizationSettings, GatewayError> {
        self.get_json(
            self.client.get(self.endpoint("/admin-center/organization")?),
            "GET /admin-center/organization",
        )
        .await
    }

    async fn project(&self, project_id: Uuid) -> Result<ProjectSettings, GatewayError> {
        let path = format!("/projects/{}/costing", project_id);
        self.get_json(self.client.get(self.endpoint(&path)?), "GET /projects/:id/costing")
            .await
    }

    async fn update_organization_calculation_method(
        &self,
        costing: &CostingConfig,
    ) -> Result<OrganizationSettings, GatewayError> {
        let updated: Updated<OrganizationSettings> = self
            .get_json(
                self.client
                    .put(self.endpoint("/admin-center/organization/calculation-method")?)
                    .json(&UpdateCalculationMethodRequest::from(costing)),
                "PUT /admin-center/organization/calculation-method",
            )
            .await?;
        Ok(updated.data)
    }

    async fn update_project_calculation_method(
        &self,
        project_id: Uuid,
        costing: &CostingConfig,
    ) -> Result<ProjectSettings, GatewayError> {
        let path = format!("/project-finance/project/{}/calculation-method", project_id);
        let updated: Updated<ProjectSettings> = self
            .get_json(
                self.client
                    .put(self.endpoint(&path)?)
                    .json(&UpdateCalculationMethodRequest::from(costing)),
                "PUT /project-finance/project/:id/calculation-method",
            )
            .await?;
        Ok(updated.data)
    }

    async fn update_project_budget(
        &self,
        project_id: Uuid,
        budget: Money,
        currency: Currency,
    ) -> Result<ProjectSettings, GatewayError> {
        let path = format!("/project-finance/project/{}/budget", project_id);
        self.get_json(
            self.client
                .put(self.endpoint(&path)?)
                .json(&UpdateBudgetRequest { budget, currency }),
            "PUT /project-finance/project/:id/budget",
        )
        .await
    }
}
