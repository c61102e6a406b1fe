use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::{
    adapters::inbound::http::{export_file_name, render_csv},
    app_state::AppState,
    auth::AuthUser,
    domain::models::ProjectId,
    routes::ApiError,
};

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

#[instrument(name = "GET /project-finance/project/:project_id/export", skip(user, app_state))]
pub async fn export_csv(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(project_id): Path<ProjectId>,
) -> Result<Response, ApiError> {
    let overview = app_state
        .finance_service
        .export_rows(&user.organization_id, &project_id)
        .await?;

    let body = render_csv(&overview)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(&overview.project.name)
    );
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|_| ApiError::internal("Failed to build export headers"))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(CSV_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
