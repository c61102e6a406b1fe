mod export;
mod project;
mod rate_card_roles;
mod tasks;

use axum::{
    routing::{get, put},
    Router,
};

use crate::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/project/:project_id/tasks", get(tasks::list_tasks))
        .route(
            "/project/:project_id/tasks/:parent_task_id/subtasks",
            get(tasks::list_subtasks),
        )
        .route("/task/:id/breakdown", get(tasks::task_breakdown))
        .route("/task/:task_id/fixed-cost", put(tasks::update_fixed_cost))
        .route(
            "/task/:task_id/estimated-man-days",
            put(tasks::update_estimated_man_days),
        )
        .route("/project/:project_id/currency", put(project::update_currency))
        .route("/project/:project_id/budget", put(project::update_budget))
        .route(
            "/project/:project_id/calculation-method",
            put(project::update_calculation_method),
        )
        .route(
            "/rate-card-role/:rate_card_role_id/man-day-rate",
            put(rate_card_roles::update_man_day_rate),
        )
        .route(
            "/project/:project_id/rate-card-roles",
            get(rate_card_roles::list_roles)
                .post(rate_card_roles::import_rate_card)
                .delete(rate_card_roles::clear_roles),
        )
        .route("/project/:project_id/export", get(export::export_csv))
}
