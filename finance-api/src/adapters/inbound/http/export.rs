//! CSV rendering of a project's finance rows.

use costing::{CalculationMethod, CalculationMethodPolicy, Decimal};

use csv::{Terminator, WriterBuilder};

use crate::domain::{
    models::{ProjectFinanceOverview, TaskFinance},
    FinanceError,
};

/// File name offered in the `Content-Disposition` header.
pub fn export_file_name(project_name: &str) -> String {
    let slug: String = project_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "project-finance.csv".to_string()
    } else {
        format!("{slug}-finance.csv")
    }
}

pub fn render_csv(overview: &ProjectFinanceOverview) -> Result<String, FinanceError> {
    let method = overview.project.costing.method();
    let currency = overview.project.currency.code();
    let estimate_header = match method {
        CalculationMethod::Hourly => "Estimated Hours",
        CalculationMethod::ManDays => "Estimated Man Days",
    };
    let rate_header = CalculationMethodPolicy::rate_column_label(method);

    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(vec![]);

    wtr.write_record([
        "Task".to_string(),
        "Parent Task".to_string(),
        "Assignees".to_string(),
        estimate_header.to_string(),
        format!("{rate_header} ({currency})"),
        format!("Estimated Cost ({currency})"),
        format!("Fixed Cost ({currency})"),
        format!("Total Budget ({currency})"),
        "Logged Hours".to_string(),
        format!("Actual Cost ({currency})"),
        format!("Total Actual ({currency})"),
        format!("Variance ({currency})"),
    ])
    .map_err(export_error)?;

    for row in &overview.tasks {
        let parent = row
            .parent_task_id
            .and_then(|id| overview.tasks.iter().find(|t| t.id == id))
            .map(|t| t.name.as_str())
            .unwrap_or_default();
        let (estimate, rate) = match method {
            CalculationMethod::Hourly => (row.estimated_hours, row.hourly_rate),
            CalculationMethod::ManDays => (row.estimated_man_days, row.daily_rate),
        };
        wtr.write_record([
            row.name.clone(),
            parent.to_string(),
            row.assignees.join(", "),
            amount(estimate),
            amount(rate),
            amount(row.estimated_cost),
            amount(row.fixed_cost),
            amount(row.total_budget),
            amount(row.logged_hours),
            amount(row.actual_cost),
            amount(row.total_actual),
            amount(row.variance),
        ])
        .map_err(export_error)?;
    }

    let totals = &overview.totals;
    wtr.write_record([
        "Total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        amount(totals.estimated_cost),
        amount(totals.fixed_cost),
        amount(totals.total_budget),
        amount(total_logged_hours(&overview.tasks)),
        amount(totals.actual_cost),
        amount(totals.total_actual),
        amount(totals.variance),
    ])
    .map_err(export_error)?;

    let data = wtr
        .into_inner()
        .map_err(|e| FinanceError::persistence(format!("CSV writer error: {e}")))?;
    String::from_utf8(data)
        .map_err(|e| FinanceError::persistence(format!("UTF-8 conversion error: {e}")))
}

fn export_error(err: csv::Error) -> FinanceError {
    FinanceError::persistence(format!("CSV writer error: {err}"))
}

fn total_logged_hours(rows: &[TaskFinance]) -> Decimal {
    rows.iter()
        .filter(|row| row.parent_task_id.is_none())
        .map(|row| row.logged_hours)
        .sum()
}

fn amount(value: Decimal) -> String {
    format!("{value:.2}")
}
