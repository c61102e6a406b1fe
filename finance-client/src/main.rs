use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use costing::CalculationMethod;
use finance_client::{
    api::ApiClient,
    cli::{Cli, Commands, OrgCommand, ProjectCommand},
    config::ClientConfig,
    login,
    models::{OrganizationSettings, ProjectSettings},
    notice::Notice,
    session_store,
    store::{ConfigStore, CostingUpdater},
    surfaces::{BudgetDrawer, MethodSelector, OrganizationMethodForm},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ClientConfig::load()?;

    match cli.command {
        Commands::Login => login::run_login(&config.api_url).await,
        Commands::Logout => {
            if let Some(session_id) = session_store::load_session()? {
                let client = ApiClient::new(&config.api_url, Some(&session_id))?;
                if let Err(err) = client.logout().await {
                    eprintln!("Warning: server logout failed: {}", err);
                }
            }
            session_store::clear_session()?;
            println!("Logged out.");
            Ok(())
        }
        Commands::ConfigPath => {
            println!("{}", ClientConfig::ensure_exists()?.display());
            Ok(())
        }
        Commands::Org { command } => run_org(&config, command).await,
        Commands::Project { command } => run_project(&config, command).await,
    }
}

fn connect(config: &ClientConfig) -> Result<(ApiClient, CostingUpdater)> {
    let session_id = session_store::load_session()?
        .context("Not logged in. Run `finance-client login` first.")?;
    let client = ApiClient::new(&config.api_url, Some(&session_id))?;
    let updater = CostingUpdater::new(Arc::new(client.clone()), ConfigStore::new());
    Ok((client, updater))
}

async fn run_org(config: &ClientConfig, command: OrgCommand) -> Result<()> {
    let (_, updater) = connect(config)?;
    let organization = updater.load_organization().await?;

    match command {
        OrgCommand::Show => print_organization(&organization),
        OrgCommand::SetMethod(args) => {
            let mut form = OrganizationMethodForm::new(updater, organization);
            form.select_method(args.method.into());
            if args.hours_per_day.is_some() {
                form.set_hours_per_day(args.hours_per_day);
            }
            report(form.save().await)?;
            print_organization(form.confirmed());
        }
    }
    Ok(())
}

async fn run_project(config: &ClientConfig, command: ProjectCommand) -> Result<()> {
    let (client, updater) = connect(config)?;

    match command {
        ProjectCommand::Create { name } => {
            let project = client.create_project(&name).await?;
            println!("Created project {}", project.id);
            print_project(&project);
        }
        ProjectCommand::Show { project_id } => {
            print_project(&updater.load_project(project_id).await?);
        }
        ProjectCommand::SetMethod { project_id, method } => {
            let project = updater.load_project(project_id).await?;
            let mut selector = MethodSelector::new(updater, project);
            if let Some(hours) = method.hours_per_day {
                report(selector.set_hours_per_day(hours).await)?;
            }
            report(selector.select_method(method.method.into()).await)?;
            print_project(selector.confirmed());
        }
        ProjectCommand::SetBudget {
            project_id,
            budget,
            currency,
        } => {
            let project = updater.load_project(project_id).await?;
            let mut drawer = BudgetDrawer::open(updater, project);
            drawer.set_budget(budget);
            if let Some(currency) = currency {
                drawer.set_currency(currency);
            }
            report(drawer.save().await)?;
            print_project(drawer.confirmed());
        }
    }
    Ok(())
}

fn report(notice: Notice) -> Result<()> {
    match notice {
        Notice::Error(message) => anyhow::bail!(message),
        Notice::Unchanged => Ok(()),
        notice => {
            println!("{}", notice);
            Ok(())
        }
    }
}

fn print_organization(organization: &OrganizationSettings) {
    println!("Organization:       {}", organization.name);
    print_method(organization.calculation_method, &organization.formula());
}

fn print_project(project: &ProjectSettings) {
    println!("Project:            {} ({})", project.name, project.id);
    println!(
        "Budget:             {} {}",
        project.budget,
        project.currency.code()
    );
    print_method(project.calculation_method, &project.formula());
    println!("Rate column:        {}", project.rate_column_label());
}

fn print_method(method: CalculationMethod, formula: &str) {
    println!("Calculation method: {}", method.label());
    println!("Formula:            {}", formula);
}
