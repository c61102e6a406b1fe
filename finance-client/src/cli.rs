use clap::{Parser, Subcommand, ValueEnum};
use costing::CalculationMethod;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "finance-client")]
#[command(about = "Manage project costing settings on a finance-api server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in with email and password
    Login,
    /// End the session and remove it locally
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
    /// Organization-wide costing defaults
    Org {
        #[command(subcommand)]
        command: OrgCommand,
    },
    /// Per-project costing settings
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum OrgCommand {
    /// Show the calculation method and formula
    Show,
    /// Change the default calculation method (admins only)
    SetMethod(MethodArgs),
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Create a project with the organization's costing defaults
    Create { name: String },
    /// Show costing, budget and currency
    Show { project_id: Uuid },
    /// Change the project's calculation method
    SetMethod {
        project_id: Uuid,
        #[command(flatten)]
        method: MethodArgs,
    },
    /// Change budget and currency
    SetBudget {
        project_id: Uuid,
        budget: f64,
        /// Keeps the current currency when omitted
        #[arg(long)]
        currency: Option<String>,
    },
}

#[derive(Debug, clap::Args)]
pub struct MethodArgs {
    #[arg(value_enum)]
    pub method: MethodArg,
    /// Working hours in one man day, 1-24
    #[arg(long)]
    pub hours_per_day: Option<f64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Hourly,
    ManDays,
}

impl From<MethodArg> for CalculationMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Hourly => CalculationMethod::Hourly,
            MethodArg::ManDays => CalculationMethod::ManDays,
        }
    }
}
