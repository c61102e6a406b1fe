use costing::Decimal;

use super::{FinanceTotals, Project, TaskFinance};

/// A project together with the finance rows of a task level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFinanceOverview {
    pub project: Project,
    pub tasks: Vec<TaskFinance>,
    pub totals: FinanceTotals,
}

impl ProjectFinanceOverview {
    pub fn new(project: Project, tasks: Vec<TaskFinance>) -> Self {
        let totals = FinanceTotals::from_rows(&tasks);
        Self {
            project,
            tasks,
            totals,
        }
    }

    /// Budget left after actual spend; negative when over budget.
    pub fn remaining_budget(&self) -> Decimal {
        self.project.budget.amount() - self.totals.total_actual
    }
}

/// Outcome of a costing mutation; `changed` is false when nothing was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostingUpdate<T> {
    pub value: T,
    pub changed: bool,
}
