//! Derives task finance rows from stored tasks, member rates and work logs.

use std::collections::HashMap;

use costing::{
    round_money, CalculationMethodPolicy, CostInputs, CostingConfig, Decimal, PolicyError,
};
use itertools::Itertools;

use crate::domain::models::{
    MemberCost, ProjectMember, Task, TaskBreakdown, TaskFinance, TaskId, UserId, WorkLog,
};

const SECONDS_PER_HOUR: i64 = 3600;
const MINUTES_PER_HOUR: i64 = 60;

/// Rates and logs of one project, indexed for per-task lookups.
pub struct FinanceContext<'a> {
    config: &'a CostingConfig,
    members: HashMap<UserId, &'a ProjectMember>,
    logs: HashMap<TaskId, Vec<&'a WorkLog>>,
}

impl<'a> FinanceContext<'a> {
    pub fn new(
        config: &'a CostingConfig,
        members: &'a [ProjectMember],
        logs: &'a [WorkLog],
    ) -> Self {
        Self {
            config,
            members: members.iter().map(|m| (m.user_id, m)).collect(),
            logs: logs.iter().into_group_map_by(|log| log.task_id),
        }
    }

    pub fn task_finance(&self, task: &Task) -> Result<TaskFinance, PolicyError> {
        let assignees = task
            .assignees
            .iter()
            .filter_map(|user_id| self.members.get(user_id).copied())
            .collect_vec();

        let hourly_rate = mean(assignees.iter().map(|m| m.rate.amount()));
        let daily_rate = mean(assignees.iter().map(|m| m.man_day_rate.amount()));

        let estimated_hours = round_money(
            Decimal::from(task.estimated_minutes) / Decimal::from(MINUTES_PER_HOUR),
        );
        let estimated_man_days = match self.config {
            CostingConfig::ManDays { hours_per_day } if task.estimated_man_days.is_zero() => {
                CalculationMethodPolicy::man_days_from_hours(estimated_hours, *hours_per_day)?
            }
            _ => task.estimated_man_days,
        };

        let estimated_cost = CalculationMethodPolicy::compute_cost(
            self.config,
            &CostInputs {
                estimate_hours: estimated_hours,
                estimate_man_days: estimated_man_days,
                hourly_rate,
                daily_rate,
            },
        )?;

        let mut logged_seconds = 0i64;
        let mut actual_cost = Decimal::ZERO;
        for log in self.logs.get(&task.id).into_iter().flatten() {
            logged_seconds += i64::from(log.time_spent);
            actual_cost += self.log_cost(log)?;
        }

        let fixed_cost = task.fixed_cost.amount();
        let total_budget = estimated_cost + fixed_cost;
        let actual_cost = round_money(actual_cost);
        let total_actual = actual_cost + fixed_cost;

        Ok(TaskFinance {
            id: task.id,
            name: task.name.clone(),
            parent_task_id: task.parent_task_id,
            sub_task_count: task.sub_task_count,
            assignees: assignees.iter().map(|m| m.name.clone()).collect(),
            estimated_hours,
            estimated_man_days,
            hourly_rate,
            daily_rate,
            estimated_cost,
            fixed_cost,
            total_budget,
            logged_hours: seconds_to_hours(logged_seconds),
            actual_cost,
            total_actual,
            variance: total_actual - total_budget,
        })
    }

    /// Per-member lines for every assignee and every member who logged time.
    pub fn breakdown(&self, task: &Task) -> Result<TaskBreakdown, PolicyError> {
        let finance = self.task_finance(task)?;
        let logs = self.logs.get(&task.id).map(Vec::as_slice).unwrap_or_default();

        let user_ids = task
            .assignees
            .iter()
            .copied()
            .chain(logs.iter().map(|log| log.user_id))
            .unique()
            .collect_vec();

        let mut members = Vec::with_capacity(user_ids.len());
        for user_id in user_ids {
            let Some(member) = self.members.get(&user_id) else {
                continue;
            };
            let own_logs = logs.iter().filter(|log| log.user_id == user_id);
            let mut seconds = 0i64;
            let mut cost = Decimal::ZERO;
            for log in own_logs {
                seconds += i64::from(log.time_spent);
                cost += self.log_cost(log)?;
            }
            members.push(MemberCost {
                user_id,
                name: member.name.clone(),
                job_title: member.job_title.clone(),
                hourly_rate: member.rate.amount(),
                daily_rate: member.man_day_rate.amount(),
                logged_hours: seconds_to_hours(seconds),
                actual_cost: round_money(cost),
            });
        }

        Ok(TaskBreakdown {
            task: finance,
            members,
        })
    }

    fn log_cost(&self, log: &WorkLog) -> Result<Decimal, PolicyError> {
        let Some(member) = self.members.get(&log.user_id) else {
            return Ok(Decimal::ZERO);
        };
        let hours = Decimal::from(log.time_spent) / Decimal::from(SECONDS_PER_HOUR);

        let estimate_man_days = match self.config {
            CostingConfig::Hourly => Decimal::ZERO,
            CostingConfig::ManDays { hours_per_day } => {
                CalculationMethodPolicy::man_days_from_hours(hours, *hours_per_day)?
            }
        };

        CalculationMethodPolicy::compute_cost(
            self.config,
            &CostInputs {
                estimate_hours: hours,
                estimate_man_days,
                hourly_rate: member.rate.amount(),
                daily_rate: member.man_day_rate.amount(),
            },
        )
    }
}

fn mean(values: impl Iterator<Item = Decimal>) -> Decimal {
    let (sum, count) = values.fold((Decimal::ZERO, 0i64), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        return Decimal::ZERO;
    }
    round_money(sum / Decimal::from(count))
}

fn seconds_to_hours(seconds: i64) -> Decimal {
    round_money(Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR))
}

#[cfg(test)]
mod tests {
    use costing::{HoursPerDay, Money};

    use super::*;
    use crate::domain::models::{ProjectId, ProjectMemberId};

    fn member(name: &str, rate: i64, man_day_rate: i64) -> ProjectMember {
        ProjectMember {
            id: ProjectMemberId::generate(),
            user_id: UserId::generate(),
            name: name.to_string(),
            role_id: None,
            job_title: Some("Engineer".to_string()),
            rate: Money::new(Decimal::from(rate), "rate").unwrap(),
            man_day_rate: Money::new(Decimal::from(man_day_rate), "man_day_rate").unwrap(),
        }
    }

    fn task(minutes: i32, man_days: Decimal, fixed: i64, assignees: Vec<UserId>) -> Task {
        Task {
            id: TaskId::generate(),
            project_id: ProjectId::generate(),
            parent_task_id: None,
            name: "Build".to_string(),
            estimated_minutes: minutes,
            estimated_man_days: man_days,
            fixed_cost: Money::new(Decimal::from(fixed), "fixed_cost").unwrap(),
            sub_task_count: 0,
            assignees,
        }
    }

    fn man_days(hours: f64) -> CostingConfig {
        CostingConfig::ManDays {
            hours_per_day: HoursPerDay::from_f64(hours).unwrap(),
        }
    }

    #[test]
    fn hourly_estimate_uses_mean_assignee_rate() {
        let alice = member("Alice", 40, 300);
        let bob = member("Bob", 60, 500);
        let members = vec![alice.clone(), bob.clone()];
        let task = task(600, Decimal::ZERO, 100, vec![alice.user_id, bob.user_id]);
        let config = CostingConfig::Hourly;

        let row = FinanceContext::new(&config, &members, &[])
            .task_finance(&task)
            .unwrap();

        assert_eq!(row.estimated_hours, Decimal::from(10));
        assert_eq!(row.hourly_rate, Decimal::from(50));
        assert_eq!(row.estimated_cost, Decimal::from(500));
        assert_eq!(row.total_budget, Decimal::from(600));
        assert_eq!(row.assignees, vec!["Alice", "Bob"]);
    }

    #[test]
    fn man_days_estimate_uses_stored_days() {
        let alice = member("Alice", 40, 400);
        let members = vec![alice.clone()];
        let task = task(600, Decimal::from(5), 0, vec![alice.user_id]);
        let config = man_days(8.0);

        let row = FinanceContext::new(&config, &members, &[])
            .task_finance(&task)
            .unwrap();

        assert_eq!(row.estimated_man_days, Decimal::from(5));
        assert_eq!(row.estimated_cost, Decimal::from(2000));
    }

    #[test]
    fn missing_man_days_are_derived_from_hours() {
        let alice = member("Alice", 40, 400);
        let members = vec![alice.clone()];
        let task = task(1200, Decimal::ZERO, 0, vec![alice.user_id]);
        let config = man_days(8.0);

        let row = FinanceContext::new(&config, &members, &[])
            .task_finance(&task)
            .unwrap();

        assert_eq!(row.estimated_man_days, Decimal::new(250, 2));
        assert_eq!(row.estimated_cost, Decimal::from(1000));
    }

    #[test]
    fn actual_cost_follows_logged_time() {
        let alice = member("Alice", 40, 400);
        let members = vec![alice.clone()];
        let task = task(600, Decimal::ZERO, 50, vec![alice.user_id]);
        let logs = vec![
            WorkLog {
                task_id: task.id,
                user_id: alice.user_id,
                time_spent: 3 * 3600,
            },
            WorkLog {
                task_id: task.id,
                user_id: alice.user_id,
                time_spent: 1800,
            },
        ];
        let config = CostingConfig::Hourly;

        let row = FinanceContext::new(&config, &members, &logs)
            .task_finance(&task)
            .unwrap();

        assert_eq!(row.logged_hours, Decimal::new(350, 2));
        assert_eq!(row.actual_cost, Decimal::from(140));
        assert_eq!(row.total_actual, Decimal::from(190));
        // budget 400 + 50, actual 140 + 50
        assert_eq!(row.variance, Decimal::from(-260));
    }

    #[test]
    fn man_days_actual_cost_converts_logged_hours() {
        let alice = member("Alice", 40, 400);
        let members = vec![alice.clone()];
        let task = task(0, Decimal::ZERO, 0, vec![alice.user_id]);
        let logs = vec![WorkLog {
            task_id: task.id,
            user_id: alice.user_id,
            time_spent: 4 * 3600,
        }];
        let config = man_days(8.0);

        let row = FinanceContext::new(&config, &members, &logs)
            .task_finance(&task)
            .unwrap();

        assert_eq!(row.actual_cost, Decimal::from(200));
    }

    #[test]
    fn unassigned_tasks_have_zero_rates() {
        let config = CostingConfig::Hourly;
        let task = task(600, Decimal::ZERO, 0, vec![]);

        let row = FinanceContext::new(&config, &[], &[])
            .task_finance(&task)
            .unwrap();

        assert_eq!(row.hourly_rate, Decimal::ZERO);
        assert_eq!(row.estimated_cost, Decimal::ZERO);
    }

    #[test]
    fn breakdown_lists_assignees_and_loggers_once() {
        let alice = member("Alice", 40, 400);
        let bob = member("Bob", 60, 480);
        let members = vec![alice.clone(), bob.clone()];
        let task = task(600, Decimal::ZERO, 0, vec![alice.user_id]);
        let logs = vec![
            WorkLog {
                task_id: task.id,
                user_id: bob.user_id,
                time_spent: 3600,
            },
            WorkLog {
                task_id: task.id,
                user_id: alice.user_id,
                time_spent: 7200,
            },
        ];
        let config = CostingConfig::Hourly;

        let breakdown = FinanceContext::new(&config, &members, &logs)
            .breakdown(&task)
            .unwrap();

        let names = breakdown.members.iter().map(|m| m.name.as_str()).collect_vec();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(breakdown.members[0].actual_cost, Decimal::from(80));
        assert_eq!(breakdown.members[1].actual_cost, Decimal::from(60));
        assert_eq!(breakdown.task.actual_cost, Decimal::from(140));
    }
}
