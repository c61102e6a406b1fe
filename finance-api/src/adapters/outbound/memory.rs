//! In-memory implementation of every outbound port, for service and route tests.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use costing::{CostingConfig, Currency, Decimal, HoursPerDay, Money};

use crate::{
    auth::hash_password,
    domain::{
        models::{
            CostingScope, JobTitleId, NewProject, Organization, OrganizationId, Project,
            ProjectId, ProjectMember, ProjectMemberId, ProjectRateCardRole, ProjectRateCardRoleId,
            RateCard, RateCardId, RateCardRole, Task, TaskId, UserId, WorkLog,
        },
        ports::outbound::{
            CostingGateway, OrganizationRepository, ProjectFinanceRepository, ProjectRepository,
            RateCardRepository,
        },
        FinanceError, Role, User,
    },
    repositories::{RepositoryError, UserRepository},
};

#[derive(Default)]
struct State {
    organizations: HashMap<OrganizationId, Organization>,
    projects: HashMap<ProjectId, Project>,
    members: Vec<(ProjectId, ProjectMember)>,
    tasks: Vec<Task>,
    work_logs: Vec<WorkLog>,
    project_roles: Vec<ProjectRateCardRole>,
    rate_cards: Vec<RateCard>,
    saved_costing: Vec<(CostingScope, CostingConfig)>,
    users: Vec<User>,
    fail_writes: bool,
}

/// Mock store backed by in-memory collections.
///
/// Clones share state, so a test can keep a handle for assertions while a
/// service owns another.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

#[allow(dead_code)]
impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every write fail with a persistence error.
    pub fn fail_writes(&self, fail: bool) {
        self.state.write().unwrap().fail_writes = fail;
    }

    pub fn add_organization(&self, costing: CostingConfig) -> OrganizationId {
        let id = OrganizationId::generate();
        let organization = Organization {
            id,
            name: "Acme".to_string(),
            costing,
            stored_hours_per_day: costing.hours_per_day().unwrap_or_default(),
        };
        self.state
            .write()
            .unwrap()
            .organizations
            .insert(id, organization);
        id
    }

    pub fn add_project(&self, organization_id: &OrganizationId, costing: CostingConfig) -> ProjectId {
        let id = ProjectId::generate();
        let project = Project {
            id,
            organization_id: *organization_id,
            name: "Apollo".to_string(),
            currency: Currency::Usd,
            budget: Money::ZERO,
            costing,
            stored_hours_per_day: costing.hours_per_day().unwrap_or_default(),
        };
        self.state.write().unwrap().projects.insert(id, project);
        id
    }

    /// Adds a member holding a fresh project role with the given rates.
    pub fn add_member(&self, project_id: &ProjectId, name: &str, rate: i64, man_day_rate: i64) -> UserId {
        let user_id = UserId::generate();
        let member = ProjectMember {
            id: ProjectMemberId::generate(),
            user_id,
            name: name.to_string(),
            role_id: Some(ProjectRateCardRoleId::generate()),
            job_title: Some("Engineer".to_string()),
            rate: money(rate),
            man_day_rate: money(man_day_rate),
        };
        self.state
            .write()
            .unwrap()
            .members
            .push((*project_id, member));
        user_id
    }

    pub fn add_task(
        &self,
        project_id: &ProjectId,
        parent: Option<&TaskId>,
        name: &str,
        estimated_minutes: i32,
        assignees: Vec<UserId>,
    ) -> TaskId {
        let id = TaskId::generate();
        self.state.write().unwrap().tasks.push(Task {
            id,
            project_id: *project_id,
            parent_task_id: parent.copied(),
            name: name.to_string(),
            estimated_minutes,
            estimated_man_days: Decimal::ZERO,
            fixed_cost: Money::ZERO,
            sub_task_count: 0,
            assignees,
        });
        id
    }

    pub fn add_work_log(&self, task_id: &TaskId, user_id: &UserId, time_spent: i32) {
        self.state.write().unwrap().work_logs.push(WorkLog {
            task_id: *task_id,
            user_id: *user_id,
            time_spent,
        });
    }

    pub fn add_project_role(&self, project_id: &ProjectId, job_title: &str, rate: i64) -> ProjectRateCardRoleId {
        let id = ProjectRateCardRoleId::generate();
        self.state
            .write()
            .unwrap()
            .project_roles
            .push(ProjectRateCardRole {
                id,
                project_id: *project_id,
                job_title_id: JobTitleId::generate(),
                job_title: job_title.to_string(),
                rate: money(rate),
                man_day_rate: Money::ZERO,
            });
        id
    }

    pub fn add_rate_card(
        &self,
        organization_id: &OrganizationId,
        name: &str,
        roles: &[(&str, Option<i64>)],
    ) -> RateCardId {
        let id = RateCardId::generate();
        let roles = roles
            .iter()
            .map(|(title, rate)| RateCardRole {
                job_title_id: Some(JobTitleId::generate()),
                job_title: Some(title.to_string()),
                rate: rate.map(Decimal::from),
            })
            .collect();
        self.state.write().unwrap().rate_cards.push(RateCard {
            id,
            organization_id: *organization_id,
            name: name.to_string(),
            currency: Currency::Usd,
            roles,
        });
        id
    }

    /// Adds a password user; returns the email to sign in with.
    pub fn add_user(&self, organization_id: &OrganizationId, role: Role, password: &str) -> String {
        let id = UserId::generate();
        let email = format!("{role}-{}@example.com", id.as_uuid().simple());
        let user = User {
            id,
            organization_id: *organization_id,
            email: email.clone(),
            name: role.to_string(),
            role,
            password_hash: hash_password(password).unwrap(),
        };
        self.state.write().unwrap().users.push(user);
        email
    }

    pub fn organization(&self, id: &OrganizationId) -> Option<Organization> {
        self.state.read().unwrap().organizations.get(id).cloned()
    }

    pub fn project(&self, id: &ProjectId) -> Option<Project> {
        self.state.read().unwrap().projects.get(id).cloned()
    }

    /// Every costing write in order.
    pub fn saved_costing(&self) -> Vec<(CostingScope, CostingConfig)> {
        self.state.read().unwrap().saved_costing.clone()
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>, FinanceError> {
        let state = self.state.write().unwrap();
        if state.fail_writes {
            return Err(FinanceError::persistence("connection reset"));
        }
        Ok(state)
    }
}

fn money(value: i64) -> Money {
    Money::new(Decimal::from(value), "amount").unwrap()
}

fn apply_costing(costing: &mut CostingConfig, stored: &mut HoursPerDay, config: &CostingConfig) {
    *costing = *config;
    if let Some(hours) = config.hours_per_day() {
        *stored = hours;
    }
}

#[async_trait]
impl CostingGateway for InMemoryStore {
    async fn save_costing(
        &self,
        scope: &CostingScope,
        config: &CostingConfig,
    ) -> Result<(), FinanceError> {
        let mut state = self.write()?;
        match scope {
            CostingScope::Organization(id) => {
                let org = state
                    .organizations
                    .get_mut(id)
                    .ok_or(FinanceError::OrganizationNotFound)?;
                apply_costing(&mut org.costing, &mut org.stored_hours_per_day, config);
            }
            CostingScope::Project(id) => {
                let project = state
                    .projects
                    .get_mut(id)
                    .ok_or(FinanceError::ProjectNotFound)?;
                apply_costing(&mut project.costing, &mut project.stored_hours_per_day, config);
            }
        }
        state.saved_costing.push((*scope, *config));
        Ok(())
    }

    async fn save_budget(
        &self,
        project_id: &ProjectId,
        budget: Money,
        currency: Currency,
    ) -> Result<(), FinanceError> {
        let mut state = self.write()?;
        let project = state
            .projects
            .get_mut(project_id)
            .ok_or(FinanceError::ProjectNotFound)?;
        project.budget = budget;
        project.currency = currency;
        Ok(())
    }

    async fn save_currency(
        &self,
        project_id: &ProjectId,
        currency: Currency,
    ) -> Result<(), FinanceError> {
        let mut state = self.write()?;
        let project = state
            .projects
            .get_mut(project_id)
            .ok_or(FinanceError::ProjectNotFound)?;
        project.currency = currency;
        Ok(())
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryStore {
    async fn get_organization(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<Organization>, FinanceError> {
        Ok(self.organization(id))
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn create_project(&self, new_project: &NewProject) -> Result<Project, FinanceError> {
        let mut state = self.write()?;
        let project = Project {
            id: ProjectId::generate(),
            organization_id: new_project.organization_id,
            name: new_project.name.clone(),
            currency: Currency::Usd,
            budget: Money::ZERO,
            costing: new_project.costing,
            stored_hours_per_day: new_project.stored_hours_per_day,
        };
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn get_project(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectId,
    ) -> Result<Option<Project>, FinanceError> {
        Ok(self
            .project(id)
            .filter(|project| project.organization_id == *organization_id))
    }
}

#[async_trait]
impl ProjectFinanceRepository for InMemoryStore {
    async fn project_members(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectMember>, FinanceError> {
        let state = self.state.read().unwrap();
        Ok(state
            .members
            .iter()
            .filter(|(project, _)| project == project_id)
            .map(|(_, member)| member.clone())
            .collect())
    }

    async fn tasks(
        &self,
        project_id: &ProjectId,
        parent: Option<&TaskId>,
    ) -> Result<Vec<Task>, FinanceError> {
        let state = self.state.read().unwrap();
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.project_id == *project_id && task.parent_task_id.as_ref() == parent)
            .map(|task| with_sub_task_count(&state.tasks, task))
            .collect())
    }

    async fn get_task(
        &self,
        organization_id: &OrganizationId,
        id: &TaskId,
    ) -> Result<Option<Task>, FinanceError> {
        let state = self.state.read().unwrap();
        let task = state.tasks.iter().find(|task| task.id == *id).filter(|task| {
            state
                .projects
                .get(&task.project_id)
                .is_some_and(|project| project.organization_id == *organization_id)
        });
        Ok(task.map(|task| with_sub_task_count(&state.tasks, task)))
    }

    async fn work_logs(&self, task_ids: &[TaskId]) -> Result<Vec<WorkLog>, FinanceError> {
        let state = self.state.read().unwrap();
        Ok(state
            .work_logs
            .iter()
            .filter(|log| task_ids.contains(&log.task_id))
            .copied()
            .collect())
    }

    async fn update_fixed_cost(&self, id: &TaskId, fixed_cost: Money) -> Result<(), FinanceError> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == *id)
            .ok_or(FinanceError::TaskNotFound)?;
        task.fixed_cost = fixed_cost;
        Ok(())
    }

    async fn update_estimated_man_days(
        &self,
        id: &TaskId,
        man_days: Decimal,
    ) -> Result<(), FinanceError> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == *id)
            .ok_or(FinanceError::TaskNotFound)?;
        task.estimated_man_days = man_days;
        Ok(())
    }

    async fn get_project_role(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectRateCardRoleId,
    ) -> Result<Option<ProjectRateCardRole>, FinanceError> {
        let state = self.state.read().unwrap();
        Ok(state
            .project_roles
            .iter()
            .find(|role| role.id == *id)
            .filter(|role| {
                state
                    .projects
                    .get(&role.project_id)
                    .is_some_and(|project| project.organization_id == *organization_id)
            })
            .cloned())
    }

    async fn update_man_day_rate(
        &self,
        id: &ProjectRateCardRoleId,
        man_day_rate: Money,
    ) -> Result<(), FinanceError> {
        let mut state = self.write()?;
        let role = state
            .project_roles
            .iter_mut()
            .find(|role| role.id == *id)
            .ok_or(FinanceError::RateCardRoleNotFound)?;
        role.man_day_rate = man_day_rate;
        Ok(())
    }
}

fn with_sub_task_count(tasks: &[Task], task: &Task) -> Task {
    let count = tasks
        .iter()
        .filter(|t| t.parent_task_id == Some(task.id))
        .count();
    Task {
        sub_task_count: count as i64,
        ..task.clone()
    }
}

#[async_trait]
impl RateCardRepository for InMemoryStore {
    async fn list_rate_cards(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<RateCard>, FinanceError> {
        let state = self.state.read().unwrap();
        Ok(state
            .rate_cards
            .iter()
            .filter(|card| card.organization_id == *organization_id)
            .cloned()
            .collect())
    }

    async fn get_rate_card(
        &self,
        organization_id: &OrganizationId,
        id: &RateCardId,
    ) -> Result<Option<RateCard>, FinanceError> {
        let state = self.state.read().unwrap();
        Ok(state
            .rate_cards
            .iter()
            .find(|card| card.id == *id && card.organization_id == *organization_id)
            .cloned())
    }

    async fn project_roles(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectRateCardRole>, FinanceError> {
        let state = self.state.read().unwrap();
        Ok(state
            .project_roles
            .iter()
            .filter(|role| role.project_id == *project_id)
            .cloned()
            .collect())
    }

    async fn import_roles(
        &self,
        project_id: &ProjectId,
        card: &RateCard,
    ) -> Result<Vec<ProjectRateCardRole>, FinanceError> {
        let mut state = self.write()?;
        let imported: Vec<_> = card
            .roles
            .iter()
            .filter_map(|role| {
                Some(ProjectRateCardRole {
                    id: ProjectRateCardRoleId::generate(),
                    project_id: *project_id,
                    job_title_id: role.job_title_id?,
                    job_title: role.job_title.clone().unwrap_or_default(),
                    rate: Money::new(role.rate?, "rate").ok()?,
                    man_day_rate: Money::ZERO,
                })
            })
            .collect();
        state.project_roles.extend(imported.iter().cloned());
        Ok(imported)
    }

    async fn clear_project_roles(&self, project_id: &ProjectId) -> Result<u64, FinanceError> {
        let mut state = self.write()?;
        let before = state.project_roles.len();
        state.project_roles.retain(|role| role.project_id != *project_id);
        Ok((before - state.project_roles.len()) as u64)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let state = self.state.read().unwrap();
        Ok(state.users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_password_user(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let email = email.trim().to_lowercase();
        let state = self.state.read().unwrap();
        Ok(state.users.iter().find(|user| user.email == email).cloned())
    }
}
