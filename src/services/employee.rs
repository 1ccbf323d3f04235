// src/services/employee.rs
//! Employee service
//!
//! Business rules sitting between the HTTP handlers and the repository:
//! manager assignment on create, query filters and existence checks.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use crate::model::{calendar_date, Employee, EmployeeDraft, Manager, Position};
use crate::repository::{EmployeeRepository, RoleAggregate};

/// Process-wide managers attached to newly created employees
///
/// A `Ceo` create replaces both entries. Every read and write is atomic on its
/// own, but a create reads the defaults and a concurrent `Ceo` create may
/// replace them in between, so simultaneous manager creations race and the
/// last one wins.
#[derive(Debug, Clone)]
pub struct DefaultManagers {
    ceo: Manager,
    boss: Manager,
}

impl DefaultManagers {
    pub fn new() -> Self {
        Self::under(Manager::top_level("Nick", "Hamilton", calendar_date(2000, 1, 30)))
    }

    /// Defaults headed by `ceo`, with a freshly generated default boss
    fn under(ceo: Manager) -> Self {
        let boss = Manager::reporting_to("Tom", "Rogers", calendar_date(2012, 6, 15), ceo.clone());
        Self { ceo, boss }
    }

    /// Manager given to new `Boss` employees
    pub fn ceo(&self) -> &Manager {
        &self.ceo
    }

    /// Manager given to every other new employee
    pub fn boss(&self) -> &Manager {
        &self.boss
    }
}

impl Default for DefaultManagers {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep employees whose first name contains `name` (case-insensitive) and whose
/// birth date lies in `[start, end]`.
///
/// A blank name disables the name filter; an interval with `start >= end`
/// disables the date filter.
pub fn filter_by_name_and_birth_date(
    employees: Vec<Employee>,
    name: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<Employee> {
    let filter_names = !name.trim().is_empty();
    let needle = name.to_lowercase();
    let filter_dates = start < end;

    employees
        .into_iter()
        .filter(|employee| {
            !filter_names || employee.first_name.to_lowercase().contains(needle.as_str())
        })
        .filter(|employee| {
            !filter_dates || (start <= employee.birth_date && employee.birth_date <= end)
        })
        .collect()
}

pub struct EmployeeService {
    repository: Arc<dyn EmployeeRepository>,
    defaults: RwLock<DefaultManagers>,
}

impl EmployeeService {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self::with_defaults(repository, DefaultManagers::new())
    }

    pub fn with_defaults(repository: Arc<dyn EmployeeRepository>, defaults: DefaultManagers) -> Self {
        Self {
            repository,
            defaults: RwLock::new(defaults),
        }
    }

    /// Snapshot of the current default managers
    pub fn default_managers(&self) -> DefaultManagers {
        self.defaults.read().clone()
    }

    pub async fn list(&self) -> Result<Vec<Employee>> {
        self.repository.get_all().await
    }

    pub async fn get(&self, id: &Uuid) -> Result<Option<Employee>> {
        self.repository.get_by_id(id).await
    }

    pub async fn search_by_name_and_birth_date(
        &self,
        name: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Employee>> {
        let employees = self.repository.get_all().await?;
        Ok(filter_by_name_and_birth_date(employees, name, start, end))
    }

    pub async fn list_by_manager(&self, manager_id: &Uuid) -> Result<Vec<Employee>> {
        self.repository.get_by_manager_id(manager_id).await
    }

    pub async fn aggregate_by_role(&self, role: &str) -> Result<RoleAggregate> {
        self.repository.aggregate_by_role(role).await
    }

    /// Create an employee with a fresh ID and today's employment date.
    ///
    /// The role decides the manager: `Ceo` gets none and becomes the new
    /// default CEO, `Boss` reports to the default CEO, anyone else to the
    /// default boss.
    pub async fn create(&self, draft: EmployeeDraft) -> Result<Employee> {
        let now = Utc::now();

        let manager = if draft.role == Position::Ceo.as_str() {
            let ceo = Manager::from_employee(draft.clone().into_employee(Uuid::new_v4(), now, None));
            info!("Replacing default CEO with {} {}", ceo.first_name, ceo.last_name);
            *self.defaults.write() = DefaultManagers::under(ceo);
            None
        } else if draft.role == Position::Boss.as_str() {
            Some(self.defaults.read().ceo().clone())
        } else {
            Some(self.defaults.read().boss().clone())
        };

        let employee = draft.into_employee(Uuid::new_v4(), now, manager);
        self.repository.create(&employee).await?;

        info!("Created employee {} with role {}", employee.id, employee.role);
        Ok(employee)
    }

    /// Overwrite every mutable field. Returns `false` when the employee does not exist.
    pub async fn update(&self, id: &Uuid, draft: EmployeeDraft) -> Result<bool> {
        let Some(mut employee) = self.repository.get_by_id(id).await? else {
            return Ok(false);
        };

        draft.apply_to(&mut employee);
        self.repository.update(&employee).await?;
        Ok(true)
    }

    /// Overwrite the salary only. Returns `false` when the employee does not exist.
    pub async fn update_salary(&self, id: &Uuid, salary: f64) -> Result<bool> {
        let Some(mut employee) = self.repository.get_by_id(id).await? else {
            return Ok(false);
        };

        employee.current_salary = salary;
        self.repository.update_salary(&employee).await?;
        Ok(true)
    }

    /// Returns `false` when the employee does not exist.
    pub async fn delete(&self, id: &Uuid) -> Result<bool> {
        if self.repository.get_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.repository.delete(id).await?;
        Ok(true)
    }

    pub async fn ping(&self) -> Result<()> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryEmployeeRepository;

    fn service() -> EmployeeService {
        EmployeeService::new(Arc::new(InMemoryEmployeeRepository::new()))
    }

    fn draft(first_name: &str, role: &str) -> EmployeeDraft {
        EmployeeDraft {
            first_name: first_name.to_string(),
            last_name: "Lake".to_string(),
            birth_date: calendar_date(1985, 3, 3),
            employment_date: calendar_date(2015, 5, 5),
            home_address: "1 Random St., Randomness".to_string(),
            current_salary: 1500.0,
            role: role.to_string(),
        }
    }

    fn named(first_name: &str, birth_date: DateTime<Utc>) -> Employee {
        let mut employee =
            draft(first_name, "Software_Developer").into_employee(Uuid::new_v4(), Utc::now(), None);
        employee.birth_date = birth_date;
        employee
    }

    #[tokio::test]
    async fn create_assigns_fresh_id_and_employment_date() {
        let service = service();
        let before: Vec<Uuid> = service.list().await.unwrap().iter().map(|e| e.id).collect();

        let created = service.create(draft("Harry", "Software_Developer")).await.unwrap();

        assert!(!before.contains(&created.id));
        assert!((Utc::now() - created.employment_date).num_seconds().abs() <= 1);
        assert_eq!(service.get(&created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(created.manager_id(), Some(service.default_managers().boss().id));
    }

    #[tokio::test]
    async fn creating_a_ceo_replaces_the_defaults() {
        let service = service();
        let old = service.default_managers();

        let ceo = service.create(draft("Nora", "Ceo")).await.unwrap();
        assert!(ceo.manager.is_none());

        let new = service.default_managers();
        assert_eq!(new.ceo().first_name, "Nora");
        assert_eq!(new.ceo().role, "Boss");
        assert_ne!(new.ceo().id, old.ceo().id);
        assert_ne!(new.boss().id, old.boss().id);
        assert_eq!(new.boss().manager_id(), Some(new.ceo().id));

        let plain = service.create(draft("Casey", "Product_Manager")).await.unwrap();
        assert_eq!(plain.manager_id(), Some(new.boss().id));

        let boss = service.create(draft("Agness", "Boss")).await.unwrap();
        assert_eq!(boss.manager_id(), Some(new.ceo().id));
    }

    #[tokio::test]
    async fn boss_creates_attach_to_the_default_ceo() {
        let service = service();
        let defaults = service.default_managers();

        let boss = service.create(draft("Agness", "Boss")).await.unwrap();
        assert_eq!(boss.manager_id(), Some(defaults.ceo().id));
        assert_eq!(service.default_managers().boss().id, defaults.boss().id);
    }

    #[tokio::test]
    async fn role_matching_is_case_sensitive() {
        let service = service();
        let defaults = service.default_managers();

        let employee = service.create(draft("Nora", "ceo")).await.unwrap();
        assert_eq!(employee.manager_id(), Some(defaults.boss().id));
        assert_eq!(service.default_managers().ceo().id, defaults.ceo().id);
    }

    #[test]
    fn filters_by_name_and_birth_date_interval() {
        let employees = vec![
            named("Garry", calendar_date(1999, 2, 2)),
            named("Garry", calendar_date(1992, 2, 2)),
            named("Garry", calendar_date(1960, 2, 2)),
            named("Seff", calendar_date(1999, 2, 2)),
        ];
        let expected = vec![employees[0].id, employees[1].id];

        let found = filter_by_name_and_birth_date(
            employees,
            "garry",
            calendar_date(1990, 2, 2),
            calendar_date(1999, 3, 2),
        );

        assert_eq!(found.iter().map(|e| e.id).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn degenerate_interval_and_blank_name_skip_their_filters() {
        let employees = vec![
            named("Garry", calendar_date(1999, 2, 2)),
            named("Seff", calendar_date(1960, 2, 2)),
        ];

        let same_day = calendar_date(1999, 2, 2);
        assert_eq!(
            filter_by_name_and_birth_date(employees.clone(), " ", same_day, same_day).len(),
            2
        );

        let inverted = filter_by_name_and_birth_date(
            employees.clone(),
            "seff",
            calendar_date(2000, 1, 1),
            calendar_date(1950, 1, 1),
        );
        assert_eq!(inverted.len(), 1);
        assert_eq!(inverted[0].first_name, "Seff");

        let dates_only = filter_by_name_and_birth_date(
            employees,
            "",
            calendar_date(1990, 1, 1),
            calendar_date(2000, 1, 1),
        );
        assert_eq!(dates_only.len(), 1);
        assert_eq!(dates_only[0].first_name, "Garry");
    }

    #[tokio::test]
    async fn updates_require_an_existing_employee() {
        let service = service();
        let missing = Uuid::new_v4();
        assert!(!service.update(&missing, draft("Harry", "Boss")).await.unwrap());
        assert!(!service.update_salary(&missing, 100.0).await.unwrap());
        assert!(!service.delete(&missing).await.unwrap());
    }

    #[tokio::test]
    async fn salary_update_changes_only_the_salary() {
        let service = service();
        let original = service.list().await.unwrap().remove(0);

        assert!(service.update_salary(&original.id, 3999.5).await.unwrap());

        let updated = service.get(&original.id).await.unwrap().unwrap();
        assert_eq!(updated.current_salary, 3999.5);
        assert_eq!(
            Employee {
                current_salary: original.current_salary,
                ..updated
            },
            original
        );
    }

    #[tokio::test]
    async fn full_update_overwrites_mutable_fields() {
        let service = service();
        let original = service.list().await.unwrap().remove(0);

        let replacement = draft("Harry", "Product_Manager");
        assert!(service.update(&original.id, replacement.clone()).await.unwrap());

        let updated = service.get(&original.id).await.unwrap().unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.manager, original.manager);
        assert_eq!(updated.first_name, replacement.first_name);
        assert_eq!(updated.employment_date, replacement.employment_date);
        assert_eq!(updated.current_salary, replacement.current_salary);
        assert_eq!(updated.role, replacement.role);
    }

    #[tokio::test]
    async fn delete_then_lookup_finds_nothing() {
        let service = service();
        let employee = service.list().await.unwrap().remove(2);

        assert!(service.delete(&employee.id).await.unwrap());
        assert!(service.get(&employee.id).await.unwrap().is_none());
        assert!(!service.delete(&employee.id).await.unwrap());
    }
}
