// src/repository/memory.rs
//! In-memory implementation of the employee repository
//!
//! Backed by a plain vector seeded with sample records. Lookups, updates and
//! deletes are linear scans on the employee ID.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use super::traits::{EmployeeRepository, RoleAggregate};
use crate::model::{calendar_date, Employee, Manager, Position};

pub struct InMemoryEmployeeRepository {
    employees: RwLock<Vec<Employee>>,
}

impl InMemoryEmployeeRepository {
    /// Repository seeded with the sample records
    pub fn new() -> Self {
        Self::with_employees(seed_employees())
    }

    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees: RwLock::new(employees),
        }
    }

    fn replace(&self, employee: &Employee) {
        let mut employees = self.employees.write();
        if let Some(existing) = employees.iter_mut().find(|existing| existing.id == employee.id) {
            *existing = employee.clone();
        }
    }
}

impl Default for InMemoryEmployeeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn get_all(&self) -> Result<Vec<Employee>> {
        Ok(self.employees.read().clone())
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Option<Employee>> {
        Ok(self
            .employees
            .read()
            .iter()
            .find(|employee| employee.id == *id)
            .cloned())
    }

    async fn get_by_manager_id(&self, manager_id: &Uuid) -> Result<Vec<Employee>> {
        Ok(self
            .employees
            .read()
            .iter()
            .filter(|employee| employee.manager_id() == Some(*manager_id))
            .cloned()
            .collect())
    }

    async fn aggregate_by_role(&self, role: &str) -> Result<RoleAggregate> {
        let employees = self.employees.read();
        let role_salary_sum = employees
            .iter()
            .filter(|employee| employee.role == role)
            .map(|employee| employee.current_salary)
            .sum();
        Ok(RoleAggregate::from_totals(employees.len() as u64, role_salary_sum))
    }

    async fn create(&self, employee: &Employee) -> Result<()> {
        self.employees.write().push(employee.clone());
        Ok(())
    }

    async fn update(&self, employee: &Employee) -> Result<()> {
        self.replace(employee);
        Ok(())
    }

    async fn update_salary(&self, employee: &Employee) -> Result<()> {
        self.replace(employee);
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.employees.write().retain(|employee| employee.id != *id);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Sample records: three employees reporting to Agness Litt, who reports to Jess Calmin.
pub fn seed_employees() -> Vec<Employee> {
    let boss = Manager::from_employee(Employee {
        id: Uuid::new_v4(),
        first_name: "Agness".to_string(),
        last_name: "Litt".to_string(),
        birth_date: calendar_date(1988, 1, 9),
        employment_date: calendar_date(2019, 8, 9),
        home_address: "68 Yorker St., Liverpool".to_string(),
        current_salary: 1022.30,
        role: Position::Boss.to_string(),
        manager: Some(Box::new(Manager::top_level(
            "Jess",
            "Calmin",
            calendar_date(2001, 1, 9),
        ))),
    });

    let employee = |first_name: &str,
                    last_name: &str,
                    birth_date: DateTime<Utc>,
                    employment_date: DateTime<Utc>,
                    home_address: &str,
                    current_salary: f64,
                    role: Position| Employee {
        id: Uuid::new_v4(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        birth_date,
        employment_date,
        home_address: home_address.to_string(),
        current_salary,
        role: role.to_string(),
        manager: Some(Box::new(boss.clone())),
    };

    vec![
        employee(
            "John",
            "Lee",
            calendar_date(1992, 10, 9),
            calendar_date(2021, 10, 22),
            "88 Journal Square, Jersey City",
            1026.30,
            Position::ProductManager,
        ),
        employee(
            "Casey",
            "Kinderly",
            calendar_date(1990, 4, 16),
            calendar_date(2020, 11, 2),
            "65 Garnel St., Liverpool",
            1005.60,
            Position::SoftwareDeveloper,
        ),
        employee(
            "Harry",
            "Lonecy",
            calendar_date(1989, 9, 1),
            calendar_date(2019, 11, 2),
            "96 Lightbull St., London",
            1015.99,
            Position::SoftwareDeveloper,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_employees_share_one_manager() {
        let repo = InMemoryEmployeeRepository::new();
        let employees = repo.get_all().await.unwrap();
        assert_eq!(employees.len(), 3);

        let boss_id = employees[0].manager_id().unwrap();
        let reports = repo.get_by_manager_id(&boss_id).await.unwrap();
        assert_eq!(reports.len(), 3);
        assert!(repo.get_by_manager_id(&Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn aggregate_divides_by_total_head_count() {
        let repo = InMemoryEmployeeRepository::new();
        let aggregate = repo
            .aggregate_by_role(Position::SoftwareDeveloper.as_str())
            .await
            .unwrap();

        assert_eq!(aggregate.count, 3);
        let expected = (1005.60 + 1015.99) / 3.0;
        assert!((aggregate.average_salary - expected).abs() < 1e-9);

        let none = repo.aggregate_by_role("Janitor").await.unwrap();
        assert_eq!(none.count, 3);
        assert_eq!(none.average_salary, 0.0);
    }

    #[tokio::test]
    async fn empty_repository_aggregates_to_zero() {
        let repo = InMemoryEmployeeRepository::with_employees(Vec::new());
        let aggregate = repo.aggregate_by_role("Boss").await.unwrap();
        assert_eq!(aggregate, RoleAggregate { count: 0, average_salary: 0.0 });
    }

    #[tokio::test]
    async fn update_and_delete_by_id() {
        let repo = InMemoryEmployeeRepository::new();
        let mut employee = repo.get_all().await.unwrap().remove(1);

        employee.current_salary = 3999.0;
        repo.update_salary(&employee).await.unwrap();
        assert_eq!(
            repo.get_by_id(&employee.id).await.unwrap().unwrap().current_salary,
            3999.0
        );

        repo.delete(&employee.id).await.unwrap();
        assert!(repo.get_by_id(&employee.id).await.unwrap().is_none());
        assert_eq!(repo.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_ids_are_ignored() {
        let repo = InMemoryEmployeeRepository::new();
        let mut ghost = repo.get_all().await.unwrap().remove(0);
        ghost.id = Uuid::new_v4();

        repo.update(&ghost).await.unwrap();
        repo.delete(&ghost.id).await.unwrap();
        assert_eq!(repo.get_all().await.unwrap().len(), 3);
        assert!(repo.get_by_id(&ghost.id).await.unwrap().is_none());
    }
}
