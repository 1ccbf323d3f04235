// src/repository/traits.rs
//! Repository trait definitions for data access layer abstraction
//!
//! `EmployeeRepository` is the persistence contract shared by the in-memory
//! and document-store adapters. Both must behave identically for every
//! operation, including the role aggregate.

use async_trait::async_trait;
use anyhow::Result;
use uuid::Uuid;

use crate::model::Employee;

/// Head count and average salary reported for a role
///
/// `count` covers every stored employee while `average_salary` only sums the
/// salaries of employees holding the role, divided by that total count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleAggregate {
    pub count: u64,
    pub average_salary: f64,
}

impl RoleAggregate {
    pub fn from_totals(count: u64, role_salary_sum: f64) -> Self {
        let average_salary = if count == 0 {
            0.0
        } else {
            role_salary_sum / count as f64
        };
        Self { count, average_salary }
    }
}

/// Employee repository trait
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All employees, in no particular order
    async fn get_all(&self) -> Result<Vec<Employee>>;

    /// Find an employee by ID
    async fn get_by_id(&self, id: &Uuid) -> Result<Option<Employee>>;

    /// Employees whose manager has the given ID
    async fn get_by_manager_id(&self, manager_id: &Uuid) -> Result<Vec<Employee>>;

    async fn aggregate_by_role(&self, role: &str) -> Result<RoleAggregate>;

    /// Persist a new employee; the caller assigns the ID
    async fn create(&self, employee: &Employee) -> Result<()>;

    /// Replace the stored record with the same ID. Missing IDs are ignored.
    async fn update(&self, employee: &Employee) -> Result<()>;

    /// Same replace semantics as `update`, used when only the salary changed
    async fn update_salary(&self, employee: &Employee) -> Result<()>;

    /// Remove the record. Missing IDs are ignored.
    async fn delete(&self, id: &Uuid) -> Result<()>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<()>;
}
