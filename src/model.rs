// src/model.rs
//! Employee domain model
//!
//! `Manager` is a specialization of `Employee` that only exists at the
//! application layer: it wraps an employee whose role always reads `Boss`.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt;
use std::ops::Deref;
use uuid::Uuid;

/// Well-known role designations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    ProductManager,
    SoftwareDeveloper,
    Boss,
    Ceo,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::ProductManager => "Product_Manager",
            Position::SoftwareDeveloper => "Software_Developer",
            Position::Boss => "Boss",
            Position::Ceo => "Ceo",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employee record
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: DateTime<Utc>,
    pub employment_date: DateTime<Utc>,
    pub home_address: String,
    pub current_salary: f64,
    pub role: String,
    pub manager: Option<Box<Manager>>,
}

impl Employee {
    pub fn manager_id(&self) -> Option<Uuid> {
        self.manager.as_ref().map(|manager| manager.id)
    }
}

/// Someone other employees report to
#[derive(Debug, Clone, PartialEq)]
pub struct Manager(Employee);

const DEFAULT_MANAGER_ADDRESS: &str = "88 Greenland St., Liverpool";
const DEFAULT_MANAGER_SALARY: f64 = 2226.30;

impl Manager {
    /// Default top-of-hierarchy manager with no manager of its own
    pub fn top_level(first_name: &str, last_name: &str, employment_date: DateTime<Utc>) -> Self {
        Self::with_defaults(first_name, last_name, employment_date, None)
    }

    /// Default manager reporting to `manager`
    pub fn reporting_to(
        first_name: &str,
        last_name: &str,
        employment_date: DateTime<Utc>,
        manager: Manager,
    ) -> Self {
        Self::with_defaults(first_name, last_name, employment_date, Some(manager))
    }

    fn with_defaults(
        first_name: &str,
        last_name: &str,
        employment_date: DateTime<Utc>,
        manager: Option<Manager>,
    ) -> Self {
        Self::from_employee(Employee {
            id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_date: calendar_date(1988, 1, 9),
            employment_date,
            home_address: DEFAULT_MANAGER_ADDRESS.to_string(),
            current_salary: DEFAULT_MANAGER_SALARY,
            role: Position::Boss.to_string(),
            manager: manager.map(Box::new),
        })
    }

    /// Promote an employee record; the role is forced to `Boss`.
    pub fn from_employee(mut employee: Employee) -> Self {
        employee.role = Position::Boss.to_string();
        Self(employee)
    }

    pub fn into_employee(self) -> Employee {
        self.0
    }
}

impl Deref for Manager {
    type Target = Employee;

    fn deref(&self) -> &Employee {
        &self.0
    }
}

/// Validated field set for creating or fully updating an employee
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: DateTime<Utc>,
    pub employment_date: DateTime<Utc>,
    pub home_address: String,
    pub current_salary: f64,
    pub role: String,
}

impl EmployeeDraft {
    pub fn into_employee(
        self,
        id: Uuid,
        employment_date: DateTime<Utc>,
        manager: Option<Manager>,
    ) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            employment_date,
            home_address: self.home_address,
            current_salary: self.current_salary,
            role: self.role,
            manager: manager.map(Box::new),
        }
    }

    /// Overwrite every mutable field of `employee`; id and manager are kept.
    pub fn apply_to(self, employee: &mut Employee) {
        employee.first_name = self.first_name;
        employee.last_name = self.last_name;
        employee.birth_date = self.birth_date;
        employee.employment_date = self.employment_date;
        employee.home_address = self.home_address;
        employee.current_salary = self.current_salary;
        employee.role = self.role;
    }
}

/// Midnight UTC on the given calendar day
pub fn calendar_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_employee(role: &str) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            first_name: "Casey".to_string(),
            last_name: "Kinderly".to_string(),
            birth_date: calendar_date(1990, 4, 16),
            employment_date: calendar_date(2020, 11, 2),
            home_address: "65 Garnel St., Liverpool".to_string(),
            current_salary: 1005.60,
            role: role.to_string(),
            manager: None,
        }
    }

    #[test]
    fn default_managers_use_fixed_fields() {
        let ceo = Manager::top_level("Nick", "Hamilton", calendar_date(2000, 1, 30));
        let boss = Manager::reporting_to("Tom", "Rogers", calendar_date(2012, 6, 15), ceo.clone());

        assert_eq!(ceo.role, "Boss");
        assert_eq!(ceo.birth_date, calendar_date(1988, 1, 9));
        assert_eq!(ceo.home_address, "88 Greenland St., Liverpool");
        assert_eq!(ceo.current_salary, 2226.30);
        assert!(ceo.manager.is_none());

        assert_eq!(boss.manager_id(), Some(ceo.id));
        assert_ne!(boss.id, ceo.id);
    }

    #[test]
    fn promoting_an_employee_forces_the_boss_role() {
        let manager = Manager::from_employee(sample_employee("Ceo"));
        assert_eq!(manager.role, Position::Boss.as_str());
        assert_eq!(manager.into_employee().first_name, "Casey");
    }

    #[test]
    fn draft_update_keeps_id_and_manager() {
        let ceo = Manager::top_level("Nick", "Hamilton", calendar_date(2000, 1, 30));
        let mut employee = sample_employee("Software_Developer");
        employee.manager = Some(Box::new(ceo.clone()));
        let id = employee.id;

        EmployeeDraft {
            first_name: "Harry".to_string(),
            last_name: "Lonecy".to_string(),
            birth_date: calendar_date(1989, 9, 1),
            employment_date: calendar_date(2019, 11, 2),
            home_address: "96 Lightbull St., London".to_string(),
            current_salary: 1015.99,
            role: "Product_Manager".to_string(),
        }
        .apply_to(&mut employee);

        assert_eq!(employee.id, id);
        assert_eq!(employee.manager_id(), Some(ceo.id));
        assert_eq!(employee.first_name, "Harry");
        assert_eq!(employee.role, "Product_Manager");
        assert_eq!(employee.current_salary, 1015.99);
    }
}
