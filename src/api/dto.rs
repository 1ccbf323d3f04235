// src/api/dto.rs
//! Wire types for the employee endpoints
//!
//! Requests keep every field optional so that missing values are reported as
//! validation failures alongside the other violated fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::model::{Employee, EmployeeDraft};
use crate::validation::{self, FieldViolation};

/// Employee as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: DateTime<Utc>,
    pub employment_date: DateTime<Utc>,
    pub home_address: String,
    pub current_salary: f64,
    pub role: String,
    pub manager: Option<Box<EmployeeDto>>,
}

impl From<&Employee> for EmployeeDto {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            birth_date: employee.birth_date,
            employment_date: employee.employment_date,
            home_address: employee.home_address.clone(),
            current_salary: employee.current_salary,
            role: employee.role.clone(),
            manager: employee
                .manager
                .as_deref()
                .map(|manager| Box::new(EmployeeDto::from(&**manager))),
        }
    }
}

/// Payload for create and full update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "flexible_date")]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_date")]
    pub employment_date: Option<DateTime<Utc>>,
    pub home_address: Option<String>,
    #[serde(default)]
    pub current_salary: f64,
    pub role: Option<String>,
}

impl EmployeeRequest {
    /// Check every field against `now`, reporting all violations at once
    pub fn validate(&self, now: DateTime<Utc>) -> Result<EmployeeDraft, Vec<FieldViolation>> {
        let first_name = validation::name("firstName", self.first_name.as_deref());
        let last_name = validation::name("lastName", self.last_name.as_deref());
        let birth_date = validation::birth_date(self.birth_date, now);
        let employment_date = validation::employment_date(self.employment_date, now);
        let home_address = validation::home_address(self.home_address.as_deref());
        let current_salary = validation::salary(self.current_salary);
        let role = validation::role(self.role.as_deref());

        match (
            first_name,
            last_name,
            birth_date,
            employment_date,
            home_address,
            current_salary,
            role,
        ) {
            (
                Ok(first_name),
                Ok(last_name),
                Ok(birth_date),
                Ok(employment_date),
                Ok(home_address),
                Ok(current_salary),
                Ok(role),
            ) => Ok(EmployeeDraft {
                first_name,
                last_name,
                birth_date,
                employment_date,
                home_address,
                current_salary,
                role,
            }),
            (a, b, c, d, e, f, g) => Err([
                a.err(),
                b.err(),
                c.err(),
                d.err(),
                e.err(),
                f.err(),
                g.err(),
            ]
            .into_iter()
            .flatten()
            .collect()),
        }
    }
}

/// Payload for the salary-only update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRequest {
    pub current_salary: Option<f64>,
}

impl SalaryRequest {
    pub fn validate(&self) -> Result<f64, Vec<FieldViolation>> {
        validation::salary_update(self.current_salary).map_err(|violation| vec![violation])
    }
}

fn flexible_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) => validation::parse_date(&value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", value))),
        None => Ok(None),
    }
}
