// src/repository/surreal.rs
//! SurrealDB implementation of the employee repository
//!
//! Employees live in one document table. The record key is the string form of
//! the employee UUID, dates are stored as RFC 3339 strings and the manager
//! chain is embedded as plain nested objects. Whether a nested object is a
//! manager is only decided when the document is mapped back to the model.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use uuid::Uuid;

use super::traits::{EmployeeRepository, RoleAggregate};
use crate::config::DatabaseConfig;
use crate::model::{Employee, Manager};

const TABLE: &str = "employees";

/// Fields returned by every read, with the record key flattened back to a string ID
const PROJECTION: &str = "record::id(id) AS id, first_name, last_name, birth_date, \
     employment_date, home_address, current_salary, role, manager";

/// Stored shape of an employee (also used for embedded managers)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmployeeDocument {
    id: String,
    first_name: String,
    last_name: String,
    birth_date: String,
    employment_date: String,
    home_address: String,
    current_salary: f64,
    role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    manager: Option<Box<EmployeeDocument>>,
}

/// Record content written on create/update; the ID lives in the record key
#[derive(Debug, Serialize)]
struct EmployeeContent {
    first_name: String,
    last_name: String,
    birth_date: String,
    employment_date: String,
    home_address: String,
    current_salary: f64,
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    manager: Option<EmployeeDocument>,
}

#[derive(Debug, Deserialize)]
struct AggregateRow {
    count: u64,
    total: f64,
}

impl From<&Employee> for EmployeeDocument {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.to_string(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            birth_date: employee.birth_date.to_rfc3339(),
            employment_date: employee.employment_date.to_rfc3339(),
            home_address: employee.home_address.clone(),
            current_salary: employee.current_salary,
            role: employee.role.clone(),
            manager: employee
                .manager
                .as_deref()
                .map(|manager| Box::new(EmployeeDocument::from(&**manager))),
        }
    }
}

impl From<&Employee> for EmployeeContent {
    fn from(employee: &Employee) -> Self {
        let EmployeeDocument {
            first_name,
            last_name,
            birth_date,
            employment_date,
            home_address,
            current_salary,
            role,
            manager,
            ..
        } = EmployeeDocument::from(employee);

        Self {
            first_name,
            last_name,
            birth_date,
            employment_date,
            home_address,
            current_salary,
            role,
            manager: manager.map(|manager| *manager),
        }
    }
}

impl TryFrom<EmployeeDocument> for Employee {
    type Error = anyhow::Error;

    fn try_from(document: EmployeeDocument) -> Result<Self> {
        let manager = match document.manager {
            Some(manager) => Some(Box::new(Manager::from_employee(Employee::try_from(*manager)?))),
            None => None,
        };

        Ok(Employee {
            id: Uuid::parse_str(&document.id)
                .with_context(|| format!("Invalid employee id in store: {}", document.id))?,
            first_name: document.first_name,
            last_name: document.last_name,
            birth_date: parse_stored_date(&document.birth_date)?,
            employment_date: parse_stored_date(&document.employment_date)?,
            home_address: document.home_address,
            current_salary: document.current_salary,
            role: document.role,
            manager,
        })
    }
}

fn parse_stored_date(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .with_context(|| format!("Invalid date in store: {}", value))
}

fn into_employees(documents: Vec<EmployeeDocument>) -> Result<Vec<Employee>> {
    documents.into_iter().map(Employee::try_from).collect()
}

/// SurrealDB employee repository implementation
#[derive(Clone)]
pub struct SurrealEmployeeRepository {
    db: Surreal<Any>,
}

impl SurrealEmployeeRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    /// Connect to the configured endpoint (`mem://`, `ws://host:port`, ...)
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db = any::connect(config.url.as_str())
            .await
            .with_context(|| format!("Failed to connect to SurrealDB at {}", config.url))?;

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            db.signin(Root {
                username: username.as_str(),
                password: password.as_str(),
            })
            .await
            .context("Failed to sign in to SurrealDB")?;
        }

        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await
            .context("Failed to select SurrealDB namespace/database")?;

        log::info!(
            "Connected to SurrealDB at {} ({}/{})",
            config.url,
            config.namespace,
            config.database
        );

        Ok(Self::new(db))
    }

    async fn replace(&self, employee: &Employee) -> Result<()> {
        self.db
            .query("UPDATE type::thing($table, $id) CONTENT $content RETURN NONE")
            .bind(("table", TABLE))
            .bind(("id", employee.id.to_string()))
            .bind(("content", EmployeeContent::from(employee)))
            .await
            .context("Failed to update employee")?
            .check()
            .context("Failed to update employee")?;
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for SurrealEmployeeRepository {
    async fn get_all(&self) -> Result<Vec<Employee>> {
        let documents: Vec<EmployeeDocument> = self
            .db
            .query(format!("SELECT {} FROM type::table($table)", PROJECTION))
            .bind(("table", TABLE))
            .await
            .context("Failed to list employees")?
            .take(0)
            .context("Failed to read employees")?;
        into_employees(documents)
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Option<Employee>> {
        let documents: Vec<EmployeeDocument> = self
            .db
            .query(format!("SELECT {} FROM type::thing($table, $id)", PROJECTION))
            .bind(("table", TABLE))
            .bind(("id", id.to_string()))
            .await
            .context("Failed to find employee by id")?
            .take(0)
            .context("Failed to read employee")?;
        documents.into_iter().next().map(Employee::try_from).transpose()
    }

    async fn get_by_manager_id(&self, manager_id: &Uuid) -> Result<Vec<Employee>> {
        let documents: Vec<EmployeeDocument> = self
            .db
            .query(format!(
                "SELECT {} FROM type::table($table) WHERE manager.id = $manager_id",
                PROJECTION
            ))
            .bind(("table", TABLE))
            .bind(("manager_id", manager_id.to_string()))
            .await
            .context("Failed to find employees by manager id")?
            .take(0)
            .context("Failed to read employees")?;
        into_employees(documents)
    }

    async fn aggregate_by_role(&self, role: &str) -> Result<RoleAggregate> {
        let row: Option<AggregateRow> = self
            .db
            .query(
                "RETURN {
                    count: array::len((SELECT VALUE id FROM type::table($table))),
                    total: <float> math::sum((SELECT VALUE current_salary FROM type::table($table) WHERE role = $role))
                }",
            )
            .bind(("table", TABLE))
            .bind(("role", role.to_string()))
            .await
            .context("Failed to aggregate employees by role")?
            .take(0)
            .context("Failed to read role aggregate")?;

        Ok(row
            .map(|row| RoleAggregate::from_totals(row.count, row.total))
            .unwrap_or(RoleAggregate::from_totals(0, 0.0)))
    }

    async fn create(&self, employee: &Employee) -> Result<()> {
        self.db
            .query("CREATE type::thing($table, $id) CONTENT $content RETURN NONE")
            .bind(("table", TABLE))
            .bind(("id", employee.id.to_string()))
            .bind(("content", EmployeeContent::from(employee)))
            .await
            .context("Failed to create employee")?
            .check()
            .context("Failed to create employee")?;
        Ok(())
    }

    async fn update(&self, employee: &Employee) -> Result<()> {
        self.replace(employee).await
    }

    async fn update_salary(&self, employee: &Employee) -> Result<()> {
        self.replace(employee).await
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.db
            .query("DELETE type::thing($table, $id)")
            .bind(("table", TABLE))
            .bind(("id", id.to_string()))
            .await
            .context("Failed to delete employee")?
            .check()
            .context("Failed to delete employee")?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.db.health().await.context("SurrealDB health check failed")
    }
}
