// src/validation.rs
//! Field-level validation for employee payloads
//!
//! Each check returns the accepted value or a `FieldViolation` naming the
//! offending field. Callers collect every violation before building an entity.

use chrono::{DateTime, Months, NaiveDate, NaiveTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::model::calendar_date;

pub const MAX_NAME_LENGTH: usize = 50;
pub const MIN_AGE_YEARS: u32 = 18;
pub const MAX_AGE_YEARS: u32 = 70;
pub const MAX_SALARY_UPDATE: f64 = 4000.0;

lazy_static! {
    static ref NAME_PATTERN: Regex =
        Regex::new(r"^(?:[A-Z][a-z]+[,.]?[ ]?|[a-z]+['-]?)+$").expect("name pattern");
    static ref ADDRESS_PATTERN: Regex =
        Regex::new(r"^(?:\d+ [a-zA-Z0-9\s]+.+[a-zA-Z])$").expect("address pattern");
}

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub type FieldResult<T> = Result<T, FieldViolation>;

fn required<'a>(field: &'static str, value: Option<&'a str>) -> FieldResult<&'a str> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(FieldViolation::new(field, format!("The {} field is required.", field))),
    }
}

/// First or last name
pub fn name(field: &'static str, value: Option<&str>) -> FieldResult<String> {
    let value = required(field, value)?;
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(FieldViolation::new(
            field,
            format!("The field {} must be a string with a maximum length of {}.", field, MAX_NAME_LENGTH),
        ));
    }
    if !NAME_PATTERN.is_match(value) {
        return Err(FieldViolation::new(
            field,
            format!("The field {} must be made of capitalized words.", field),
        ));
    }
    Ok(value.to_string())
}

pub fn home_address(value: Option<&str>) -> FieldResult<String> {
    let field = "homeAddress";
    let value = required(field, value)?;
    if !ADDRESS_PATTERN.is_match(value) {
        return Err(FieldViolation::new(
            field,
            "The field homeAddress must look like '<number> <street>, <locality>'.",
        ));
    }
    Ok(value.to_string())
}

pub fn role(value: Option<&str>) -> FieldResult<String> {
    required("role", value).map(str::to_string)
}

/// Age must be more than 18 and less than 70 years on the current day.
pub fn birth_date(value: Option<DateTime<Utc>>, now: DateTime<Utc>) -> FieldResult<DateTime<Utc>> {
    let field = "birthDate";
    let value = value.ok_or_else(|| FieldViolation::new(field, "The birthDate field is required."))?;

    let today = now.date_naive();
    let born = value.date_naive();
    let adult = born.checked_add_months(Months::new(MIN_AGE_YEARS * 12));
    let retired = born.checked_add_months(Months::new(MAX_AGE_YEARS * 12));

    match (adult, retired) {
        (Some(adult), Some(retired)) if adult < today && retired > today => Ok(value),
        _ => Err(FieldViolation::new(
            field,
            format!(
                "Employee age has to be in the interval [ {} ; {} ].",
                MIN_AGE_YEARS, MAX_AGE_YEARS
            ),
        )),
    }
}

/// Not in the future and not before 2000-01-01
pub fn employment_date(
    value: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> FieldResult<DateTime<Utc>> {
    let field = "employmentDate";
    let value =
        value.ok_or_else(|| FieldViolation::new(field, "The employmentDate field is required."))?;

    if value < calendar_date(2000, 1, 1) {
        return Err(FieldViolation::new(field, "Employment date cannot be before 2000-01-01."));
    }
    if value.date_naive() > now.date_naive() {
        return Err(FieldViolation::new(field, "Employment date cannot be in the future."));
    }
    Ok(value)
}

/// Salary on create and full update
pub fn salary(value: f64) -> FieldResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(FieldViolation::new(
            "currentSalary",
            "The field currentSalary must be a non-negative number.",
        ))
    }
}

/// Salary on the dedicated salary update
pub fn salary_update(value: Option<f64>) -> FieldResult<f64> {
    let field = "currentSalary";
    let value =
        value.ok_or_else(|| FieldViolation::new(field, "The currentSalary field is required."))?;
    if (0.0..=MAX_SALARY_UPDATE).contains(&value) {
        Ok(value)
    } else {
        Err(FieldViolation::new(
            field,
            format!("The field currentSalary must be between 0 and {}.", MAX_SALARY_UPDATE),
        ))
    }
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` days (midnight UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
}
