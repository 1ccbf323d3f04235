// src/api/routes/mod.rs
//! API routes module
//!
//! This module organizes all HTTP routes for the employee API.

pub mod employees;
pub mod health;
