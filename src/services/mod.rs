// src/services/mod.rs
//! Service layer module
//!
//! This module contains the business logic layer that sits between the API and repository layers.

pub mod employee;

pub use employee::*;
