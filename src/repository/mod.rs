// src/repository/mod.rs
//! Repository module for data access layer
//!
//! This module provides the persistence contract for employee records and its
//! two interchangeable adapters. The adapter is chosen once, at startup, from
//! the database configuration.

pub mod memory;
pub mod surreal;
pub mod traits;

// Re-export commonly used types and traits
pub use memory::InMemoryEmployeeRepository;
pub use surreal::SurrealEmployeeRepository;
pub use traits::*;

use anyhow::Result;
use std::sync::Arc;

use crate::config::{DatabaseConfig, RepositoryBackend};

/// Build the repository selected by `config.backend`
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn EmployeeRepository>> {
    let repository: Arc<dyn EmployeeRepository> = match config.backend {
        RepositoryBackend::Memory => {
            log::info!("Using in-memory employee repository with sample records");
            Arc::new(InMemoryEmployeeRepository::new())
        }
        RepositoryBackend::Surreal => Arc::new(SurrealEmployeeRepository::connect(config).await?),
    };
    Ok(repository)
}
