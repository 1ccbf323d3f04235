use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

use crate::api::{self, AppState};
use crate::config::Config;
use crate::repository;
use crate::services::EmployeeService;

/// Connect the configured repository and serve the API until the process is stopped
pub async fn start_server(config: Config) -> Result<()> {
    let repository = repository::connect(&config.database).await?;
    let service = Arc::new(EmployeeService::new(repository));

    let address = config.server_address();
    let app = api::create_router(AppState::new(service, Arc::new(config)));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Employee API available at http://{}/employees", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
