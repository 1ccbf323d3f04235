// src/main.rs

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use employee_api::config::Config;
use employee_api::model::Employee;
use employee_api::repository::memory::seed_employees;
use employee_api::api::dto::EmployeeDto;
use employee_api::web;

#[derive(Parser)]
#[command(name = "employee-api")]
#[command(about = "HTTP service for managing employee records")]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the effective configuration, or write it to a file
    Config {
        #[arg(short, long)]
        write: Option<PathBuf>,
    },
    /// Print the sample employee records as JSON
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load_from(cli.config.as_deref())?;

    env_logger::Builder::new()
        .parse_filters(&config.logging.level)
        .init();

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            info!("Starting employee-api on {}", config.server_address());
            web::start_server(config).await?;
        }
        Commands::Config { write: Some(path) } => {
            config.save_to_file(&path)?;
            info!("Configuration written to {}", path.display());
        }
        Commands::Config { write: None } => {
            print!("{}", config.to_toml()?);
        }
        Commands::Seed => {
            let employees: Vec<Employee> = seed_employees();
            let dtos: Vec<EmployeeDto> = employees.iter().map(EmployeeDto::from).collect();
            println!("{}", serde_json::to_string_pretty(&dtos)?);
        }
    }

    Ok(())
}
