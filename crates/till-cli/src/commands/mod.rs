//! CLI command definitions and dispatch.

pub mod employee;
pub mod migrate;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::output::OutputFormat;
use till_core::SystemClock;
use till_core::config::AppConfig;
use till_core::error::AppError;
use till_database::DatabasePool;
use till_service::ServiceContext;

/// Till: point-of-sale staff and session administration
#[derive(Debug, Parser)]
#[command(name = "till", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to load (config/{env}.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Employee management
    Employee(employee::EmployeeArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        debug!(command = ?self.command, "Executing CLI command");
        let pool = DatabasePool::connect(&config.database).await?;

        let result = match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &pool).await,
            Commands::Employee(args) => {
                let ctx = ServiceContext::new(
                    pool.employees(),
                    pool.sessions(),
                    Arc::new(SystemClock),
                    &config.auth,
                    config.session.clone(),
                )?;
                employee::execute(args, &ctx, self.format).await
            }
        };

        pool.close().await;
        result
    }
}
