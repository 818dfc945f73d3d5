//! Database migration management commands.

use clap::{Args, Subcommand};
use tracing::{info, warn};

use crate::output;
use till_core::error::AppError;
use till_database::DatabasePool;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Check that the database is reachable
    Check,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, pool: &DatabasePool) -> Result<(), AppError> {
    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            till_database::migration::run_migrations(pool.pool()).await?;
            info!("Migrations applied from CLI");
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Check => {
            if pool.health_check().await? {
                output::print_success("Database is reachable.");
            } else {
                warn!("Database health check returned an unexpected value");
                output::print_warning("Database answered unexpectedly.");
            }
        }
    }

    Ok(())
}
