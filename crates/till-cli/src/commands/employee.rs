//! Employee management CLI commands.
//!
//! These run with direct store access and no session, so they are the way
//! to create the first Admin account.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::output::{self, OutputFormat};
use till_auth::{EmployeeCreation, NewEmployee};
use till_core::error::AppError;
use till_entity::employee::{Employee, TrustLevel};
use till_service::ServiceContext;

/// Arguments for employee commands
#[derive(Debug, Args)]
pub struct EmployeeArgs {
    /// Employee subcommand
    #[command(subcommand)]
    pub command: EmployeeCommand,
}

/// Employee subcommands
#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// Create an employee
    Add {
        /// Username (unique, never reusable)
        #[arg(short, long)]
        username: Option<String>,
        /// First and last name
        #[arg(short, long)]
        name: Option<String>,
        /// Trust level: Employee, Manager, Owner or Admin
        #[arg(short, long, default_value = "Employee")]
        trust_level: TrustLevel,
    },
    /// List active employees
    List,
    /// Deactivate an employee so they can no longer sign in
    Deactivate {
        /// Username
        username: String,
    },
}

/// Employee display row for table output
#[derive(Debug, Serialize, Tabled)]
struct EmployeeRow {
    /// Employee ID
    id: String,
    /// Username
    username: String,
    /// Name
    name: String,
    /// Trust level
    trust_level: String,
    /// Hired at
    hired_at: String,
}

impl From<&Employee> for EmployeeRow {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id.to_string(),
            username: e.username.clone(),
            name: e.name.clone(),
            trust_level: e.trust_level.to_string(),
            hired_at: e.hired_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute employee commands
pub async fn execute(
    args: &EmployeeArgs,
    ctx: &ServiceContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let credentials = &ctx.credentials;

    match &args.command {
        EmployeeCommand::Add {
            username,
            name,
            trust_level,
        } => {
            let username = match username {
                Some(u) => u.clone(),
                None => dialoguer::Input::new()
                    .with_prompt("Username")
                    .interact_text()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let name = match name {
                Some(n) => n.clone(),
                None => dialoguer::Input::new()
                    .with_prompt("Full name")
                    .interact_text()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let password = dialoguer::Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

            let outcome = credentials
                .create_employee(NewEmployee {
                    username: username.clone(),
                    password,
                    name,
                    trust_level: *trust_level,
                })
                .await?;

            match outcome {
                EmployeeCreation::Created(employee) => {
                    info!(
                        employee_id = %employee.id,
                        trust_level = %employee.trust_level,
                        "Employee created from CLI"
                    );
                    output::print_success(&format!(
                        "{} '{}' created (id: {})",
                        employee.trust_level, employee.username, employee.id
                    ));
                }
                EmployeeCreation::UsernameTaken => {
                    return Err(AppError::conflict(format!(
                        "Username '{username}' is already taken"
                    )));
                }
                EmployeeCreation::InvalidInput(reason) => {
                    return Err(AppError::validation(reason));
                }
            }
        }
        EmployeeCommand::List => {
            let employees = credentials.list_active_employees().await?;
            let rows: Vec<EmployeeRow> = employees.iter().map(EmployeeRow::from).collect();
            output::print_list(&rows, format);
        }
        EmployeeCommand::Deactivate { username } => {
            let employee = credentials
                .find_active_by_username(username)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(format!("No active employee named '{username}'"))
                })?;

            if credentials.deactivate_employee(employee.id).await? {
                info!(employee_id = %employee.id, "Employee deactivated from CLI");
                output::print_success(&format!("Employee '{username}' deactivated"));
            } else {
                output::print_warning(&format!("Employee '{username}' was already inactive"));
            }
        }
    }

    Ok(())
}
