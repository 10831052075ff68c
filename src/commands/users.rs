//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::context::App;
use crate::output::{self, OutputFormat};
use warden_client::dto::UpdateUserRequest;
use warden_client::services::user::DEFAULT_LIMIT;
use warden_core::config::AppConfig;
use warden_core::error::AppError;
use warden_core::types::User;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UsersArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UsersCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users
    List {
        /// Page size
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u64,
        /// Page offset
        #[arg(short, long, default_value_t = 0)]
        offset: u64,
    },
    /// Show one user
    Get {
        /// User ID
        id: Uuid,
    },
    /// Update a user
    Update {
        /// User ID
        id: Uuid,
        /// New email
        #[arg(long)]
        email: Option<String>,
        /// New username
        #[arg(long)]
        username: Option<String>,
        /// New first name
        #[arg(long)]
        first_name: Option<String>,
        /// New last name
        #[arg(long)]
        last_name: Option<String>,
        /// New role
        #[arg(long)]
        role: Option<String>,
        /// Enable or disable the account
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a user
    Delete {
        /// User ID
        id: Uuid,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Email
    email: String,
    /// Name
    name: String,
    /// Role
    role: String,
    /// Status
    status: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            email: u.email.clone(),
            name: u.display_name(),
            role: u.role.clone(),
            status: if u.is_active { "active" } else { "inactive" }.to_string(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UsersArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let app = App::new(config)?;

    match &args.command {
        UsersCommand::List { limit, offset } => {
            let page = app.users.list(*limit, *offset).await?;
            let rows: Vec<UserRow> = page.users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!(
                    "Showing {} of {} (offset {})",
                    page.users.len(),
                    page.total,
                    page.offset
                );
            }
        }
        UsersCommand::Get { id } => {
            let user = app.users.get(*id).await?;
            output::print_record(&user, format);
        }
        UsersCommand::Update {
            id,
            email,
            username,
            first_name,
            last_name,
            role,
            active,
        } => {
            let patch = UpdateUserRequest {
                email: email.clone(),
                username: username.clone(),
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                role: role.clone(),
                is_active: *active,
            };
            let user = app.users.update(*id, &patch).await?;
            output::print_success(&format!("User '{}' updated", user.username));
            output::print_record(&user, format);
        }
        UsersCommand::Delete { id, yes } => {
            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Delete user {}?", id))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

                if !confirm {
                    output::print_warning("Aborted");
                    return Ok(());
                }
            }

            let response = app.users.delete(*id).await?;
            output::print_success(&response.message);
        }
    }

    Ok(())
}
