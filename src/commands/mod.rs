//! CLI command definitions and dispatch.

pub mod admin;
pub mod auth;
pub mod navigate;
pub mod rbac;
pub mod users;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use warden_core::config::AppConfig;
use warden_core::error::AppError;

/// Warden: role-based access control and session client for the Warden API
#[derive(Debug, Parser)]
#[command(name = "warden", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

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
    /// Log in and persist the session token
    Login(auth::LoginArgs),
    /// Register a new account
    Register(auth::RegisterArgs),
    /// End the session
    Logout,
    /// Show the current user
    Whoami,
    /// Evaluate a navigation through the route guards
    Navigate(navigate::NavigateArgs),
    /// User management
    Users(users::UsersArgs),
    /// Request logs and system statistics
    Admin(admin::AdminArgs),
    /// Inspect the role/permission registry
    Rbac(rbac::RbacArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Login(args) => auth::login(args, &config, self.format).await,
            Commands::Register(args) => auth::register(args, &config, self.format).await,
            Commands::Logout => auth::logout(&config),
            Commands::Whoami => auth::whoami(&config, self.format).await,
            Commands::Navigate(args) => navigate::execute(args, &config).await,
            Commands::Users(args) => users::execute(args, &config, self.format).await,
            Commands::Admin(args) => admin::execute(args, &config, self.format).await,
            Commands::Rbac(args) => rbac::execute(args, &config, self.format),
        }
    }
}
