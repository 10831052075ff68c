//! Session CLI commands: login, register, logout, whoami.

use clap::Args;

use crate::context::App;
use crate::output::{self, OutputFormat};
use warden_client::dto::RegisterRequest;
use warden_core::config::AppConfig;
use warden_core::error::AppError;

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email address
    pub email: String,
    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for `register`
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Email address
    #[arg(long)]
    pub email: String,
    /// Username
    #[arg(long)]
    pub username: String,
    /// First name
    #[arg(long)]
    pub first_name: String,
    /// Last name
    #[arg(long)]
    pub last_name: String,
    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Log in and persist the token
pub async fn login(args: &LoginArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let app = App::new(config)?;

    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    let user = app.auth.login(&args.email, &password).await?;
    output::print_success(&format!("Logged in as {} ({})", user.display_name(), user.role));
    if format == OutputFormat::Json {
        output::print_record(&user, format);
    }
    Ok(())
}

/// Register a new account
pub async fn register(args: &RegisterArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let app = App::new(config)?;

    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    let request = RegisterRequest {
        email: args.email.clone(),
        username: args.username.clone(),
        password,
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
    };
    let user = app.auth.register(&request).await?;

    output::print_success(&format!("Registered '{}'", user.username));
    output::print_record(&user, format);
    Ok(())
}

/// Clear the persisted session
pub fn logout(config: &AppConfig) -> Result<(), AppError> {
    let app = App::new(config)?;
    if !app.session.is_authenticated() {
        output::print_warning("Not logged in");
        return Ok(());
    }
    app.auth.logout();
    output::print_success("Logged out");
    Ok(())
}

/// Restore the session and show the current user
pub async fn whoami(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let app = App::start(config).await?;
    match app.session.current_user() {
        Some(user) => {
            output::print_record(&user, format);
            Ok(())
        }
        None => Err(AppError::authentication("Not logged in")),
    }
}
