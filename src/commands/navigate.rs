//! Route guard evaluation from the command line.

use clap::Args;

use crate::context::App;
use crate::output;
use warden_auth::NavigationOutcome;
use warden_core::config::AppConfig;
use warden_core::error::AppError;

/// Arguments for `navigate`
#[derive(Debug, Args)]
pub struct NavigateArgs {
    /// Target URL (e.g. `/admin`)
    pub path: String,
}

/// Restore the session, then run the guards of the matching route
pub async fn execute(args: &NavigateArgs, config: &AppConfig) -> Result<(), AppError> {
    let app = App::start(config).await?;

    let role = app
        .session
        .current_user()
        .map(|u| u.role)
        .unwrap_or_else(|| "anonymous".to_string());

    match app.router.navigate(&args.path).await {
        NavigationOutcome::Allowed { path } => {
            output::print_success(&format!("{} may open {}", role, path));
        }
        NavigationOutcome::Redirected { from, to } => {
            output::print_warning(&format!("{} was redirected from {} to {}", role, from, to));
        }
    }

    let trail = app.navigator.history();
    if trail.len() > 1 {
        output::print_kv("Navigator history", &trail.join(" -> "));
    }
    Ok(())
}
