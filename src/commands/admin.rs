//! Admin monitoring CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::context::App;
use crate::output::{self, OutputFormat};
use warden_client::dto::RequestLog;
use warden_client::services::admin::{DEFAULT_LOG_LIMIT, DEFAULT_USER_LOG_LIMIT};
use warden_core::config::AppConfig;
use warden_core::error::AppError;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Show recent request logs
    Logs {
        /// Only logs of this user
        #[arg(short, long)]
        user: Option<Uuid>,
        /// Maximum number of logs
        #[arg(short, long)]
        limit: Option<u64>,
    },
    /// Show aggregate request statistics
    Stats,
}

/// Request log display row
#[derive(Debug, Serialize, Tabled)]
struct LogRow {
    /// Timestamp
    timestamp: String,
    /// Method
    method: String,
    /// Path
    path: String,
    /// Status
    status: u16,
    /// Duration
    duration_ms: i64,
    /// User
    user: String,
}

impl From<&RequestLog> for LogRow {
    fn from(log: &RequestLog) -> Self {
        Self {
            timestamp: log.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            method: log.method.clone(),
            path: log.path.clone(),
            status: log.status_code,
            duration_ms: log.response_time_ms,
            user: log
                .user_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Counter display row
#[derive(Debug, Serialize, Tabled)]
struct CountRow {
    /// Group
    group: &'static str,
    /// Key
    key: String,
    /// Count
    count: u64,
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let app = App::new(config)?;

    match &args.command {
        AdminCommand::Logs { user: Some(user_id), limit } => {
            let response = app
                .admin
                .request_logs_by_user(*user_id, limit.unwrap_or(DEFAULT_USER_LOG_LIMIT))
                .await?;
            let rows: Vec<LogRow> = response.logs.iter().map(LogRow::from).collect();
            output::print_list(&rows, format);
        }
        AdminCommand::Logs { user: None, limit } => {
            let response = app
                .admin
                .request_logs(limit.unwrap_or(DEFAULT_LOG_LIMIT))
                .await?;
            let rows: Vec<LogRow> = response.logs.iter().map(LogRow::from).collect();
            output::print_list(&rows, format);
        }
        AdminCommand::Stats => {
            let stats = app.admin.system_stats().await?;
            if format == OutputFormat::Json {
                output::print_record(&stats, format);
                return Ok(());
            }

            output::print_kv("Total requests", &stats.total_requests.to_string());
            let groups = [
                ("status", &stats.status_codes),
                ("method", &stats.methods),
                ("path", &stats.top_paths),
            ];
            let rows: Vec<CountRow> = groups
                .into_iter()
                .flat_map(|(group, counts)| {
                    counts.iter().map(move |(key, count)| CountRow {
                        group,
                        key: key.clone(),
                        count: *count,
                    })
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
