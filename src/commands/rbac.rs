//! Registry inspection commands. These never touch the network.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::context::load_rbac;
use crate::output::{self, OutputFormat};
use warden_core::config::AppConfig;
use warden_core::error::AppError;

/// Arguments for rbac commands
#[derive(Debug, Args)]
pub struct RbacArgs {
    /// RBAC subcommand
    #[command(subcommand)]
    pub command: RbacCommand,
}

/// RBAC subcommands
#[derive(Debug, Subcommand)]
pub enum RbacCommand {
    /// List roles
    Roles,
    /// List permissions
    Permissions,
    /// List route rules
    Routes,
    /// Check whether a role holds a permission
    Check {
        /// Role name
        role: String,
        /// Permission name
        permission: String,
    },
    /// Check whether a role may open a route
    Route {
        /// Role name
        role: String,
        /// Route path
        path: String,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    name: String,
    description: String,
    permissions: String,
}

#[derive(Debug, Serialize, Tabled)]
struct PermissionRow {
    name: String,
    resource: String,
    action: String,
    description: String,
}

#[derive(Debug, Serialize, Tabled)]
struct RouteRow {
    path: String,
    permissions: String,
    roles: String,
    public: bool,
    description: String,
}

fn join(items: Option<&[String]>) -> String {
    match items {
        Some(items) if !items.is_empty() => items.join(", "),
        _ => "-".to_string(),
    }
}

/// Execute rbac commands
pub fn execute(args: &RbacArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let rbac = load_rbac(config)?;

    match &args.command {
        RbacCommand::Roles => {
            let mut rows: Vec<RoleRow> = rbac
                .get_all_roles()
                .into_values()
                .map(|r| RoleRow {
                    permissions: join(Some(r.permissions.as_slice())),
                    name: r.name,
                    description: r.description,
                })
                .collect();
            rows.sort_by(|a, b| a.name.cmp(&b.name));
            output::print_list(&rows, format);
        }
        RbacCommand::Permissions => {
            let mut rows: Vec<PermissionRow> = rbac
                .get_all_permissions()
                .into_values()
                .map(|p| PermissionRow {
                    name: p.name,
                    resource: p.resource,
                    action: p.action,
                    description: p.description,
                })
                .collect();
            rows.sort_by(|a, b| a.name.cmp(&b.name));
            output::print_list(&rows, format);
        }
        RbacCommand::Routes => {
            let rows: Vec<RouteRow> = rbac
                .get_routes()
                .into_iter()
                .map(|r| RouteRow {
                    permissions: join(r.permissions.as_deref()),
                    roles: join(r.roles.as_deref()),
                    public: r.public.unwrap_or(false),
                    description: r.description.unwrap_or_default(),
                    path: r.path,
                })
                .collect();
            output::print_list(&rows, format);
        }
        RbacCommand::Check { role, permission } => {
            if rbac.has_permission(role, permission) {
                output::print_success(&format!("{} has {}", role, permission));
            } else {
                output::print_warning(&format!("{} does not have {}", role, permission));
            }
        }
        RbacCommand::Route { role, path } => {
            if rbac.can_access_route(role, path) {
                output::print_success(&format!("{} may access {}", role, path));
            } else {
                output::print_warning(&format!("{} may not access {}", role, path));
            }
        }
    }

    Ok(())
}
