//! Audit log CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use alwc_core::config::AppConfig;
use alwc_core::error::AppError;
use alwc_core::types::ListWindow;
use alwc_service::AuditService;

/// Arguments for audit commands
#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Audit subcommand
    #[command(subcommand)]
    pub command: AuditCommand,
}

/// Audit subcommands
#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// List entries, newest first
    List {
        /// Number of entries (clamped to 200)
        #[arg(short, long, default_value = "50")]
        limit: i64,
        /// Entries to skip
        #[arg(short, long, default_value = "0")]
        offset: i64,
    },
}

/// Audit display row
#[derive(Debug, Serialize, Tabled)]
struct AuditRow {
    time: String,
    actor: String,
    action: String,
    entity: String,
}

/// Execute audit commands
pub async fn execute(
    args: &AuditArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = super::open_store(config).await?;
    let audit = AuditService::new(store);

    match &args.command {
        AuditCommand::List { limit, offset } => {
            let entries = audit
                .list(ListWindow::new(Some(*limit), Some(*offset)))
                .await?;

            let rows: Vec<AuditRow> = entries
                .into_iter()
                .map(|e| {
                    let target = e
                        .entity_slug
                        .or_else(|| e.entity_id.map(|id| id.to_string()));
                    AuditRow {
                        time: e.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                        actor: e.user_email.unwrap_or_else(|| "(deleted)".to_string()),
                        action: e.action,
                        entity: match target {
                            Some(target) => format!("{} {}", e.entity_type, target),
                            None => e.entity_type,
                        },
                    }
                })
                .collect();

            output::print_list(&rows, format);
        }
    }

    Ok(())
}
