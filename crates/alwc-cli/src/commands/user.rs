//! User management CLI commands.

use std::sync::Arc;

use chrono::Duration;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use alwc_auth::{PasswordValidator, RoleGuard};
use alwc_core::config::AppConfig;
use alwc_core::error::AppError;
use alwc_database::prelude::*;
use alwc_service::mail::build_mailer;
use alwc_service::{AdminUserService, MailTemplates, PasswordResetService, RequestContext};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List,
    /// Change a user's role, acting as the primary admin
    SetRole {
        /// Email of the user to change
        email: String,
        /// New role: user, admin or superuser
        role: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print a fresh password reset link without emailing it
    ResetLink {
        /// Email of the user
        email: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: i64,
    email: String,
    name: String,
    role: String,
    #[tabled(rename = "main admin")]
    main_admin: bool,
    created_at: String,
}

struct UserTools {
    store: Arc<dyn Store>,
    admin_users: AdminUserService,
    resets: PasswordResetService,
}

impl UserTools {
    async fn open(config: &AppConfig) -> Result<Self, AppError> {
        let store = super::open_store(config).await?;
        let mailer = build_mailer(&config.email)?;
        let templates = MailTemplates::from_config(&config.email);
        let validator = PasswordValidator::new(&config.auth);
        let resets = PasswordResetService::new(
            Arc::clone(&store),
            Arc::clone(&mailer),
            templates.clone(),
            validator.clone(),
            Duration::minutes(config.auth.reset_token_ttl_minutes),
        );
        let admin_users = AdminUserService::new(
            Arc::clone(&store),
            RoleGuard::new(config.admin.email.clone()),
            validator,
            resets.clone(),
            mailer,
            templates,
        );
        Ok(Self {
            store,
            admin_users,
            resets,
        })
    }

    /// Context for changes made from the command line: they are recorded
    /// against the primary admin.
    async fn operator(&self, config: &AppConfig) -> Result<RequestContext, AppError> {
        let email = config
            .admin
            .email
            .as_deref()
            .ok_or_else(|| AppError::misconfigured("admin.email is not configured"))?;
        let mut tx = self.store.begin().await?;
        let admin = tx.find_user_by_email(email).await?.ok_or_else(|| {
            AppError::not_found("Primary admin account does not exist; start the server once")
        })?;
        Ok(RequestContext::from_user(&admin))
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let tools = UserTools::open(&config).await?;

    match &args.command {
        UserCommand::List => {
            let rows: Vec<UserRow> = tools
                .admin_users
                .list()
                .await?
                .into_iter()
                .map(|summary| UserRow {
                    id: summary.user.id.0,
                    email: summary.user.email,
                    name: summary.user.name,
                    role: summary.user.role.to_string(),
                    main_admin: summary.is_main_admin,
                    created_at: summary.user.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, format);
        }
        UserCommand::SetRole { email, role, yes } => {
            let ctx = tools.operator(&config).await?;
            let target = {
                let mut tx = tools.store.begin().await?;
                tx.find_user_by_email(email)
                    .await?
                    .ok_or_else(|| AppError::not_found("User not found"))?
            };

            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Change role of {} from '{}' to '{}'?",
                        target.email, target.role, role
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let updated = tools
                .admin_users
                .set_role(&ctx, target.id, Some(role.as_str()))
                .await?;
            output::print_success(&format!("{} is now '{}'", updated.email, updated.role));
        }
        UserCommand::ResetLink { email } => {
            let (user, link) = tools.resets.reset_link_for(email).await?;
            output::print_kv("User", &format!("{} <{}>", user.name, user.email));
            output::print_kv("Reset link", &link);
            output::print_kv(
                "Expires in",
                &format!("{} minutes", config.auth.reset_token_ttl_minutes),
            );
        }
    }

    Ok(())
}
