//! SubTrack CLI - IT subscription expense tracker
//!
//! Usage:
//!   subtrack list                 List subscriptions
//!   subtrack summary              Show dashboard cards
//!   subtrack report               Full spending report with insights
//!   subtrack add --name ...       Create a subscription
//!   subtrack export               Dump the inventory to CSV

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use subtrack_core::config::{self, FileConfig};
use subtrack_core::GatewayClient;

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let file_config = config::load_file_config(None).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring unreadable config file");
        FileConfig::default()
    });
    let client = GatewayClient::new(&config::resolve_api_url(cli.api.as_deref(), &file_config));

    match cli.command {
        Commands::List {
            search,
            month,
            year,
            department,
            cycle,
            from,
            to,
        } => {
            commands::cmd_list(
                &client,
                search.as_deref(),
                month.as_deref(),
                year,
                department.as_deref(),
                cycle.as_deref(),
                from.as_deref(),
                to.as_deref(),
            )
            .await
        }
        Commands::Summary => commands::cmd_summary(&client).await,
        Commands::Report { no_advisor } => {
            let advisor = if no_advisor {
                None
            } else {
                commands::advisor_from(&file_config)
            };
            commands::cmd_report(&client, advisor.as_ref(), !no_advisor).await
        }
        Commands::Alerts => commands::cmd_alerts(&client).await,
        Commands::Export { output } => commands::cmd_export(&client, output.as_deref()).await,
        Commands::Add(args) => commands::cmd_add(&client, args).await,
        Commands::Edit(args) => commands::cmd_edit(&client, args).await,
        Commands::Delete { id, yes } => commands::cmd_delete(&client, &id, yes).await,
        Commands::Settings { action } => {
            match action {
                None | Some(SettingsAction::Show) => commands::cmd_settings_show(&client).await,
                Some(SettingsAction::Departments { action }) => {
                    commands::cmd_settings_departments(&client, action).await
                }
                Some(SettingsAction::Categories { action }) => {
                    commands::cmd_settings_categories(&client, action).await
                }
                Some(SettingsAction::Currencies { action }) => {
                    commands::cmd_settings_currencies(&client, action).await
                }
                Some(SettingsAction::Columns { action }) => {
                    commands::cmd_settings_columns(&client, action).await
                }
                Some(SettingsAction::Theme) => commands::cmd_settings_theme(&client).await,
            }
        }
        Commands::Status => commands::cmd_status(&client).await,
    }
}
