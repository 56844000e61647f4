//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `export` - CSV export command
//! - `reports` - Summary, report and alerts commands
//! - `settings` - Settings management commands (departments, categories, currencies, columns, theme)
//! - `status` - Gateway connection status command
//! - `subscriptions` - Subscription CRUD commands (list, add, edit, delete)

pub mod export;
pub mod reports;
pub mod settings;
pub mod status;
pub mod subscriptions;

// Re-export command functions for main.rs
pub use export::*;
pub use reports::*;
pub use settings::*;
pub use status::*;
pub use subscriptions::*;

use subtrack_core::advisor::DEFAULT_ADVISOR_MODEL;
use subtrack_core::config::FileConfig;
use subtrack_core::{AdvisorClient, AppSettings, GatewayClient};

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}

/// Settings from the gateway, or the built-in defaults when the settings
/// endpoint is unreachable. Display preferences are not worth failing a
/// read-only command over.
pub async fn load_settings(client: &GatewayClient) -> AppSettings {
    match client.get_settings().await {
        Ok(overrides) => AppSettings::with_overrides(overrides),
        Err(e) => {
            tracing::warn!(error = %e, "Could not load settings, using defaults");
            AppSettings::default()
        }
    }
}

/// Advisor backend from the environment, falling back to the config file
pub fn advisor_from(config: &FileConfig) -> Option<AdvisorClient> {
    AdvisorClient::from_env().or_else(|| {
        config.advisor_host.as_deref().map(|host| {
            let model = config.advisor_model.as_deref().unwrap_or(DEFAULT_ADVISOR_MODEL);
            AdvisorClient::http(host, model)
        })
    })
}
