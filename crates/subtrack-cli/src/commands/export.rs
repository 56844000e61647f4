//! CSV export command implementation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;

use subtrack_core::export::{default_export_name, export_csv};
use subtrack_core::GatewayClient;

pub async fn cmd_export(client: &GatewayClient, output: Option<&Path>) -> Result<()> {
    let subs = client
        .get_all()
        .await
        .context("Failed to load subscriptions from the gateway")?;

    let path: PathBuf = match output {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(default_export_name(Utc::now().date_naive())),
    };

    std::fs::write(&path, export_csv(&subs))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "✅ Exported {} subscription(s) to {}",
        subs.len(),
        path.display()
    );
    Ok(())
}
