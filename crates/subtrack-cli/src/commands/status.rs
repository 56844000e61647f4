//! Gateway connection status command

use anyhow::Result;

use subtrack_core::GatewayClient;

use super::load_settings;

pub async fn cmd_status(client: &GatewayClient) -> Result<()> {
    println!();
    println!("📊 SubTrack Status");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Gateway: {}", client.base_url());

    // One round trip decides reachability; everything after is best-effort
    match client.get_all().await {
        Ok(subs) => {
            println!("   ✅ Connection: OK");
            println!();
            println!("   Subscriptions: {}", subs.len());

            match client.get_settings().await {
                Ok(overrides) => {
                    let stored_keys = [
                        overrides.departments.is_some(),
                        overrides.categories.is_some(),
                        overrides.columns.is_some(),
                        overrides.theme.is_some(),
                        overrides.currencies.is_some(),
                        overrides.active_currency.is_some(),
                    ]
                    .iter()
                    .filter(|present| **present)
                    .count();
                    println!("   Stored settings keys: {}", stored_keys);
                }
                Err(e) => {
                    println!("   ⚠️  Settings endpoint: {}", e);
                }
            }

            let settings = load_settings(client).await;
            let orphans = settings.orphaned_references(&subs);
            if !orphans.is_empty() {
                println!();
                if !orphans.departments.is_empty() {
                    println!(
                        "   ⚠️  Departments referenced but not configured: {}",
                        orphans.departments.join(", ")
                    );
                }
                if !orphans.categories.is_empty() {
                    println!(
                        "   ⚠️  Categories referenced but not configured: {}",
                        orphans.categories.join(", ")
                    );
                }
            }
        }
        Err(e) => {
            println!("   ❌ Connection failed: {}", e);
            println!("      Check the URL, or set SUBTRACK_API_URL / --api");
        }
    }

    println!();
    Ok(())
}
