//! Settings command implementations
//!
//! Each mutation validates locally against the current settings, then
//! persists only the changed key back through the gateway.

use anyhow::{Context, Result};
use serde_json::json;

use subtrack_core::settings::LOCKED_COLUMN_ID;
use subtrack_core::GatewayClient;

use crate::cli::{ColumnAction, CurrencyAction, NameListAction};

use super::load_settings;

async fn save_key(client: &GatewayClient, key: &str, value: serde_json::Value) -> Result<()> {
    client
        .save_setting(key, value)
        .await
        .with_context(|| format!("Failed to save setting '{}'", key))
}

pub async fn cmd_settings_show(client: &GatewayClient) -> Result<()> {
    let settings = load_settings(client).await;
    let display = settings.display_currency()?;

    println!();
    println!("⚙️  Settings");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Theme: {}", settings.theme.as_str());
    println!("   Display Currency: {} ({})", display.code, display.symbol);
    println!();

    println!("   Departments ({}):", settings.departments.len());
    for name in &settings.departments {
        println!("      {}", name);
    }
    println!();

    println!("   Categories ({}):", settings.categories.len());
    for name in &settings.categories {
        println!("      {}", name);
    }
    println!();

    println!("   Currencies:");
    for currency in settings.currencies.iter() {
        let active = if currency.code == settings.active_currency {
            "  (active)"
        } else {
            ""
        };
        println!(
            "      {:5} {:3} {:>12.4} per USD{}",
            currency.code, currency.symbol, currency.rate_to_usd, active
        );
    }
    println!();

    println!("   Columns (in display order):");
    for col in settings.ordered_columns() {
        let mark = if col.visible { "x" } else { " " };
        let locked = if col.id == LOCKED_COLUMN_ID {
            "  (locked)"
        } else {
            ""
        };
        println!("      [{}] {:6} {}{}", mark, col.id, col.label, locked);
    }

    Ok(())
}

pub async fn cmd_settings_departments(
    client: &GatewayClient,
    action: Option<NameListAction>,
) -> Result<()> {
    let mut settings = load_settings(client).await;

    match action {
        None => {
            println!();
            println!("🏢 Departments ({})", settings.departments.len());
            for name in &settings.departments {
                println!("   {}", name);
            }
            return Ok(());
        }
        Some(NameListAction::Add { name }) => {
            settings.add_department(&name)?;
            println!("✅ Added department '{}'", name.trim());
        }
        Some(NameListAction::Rename { old_name, new_name }) => {
            settings.rename_department(&old_name, &new_name)?;
            println!(
                "✅ Renamed department '{}' to '{}'",
                old_name,
                new_name.trim()
            );
            println!("   Existing subscriptions keep the old name.");
        }
        Some(NameListAction::Remove { name }) => {
            settings.remove_department(&name)?;
            println!("✅ Removed department '{}'", name);
        }
    }

    save_key(client, "departments", json!(settings.departments)).await
}

pub async fn cmd_settings_categories(
    client: &GatewayClient,
    action: Option<NameListAction>,
) -> Result<()> {
    let mut settings = load_settings(client).await;

    match action {
        None => {
            println!();
            println!("📂 Categories ({})", settings.categories.len());
            for name in &settings.categories {
                println!("   {}", name);
            }
            return Ok(());
        }
        Some(NameListAction::Add { name }) => {
            settings.add_category(&name)?;
            println!("✅ Added category '{}'", name.trim());
        }
        Some(NameListAction::Rename { old_name, new_name }) => {
            settings.rename_category(&old_name, &new_name)?;
            println!("✅ Renamed category '{}' to '{}'", old_name, new_name.trim());
            println!("   Existing subscriptions keep the old name.");
        }
        Some(NameListAction::Remove { name }) => {
            settings.remove_category(&name)?;
            println!("✅ Removed category '{}'", name);
        }
    }

    save_key(client, "categories", json!(settings.categories)).await
}

pub async fn cmd_settings_currencies(
    client: &GatewayClient,
    action: Option<CurrencyAction>,
) -> Result<()> {
    let mut settings = load_settings(client).await;

    match action {
        None => {
            println!();
            println!("💱 Currencies");
            for currency in settings.currencies.iter() {
                let active = if currency.code == settings.active_currency {
                    "  (active)"
                } else {
                    ""
                };
                println!(
                    "   {:5} {:3} {:>12.4} per USD{}",
                    currency.code, currency.symbol, currency.rate_to_usd, active
                );
            }
            return Ok(());
        }
        Some(CurrencyAction::Add { code, symbol, rate }) => {
            settings.currencies.add(&code, &symbol, rate)?;
            println!(
                "✅ Added currency {} at {} per USD",
                code.trim().to_uppercase(),
                rate
            );
        }
        Some(CurrencyAction::SetRate { code, rate }) => {
            let code = code.to_uppercase();
            settings.currencies.set_rate(&code, rate)?;
            println!("✅ {} now converts at {} per USD", code, rate);
        }
        Some(CurrencyAction::Remove { code }) => {
            let code = code.to_uppercase();
            settings.currencies.remove(&code)?;
            println!("✅ Removed currency {}", code);

            // Records priced in the removed currency fall back to rate 1
            // on display until they are edited.
            if settings.active_currency == code {
                if let Some(first) = settings.currencies.iter().next() {
                    settings.active_currency = first.code.clone();
                    save_key(client, "activeCurrency", json!(settings.active_currency)).await?;
                    println!("   Display currency reset to {}", settings.active_currency);
                }
            }
        }
        Some(CurrencyAction::Use { code }) => {
            let code = code.to_uppercase();
            settings.set_active_currency(&code)?;
            println!("✅ Display currency is now {}", settings.active_currency);
            return save_key(client, "activeCurrency", json!(settings.active_currency)).await;
        }
    }

    save_key(
        client,
        "currencies",
        serde_json::to_value(&settings.currencies)?,
    )
    .await
}

pub async fn cmd_settings_columns(
    client: &GatewayClient,
    action: Option<ColumnAction>,
) -> Result<()> {
    let mut settings = load_settings(client).await;

    match action {
        None => {
            println!();
            println!("📋 Columns (in display order)");
            for col in settings.ordered_columns() {
                let mark = if col.visible { "x" } else { " " };
                let locked = if col.id == LOCKED_COLUMN_ID {
                    "  (locked)"
                } else {
                    ""
                };
                println!("   [{}] {:6} {}{}", mark, col.id, col.label, locked);
            }
            return Ok(());
        }
        Some(ColumnAction::Toggle { id }) => {
            settings.toggle_column(&id)?;
            let visible = settings
                .columns
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.visible)
                .unwrap_or(false);
            println!(
                "✅ Column '{}' is now {}",
                id,
                if visible { "visible" } else { "hidden" }
            );
        }
        Some(ColumnAction::Up { id }) => {
            settings.move_column(&id, true)?;
            println!("✅ Moved column '{}' up", id);
        }
        Some(ColumnAction::Down { id }) => {
            settings.move_column(&id, false)?;
            println!("✅ Moved column '{}' down", id);
        }
    }

    save_key(client, "columns", serde_json::to_value(&settings.columns)?).await
}

pub async fn cmd_settings_theme(client: &GatewayClient) -> Result<()> {
    let mut settings = load_settings(client).await;
    settings.toggle_theme();
    save_key(client, "theme", json!(settings.theme.as_str())).await?;
    println!("✅ Theme is now {}", settings.theme.as_str());
    Ok(())
}
