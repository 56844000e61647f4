//! Subscription CRUD command implementations (list, add, edit, delete)

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};

use subtrack_core::models::{
    generate_id, Attachment, BillingCycle, PaymentDetails, Subscriber, Subscription,
    DEFAULT_REMINDERS,
};
use subtrack_core::validate::{
    attachment_digest, attachment_from_bytes, normalize_mobile, validate_subscription,
};
use subtrack_core::{GatewayClient, RenewalStatus, SubscriptionFilter};

use crate::cli::{AddArgs, EditArgs};

use super::{load_settings, truncate};

pub fn parse_date(s: &str, what: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", what))
}

pub fn parse_cycle(s: &str) -> Result<BillingCycle> {
    s.parse::<BillingCycle>().map_err(|e: String| anyhow::anyhow!(e))
}

/// Parse a comma-separated list of day offsets. An empty string means no
/// reminders.
pub fn parse_reminders(s: &str) -> Result<Vec<u32>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>()
                .with_context(|| format!("Invalid reminder offset: {}", part))
        })
        .collect()
}

fn mime_for(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => Ok("application/pdf"),
        "doc" => Ok("application/msword"),
        "docx" => {
            Ok("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        _ => anyhow::bail!(
            "Unsupported attachment type: {} (use pdf, doc, docx, jpg or png)",
            path.display()
        ),
    }
}

fn read_attachment(path: &Path) -> Result<Attachment> {
    let mime = mime_for(path)?;
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read attachment: {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment")
        .to_string();
    Ok(attachment_from_bytes(&name, mime, &bytes))
}

#[allow(clippy::too_many_arguments)]
pub async fn cmd_list(
    client: &GatewayClient,
    search: Option<&str>,
    month: Option<&str>,
    year: Option<i32>,
    department: Option<&str>,
    cycle: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let cycle = cycle.map(parse_cycle).transpose()?;
    let from = from.map(|s| parse_date(s, "--from")).transpose()?;
    let to = to.map(|s| parse_date(s, "--to")).transpose()?;

    let subs = client
        .get_all()
        .await
        .context("Failed to load subscriptions from the gateway")?;
    let settings = load_settings(client).await;
    let display = settings.display_currency()?;

    let filter = SubscriptionFilter::new()
        .search(search)
        .month(month)
        .year(year)
        .department(department)
        .cycle(cycle)
        .renewal_range(from, to);
    let matched = filter.apply(&subs);

    if matched.is_empty() {
        if subs.is_empty() {
            println!("No subscriptions yet. Add one with:");
            println!("  subtrack add --name ... --department ... --category ...");
        } else {
            println!("No subscriptions match the given filters.");
        }
        return Ok(());
    }

    let today = Utc::now().date_naive();

    println!();
    println!("📋 Subscriptions ({} of {})", matched.len(), subs.len());
    println!("   ──────────────────────────────────────────────────────────────────────────────────");

    for sub in &matched {
        let status = RenewalStatus::of(sub.renewal_date, today);
        let marker = if status.needs_attention() { "⚠️" } else { " " };
        let annual = display.from_usd(settings.currencies.annualized_usd_degraded(sub));

        println!(
            "   {} {:9} │ {:22} │ {:16} │ {:9} │ {}{:>10.2}/yr │ {}",
            marker,
            sub.id,
            truncate(&sub.name, 22),
            truncate(&sub.department, 16),
            sub.billing_cycle.as_str(),
            display.symbol,
            annual,
            status.label()
        );
    }
    println!();

    Ok(())
}

pub async fn cmd_add(client: &GatewayClient, args: AddArgs) -> Result<()> {
    let cycle = parse_cycle(&args.cycle)?;
    let renewal_date = parse_date(&args.renewal_date, "--renewal-date")?;
    let date_started = match args.date_started.as_deref() {
        Some(s) => parse_date(s, "--date-started")?,
        None => Utc::now().date_naive(),
    };
    let reminders = match args.reminders.as_deref() {
        Some(s) => parse_reminders(s)?,
        None => DEFAULT_REMINDERS.to_vec(),
    };

    let mut attachments = Vec::new();
    for path in &args.attach {
        attachments.push(read_attachment(path)?);
    }

    let sub = Subscription {
        id: generate_id(),
        name: args.name,
        department: args.department,
        category: args.category,
        description: args.description,
        date_started,
        billing_cycle: cycle,
        renewal_date,
        trial_price: 0.0,
        regular_price: args.price,
        price_currency: args.currency.to_uppercase(),
        auto_renew: !args.no_auto_renew,
        url: args.url,
        subscriber: Subscriber {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            designation: args.designation,
            mobile: normalize_mobile(&args.mobile),
        },
        payment: PaymentDetails {
            card_type: args.card_type,
            cardholder_name: args.cardholder,
            last_four: args.last_four,
            expiry_date: args.expiry,
        },
        reminders,
        attachments,
    };

    validate_subscription(&sub)?;
    client.save(&sub).await?;

    println!("✅ Added '{}' ({})", sub.name, sub.id);
    Ok(())
}

pub async fn cmd_edit(client: &GatewayClient, args: EditArgs) -> Result<()> {
    let subs = client
        .get_all()
        .await
        .context("Failed to load subscriptions from the gateway")?;
    let mut sub = subs
        .into_iter()
        .find(|s| s.id == args.id)
        .ok_or_else(|| anyhow::anyhow!("Subscription not found: {}", args.id))?;

    if let Some(name) = args.name {
        sub.name = name;
    }
    if let Some(department) = args.department {
        sub.department = department;
    }
    if let Some(category) = args.category {
        sub.category = category;
    }
    if let Some(description) = args.description {
        sub.description = description;
    }
    if let Some(cycle) = args.cycle.as_deref() {
        sub.billing_cycle = parse_cycle(cycle)?;
    }
    if let Some(date) = args.date_started.as_deref() {
        sub.date_started = parse_date(date, "--date-started")?;
    }
    if let Some(date) = args.renewal_date.as_deref() {
        sub.renewal_date = parse_date(date, "--renewal-date")?;
    }
    if let Some(price) = args.price {
        sub.regular_price = price;
    }
    if let Some(currency) = args.currency {
        sub.price_currency = currency.to_uppercase();
    }
    if let Some(auto_renew) = args.auto_renew {
        sub.auto_renew = auto_renew;
    }
    if let Some(url) = args.url {
        sub.url = url;
    }
    if let Some(first_name) = args.first_name {
        sub.subscriber.first_name = first_name;
    }
    if let Some(last_name) = args.last_name {
        sub.subscriber.last_name = last_name;
    }
    if let Some(email) = args.email {
        sub.subscriber.email = email;
    }
    if let Some(designation) = args.designation {
        sub.subscriber.designation = designation;
    }
    if let Some(mobile) = args.mobile.as_deref() {
        sub.subscriber.mobile = normalize_mobile(mobile);
    }
    if let Some(card_type) = args.card_type {
        sub.payment.card_type = card_type;
    }
    if let Some(cardholder) = args.cardholder {
        sub.payment.cardholder_name = cardholder;
    }
    if let Some(last_four) = args.last_four {
        sub.payment.last_four = last_four;
    }
    if let Some(expiry) = args.expiry {
        sub.payment.expiry_date = expiry;
    }
    if let Some(reminders) = args.reminders.as_deref() {
        sub.reminders = parse_reminders(reminders)?;
    }
    if args.clear_attachments {
        sub.attachments.clear();
    }
    for path in &args.attach {
        let att = read_attachment(path)?;
        let digest = attachment_digest(&att)?;
        let already_stored = sub
            .attachments
            .iter()
            .any(|a| attachment_digest(a).map(|d| d == digest).unwrap_or(false));
        if already_stored {
            tracing::warn!(file = %path.display(), "Skipping attachment with identical content");
            continue;
        }
        sub.attachments.push(att);
    }

    validate_subscription(&sub)?;
    client.save(&sub).await?;

    println!("✅ Updated '{}' ({})", sub.name, sub.id);
    Ok(())
}

pub async fn cmd_delete(client: &GatewayClient, id: &str, yes: bool) -> Result<()> {
    let subs = client
        .get_all()
        .await
        .context("Failed to load subscriptions from the gateway")?;
    let sub = subs
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| anyhow::anyhow!("Subscription not found: {}", id))?;

    if !yes {
        print!("⚠️  Delete '{}' ({})? [y/N] ", sub.name, sub.id);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    client.delete(id).await?;
    println!("✅ Deleted '{}' ({})", sub.name, id);
    Ok(())
}
