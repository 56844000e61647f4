//! Summary, report and alerts command implementations

use anyhow::{Context, Result};
use chrono::Utc;

use subtrack_core::advisor::recommend_or_fallback;
use subtrack_core::{schedule, summary, AdvisorClient, GatewayClient, RenewalStatus};
use subtrack_core::{AnalysisContext, InsightEngine, Severity};

use super::{load_settings, truncate};

pub async fn cmd_summary(client: &GatewayClient) -> Result<()> {
    let subs = client
        .get_all()
        .await
        .context("Failed to load subscriptions from the gateway")?;
    let settings = load_settings(client).await;
    let display = settings.display_currency()?;
    let today = Utc::now().date_naive();

    let cards = summary::dashboard(&subs, &settings.currencies, display, today)?;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│         💳 SubTrack Dashboard           │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Subscriptions:      {}", subs.len());
    println!(
        "  Yearly Spend:       {}{:.2}",
        display.symbol, cards.totals.yearly_spend
    );
    println!(
        "  Monthly Spend:      {}{:.2}",
        display.symbol, cards.totals.monthly_spend
    );
    println!();
    println!("  📅 Renewals This Month: {}", cards.renewals_this_month);
    println!("  🏢 Departments:         {}", cards.departments);
    println!("  ⚠️  Manual Renewals:     {}", cards.critical_items);
    println!(
        "  💸 Avg per Department:  {}{:.2}/yr",
        display.symbol, cards.avg_per_department
    );
    println!();

    if cards.critical_items > 0 {
        println!("  Run 'subtrack report' for insights on what needs attention.");
    }

    Ok(())
}

pub async fn cmd_report(
    client: &GatewayClient,
    advisor: Option<&AdvisorClient>,
    include_recommendations: bool,
) -> Result<()> {
    let subs = client
        .get_all()
        .await
        .context("Failed to load subscriptions from the gateway")?;

    if subs.is_empty() {
        println!("No subscriptions to report on. Add one with:");
        println!("  subtrack add --name ... --department ... --category ...");
        return Ok(());
    }

    let settings = load_settings(client).await;
    let display = settings.display_currency()?;
    let today = Utc::now().date_naive();

    println!();
    println!("📊 Spending Report");
    println!("   ─────────────────────────────────────────────────────────────");

    let totals = summary::totals(&subs, &settings.currencies, display)?;
    println!(
        "   Yearly: {}{:.2}    Monthly: {}{:.2}    Subscriptions: {}",
        display.symbol,
        totals.yearly_spend,
        display.symbol,
        totals.monthly_spend,
        subs.len()
    );

    let yoy = summary::year_over_year(&subs, &settings.currencies, display, today)?;
    println!();
    println!("   Year-over-Year");
    println!("   {:6} │ {:>14}", "Year", "Spend");
    println!("   ───────┼────────────────");
    for stat in &yoy.stats {
        println!(
            "   {:6} │ {:>14}",
            stat.year,
            format!("{}{:.2}", display.symbol, stat.spend)
        );
    }
    let trend_icon = if yoy.percent_change >= 0.0 { "📈" } else { "📉" };
    println!("   {} {:+.1}% vs last year", trend_icon, yoy.percent_change);

    let allocation = summary::category_allocation(&subs, &settings.currencies, display)?;
    if !allocation.is_empty() {
        println!();
        println!("   Budget Allocation");
        println!("   {:25} │ {:>14} │ {:>6}", "Category", "Annual", "%");
        println!("   ──────────────────────────┼────────────────┼────────");
        for share in &allocation {
            println!(
                "   {:25} │ {:>14} │ {:>5.1}%",
                truncate(&share.category, 25),
                format!("{}{:.2}", display.symbol, share.total),
                share.share
            );
        }
    }

    let engine = InsightEngine::new();
    let ctx = AnalysisContext::new(&subs, &settings.currencies);
    let findings = engine.analyze_all(&ctx);

    println!();
    println!("   Insights");
    if findings.is_empty() {
        println!("   ✅ Nothing unusual in the current collection.");
    } else {
        for finding in &findings {
            let icon = match finding.severity {
                Severity::Critical => "🔴",
                Severity::Warning => "🟡",
                Severity::Info => "🔵",
            };
            println!("   {} {}", icon, finding.title);
            println!("      {}", finding.description);
        }
    }

    if include_recommendations {
        let recommendations = recommend_or_fallback(advisor, &subs).await;
        println!();
        println!("   Recommendations");
        for rec in &recommendations {
            println!(
                "   • {} [{} / {} impact]",
                rec.title,
                rec.category.as_str(),
                rec.impact.as_str()
            );
            println!("     {}", rec.description);
        }
    }

    println!();
    Ok(())
}

pub async fn cmd_alerts(client: &GatewayClient) -> Result<()> {
    let subs = client
        .get_all()
        .await
        .context("Failed to load subscriptions from the gateway")?;
    let today = Utc::now().date_naive();

    let alerts = schedule::due_alerts(&subs, today);

    if alerts.is_empty() {
        println!("✅ No reminders due. Nothing renews soon.");
        return Ok(());
    }

    println!();
    println!("🔔 Renewal Reminders");
    println!("   ─────────────────────────────────────────────────────────────");

    for alert in &alerts {
        let status = RenewalStatus::of(alert.subscription.renewal_date, today);
        let offsets: Vec<String> = alert.offsets.iter().map(|d| format!("{}d", d)).collect();

        println!(
            "   ⚠️  {} renews {} ({})",
            alert.subscription.name,
            alert.subscription.renewal_date,
            status.label()
        );
        println!("      Triggered reminders: {}", offsets.join(", "));
        println!();
    }

    Ok(())
}
