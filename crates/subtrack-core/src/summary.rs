//! Summary Aggregator - dashboard totals and reporting statistics
//!
//! Every aggregate here normalizes each subscription to annualized USD
//! first and only then converts into the display currency. Mixed-currency
//! face values are never summed directly.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};

use crate::currency::CurrencyBook;
use crate::models::{Currency, Subscription};
use crate::Result;

/// Spend totals in the display currency
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub yearly_spend: f64,
    pub monthly_spend: f64,
}

/// The dashboard summary cards
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub totals: Totals,
    /// Renewals whose calendar month matches today's (year ignored)
    pub renewals_this_month: usize,
    /// Distinct departments in use
    pub departments: usize,
    /// Subscriptions on manual renew
    pub critical_items: usize,
    /// Yearly spend spread across departments, display currency
    pub avg_per_department: f64,
}

/// Annualized spend attributed to one renewal year
#[derive(Debug, Clone, PartialEq)]
pub struct YearStat {
    pub year: i32,
    pub spend: f64,
}

/// Year-over-year projection around the current year
#[derive(Debug, Clone)]
pub struct YearOverYear {
    /// Ascending, limited to [current - 1, current + 1], current and next
    /// year always present (zero-filled)
    pub stats: Vec<YearStat>,
    /// Change from last year to this year, percent. 0 when last year had
    /// no spend.
    pub percent_change: f64,
}

/// One category's slice of the annualized budget
#[derive(Debug, Clone)]
pub struct CategoryShare {
    pub category: String,
    /// Annualized total in the display currency
    pub total: f64,
    /// Share of the grand total, percent. 0 when the grand total is 0.
    pub share: f64,
}

/// Yearly and monthly spend across the collection in `display` currency.
pub fn totals(
    subs: &[Subscription],
    book: &CurrencyBook,
    display: &Currency,
) -> Result<Totals> {
    let mut yearly_usd = 0.0;
    for sub in subs {
        yearly_usd += book.annualized_usd(sub)?;
    }
    Ok(Totals {
        yearly_spend: display.from_usd(yearly_usd),
        monthly_spend: display.from_usd(yearly_usd / 12.0),
    })
}

/// All six dashboard cards in one pass.
pub fn dashboard(
    subs: &[Subscription],
    book: &CurrencyBook,
    display: &Currency,
    today: NaiveDate,
) -> Result<DashboardSummary> {
    let totals = totals(subs, book, display)?;

    let renewals_this_month = subs
        .iter()
        .filter(|s| s.renewal_date.month() == today.month())
        .count();

    let departments = subs
        .iter()
        .map(|s| s.department.as_str())
        .collect::<HashSet<_>>()
        .len();

    let critical_items = subs.iter().filter(|s| !s.auto_renew).count();

    let avg_per_department = totals.yearly_spend / departments.max(1) as f64;

    Ok(DashboardSummary {
        totals,
        renewals_this_month,
        departments,
        critical_items,
        avg_per_department,
    })
}

/// Annualized spend per renewal year, windowed around `today`'s year.
pub fn year_over_year(
    subs: &[Subscription],
    book: &CurrencyBook,
    display: &Currency,
    today: NaiveDate,
) -> Result<YearOverYear> {
    let mut years: BTreeMap<i32, f64> = BTreeMap::new();
    for sub in subs {
        let spend = display.from_usd(book.annualized_usd(sub)?);
        *years.entry(sub.renewal_date.year()).or_insert(0.0) += spend;
    }

    let current = today.year();
    years.entry(current).or_insert(0.0);
    years.entry(current + 1).or_insert(0.0);

    let stats: Vec<YearStat> = years
        .into_iter()
        .filter(|(year, _)| (current - 1..=current + 1).contains(year))
        .map(|(year, spend)| YearStat { year, spend })
        .collect();

    let spend_of = |year: i32| {
        stats
            .iter()
            .find(|s| s.year == year)
            .map(|s| s.spend)
            .unwrap_or(0.0)
    };
    let current_spend = spend_of(current);
    let last_spend = spend_of(current - 1);
    let percent_change = if last_spend > 0.0 {
        (current_spend - last_spend) / last_spend * 100.0
    } else {
        0.0
    };

    Ok(YearOverYear {
        stats,
        percent_change,
    })
}

/// Budget allocation for the first five distinct categories, input order.
/// Shares are measured against the grand total over ALL subscriptions,
/// so truncated categories still count toward the denominator.
pub fn category_allocation(
    subs: &[Subscription],
    book: &CurrencyBook,
    display: &Currency,
) -> Result<Vec<CategoryShare>> {
    let mut order: Vec<&str> = Vec::new();
    for sub in subs {
        if !order.contains(&sub.category.as_str()) {
            order.push(sub.category.as_str());
        }
    }
    order.truncate(5);

    let mut grand_total = 0.0;
    let mut by_category = vec![0.0; order.len()];
    for sub in subs {
        let spend = display.from_usd(book.annualized_usd(sub)?);
        grand_total += spend;
        if let Some(idx) = order.iter().position(|c| *c == sub.category) {
            by_category[idx] += spend;
        }
    }

    Ok(order
        .into_iter()
        .zip(by_category)
        .map(|(category, total)| CategoryShare {
            category: category.to_string(),
            total,
            share: if grand_total > 0.0 {
                total / grand_total * 100.0
            } else {
                0.0
            },
        })
        .collect())
}
