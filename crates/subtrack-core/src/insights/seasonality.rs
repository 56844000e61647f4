//! Seasonal concentration heuristic
//!
//! Flags a calendar month holding more than half of all renewals. Year is
//! ignored; only the month of the renewal date matters.

use chrono::{Datelike, Month};

use super::engine::{AnalysisContext, Heuristic};
use super::types::{Finding, InsightKind, Severity};

/// Detector for renewal clustering in a single month
pub struct SeasonalityHeuristic;

impl SeasonalityHeuristic {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SeasonalityHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl Heuristic for SeasonalityHeuristic {
    fn kind(&self) -> InsightKind {
        InsightKind::Seasonality
    }

    fn name(&self) -> &'static str {
        "Seasonal Concentration"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let total = ctx.subscriptions.len();
        if total == 0 {
            return Vec::new();
        }

        let mut counts = [0usize; 12];
        for sub in ctx.subscriptions {
            counts[sub.renewal_date.month0() as usize] += 1;
        }

        // Strict > keeps the earliest month on ties
        let mut peak_month = 0;
        let mut peak = 0;
        for (idx, &count) in counts.iter().enumerate() {
            if count > peak {
                peak = count;
                peak_month = idx;
            }
        }

        if peak * 2 <= total {
            return Vec::new();
        }

        let month_name = Month::try_from(peak_month as u8 + 1)
            .map(|m| m.name())
            .unwrap_or("Unknown");

        vec![Finding::new(
            InsightKind::Seasonality,
            Severity::Info,
            "Cash Flow Concentration",
            format!(
                "Over 50% of your renewals hit in {}. Consider staggered billing.",
                month_name
            ),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::CurrencyBook;
    use crate::models::Subscription;
    use crate::test_utils::subscription;
    use chrono::NaiveDate;

    fn renewing_in(id: &str, year: i32, month: u32) -> Subscription {
        let mut sub = subscription(id, "Service", "Engineering", "Developer Tools");
        sub.renewal_date = NaiveDate::from_ymd_opt(year, month, 10).unwrap();
        sub
    }

    #[test]
    fn test_majority_month_emits_notice() {
        // 6 renewals in March, 2 elsewhere: 6 > 8/2
        let mut subs: Vec<Subscription> =
            (0..6).map(|i| renewing_in(&i.to_string(), 2025, 3)).collect();
        subs.push(renewing_in("7", 2025, 6));
        subs.push(renewing_in("8", 2025, 11));

        let book = CurrencyBook::defaults();
        let ctx = AnalysisContext::new(&subs, &book);

        let findings = SeasonalityHeuristic::new().analyze(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Info);
        assert_eq!(findings[0].title, "Cash Flow Concentration");
        assert!(findings[0].description.contains("March"));
    }

    #[test]
    fn test_exactly_half_is_quiet() {
        let subs = vec![
            renewing_in("1", 2025, 3),
            renewing_in("2", 2025, 3),
            renewing_in("3", 2025, 7),
            renewing_in("4", 2025, 9),
        ];
        let book = CurrencyBook::defaults();
        let ctx = AnalysisContext::new(&subs, &book);

        assert!(SeasonalityHeuristic::new().analyze(&ctx).is_empty());
    }

    #[test]
    fn test_month_bucketing_ignores_year() {
        // Same calendar month across different years still clusters
        let subs = vec![
            renewing_in("1", 2024, 12),
            renewing_in("2", 2025, 12),
            renewing_in("3", 2026, 12),
        ];
        let book = CurrencyBook::defaults();
        let ctx = AnalysisContext::new(&subs, &book);

        let findings = SeasonalityHeuristic::new().analyze(&ctx);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].description.contains("December"));
    }

    #[test]
    fn test_empty_collection_is_quiet() {
        let book = CurrencyBook::defaults();
        let ctx = AnalysisContext::new(&[], &book);
        assert!(SeasonalityHeuristic::new().analyze(&ctx).is_empty());
    }
}
