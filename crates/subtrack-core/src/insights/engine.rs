//! Insight Engine - orchestrates the heuristic detectors

use crate::currency::CurrencyBook;
use crate::models::Subscription;

use super::types::{Finding, InsightKind};
use super::{RedundancyHeuristic, RenewalRiskHeuristic, SeasonalityHeuristic};

/// Context provided to heuristic detectors
pub struct AnalysisContext<'a> {
    /// Full, unfiltered subscription collection
    pub subscriptions: &'a [Subscription],
    /// Rate table for USD normalization
    pub currencies: &'a CurrencyBook,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(subscriptions: &'a [Subscription], currencies: &'a CurrencyBook) -> Self {
        Self {
            subscriptions,
            currencies,
        }
    }
}

/// Trait for heuristic detectors
///
/// Detectors are deterministic: the same collection always produces the
/// same findings, so every advisory is reproducible in tests.
pub trait Heuristic: Send + Sync {
    /// Unique identifier for this detector
    fn kind(&self) -> InsightKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Inspect the collection and produce findings
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding>;
}

/// The main insight engine that orchestrates analysis
pub struct InsightEngine {
    heuristics: Vec<Box<dyn Heuristic>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new insight engine with the built-in detectors
    pub fn new() -> Self {
        let mut engine = Self { heuristics: vec![] };

        engine.register(Box::new(RedundancyHeuristic::new()));
        engine.register(Box::new(RenewalRiskHeuristic::new()));
        engine.register(Box::new(SeasonalityHeuristic::new()));

        engine
    }

    /// Register a heuristic detector
    pub fn register(&mut self, heuristic: Box<dyn Heuristic>) {
        self.heuristics.push(heuristic);
    }

    /// Run all detectors and collect findings, most severe first.
    /// Registration order breaks ties.
    pub fn analyze_all(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let mut all_findings = vec![];

        for heuristic in &self.heuristics {
            let findings = heuristic.analyze(ctx);
            tracing::debug!(
                heuristic = heuristic.kind().as_str(),
                count = findings.len(),
                "Heuristic analysis complete"
            );
            all_findings.extend(findings);
        }

        // Vec::sort_by is stable, so equal severities keep registration order
        all_findings.sort_by(|a, b| b.severity.priority().cmp(&a.severity.priority()));

        all_findings
    }

    /// Get list of registered detector kinds
    pub fn kinds(&self) -> Vec<InsightKind> {
        self.heuristics.iter().map(|h| h.kind()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::Severity;
    use crate::test_utils::subscription;

    #[test]
    fn test_engine_creation() {
        let engine = InsightEngine::new();
        let kinds = engine.kinds();

        assert!(kinds.contains(&InsightKind::Redundancy));
        assert!(kinds.contains(&InsightKind::RenewalRisk));
        assert!(kinds.contains(&InsightKind::Seasonality));
    }

    #[test]
    fn test_analyze_empty_collection() {
        let engine = InsightEngine::new();
        let book = CurrencyBook::defaults();
        let ctx = AnalysisContext::new(&[], &book);

        assert!(engine.analyze_all(&ctx).is_empty());
    }

    #[test]
    fn test_findings_ordered_by_severity() {
        // Three cloud subscriptions trigger redundancy (warning); one of
        // them is also an expensive manual renew (critical). Critical
        // must come out first.
        let mut subs = vec![
            subscription("1", "AWS", "Engineering", "Cloud Infrastructure"),
            subscription("2", "GCP", "Engineering", "Cloud Infrastructure"),
            subscription("3", "Azure", "Engineering", "Cloud Infrastructure"),
        ];
        subs[0].auto_renew = false;
        subs[0].regular_price = 500.0;
        subs[0].price_currency = "USD".to_string();
        // Spread renewal months so the seasonality detector stays quiet
        subs[0].renewal_date = chrono::NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        subs[1].renewal_date = chrono::NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        subs[2].renewal_date = chrono::NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();

        let engine = InsightEngine::new();
        let book = CurrencyBook::defaults();
        let ctx = AnalysisContext::new(&subs, &book);

        let findings = engine.analyze_all(&ctx);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert_eq!(findings[1].severity, Severity::Warning);
    }
}
