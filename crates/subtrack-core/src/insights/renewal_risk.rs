//! Manual-renew risk heuristic
//!
//! Flags high-value subscriptions that will not renew on their own. A
//! missed manual renewal on a big-ticket service means an outage, so one
//! critical advisory covers the whole group.

use super::engine::{AnalysisContext, Heuristic};
use super::types::{Finding, InsightKind, Severity};

/// Annualized USD spend above which a manual renew is considered risky
pub const HIGH_VALUE_THRESHOLD_USD: f64 = 1000.0;

/// Detector for expensive subscriptions on manual renew
pub struct RenewalRiskHeuristic;

impl RenewalRiskHeuristic {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RenewalRiskHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl Heuristic for RenewalRiskHeuristic {
    fn kind(&self) -> InsightKind {
        InsightKind::RenewalRisk
    }

    fn name(&self) -> &'static str {
        "Manual-Renew Risk"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let at_risk = ctx
            .subscriptions
            .iter()
            .filter(|s| {
                !s.auto_renew
                    && ctx.currencies.annualized_usd_degraded(s) > HIGH_VALUE_THRESHOLD_USD
            })
            .count();

        if at_risk == 0 {
            return Vec::new();
        }

        vec![Finding::new(
            InsightKind::RenewalRisk,
            Severity::Critical,
            "Mission Critical Auto-Renew",
            format!(
                "{} high-value subscriptions are set to manual renew. \
                 Risk of service interruption.",
                at_risk
            ),
        )]
    }
}
