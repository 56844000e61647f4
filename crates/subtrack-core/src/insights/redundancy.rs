//! Redundancy heuristic
//!
//! Flags any category holding more than two subscriptions as a
//! consolidation candidate.

use super::engine::{AnalysisContext, Heuristic};
use super::types::{Finding, InsightKind, Severity};

/// Detector for overlapping tools within a category
pub struct RedundancyHeuristic;

impl RedundancyHeuristic {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RedundancyHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl Heuristic for RedundancyHeuristic {
    fn kind(&self) -> InsightKind {
        InsightKind::Redundancy
    }

    fn name(&self) -> &'static str {
        "Category Redundancy"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        // Group member names by category, categories in first-appearance
        // order and member names in input order
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
        for sub in ctx.subscriptions {
            let category = sub.category.as_str();
            match groups.iter_mut().find(|(c, _)| *c == category) {
                Some((_, names)) => names.push(sub.name.as_str()),
                None => groups.push((category, vec![sub.name.as_str()])),
            }
        }

        groups
            .into_iter()
            .filter(|(_, names)| names.len() > 2)
            .map(|(category, names)| {
                Finding::new(
                    InsightKind::Redundancy,
                    Severity::Warning,
                    format!("Redundant {} Tools", category),
                    format!(
                        "You have {} items in {}: {}. Consolidating could yield 20%+ savings.",
                        names.len(),
                        category,
                        names.join(", ")
                    ),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::CurrencyBook;
    use crate::test_utils::subscription;

    #[test]
    fn test_three_in_one_category_emits_single_notice() {
        let subs = vec![
            subscription("1", "AWS", "Engineering", "Cloud Infrastructure"),
            subscription("2", "GCP", "Engineering", "Cloud Infrastructure"),
            subscription("3", "Azure", "Engineering", "Cloud Infrastructure"),
            subscription("4", "Zoom", "Operations", "Other IT Services"),
        ];
        let book = CurrencyBook::defaults();
        let ctx = AnalysisContext::new(&subs, &book);

        let findings = RedundancyHeuristic::new().analyze(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].title, "Redundant Cloud Infrastructure Tools");
        assert_eq!(
            findings[0].description,
            "You have 3 items in Cloud Infrastructure: AWS, GCP, Azure. \
             Consolidating could yield 20%+ savings."
        );
    }

    #[test]
    fn test_two_in_category_is_quiet() {
        let subs = vec![
            subscription("1", "AWS", "Engineering", "Cloud Infrastructure"),
            subscription("2", "GCP", "Engineering", "Cloud Infrastructure"),
        ];
        let book = CurrencyBook::defaults();
        let ctx = AnalysisContext::new(&subs, &book);

        assert!(RedundancyHeuristic::new().analyze(&ctx).is_empty());
    }

    #[test]
    fn test_multiple_crowded_categories() {
        let mut subs = Vec::new();
        for i in 0..3 {
            subs.push(subscription(
                &format!("c{}", i),
                &format!("Cloud{}", i),
                "Engineering",
                "Cloud Infrastructure",
            ));
        }
        for i in 0..4 {
            subs.push(subscription(
                &format!("d{}", i),
                &format!("Dev{}", i),
                "Engineering",
                "Developer Tools",
            ));
        }
        let book = CurrencyBook::defaults();
        let ctx = AnalysisContext::new(&subs, &book);

        let findings = RedundancyHeuristic::new().analyze(&ctx);
        assert_eq!(findings.len(), 2);
        // First-appearance order
        assert!(findings[0].title.contains("Cloud Infrastructure"));
        assert!(findings[1].title.contains("Developer Tools"));
    }
}
