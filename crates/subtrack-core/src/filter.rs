//! Subscription filter builder
//!
//! Predicate composition over an in-memory subscription snapshot. Every
//! criterion is optional; absent criteria always match. All criteria are
//! ANDed. Filtering is pure and preserves input order.

use chrono::{Datelike, NaiveDate};

use crate::models::{BillingCycle, Subscription};

/// Builder for subscription list filters
///
/// The lifetime `'query` represents how long the borrowed criteria
/// (search term, month name, department) must remain valid.
#[derive(Debug, Default, Clone)]
pub struct SubscriptionFilter<'query> {
    pub search: Option<&'query str>,
    /// English month name of the renewal date, compared case-insensitively
    pub month: Option<&'query str>,
    /// Calendar year of the renewal date
    pub year: Option<i32>,
    pub department: Option<&'query str>,
    pub cycle: Option<BillingCycle>,
    /// Inclusive lower bound on the renewal date
    pub renews_from: Option<NaiveDate>,
    /// Inclusive upper bound on the renewal date
    pub renews_until: Option<NaiveDate>,
}

impl<'query> SubscriptionFilter<'query> {
    /// Create a filter with no criteria (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search term (case-insensitive substring of name or description)
    pub fn search(mut self, term: Option<&'query str>) -> Self {
        self.search = term;
        self
    }

    /// Set renewal month name filter
    pub fn month(mut self, month: Option<&'query str>) -> Self {
        self.month = month;
        self
    }

    /// Set renewal year filter
    pub fn year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    /// Set department filter (exact name)
    pub fn department(mut self, department: Option<&'query str>) -> Self {
        self.department = department;
        self
    }

    /// Set billing cycle filter
    pub fn cycle(mut self, cycle: Option<BillingCycle>) -> Self {
        self.cycle = cycle;
        self
    }

    /// Set inclusive renewal date range; either bound may be None
    pub fn renewal_range(mut self, from: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
        self.renews_from = from;
        self.renews_until = until;
        self
    }

    /// Whether a single subscription satisfies every present criterion
    pub fn matches(&self, sub: &Subscription) -> bool {
        if let Some(term) = self.search {
            let term = term.to_lowercase();
            if !term.is_empty()
                && !sub.name.to_lowercase().contains(&term)
                && !sub.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        if let Some(month) = self.month {
            let renewal_month = sub.renewal_date.format("%B").to_string();
            if !renewal_month.eq_ignore_ascii_case(month) {
                return false;
            }
        }

        if let Some(year) = self.year {
            if sub.renewal_date.year() != year {
                return false;
            }
        }

        if let Some(dept) = self.department {
            if sub.department != dept {
                return false;
            }
        }

        if let Some(cycle) = self.cycle {
            if sub.billing_cycle != cycle {
                return false;
            }
        }

        if let Some(from) = self.renews_from {
            if sub.renewal_date < from {
                return false;
            }
        }

        if let Some(until) = self.renews_until {
            if sub.renewal_date > until {
                return false;
            }
        }

        true
    }

    /// Filter a snapshot, preserving input order
    pub fn apply<'a>(&self, subs: &'a [Subscription]) -> Vec<&'a Subscription> {
        subs.iter().filter(|s| self.matches(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::subscription;

    fn fixture() -> Vec<Subscription> {
        let mut aws = subscription("1", "AWS Instance", "Engineering", "Cloud Infrastructure");
        aws.description = "Main production server for the web portal.".to_string();
        aws.renewal_date = NaiveDate::from_ymd_opt(2025, 3, 16).unwrap();
        aws.billing_cycle = BillingCycle::Monthly;

        let mut copilot = subscription("2", "GitHub Copilot", "Engineering", "Developer Tools");
        copilot.description = "AI-powered productivity.".to_string();
        copilot.renewal_date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        copilot.billing_cycle = BillingCycle::Monthly;

        let mut canva = subscription("3", "Canva Teams", "Marketing", "SaaS Productivity");
        canva.description = "Design tooling".to_string();
        canva.renewal_date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        canva.billing_cycle = BillingCycle::Annually;

        vec![aws, copilot, canva]
    }

    #[test]
    fn test_no_criteria_is_identity() {
        let subs = fixture();
        let result = SubscriptionFilter::new().apply(&subs);
        let ids: Vec<&str> = result.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_search_matches_name_or_description() {
        let subs = fixture();

        let by_name = SubscriptionFilter::new().search(Some("copilot")).apply(&subs);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "2");

        let by_description = SubscriptionFilter::new().search(Some("PRODUCTION")).apply(&subs);
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].id, "1");
    }

    #[test]
    fn test_month_and_year() {
        let subs = fixture();

        let march = SubscriptionFilter::new().month(Some("March")).apply(&subs);
        assert_eq!(march.len(), 2);

        let march_2025 = SubscriptionFilter::new()
            .month(Some("march"))
            .year(Some(2025))
            .apply(&subs);
        assert_eq!(march_2025.len(), 1);
        assert_eq!(march_2025[0].id, "1");
    }

    #[test]
    fn test_department_and_cycle() {
        let subs = fixture();

        let engineering = SubscriptionFilter::new()
            .department(Some("Engineering"))
            .apply(&subs);
        assert_eq!(engineering.len(), 2);

        let annual = SubscriptionFilter::new()
            .cycle(Some(BillingCycle::Annually))
            .apply(&subs);
        assert_eq!(annual.len(), 1);
        assert_eq!(annual[0].id, "3");
    }

    #[test]
    fn test_date_range_bounds_inclusive() {
        let subs = fixture();

        let from = NaiveDate::from_ymd_opt(2025, 3, 16).unwrap();
        let result = SubscriptionFilter::new().renewal_range(Some(from), None).apply(&subs);
        assert_eq!(result.len(), 3); // 3/16 itself is included

        let until = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let result = SubscriptionFilter::new().renewal_range(None, Some(until)).apply(&subs);
        assert_eq!(result.len(), 2);

        let result = SubscriptionFilter::new()
            .renewal_range(Some(from), Some(until))
            .apply(&subs);
        let ids: Vec<&str> = result.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_and_commutativity() {
        let subs = fixture();

        let combined = SubscriptionFilter::new()
            .department(Some("Engineering"))
            .cycle(Some(BillingCycle::Monthly))
            .apply(&subs);

        let staged_dept = SubscriptionFilter::new()
            .department(Some("Engineering"))
            .apply(&subs);
        let cycle_filter = SubscriptionFilter::new().cycle(Some(BillingCycle::Monthly));
        let staged: Vec<&Subscription> = staged_dept
            .into_iter()
            .filter(|s| cycle_filter.matches(s))
            .collect();

        let combined_ids: Vec<&str> = combined.iter().map(|s| s.id.as_str()).collect();
        let staged_ids: Vec<&str> = staged.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(combined_ids, staged_ids);
    }

    #[test]
    fn test_empty_search_term_matches_all() {
        let subs = fixture();
        let result = SubscriptionFilter::new().search(Some("")).apply(&subs);
        assert_eq!(result.len(), 3);
    }
}
