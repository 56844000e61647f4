//! Renewal schedule: days-left math, status badges, reminder alerts
//!
//! All functions take `today` explicitly so callers control the clock and
//! tests stay deterministic.

use chrono::NaiveDate;

use crate::models::Subscription;

/// Whole days from `today` until the renewal date. Negative when the
/// renewal has passed.
pub fn days_left(renewal: NaiveDate, today: NaiveDate) -> i64 {
    (renewal - today).num_days()
}

/// Timeline status relative to the next renewal date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewalStatus {
    Expired,
    DueToday,
    /// Renewing within the next 7 days
    DueSoon(i64),
    Active(i64),
}

impl RenewalStatus {
    pub fn of(renewal: NaiveDate, today: NaiveDate) -> Self {
        let days = days_left(renewal, today);
        match days {
            d if d < 0 => Self::Expired,
            0 => Self::DueToday,
            d if d <= 7 => Self::DueSoon(d),
            d => Self::Active(d),
        }
    }

    /// Badge text as shown in the subscription table
    pub fn label(&self) -> String {
        match self {
            Self::Expired => "EXPIRED".to_string(),
            Self::DueToday => "DUE TODAY".to_string(),
            Self::DueSoon(d) | Self::Active(d) => format!("{}D REMAINING", d),
        }
    }

    /// Whether this status warrants attention (expired or inside the
    /// 7-day window)
    pub fn needs_attention(&self) -> bool {
        !matches!(self, Self::Active(_))
    }
}

/// Reminder offsets of `sub` that are currently firing: an offset `d`
/// fires while the renewal is between today and `d` days out. Expired
/// renewals no longer alert; they surface as [`RenewalStatus::Expired`].
pub fn due_reminders(sub: &Subscription, today: NaiveDate) -> Vec<u32> {
    let days = days_left(sub.renewal_date, today);
    if days < 0 {
        return Vec::new();
    }
    sub.reminders
        .iter()
        .copied()
        .filter(|&offset| days <= i64::from(offset))
        .collect()
}

/// A subscription with at least one firing reminder
#[derive(Debug)]
pub struct ReminderAlert<'a> {
    pub subscription: &'a Subscription,
    pub days_left: i64,
    /// Which configured offsets are inside their window
    pub offsets: Vec<u32>,
}

/// Collect firing reminders across the collection, soonest renewal first.
pub fn due_alerts<'a>(subs: &'a [Subscription], today: NaiveDate) -> Vec<ReminderAlert<'a>> {
    let mut alerts: Vec<ReminderAlert<'a>> = subs
        .iter()
        .filter_map(|sub| {
            let offsets = due_reminders(sub, today);
            if offsets.is_empty() {
                None
            } else {
                Some(ReminderAlert {
                    subscription: sub,
                    days_left: days_left(sub.renewal_date, today),
                    offsets,
                })
            }
        })
        .collect();
    alerts.sort_by_key(|a| a.days_left);
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::subscription;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_left() {
        let today = date(2025, 3, 10);
        assert_eq!(days_left(date(2025, 3, 16), today), 6);
        assert_eq!(days_left(today, today), 0);
        assert_eq!(days_left(date(2025, 3, 1), today), -9);
    }

    #[test]
    fn test_renewal_status_thresholds() {
        let today = date(2025, 3, 10);
        assert_eq!(RenewalStatus::of(date(2025, 3, 9), today), RenewalStatus::Expired);
        assert_eq!(RenewalStatus::of(today, today), RenewalStatus::DueToday);
        assert_eq!(RenewalStatus::of(date(2025, 3, 17), today), RenewalStatus::DueSoon(7));
        assert_eq!(RenewalStatus::of(date(2025, 3, 18), today), RenewalStatus::Active(8));
    }

    #[test]
    fn test_status_labels() {
        let today = date(2025, 3, 10);
        assert_eq!(RenewalStatus::of(date(2025, 3, 1), today).label(), "EXPIRED");
        assert_eq!(RenewalStatus::of(today, today).label(), "DUE TODAY");
        assert_eq!(RenewalStatus::of(date(2025, 3, 15), today).label(), "5D REMAINING");
        assert_eq!(RenewalStatus::of(date(2025, 6, 1), today).label(), "83D REMAINING");
    }

    #[test]
    fn test_due_reminders_window() {
        let today = date(2025, 3, 10);
        let mut sub = subscription("1", "AWS", "Engineering", "Cloud Infrastructure");
        sub.reminders = vec![30, 7, 1];

        // 20 days out: only the 30-day offset has opened
        sub.renewal_date = date(2025, 3, 30);
        assert_eq!(due_reminders(&sub, today), vec![30]);

        // 5 days out: 30 and 7
        sub.renewal_date = date(2025, 3, 15);
        assert_eq!(due_reminders(&sub, today), vec![30, 7]);

        // due today: everything
        sub.renewal_date = today;
        assert_eq!(due_reminders(&sub, today), vec![30, 7, 1]);

        // expired: nothing
        sub.renewal_date = date(2025, 3, 1);
        assert!(due_reminders(&sub, today).is_empty());
    }

    #[test]
    fn test_empty_reminders_never_fire() {
        let today = date(2025, 3, 10);
        let mut sub = subscription("1", "AWS", "Engineering", "Cloud Infrastructure");
        sub.reminders = Vec::new();
        sub.renewal_date = today;
        assert!(due_reminders(&sub, today).is_empty());
    }

    #[test]
    fn test_due_alerts_sorted_by_urgency() {
        let today = date(2025, 3, 10);

        let mut far = subscription("1", "Far", "Engineering", "Developer Tools");
        far.reminders = vec![30];
        far.renewal_date = date(2025, 4, 5);

        let mut near = subscription("2", "Near", "Engineering", "Developer Tools");
        near.reminders = vec![7];
        near.renewal_date = date(2025, 3, 12);

        let mut silent = subscription("3", "Silent", "Engineering", "Developer Tools");
        silent.reminders = vec![1];
        silent.renewal_date = date(2025, 4, 20);

        let subs = vec![far, near, silent];
        let alerts = due_alerts(&subs, today);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].subscription.name, "Near");
        assert_eq!(alerts[0].days_left, 2);
        assert_eq!(alerts[1].subscription.name, "Far");
    }
}
