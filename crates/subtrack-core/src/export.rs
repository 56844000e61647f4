//! CSV export of the subscription inventory
//!
//! Fixed column order, one row per subscription. Fields containing
//! commas, quotes, or newlines are quoted with doubled inner quotes.

use chrono::NaiveDate;

use crate::models::Subscription;

/// Export column order
pub const CSV_HEADERS: [&str; 8] = [
    "Subscription",
    "Department",
    "Category",
    "Cycle",
    "Price",
    "Currency",
    "Renewal Date",
    "Auto Renew",
];

/// Render the full collection as CSV.
pub fn export_csv(subs: &[Subscription]) -> String {
    let mut csv = CSV_HEADERS.join(",");
    csv.push('\n');

    for sub in subs {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            escape_csv_field(&sub.name),
            escape_csv_field(&sub.department),
            escape_csv_field(&sub.category),
            sub.billing_cycle.as_str(),
            sub.regular_price,
            escape_csv_field(&sub.price_currency),
            sub.renewal_date.format("%Y-%m-%d"),
            if sub.auto_renew { "YES" } else { "NO" }
        ));
    }

    csv
}

/// Default export file name for `today`, e.g. `subscriptions_2025-03-10.csv`
pub fn default_export_name(today: NaiveDate) -> String {
    format!("subscriptions_{}.csv", today.format("%Y-%m-%d"))
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BillingCycle;
    use crate::test_utils::subscription;

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("simple"), "simple");
        assert_eq!(escape_csv_field("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv_field("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv_field("with\nnewline"), "\"with\nnewline\"");
    }

    #[test]
    fn test_export_header_row() {
        let csv = export_csv(&[]);
        assert_eq!(
            csv,
            "Subscription,Department,Category,Cycle,Price,Currency,Renewal Date,Auto Renew\n"
        );
    }

    #[test]
    fn test_export_row_rendering() {
        let mut sub = subscription("1", "GitHub Team", "Engineering", "Developer Tools");
        sub.regular_price = 44.0;
        sub.price_currency = "USD".to_string();
        sub.billing_cycle = BillingCycle::Monthly;
        sub.renewal_date = chrono::NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
        sub.auto_renew = true;

        let csv = export_csv(&[sub]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "GitHub Team,Engineering,Developer Tools,Monthly,44,USD,2025-04-15,YES"
        );
    }

    #[test]
    fn test_export_quotes_embedded_commas() {
        let mut sub = subscription("1", "Jira, Confluence & Co", "Engineering", "SaaS Productivity");
        sub.auto_renew = false;

        let csv = export_csv(&[sub]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("\"Jira, Confluence & Co\","));
        assert!(row.ends_with(",NO"));
    }

    #[test]
    fn test_default_export_name() {
        let today = chrono::NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(default_export_name(today), "subscriptions_2025-03-10.csv");
    }
}
