//! Domain models for SubTrack
//!
//! Wire field names follow the gateway's JSON contract (camelCase), so these
//! types serialize byte-compatible with what the remote endpoint stores.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ========== Subscription Models ==========

/// How often a subscription is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillingCycle {
    Weekly,
    Monthly,
    Quarterly,
    Annually,
}

impl BillingCycle {
    /// Number of charges per year for this cycle
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Weekly => 52,
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Annually => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Annually => "Annually",
        }
    }

    pub fn all() -> [BillingCycle; 4] {
        [Self::Weekly, Self::Monthly, Self::Quarterly, Self::Annually]
    }
}

impl std::str::FromStr for BillingCycle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annually" | "annual" | "yearly" => Ok(Self::Annually),
            _ => Err(format!("Unknown billing cycle: {}", s)),
        }
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Contact details for the person who owns a subscription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Job title, e.g. "DevOps Lead"
    pub designation: String,
    /// Digits only, at most 11
    pub mobile: String,
}

impl Subscriber {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Payment card on file. Reference only, never charged or verified
/// against a payment network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    /// One of [`CARD_BRANDS`]
    pub card_type: String,
    pub cardholder_name: String,
    /// Last four digits of the card number
    pub last_four: String,
    /// MM/YY
    pub expiry_date: String,
}

/// Card brands offered by the entry form
pub const CARD_BRANDS: &[&str] = &[
    "Visa",
    "Mastercard",
    "American Express",
    "JCB",
    "GCash Card",
    "Maya Card",
];

/// A file attached to a subscription (contract, invoice, screenshot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    /// MIME type, restricted to the [`crate::validate::ALLOWED_MIME_TYPES`] set
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Base64 payload (body of the original data URL)
    pub data: String,
}

/// A recurring vendor subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Opaque unique id, immutable once created
    pub id: String,
    pub name: String,
    pub department: String,
    pub category: String,
    pub description: String,
    pub date_started: NaiveDate,
    pub billing_cycle: BillingCycle,
    /// Next renewal. Not constrained to the future; past dates mean expired.
    pub renewal_date: NaiveDate,
    /// Introductory price. Kept in the record, zeroed on creation.
    #[serde(default)]
    pub trial_price: f64,
    pub regular_price: f64,
    /// Currency code the price is stated in
    pub price_currency: String,
    pub auto_renew: bool,
    /// Vendor portal URL
    pub url: String,
    pub subscriber: Subscriber,
    pub payment: PaymentDetails,
    /// Day-offsets before renewal to alert on; empty disables alerts
    #[serde(default)]
    pub reminders: Vec<u32>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Default reminder offsets for new subscriptions (days before renewal)
pub const DEFAULT_REMINDERS: &[u32] = &[30, 7, 1];

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh subscription id: 9 lowercase base-36 characters.
///
/// Entropy comes from the wall clock and a process-local counter pushed
/// through SHA-256, so ids stay unique without a dedicated RNG dependency.
pub fn generate_id() -> String {
    const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let count = ID_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut hasher = Sha256::new();
    hasher.update(nanos.to_le_bytes());
    hasher.update(count.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    let digest = hasher.finalize();

    digest
        .iter()
        .take(9)
        .map(|b| ALPHABET[(*b as usize) % ALPHABET.len()] as char)
        .collect()
}

// ========== Configuration Models ==========

/// A currency in the base rate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    /// Unique code, e.g. "PHP"
    pub code: String,
    /// Display symbol, e.g. "₱"
    pub symbol: String,
    /// Units of this currency per 1 USD. Must be positive.
    #[serde(rename = "rateToUSD")]
    pub rate_to_usd: f64,
}

impl Currency {
    pub fn new(code: &str, symbol: &str, rate_to_usd: f64) -> Self {
        Self {
            code: code.to_string(),
            symbol: symbol.to_string(),
            rate_to_usd,
        }
    }
}

/// UI theme preference, persisted as a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Table column layout entry. View configuration, not business data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub id: String,
    pub label: String,
    pub visible: bool,
    pub order: u32,
}

// ========== Advisory Models ==========

/// Pillar an advisor recommendation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationCategory {
    Savings,
    Efficiency,
    Effectiveness,
}

impl RecommendationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Savings => "Savings",
            Self::Efficiency => "Efficiency",
            Self::Effectiveness => "Effectiveness",
        }
    }
}

/// Expected impact of acting on a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// An enrichment recommendation produced by an advisor backend
/// (or the deterministic fallback set)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub category: RecommendationCategory,
    pub impact: Impact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_cycle_multipliers() {
        assert_eq!(BillingCycle::Weekly.periods_per_year(), 52);
        assert_eq!(BillingCycle::Monthly.periods_per_year(), 12);
        assert_eq!(BillingCycle::Quarterly.periods_per_year(), 4);
        assert_eq!(BillingCycle::Annually.periods_per_year(), 1);
    }

    #[test]
    fn test_billing_cycle_parse() {
        assert_eq!("monthly".parse::<BillingCycle>(), Ok(BillingCycle::Monthly));
        assert_eq!("Annually".parse::<BillingCycle>(), Ok(BillingCycle::Annually));
        assert_eq!("yearly".parse::<BillingCycle>(), Ok(BillingCycle::Annually));
        assert!("fortnightly".parse::<BillingCycle>().is_err());
    }

    #[test]
    fn test_billing_cycle_wire_format() {
        let json = serde_json::to_string(&BillingCycle::Quarterly).unwrap();
        assert_eq!(json, "\"Quarterly\"");
        let cycle: BillingCycle = serde_json::from_str("\"Weekly\"").unwrap();
        assert_eq!(cycle, BillingCycle::Weekly);
    }

    #[test]
    fn test_currency_wire_format() {
        let php = Currency::new("PHP", "₱", 56.2);
        let json = serde_json::to_string(&php).unwrap();
        assert!(json.contains("\"rateToUSD\":56.2"));

        let parsed: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, php);
    }

    #[test]
    fn test_subscription_wire_format() {
        let json = r#"{
            "id": "abc123xyz",
            "name": "AWS Instance",
            "department": "Engineering",
            "category": "Cloud Infrastructure",
            "description": "Main production server.",
            "dateStarted": "2025-01-16",
            "billingCycle": "Monthly",
            "renewalDate": "2025-03-16",
            "trialPrice": 0,
            "regularPrice": 2500.0,
            "priceCurrency": "PHP",
            "autoRenew": true,
            "url": "https://aws.amazon.com",
            "subscriber": {
                "firstName": "David",
                "lastName": "Jara",
                "email": "david.jara@example.com",
                "designation": "Senior Engineer",
                "mobile": "09123456789"
            },
            "payment": {
                "cardType": "Visa",
                "cardholderName": "David Jara",
                "lastFour": "4242",
                "expiryDate": "12/28"
            },
            "reminders": [60],
            "attachments": []
        }"#;

        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.billing_cycle, BillingCycle::Monthly);
        assert_eq!(sub.price_currency, "PHP");
        assert_eq!(sub.renewal_date, NaiveDate::from_ymd_opt(2025, 3, 16).unwrap());
        assert_eq!(sub.subscriber.full_name(), "David Jara");
        assert_eq!(sub.reminders, vec![60]);

        // Round-trips with the same field names
        let back = serde_json::to_string(&sub).unwrap();
        assert!(back.contains("\"billingCycle\":\"Monthly\""));
        assert!(back.contains("\"autoRenew\":true"));
    }

    #[test]
    fn test_subscription_missing_optional_lists() {
        // Older records may predate reminders/attachments
        let json = r#"{
            "id": "a",
            "name": "X",
            "department": "Engineering",
            "category": "Other IT Services",
            "description": "",
            "dateStarted": "2024-01-01",
            "billingCycle": "Annually",
            "renewalDate": "2025-01-01",
            "regularPrice": 10.0,
            "priceCurrency": "USD",
            "autoRenew": false,
            "url": "",
            "subscriber": {"firstName":"","lastName":"","email":"","designation":"","mobile":""},
            "payment": {"cardType":"","cardholderName":"","lastFour":"","expiryDate":""}
        }"#;

        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert!(sub.reminders.is_empty());
        assert!(sub.attachments.is_empty());
        assert_eq!(sub.trial_price, 0.0);
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), 9);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_id_unique() {
        let ids: std::collections::HashSet<String> = (0..100).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
