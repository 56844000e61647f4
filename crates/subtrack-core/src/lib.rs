//! SubTrack Core Library
//!
//! Shared functionality for the SubTrack subscription tracker:
//! - Currency conversion against a USD-anchored rate book
//! - Cost annualization across billing cycles
//! - Subscription filtering and renewal scheduling
//! - Insight heuristics (redundancy, renewal risk, seasonality)
//! - Dashboard and report aggregation
//! - Persistence gateway client (HTTP JSON action dispatch)
//! - CSV export and record validation
//! - Pluggable AI advisor backends with a deterministic fallback

pub mod advisor;
pub mod api;
pub mod config;
pub mod currency;
pub mod error;
pub mod export;
pub mod filter;
pub mod insights;
pub mod models;
pub mod schedule;
pub mod settings;
pub mod summary;
pub mod validate;

/// Test utilities including the mock persistence gateway
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use advisor::{AdvisorBackend, AdvisorClient, HttpAdvisor, MockAdvisor};
pub use api::GatewayClient;
pub use config::FileConfig;
pub use currency::CurrencyBook;
pub use error::{Error, Result};
pub use filter::SubscriptionFilter;
pub use insights::{AnalysisContext, Finding, InsightEngine, InsightKind, Severity};
pub use schedule::{ReminderAlert, RenewalStatus};
pub use settings::{AppSettings, OrphanReport, SettingsOverrides};
pub use summary::{CategoryShare, DashboardSummary, Totals, YearOverYear, YearStat};
