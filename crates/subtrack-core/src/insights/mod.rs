//! Insight Engine - Proactive Spend Advisories
//!
//! The Insight Engine is a pluggable system that proactively surfaces
//! spending patterns worth acting on. Instead of waiting for someone to
//! eyeball the subscription table, it scans the collection and flags
//! what's concerning.
//!
//! ## Built-in Detectors
//!
//! - **Redundancy** - More than two tools in one category
//! - **Renewal Risk** - Expensive subscriptions on manual renew
//! - **Seasonality** - Renewals clustered in a single month
//!
//! ## Usage
//!
//! ```rust,ignore
//! use subtrack_core::insights::{AnalysisContext, InsightEngine};
//!
//! let engine = InsightEngine::new();
//! let ctx = AnalysisContext::new(&subscriptions, &settings.currencies);
//! let findings = engine.analyze_all(&ctx);
//! ```

pub mod engine;
pub mod redundancy;
pub mod renewal_risk;
pub mod seasonality;
pub mod types;

pub use engine::{AnalysisContext, Heuristic, InsightEngine};
pub use redundancy::RedundancyHeuristic;
pub use renewal_risk::{RenewalRiskHeuristic, HIGH_VALUE_THRESHOLD_USD};
pub use seasonality::SeasonalityHeuristic;
pub use types::{Finding, InsightKind, Severity};
