//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of advisory detectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Too many subscriptions in one category
    Redundancy,
    /// High-value subscriptions left on manual renew
    RenewalRisk,
    /// Renewals clustered in a single calendar month
    Seasonality,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Redundancy => "redundancy",
            InsightKind::RenewalRisk => "renewal_risk",
            InsightKind::Seasonality => "seasonality",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "redundancy" => Ok(InsightKind::Redundancy),
            "renewal_risk" => Ok(InsightKind::RenewalRisk),
            "seasonality" => Ok(InsightKind::Seasonality),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Severity level of an advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Should be addressed soon
    Warning,
    /// Requires immediate attention
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Critical => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// An advisory produced by a heuristic detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Which detector generated this finding
    pub kind: InsightKind,
    /// How urgent/important this finding is
    pub severity: Severity,
    /// Short title (e.g., "Mission Critical Auto-Renew")
    pub title: String,
    /// One-line human-readable explanation
    pub description: String,
}

impl Finding {
    pub fn new(
        kind: InsightKind,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            title: title.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_kind_serialization() {
        assert_eq!(InsightKind::RenewalRisk.as_str(), "renewal_risk");
        assert_eq!(
            InsightKind::from_str("seasonality").unwrap(),
            InsightKind::Seasonality
        );
        assert!(InsightKind::from_str("nonsense").is_err());
    }

    #[test]
    fn test_severity_priority() {
        assert!(Severity::Critical.priority() > Severity::Warning.priority());
        assert!(Severity::Warning.priority() > Severity::Info.priority());
    }

    #[test]
    fn test_severity_wire_format() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let back: Severity = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(back, Severity::Warning);
    }

    #[test]
    fn test_finding_constructor() {
        let finding = Finding::new(
            InsightKind::Redundancy,
            Severity::Warning,
            "Test Title",
            "Test description",
        );
        assert_eq!(finding.title, "Test Title");
        assert_eq!(finding.severity, Severity::Warning);
    }
}
