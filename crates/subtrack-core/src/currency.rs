//! Currency conversion and annualization
//!
//! All cross-currency math goes through a shared USD base: every amount is
//! first normalized to USD via its source currency's `rateToUSD`, aggregated,
//! and only then converted into the display currency. Mixed-currency face
//! values are never summed directly.
//!
//! Lookups come in two modes:
//! - strict (`resolve`, `to_usd`, `annualized_usd`): an unknown code is an
//!   [`Error::UnknownCurrency`]. Used by validation and mutation paths.
//! - degraded (`rate_or_unity`, `*_degraded`): an unknown code substitutes
//!   rate 1 and logs a warning. Matches the legacy dashboard behavior so
//!   display paths keep working on records with orphaned currency codes.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::{Currency, Subscription};

impl Currency {
    /// Convert a USD amount into this currency.
    pub fn from_usd(&self, amount_usd: f64) -> f64 {
        amount_usd * self.rate_to_usd
    }

    /// Convert an amount stated in this currency to USD.
    ///
    /// Precondition: `rate_to_usd > 0`.
    pub fn to_usd(&self, amount: f64) -> f64 {
        amount / self.rate_to_usd
    }
}

/// The active base rate table, keyed by currency code.
///
/// Owned by [`crate::settings::AppSettings`] and passed explicitly to the
/// calculation components; there is no ambient global table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyBook {
    currencies: Vec<Currency>,
}

impl CurrencyBook {
    pub fn new(currencies: Vec<Currency>) -> Self {
        Self { currencies }
    }

    /// Built-in defaults: PHP as the working currency plus the USD base.
    pub fn defaults() -> Self {
        Self::new(vec![
            Currency::new("PHP", "₱", 56.20),
            Currency::new("USD", "$", 1.0),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.iter()
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.code == code)
    }

    /// Strict lookup: unknown codes are an error.
    pub fn resolve(&self, code: &str) -> Result<&Currency> {
        self.get(code)
            .ok_or_else(|| Error::UnknownCurrency(code.to_string()))
    }

    /// Degraded lookup: unknown codes fall back to rate 1 with a warning.
    pub fn rate_or_unity(&self, code: &str) -> f64 {
        match self.get(code) {
            Some(c) => c.rate_to_usd,
            None => {
                warn!(code = %code, "unknown currency, converting at rate 1");
                1.0
            }
        }
    }

    /// Strict USD normalization of an amount stated in `code`.
    pub fn to_usd(&self, amount: f64, code: &str) -> Result<f64> {
        Ok(self.resolve(code)?.to_usd(amount))
    }

    /// Degraded USD normalization (rate 1 on unknown codes).
    pub fn to_usd_degraded(&self, amount: f64, code: &str) -> f64 {
        amount / self.rate_or_unity(code)
    }

    /// A subscription's yearly cost in USD: unit price normalized to USD,
    /// multiplied by charges per year (Weekly 52, Monthly 12, Quarterly 4,
    /// Annually 1). Strict on the currency code.
    pub fn annualized_usd(&self, sub: &Subscription) -> Result<f64> {
        let unit_usd = self.to_usd(sub.regular_price, &sub.price_currency)?;
        Ok(unit_usd * f64::from(sub.billing_cycle.periods_per_year()))
    }

    /// Degraded annualization for display paths; orphaned currency codes
    /// convert at rate 1 rather than failing the whole dashboard.
    pub fn annualized_usd_degraded(&self, sub: &Subscription) -> f64 {
        let unit_usd = self.to_usd_degraded(sub.regular_price, &sub.price_currency);
        unit_usd * f64::from(sub.billing_cycle.periods_per_year())
    }

    // ===== Mutations (called through AppSettings, which persists them) =====

    /// Add a currency. Code and symbol are required, the code is stored
    /// uppercase, duplicates and non-positive rates are rejected.
    pub fn add(&mut self, code: &str, symbol: &str, rate_to_usd: f64) -> Result<()> {
        let code = code.trim().to_uppercase();
        let symbol = symbol.trim();
        if code.is_empty() || symbol.is_empty() {
            return Err(Error::InvalidData(
                "currency code and symbol are required".to_string(),
            ));
        }
        if rate_to_usd <= 0.0 {
            return Err(Error::InvalidData(format!(
                "rate for {} must be positive",
                code
            )));
        }
        if self.currencies.iter().any(|c| c.code.eq_ignore_ascii_case(&code)) {
            return Err(Error::Settings(format!("currency {} already exists", code)));
        }
        self.currencies.push(Currency::new(&code, symbol, rate_to_usd));
        Ok(())
    }

    /// Update the rate of an existing currency.
    pub fn set_rate(&mut self, code: &str, rate_to_usd: f64) -> Result<()> {
        if rate_to_usd <= 0.0 {
            return Err(Error::InvalidData(format!(
                "rate for {} must be positive",
                code
            )));
        }
        let currency = self
            .currencies
            .iter_mut()
            .find(|c| c.code == code)
            .ok_or_else(|| Error::UnknownCurrency(code.to_string()))?;
        currency.rate_to_usd = rate_to_usd;
        Ok(())
    }

    /// Remove a currency. USD is the conversion base and may not be removed.
    pub fn remove(&mut self, code: &str) -> Result<()> {
        if code.eq_ignore_ascii_case("USD") {
            return Err(Error::Settings("USD cannot be removed".to_string()));
        }
        let before = self.currencies.len();
        self.currencies.retain(|c| c.code != code);
        if self.currencies.len() == before {
            return Err(Error::NotFound(format!("currency {}", code)));
        }
        Ok(())
    }
}

impl Default for CurrencyBook {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BillingCycle;
    use crate::test_utils::subscription;

    fn book() -> CurrencyBook {
        CurrencyBook::defaults()
    }

    #[test]
    fn test_convert_inverse_law() {
        let book = book();
        let php = book.get("PHP").unwrap();
        let x = 1234.56;
        let round_tripped = php.to_usd(php.from_usd(x));
        assert!((round_tripped - x).abs() < 1e-9);
    }

    #[test]
    fn test_annualized_currency_invariant() {
        // The same effective price expressed in PHP and USD annualizes
        // to the same USD value.
        let book = CurrencyBook::new(vec![
            Currency::new("USD", "$", 1.0),
            Currency::new("PHP", "₱", 56.2),
        ]);

        let mut in_usd = subscription("a", "Tool", "Engineering", "Developer Tools");
        in_usd.regular_price = 10.0;
        in_usd.price_currency = "USD".to_string();
        in_usd.billing_cycle = BillingCycle::Monthly;

        let mut in_php = in_usd.clone();
        in_php.regular_price = 10.0 * 56.2;
        in_php.price_currency = "PHP".to_string();

        let a = book.annualized_usd(&in_usd).unwrap();
        let b = book.annualized_usd(&in_php).unwrap();
        assert!((a - b).abs() < 1e-9);
        assert!((a - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_annualized_php_example() {
        // 50 000 PHP monthly at 56.2 ≈ 10 676 USD per year
        let book = book();
        let mut sub = subscription("a", "ERP", "Finance", "SaaS Productivity");
        sub.regular_price = 50_000.0;
        sub.price_currency = "PHP".to_string();
        sub.billing_cycle = BillingCycle::Monthly;

        let annual = book.annualized_usd(&sub).unwrap();
        assert!((annual - (50_000.0 / 56.2) * 12.0).abs() < 1e-6);
        assert!(annual > 10_000.0 && annual < 11_000.0);
    }

    #[test]
    fn test_strict_unknown_currency() {
        let book = book();
        let mut sub = subscription("a", "X", "Engineering", "Other IT Services");
        sub.price_currency = "EUR".to_string();

        match book.annualized_usd(&sub) {
            Err(Error::UnknownCurrency(code)) => assert_eq!(code, "EUR"),
            other => panic!("expected UnknownCurrency, got {:?}", other),
        }
    }

    #[test]
    fn test_degraded_unknown_currency_uses_unity() {
        let book = book();
        let mut sub = subscription("a", "X", "Engineering", "Other IT Services");
        sub.regular_price = 7.0;
        sub.price_currency = "EUR".to_string();
        sub.billing_cycle = BillingCycle::Annually;

        assert_eq!(book.annualized_usd_degraded(&sub), 7.0);
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut book = book();
        let err = book.add("php", "₱", 56.0).unwrap_err();
        assert!(matches!(err, Error::Settings(_)));
    }

    #[test]
    fn test_add_requires_code_and_symbol() {
        let mut book = book();
        assert!(book.add("", "€", 1.1).is_err());
        assert!(book.add("EUR", "  ", 1.1).is_err());
        assert!(book.add("EUR", "€", 0.0).is_err());
        book.add("eur", "€", 0.92).unwrap();
        assert_eq!(book.get("EUR").unwrap().symbol, "€");
    }

    #[test]
    fn test_usd_cannot_be_removed() {
        let mut book = book();
        assert!(matches!(book.remove("USD"), Err(Error::Settings(_))));
        book.remove("PHP").unwrap();
        assert!(book.get("PHP").is_none());
    }

    #[test]
    fn test_set_rate() {
        let mut book = book();
        book.set_rate("PHP", 57.5).unwrap();
        assert_eq!(book.get("PHP").unwrap().rate_to_usd, 57.5);
        assert!(matches!(book.set_rate("EUR", 1.0), Err(Error::UnknownCurrency(_))));
        assert!(book.set_rate("PHP", -1.0).is_err());
    }
}
