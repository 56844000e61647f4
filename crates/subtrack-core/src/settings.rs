//! Application settings - departments, categories, currencies, columns, theme
//!
//! Settings are an explicit context object handed to the components that
//! need them, never ambient state. Construction starts from built-in
//! defaults and applies whatever the gateway's `get_settings` response
//! carries, key by key. Mutations validate here; persisting the changed
//! key back through `save_setting` is the caller's job.

use serde::{Deserialize, Serialize};

use crate::currency::CurrencyBook;
use crate::error::{Error, Result};
use crate::models::{ColumnConfig, Currency, Subscription, Theme};

pub const DEFAULT_DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Marketing",
    "Human Resources",
    "Finance",
    "Operations",
    "Product",
    "Sales",
    "Legal",
];

pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Cloud Infrastructure",
    "SaaS Productivity",
    "Cybersecurity & VPN",
    "Hosting & Domains",
    "Developer Tools",
    "AI & API Services",
    "Networking & Ops",
    "Tech Training",
    "Other IT Services",
];

/// The column that can never be hidden
pub const LOCKED_COLUMN_ID: &str = "sub";

fn default_columns() -> Vec<ColumnConfig> {
    let defs = [
        ("sub", "Subscription"),
        ("dept", "Department"),
        ("admin", "Subscriber"),
        ("pay", "Payment"),
        ("ren", "Renewal"),
        ("stat", "Status"),
        ("unit", "Unit Price"),
        ("ann", "Annual"),
    ];
    defs.iter()
        .enumerate()
        .map(|(order, (id, label))| ColumnConfig {
            id: id.to_string(),
            label: label.to_string(),
            visible: true,
            order: order as u32,
        })
        .collect()
}

/// Wire shape of the `get_settings` response. Every key is optional; a
/// present key overrides the corresponding default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<ColumnConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currencies: Option<Vec<Currency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_currency: Option<String>,
}

/// Process-wide configuration: loaded once at startup, persisted key by
/// key on every mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub departments: Vec<String>,
    pub categories: Vec<String>,
    pub currencies: CurrencyBook,
    pub columns: Vec<ColumnConfig>,
    pub theme: Theme,
    /// Code of the display currency; always resolvable in `currencies`
    pub active_currency: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        let currencies = CurrencyBook::defaults();
        let active_currency = currencies
            .iter()
            .next()
            .map(|c| c.code.clone())
            .unwrap_or_else(|| "USD".to_string());
        Self {
            departments: DEFAULT_DEPARTMENTS.iter().map(|s| s.to_string()).collect(),
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            currencies,
            columns: default_columns(),
            theme: Theme::Light,
            active_currency,
        }
    }
}

impl AppSettings {
    /// Defaults with the gateway's overrides applied
    pub fn with_overrides(overrides: SettingsOverrides) -> Self {
        let mut settings = Self::default();
        settings.apply(overrides);
        settings
    }

    /// Apply per-key overrides. Missing keys keep their defaults; an
    /// empty currency list is ignored rather than leaving the book
    /// unusable.
    pub fn apply(&mut self, overrides: SettingsOverrides) {
        if let Some(departments) = overrides.departments {
            self.departments = departments;
        }
        if let Some(categories) = overrides.categories {
            self.categories = categories;
        }
        if let Some(columns) = overrides.columns {
            self.columns = columns;
        }
        if let Some(theme) = overrides.theme {
            self.theme = theme;
        }
        if let Some(currencies) = overrides.currencies {
            if currencies.is_empty() {
                tracing::warn!("Ignoring empty currency list from settings");
            } else {
                self.currencies = CurrencyBook::new(currencies);
            }
        }
        if let Some(code) = overrides.active_currency {
            if self.currencies.get(&code).is_some() {
                self.active_currency = code;
            } else {
                tracing::warn!(code = %code, "Active currency not in the rate table, keeping default");
            }
        }
        // A currency override may have dropped the active code
        if self.currencies.get(&self.active_currency).is_none() {
            if let Some(first) = self.currencies.iter().next() {
                tracing::warn!(
                    code = %self.active_currency,
                    fallback = %first.code,
                    "Active currency no longer exists, falling back"
                );
                self.active_currency = first.code.clone();
            }
        }
    }

    /// The resolved display currency
    pub fn display_currency(&self) -> Result<&Currency> {
        self.currencies.resolve(&self.active_currency)
    }

    /// Switch the display currency. The code must exist in the book.
    pub fn set_active_currency(&mut self, code: &str) -> Result<()> {
        let resolved = self.currencies.resolve(code)?.code.clone();
        self.active_currency = resolved;
        Ok(())
    }

    pub fn add_department(&mut self, name: &str) -> Result<()> {
        add_item(&mut self.departments, name, "Department")
    }

    pub fn rename_department(&mut self, from: &str, to: &str) -> Result<()> {
        rename_item(&mut self.departments, from, to, "Department")
    }

    pub fn remove_department(&mut self, name: &str) -> Result<()> {
        remove_item(&mut self.departments, name, "Department")
    }

    pub fn add_category(&mut self, name: &str) -> Result<()> {
        add_item(&mut self.categories, name, "Category")
    }

    pub fn rename_category(&mut self, from: &str, to: &str) -> Result<()> {
        rename_item(&mut self.categories, from, to, "Category")
    }

    pub fn remove_category(&mut self, name: &str) -> Result<()> {
        remove_item(&mut self.categories, name, "Category")
    }

    /// Flip a column's visibility. The subscription name column stays
    /// visible no matter what.
    pub fn toggle_column(&mut self, id: &str) -> Result<()> {
        if id == LOCKED_COLUMN_ID {
            return Err(Error::Settings(
                "The Subscription column cannot be hidden".to_string(),
            ));
        }
        match self.columns.iter_mut().find(|c| c.id == id) {
            Some(col) => {
                col.visible = !col.visible;
                Ok(())
            }
            None => Err(Error::NotFound(format!("column '{}'", id))),
        }
    }

    /// Move a column one slot up or down by swapping order values with
    /// its neighbor.
    pub fn move_column(&mut self, id: &str, up: bool) -> Result<()> {
        let mut indices: Vec<usize> = (0..self.columns.len()).collect();
        indices.sort_by_key(|&i| self.columns[i].order);

        let pos = indices
            .iter()
            .position(|&i| self.columns[i].id == id)
            .ok_or_else(|| Error::NotFound(format!("column '{}'", id)))?;

        let target = if up {
            if pos == 0 {
                return Err(Error::Settings(format!("Column '{}' is already first", id)));
            }
            pos - 1
        } else {
            if pos + 1 == indices.len() {
                return Err(Error::Settings(format!("Column '{}' is already last", id)));
            }
            pos + 1
        };

        let (a, b) = (indices[pos], indices[target]);
        let tmp = self.columns[a].order;
        self.columns[a].order = self.columns[b].order;
        self.columns[b].order = tmp;
        Ok(())
    }

    /// Columns sorted by their order value
    pub fn ordered_columns(&self) -> Vec<&ColumnConfig> {
        let mut columns: Vec<&ColumnConfig> = self.columns.iter().collect();
        columns.sort_by_key(|c| c.order);
        columns
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Department and category names referenced by subscriptions but
    /// missing from the configured lists. Renames and deletes do not
    /// cascade into existing records, so orphans are possible.
    pub fn orphaned_references(&self, subs: &[Subscription]) -> OrphanReport {
        let mut report = OrphanReport::default();
        for sub in subs {
            if !self.departments.contains(&sub.department)
                && !report.departments.contains(&sub.department)
            {
                report.departments.push(sub.department.clone());
            }
            if !self.categories.contains(&sub.category)
                && !report.categories.contains(&sub.category)
            {
                report.categories.push(sub.category.clone());
            }
        }
        report
    }
}

/// Names referenced by subscriptions that no configured list contains
#[derive(Debug, Clone, Default)]
pub struct OrphanReport {
    pub departments: Vec<String>,
    pub categories: Vec<String>,
}

impl OrphanReport {
    pub fn is_empty(&self) -> bool {
        self.departments.is_empty() && self.categories.is_empty()
    }
}

fn add_item(list: &mut Vec<String>, name: &str, what: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Settings(format!("{} name cannot be empty", what)));
    }
    if list.iter().any(|existing| existing == name) {
        return Err(Error::Settings(format!("{} '{}' already exists", what, name)));
    }
    list.push(name.to_string());
    Ok(())
}

fn rename_item(list: &mut Vec<String>, from: &str, to: &str, what: &str) -> Result<()> {
    let to = to.trim();
    if to.is_empty() {
        return Err(Error::Settings(format!("{} name cannot be empty", what)));
    }
    if to == from {
        return Ok(());
    }
    if list.iter().any(|existing| existing == to) {
        return Err(Error::Settings(format!("{} '{}' already exists", what, to)));
    }
    match list.iter_mut().find(|existing| existing.as_str() == from) {
        Some(slot) => {
            *slot = to.to_string();
            Ok(())
        }
        None => Err(Error::NotFound(format!("{} '{}'", what, from))),
    }
}

fn remove_item(list: &mut Vec<String>, name: &str, what: &str) -> Result<()> {
    match list.iter().position(|existing| existing == name) {
        Some(idx) => {
            list.remove(idx);
            Ok(())
        }
        None => Err(Error::NotFound(format!("{} '{}'", what, name))),
    }
}
