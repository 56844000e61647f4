//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// SubTrack - IT subscription expense tracker
#[derive(Parser)]
#[command(name = "subtrack")]
#[command(about = "Track, analyze and forecast IT subscription spending", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Gateway base URL (overrides SUBTRACK_API_URL and the config file)
    #[arg(long, global = true)]
    pub api: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List subscriptions, optionally filtered
    List {
        /// Match against name or description (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Renewal month by English name (e.g. "March")
        #[arg(long)]
        month: Option<String>,

        /// Renewal year (e.g. 2025)
        #[arg(long)]
        year: Option<i32>,

        /// Exact department name
        #[arg(short, long)]
        department: Option<String>,

        /// Billing cycle: weekly, monthly, quarterly, annually
        #[arg(short, long)]
        cycle: Option<String>,

        /// Earliest renewal date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Latest renewal date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Show dashboard summary cards
    Summary,

    /// Spending report: year-over-year, allocation, insights, recommendations
    Report {
        /// Skip the advisor recommendations section
        #[arg(long)]
        no_advisor: bool,
    },

    /// Show subscriptions with firing renewal reminders
    Alerts,

    /// Export all subscriptions to CSV
    Export {
        /// Output file (defaults to subscriptions_YYYY-MM-DD.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add a new subscription
    Add(AddArgs),

    /// Edit fields of an existing subscription
    Edit(EditArgs),

    /// Delete a subscription
    Delete {
        /// Subscription ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Manage settings (departments, categories, currencies, columns, theme)
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Show gateway connection status
    Status,
}

#[derive(Args)]
pub struct AddArgs {
    /// Subscription name
    #[arg(long)]
    pub name: String,

    /// Department that owns the subscription
    #[arg(long)]
    pub department: String,

    /// Spending category
    #[arg(long)]
    pub category: String,

    /// Free-form description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Billing cycle: weekly, monthly, quarterly, annually
    #[arg(long, default_value = "monthly")]
    pub cycle: String,

    /// Date the subscription started (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date_started: Option<String>,

    /// Next renewal date (YYYY-MM-DD)
    #[arg(long)]
    pub renewal_date: String,

    /// Price per billing period
    #[arg(long)]
    pub price: f64,

    /// Currency code the price is stated in
    #[arg(long, default_value = "PHP")]
    pub currency: String,

    /// Disable auto-renewal (on by default)
    #[arg(long)]
    pub no_auto_renew: bool,

    /// Vendor portal URL
    #[arg(long, default_value = "")]
    pub url: String,

    /// Subscriber first name
    #[arg(long)]
    pub first_name: String,

    /// Subscriber last name
    #[arg(long)]
    pub last_name: String,

    /// Subscriber email
    #[arg(long)]
    pub email: String,

    /// Subscriber job title
    #[arg(long, default_value = "")]
    pub designation: String,

    /// Subscriber mobile number (digits only, max 11)
    #[arg(long, default_value = "")]
    pub mobile: String,

    /// Card brand (e.g. Visa, Mastercard)
    #[arg(long, default_value = "")]
    pub card_type: String,

    /// Name on the card
    #[arg(long, default_value = "")]
    pub cardholder: String,

    /// Last four digits of the card
    #[arg(long, default_value = "")]
    pub last_four: String,

    /// Card expiry (MM/YY)
    #[arg(long, default_value = "")]
    pub expiry: String,

    /// Reminder offsets in days before renewal, comma-separated (default: 30,7,1)
    #[arg(long)]
    pub reminders: Option<String>,

    /// Attach a file (repeatable, max 2; pdf, doc, docx, jpg, png)
    #[arg(long)]
    pub attach: Vec<PathBuf>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Subscription ID
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New department
    #[arg(long)]
    pub department: Option<String>,

    /// New category
    #[arg(long)]
    pub category: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New billing cycle: weekly, monthly, quarterly, annually
    #[arg(long)]
    pub cycle: Option<String>,

    /// New start date (YYYY-MM-DD)
    #[arg(long)]
    pub date_started: Option<String>,

    /// New renewal date (YYYY-MM-DD)
    #[arg(long)]
    pub renewal_date: Option<String>,

    /// New price per billing period
    #[arg(long)]
    pub price: Option<f64>,

    /// New currency code
    #[arg(long)]
    pub currency: Option<String>,

    /// Set auto-renewal on or off
    #[arg(long)]
    pub auto_renew: Option<bool>,

    /// New vendor portal URL
    #[arg(long)]
    pub url: Option<String>,

    /// New subscriber first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// New subscriber last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// New subscriber email
    #[arg(long)]
    pub email: Option<String>,

    /// New subscriber job title
    #[arg(long)]
    pub designation: Option<String>,

    /// New subscriber mobile number
    #[arg(long)]
    pub mobile: Option<String>,

    /// New card brand
    #[arg(long)]
    pub card_type: Option<String>,

    /// New name on the card
    #[arg(long)]
    pub cardholder: Option<String>,

    /// New last four digits
    #[arg(long)]
    pub last_four: Option<String>,

    /// New card expiry (MM/YY)
    #[arg(long)]
    pub expiry: Option<String>,

    /// Replace reminder offsets, comma-separated (empty string clears them)
    #[arg(long)]
    pub reminders: Option<String>,

    /// Attach another file (repeatable)
    #[arg(long)]
    pub attach: Vec<PathBuf>,

    /// Drop all existing attachments before applying --attach
    #[arg(long)]
    pub clear_attachments: bool,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show all current settings
    Show,

    /// Manage department names (list, add, rename, remove)
    Departments {
        #[command(subcommand)]
        action: Option<NameListAction>,
    },

    /// Manage category names (list, add, rename, remove)
    Categories {
        #[command(subcommand)]
        action: Option<NameListAction>,
    },

    /// Manage the currency rate table
    Currencies {
        #[command(subcommand)]
        action: Option<CurrencyAction>,
    },

    /// Manage table columns (toggle visibility, reorder)
    Columns {
        #[command(subcommand)]
        action: Option<ColumnAction>,
    },

    /// Toggle between light and dark theme
    Theme,
}

#[derive(Subcommand)]
pub enum NameListAction {
    /// Add a new name
    Add {
        /// Name to add
        name: String,
    },

    /// Rename an existing entry
    Rename {
        /// Current name
        old_name: String,
        /// New name
        new_name: String,
    },

    /// Remove an entry (existing subscriptions keep the old name)
    Remove {
        /// Name to remove
        name: String,
    },
}

#[derive(Subcommand)]
pub enum CurrencyAction {
    /// Add a currency to the rate table
    Add {
        /// Currency code (e.g. EUR)
        code: String,

        /// Display symbol (e.g. €)
        #[arg(long)]
        symbol: String,

        /// Units of this currency per 1 USD
        #[arg(long)]
        rate: f64,
    },

    /// Update the USD rate of an existing currency
    SetRate {
        /// Currency code
        code: String,
        /// Units of this currency per 1 USD
        rate: f64,
    },

    /// Remove a currency from the rate table
    Remove {
        /// Currency code
        code: String,
    },

    /// Switch the display currency
    Use {
        /// Currency code
        code: String,
    },
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Flip a column's visibility (the Subscription column is locked)
    Toggle {
        /// Column ID (e.g. dept, admin, pay)
        id: String,
    },

    /// Move a column one slot towards the front
    Up {
        /// Column ID
        id: String,
    },

    /// Move a column one slot towards the back
    Down {
        /// Column ID
        id: String,
    },
}
