//! Finsight turns a list of income and expense transactions into the numbers
//! behind a personal-finance dashboard.
//!
//! The library is a set of pure derivations over borrowed slices:
//! - [summarize] for total income, total expenses, net savings and savings rate,
//! - [bucket_by_day] for a date-ordered income/expense series,
//! - [rank_expense_categories] for the top expense categories and their share,
//! - [Goal::progress] for savings goal completion,
//! - [analyse_spending] and [generate_insights] for rule-based coaching.
//!
//! Fetching, storing and rendering the data is left to the caller. The
//! [import] module and the `finsight` binary are one such caller.

#![warn(missing_docs)]

mod categorize;
mod config;
mod dashboard;
mod format;
mod goal;
pub mod import;
mod insights;
mod logging;
mod transaction;

pub use categorize::{Categorization, categorize};
pub use config::AnalysisConfig;
pub use dashboard::{
    CategoryShare, DailyBucket, Dashboard, GoalSummary, SummaryStats, TOP_CATEGORY_LIMIT,
    bucket_by_day, rank_expense_categories, rank_expense_categories_top, summarize,
};
pub use format::{format_currency, format_percentage};
pub use goal::{Goal, GoalId, GoalProgress, GoalStatus, parse_goals_json};
pub use insights::{
    CategoryTotal, ExpenseAnalysis, IncomeAnalysis, Insights, SpendingAnalysis,
    analyse_spending, generate_insights,
};
pub use logging::setup_logging;
pub use transaction::{
    Transaction, TransactionBuilder, TransactionId, TransactionKind, TransactionRecord,
    parse_transaction_date,
};

/// The errors that may occur in the library.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction record has a negative amount, an unknown kind or a date
    /// that is not a calendar date.
    ///
    /// Callers are expected to filter these records out before aggregating.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// A goal has a target amount that is zero, negative or not a number, or
    /// is otherwise malformed.
    #[error("invalid goal: {0}")]
    InvalidGoal(String),

    /// The CSV had issues that prevented it from being parsed.
    #[error("could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// The analysis configuration has a value outside its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A file could not be read.
    #[error("could not read file: {0}")]
    Io(String),

    /// An error occurred while reading or writing JSON.
    #[error("could not (de)serialize JSON: {0}")]
    JSONSerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}
