//! Loading transactions from CSV and JSON.
//!
//! Loaders validate every record and keep going after a bad one: valid
//! records end up in [ImportReport::transactions] and rejected ones in
//! [ImportReport::errors] with the row they came from.

mod csv;
mod json;

use std::{fmt, fs, path::Path};

use crate::{Error, Transaction};

pub use self::csv::parse_csv;
pub use self::json::parse_json;

/// A record that could not be imported.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// The row number. For CSV the header is row 1, for JSON the first
    /// record is row 1.
    pub row: usize,
    /// Why the row was rejected.
    pub reason: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.reason)
    }
}

/// The transactions and rejected rows found while importing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// The valid transactions, in input order.
    pub transactions: Vec<Transaction>,
    /// The rejected rows, in input order.
    pub errors: Vec<RowError>,
}

impl ImportReport {
    fn accept(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    fn reject(&mut self, row: usize, reason: impl Into<String>) {
        let error = RowError {
            row,
            reason: reason.into(),
        };
        tracing::debug!("Rejected import row: {error}");
        self.errors.push(error);
    }
}

/// Load transactions from a file.
///
/// Files ending in `.csv` are parsed with [parse_csv], anything else with
/// [parse_json].
///
/// # Errors
/// Returns [Error::Io] if the file cannot be read, otherwise the errors of
/// the chosen parser.
pub fn load_transactions(path: &Path) -> Result<ImportReport, Error> {
    let text = fs::read_to_string(path)?;

    let is_csv = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"));

    let report = if is_csv {
        parse_csv(&text)?
    } else {
        parse_json(&text)?
    };

    tracing::info!(
        "Loaded {} transactions from {} ({} rejected)",
        report.transactions.len(),
        path.display(),
        report.errors.len()
    );

    Ok(report)
}
