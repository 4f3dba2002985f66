//! Defines the core data model for transactions.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// An opaque identifier assigned by whatever stores the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap an identifier issued by the storage layer.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether money was earned or spent.
///
/// The direction of a transaction is carried here, never by the sign of the
/// amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money that was earned.
    Income,
    /// Money that was spent.
    Expense,
}

impl TransactionKind {
    /// The lowercase name used in JSON and CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    /// Parses `income` or `expense`, ignoring case and surrounding whitespace.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(Error::InvalidTransaction(format!(
                "\"{text}\" is not a transaction type, expected \"income\" or \"expense\""
            ))),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build] or validate a
/// [crate::TransactionRecord].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction, if it has been stored.
    pub id: Option<TransactionId>,
    /// The amount of money spent or earned in this transaction. Never negative.
    pub amount: f64,
    /// The calendar day the transaction happened on.
    pub date: Date,
    /// Whether the amount was earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The category of the transaction, e.g. "Groceries", "Transport", "Rent".
    pub category: Option<String>,
    /// A text description of what the transaction was for.
    pub description: String,
    /// How sure the categorizer was about `category`, between 0 and 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        amount: f64,
        date: Date,
        kind: TransactionKind,
        description: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            id: None,
            amount,
            date,
            kind,
            category: None,
            description: description.to_owned(),
            confidence_score: None,
        }
    }

    /// Whether the transaction is income.
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Whether the transaction is an expense.
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// The category label, or `fallback` if the category is missing or blank.
    pub fn category_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.category.as_deref() {
            Some(category) if !category.trim().is_empty() => category,
            _ => fallback,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// # Examples
///
/// ```
/// use finsight::{Transaction, TransactionKind};
/// use time::macros::date;
///
/// let transaction = Transaction::build(
///         45.99,
///         date!(2025-01-15),
///         TransactionKind::Expense,
///         "Coffee shop purchase",
///     )
///     .category(Some("Food & Dining".to_owned()))
///     .finalise()
///     .unwrap();
///
/// assert_eq!(transaction.category_or("Other"), "Food & Dining");
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    id: Option<TransactionId>,
    amount: f64,
    date: Date,
    kind: TransactionKind,
    category: Option<String>,
    description: String,
    confidence_score: Option<f64>,
}

impl TransactionBuilder {
    /// Set the storage ID for the transaction.
    pub fn id(mut self, id: Option<TransactionId>) -> Self {
        self.id = id;
        self
    }

    /// Set the category for the transaction.
    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Set the categorizer confidence for the transaction.
    pub fn confidence_score(mut self, confidence_score: Option<f64>) -> Self {
        self.confidence_score = confidence_score;
        self
    }

    /// Check the amount and confidence score and create the transaction.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransaction] if the amount is negative or not a
    /// finite number, or if the confidence score is outside `0.0..=1.0`.
    pub fn finalise(self) -> Result<Transaction, Error> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidTransaction(format!(
                "amount must be a non-negative number, got {}",
                self.amount
            )));
        }

        if let Some(score) = self.confidence_score {
            if !(0.0..=1.0).contains(&score) {
                return Err(Error::InvalidTransaction(format!(
                    "confidence score must be between 0 and 1, got {score}"
                )));
            }
        }

        Ok(Transaction {
            id: self.id,
            amount: self.amount,
            date: self.date,
            kind: self.kind,
            category: self.category,
            description: self.description,
            confidence_score: self.confidence_score,
        })
    }
}


#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, Transaction, TransactionKind};

    #[test]
    fn finalise_succeeds_on_zero_amount() {
        let transaction =
            Transaction::build(0.0, date!(2024 - 01 - 01), TransactionKind::Income, "").finalise();

        assert!(transaction.is_ok());
    }

    #[test]
    fn finalise_fails_on_negative_amount() {
        let result =
            Transaction::build(-0.01, date!(2024 - 01 - 01), TransactionKind::Expense, "refund")
                .finalise();

        assert!(matches!(result, Err(Error::InvalidTransaction(_))));
    }

    #[test]
    fn finalise_fails_on_nan_amount() {
        let result =
            Transaction::build(f64::NAN, date!(2024 - 01 - 01), TransactionKind::Expense, "")
                .finalise();

        assert!(matches!(result, Err(Error::InvalidTransaction(_))));
    }

    #[test]
    fn finalise_fails_on_confidence_above_one() {
        let result = Transaction::build(1.0, date!(2024 - 01 - 01), TransactionKind::Expense, "")
            .confidence_score(Some(1.2))
            .finalise();

        assert!(matches!(result, Err(Error::InvalidTransaction(_))));
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(
            " Income ".parse::<TransactionKind>(),
            Ok(TransactionKind::Income)
        );
        assert_eq!(
            "EXPENSE".parse::<TransactionKind>(),
            Ok(TransactionKind::Expense)
        );
    }

    #[test]
    fn kind_rejects_unknown_value() {
        let result = "transfer".parse::<TransactionKind>();

        assert!(matches!(result, Err(Error::InvalidTransaction(_))));
    }

    #[test]
    fn category_or_falls_back_on_blank_category() {
        let transaction =
            Transaction::build(1.0, date!(2024 - 01 - 01), TransactionKind::Expense, "")
                .category(Some("   ".to_owned()))
                .finalise()
                .unwrap();

        assert_eq!(transaction.category_or("Other"), "Other");
    }

    #[test]
    fn serializes_kind_as_type() {
        let transaction = Transaction::build(
            12.5,
            date!(2024 - 03 - 09),
            TransactionKind::Expense,
            "Lunch",
        )
        .finalise()
        .unwrap();

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2024-03-09");
        assert!(json.get("confidence_score").is_none());
    }
}
