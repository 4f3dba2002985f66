//! The unvalidated shape of a transaction as it arrives from JSON or CSV.

use serde::{Deserialize, Serialize};
use time::{Date, Time, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, Transaction, TransactionId, TransactionKind};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem] = format_description!("[hour]:[minute]:[second]");
const SHORT_TIME_FORMAT: &[BorrowedFormatItem] = format_description!("[hour]:[minute]");

/// A candidate transaction that has not been validated yet.
///
/// Field names follow the JSON produced by the transaction store, so `type`
/// holds the kind and `_id` is accepted for the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// The storage identifier, if any.
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    /// A calendar date or an ISO-8601 date-time.
    pub date: String,
    /// The amount of the transaction, expected to be non-negative.
    pub amount: f64,
    /// Either `income` or `expense`.
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
    /// The category label, if the transaction has been categorized.
    #[serde(default)]
    pub category: Option<String>,
    /// What the transaction was for.
    #[serde(default)]
    pub description: String,
    /// Categorizer confidence between 0 and 1.
    #[serde(default)]
    pub confidence_score: Option<f64>,
}

impl TransactionRecord {
    /// Check the record and convert it into a [Transaction].
    ///
    /// # Errors
    /// Returns [Error::InvalidTransaction] if the amount is negative, the kind
    /// is not `income` or `expense`, or the date is not a calendar date.
    pub fn validate(&self) -> Result<Transaction, Error> {
        let kind: TransactionKind = self.kind.parse()?;
        let date = parse_transaction_date(&self.date)?;

        Transaction::build(self.amount, date, kind, &self.description)
            .id(self.id.clone().map(TransactionId::new))
            .category(self.category.clone())
            .confidence_score(self.confidence_score)
            .finalise()
    }
}

/// Parse the calendar date of a transaction.
///
/// Accepts `YYYY-MM-DD` and ISO-8601 date-times such as
/// `2024-01-01T10:30:00`, `2024-01-01T10:30:00.250Z` or
/// `2024-01-01 10:30+05:30`. The time of day and any UTC offset are checked
/// and then discarded: the date is taken as written, without converting
/// between timezones, so two transactions written on the same day always
/// share a date.
///
/// # Errors
/// Returns [Error::InvalidTransaction] if `text` is not in one of the
/// accepted forms or names a day that does not exist.
pub fn parse_transaction_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();
    let invalid = || Error::InvalidTransaction(format!("\"{text}\" is not a valid date"));

    let (date_part, time_part) = match text.find(['T', ' ']) {
        Some(index) => (&text[..index], Some(&text[index + 1..])),
        None => (text, None),
    };

    let date = Date::parse(date_part, DATE_FORMAT).map_err(|_| invalid())?;

    if let Some(time_part) = time_part {
        parse_time_of_day(time_part).ok_or_else(invalid)?;
    }

    Ok(date)
}

fn parse_time_of_day(text: &str) -> Option<Time> {
    let without_offset = strip_utc_offset(text)?;

    let without_fraction = match without_offset.split_once('.') {
        Some((time, fraction))
            if !fraction.is_empty() && fraction.bytes().all(|byte| byte.is_ascii_digit()) =>
        {
            time
        }
        Some(_) => return None,
        None => without_offset,
    };

    Time::parse(without_fraction, TIME_FORMAT)
        .or_else(|_| Time::parse(without_fraction, SHORT_TIME_FORMAT))
        .ok()
}

/// Strips a trailing `Z`, `±HH`, `±HHMM` or `±HH:MM`.
fn strip_utc_offset(text: &str) -> Option<&str> {
    if let Some(stripped) = text.strip_suffix(['Z', 'z']) {
        return Some(stripped);
    }

    let Some(index) = text.rfind(['+', '-']) else {
        return Some(text);
    };

    let offset = text[index + 1..].replacen(':', "", 1);
    let is_valid_offset =
        matches!(offset.len(), 2 | 4) && offset.bytes().all(|byte| byte.is_ascii_digit());

    is_valid_offset.then_some(&text[..index])
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, TransactionKind, TransactionRecord, parse_transaction_date};

    fn record(date: &str, amount: f64, kind: &str) -> TransactionRecord {
        TransactionRecord {
            id: None,
            date: date.to_owned(),
            amount,
            kind: kind.to_owned(),
            category: None,
            description: "Groceries".to_owned(),
            confidence_score: None,
        }
    }

    #[test]
    fn parses_plain_date() {
        assert_eq!(parse_transaction_date("2024-01-01"), Ok(date!(2024 - 01 - 01)));
    }

    #[test]
    fn parses_date_times_as_written() {
        let inputs = [
            "2024-01-31T10:30:00",
            "2024-01-31T23:59:59.999Z",
            "2024-01-31T00:15:00+05:30",
            "2024-01-31T20:00:00-0800",
            "2024-01-31 10:30",
            " 2024-01-31T08:00:00.000000 ",
        ];

        for input in inputs {
            assert_eq!(
                parse_transaction_date(input),
                Ok(date!(2024 - 01 - 31)),
                "failed to parse {input:?}"
            );
        }
    }

    #[test]
    fn rejects_invalid_dates() {
        let inputs = [
            "",
            "01/02/2024",
            "2024-13-01",
            "2024-02-30",
            "2024-1-1",
            "2024-01-01Tnoon",
            "2024-01-01T25:00:00",
            "2024-01-01T10:30:00+5",
            "2024-01-01T10:30:00.",
        ];

        for input in inputs {
            assert!(
                matches!(
                    parse_transaction_date(input),
                    Err(Error::InvalidTransaction(_))
                ),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn validate_succeeds_on_valid_record() {
        let mut record = record("2024-01-02T12:00:00", 200.0, "Expense");
        record.id = Some("65a1".to_owned());
        record.category = Some("Food".to_owned());

        let transaction = record.validate().unwrap();

        assert_eq!(transaction.date, date!(2024 - 01 - 02));
        assert_eq!(transaction.kind, TransactionKind::Expense);
        assert_eq!(transaction.amount, 200.0);
        assert_eq!(transaction.category.as_deref(), Some("Food"));
        assert_eq!(transaction.id.unwrap().as_str(), "65a1");
    }

    #[test]
    fn validate_fails_on_negative_amount() {
        let result = record("2024-01-02", -5.0, "expense").validate();

        assert!(matches!(result, Err(Error::InvalidTransaction(_))));
    }

    #[test]
    fn validate_fails_on_unknown_kind() {
        let result = record("2024-01-02", 5.0, "transfer").validate();

        assert!(matches!(result, Err(Error::InvalidTransaction(_))));
    }

    #[test]
    fn validate_fails_on_bad_date() {
        let result = record("yesterday", 5.0, "income").validate();

        assert!(matches!(result, Err(Error::InvalidTransaction(_))));
    }

    #[test]
    fn deserializes_store_json() {
        let json = r#"{
            "_id": "abc",
            "date": "2024-01-01T00:00:00",
            "amount": 1000,
            "type": "income",
            "description": "Salary"
        }"#;

        let record: TransactionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id.as_deref(), Some("abc"));
        assert_eq!(record.kind, "income");
        assert_eq!(record.category, None);
        assert_eq!(record.amount, 1000.0);
    }
}
