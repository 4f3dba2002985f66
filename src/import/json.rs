//! Parses transactions from the JSON returned by the transaction store.

use serde::Deserialize;
use serde_json::Value;

use crate::{Error, TransactionRecord, import::ImportReport};

#[derive(Deserialize)]
#[serde(untagged)]
enum TransactionsDocument {
    List(Vec<Value>),
    Wrapped { transactions: Vec<Value> },
}

/// Parses transactions from JSON.
///
/// Accepts either an array of transaction records or an object with a
/// `transactions` array. Records are numbered from 1; a record that does not
/// have the expected fields or fails validation is rejected without stopping
/// the import.
///
/// # Errors
/// Returns [Error::JSONSerializationError] if `text` is not JSON in either
/// shape.
pub fn parse_json(text: &str) -> Result<ImportReport, Error> {
    let document: TransactionsDocument = serde_json::from_str(text)?;

    let values = match document {
        TransactionsDocument::List(values) => values,
        TransactionsDocument::Wrapped { transactions } => transactions,
    };

    let mut report = ImportReport::default();

    for (index, value) in values.into_iter().enumerate() {
        let parsed = serde_json::from_value::<TransactionRecord>(value)
            .map_err(Error::from)
            .and_then(|record| record.validate());

        match parsed {
            Ok(transaction) => report.accept(transaction),
            Err(error) => report.reject(index + 1, error.to_string()),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, import::parse_json};

    #[test]
    fn parses_store_response() {
        let json = r#"{
            "transactions": [
                {"_id": "a", "date": "2024-01-01T00:00:00", "amount": 1000, "type": "income", "description": "Salary", "category": "Salary", "confidence_score": 0.95},
                {"_id": "b", "date": "2024-01-02T00:00:00", "amount": 200, "type": "expense", "description": "Groceries"}
            ],
            "count": 2
        }"#;

        let report = parse_json(json).unwrap();

        assert!(report.errors.is_empty());
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.transactions[0].confidence_score, Some(0.95));
        assert_eq!(report.transactions[1].date, date!(2024 - 01 - 02));
        assert_eq!(report.transactions[1].category, None);
    }

    #[test]
    fn rejects_invalid_records_individually() {
        let json = r#"[
            {"date": "2024-01-01", "amount": 5, "type": "expense"},
            {"date": "2024-01-01", "amount": -5, "type": "expense"},
            {"date": "2024-01-01", "type": "expense"},
            {"date": "someday", "amount": 5, "type": "income"}
        ]"#;

        let report = parse_json(json).unwrap();

        assert_eq!(report.transactions.len(), 1);
        let rows: Vec<_> = report.errors.iter().map(|error| error.row).collect();
        assert_eq!(rows, vec![2, 3, 4]);
    }

    #[test]
    fn rejects_unexpected_document() {
        assert!(matches!(
            parse_json(r#"{"items": []}"#),
            Err(Error::JSONSerializationError(_))
        ));
    }
}
