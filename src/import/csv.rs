//! Parses transactions from CSV with a `date,amount,type,description` header.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{
    Error, Transaction, TransactionKind, categorize, import::ImportReport,
    transaction::parse_transaction_date,
};

const INVALID_DATA: &str = "Invalid or missing data";
const INVALID_DATE: &str = "Invalid date format";

/// Column positions found in the header.
struct Columns {
    date: usize,
    amount: usize,
    kind: usize,
    description: usize,
    category: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, Error> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| Error::InvalidCSV(format!("missing \"{name}\" column")))
        };

        Ok(Self {
            date: require("date")?,
            amount: require("amount")?,
            kind: require("type")?,
            description: require("description")?,
            category: find("category"),
        })
    }
}

/// Parses transactions from CSV text.
///
/// Expects a header row naming the `date`, `amount`, `type` and
/// `description` columns in any order, and optionally a `category` column.
/// Rows are numbered from 2 since the header is row 1.
///
/// A row is rejected if a required field is blank, the amount is zero, the
/// type is not `income` or `expense`, or the date cannot be parsed. An amount
/// that is not a number or is negative is rejected with the reason it failed
/// validation. Rows without a category are categorized from their
/// description.
///
/// # Errors
/// Returns [Error::InvalidCSV] if the header is missing or lacks a required
/// column.
pub fn parse_csv(text: &str) -> Result<ImportReport, Error> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| Error::InvalidCSV(error.to_string()))?
        .clone();

    let columns = Columns::from_headers(&headers)?;
    let mut report = ImportReport::default();

    for (index, record) in reader.records().enumerate() {
        let row = index + 2;

        let parsed = record
            .map_err(|error| error.to_string())
            .and_then(|record| parse_row(&record, &columns));

        match parsed {
            Ok(transaction) => report.accept(transaction),
            Err(reason) => report.reject(row, reason),
        }
    }

    Ok(report)
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Result<Transaction, String> {
    let field = |index: usize| record.get(index).unwrap_or("").trim();

    let date = field(columns.date);
    let description = field(columns.description);

    if date.is_empty() || description.is_empty() {
        return Err(INVALID_DATA.to_owned());
    }

    let amount = field(columns.amount);

    if amount.is_empty() {
        return Err(INVALID_DATA.to_owned());
    }

    let amount: f64 = amount.parse().map_err(|_| {
        Error::InvalidTransaction(format!("\"{amount}\" is not a valid amount")).to_string()
    })?;

    if amount == 0.0 {
        return Err(INVALID_DATA.to_owned());
    }

    let kind: TransactionKind = field(columns.kind)
        .parse()
        .map_err(|_| INVALID_DATA.to_owned())?;

    let date = parse_transaction_date(date).map_err(|_| INVALID_DATE.to_owned())?;

    let category = columns
        .category
        .map(field)
        .filter(|category| !category.is_empty());

    let (category, confidence_score) = match category {
        Some(category) => (category.to_owned(), None),
        None => {
            let guess = categorize(description, kind);
            (guess.category.to_owned(), Some(guess.confidence_score))
        }
    };

    Transaction::build(amount, date, kind, description)
        .category(Some(category))
        .confidence_score(confidence_score)
        .finalise()
        .map_err(|error| error.to_string())
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error, TransactionKind,
        import::{RowError, parse_csv},
    };

    #[test]
    fn parses_valid_rows() {
        let text = "date,amount,type,description,category\n\
                    2024-01-01,1000,income,Salary for January,Salary\n\
                    2024-01-02T09:15:00,45.5,expense,Swiggy lunch,\n";

        let report = parse_csv(text).unwrap();

        assert!(report.errors.is_empty());
        assert_eq!(report.transactions.len(), 2);

        let salary = &report.transactions[0];
        assert_eq!(salary.date, date!(2024 - 01 - 01));
        assert_eq!(salary.kind, TransactionKind::Income);
        assert_eq!(salary.category.as_deref(), Some("Salary"));
        assert_eq!(salary.confidence_score, None);

        let lunch = &report.transactions[1];
        assert_eq!(lunch.amount, 45.5);
        assert_eq!(lunch.category.as_deref(), Some("Food & Dining"));
        assert_eq!(lunch.confidence_score, Some(0.6));
    }

    #[test]
    fn accepts_columns_in_any_order_without_category() {
        let text = "Description,Type,Amount,Date\nUber ride,EXPENSE,12,2024-03-04\n";

        let report = parse_csv(text).unwrap();

        assert_eq!(report.transactions.len(), 1);
        assert_eq!(
            report.transactions[0].category.as_deref(),
            Some("Transportation")
        );
    }

    #[test]
    fn collects_row_errors_and_keeps_going() {
        let text = "date,amount,type,description\n\
                    2024-01-01,0,income,Nothing\n\
                    2024-01-01,10,transfer,Moved money\n\
                    01/02/2024,10,expense,Bad date\n\
                    2024-01-03,abc,expense,Bad amount\n\
                    2024-01-04,-5,expense,Refund\n\
                    2024-01-05,20,expense,\n\
                    2024-01-06,30,expense,Movie tickets\n";

        let report = parse_csv(text).unwrap();

        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.transactions[0].description, "Movie tickets");

        let rows: Vec<_> = report.errors.iter().map(|error| error.row).collect();
        assert_eq!(rows, vec![2, 3, 4, 5, 6, 7]);
        assert_eq!(
            report.errors[2],
            RowError {
                row: 4,
                reason: "Invalid date format".to_owned()
            }
        );
        assert_eq!(report.errors[0].reason, "Invalid or missing data");
        assert_eq!(
            report.errors[3].reason,
            "invalid transaction: \"abc\" is not a valid amount"
        );
        assert!(matches!(
            report.errors[4].reason.as_str(),
            reason if reason.starts_with("invalid transaction")
        ));
    }

    #[test]
    fn rejects_missing_required_column() {
        let text = "date,amount,description\n2024-01-01,5,Coffee\n";

        assert!(matches!(parse_csv(text), Err(Error::InvalidCSV(_))));
    }

    #[test]
    fn handles_header_only() {
        let report = parse_csv("date,amount,type,description\n").unwrap();

        assert!(report.transactions.is_empty());
        assert!(report.errors.is_empty());
    }
}
