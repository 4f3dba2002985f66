//! Headline numbers for the summary cards: income, expenses, net savings and
//! savings rate.

use serde::Serialize;

use crate::{Transaction, TransactionKind};

/// Totals over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// Sum of all income amounts.
    pub total_income: f64,
    /// Sum of all expense amounts.
    pub total_expense: f64,
    /// `total_income - total_expense`, negative when spending exceeds income.
    pub net_savings: f64,
    /// Net savings as a percentage of income, or zero when there is no income.
    pub savings_rate: f64,
}

/// Sums income and expenses and derives net savings and the savings rate.
///
/// The order of `transactions` does not matter and duplicates are counted.
/// An empty slice gives all zeros.
pub fn summarize(transactions: &[Transaction]) -> SummaryStats {
    let (total_income, total_expense) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expense), transaction| {
                match transaction.kind {
                    TransactionKind::Income => (income + transaction.amount, expense),
                    TransactionKind::Expense => (income, expense + transaction.amount),
                }
            });

    let net_savings = total_income - total_expense;

    SummaryStats {
        total_income,
        total_expense,
        net_savings,
        savings_rate: savings_rate(total_income, net_savings),
    }
}

/// Net savings as a percentage of income, guarding against zero income.
pub(crate) fn savings_rate(total_income: f64, net_savings: f64) -> f64 {
    percent_of(net_savings, total_income)
}

/// `part` as a percentage of `whole`.
///
/// Zero when `whole` is not a positive finite number or the result would not
/// be finite, e.g. when totals have overflowed to infinity.
pub(crate) fn percent_of(part: f64, whole: f64) -> f64 {
    if !(whole.is_finite() && whole > 0.0) {
        return 0.0;
    }

    let percent = part / whole * 100.0;

    if percent.is_finite() { percent } else { 0.0 }
}
