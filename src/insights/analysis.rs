use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    Transaction,
    dashboard::{savings_rate, sort_descending_by_amount, total_by_category},
};

/// The label given to transactions without a category in the analysis.
const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// How many of the largest expense categories are highlighted.
const TOP_EXPENSE_CATEGORIES: usize = 3;

/// A category and the sum of its amounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// Sum of amounts in the category.
    pub amount: f64,
}

/// Breakdown of income.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeAnalysis {
    /// Sum of all income.
    pub total: f64,
    /// Number of income transactions.
    pub count: usize,
    /// Income per category, ordered by category name.
    pub by_category: BTreeMap<String, f64>,
    /// Coefficient of variation of income amounts in percent, rounded to two
    /// decimal places.
    pub volatility: f64,
}

/// Breakdown of expenses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseAnalysis {
    /// Sum of all expenses.
    pub total: f64,
    /// Number of expense transactions.
    pub count: usize,
    /// Expenses per category, ordered by category name.
    pub by_category: BTreeMap<String, f64>,
    /// The largest expense categories, largest first.
    pub top_categories: Vec<CategoryTotal>,
}

/// Income and expense breakdown used to generate insights.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingAnalysis {
    /// Breakdown of income.
    pub income: IncomeAnalysis,
    /// Breakdown of expenses.
    pub expense: ExpenseAnalysis,
    /// Income minus expenses.
    pub net_savings: f64,
    /// Net savings as a percentage of income, or zero without income.
    pub savings_rate: f64,
}

/// Break income and expenses down by category and measure income volatility.
///
/// Transactions without a category are counted as "Uncategorized". An empty
/// slice gives an all-zero analysis.
pub fn analyse_spending(transactions: &[Transaction]) -> SpendingAnalysis {
    let incomes: Vec<&Transaction> = transactions.iter().filter(|t| t.is_income()).collect();
    let expenses: Vec<&Transaction> = transactions.iter().filter(|t| t.is_expense()).collect();

    let income_total: f64 = incomes.iter().map(|t| t.amount).sum();
    let expense_total: f64 = expenses.iter().map(|t| t.amount).sum();

    let mut expense_totals = total_by_category(expenses.iter().copied(), UNCATEGORIZED_LABEL);
    let expense_by_category = expense_totals.iter().cloned().collect();
    sort_descending_by_amount(&mut expense_totals);

    let income_amounts: Vec<f64> = incomes.iter().map(|t| t.amount).collect();
    let net_savings = income_total - expense_total;

    SpendingAnalysis {
        income: IncomeAnalysis {
            total: income_total,
            count: incomes.len(),
            by_category: total_by_category(incomes.iter().copied(), UNCATEGORIZED_LABEL)
                .into_iter()
                .collect(),
            volatility: coefficient_of_variation(&income_amounts),
        },
        expense: ExpenseAnalysis {
            total: expense_total,
            count: expenses.len(),
            by_category: expense_by_category,
            top_categories: expense_totals
                .into_iter()
                .take(TOP_EXPENSE_CATEGORIES)
                .map(|(category, amount)| CategoryTotal { category, amount })
                .collect(),
        },
        net_savings,
        savings_rate: savings_rate(income_total, net_savings),
    }
}

/// Population standard deviation over the mean, in percent, rounded to two
/// decimal places.
///
/// Zero for fewer than two values, a non-positive mean or amounts too large
/// to measure.
fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;

    if mean <= 0.0 {
        return 0.0;
    }

    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count;
    let percent = variance.sqrt() / mean * 100.0;

    if !percent.is_finite() {
        return 0.0;
    }

    (percent * 100.0).round() / 100.0
}
