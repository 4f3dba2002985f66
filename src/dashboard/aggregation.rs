//! Transaction data aggregation and transformation for charts.
//!
//! Provides functions to bucket transactions by calendar day for the income
//! vs. expenses chart, and to rank expense categories for the spending chart.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use time::{Date, Month};

use super::summary::percent_of;
use crate::Transaction;

/// The most categories shown in the spending chart.
pub const TOP_CATEGORY_LIMIT: usize = 8;

/// The label given to expenses without a category in the spending chart.
pub(crate) const OTHER_LABEL: &str = "Other";

/// Income and expense totals for a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    /// The day the totals cover.
    pub date: Date,
    /// Sum of income on `date`.
    pub income: f64,
    /// Sum of expenses on `date`.
    pub expense: f64,
}

impl DailyBucket {
    fn new(date: Date) -> Self {
        Self {
            date,
            income: 0.0,
            expense: 0.0,
        }
    }

    /// A short chart label such as "Jan 05".
    ///
    /// The label drops the year, so it must never be used to order buckets.
    pub fn label(&self) -> String {
        format!("{} {:02}", month_abbreviation(self.date.month()), self.date.day())
    }
}

/// An expense category's total and its share of all expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    /// The category name, "Other" for uncategorized expenses.
    pub category: String,
    /// Sum of expenses in the category.
    pub amount: f64,
    /// `amount` as a percentage of all expenses, including categories that
    /// did not make the top N.
    pub percent_of_total: f64,
}

/// Groups transactions by calendar day.
///
/// # Returns
/// One bucket per distinct day in `transactions`, in ascending date order.
/// Empty input gives an empty vector.
pub fn bucket_by_day(transactions: &[Transaction]) -> Vec<DailyBucket> {
    let mut buckets: BTreeMap<Date, DailyBucket> = BTreeMap::new();

    for transaction in transactions {
        let bucket = buckets
            .entry(transaction.date)
            .or_insert_with(|| DailyBucket::new(transaction.date));

        if transaction.is_income() {
            bucket.income += transaction.amount;
        } else {
            bucket.expense += transaction.amount;
        }
    }

    buckets.into_values().collect()
}

/// Ranks expense categories by total spend, keeping the top [TOP_CATEGORY_LIMIT].
///
/// See [rank_expense_categories_top].
pub fn rank_expense_categories(transactions: &[Transaction]) -> Vec<CategoryShare> {
    rank_expense_categories_top(transactions, TOP_CATEGORY_LIMIT)
}

/// Ranks expense categories by total spend, keeping the top `limit`.
///
/// Income is ignored and expenses with a missing or blank category are
/// grouped under "Other". Categories with equal totals keep the order in
/// which they first appear in `transactions`.
///
/// Percentages are taken against the total of all expenses, so the shares of
/// a truncated list need not add up to 100.
///
/// # Returns
/// Up to `limit` categories, largest first. Empty if there are no expenses or
/// they total zero.
pub fn rank_expense_categories_top(
    transactions: &[Transaction],
    limit: usize,
) -> Vec<CategoryShare> {
    let expenses = || transactions.iter().filter(|t| t.is_expense());

    let expense_total: f64 = expenses().map(|t| t.amount).sum();

    if expense_total <= 0.0 {
        return Vec::new();
    }

    let mut totals = total_by_category(expenses(), OTHER_LABEL);
    sort_descending_by_amount(&mut totals);

    totals
        .into_iter()
        .take(limit)
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            percent_of_total: percent_of(amount, expense_total),
        })
        .collect()
}

/// Sums amounts per category, labelling missing categories with `fallback`.
///
/// # Returns
/// (category, total) pairs in the order each category first appears.
pub(crate) fn total_by_category<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
    fallback: &str,
) -> Vec<(String, f64)> {
    let mut index_by_category: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(String, f64)> = Vec::new();

    for transaction in transactions {
        let category = transaction.category_or(fallback);

        let index = *index_by_category.entry(category).or_insert_with(|| {
            totals.push((category.to_owned(), 0.0));
            totals.len() - 1
        });

        totals[index].1 += transaction.amount;
    }

    totals
}

/// Stable sort, largest amount first.
pub(crate) fn sort_descending_by_amount(totals: &mut [(String, f64)]) {
    totals.sort_by(|(_, a), (_, b)| b.total_cmp(a));
}

fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
