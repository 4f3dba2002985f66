//! Keyword rules for guessing the category of a transaction from its
//! description.

use serde::Serialize;

use crate::TransactionKind;

/// A guessed category and how confident the guess is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Categorization {
    /// The category name.
    pub category: &'static str,
    /// Confidence in the guess, between 0 and 1.
    pub confidence_score: f64,
}

const KEYWORD_MATCH_CONFIDENCE: f64 = 0.6;
const FALLBACK_CONFIDENCE: f64 = 0.5;

const INCOME_RULES: &[(&str, &[&str])] = &[
    ("Freelance/Gig Income", &["freelance", "gig", "project", "client"]),
    ("Salary", &["salary", "wage"]),
];

const EXPENSE_RULES: &[(&str, &[&str])] = &[
    (
        "Food & Dining",
        &["food", "restaurant", "meal", "swiggy", "zomato"],
    ),
    (
        "Transportation",
        &["uber", "ola", "transport", "petrol", "fuel"],
    ),
    (
        "Bills & Utilities",
        &["electricity", "water", "rent", "bill"],
    ),
    ("Shopping", &["amazon", "flipkart", "shopping", "clothes"]),
];

/// Guess the category of a transaction from its description.
///
/// Rules are checked in order and the first rule with a keyword contained in
/// the lowercased description wins. Descriptions that match no rule fall
/// back to "Other Income" or "Other Expense" with a lower confidence.
pub fn categorize(description: &str, kind: TransactionKind) -> Categorization {
    let description = description.to_lowercase();

    let (rules, fallback) = match kind {
        TransactionKind::Income => (INCOME_RULES, "Other Income"),
        TransactionKind::Expense => (EXPENSE_RULES, "Other Expense"),
    };

    rules
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| description.contains(keyword))
        })
        .map(|&(category, _)| Categorization {
            category,
            confidence_score: KEYWORD_MATCH_CONFIDENCE,
        })
        .unwrap_or(Categorization {
            category: fallback,
            confidence_score: FALLBACK_CONFIDENCE,
        })
}
