//! Spending analysis and rule-based coaching.
//!
//! [analyse_spending] breaks income and expenses down by category and
//! measures how much income varies, and [generate_insights] turns that
//! analysis into short insights and recommendations.

mod analysis;
mod coaching;

pub use analysis::{
    CategoryTotal, ExpenseAnalysis, IncomeAnalysis, SpendingAnalysis, analyse_spending,
};
pub use coaching::{Insights, generate_insights};
