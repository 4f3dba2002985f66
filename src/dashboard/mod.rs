//! Dashboard module
//!
//! Derives the summary cards, the income vs. expenses series, the spending
//! breakdown and goal progress from a set of transactions and goals.

mod aggregation;
mod summary;

use serde::Serialize;
use time::Date;

pub use aggregation::{
    CategoryShare, DailyBucket, TOP_CATEGORY_LIMIT, bucket_by_day, rank_expense_categories,
    rank_expense_categories_top,
};
pub(crate) use aggregation::{sort_descending_by_amount, total_by_category};
pub use summary::{SummaryStats, summarize};
pub(crate) use summary::savings_rate;

use crate::{
    AnalysisConfig, Goal, GoalProgress, GoalStatus, Insights, SpendingAnalysis, Transaction,
    analyse_spending, generate_insights,
};

/// A goal and its progress, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    /// What the user is saving for.
    pub title: String,
    /// How much the user wants to save.
    pub target_amount: f64,
    /// How much has been saved so far.
    pub current_amount: f64,
    /// When the user wants to reach the target.
    pub target_date: Date,
    /// Whether the goal is still being saved for.
    pub status: GoalStatus,
    /// How far along the goal is.
    pub progress: GoalProgress,
}

impl From<&Goal> for GoalSummary {
    fn from(goal: &Goal) -> Self {
        Self {
            title: goal.title.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            target_date: goal.target_date,
            status: goal.status,
            progress: goal.progress(),
        }
    }
}

/// Everything the dashboard shows, derived in one pass over the inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Headline totals.
    pub summary: SummaryStats,
    /// Income and expenses per day, oldest first.
    pub daily: Vec<DailyBucket>,
    /// The largest expense categories, largest first.
    pub categories: Vec<CategoryShare>,
    /// Progress of each goal, in input order.
    pub goals: Vec<GoalSummary>,
    /// Income and expense breakdown.
    pub analysis: SpendingAnalysis,
    /// Rule-based coaching.
    pub insights: Insights,
}

impl Dashboard {
    /// Run every derivation over `transactions` and `goals`.
    ///
    /// The derivations are independent of each other and none of them fail:
    /// empty input gives zero totals and empty series.
    pub fn build(transactions: &[Transaction], goals: &[Goal], config: &AnalysisConfig) -> Self {
        let analysis = analyse_spending(transactions);
        let insights = generate_insights(&analysis, config);

        Self {
            summary: summarize(transactions),
            daily: bucket_by_day(transactions),
            categories: rank_expense_categories_top(transactions, config.top_category_limit),
            goals: goals.iter().map(GoalSummary::from).collect(),
            analysis,
            insights,
        }
    }

    /// Whether there is anything to chart.
    pub fn has_chart_data(&self) -> bool {
        !self.daily.is_empty()
    }
}
