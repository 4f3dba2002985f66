//! Rule-based coaching that turns a [SpendingAnalysis] into short insights and
//! recommendations.

use serde::Serialize;

use crate::{AnalysisConfig, SpendingAnalysis, format_currency};

/// Short observations about the user's finances and suggestions to act on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insights {
    /// Observations, most important first.
    pub insights: Vec<String>,
    /// Suggested actions, most important first.
    pub recommendations: Vec<String>,
}

/// Generate insights and recommendations from a spending analysis.
///
/// The rules look at the savings rate against
/// [AnalysisConfig::healthy_savings_rate], income volatility against
/// [AnalysisConfig::high_income_volatility], and the largest expense category.
/// Each list holds at most [AnalysisConfig::max_insights] entries.
pub fn generate_insights(analysis: &SpendingAnalysis, config: &AnalysisConfig) -> Insights {
    let mut insights = Vec::new();
    let mut recommendations = Vec::new();

    let savings_rate = analysis.savings_rate;
    let currency = |amount: f64| format_currency(amount, &config.currency_symbol);

    if savings_rate > config.healthy_savings_rate {
        insights.push(format!(
            "Great job! You're saving {savings_rate:.1}% of your income."
        ));
    } else if savings_rate > 0.0 {
        insights.push(format!(
            "You're saving {savings_rate:.1}% of your income. Let's work on increasing this!"
        ));
    } else {
        insights.push(format!(
            "Your expenses exceed income by {}. Let's create a plan.",
            currency(analysis.net_savings.abs())
        ));
    }

    let volatility = analysis.income.volatility;
    if volatility > config.high_income_volatility {
        insights.push(format!(
            "Your income varies by {volatility:.0}%, typical for gig work."
        ));
        recommendations.push(
            "Build an emergency fund equal to 2-3 months of expenses to handle income gaps."
                .to_owned(),
        );
    }

    if let Some(top) = analysis.expense.top_categories.first() {
        insights.push(format!(
            "Your highest expense is {} at {}.",
            top.category,
            currency(top.amount)
        ));
        recommendations.push(format!(
            "Review your {} spending for potential savings opportunities.",
            top.category
        ));
    }

    if savings_rate < config.healthy_savings_rate {
        recommendations
            .push("Try the 50-30-20 rule: 50% needs, 30% wants, 20% savings.".to_owned());
    }

    insights.truncate(config.max_insights);
    recommendations.truncate(config.max_insights);

    tracing::debug!(
        "Generated {} insights and {} recommendations",
        insights.len(),
        recommendations.len()
    );

    Insights {
        insights,
        recommendations,
    }
}
