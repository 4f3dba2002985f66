//! Savings goals and their progress.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, transaction::parse_transaction_date};

/// An opaque identifier assigned by whatever stores the goal.
pub type GoalId = String;

/// Whether a goal is still being saved for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    /// The goal is being saved for.
    #[default]
    Active,
    /// The user has marked the goal as done.
    Completed,
}

/// An amount of money the user wants to have saved by a certain date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// The ID of the goal, if it has been stored.
    #[serde(default, alias = "_id")]
    pub id: Option<GoalId>,
    /// What the user is saving for, e.g. "Emergency Fund".
    pub title: String,
    /// How much the user wants to save. Must be positive.
    pub target_amount: f64,
    /// How much has been saved so far. May exceed the target.
    #[serde(default)]
    pub current_amount: f64,
    /// When the user wants to reach the target.
    #[serde(deserialize_with = "deserialize_goal_date")]
    pub target_date: Date,
    /// Whether the goal is still being saved for.
    #[serde(default)]
    pub status: GoalStatus,
}

/// How far along a goal is.
///
/// `percent_complete` is clamped to 0–100 for progress bars, while `ratio`
/// and `unclamped_percent` keep the true value, e.g. 150% for a goal that
/// was overshot by half.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// `current_amount / target_amount`.
    pub ratio: f64,
    /// `ratio` as a percentage, not clamped.
    pub unclamped_percent: f64,
    /// `unclamped_percent` clamped to 0–100.
    pub percent_complete: f64,
    /// How much is left to save, never negative.
    pub remaining_amount: f64,
}

impl Goal {
    /// Create a new active goal with nothing saved yet.
    pub fn new(title: &str, target_amount: f64, target_date: Date) -> Self {
        Self {
            id: None,
            title: title.to_owned(),
            target_amount,
            current_amount: 0.0,
            target_date,
            status: GoalStatus::Active,
        }
    }

    /// Check that the goal has a title and a positive target.
    ///
    /// # Errors
    /// Returns [Error::InvalidGoal] if the title is blank, the target amount
    /// is zero or negative, or either amount is not a finite number.
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidGoal("goal title cannot be empty".to_owned()));
        }

        check_target_amount(self.target_amount)?;
        self.check_current_amount()
    }

    /// Calculate how far along the goal is.
    ///
    /// # Errors
    /// Returns [Error::InvalidGoal] if the target amount is zero, negative or
    /// not a finite number, or if the current amount is not a finite number.
    pub fn try_progress(&self) -> Result<GoalProgress, Error> {
        check_target_amount(self.target_amount)?;
        self.check_current_amount()?;

        let ratio = self.current_amount / self.target_amount;
        let unclamped_percent = ratio * 100.0;

        Ok(GoalProgress {
            ratio,
            unclamped_percent,
            percent_complete: unclamped_percent.clamp(0.0, 100.0),
            remaining_amount: (self.target_amount - self.current_amount).max(0.0),
        })
    }

    /// Calculate how far along the goal is, treating an invalid target or
    /// current amount as no progress.
    pub fn progress(&self) -> GoalProgress {
        self.try_progress().unwrap_or_else(|error| {
            tracing::warn!("Showing zero progress for goal \"{}\": {error}", self.title);
            GoalProgress::default()
        })
    }

    /// Whether the goal is still being saved for.
    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }

    fn check_current_amount(&self) -> Result<(), Error> {
        if self.current_amount.is_finite() {
            Ok(())
        } else {
            Err(Error::InvalidGoal(format!(
                "current amount of \"{}\" must be a number, got {}",
                self.title, self.current_amount
            )))
        }
    }
}

fn check_target_amount(target_amount: f64) -> Result<(), Error> {
    if target_amount.is_finite() && target_amount > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidGoal(format!(
            "target amount must be greater than zero, got {target_amount}"
        )))
    }
}

fn deserialize_goal_date<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_transaction_date(&text).map_err(serde::de::Error::custom)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GoalsDocument {
    List(Vec<Goal>),
    Wrapped { goals: Vec<Goal> },
}

/// Parse goals from JSON.
///
/// Accepts either an array of goals or an object with a `goals` array, which
/// is the shape returned by the goal store.
///
/// # Errors
/// Returns [Error::JSONSerializationError] if `text` is not in either shape.
pub fn parse_goals_json(text: &str) -> Result<Vec<Goal>, Error> {
    let document: GoalsDocument = serde_json::from_str(text)?;

    Ok(match document {
        GoalsDocument::List(goals) => goals,
        GoalsDocument::Wrapped { goals } => goals,
    })
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, Goal, GoalProgress, GoalStatus, parse_goals_json};

    fn create_test_goal(target_amount: f64, current_amount: f64) -> Goal {
        Goal {
            current_amount,
            ..Goal::new("Emergency Fund", target_amount, date!(2025 - 06 - 30))
        }
    }

    #[test]
    fn progress_is_fraction_of_target() {
        let progress = create_test_goal(10_000.0, 2_500.0).progress();

        assert_eq!(
            progress,
            GoalProgress {
                ratio: 0.25,
                unclamped_percent: 25.0,
                percent_complete: 25.0,
                remaining_amount: 7_500.0,
            }
        );
    }

    #[test]
    fn progress_clamps_display_but_keeps_true_ratio() {
        let progress = create_test_goal(200.0, 300.0).progress();

        assert_eq!(progress.ratio, 1.5);
        assert_eq!(progress.unclamped_percent, 150.0);
        assert_eq!(progress.percent_complete, 100.0);
        assert_eq!(progress.remaining_amount, 0.0);
    }

    #[test]
    fn progress_clamps_negative_savings_to_zero() {
        let progress = create_test_goal(100.0, -20.0).progress();

        assert_eq!(progress.unclamped_percent, -20.0);
        assert_eq!(progress.percent_complete, 0.0);
        assert_eq!(progress.remaining_amount, 120.0);
    }

    #[test]
    fn progress_is_zero_for_zero_target() {
        let progress = create_test_goal(0.0, 50.0).progress();

        assert_eq!(progress, GoalProgress::default());
        assert_eq!(progress.percent_complete, 0.0);
    }

    #[test]
    fn try_progress_fails_for_zero_target() {
        let result = create_test_goal(0.0, 50.0).try_progress();

        assert!(matches!(result, Err(Error::InvalidGoal(_))));
    }

    #[test]
    fn progress_is_zero_for_non_finite_current_amount() {
        for current_amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let goal = create_test_goal(100.0, current_amount);

            assert_eq!(goal.progress(), GoalProgress::default());
            assert!(matches!(goal.try_progress(), Err(Error::InvalidGoal(_))));
        }
    }

    #[test]
    fn try_progress_fails_for_negative_target() {
        let result = create_test_goal(-10.0, 0.0).try_progress();

        assert!(matches!(result, Err(Error::InvalidGoal(_))));
    }

    #[test]
    fn validate_fails_on_blank_title() {
        let goal = Goal::new("  ", 100.0, date!(2025 - 01 - 01));

        assert!(matches!(goal.validate(), Err(Error::InvalidGoal(_))));
    }

    #[test]
    fn validate_succeeds_on_new_goal() {
        let goal = Goal::new("Laptop", 1500.0, date!(2025 - 01 - 01));

        assert_eq!(goal.validate(), Ok(()));
        assert!(goal.is_active());
    }

    #[test]
    fn parse_goals_json_accepts_store_response() {
        let json = r#"{
            "goals": [
                {
                    "_id": "g1",
                    "title": "Emergency Fund",
                    "target_amount": 10000,
                    "current_amount": 2500,
                    "target_date": "2025-06-30T00:00:00.000Z",
                    "status": "active"
                }
            ],
            "count": 1
        }"#;

        let goals = parse_goals_json(json).unwrap();

        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].id.as_deref(), Some("g1"));
        assert_eq!(goals[0].target_date, date!(2025 - 06 - 30));
        assert_eq!(goals[0].status, GoalStatus::Active);
    }

    #[test]
    fn parse_goals_json_accepts_plain_list_with_defaults() {
        let json = r#"[{"title": "Bike", "target_amount": 800, "target_date": "2025-03-01"}]"#;

        let goals = parse_goals_json(json).unwrap();

        assert_eq!(goals[0].current_amount, 0.0);
        assert_eq!(goals[0].status, GoalStatus::Active);
    }

    #[test]
    fn parse_goals_json_rejects_bad_date() {
        let json = r#"[{"title": "Bike", "target_amount": 800, "target_date": "soon"}]"#;

        assert!(matches!(
            parse_goals_json(json),
            Err(Error::JSONSerializationError(_))
        ));
    }
}
