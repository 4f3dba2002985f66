//! Settings for the dashboard report and the rule-based insights.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{Error, dashboard::TOP_CATEGORY_LIMIT};

/// Settings that tune how the dashboard is presented and which insights are
/// generated.
///
/// Every field has a default, so a JSON config only needs the fields that
/// should change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// The symbol placed before formatted amounts.
    pub currency_symbol: String,
    /// How many categories the spending breakdown keeps.
    pub top_category_limit: usize,
    /// The savings rate, in percent, considered healthy.
    pub healthy_savings_rate: f64,
    /// The income volatility, in percent, considered high.
    pub high_income_volatility: f64,
    /// The most insights and the most recommendations to generate.
    pub max_insights: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_owned(),
            top_category_limit: TOP_CATEGORY_LIMIT,
            healthy_savings_rate: 20.0,
            high_income_volatility: 30.0,
            max_insights: 3,
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a config from JSON.
    ///
    /// # Errors
    /// Returns [Error::JSONSerializationError] if `text` is not valid JSON for
    /// this struct, or [Error::InvalidConfig] if a value is out of range.
    pub fn from_json_str(text: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    ///
    /// # Errors
    /// Returns [Error::Io] if the file cannot be read, otherwise the errors of
    /// [AnalysisConfig::from_json_str].
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_json_str(&text)
    }

    /// Check that every setting is in range.
    ///
    /// # Errors
    /// Returns [Error::InvalidConfig] if the currency symbol is empty, the
    /// category limit is zero, or a threshold is negative or not a number.
    pub fn validate(&self) -> Result<(), Error> {
        if self.currency_symbol.is_empty() {
            return Err(Error::InvalidConfig(
                "currency_symbol cannot be empty".to_owned(),
            ));
        }

        if self.top_category_limit == 0 {
            return Err(Error::InvalidConfig(
                "top_category_limit must be at least 1".to_owned(),
            ));
        }

        for (name, value) in [
            ("healthy_savings_rate", self.healthy_savings_rate),
            ("high_income_volatility", self.high_income_volatility),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        Ok(())
    }
}
