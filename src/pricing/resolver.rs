//! Cost computation against the pricing table
//!
//! The table is re-read from disk on every computation so edits to the
//! pricing file take effect immediately.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::core::Usage;
use crate::error::AppError;

use super::types::{PricingRule, PricingTable};

pub(crate) struct PricingResolver {
    path: PathBuf,
}

impl PricingResolver {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the pricing table. A missing file is an empty table, not an
    /// error; everything then prices at 0.
    pub(crate) fn load_table(&self) -> Result<PricingTable, AppError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(PricingTable::new());
            }
            Err(err) => {
                return Err(AppError::PricingRead {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };
        toml::from_str(&content).map_err(|err| AppError::PricingParse {
            path: self.path.clone(),
            source: err,
        })
    }

    /// Compute the cost of one call in USD. Unknown provider or API is 0.0.
    pub(crate) fn calculate_cost(
        &self,
        provider: &str,
        api: &str,
        usage: Usage,
    ) -> Result<f64, AppError> {
        let table = self.load_table()?;
        let Some(rule) = table.get(provider).and_then(|apis| apis.get(api)) else {
            return Ok(0.0);
        };
        Ok(rule_cost(rule, usage))
    }
}

/// Page-based pricing takes precedence: a rule with `unit = "page"` is
/// billed per page even if token rates are also present.
fn rule_cost(rule: &PricingRule, usage: Usage) -> f64 {
    if rule.unit.as_deref() == Some("page") {
        return usage.pages as f64 * rule.price_usd;
    }
    (usage.input_tokens as f64 / 1_000_000.0) * rule.input_per_1m
        + (usage.output_tokens as f64 / 1_000_000.0) * rule.output_per_1m
}
