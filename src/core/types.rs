//! Core data types for the cost ledger

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One logged API call, stored as a single JSONL line. Immutable once
/// written; the ledger only ever appends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CallRecord {
    /// Full-precision local timestamp (RFC 3339)
    pub(crate) timestamp: String,
    /// Calendar day the call was logged on (YYYY-MM-DD)
    pub(crate) date: String,
    pub(crate) provider: String,
    pub(crate) api: String,
    pub(crate) project: String,
    #[serde(default)]
    pub(crate) input_tokens: i64,
    #[serde(default)]
    pub(crate) output_tokens: i64,
    #[serde(default)]
    pub(crate) pages: i64,
    /// Cost in USD, rounded to 4 decimal places at log time
    #[serde(default)]
    pub(crate) cost_usd: f64,
    #[serde(default)]
    pub(crate) note: String,
}

/// Usage counts for one call
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Usage {
    pub(crate) input_tokens: i64,
    pub(crate) output_tokens: i64,
    pub(crate) pages: i64,
}

/// A call to be logged. Cost is resolved from the pricing table unless
/// `cost_usd` is supplied by the caller.
#[derive(Debug, Clone, Default)]
pub(crate) struct LoggedCall {
    pub(crate) provider: String,
    pub(crate) api: String,
    pub(crate) project: String,
    pub(crate) usage: Usage,
    pub(crate) note: String,
    pub(crate) cost_usd: Option<f64>,
}

/// Record filter. All bounds are conjunctive; date bounds are inclusive
/// and compared lexicographically on YYYY-MM-DD strings, which matches
/// chronological order.
#[derive(Debug, Clone, Default)]
pub(crate) struct LogFilter {
    pub(crate) start_date: Option<String>,
    pub(crate) end_date: Option<String>,
    pub(crate) provider: Option<String>,
    pub(crate) project: Option<String>,
}

impl LogFilter {
    pub(crate) fn for_day(date: &str) -> Self {
        LogFilter {
            start_date: Some(date.to_string()),
            end_date: Some(date.to_string()),
            ..Default::default()
        }
    }

    pub(crate) fn matches(&self, record: &CallRecord) -> bool {
        if let Some(start) = &self.start_date
            && record.date < *start
        {
            return false;
        }
        if let Some(end) = &self.end_date
            && record.date > *end
        {
            return false;
        }
        if let Some(provider) = &self.provider
            && record.provider != *provider
        {
            return false;
        }
        if let Some(project) = &self.project
            && record.project != *project
        {
            return false;
        }
        true
    }
}

/// Cost summary for a single day. Group totals use 4-decimal rounding.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct DailySummary {
    pub(crate) date: String,
    pub(crate) total_cost_usd: f64,
    pub(crate) call_count: usize,
    pub(crate) by_provider: BTreeMap<String, f64>,
    pub(crate) by_project: BTreeMap<String, f64>,
}

/// Cost summary for a calendar month. Group totals use 2-decimal rounding,
/// unlike the daily summary.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct MonthlySummary {
    pub(crate) year_month: String,
    pub(crate) total_cost_usd: f64,
    pub(crate) call_count: usize,
    pub(crate) by_provider: BTreeMap<String, f64>,
    pub(crate) by_project: BTreeMap<String, f64>,
    pub(crate) by_date: BTreeMap<String, f64>,
}
