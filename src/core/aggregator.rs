//! Folds filtered records into daily and monthly summaries
//!
//! Daily summaries round to 4 decimal places, monthly summaries to 2.
//! The asymmetry is load-bearing for downstream consumers.

use std::collections::BTreeMap;

use crate::core::types::{CallRecord, DailySummary, MonthlySummary};
use crate::utils::round_usd;

fn round_groups(groups: &mut BTreeMap<String, f64>, decimals: u32) {
    for cost in groups.values_mut() {
        *cost = round_usd(*cost, decimals);
    }
}

pub(crate) fn summarize_daily(date: &str, records: &[CallRecord]) -> DailySummary {
    let mut total = 0.0;
    let mut by_provider: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_project: BTreeMap<String, f64> = BTreeMap::new();

    for record in records {
        total += record.cost_usd;
        *by_provider.entry(record.provider.clone()).or_default() += record.cost_usd;
        *by_project.entry(record.project.clone()).or_default() += record.cost_usd;
    }

    round_groups(&mut by_provider, 4);
    round_groups(&mut by_project, 4);

    DailySummary {
        date: date.to_string(),
        total_cost_usd: round_usd(total, 4),
        call_count: records.len(),
        by_provider,
        by_project,
    }
}

pub(crate) fn summarize_monthly(year_month: &str, records: &[CallRecord]) -> MonthlySummary {
    let mut total = 0.0;
    let mut by_provider: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_project: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_date: BTreeMap<String, f64> = BTreeMap::new();

    for record in records {
        total += record.cost_usd;
        *by_provider.entry(record.provider.clone()).or_default() += record.cost_usd;
        *by_project.entry(record.project.clone()).or_default() += record.cost_usd;
        *by_date.entry(record.date.clone()).or_default() += record.cost_usd;
    }

    round_groups(&mut by_provider, 2);
    round_groups(&mut by_project, 2);
    round_groups(&mut by_date, 2);

    MonthlySummary {
        year_month: year_month.to_string(),
        total_cost_usd: round_usd(total, 2),
        call_count: records.len(),
        by_provider,
        by_project,
        by_date,
    }
}
