use crate::core::{CallRecord, DailySummary, MonthlySummary};

pub(crate) fn output_daily_json(summary: &DailySummary) -> String {
    serde_json::to_string_pretty(summary).unwrap_or_default()
}

pub(crate) fn output_monthly_json(summary: &MonthlySummary) -> String {
    serde_json::to_string_pretty(summary).unwrap_or_default()
}

pub(crate) fn output_records_json(records: &[CallRecord]) -> String {
    serde_json::to_string_pretty(records).unwrap_or_default()
}

pub(crate) fn output_record_json(record: &CallRecord) -> String {
    serde_json::to_string_pretty(record).unwrap_or_default()
}
