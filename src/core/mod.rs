//! Core module - records, filters, and summary aggregation

mod aggregator;
mod types;

pub(crate) use aggregator::{summarize_daily, summarize_monthly};
pub(crate) use types::{CallRecord, DailySummary, LogFilter, LoggedCall, MonthlySummary, Usage};
