//! Append-only JSONL cost ledger
//!
//! One record per line, UTF-8, never rewritten. Reads re-parse the whole
//! file on every query; there is no cache to invalidate.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use chrono::{Local, NaiveDate, SecondsFormat};

use crate::config::Settings;
use crate::consts::DATE_FORMAT;
use crate::core::{
    CallRecord, DailySummary, LogFilter, LoggedCall, MonthlySummary, summarize_daily,
    summarize_monthly,
};
use crate::error::AppError;
use crate::pricing::PricingResolver;
use crate::utils::{YearMonth, round_usd};

pub(crate) struct Ledger {
    log_path: PathBuf,
    resolver: PricingResolver,
}

impl Ledger {
    pub(crate) fn new(settings: &Settings) -> Self {
        Ledger {
            log_path: settings.log_path.clone(),
            resolver: PricingResolver::new(settings.pricing_path.clone()),
        }
    }

    /// Append one call to the ledger and return the record as written.
    /// Cost comes from the pricing table unless the caller supplied one.
    pub(crate) fn log_call(&self, call: LoggedCall) -> Result<CallRecord, AppError> {
        let cost_usd = match call.cost_usd {
            Some(cost) => cost,
            None => self
                .resolver
                .calculate_cost(&call.provider, &call.api, call.usage)?,
        };

        let now = Local::now();
        let record = CallRecord {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, false),
            date: now.format(DATE_FORMAT).to_string(),
            provider: call.provider,
            api: call.api,
            project: call.project,
            input_tokens: call.usage.input_tokens,
            output_tokens: call.usage.output_tokens,
            pages: call.usage.pages,
            cost_usd: round_usd(cost_usd, 4),
            note: call.note,
        };

        self.append(&record)?;
        Ok(record)
    }

    fn append(&self, record: &CallRecord) -> Result<(), AppError> {
        let write_err = |source| AppError::LogWrite {
            path: self.log_path.clone(),
            source,
        };

        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(write_err)?;
        file.write_all(line.as_bytes()).map_err(write_err)
    }

    /// Read every record matching the filter, in file order. A ledger that
    /// does not exist yet reads as empty.
    pub(crate) fn get_logs(&self, filter: &LogFilter) -> Result<Vec<CallRecord>, AppError> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(AppError::LogRead {
                    path: self.log_path.clone(),
                    source: err,
                });
            }
        };

        let reader = BufReader::new(file);
        let mut records = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|err| AppError::LogRead {
                path: self.log_path.clone(),
                source: err,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<CallRecord>(&line) {
                Ok(record) => {
                    if filter.matches(&record) {
                        records.push(record);
                    }
                }
                Err(err) => {
                    // Malformed lines are skipped, not fatal; the rest of
                    // the ledger is still usable.
                    eprintln!(
                        "Skipping malformed record at {}:{}: {}",
                        self.log_path.display(),
                        line_no + 1,
                        err
                    );
                }
            }
        }
        Ok(records)
    }

    /// Summary for one calendar day, defaulting to today.
    pub(crate) fn daily_summary(&self, date: Option<NaiveDate>) -> Result<DailySummary, AppError> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let date_str = date.format(DATE_FORMAT).to_string();
        let records = self.get_logs(&LogFilter::for_day(&date_str))?;
        Ok(summarize_daily(&date_str, &records))
    }

    /// Summary for one calendar month, defaulting to the current month.
    pub(crate) fn monthly_summary(
        &self,
        month: Option<YearMonth>,
    ) -> Result<MonthlySummary, AppError> {
        let month = month.unwrap_or_else(YearMonth::current);
        // The window end is the first day of the following month, but the
        // end_date filter is inclusive, so a record dated exactly on that
        // day is counted here. Kept for parity with existing consumers of
        // the log.
        let (start, end) = month.window();
        let filter = LogFilter {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        };
        let records = self.get_logs(&filter)?;
        Ok(summarize_monthly(&month.to_string(), &records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Usage;

    fn test_settings(dir: &tempfile::TempDir) -> Settings {
        Settings {
            log_path: dir.path().join("api_costs.jsonl"),
            pricing_path: dir.path().join("pricing.toml"),
        }
    }

    fn write_pricing(settings: &Settings, pricing: &str) {
        fs::write(&settings.pricing_path, pricing).expect("write pricing");
    }

    fn write_ledger_lines(settings: &Settings, lines: &[&str]) {
        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(&settings.log_path, content).expect("write ledger");
    }

    fn ledger_line(date: &str, provider: &str, project: &str, cost: f64) -> String {
        format!(
            r#"{{"timestamp":"{date}T10:00:00+00:00","date":"{date}","provider":"{provider}","api":"api","project":"{project}","input_tokens":0,"output_tokens":0,"pages":0,"cost_usd":{cost},"note":""}}"#
        )
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn log_call_roundtrips_through_get_logs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = test_settings(&dir);
        write_pricing(
            &settings,
            "[upstage.document_parse]\nunit = \"page\"\nprice_usd = 0.01\n",
        );
        let ledger = Ledger::new(&settings);

        let written = ledger
            .log_call(LoggedCall {
                provider: "upstage".to_string(),
                api: "document_parse".to_string(),
                project: "proj1".to_string(),
                usage: Usage {
                    pages: 72,
                    ..Default::default()
                },
                note: "회의록.pdf".to_string(),
                cost_usd: None,
            })
            .unwrap();
        assert_eq!(written.cost_usd, 0.72);

        let read = ledger.get_logs(&LogFilter::default()).unwrap();
        assert_eq!(read, vec![written]);
    }

    #[test]
    fn log_call_prices_tokens_from_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = test_settings(&dir);
        write_pricing(
            &settings,
            "[openai.\"gpt-4o-mini\"]\ninput_per_1m = 0.15\noutput_per_1m = 0.6\n",
        );
        let ledger = Ledger::new(&settings);

        let record = ledger
            .log_call(LoggedCall {
                provider: "openai".to_string(),
                api: "gpt-4o-mini".to_string(),
                project: "proj1".to_string(),
                usage: Usage {
                    input_tokens: 1_000_000,
                    output_tokens: 500_000,
                    pages: 0,
                },
                note: String::new(),
                cost_usd: None,
            })
            .unwrap();
        assert_eq!(record.cost_usd, 0.45);
    }

    #[test]
    fn explicit_cost_skips_the_pricing_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = test_settings(&dir);
        let ledger = Ledger::new(&settings);

        let record = ledger
            .log_call(LoggedCall {
                provider: "upstage".to_string(),
                api: "document_parse".to_string(),
                project: "proj1".to_string(),
                usage: Usage::default(),
                note: String::new(),
                cost_usd: Some(1.23456),
            })
            .unwrap();
        assert_eq!(record.cost_usd, 1.2346);
    }

    #[test]
    fn unknown_provider_logs_at_zero_cost() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = test_settings(&dir);
        let ledger = Ledger::new(&settings);

        let record = ledger
            .log_call(LoggedCall {
                provider: "nobody".to_string(),
                api: "nothing".to_string(),
                project: "proj1".to_string(),
                usage: Usage {
                    input_tokens: 1_000_000,
                    ..Default::default()
                },
                note: String::new(),
                cost_usd: None,
            })
            .unwrap();
        assert_eq!(record.cost_usd, 0.0);
    }

    #[test]
    fn appends_preserve_existing_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = test_settings(&dir);
        let ledger = Ledger::new(&settings);

        for project in ["a", "b", "c"] {
            ledger
                .log_call(LoggedCall {
                    provider: "p".to_string(),
                    api: "api".to_string(),
                    project: project.to_string(),
                    ..Default::default()
                })
                .unwrap();
        }

        let read = ledger.get_logs(&LogFilter::default()).unwrap();
        let projects: Vec<&str> = read.iter().map(|r| r.project.as_str()).collect();
        assert_eq!(projects, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_ledger_reads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = test_settings(&dir);
        let ledger = Ledger::new(&settings);
        assert!(ledger.get_logs(&LogFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn blank_and_malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = test_settings(&dir);
        write_ledger_lines(
            &settings,
            &[
                &ledger_line("2024-01-15", "openai", "proj1", 0.1),
                "",
                "   ",
                "{not json",
                &ledger_line("2024-01-16", "openai", "proj1", 0.2),
            ],
        );
        let ledger = Ledger::new(&settings);

        let read = ledger.get_logs(&LogFilter::default()).unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[0].date, "2024-01-15");
        assert_eq!(read[1].date, "2024-01-16");
    }

    #[test]
    fn get_logs_applies_all_filters_together() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = test_settings(&dir);
        write_ledger_lines(
            &settings,
            &[
                &ledger_line("2024-01-15", "openai", "proj1", 0.1),
                &ledger_line("2024-01-15", "openai", "proj2", 0.2),
                &ledger_line("2024-01-15", "upstage", "proj1", 0.3),
                &ledger_line("2024-02-01", "openai", "proj1", 0.4),
            ],
        );
        let ledger = Ledger::new(&settings);

        let filter = LogFilter {
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-01-31".to_string()),
            provider: Some("openai".to_string()),
            project: Some("proj1".to_string()),
        };
        let read = ledger.get_logs(&filter).unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].cost_usd, 0.1);
    }

    #[test]
    fn daily_summary_for_explicit_date() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = test_settings(&dir);
        write_ledger_lines(
            &settings,
            &[
                &ledger_line("2024-01-15", "upstage", "proj1", 0.1),
                &ledger_line("2024-01-15", "upstage", "proj2", 0.2),
                &ledger_line("2024-01-15", "openai", "proj1", 0.3),
                &ledger_line("2024-01-16", "openai", "proj1", 9.9),
            ],
        );
        let ledger = Ledger::new(&settings);

        let summary = ledger.daily_summary(Some(day("2024-01-15"))).unwrap();
        assert_eq!(summary.total_cost_usd, 0.6);
        assert_eq!(summary.call_count, 3);
        assert_eq!(summary.by_provider["upstage"], 0.3);
        assert_eq!(summary.by_provider["openai"], 0.3);
    }

    #[test]
    fn daily_summary_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = test_settings(&dir);
        write_ledger_lines(
            &settings,
            &[&ledger_line("2024-01-15", "openai", "proj1", 0.25)],
        );
        let ledger = Ledger::new(&settings);

        let first = ledger.daily_summary(Some(day("2024-01-15"))).unwrap();
        let second = ledger.daily_summary(Some(day("2024-01-15"))).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn monthly_summary_windows_one_month() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = test_settings(&dir);
        write_ledger_lines(
            &settings,
            &[
                &ledger_line("2024-01-31", "openai", "proj1", 1.0),
                &ledger_line("2024-02-05", "openai", "proj1", 2.0),
                &ledger_line("2024-02-20", "upstage", "proj2", 3.0),
                &ledger_line("2024-03-02", "openai", "proj1", 4.0),
            ],
        );
        let ledger = Ledger::new(&settings);

        let summary = ledger
            .monthly_summary(Some(YearMonth::parse("2024-02").unwrap()))
            .unwrap();
        assert_eq!(summary.year_month, "2024-02");
        assert_eq!(summary.total_cost_usd, 5.0);
        assert_eq!(summary.call_count, 2);
        assert_eq!(summary.by_date["2024-02-05"], 2.0);
        assert_eq!(summary.by_date["2024-02-20"], 3.0);
    }

    #[test]
    fn monthly_summary_includes_next_month_boundary_day() {
        // The window end lands on the next month's first day and the date
        // filter is inclusive, so records dated exactly there are counted.
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = test_settings(&dir);
        write_ledger_lines(
            &settings,
            &[
                &ledger_line("2024-12-15", "openai", "proj1", 1.0),
                &ledger_line("2025-01-01", "openai", "proj1", 2.0),
                &ledger_line("2025-01-02", "openai", "proj1", 4.0),
            ],
        );
        let ledger = Ledger::new(&settings);

        let summary = ledger
            .monthly_summary(Some(YearMonth::parse("2024-12").unwrap()))
            .unwrap();
        assert_eq!(summary.total_cost_usd, 3.0);
        assert_eq!(summary.call_count, 2);
    }
}
