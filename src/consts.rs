/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Ledger file name inside the data directory
pub(crate) const LOG_FILE_NAME: &str = "api_costs.jsonl";

/// Pricing table file name inside the data directory
pub(crate) const PRICING_FILE_NAME: &str = "pricing.toml";
