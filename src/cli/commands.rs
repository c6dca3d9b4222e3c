//! CLI subcommand definitions

use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show today's cost summary (default)
    Today,
    /// Show a monthly cost summary
    Month {
        /// Month to summarize (YYYY-MM, defaults to the current month)
        month: Option<String>,
    },
    /// Log one API call with explicit usage numbers
    Log(LogArgs),
    /// List raw call records with optional filters
    Logs(LogsArgs),
}

#[derive(Args)]
pub(crate) struct LogArgs {
    /// Provider name (e.g. "upstage", "openai")
    pub(crate) provider: String,

    /// API or model identifier (e.g. "document_parse", "gpt-4o-mini")
    pub(crate) api: String,

    /// Project the call is billed to
    pub(crate) project: String,

    /// Pages processed (page-priced APIs)
    #[arg(long, default_value_t = 0)]
    pub(crate) pages: i64,

    /// Input tokens consumed
    #[arg(long = "input", default_value_t = 0)]
    pub(crate) input_tokens: i64,

    /// Output tokens produced
    #[arg(long = "output", default_value_t = 0)]
    pub(crate) output_tokens: i64,

    /// Free-text note stored on the record
    #[arg(long, default_value = "")]
    pub(crate) note: String,

    /// Explicit cost in USD (skips the pricing table)
    #[arg(long = "cost")]
    pub(crate) cost_usd: Option<f64>,
}

#[derive(Args)]
pub(crate) struct LogsArgs {
    /// Filter from date (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long)]
    pub(crate) since: Option<String>,

    /// Filter until date (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long)]
    pub(crate) until: Option<String>,

    /// Filter by provider
    #[arg(long)]
    pub(crate) provider: Option<String>,

    /// Filter by project
    #[arg(long)]
    pub(crate) project: Option<String>,
}
