pub(crate) mod date;
pub(crate) mod money;

pub(crate) use date::{YearMonth, parse_date};
pub(crate) use money::round_usd;
