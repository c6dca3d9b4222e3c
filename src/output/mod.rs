mod format;
mod json;
mod table;

pub(crate) use json::{
    output_daily_json, output_monthly_json, output_record_json, output_records_json,
};
pub(crate) use table::{
    print_daily_table, print_logged_record, print_monthly_table, print_records_table,
};
