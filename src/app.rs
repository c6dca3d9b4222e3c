//! Command handlers wiring the ledger to CLI output

use crate::cli::{Cli, Commands, LogArgs, LogsArgs};
use crate::config::Settings;
use crate::core::{LogFilter, LoggedCall, Usage};
use crate::error::AppError;
use crate::ledger::Ledger;
use crate::output::{
    output_daily_json, output_monthly_json, output_record_json, output_records_json,
    print_daily_table, print_logged_record, print_monthly_table, print_records_table,
};
use crate::utils::{YearMonth, parse_date};

pub(crate) fn run(cli: Cli, settings: Settings) -> Result<(), AppError> {
    let ledger = Ledger::new(&settings);
    let json = cli.json;
    let use_color = cli.use_color();

    match cli.command {
        None | Some(Commands::Today) => handle_today(&ledger, json, use_color),
        Some(Commands::Month { month }) => handle_month(&ledger, month, json, use_color),
        Some(Commands::Log(args)) => handle_log(&ledger, args, json),
        Some(Commands::Logs(args)) => handle_logs(&ledger, args, json, use_color),
    }
}

fn handle_today(ledger: &Ledger, json: bool, use_color: bool) -> Result<(), AppError> {
    let summary = ledger.daily_summary(None)?;
    if json {
        println!("{}", output_daily_json(&summary));
    } else {
        print_daily_table(&summary, use_color);
    }
    Ok(())
}

fn handle_month(
    ledger: &Ledger,
    month: Option<String>,
    json: bool,
    use_color: bool,
) -> Result<(), AppError> {
    let month = month.as_deref().map(YearMonth::parse).transpose()?;
    let summary = ledger.monthly_summary(month)?;
    if json {
        println!("{}", output_monthly_json(&summary));
    } else {
        print_monthly_table(&summary, use_color);
    }
    Ok(())
}

fn handle_log(ledger: &Ledger, args: LogArgs, json: bool) -> Result<(), AppError> {
    let record = ledger.log_call(LoggedCall {
        provider: args.provider,
        api: args.api,
        project: args.project,
        usage: Usage {
            input_tokens: args.input_tokens,
            output_tokens: args.output_tokens,
            pages: args.pages,
        },
        note: args.note,
        cost_usd: args.cost_usd,
    })?;

    if json {
        println!("{}", output_record_json(&record));
    } else {
        print_logged_record(&record);
    }
    Ok(())
}

fn handle_logs(
    ledger: &Ledger,
    args: LogsArgs,
    json: bool,
    use_color: bool,
) -> Result<(), AppError> {
    // Dates are validated here, then compared as strings inside the filter
    let start_date = args
        .since
        .as_deref()
        .map(parse_date)
        .transpose()?
        .map(|d| d.format(crate::consts::DATE_FORMAT).to_string());
    let end_date = args
        .until
        .as_deref()
        .map(parse_date)
        .transpose()?
        .map(|d| d.format(crate::consts::DATE_FORMAT).to_string());

    let filter = LogFilter {
        start_date,
        end_date,
        provider: args.provider,
        project: args.project,
    };
    let records = ledger.get_logs(&filter)?;

    if json {
        println!("{}", output_records_json(&records));
    } else {
        print_records_table(&records, use_color);
    }
    Ok(())
}
