use comfy_table::{
    Cell, Color, ContentArrangement, Table, modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};
use std::collections::BTreeMap;

use crate::core::{CallRecord, DailySummary, MonthlySummary};
use crate::output::format::{
    format_cost, format_number, header_cell, right_cell, sorted_by_cost,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn cost_color(use_color: bool) -> Option<Color> {
    use_color.then_some(Color::Green)
}

fn add_group_rows(
    table: &mut Table,
    group: &str,
    entries: &BTreeMap<String, f64>,
    decimals: usize,
    use_color: bool,
) {
    for (name, cost) in sorted_by_cost(entries) {
        table.add_row(vec![
            Cell::new(group),
            Cell::new(name),
            right_cell(&format_cost(cost, decimals), cost_color(use_color), use_color),
        ]);
    }
}

fn print_group_table(
    groups: &[(&str, &BTreeMap<String, f64>)],
    decimals: usize,
    use_color: bool,
) {
    let mut table = new_table();
    table.set_header(vec![
        header_cell("Group", use_color),
        header_cell("Name", use_color),
        header_cell("Cost", use_color),
    ]);
    for &(label, entries) in groups {
        add_group_rows(&mut table, label, entries, decimals, use_color);
    }
    println!("{table}");
}

pub(crate) fn print_daily_table(summary: &DailySummary, use_color: bool) {
    println!(
        "\nDaily cost for {}: {} across {} calls\n",
        summary.date,
        format_cost(summary.total_cost_usd, 4),
        format_number(summary.call_count as i64)
    );
    if summary.call_count == 0 {
        return;
    }
    print_group_table(
        &[
            ("provider", &summary.by_provider),
            ("project", &summary.by_project),
        ],
        4,
        use_color,
    );
}

pub(crate) fn print_monthly_table(summary: &MonthlySummary, use_color: bool) {
    println!(
        "\nMonthly cost for {}: {} across {} calls\n",
        summary.year_month,
        format_cost(summary.total_cost_usd, 2),
        format_number(summary.call_count as i64)
    );
    if summary.call_count == 0 {
        return;
    }
    print_group_table(
        &[
            ("provider", &summary.by_provider),
            ("project", &summary.by_project),
            ("date", &summary.by_date),
        ],
        2,
        use_color,
    );
}

pub(crate) fn print_records_table(records: &[CallRecord], use_color: bool) {
    if records.is_empty() {
        println!("No records found.");
        return;
    }

    let mut table = new_table();
    table.set_header(vec![
        header_cell("Date", use_color),
        header_cell("Provider", use_color),
        header_cell("API", use_color),
        header_cell("Project", use_color),
        header_cell("Input", use_color),
        header_cell("Output", use_color),
        header_cell("Pages", use_color),
        header_cell("Cost", use_color),
        header_cell("Note", use_color),
    ]);

    let mut total = 0.0;
    for record in records {
        total += record.cost_usd;
        table.add_row(vec![
            Cell::new(&record.date),
            Cell::new(&record.provider),
            Cell::new(&record.api),
            Cell::new(&record.project),
            right_cell(&format_number(record.input_tokens), None, false),
            right_cell(&format_number(record.output_tokens), None, false),
            right_cell(&format_number(record.pages), None, false),
            right_cell(
                &format_cost(record.cost_usd, 4),
                cost_color(use_color),
                use_color,
            ),
            Cell::new(&record.note),
        ]);
    }
    println!("{table}");
    println!(
        "  {} records, {} total",
        format_number(records.len() as i64),
        format_cost(total, 4)
    );
}

pub(crate) fn print_logged_record(record: &CallRecord) {
    println!(
        "Logged {}/{} for {}: {}",
        record.provider,
        record.api,
        record.project,
        format_cost(record.cost_usd, 4)
    );
    if !record.note.is_empty() {
        println!("  note: {}", record.note);
    }
}
