use std::collections::BTreeMap;

use comfy_table::{Attribute, Cell, CellAlignment, Color};

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color { cell.fg(Color::Cyan) } else { cell }
}

pub(super) fn right_cell(text: &str, color: Option<Color>, use_color: bool) -> Cell {
    let cell = Cell::new(text).set_alignment(CellAlignment::Right);
    match color {
        Some(c) if use_color => cell.fg(c),
        _ => cell,
    }
}

pub(super) fn format_cost(cost: f64, decimals: usize) -> String {
    format!("${cost:.decimals$}")
}

pub(super) fn format_number(n: i64) -> String {
    let (sign, digits) = if n < 0 {
        ("-", (-n).to_string())
    } else {
        ("", n.to_string())
    };
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let formatted: String = result.chars().rev().collect();
    format!("{sign}{formatted}")
}

/// Group entries sorted by descending cost, name ascending as tiebreak
pub(super) fn sorted_by_cost(groups: &BTreeMap<String, f64>) -> Vec<(&str, f64)> {
    let mut entries: Vec<(&str, f64)> = groups
        .iter()
        .map(|(name, cost)| (name.as_str(), *cost))
        .collect();
    entries.sort_by(|(a_name, a_cost), (b_name, b_cost)| {
        b_cost
            .partial_cmp(a_cost)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a_name.cmp(b_name))
    });
    entries
}
