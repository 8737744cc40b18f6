//! Terminal table rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use define_cli::Report;

pub fn print_report(report: &Report) {
    if report.is_empty() {
        return;
    }
    println!("{}", render(report));
}

fn render(report: &Report) -> Table {
    let mut table = Table::new();
    table.set_header(report.headers.iter().map(|label| header_cell(label)));
    apply_table_style(&mut table);
    for row in &report.rows {
        let mut cells = row.iter();
        let mut line = Vec::with_capacity(row.len());
        if let Some(first) = cells.next() {
            line.push(key_cell(first));
        }
        line.extend(cells.map(|value| {
            if value.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(value)
            }
        }));
        table.add_row(line);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn key_cell(value: &str) -> Cell {
    Cell::new(value)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
