//! Plain-text rendering of dashboard projections.
//!
//! Column widths are measured in terminal cells, so wide names stay aligned.

use studentdash_core::{
    ChartBar, Dashboard, FilterPredicate, TableRow, EMPTY_CHART_MESSAGE,
};
use unicode_width::UnicodeWidthStr;

/// Character cells used by a full (100) chart bar.
pub const CHART_WIDTH: usize = 40;
const BAR_CHAR: char = '█';
const COLUMN_GAP: &str = "  ";

/// Renders the header plus one line per row, columns padded to fit.
pub fn render_table(header: &[&str], rows: &[TableRow]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|title| title.width()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    push_line(&mut out, header.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        push_line(&mut out, row.cells.iter().map(String::as_str), &widths);
    }
    out
}

/// Renders one labelled horizontal bar per entry on a fixed 0-100 axis.
pub fn render_chart(bars: &[ChartBar]) -> String {
    if bars.is_empty() {
        return format!("{EMPTY_CHART_MESSAGE}\n");
    }

    let label_width = bars
        .iter()
        .map(|bar| bar.label.width())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for bar in bars {
        let cells = (bar.fill * CHART_WIDTH as f64).round() as usize;
        out.push_str(&pad(&bar.label, label_width));
        out.push_str(" |");
        out.extend(std::iter::repeat(BAR_CHAR).take(cells.min(CHART_WIDTH)));
        out.push(' ');
        out.push_str(&bar.value.to_string());
        out.push('\n');
    }
    out
}

/// Numbered predicate listing used by the interactive prompt.
pub fn render_predicates(predicates: &[FilterPredicate]) -> String {
    if predicates.is_empty() {
        return "(no filters)\n".to_string();
    }
    let mut out = String::new();
    for (index, predicate) in predicates.iter().enumerate() {
        let column = predicate
            .column
            .map_or("<unset>", |column| column.key());
        let state = if predicate.is_active() { "" } else { "  (inactive)" };
        out.push_str(&format!(
            "[{index}] {column} contains \"{}\"{state}\n",
            predicate.value
        ));
    }
    out
}

/// Error line (if any), table, and chart for the current view.
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    if let Some(message) = dashboard.error() {
        out.push_str(message);
        out.push_str("\n\n");
    }
    out.push_str(&render_table(
        &Dashboard::table_header(),
        &dashboard.table_rows(),
    ));
    out.push('\n');
    out.push_str(&render_chart(&dashboard.chart_bars()));
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect();
    out.push_str(line.join(COLUMN_GAP).trim_end());
    out.push('\n');
}

fn pad(text: &str, width: usize) -> String {
    let mut padded = text.to_string();
    padded.push_str(&" ".repeat(width.saturating_sub(text.width())));
    padded
}
