//! HTML page rendering.
//!
//! Turns a rendered grid into a complete printable HTML document: a
//! fixed-layout table with one row per day, row heights sized from the
//! maximum cell occupancy, alternating row backgrounds and per-source
//! cell colors. The `@page` rule targets A4 landscape so the browser's
//! print-to-PDF output paginates cleanly.
//!
//! Free-text concerns (color lookup by source name, keyword
//! substitutions) live here and never leak into the layout core.

use std::collections::BTreeMap;
use std::fmt::Write;

use monthgrid_core::RenderedGrid;

/// Presentation options for the HTML page.
#[derive(Debug, Clone, Default)]
pub struct PageStyle {
    /// Cell background color per source name, applied to populated cells.
    pub colors: BTreeMap<String, String>,

    /// Keyword substitutions applied to every cell's text.
    pub substitutions: BTreeMap<String, String>,
}

const EVEN_ROW_COLOR: &str = "#ffffff";
const ODD_ROW_COLOR: &str = "#f0f0f0";

/// Renders the grid as a complete HTML document.
///
/// `max_cell_entries` sizes the row height so the busiest cell fits
/// without overflowing its day row.
pub fn render_page(rendered: &RenderedGrid, max_cell_entries: usize, style: &PageStyle) -> String {
    let mut html = String::new();
    html.push_str("<head>");
    html.push_str("<meta charset=\"utf-8\">");
    html.push_str("<link rel=\"preconnect\" href=\"https://fonts.googleapis.com\">");
    html.push_str("<link rel=\"preconnect\" href=\"https://fonts.gstatic.com\" crossorigin>");
    html.push_str(
        "<link href=\"https://fonts.googleapis.com/css2?family=Roboto:wght@300;400;700&display=swap\" rel=\"stylesheet\">",
    );
    push_styles(&mut html, max_cell_entries);
    html.push_str("</head>");

    html.push_str("<body>");
    html.push_str("<table>");
    for (idx, row) in rendered.rows().iter().enumerate() {
        html.push_str("<tr class=\"row\">");
        for (cell, name) in row.iter().zip(rendered.header()) {
            let cell = substitute(cell, &style.substitutions);
            let classes = if idx == 0 { "cell header" } else { "cell" };
            let bg_color = cell_color(&cell, name, idx, style);
            let _ = write!(
                html,
                "<td class=\"{classes}\" style=\"background-color:{bg_color};\">{cell}</td>"
            );
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html.push_str("</body>");
    html
}

fn push_styles(html: &mut String, max_cell_entries: usize) {
    html.push_str("<style type='text/css' media='all'>");
    html.push_str("@page {");
    html.push_str("size: A4 landscape;");
    html.push_str("margin: 0.2cm;");
    html.push_str("}");
    html.push_str("table {");
    html.push_str("width: 100%;");
    html.push_str("table-layout: fixed;");
    html.push_str("border-collapse: collapse;");
    html.push_str("}");
    html.push_str("td {");
    html.push_str("font-family: 'Roboto', sans-serif;");
    html.push_str("vertical-align: top;");
    html.push_str("font-size: 0.6rem;");
    html.push_str("padding-top: 0.2rem;");
    let _ = write!(html, "height: {:.1}rem;", row_height_rem(max_cell_entries));
    html.push_str("line-height: 1.5;");
    html.push_str("}");
    html.push_str(".cell {");
    html.push_str("vertical-align: top;");
    html.push_str("white-space: nowrap;");
    html.push_str("overflow: hidden;");
    html.push_str("font-weight: bold;");
    html.push_str("border-top: 1px solid gray;");
    html.push_str("}");
    html.push_str(".header {");
    html.push_str("font-size: 1rem;");
    html.push_str("vertical-align: center;");
    html.push_str("font-weight: bold;");
    html.push_str("}");
    html.push_str("</style>");
}

/// Row height in rem: one 0.6rem line at 1.5 line-height per entry of the
/// busiest cell, plus the top padding.
fn row_height_rem(max_cell_entries: usize) -> f64 {
    max_cell_entries as f64 * 0.6 * 1.5 + 0.1
}

/// Populated cells take their source's configured color; everything else
/// alternates by row for readability.
fn cell_color<'a>(cell: &str, source: &str, row_idx: usize, style: &'a PageStyle) -> &'a str {
    if !cell.is_empty()
        && let Some(color) = style.colors.get(source)
    {
        return color;
    }
    if row_idx % 2 == 0 {
        EVEN_ROW_COLOR
    } else {
        ODD_ROW_COLOR
    }
}

fn substitute(cell: &str, substitutions: &BTreeMap<String, String>) -> String {
    let mut text = cell.to_string();
    for (needle, replacement) in substitutions {
        if text.contains(needle.as_str()) {
            text = text.replace(needle.as_str(), replacement);
        }
    }
    text
}
