//! Parsing strategies that turn fetched page content into raw records
//!
//! Two shapes are supported:
//! - HTML tables, with or without a `<thead>`, located either as the first
//!   table in the document or by element id
//! - Plain text lists with one `IP:PORT` per line

use crate::proxy::models::RawRecord;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

static TABLE: Lazy<Selector> = Lazy::new(|| selector("table"));
static THEAD: Lazy<Selector> = Lazy::new(|| selector("thead"));
static TH: Lazy<Selector> = Lazy::new(|| selector("th"));
static TR: Lazy<Selector> = Lazy::new(|| selector("tr"));
static TD: Lazy<Selector> = Lazy::new(|| selector("td"));
static HEADER_CELL: Lazy<Selector> = Lazy::new(|| selector("td, th"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("Invalid static CSS selector")
}

/// Build a selector for `<table id="...">`.
///
/// Returns `None` if `id` cannot be expressed as a CSS id selector.
pub fn table_selector_by_id(id: &str) -> Option<Selector> {
    Selector::parse(&format!("table#{}", id)).ok()
}

/// Parse the first `<table>` in the document
pub fn parse_table(html: &str) -> Vec<RawRecord> {
    parse_table_matching(html, &TABLE)
}

/// Parse the first table matching `table`, typically one located by id.
///
/// Produces no records when nothing matches.
pub fn parse_table_matching(html: &str, table: &Selector) -> Vec<RawRecord> {
    let document = Html::parse_document(html);
    let Some(table) = document.select(table).next() else {
        warn!("No proxy table found in page");
        return Vec::new();
    };

    let records = parse_table_element(table);
    debug!("Parsed {} records from HTML table", records.len());
    records
}

fn parse_table_element(table: ElementRef<'_>) -> Vec<RawRecord> {
    let mut headers: Vec<String> = table
        .select(&THEAD)
        .next()
        .map(|thead| thead.select(&TH).map(cell_text).collect())
        .unwrap_or_default();

    // Without a usable <thead>, the first row names the columns.
    if headers.is_empty() {
        if let Some(first_row) = table.select(&TR).next() {
            headers = first_row.select(&HEADER_CELL).map(cell_text).collect();
        }
    }
    let headers: Vec<String> = headers.into_iter().map(|h| h.to_lowercase()).collect();

    table
        .select(&TR)
        .skip(1)
        .filter_map(|row| {
            let cells: Vec<String> = row.select(&TD).map(cell_text).collect();
            row_to_record(&headers, cells)
        })
        .collect()
}

/// Turn one body row into a record.
///
/// A row with no `td` cells (spacer rows, or a `<th>` header row) yields no
/// record, so it is not counted among the scraped records either.
fn row_to_record(headers: &[String], cells: Vec<String>) -> Option<RawRecord> {
    if cells.is_empty() {
        return None;
    }
    if cells.len() == headers.len() {
        return Some(RawRecord::from_columns(headers.iter().cloned(), cells));
    }
    // Irregular row: keep whatever looks like ip/port in the first two cells.
    let mut cells = cells.into_iter();
    match (cells.next(), cells.next()) {
        (Some(ip), Some(port)) => Some(RawRecord::ip_port(ip, port)),
        _ => None,
    }
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Parse a plain text list with one `IP:PORT` per line.
///
/// Lines are trimmed, blank lines and lines without a colon are skipped, and
/// each line is split at its first colon.
pub fn parse_lines(content: &str) -> Vec<RawRecord> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.split_once(':'))
        .map(|(ip, port)| RawRecord::ip_port(ip, port))
        .collect()
}
