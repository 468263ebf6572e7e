use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::OnceLock;

use crate::utils::error::{EtlError, Result};

fn decoration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Currency symbols, thousands separators and stray whitespace.
    RE.get_or_init(|| Regex::new(r"[$€£,\s]").expect("invalid numeric decoration pattern"))
}

/// Strip currency decoration and coerce to f64. Anything left unparseable
/// (em-dashes, mis-encoded placeholders, footnote residue) and any
/// non-finite parse maps to 0.0 instead of failing the run. Idempotent over
/// its own output.
pub fn clean_numeric(raw: &str) -> f64 {
    let stripped = decoration_re().replace_all(raw, "");
    match stripped.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Join a list-valued JSON field into one comma-separated string.
/// A bare scalar passes through; a missing or null field becomes empty.
pub fn join_list(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(","),
        other => text_value(other),
    }
}

/// A scalar JSON field as text. Missing or null fields become empty.
pub fn text_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(v) => scalar_text(v),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Cell text of each data row of the first element matching
/// `table_selector`. Header rows (all cells are `th`) are skipped and
/// whitespace inside a cell is collapsed.
pub fn first_table_rows(html: &str, table_selector: &str) -> Result<Vec<Vec<String>>> {
    let table_sel = Selector::parse(table_selector)
        .map_err(|e| EtlError::shape(format!("invalid table selector '{}': {}", table_selector, e)))?;
    let row_sel = Selector::parse("tr").expect("invalid row selector");
    let cell_sel = Selector::parse("th, td").expect("invalid cell selector");
    let header_sel = Selector::parse("th").expect("invalid header cell selector");

    let document = Html::parse_document(html);
    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| EtlError::shape(format!("no table matching '{}' in page", table_selector)))?;

    let mut rows = Vec::new();
    for tr in table.select(&row_sel) {
        let cells: Vec<String> = tr
            .select(&cell_sel)
            .map(|cell| {
                cell.text()
                    .collect::<String>()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        if cells.is_empty() {
            continue;
        }
        if tr.select(&header_sel).count() == cells.len() {
            continue;
        }
        rows.push(cells);
    }
    Ok(rows)
}
