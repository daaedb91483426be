use std::fs;
use std::path::Path;

use crxs_core::{CrxsError, ErrorInfo};
use tracing::debug;

use crate::row::TableRow;

const COLUMNS: usize = 7;

fn parse_error(code: &str, line: usize, detail: impl ToString) -> CrxsError {
    CrxsError::Table(ErrorInfo::new(code, detail.to_string()).with_context("line", line))
}

/// Parses whitespace separated rows of
/// `p_LAB pT xF CS stat% sys% scale%`. Blank lines and `#` comments are skipped.
pub fn parse_rows(text: &str) -> Result<Vec<TableRow>, CrxsError> {
    let mut rows = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields = trimmed
            .split_whitespace()
            .map(|field| {
                field.parse::<f64>().map_err(|err| {
                    parse_error("parse-number", line_no, format!("`{field}`: {err}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if fields.len() != COLUMNS {
            return Err(parse_error(
                "column-count",
                line_no,
                format!("expected {COLUMNS} columns, found {}", fields.len()),
            ));
        }
        rows.push(TableRow {
            p_lab: fields[0],
            p_t: fields[1],
            x_f: fields[2],
            cs: fields[3],
            stat_pct: fields[4],
            sys_pct: fields[5],
            scale_pct: fields[6],
        });
    }
    debug!(rows = rows.len(), "parsed cross-section table");
    Ok(rows)
}

pub fn read_rows(path: &Path) -> Result<Vec<TableRow>, CrxsError> {
    let text = fs::read_to_string(path).map_err(|err| {
        CrxsError::Table(
            ErrorInfo::new("table-read", err.to_string()).with_context("path", path.display()),
        )
    })?;
    parse_rows(&text)
}
