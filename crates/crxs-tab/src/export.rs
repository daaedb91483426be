use std::fs;
use std::path::Path;

use crxs_core::{CrxsError, ErrorInfo};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ingest::read_rows;
use crate::row::ConvertedRow;

const FIELD_WIDTH: usize = 20;

const CAPTIONS: [&str; 9] = [
    "sqrt(s)", "pT", "xR", "pT", "xf", "inv CS", "CS_stat", "CS_sys", "err_scale",
];

fn write_error(code: &str, path: &Path, err: impl ToString) -> CrxsError {
    CrxsError::Table(ErrorInfo::new(code, err.to_string()).with_context("path", path.display()))
}

/// Descriptive block written ahead of the converted rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableHeader {
    /// Experiment and publication reference.
    pub experiment: String,
    /// Reaction, e.g. `p + C -> pbar + X`.
    pub reaction: String,
    /// Table number used in the `Tab` markers.
    pub table: u32,
}

fn push_fields<I>(out: &mut String, lead: &str, fields: I)
where
    I: IntoIterator,
    I::Item: std::fmt::Display,
{
    out.push_str(lead);
    let cells: Vec<String> = fields
        .into_iter()
        .map(|field| format!("{:<width$}", field.to_string(), width = FIELD_WIDTH))
        .collect();
    out.push_str(&cells.join(" "));
    out.push('\n');
}

/// Renders the annotated fixed-width table, one output line per row.
pub fn render_table(header: &TableHeader, rows: &[ConvertedRow]) -> String {
    let mut out = format!(
        "# {}\n# {}\n#\n#\n# Tab {}\n",
        header.experiment, header.reaction, header.table
    );
    push_fields(&mut out, "#*  ", CAPTIONS);
    for row in rows {
        push_fields(
            &mut out,
            "   ",
            [
                row.sqrt_s, row.p_t, row.x_r, row.p_t, row.x_f, row.cs, row.stat, row.sys,
                row.scale,
            ],
        );
    }
    out.push_str(&format!("#\n#End Tab {}\n#\n", header.table));
    out
}

pub fn write_table(
    path: &Path,
    header: &TableHeader,
    rows: &[ConvertedRow],
) -> Result<(), CrxsError> {
    fs::write(path, render_table(header, rows)).map_err(|err| write_error("table-write", path, err))
}

/// Writes the converted rows as CSV with a header record.
pub fn write_csv(path: &Path, rows: &[ConvertedRow]) -> Result<(), CrxsError> {
    let mut wtr =
        csv::Writer::from_path(path).map_err(|err| write_error("csv-write", path, err))?;
    for row in rows {
        wtr.serialize(row)
            .map_err(|err| write_error("csv-write", path, err))?;
    }
    wtr.flush().map_err(|err| write_error("csv-write", path, err))
}

/// Reads a raw table, converts every row and writes the annotated text.
pub fn convert_file(
    input: &Path,
    output: &Path,
    header: &TableHeader,
) -> Result<Vec<ConvertedRow>, CrxsError> {
    let rows = read_rows(input)?;
    let converted = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            row.convert().map_err(|err| {
                let mut info = err.info().clone();
                info.context.insert("row".to_string(), (idx + 1).to_string());
                CrxsError::Table(info)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    write_table(output, header, &converted)?;
    info!(rows = converted.len(), output = %output.display(), "converted table");
    Ok(converted)
}
