//! Conversion of published invariant cross-section tables into annotated fixed-width text.

pub mod export;
pub mod ingest;
pub mod row;

pub use export::{convert_file, render_table, write_csv, write_table, TableHeader};
pub use ingest::{parse_rows, read_rows};
pub use row::{ConvertedRow, TableRow};
