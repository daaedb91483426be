use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use crxs_tab::{convert_file, write_csv, TableHeader};

#[derive(Args, Debug)]
pub struct ConvertTableArgs {
    /// Whitespace separated input table.
    #[arg(long)]
    pub input: PathBuf,
    /// Annotated fixed-width output file.
    #[arg(long)]
    pub output: PathBuf,
    /// Experiment label written to the header block.
    #[arg(long)]
    pub experiment: String,
    /// Reaction written to the header block.
    #[arg(long, default_value = "p + p -> pbar + X")]
    pub reaction: String,
    /// Table number used in the `Tab` markers.
    #[arg(long, default_value_t = 1)]
    pub table: u32,
    /// Also write the converted rows as CSV.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub fn run(args: &ConvertTableArgs) -> Result<(), Box<dyn Error>> {
    let header = TableHeader {
        experiment: args.experiment.clone(),
        reaction: args.reaction.clone(),
        table: args.table,
    };
    let rows = convert_file(&args.input, &args.output, &header)?;
    if let Some(path) = &args.csv {
        write_csv(path, &rows)?;
    }
    Ok(())
}
