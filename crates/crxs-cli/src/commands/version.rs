use std::error::Error;

use clap::Args;
use crxs_core::{CoalescenceModel, Parametrization, Product};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Also list the recognised parametrization, product and coalescence names.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: &'static str,
    parametrizations: Vec<(&'static str, u8)>,
    products: Vec<(&'static str, u8)>,
    coalescence_models: Vec<(&'static str, u8)>,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION"),
        parametrizations: Parametrization::ALL.iter().map(|p| (p.name(), p.id())).collect(),
        products: Product::ALL.iter().map(|p| (p.name(), p.id())).collect(),
        coalescence_models: CoalescenceModel::ALL
            .iter()
            .map(|m| (m.name(), m.id()))
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
