use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use crxs_core::{kinematic_error, s_from_kinetic, CmPoint, CoalescenceModel, CrxsError};
use crxs_xs::{checked_p_coal, CoalescenceMomentum, XsOpts};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct PCoalArgs {
    /// Coalescence model name.
    #[arg(long, default_value = "ENERGY_DEP__VAN_DOETINCHEM")]
    pub model: CoalescenceModel,
    /// Projectile kinetic energies per nucleon (GeV).
    #[arg(long = "tn-proj", required = true, num_args = 1..)]
    pub tn_proj: Vec<f64>,
    /// YAML options overriding the model parameters.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct PCoalRow {
    tn_proj: f64,
    sqrt_s: f64,
    p_coal: f64,
}

fn p_coal_row<M>(model: &M, tn_proj: f64) -> Result<PCoalRow, CrxsError>
where
    M: CoalescenceMomentum + ?Sized,
{
    if !tn_proj.is_finite() || tn_proj <= 0.0 {
        return Err(kinematic_error(
            "invalid-projectile-energy",
            format!("projectile kinetic energy per nucleon must be positive, got {tn_proj}"),
        ));
    }
    let point = CmPoint::new(s_from_kinetic(tn_proj), 0.0, 0.0)?;
    Ok(PCoalRow {
        tn_proj,
        sqrt_s: point.sqrt_s(),
        p_coal: checked_p_coal(model, &point)?,
    })
}

pub fn run(args: &PCoalArgs) -> Result<(), Box<dyn Error>> {
    let opts = match &args.config {
        Some(path) => XsOpts::load(path)?,
        None => XsOpts::default(),
    };
    let model = opts.coalescence.momentum_model(args.model);
    let rows = args
        .tn_proj
        .iter()
        .map(|&tn_proj| p_coal_row(&model, tn_proj))
        .collect::<Result<Vec<_>, _>>()?;
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
