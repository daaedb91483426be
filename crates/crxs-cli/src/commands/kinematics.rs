use std::error::Error;

use clap::Args;
use crxs_core::constants::MASS_PROTON;
use crxs_core::{is_allowed, max_cm_energy, Product};
use crxs_xs::{to_cm, LabPoint};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct KinematicsArgs {
    /// Projectile kinetic energy per nucleon (GeV).
    #[arg(long)]
    pub tn_proj: f64,
    /// Product kinetic energy per nucleon (GeV).
    #[arg(long)]
    pub tn_product: f64,
    /// Product pseudorapidity in the LAB frame.
    #[arg(long, allow_negative_numbers = true)]
    pub eta: f64,
    /// Product name.
    #[arg(long, default_value = "P_BAR")]
    pub product: Product,
}

#[derive(Debug, Serialize)]
struct CmSummary {
    product: Product,
    s: f64,
    sqrt_s: f64,
    x_f: f64,
    p_t: f64,
    p_l: f64,
    energy: f64,
    max_energy: f64,
    allowed: bool,
}

pub fn run(args: &KinematicsArgs) -> Result<(), Box<dyn Error>> {
    let product = args.product;
    let lab = LabPoint::new(
        args.tn_proj,
        f64::from(product.mass_number()) * args.tn_product,
        args.eta,
    );
    let state = to_cm(&lab, MASS_PROTON, product.mass())?;
    let summary = CmSummary {
        product,
        s: state.s,
        sqrt_s: state.s.sqrt(),
        x_f: state.x_f(),
        p_t: state.p_t,
        p_l: state.p_l,
        energy: state.energy,
        max_energy: max_cm_energy(state.s, product),
        allowed: is_allowed(state.s, state.energy, product),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
