//! Adaptive Gauss–Kronrod quadrature and the LAB angular integral.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f64::consts::PI;

use crxs_core::{CrxsError, ErrorInfo};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::frame::LabPoint;

fn default_abs_tol() -> f64 {
    1e-12
}

fn default_rel_tol() -> f64 {
    1e-5
}

fn default_max_evals() -> usize {
    60_000
}

fn default_initial_panels() -> usize {
    24
}

/// Options controlling the adaptive angular integration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IntegrationOpts {
    /// Absolute error target (mbarn/GeV).
    #[serde(default = "default_abs_tol")]
    pub abs_tol: f64,
    /// Relative error target.
    #[serde(default = "default_rel_tol")]
    pub rel_tol: f64,
    /// Integrand evaluation budget before giving up.
    #[serde(default = "default_max_evals")]
    pub max_evals: usize,
    /// Number of equal panels the range is split into before refinement.
    #[serde(default = "default_initial_panels")]
    pub initial_panels: usize,
}

impl Default for IntegrationOpts {
    fn default() -> Self {
        Self {
            abs_tol: default_abs_tol(),
            rel_tol: default_rel_tol(),
            max_evals: default_max_evals(),
            initial_panels: default_initial_panels(),
        }
    }
}

impl IntegrationOpts {
    fn tolerance(&self, value: f64) -> f64 {
        self.abs_tol.max(self.rel_tol * value.abs())
    }
}

/// Result of a converged quadrature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrature {
    /// Integral estimate.
    pub value: f64,
    /// Estimated absolute error.
    pub error: f64,
    /// Integrand evaluations spent.
    pub evals: usize,
}

// Kronrod abscissae on [0, 1]; odd indices are the embedded Gauss nodes.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

const GK_POINTS: usize = 15;

#[derive(Debug, Clone, Copy)]
struct Panel {
    lo: f64,
    hi: f64,
    value: f64,
    error: f64,
}

impl PartialEq for Panel {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Panel {}

impl PartialOrd for Panel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Panel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}

fn gauss_kronrod<F>(f: &mut F, lo: f64, hi: f64) -> Result<Panel, CrxsError>
where
    F: FnMut(f64) -> Result<f64, CrxsError>,
{
    let centre = 0.5 * (lo + hi);
    let half = 0.5 * (hi - lo);
    let fc = f(centre)?;
    let mut gauss = fc * WG[3];
    let mut kronrod = fc * WGK[7];
    for (j, &x) in XGK.iter().take(7).enumerate() {
        let dx = half * x;
        let pair = f(centre - dx)? + f(centre + dx)?;
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }
    let value = kronrod * half;
    if !value.is_finite() {
        return Err(CrxsError::IntegrationNonConvergence(
            ErrorInfo::new("non-finite-integrand", "integrand produced a non-finite value")
                .with_context("lo", lo)
                .with_context("hi", hi),
        ));
    }
    Ok(Panel {
        lo,
        hi,
        value,
        error: ((kronrod - gauss) * half).abs(),
    })
}

/// Integrates `f` over `[lo, hi]` by adaptive bisection of the worst panel.
pub fn integrate<F>(mut f: F, lo: f64, hi: f64, opts: &IntegrationOpts) -> Result<Quadrature, CrxsError>
where
    F: FnMut(f64) -> Result<f64, CrxsError>,
{
    if !(lo.is_finite() && hi.is_finite()) || hi < lo {
        return Err(CrxsError::Kinematic(
            ErrorInfo::new("invalid-range", "integration range must be finite and ordered")
                .with_context("lo", lo)
                .with_context("hi", hi),
        ));
    }
    if hi == lo {
        return Ok(Quadrature {
            value: 0.0,
            error: 0.0,
            evals: 0,
        });
    }

    let panels = opts.initial_panels.max(1);
    let width = (hi - lo) / panels as f64;
    let mut heap = BinaryHeap::with_capacity(panels * 2);
    for i in 0..panels {
        let a = lo + width * i as f64;
        let b = if i + 1 == panels { hi } else { a + width };
        heap.push(gauss_kronrod(&mut f, a, b)?);
    }
    let mut evals = panels * GK_POINTS;

    loop {
        let value: f64 = heap.iter().map(|panel| panel.value).sum();
        let error: f64 = heap.iter().map(|panel| panel.error).sum();
        if error <= opts.tolerance(value) {
            debug!(value, error, evals, panels = heap.len(), "quadrature converged");
            return Ok(Quadrature {
                value,
                error,
                evals,
            });
        }
        if evals + 2 * GK_POINTS > opts.max_evals {
            warn!(value, error, evals, "quadrature exhausted its evaluation budget");
            return Err(CrxsError::IntegrationNonConvergence(
                ErrorInfo::new("budget-exhausted", "adaptive quadrature ran out of evaluations")
                    .with_context("value", value)
                    .with_context("error", error)
                    .with_context("max_evals", opts.max_evals)
                    .with_hint("raise max_evals or loosen rel_tol"),
            ));
        }
        let Some(worst) = heap.pop() else {
            break;
        };
        let mid = 0.5 * (worst.lo + worst.hi);
        heap.push(gauss_kronrod(&mut f, worst.lo, mid)?);
        heap.push(gauss_kronrod(&mut f, mid, worst.hi)?);
        evals += 2 * GK_POINTS;
    }

    Err(CrxsError::IntegrationNonConvergence(ErrorInfo::new(
        "empty-partition",
        "no panels left to refine",
    )))
}

/// Energy-differential cross section dσ/dT of a product of total kinetic
/// energy `t_product` from the invariant cross section in the LAB frame.
///
/// dσ/dT = 2π p ∫ (E d³σ/dp³)(cos θ) d cos θ over `[cos_min, 1]`, where
/// `cos_min` (clamped to `[-1, 1]`) bounds the cone outside of which the
/// integrand vanishes. Pass `-1.0` for the full solid angle. The invariant
/// function receives LAB points carrying the product's total kinetic energy
/// and η = atanh(cos θ).
pub fn energy_differential<F>(
    mut invariant: F,
    tn_proj: f64,
    t_product: f64,
    product_mass: f64,
    cos_min: f64,
    opts: &IntegrationOpts,
) -> Result<f64, CrxsError>
where
    F: FnMut(&LabPoint) -> Result<f64, CrxsError>,
{
    if !t_product.is_finite() || t_product < 0.0 {
        return Err(CrxsError::Kinematic(
            ErrorInfo::new(
                "invalid-product-energy",
                "product kinetic energy must be finite and non-negative",
            )
            .with_context("t_product", t_product),
        ));
    }
    if cos_min.is_nan() {
        return Err(CrxsError::Kinematic(ErrorInfo::new(
            "invalid-angular-range",
            "lower cos θ bound must not be NaN",
        )));
    }
    let p = (t_product * (t_product + 2.0 * product_mass)).sqrt();
    if p == 0.0 {
        return Ok(0.0);
    }
    let quadrature = integrate(
        |cos_theta| invariant(&LabPoint::new(tn_proj, t_product, cos_theta.atanh())),
        cos_min.clamp(-1.0, 1.0),
        1.0,
        opts,
    )?;
    Ok(2.0 * PI * p * quadrature.value)
}
