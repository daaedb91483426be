//! Analytic coalescence of antinucleon spectra into light antinuclei.
//!
//! A composite of `A` antinucleons with momentum `k` is built from nucleons
//! sharing `k/A` each, offset along `k̂` by multiples of the coalescence
//! momentum. The product of the nucleon invariant spectra is averaged over
//! every production order; each nucleon produced later sees `√s` reduced by
//! twice the energy of every nucleon produced before it.

use std::f64::consts::PI;

use crxs_core::constants::{MASS_NEUTRON, MASS_PROTON, NOMINAL_P_COAL};
use crxs_core::{
    is_allowed, kinetic_from_s, CmPoint, CoalescenceModel, CrxsError, ErrorInfo,
    InvariantBackend, Nucleus, Parametrization, Product,
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Strategy computing the coalescence momentum p_coal (GeV) at a CM point.
///
/// The composite's `s` is carried by the point. Results must be strictly
/// positive; anything else fails the composition with
/// [`CrxsError::InvalidCoalescenceMomentum`].
pub trait CoalescenceMomentum: Send + Sync {
    /// Coalescence momentum for the composite at `point`.
    fn p_coal(&self, point: &CmPoint) -> f64;
}

impl<F> CoalescenceMomentum for F
where
    F: Fn(&CmPoint) -> f64 + Send + Sync,
{
    fn p_coal(&self, point: &CmPoint) -> f64 {
        self(point)
    }
}

fn default_fixed_p0() -> f64 {
    NOMINAL_P_COAL
}

/// Constant coalescence momentum.
///
/// Spectra computed with the nominal value scale as `(p0 / 80 MeV)³` for
/// antideuterons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedP0 {
    /// Coalescence momentum (GeV).
    #[serde(default = "default_fixed_p0")]
    pub p0: f64,
}

impl Default for FixedP0 {
    fn default() -> Self {
        Self {
            p0: default_fixed_p0(),
        }
    }
}

impl CoalescenceMomentum for FixedP0 {
    fn p_coal(&self, _point: &CmPoint) -> f64 {
        self.p0
    }
}

fn default_vd_a() -> f64 {
    0.0896
}

fn default_vd_b() -> f64 {
    6.6
}

fn default_vd_c() -> f64 {
    0.73
}

/// Energy-dependent coalescence momentum rising with the collision energy.
///
/// p_coal(T) = a / (1 + exp(b - ln(T) / c)) with `T` the equivalent
/// fixed-target kinetic energy per nucleon in GeV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VanDoetinchem {
    /// Asymptotic coalescence momentum (GeV).
    #[serde(default = "default_vd_a")]
    pub a: f64,
    /// Offset of the logistic turn-on.
    #[serde(default = "default_vd_b")]
    pub b: f64,
    /// Width of the logistic turn-on in ln(T).
    #[serde(default = "default_vd_c")]
    pub c: f64,
}

impl Default for VanDoetinchem {
    fn default() -> Self {
        Self {
            a: default_vd_a(),
            b: default_vd_b(),
            c: default_vd_c(),
        }
    }
}

impl CoalescenceMomentum for VanDoetinchem {
    fn p_coal(&self, point: &CmPoint) -> f64 {
        let t = kinetic_from_s(point.s());
        if t <= 0.0 {
            return 0.0;
        }
        self.a / (1.0 + (self.b - t.ln() / self.c).exp())
    }
}

/// One of the two built-in strategies, selected by [`CoalescenceModel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelMomentum {
    /// Constant p_coal.
    Fixed(FixedP0),
    /// Energy-dependent p_coal.
    EnergyDependent(VanDoetinchem),
}

impl ModelMomentum {
    /// Model identifier this strategy answers for.
    pub fn model(&self) -> CoalescenceModel {
        match self {
            ModelMomentum::Fixed(_) => CoalescenceModel::FixedP0,
            ModelMomentum::EnergyDependent(_) => CoalescenceModel::EnergyDepVanDoetinchem,
        }
    }
}

impl CoalescenceMomentum for ModelMomentum {
    fn p_coal(&self, point: &CmPoint) -> f64 {
        match self {
            ModelMomentum::Fixed(model) => model.p_coal(point),
            ModelMomentum::EnergyDependent(model) => model.p_coal(point),
        }
    }
}

/// Antinucleon species entering a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nucleon {
    /// Antiproton.
    AntiProton,
    /// Antineutron.
    AntiNeutron,
}

impl Nucleon {
    /// Rest mass (GeV).
    pub const fn mass(self) -> f64 {
        match self {
            Nucleon::AntiProton => MASS_PROTON,
            Nucleon::AntiNeutron => MASS_NEUTRON,
        }
    }
}

/// CM momentum of a single nucleon inside a composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NucleonMomentum {
    /// Longitudinal momentum (GeV).
    pub p_l: f64,
    /// Transverse momentum (GeV).
    pub p_t: f64,
}

impl NucleonMomentum {
    /// Total energy of a nucleon of the given mass.
    pub fn energy(&self, mass: f64) -> f64 {
        (self.p_l * self.p_l + self.p_t * self.p_t + mass * mass).sqrt()
    }
}

/// Share `k/A` of the composite momentum, shifted by `shift` (GeV) along `k̂`.
///
/// The beam axis is used when the composite is at rest.
pub fn nucleon_momentum(point: &CmPoint, mass_number: u32, shift: f64) -> NucleonMomentum {
    let p_l = point.p_l();
    let p_t = point.p_t();
    let k = p_l.hypot(p_t);
    if k == 0.0 {
        return NucleonMomentum { p_l: shift, p_t: 0.0 };
    }
    let scale = (k / f64::from(mass_number.max(1)) + shift) / k;
    NucleonMomentum {
        p_l: scale * p_l,
        p_t: scale.abs() * p_t,
    }
}

/// Nucleon content of a product with each nucleon's offset in units of p_coal.
pub fn nucleon_layout(product: Product) -> &'static [(Nucleon, f64)] {
    match product {
        Product::PBar => &[(Nucleon::AntiProton, 0.0)],
        Product::DBar => &[(Nucleon::AntiProton, 1.0), (Nucleon::AntiNeutron, -1.0)],
        Product::HeBar => &[
            (Nucleon::AntiProton, 1.0),
            (Nucleon::AntiProton, -1.0),
            (Nucleon::AntiNeutron, 0.0),
        ],
    }
}

/// Averages the product of nucleon spectra over every production order.
///
/// `spectrum` is called with the species and the nucleon's CM point at the
/// `√s` still available to it. A nucleon whose reduced `√s` falls below the
/// antiproton threshold, or whose energy exceeds the limit there, zeroes its
/// ordering without a call.
pub fn symmetrized_spectrum<G>(
    mut spectrum: G,
    sqrt_s: f64,
    nucleons: &[(Nucleon, NucleonMomentum)],
) -> Result<f64, CrxsError>
where
    G: FnMut(Nucleon, &CmPoint) -> f64,
{
    if nucleons.is_empty() {
        return Ok(0.0);
    }
    let threshold = Product::PBar.threshold_sqrt_s();
    let mut total = 0.0;
    let mut orderings = 0usize;
    for order in (0..nucleons.len()).permutations(nucleons.len()) {
        orderings += 1;
        let mut available = sqrt_s;
        let mut term = 1.0;
        for idx in order {
            let (species, momentum) = nucleons[idx];
            let energy = momentum.energy(species.mass());
            let s = available * available;
            if available < threshold || !is_allowed(s, energy, Product::PBar) {
                trace!(available, energy, "nucleon beyond reduced kinematic limit");
                term = 0.0;
                break;
            }
            let point = CmPoint::from_momentum(s, momentum.p_l, momentum.p_t)?;
            term *= spectrum(species, &point);
            if term == 0.0 {
                break;
            }
            available -= 2.0 * energy;
        }
        total += term;
    }
    Ok(total / orderings as f64)
}

/// Coalescence normalisation m_A / Π m_i · ((4π/3) p_coal³ / σ_tot)^(A-1).
pub fn normalisation(product: Product, p_coal: f64, sigma_tot: f64) -> f64 {
    let layout = nucleon_layout(product);
    let nucleon_masses: f64 = layout.iter().map(|(species, _)| species.mass()).product();
    let volume = 4.0 * PI / 3.0 * p_coal.powi(3) / sigma_tot;
    product.mass() / nucleon_masses * volume.powi(layout.len() as i32 - 1)
}

/// Evaluates `model` at `point`, rejecting non-positive or non-finite momenta.
pub fn checked_p_coal<M>(model: &M, point: &CmPoint) -> Result<f64, CrxsError>
where
    M: CoalescenceMomentum + ?Sized,
{
    let p_coal = model.p_coal(point);
    if !p_coal.is_finite() || p_coal <= 0.0 {
        return Err(CrxsError::InvalidCoalescenceMomentum(
            ErrorInfo::new("non-positive-p-coal", "coalescence momentum must be positive")
                .with_context("p_coal", p_coal)
                .with_context("s", point.s()),
        ));
    }
    Ok(p_coal)
}

/// Invariant cross section of `product` at the CM point.
///
/// Antiprotons come straight from the backend; composites are coalesced
/// from the backend's antiproton and antineutron spectra with the momentum
/// from `model`. Points beyond the production limit give `0.0`.
pub fn coalesce<B, M>(
    backend: &B,
    model: &M,
    product: Product,
    point: &CmPoint,
    parametrization: Parametrization,
    projectile: Nucleus,
    target: Nucleus,
) -> Result<f64, CrxsError>
where
    B: InvariantBackend + ?Sized,
    M: CoalescenceMomentum + ?Sized,
{
    if !point.is_allowed(product) {
        trace!(s = point.s(), x_f = point.x_f(), p_t = point.p_t(), "point beyond production limit");
        return Ok(0.0);
    }
    if product == Product::PBar {
        return Ok(backend.inv_pbar(parametrization, point, projectile, target));
    }

    let p_coal = checked_p_coal(model, point)?;
    debug!(p_coal, s = point.s(), ?product, "coalescence momentum");

    let mass_number = product.mass_number();
    let nucleons: Vec<(Nucleon, NucleonMomentum)> = nucleon_layout(product)
        .iter()
        .map(|&(species, offset)| {
            (species, nucleon_momentum(point, mass_number, offset * p_coal))
        })
        .collect();
    let combined = symmetrized_spectrum(
        |species, nucleon_point| match species {
            Nucleon::AntiProton => {
                backend.inv_pbar(parametrization, nucleon_point, projectile, target)
            }
            Nucleon::AntiNeutron => {
                backend.inv_nbar(parametrization, nucleon_point, projectile, target)
            }
        },
        point.sqrt_s(),
        &nucleons,
    )?;
    if combined == 0.0 {
        return Ok(0.0);
    }

    let sigma_tot = backend.sigma_tot(point.s(), projectile, target);
    if !sigma_tot.is_finite() || sigma_tot <= 0.0 {
        return Err(CrxsError::Backend(
            ErrorInfo::new("non-positive-sigma-tot", "backend total cross section must be positive")
                .with_context("sigma_tot", sigma_tot)
                .with_context("s", point.s()),
        ));
    }
    Ok(normalisation(product, p_coal, sigma_tot) * combined)
}
