//! Fixed-target LAB frame to nucleon-nucleon CM frame transformations.
//!
//! The target nucleon is at rest and the projectile nucleon moves along the
//! beam axis. The boost is written in rapidity form so that forward products
//! at high energy do not lose precision to cancellation.

use crxs_core::{CmPoint, CrxsError, ErrorInfo};
use serde::{Deserialize, Serialize};

fn frame_error(code: &str, message: impl Into<String>) -> CrxsError {
    CrxsError::Kinematic(ErrorInfo::new(code, message.into()))
}

/// Product phase-space point in the fixed-target LAB frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabPoint {
    /// Projectile kinetic energy per nucleon (GeV).
    pub tn_proj: f64,
    /// Total kinetic energy of the product (GeV).
    pub t_product: f64,
    /// Pseudorapidity of the product with respect to the beam axis.
    pub eta: f64,
}

impl LabPoint {
    /// Creates a LAB point.
    pub fn new(tn_proj: f64, t_product: f64, eta: f64) -> Self {
        Self {
            tn_proj,
            t_product,
            eta,
        }
    }

    /// Momentum of the product (GeV).
    pub fn momentum(&self, mass: f64) -> f64 {
        (self.t_product * (self.t_product + 2.0 * mass)).sqrt()
    }
}

/// Product kinematics after boosting into the CM frame.
///
/// The values are raw; a state may lie outside the production limit, in
/// which case [`CmState::to_point`] still succeeds as long as `|x_F| <= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CmState {
    /// Centre-of-mass energy squared (GeV²).
    pub s: f64,
    /// Product CM energy (GeV).
    pub energy: f64,
    /// Longitudinal CM momentum (GeV).
    pub p_l: f64,
    /// Transverse momentum (GeV).
    pub p_t: f64,
}

impl CmState {
    /// Feynman-x, 2 p_L / √s.
    pub fn x_f(&self) -> f64 {
        2.0 * self.p_l / self.s.sqrt()
    }

    /// Converts the state into a validated [`CmPoint`].
    pub fn to_point(&self) -> Result<CmPoint, CrxsError> {
        CmPoint::new(self.s, self.x_f(), self.p_t)
    }
}

/// Beam parameters of a fixed-target nucleon-nucleon collision.
#[derive(Debug, Clone, Copy)]
struct Beam {
    s: f64,
    /// Rapidity of the CM frame seen from the LAB.
    rapidity: f64,
}

impl Beam {
    fn new(tn_proj: f64, nucleon_mass: f64) -> Result<Self, CrxsError> {
        if !tn_proj.is_finite() || tn_proj < 0.0 {
            return Err(CrxsError::Kinematic(
                ErrorInfo::new(
                    "invalid-projectile-energy",
                    "projectile kinetic energy per nucleon must be finite and non-negative",
                )
                .with_context("tn_proj", tn_proj),
            ));
        }
        if !nucleon_mass.is_finite() || nucleon_mass <= 0.0 {
            return Err(frame_error("invalid-mass", "nucleon mass must be positive"));
        }
        let s = 2.0 * nucleon_mass * (tn_proj + 2.0 * nucleon_mass);
        let p_proj = (tn_proj * (tn_proj + 2.0 * nucleon_mass)).sqrt();
        Ok(Self {
            s,
            rapidity: (p_proj / s.sqrt()).asinh(),
        })
    }

    fn from_s(s: f64, nucleon_mass: f64) -> Result<Self, CrxsError> {
        let tn_proj = s / (2.0 * nucleon_mass) - 2.0 * nucleon_mass;
        if tn_proj < 0.0 {
            return Err(CrxsError::Kinematic(
                ErrorInfo::new(
                    "below-fixed-target-threshold",
                    "s is below (2 m)² and has no fixed-target equivalent",
                )
                .with_context("s", s),
            ));
        }
        Self::new(tn_proj, nucleon_mass)
    }
}

fn check_mass(product_mass: f64) -> Result<(), CrxsError> {
    if !product_mass.is_finite() || product_mass <= 0.0 {
        return Err(frame_error("invalid-mass", "product mass must be positive"));
    }
    Ok(())
}

fn check_product(t_product: f64, product_mass: f64) -> Result<(), CrxsError> {
    check_mass(product_mass)?;
    if !t_product.is_finite() || t_product < 0.0 {
        return Err(CrxsError::Kinematic(
            ErrorInfo::new(
                "invalid-product-energy",
                "product kinetic energy must be finite and non-negative",
            )
            .with_context("t_product", t_product),
        ));
    }
    Ok(())
}

/// Rapidity of a particle with transverse mass `m_t` and longitudinal momentum `p_l`.
fn rapidity(m_t: f64, p_l: f64) -> f64 {
    (p_l / m_t).asinh()
}

/// Boosts a LAB point into the CM frame.
///
/// `nucleon_mass` is the mass of both the projectile nucleon and the target
/// nucleon at rest.
pub fn to_cm(lab: &LabPoint, nucleon_mass: f64, product_mass: f64) -> Result<CmState, CrxsError> {
    let beam = Beam::new(lab.tn_proj, nucleon_mass)?;
    check_product(lab.t_product, product_mass)?;
    if lab.eta.is_nan() {
        return Err(frame_error("invalid-eta", "pseudorapidity must not be NaN"));
    }

    let p = lab.momentum(product_mass);
    let p_t = p / lab.eta.cosh();
    let p_l_lab = p * lab.eta.tanh();
    let m_t = p_t.hypot(product_mass);
    let y_cm = rapidity(m_t, p_l_lab) - beam.rapidity;
    Ok(CmState {
        s: beam.s,
        energy: m_t * y_cm.cosh(),
        p_l: m_t * y_cm.sinh(),
        p_t,
    })
}

/// Boosts a CM point back into the fixed-target LAB frame.
pub fn to_lab(point: &CmPoint, nucleon_mass: f64, product_mass: f64) -> Result<LabPoint, CrxsError> {
    let beam = Beam::from_s(point.s(), nucleon_mass)?;
    check_mass(product_mass)?;

    let p_t = point.p_t();
    let m_t = p_t.hypot(product_mass);
    let y_lab = rapidity(m_t, point.p_l()) + beam.rapidity;
    let p_l = m_t * y_lab.sinh();
    let momentum_sq = p_l * p_l + p_t * p_t;
    let energy = m_t * y_lab.cosh();
    let eta = if p_t > 0.0 {
        (p_l / p_t).asinh()
    } else if p_l > 0.0 {
        f64::INFINITY
    } else if p_l < 0.0 {
        f64::NEG_INFINITY
    } else {
        0.0
    };
    Ok(LabPoint {
        tn_proj: beam_kinetic(point.s(), nucleon_mass),
        t_product: momentum_sq / (energy + product_mass),
        eta,
    })
}

fn beam_kinetic(s: f64, nucleon_mass: f64) -> f64 {
    s / (2.0 * nucleon_mass) - 2.0 * nucleon_mass
}

/// Smallest CM energy the product can have over all LAB emission angles.
///
/// The minimum is reached for emission along the beam axis. If it exceeds
/// the production limit, the whole angular integral vanishes.
pub fn min_cm_energy(
    tn_proj: f64,
    t_product: f64,
    nucleon_mass: f64,
    product_mass: f64,
) -> Result<f64, CrxsError> {
    let beam = Beam::new(tn_proj, nucleon_mass)?;
    check_product(t_product, product_mass)?;
    let p = (t_product * (t_product + 2.0 * product_mass)).sqrt();
    let y_forward = rapidity(product_mass, p);
    Ok(product_mass * (y_forward - beam.rapidity).cosh())
}

/// Smallest LAB cos θ at which the product's CM energy stays within `max_energy`.
///
/// The CM energy E* = γE − βγ p cos θ falls with the emission angle, so the
/// allowed region is the forward cone `cos θ >= cos_min`. The result is
/// clamped to `[-1, 1]`; `1.0` means no direction is allowed.
pub fn min_cos_theta(
    tn_proj: f64,
    t_product: f64,
    nucleon_mass: f64,
    product_mass: f64,
    max_energy: f64,
) -> Result<f64, CrxsError> {
    let beam = Beam::new(tn_proj, nucleon_mass)?;
    check_product(t_product, product_mass)?;
    let energy = t_product + product_mass;
    let p = (t_product * (t_product + 2.0 * product_mass)).sqrt();
    let head_on = beam.rapidity.cosh() * energy - max_energy;
    let lever = beam.rapidity.sinh() * p;
    if lever == 0.0 {
        return Ok(if head_on <= 0.0 { -1.0 } else { 1.0 });
    }
    Ok((head_on / lever).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crxs_core::constants::MASS_PROTON;
    use crxs_core::{max_cm_energy, Product};

    #[test]
    fn rapidity_form_matches_direct_boost() {
        let lab = LabPoint::new(100.0, 5.0, 1.2);
        let state = to_cm(&lab, MASS_PROTON, MASS_PROTON).unwrap();

        let e_proj = lab.tn_proj + MASS_PROTON;
        let p_proj = (lab.tn_proj * (lab.tn_proj + 2.0 * MASS_PROTON)).sqrt();
        let sqrt_s = state.s.sqrt();
        let gamma = (e_proj + MASS_PROTON) / sqrt_s;
        let beta_gamma = p_proj / sqrt_s;
        let energy = lab.t_product + MASS_PROTON;
        let p = lab.momentum(MASS_PROTON);
        let p_l = p * lab.eta.tanh();

        assert!((state.energy - (gamma * energy - beta_gamma * p_l)).abs() < 1e-10);
        assert!((state.p_l - (gamma * p_l - beta_gamma * energy)).abs() < 1e-10);
        assert!((state.p_t - p / lab.eta.cosh()).abs() < 1e-12);
    }

    #[test]
    fn at_rest_in_cm_maps_to_beam_rapidity() {
        let point = CmPoint::new(100.0, 0.0, 0.0).unwrap();
        let lab = to_lab(&point, MASS_PROTON, MASS_PROTON).unwrap();
        assert_eq!(lab.eta, f64::INFINITY);
        let back = to_cm(&lab, MASS_PROTON, MASS_PROTON).unwrap();
        assert!(back.p_l.abs() < 1e-9);
        assert!((back.energy - MASS_PROTON).abs() < 1e-9);
    }

    #[test]
    fn below_fixed_target_threshold_is_rejected() {
        let point = CmPoint::new(1.0, 0.0, 0.1).unwrap();
        let err = to_lab(&point, MASS_PROTON, MASS_PROTON).unwrap_err();
        assert_eq!(err.code(), "below-fixed-target-threshold");
    }

    #[test]
    fn cone_edge_sits_on_the_production_limit() {
        let (tn_proj, t) = (1e4, 1e-6);
        let s = 2.0 * MASS_PROTON * (tn_proj + 2.0 * MASS_PROTON);
        let e_max = max_cm_energy(s, Product::PBar);
        let cos_min = min_cos_theta(tn_proj, t, MASS_PROTON, MASS_PROTON, e_max).unwrap();
        assert!(cos_min > -1.0 && cos_min < 1.0, "{cos_min}");
        let lab = LabPoint::new(tn_proj, t, cos_min.atanh());
        let state = to_cm(&lab, MASS_PROTON, MASS_PROTON).unwrap();
        assert!((state.energy / e_max - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cone_is_the_full_sphere_when_every_angle_is_allowed() {
        let cos_min = min_cos_theta(100.0, 0.01, MASS_PROTON, MASS_PROTON, 1e3).unwrap();
        assert_eq!(cos_min, -1.0);
    }
}
