//! Centre-of-mass phase-space points and production limits.

use serde::{Deserialize, Serialize};

use crate::constants::MASS_PROTON;
use crate::errors::{kinematic_error, CrxsError, ErrorInfo};
use crate::types::Product;

/// Product phase-space point in the nucleon-nucleon centre-of-mass frame.
///
/// Construction rejects malformed values (`s <= 0`, `|x_F| > 1`, `p_T < 0`,
/// non-finite numbers). Points that are well formed but kinematically
/// forbidden are representable; callers test them with [`CmPoint::is_allowed`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CmPoint {
    s: f64,
    x_f: f64,
    p_t: f64,
}

impl CmPoint {
    /// Validates and constructs a point from `s` (GeV²), Feynman-x and `p_T` (GeV).
    pub fn new(s: f64, x_f: f64, p_t: f64) -> Result<Self, CrxsError> {
        if !s.is_finite() || s <= 0.0 {
            return Err(CrxsError::Kinematic(
                ErrorInfo::new("invalid-s", "centre-of-mass energy squared must be positive")
                    .with_context("s", s),
            ));
        }
        if !x_f.is_finite() || x_f.abs() > 1.0 {
            return Err(CrxsError::Kinematic(
                ErrorInfo::new("invalid-x-f", "Feynman-x must lie in [-1, 1]")
                    .with_context("x_f", x_f),
            ));
        }
        if !p_t.is_finite() || p_t < 0.0 {
            return Err(CrxsError::Kinematic(
                ErrorInfo::new("invalid-p-t", "transverse momentum must be non-negative")
                    .with_context("p_t", p_t),
            ));
        }
        Ok(Self { s, x_f, p_t })
    }

    /// Builds a point from a longitudinal momentum instead of Feynman-x.
    pub fn from_momentum(s: f64, p_l: f64, p_t: f64) -> Result<Self, CrxsError> {
        if !s.is_finite() || s <= 0.0 {
            return Err(kinematic_error(
                "invalid-s",
                "centre-of-mass energy squared must be positive",
            ));
        }
        Self::new(s, 2.0 * p_l / s.sqrt(), p_t)
    }

    /// Centre-of-mass energy squared (GeV²).
    pub fn s(&self) -> f64 {
        self.s
    }

    /// Centre-of-mass energy √s (GeV).
    pub fn sqrt_s(&self) -> f64 {
        self.s.sqrt()
    }

    /// Feynman-x, 2 p_L / √s.
    pub fn x_f(&self) -> f64 {
        self.x_f
    }

    /// Transverse momentum (GeV).
    pub fn p_t(&self) -> f64 {
        self.p_t
    }

    /// Longitudinal momentum in the CM frame (GeV).
    pub fn p_l(&self) -> f64 {
        0.5 * self.x_f * self.sqrt_s()
    }

    /// Total CM energy of a particle of the given mass at this point.
    pub fn energy(&self, mass: f64) -> f64 {
        let p_l = self.p_l();
        (p_l * p_l + self.p_t * self.p_t + mass * mass).sqrt()
    }

    /// Whether the product can be produced at this point.
    pub fn is_allowed(&self, product: Product) -> bool {
        is_allowed(self.s, self.energy(product.mass()), product)
    }

    /// Radial scaling variable x_R = E* / E*_max for the product.
    pub fn radial_scaling(&self, product: Product) -> f64 {
        self.energy(product.mass()) / max_cm_energy(self.s, product)
    }
}

/// Largest CM energy the product can carry at the given `s`.
///
/// E*_max = (s - M_X² + m²) / (2√s) with M_X the minimal recoil mass.
pub fn max_cm_energy(s: f64, product: Product) -> f64 {
    let recoil = product.recoil_mass();
    let mass = product.mass();
    (s - recoil * recoil + mass * mass) / (2.0 * s.sqrt())
}

/// Whether `s` is above threshold and `energy` does not exceed the production limit.
pub fn is_allowed(s: f64, energy: f64, product: Product) -> bool {
    s.sqrt() >= product.threshold_sqrt_s() && energy <= max_cm_energy(s, product)
}

/// `s` of a fixed-target nucleon-nucleon collision with projectile kinetic energy
/// per nucleon `tn` (GeV).
pub fn s_from_kinetic(tn: f64) -> f64 {
    2.0 * MASS_PROTON * (tn + 2.0 * MASS_PROTON)
}

/// `s` of a fixed-target nucleon-nucleon collision with beam momentum `p_lab` (GeV).
pub fn s_from_momentum(p_lab: f64) -> f64 {
    let energy = p_lab.hypot(MASS_PROTON);
    2.0 * MASS_PROTON * (energy + MASS_PROTON)
}

/// Equivalent fixed-target kinetic energy per nucleon for a given `s`.
pub fn kinetic_from_s(s: f64) -> f64 {
    s / (2.0 * MASS_PROTON) - 2.0 * MASS_PROTON
}
