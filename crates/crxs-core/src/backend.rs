//! Contract for the fitted invariant cross-section backend.

use crate::constants::MASS_PROTON;
use crate::kinematics::CmPoint;
use crate::nucleus::Nucleus;
use crate::types::Parametrization;

/// Opaque provider of fitted invariant antinucleon production cross sections.
///
/// Implementations must be deterministic, return non-negative values in
/// mbarn/GeV² and return `0.0` for kinematically forbidden points instead of
/// failing. Evaluations may be expensive; callers invoke them only as often as
/// their algorithm requires.
pub trait InvariantBackend: Send + Sync {
    /// Invariant antiproton cross section E d³σ/dp³ at the CM point.
    fn inv_pbar(
        &self,
        parametrization: Parametrization,
        point: &CmPoint,
        projectile: Nucleus,
        target: Nucleus,
    ) -> f64;

    /// Invariant antineutron cross section E d³σ/dp³ at the CM point.
    ///
    /// Defaults to the antiproton spectrum scaled by the isospin factor `1 + Δ_IS`.
    fn inv_nbar(
        &self,
        parametrization: Parametrization,
        point: &CmPoint,
        projectile: Nucleus,
        target: Nucleus,
    ) -> f64 {
        let factor = 1.0 + self.isospin_excess(parametrization, point.s(), projectile, target);
        factor * self.inv_pbar(parametrization, point, projectile, target)
    }

    /// Isospin excess Δ_IS of prompt antineutron over antiproton production.
    fn isospin_excess(
        &self,
        parametrization: Parametrization,
        s: f64,
        projectile: Nucleus,
        target: Nucleus,
    ) -> f64;

    /// Antihyperon feed-down fraction Δ_Λ relative to prompt antiprotons.
    fn hyperon_fraction(&self, parametrization: Parametrization, s: f64) -> f64;

    /// Total cross section (mbarn) normalising the coalescence model.
    ///
    /// Defaults to the proton-proton value regardless of the colliding nuclei.
    fn sigma_tot(&self, s: f64, _projectile: Nucleus, _target: Nucleus) -> f64 {
        total_pp(s)
    }
}

impl<B: InvariantBackend + ?Sized> InvariantBackend for &B {
    fn inv_pbar(
        &self,
        parametrization: Parametrization,
        point: &CmPoint,
        projectile: Nucleus,
        target: Nucleus,
    ) -> f64 {
        (**self).inv_pbar(parametrization, point, projectile, target)
    }

    fn inv_nbar(
        &self,
        parametrization: Parametrization,
        point: &CmPoint,
        projectile: Nucleus,
        target: Nucleus,
    ) -> f64 {
        (**self).inv_nbar(parametrization, point, projectile, target)
    }

    fn isospin_excess(
        &self,
        parametrization: Parametrization,
        s: f64,
        projectile: Nucleus,
        target: Nucleus,
    ) -> f64 {
        (**self).isospin_excess(parametrization, s, projectile, target)
    }

    fn hyperon_fraction(&self, parametrization: Parametrization, s: f64) -> f64 {
        (**self).hyperon_fraction(parametrization, s)
    }

    fn sigma_tot(&self, s: f64, projectile: Nucleus, target: Nucleus) -> f64 {
        (**self).sigma_tot(s, projectile, target)
    }
}

const TOT_PP_Z: f64 = 34.41;
const TOT_PP_B: f64 = 0.2720;
const TOT_PP_Y1: f64 = 13.07;
const TOT_PP_Y2: f64 = 7.394;
const TOT_PP_ETA1: f64 = 0.4473;
const TOT_PP_ETA2: f64 = 0.5486;
const TOT_PP_M: f64 = 2.1206;

/// Total proton-proton cross section in mbarn (PDG/COMPETE high-energy form).
///
/// σ = Z + B ln²(s/s_M) + Y₁ (s_M/s)^η₁ - Y₂ (s_M/s)^η₂ with s_M = (2 m_p + M)².
pub fn total_pp(s: f64) -> f64 {
    let s_m = (2.0 * MASS_PROTON + TOT_PP_M).powi(2);
    let log = (s / s_m).ln();
    let ratio = s_m / s;
    TOT_PP_Z + TOT_PP_B * log * log + TOT_PP_Y1 * ratio.powf(TOT_PP_ETA1)
        - TOT_PP_Y2 * ratio.powf(TOT_PP_ETA2)
}
