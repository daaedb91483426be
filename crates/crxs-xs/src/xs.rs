//! Public cross-section queries in the CM and LAB frames.

use crxs_core::constants::MASS_PROTON;
use crxs_core::{
    is_allowed, max_cm_energy, s_from_kinetic, CmPoint, CoalescenceModel, CrxsError, ErrorInfo,
    InvariantBackend, Nucleus, Parametrization, Product,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::coalescence::{coalesce, CoalescenceMomentum};
use crate::frame::{min_cm_energy, min_cos_theta, to_cm, LabPoint};
use crate::integrate::energy_differential;
use crate::opts::XsOpts;
use crate::secondary::{ensure_supported, feed_down_factor};

fn lab_energy_error(key: &str, value: f64) -> CrxsError {
    CrxsError::Kinematic(
        ErrorInfo::new(
            "invalid-lab-energy",
            "LAB kinetic energies must be finite and non-negative",
        )
        .with_context(key, value),
    )
}

fn check_lab_energy(key: &str, value: f64) -> Result<(), CrxsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(lab_energy_error(key, value))
    }
}

/// Colliding system and model choices shared by every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Collision {
    /// Projectile nucleus.
    #[serde(default)]
    pub projectile: Nucleus,
    /// Target nucleus.
    #[serde(default)]
    pub target: Nucleus,
    /// Backend fit family.
    #[serde(default)]
    pub parametrization: Parametrization,
    /// Coalescence momentum model for composite products.
    #[serde(default)]
    pub coalescence: CoalescenceModel,
}

impl Collision {
    /// Collision with the default coalescence model.
    pub fn new(projectile: Nucleus, target: Nucleus, parametrization: Parametrization) -> Self {
        Self {
            projectile,
            target,
            parametrization,
            coalescence: CoalescenceModel::default(),
        }
    }

    /// Replaces the coalescence model.
    pub fn with_coalescence(mut self, coalescence: CoalescenceModel) -> Self {
        self.coalescence = coalescence;
        self
    }
}

/// Cross-section evaluator over an invariant backend.
///
/// Holds no mutable state; a shared reference can serve any number of
/// threads.
#[derive(Debug, Clone)]
pub struct CrossSections<B> {
    backend: B,
    opts: XsOpts,
}

impl<B: InvariantBackend> CrossSections<B> {
    /// Evaluator with default options.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            opts: XsOpts::default(),
        }
    }

    /// Evaluator with validated options.
    pub fn with_opts(backend: B, opts: XsOpts) -> Result<Self, CrxsError> {
        opts.validate()?;
        Ok(Self { backend, opts })
    }

    /// Underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Evaluation options.
    pub fn opts(&self) -> &XsOpts {
        &self.opts
    }

    /// Invariant cross section E d³σ/dp³ (mbarn/GeV²) at a CM point.
    pub fn invariant_cm(
        &self,
        product: Product,
        point: &CmPoint,
        collision: &Collision,
    ) -> Result<f64, CrxsError> {
        let model = self.opts.coalescence.momentum_model(collision.coalescence);
        self.invariant_cm_with(product, point, collision, &model)
    }

    /// Like [`CrossSections::invariant_cm`] with a caller-supplied coalescence
    /// momentum in place of `collision.coalescence`.
    pub fn invariant_cm_with<M>(
        &self,
        product: Product,
        point: &CmPoint,
        collision: &Collision,
        model: &M,
    ) -> Result<f64, CrxsError>
    where
        M: CoalescenceMomentum + ?Sized,
    {
        coalesce(
            &self.backend,
            model,
            product,
            point,
            collision.parametrization,
            collision.projectile,
            collision.target,
        )
    }

    /// Invariant cross section (mbarn/GeV²) at a LAB point.
    ///
    /// `tn_product` is per nucleon of the product.
    pub fn invariant_lab(
        &self,
        product: Product,
        tn_proj: f64,
        tn_product: f64,
        eta: f64,
        collision: &Collision,
    ) -> Result<f64, CrxsError> {
        check_lab_energy("tn_proj", tn_proj)?;
        check_lab_energy("tn_product", tn_product)?;
        let model = self.opts.coalescence.momentum_model(collision.coalescence);
        let lab = LabPoint::new(tn_proj, total_kinetic(product, tn_product), eta);
        self.invariant_at(product, &lab, collision, &model)
    }

    fn invariant_at<M>(
        &self,
        product: Product,
        lab: &LabPoint,
        collision: &Collision,
        model: &M,
    ) -> Result<f64, CrxsError>
    where
        M: CoalescenceMomentum + ?Sized,
    {
        let state = to_cm(lab, MASS_PROTON, product.mass())?;
        if !is_allowed(state.s, state.energy, product) {
            return Ok(0.0);
        }
        let point = state.to_point()?;
        self.invariant_cm_with(product, &point, collision, model)
    }

    /// Energy-differential cross section dσ/dTn (mbarn/GeV) in the LAB frame.
    ///
    /// `tn_product` is the product's kinetic energy per nucleon. Energies
    /// outside the range reachable at `tn_proj` give `0.0`.
    pub fn energy_differential_lab(
        &self,
        product: Product,
        tn_proj: f64,
        tn_product: f64,
        collision: &Collision,
    ) -> Result<f64, CrxsError> {
        let model = self.opts.coalescence.momentum_model(collision.coalescence);
        self.energy_differential_lab_with(product, tn_proj, tn_product, collision, &model)
    }

    /// Like [`CrossSections::energy_differential_lab`] with a caller-supplied
    /// coalescence momentum.
    pub fn energy_differential_lab_with<M>(
        &self,
        product: Product,
        tn_proj: f64,
        tn_product: f64,
        collision: &Collision,
        model: &M,
    ) -> Result<f64, CrxsError>
    where
        M: CoalescenceMomentum + ?Sized,
    {
        check_lab_energy("tn_proj", tn_proj)?;
        check_lab_energy("tn_product", tn_product)?;
        let t_product = total_kinetic(product, tn_product);
        if !self.reachable(product, tn_proj, t_product)? {
            trace!(?product, tn_proj, tn_product, "product energy not reachable");
            return Ok(0.0);
        }
        let cos_min = min_cos_theta(
            tn_proj,
            t_product,
            MASS_PROTON,
            product.mass(),
            max_cm_energy(s_from_kinetic(tn_proj), product),
        )?;
        let dsigma_dt = energy_differential(
            |lab| self.invariant_at(product, lab, collision, model),
            tn_proj,
            t_product,
            product.mass(),
            cos_min,
            &self.opts.integration,
        )?;
        Ok(f64::from(product.mass_number()) * dsigma_dt)
    }

    /// Antiproton dσ/dT (mbarn/GeV) including antineutron and antihyperon feed-down.
    ///
    /// Only the Korsmeier and Winkler families model the feed-down; the
    /// Di Mauro families fail before any evaluation.
    pub fn energy_differential_lab_with_secondaries(
        &self,
        tn_proj: f64,
        t_pbar: f64,
        collision: &Collision,
    ) -> Result<f64, CrxsError> {
        ensure_supported(collision.parametrization)?;
        check_lab_energy("tn_proj", tn_proj)?;
        let prompt = self.energy_differential_lab(Product::PBar, tn_proj, t_pbar, collision)?;
        if prompt == 0.0 {
            return Ok(0.0);
        }
        let factor = feed_down_factor(
            &self.backend,
            collision.parametrization,
            s_from_kinetic(tn_proj),
            collision.projectile,
            collision.target,
        )?;
        Ok(factor * prompt)
    }

    /// Evaluates [`CrossSections::energy_differential_lab`] over a grid of
    /// product energies in parallel, preserving order.
    pub fn energy_differential_grid(
        &self,
        product: Product,
        tn_proj: f64,
        tn_products: &[f64],
        collision: &Collision,
    ) -> Result<Vec<f64>, CrxsError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.opts.concurrency)
            .build()
            .map_err(|err| {
                CrxsError::Config(ErrorInfo::new("thread-pool", err.to_string()))
            })?;
        let results: Result<Vec<_>, CrxsError> = pool.install(|| {
            tn_products
                .par_iter()
                .enumerate()
                .map(|(index, &tn_product)| -> Result<(usize, f64), CrxsError> {
                    let value =
                        self.energy_differential_lab(product, tn_proj, tn_product, collision)?;
                    Ok((index, value))
                })
                .collect()
        });
        let mut ordered = results?;
        ordered.sort_by_key(|(index, _)| *index);
        Ok(ordered.into_iter().map(|(_, value)| value).collect())
    }

    fn reachable(&self, product: Product, tn_proj: f64, t_product: f64) -> Result<bool, CrxsError> {
        let s = s_from_kinetic(tn_proj);
        if s.sqrt() < product.threshold_sqrt_s() {
            return Ok(false);
        }
        let lowest = min_cm_energy(tn_proj, t_product, MASS_PROTON, product.mass())?;
        Ok(lowest <= max_cm_energy(s, product))
    }
}

fn total_kinetic(product: Product, tn_product: f64) -> f64 {
    f64::from(product.mass_number()) * tn_product
}
