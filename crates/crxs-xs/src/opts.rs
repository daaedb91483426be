//! Evaluation options: integration tolerances, coalescence model parameters
//! and grid concurrency, loaded from YAML and validated before use.

use std::fs;
use std::path::Path;

use crxs_core::{CoalescenceModel, CrxsError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::coalescence::{FixedP0, ModelMomentum, VanDoetinchem};
use crate::integrate::IntegrationOpts;

fn config_error(code: &str, err: impl ToString) -> CrxsError {
    CrxsError::Config(ErrorInfo::new(code, err.to_string()))
}

fn invalid_option(key: &str, value: impl ToString, message: &str) -> CrxsError {
    CrxsError::Config(ErrorInfo::new("invalid-option", message).with_context(key, value))
}

/// Parameters of both built-in coalescence momentum models.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CoalescenceOpts {
    /// Constant model.
    #[serde(default)]
    pub fixed: FixedP0,
    /// Energy-dependent model.
    #[serde(default)]
    pub van_doetinchem: VanDoetinchem,
}

impl CoalescenceOpts {
    /// Strategy answering for the selected model.
    pub fn momentum_model(&self, model: CoalescenceModel) -> ModelMomentum {
        match model {
            CoalescenceModel::FixedP0 => ModelMomentum::Fixed(self.fixed),
            CoalescenceModel::EnergyDepVanDoetinchem => {
                ModelMomentum::EnergyDependent(self.van_doetinchem)
            }
        }
    }
}

/// YAML-configurable evaluation options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct XsOpts {
    /// Angular integration settings.
    #[serde(default)]
    pub integration: IntegrationOpts,
    /// Coalescence momentum model parameters.
    #[serde(default)]
    pub coalescence: CoalescenceOpts,
    /// Worker threads for grid evaluation; `0` lets rayon decide.
    #[serde(default)]
    pub concurrency: usize,
}

impl XsOpts {
    /// Decodes and validates options from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CrxsError> {
        let opts: XsOpts =
            serde_yaml::from_str(yaml).map_err(|err| config_error("yaml-deserialize", err))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Reads options from a YAML file.
    pub fn load(path: &Path) -> Result<Self, CrxsError> {
        let yaml = fs::read_to_string(path).map_err(|err| {
            CrxsError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Rejects settings the integrator or the coalescence models cannot work with.
    pub fn validate(&self) -> Result<(), CrxsError> {
        let integration = &self.integration;
        if !integration.abs_tol.is_finite() || integration.abs_tol < 0.0 {
            return Err(invalid_option(
                "abs_tol",
                integration.abs_tol,
                "absolute tolerance must be non-negative",
            ));
        }
        if !integration.rel_tol.is_finite() || integration.rel_tol <= 0.0 {
            return Err(invalid_option(
                "rel_tol",
                integration.rel_tol,
                "relative tolerance must be positive",
            ));
        }
        if integration.initial_panels == 0 {
            return Err(invalid_option("initial_panels", 0, "at least one panel is required"));
        }
        if integration.max_evals < integration.initial_panels * 15 {
            return Err(invalid_option(
                "max_evals",
                integration.max_evals,
                "evaluation budget does not cover the initial panels",
            ));
        }
        let fixed = self.coalescence.fixed.p0;
        if !fixed.is_finite() || fixed <= 0.0 {
            return Err(invalid_option("fixed.p0", fixed, "fixed p0 must be positive"));
        }
        let vd = &self.coalescence.van_doetinchem;
        if !(vd.a.is_finite() && vd.a > 0.0 && vd.b.is_finite() && vd.c.is_finite() && vd.c > 0.0)
        {
            return Err(invalid_option(
                "van_doetinchem",
                format!("a={} b={} c={}", vd.a, vd.b, vd.c),
                "energy-dependent model needs finite b and positive a, c",
            ));
        }
        Ok(())
    }
}
