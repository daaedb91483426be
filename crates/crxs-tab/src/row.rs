use crxs_core::{s_from_momentum, CmPoint, CrxsError, ErrorInfo, Product};
use serde::{Deserialize, Serialize};

/// One measured point as published: beam momentum, CM kinematics and the
/// invariant cross section with percentage uncertainties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub p_lab: f64,
    pub p_t: f64,
    pub x_f: f64,
    pub cs: f64,
    pub stat_pct: f64,
    pub sys_pct: f64,
    pub scale_pct: f64,
}

/// A table row with derived kinematics and absolute uncertainties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvertedRow {
    pub sqrt_s: f64,
    pub p_t: f64,
    /// Radial scaling x_R carrying the sign of x_F (positive for x_F = 0).
    pub x_r: f64,
    pub x_f: f64,
    pub cs: f64,
    pub stat: f64,
    pub sys: f64,
    pub scale: f64,
}

impl TableRow {
    pub fn convert(&self) -> Result<ConvertedRow, CrxsError> {
        let s = s_from_momentum(self.p_lab);
        let point = CmPoint::new(s, self.x_f, self.p_t).map_err(|err| {
            CrxsError::Table(
                ErrorInfo::new("invalid-kinematics", err.info().message.clone())
                    .with_context("p_lab", self.p_lab)
                    .with_context("p_t", self.p_t)
                    .with_context("x_f", self.x_f),
            )
        })?;
        let sign = if self.x_f < 0.0 { -1.0 } else { 1.0 };
        Ok(ConvertedRow {
            sqrt_s: point.sqrt_s(),
            p_t: self.p_t,
            x_r: sign * point.radial_scaling(Product::PBar),
            x_f: self.x_f,
            cs: self.cs,
            stat: self.stat_pct * self.cs * 0.01,
            sys: self.sys_pct * self.cs * 0.01,
            scale: self.scale_pct * 0.01,
        })
    }
}
