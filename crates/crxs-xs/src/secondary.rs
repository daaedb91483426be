//! Antineutron and antihyperon feed-down on top of prompt antiprotons.

use crxs_core::{CrxsError, ErrorInfo, InvariantBackend, Nucleus, Parametrization};

/// Global rescaling callers apply themselves for the Di Mauro families.
pub const DI_MAURO_FEED_DOWN_FACTOR: f64 = 2.3;

/// Fails unless the parametrization models antineutron and antihyperon feed-down.
pub fn ensure_supported(parametrization: Parametrization) -> Result<(), CrxsError> {
    if parametrization.supports_secondaries() {
        return Ok(());
    }
    Err(CrxsError::InvalidParametrizationUsage(
        ErrorInfo::new(
            "secondaries-unsupported",
            "parametrization does not model antineutron and antihyperon feed-down",
        )
        .with_context("parametrization", parametrization)
        .with_hint(format!(
            "use the prompt antiproton cross section and apply a global factor {DI_MAURO_FEED_DOWN_FACTOR}"
        )),
    ))
}

/// Ratio of all antiprotons (prompt, from antineutrons and from antihyperons)
/// to prompt antiprotons: 2 + Δ_IS + 2 Δ_Λ.
///
/// Both the prompt antiproton and antineutron yields receive the hyperon
/// contribution.
pub fn feed_down_factor<B>(
    backend: &B,
    parametrization: Parametrization,
    s: f64,
    projectile: Nucleus,
    target: Nucleus,
) -> Result<f64, CrxsError>
where
    B: InvariantBackend + ?Sized,
{
    ensure_supported(parametrization)?;
    let isospin = backend.isospin_excess(parametrization, s, projectile, target);
    let hyperon = backend.hyperon_fraction(parametrization, s);
    Ok(2.0 + isospin + 2.0 * hyperon)
}
