//! Physical constants in natural units (GeV, c = 1).

/// Proton rest mass (GeV).
pub const MASS_PROTON: f64 = 0.938_272_081_3;

/// Neutron rest mass (GeV).
pub const MASS_NEUTRON: f64 = 0.939_565_413_3;

/// Deuteron rest mass (GeV).
pub const MASS_DEUTERON: f64 = 1.875_612_928;

/// Helion (helium-3 nucleus) rest mass (GeV).
pub const MASS_HELION: f64 = 2.808_391_586;

/// Nominal coalescence momentum p_coal = |p_p - p_n| / 2 tuned to ALEPH (GeV).
pub const NOMINAL_P_COAL: f64 = 0.080;
