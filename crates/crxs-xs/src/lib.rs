#![deny(missing_docs)]
#![doc = "Antiproton and light-antinuclei production cross sections: LAB/CM frame transforms, adaptive angular integration, antineutron and antihyperon feed-down, and analytic coalescence over a pluggable invariant backend."]

/// Analytic coalescence of antinucleon spectra.
pub mod coalescence;
/// LAB and CM frame transformations.
pub mod frame;
/// Adaptive quadrature and the LAB angular integral.
pub mod integrate;
/// YAML-loadable evaluation options.
pub mod opts;
/// Antineutron and antihyperon feed-down.
pub mod secondary;
/// Public cross-section queries.
pub mod xs;

pub use coalescence::{
    checked_p_coal, coalesce, nucleon_layout, nucleon_momentum, normalisation,
    symmetrized_spectrum, CoalescenceMomentum, FixedP0, ModelMomentum, Nucleon, NucleonMomentum,
    VanDoetinchem,
};
pub use frame::{min_cm_energy, min_cos_theta, to_cm, to_lab, CmState, LabPoint};
pub use integrate::{energy_differential, integrate, IntegrationOpts, Quadrature};
pub use opts::{CoalescenceOpts, XsOpts};
pub use secondary::{ensure_supported, feed_down_factor, DI_MAURO_FEED_DOWN_FACTOR};
pub use xs::{Collision, CrossSections};
