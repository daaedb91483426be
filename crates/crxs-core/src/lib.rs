#![deny(missing_docs)]
#![doc = "Core types for antinuclei production cross sections: the error taxonomy, the closed parametrization/product/coalescence enumerations, nucleus descriptors, centre-of-mass kinematics and the invariant cross-section backend contract."]

pub mod backend;
pub mod constants;
pub mod errors;
pub mod kinematics;
pub mod nucleus;
mod types;

pub use backend::{total_pp, InvariantBackend};
pub use errors::{kinematic_error, CrxsError, ErrorInfo};
pub use kinematics::{
    is_allowed, kinetic_from_s, max_cm_energy, s_from_kinetic, s_from_momentum, CmPoint,
};
pub use nucleus::Nucleus;
pub use types::{CoalescenceModel, Parametrization, Product};
