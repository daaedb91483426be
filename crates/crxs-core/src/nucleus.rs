//! Projectile and target nucleus descriptors.

use serde::{Deserialize, Serialize};

use crate::errors::{CrxsError, ErrorInfo};

/// Raw (mass number, neutron count) pair as it appears in serialized input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct NucleusRepr {
    mass_number: i64,
    neutrons: i64,
}

/// Validated nucleus with mass number `A >= 1` and neutron count `0 <= N <= A`.
///
/// The proton count is derived as `A - N`. Descriptors are plain values: two
/// nuclei with equal `(A, N)` compare and hash equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "NucleusRepr", into = "NucleusRepr")]
pub struct Nucleus {
    mass_number: u32,
    neutrons: u32,
}

impl Nucleus {
    /// Hydrogen-1, the default beam and interstellar target.
    pub const PROTON: Nucleus = Nucleus {
        mass_number: 1,
        neutrons: 0,
    };

    /// Helium-4.
    pub const HELIUM: Nucleus = Nucleus {
        mass_number: 4,
        neutrons: 2,
    };

    /// Validates and constructs a nucleus from its mass number and neutron count.
    pub fn new(mass_number: i64, neutrons: i64) -> Result<Self, CrxsError> {
        if mass_number < 1 || neutrons < 0 || neutrons > mass_number {
            return Err(CrxsError::InvalidNucleus(
                ErrorInfo::new(
                    "invalid-nucleus",
                    "nucleus requires A >= 1 and 0 <= N <= A",
                )
                .with_context("A", mass_number)
                .with_context("N", neutrons),
            ));
        }
        let mass_number = u32::try_from(mass_number).map_err(|_| {
            CrxsError::InvalidNucleus(
                ErrorInfo::new("mass-number-overflow", "mass number exceeds u32")
                    .with_context("A", mass_number),
            )
        })?;
        Ok(Self {
            mass_number,
            // N <= A was checked above, so the narrowing cannot truncate.
            neutrons: neutrons as u32,
        })
    }

    /// Mass number A.
    pub const fn mass_number(&self) -> u32 {
        self.mass_number
    }

    /// Neutron count N.
    pub const fn neutron_count(&self) -> u32 {
        self.neutrons
    }

    /// Proton count Z = A - N.
    pub const fn proton_count(&self) -> u32 {
        self.mass_number - self.neutrons
    }
}

impl Default for Nucleus {
    fn default() -> Self {
        Self::PROTON
    }
}

impl TryFrom<NucleusRepr> for Nucleus {
    type Error = CrxsError;

    fn try_from(repr: NucleusRepr) -> Result<Self, Self::Error> {
        Nucleus::new(repr.mass_number, repr.neutrons)
    }
}

impl From<Nucleus> for NucleusRepr {
    fn from(nucleus: Nucleus) -> Self {
        Self {
            mass_number: i64::from(nucleus.mass_number),
            neutrons: i64::from(nucleus.neutrons),
        }
    }
}
