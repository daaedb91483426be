use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MASS_DEUTERON, MASS_HELION, MASS_PROTON};
use crate::errors::{CrxsError, ErrorInfo};

fn unknown_name(kind: &str, name: &str, accepted: &[&str]) -> CrxsError {
    CrxsError::UnknownEnumName(
        ErrorInfo::new("unknown-name", format!("`{name}` is not a known {kind}"))
            .with_context("kind", kind)
            .with_context("name", name)
            .with_hint(format!("expected one of: {}", accepted.join(", "))),
    )
}

fn unknown_id(kind: &str, id: u8) -> CrxsError {
    CrxsError::UnknownEnumName(
        ErrorInfo::new("unknown-id", format!("{id} is not a known {kind} identifier"))
            .with_context("kind", kind)
            .with_context("id", id),
    )
}

/// Fitted invariant cross-section family answering backend queries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Parametrization {
    /// Korsmeier, Donato, Di Mauro (2018), parametrization I.
    #[serde(rename = "KORSMEIER_I")]
    KorsmeierI,
    /// Korsmeier, Donato, Di Mauro (2018), parametrization II.
    #[default]
    #[serde(rename = "KORSMEIER_II")]
    KorsmeierII,
    /// Winkler (2017).
    #[serde(rename = "WINKLER")]
    Winkler,
    /// Di Mauro et al. (2014), parametrization I.
    #[serde(rename = "DI_MAURO_I")]
    DiMauroI,
    /// Di Mauro et al. (2014), parametrization II.
    #[serde(rename = "DI_MAURO_II")]
    DiMauroII,
}

impl Parametrization {
    /// Every parametrization in identifier order.
    pub const ALL: [Parametrization; 5] = [
        Parametrization::KorsmeierI,
        Parametrization::KorsmeierII,
        Parametrization::Winkler,
        Parametrization::DiMauroI,
        Parametrization::DiMauroII,
    ];

    const NAMES: [&'static str; 5] = [
        "KORSMEIER_I",
        "KORSMEIER_II",
        "WINKLER",
        "DI_MAURO_I",
        "DI_MAURO_II",
    ];

    /// Returns the fixed integer identifier.
    pub const fn id(self) -> u8 {
        match self {
            Parametrization::KorsmeierI => 1,
            Parametrization::KorsmeierII => 2,
            Parametrization::Winkler => 3,
            Parametrization::DiMauroI => 4,
            Parametrization::DiMauroII => 5,
        }
    }

    /// Returns the canonical upper-case name.
    pub const fn name(self) -> &'static str {
        Self::NAMES[self.id() as usize - 1]
    }

    /// Resolves an exact, case-sensitive name.
    pub fn from_name(name: &str) -> Result<Self, CrxsError> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.name() == name)
            .ok_or_else(|| unknown_name("parametrization", name, &Self::NAMES))
    }

    /// Resolves a fixed integer identifier.
    pub fn from_id(id: u8) -> Result<Self, CrxsError> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.id() == id)
            .ok_or_else(|| unknown_id("parametrization", id))
    }

    /// Whether the antineutron and antihyperon augmentation is defined for this family.
    ///
    /// The di Mauro fits only support a global rescaling that callers apply themselves.
    pub const fn supports_secondaries(self) -> bool {
        matches!(
            self,
            Parametrization::KorsmeierI | Parametrization::KorsmeierII | Parametrization::Winkler
        )
    }
}

/// Antinucleus produced in the collision.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Product {
    /// Antiproton.
    #[default]
    #[serde(rename = "P_BAR")]
    PBar,
    /// Antideuteron.
    #[serde(rename = "D_BAR")]
    DBar,
    /// Antihelium-3.
    #[serde(rename = "HE_BAR")]
    HeBar,
}

impl Product {
    /// Every product in identifier order.
    pub const ALL: [Product; 3] = [Product::PBar, Product::DBar, Product::HeBar];

    const NAMES: [&'static str; 3] = ["P_BAR", "D_BAR", "HE_BAR"];

    /// Returns the fixed integer identifier.
    pub const fn id(self) -> u8 {
        match self {
            Product::PBar => 1,
            Product::DBar => 2,
            Product::HeBar => 3,
        }
    }

    /// Returns the canonical upper-case name.
    pub const fn name(self) -> &'static str {
        Self::NAMES[self.id() as usize - 1]
    }

    /// Resolves an exact, case-sensitive name.
    pub fn from_name(name: &str) -> Result<Self, CrxsError> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.name() == name)
            .ok_or_else(|| unknown_name("product", name, &Self::NAMES))
    }

    /// Resolves a fixed integer identifier.
    pub fn from_id(id: u8) -> Result<Self, CrxsError> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.id() == id)
            .ok_or_else(|| unknown_id("product", id))
    }

    /// Rest mass in GeV.
    pub const fn mass(self) -> f64 {
        match self {
            Product::PBar => MASS_PROTON,
            Product::DBar => MASS_DEUTERON,
            Product::HeBar => MASS_HELION,
        }
    }

    /// Number of antinucleons bound in the product.
    pub const fn mass_number(self) -> u32 {
        match self {
            Product::PBar => 1,
            Product::DBar => 2,
            Product::HeBar => 3,
        }
    }

    /// Lightest system recoiling against the product in a nucleon-nucleon collision.
    ///
    /// Baryon number conservation requires the beam nucleons plus one nucleus of
    /// the product's baryon number alongside it.
    pub const fn recoil_mass(self) -> f64 {
        match self {
            Product::PBar => 3.0 * MASS_PROTON,
            Product::DBar => 2.0 * MASS_PROTON + MASS_DEUTERON,
            Product::HeBar => 2.0 * MASS_PROTON + MASS_HELION,
        }
    }

    /// Minimal centre-of-mass energy √s for producing this antinucleus.
    pub const fn threshold_sqrt_s(self) -> f64 {
        self.recoil_mass() + self.mass()
    }
}

/// Model for the coalescence momentum p_coal = |p_p - p_n| / 2.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum CoalescenceModel {
    /// Constant coalescence momentum (nominally 80 MeV).
    #[serde(rename = "FIXED_P0")]
    FixedP0,
    /// Energy-dependent coalescence momentum of Gomez-Coral, von Doetinchem et al.
    #[default]
    #[serde(rename = "ENERGY_DEP__VAN_DOETINCHEM")]
    EnergyDepVanDoetinchem,
}

impl CoalescenceModel {
    /// Every coalescence model in identifier order.
    pub const ALL: [CoalescenceModel; 2] = [
        CoalescenceModel::FixedP0,
        CoalescenceModel::EnergyDepVanDoetinchem,
    ];

    const NAMES: [&'static str; 2] = ["FIXED_P0", "ENERGY_DEP__VAN_DOETINCHEM"];

    /// Returns the fixed integer identifier.
    pub const fn id(self) -> u8 {
        match self {
            CoalescenceModel::FixedP0 => 1,
            CoalescenceModel::EnergyDepVanDoetinchem => 2,
        }
    }

    /// Returns the canonical upper-case name.
    pub const fn name(self) -> &'static str {
        Self::NAMES[self.id() as usize - 1]
    }

    /// Resolves an exact, case-sensitive name.
    pub fn from_name(name: &str) -> Result<Self, CrxsError> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.name() == name)
            .ok_or_else(|| unknown_name("coalescence model", name, &Self::NAMES))
    }

    /// Resolves a fixed integer identifier.
    pub fn from_id(id: u8) -> Result<Self, CrxsError> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.id() == id)
            .ok_or_else(|| unknown_id("coalescence model", id))
    }
}

macro_rules! name_traits {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }

            impl FromStr for $ty {
                type Err = CrxsError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::from_name(s)
                }
            }
        )+
    };
}

name_traits!(Parametrization, Product, CoalescenceModel);
