//! Structured error types shared across CRXS crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`CrxsError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (offending names, energies, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for cross-section evaluation.
///
/// Kinematically forbidden but well posed phase-space points are never
/// reported through this type; they evaluate to a cross section of zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum CrxsError {
    /// A parametrization, product or coalescence name was not recognised.
    #[error("unknown enum name: {0}")]
    UnknownEnumName(ErrorInfo),
    /// Mass number or neutron count outside the physical range.
    #[error("invalid nucleus: {0}")]
    InvalidNucleus(ErrorInfo),
    /// Malformed kinematic input or a non-physical frame transformation.
    #[error("kinematic error: {0}")]
    Kinematic(ErrorInfo),
    /// A parametrization was used with an operation it does not support.
    #[error("invalid parametrization usage: {0}")]
    InvalidParametrizationUsage(ErrorInfo),
    /// A coalescence momentum model produced a non-positive value.
    #[error("invalid coalescence momentum: {0}")]
    InvalidCoalescenceMomentum(ErrorInfo),
    /// The angular integrator exhausted its evaluation budget.
    #[error("integration did not converge: {0}")]
    IntegrationNonConvergence(ErrorInfo),
    /// Option decoding or validation failures.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Data table reading, parsing or writing failures.
    #[error("table error: {0}")]
    Table(ErrorInfo),
    /// The invariant backend returned a value outside its contract.
    #[error("backend contract violated: {0}")]
    Backend(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl CrxsError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            CrxsError::UnknownEnumName(info)
            | CrxsError::InvalidNucleus(info)
            | CrxsError::Kinematic(info)
            | CrxsError::InvalidParametrizationUsage(info)
            | CrxsError::InvalidCoalescenceMomentum(info)
            | CrxsError::IntegrationNonConvergence(info)
            | CrxsError::Config(info)
            | CrxsError::Table(info)
            | CrxsError::Backend(info) => info,
        }
    }

    /// Returns the stable machine readable code of the error.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}

/// Builds a [`CrxsError::Kinematic`] error for a named, malformed quantity.
pub fn kinematic_error(code: &str, message: impl Into<String>) -> CrxsError {
    CrxsError::Kinematic(ErrorInfo::new(code, message))
}
