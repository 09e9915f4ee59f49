//! Structured error types shared across hypcert crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`HvError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, counts, etc.).
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

/// Canonical error type for hypcert.
///
/// A verification that simply does not go through is *not* an error: it is
/// reported as an uncertified result. Errors are reserved for malformed input
/// and for the solver's failure signal, which the orchestrator consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HvError {
    /// Malformed triangulation data (equation counts, row widths, shape counts).
    #[error("structure error: {0}")]
    Structure(ErrorInfo),
    /// Invalid working precision.
    #[error("precision error: {0}")]
    Precision(ErrorInfo),
    /// Invalid tolerance policy.
    #[error("policy error: {0}")]
    Policy(ErrorInfo),
    /// The shape solver could not certify a solution to the rectangular equations.
    #[error("solver error: {0}")]
    Solver(ErrorInfo),
    /// Serialization and fixture errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl HvError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HvError::Structure(info)
            | HvError::Precision(info)
            | HvError::Policy(info)
            | HvError::Solver(info)
            | HvError::Serde(info) => info,
        }
    }

    /// Whether the error is the solver's recoverable failure signal.
    pub fn is_solver_failure(&self) -> bool {
        matches!(self, HvError::Solver(_))
    }
}
