//! Structured error types shared across HG crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`GraphError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (identifiers, list lengths, etc.).
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
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
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

/// Canonical error type for hypergraph store operations.
///
/// A store never applies part of an operation before returning one of these,
/// so callers may keep using the store after any failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum GraphError {
    /// An identifier does not resolve to an entity of the expected kind.
    #[error("not found: {0}")]
    NotFound(ErrorInfo),
    /// Neither endpoint of an edge creation resolves to a stored item.
    #[error("dangling reference: {0}")]
    DanglingReference(ErrorInfo),
    /// The requested connection shape is not supported (edge to edge, rejected self-loop).
    #[error("invalid connection: {0}")]
    InvalidConnection(ErrorInfo),
    /// A malformed argument, such as an unknown edge end name.
    #[error("invalid argument: {0}")]
    InvalidArgument(ErrorInfo),
    /// Snapshot encoding and decoding errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl GraphError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            GraphError::NotFound(info)
            | GraphError::DanglingReference(info)
            | GraphError::InvalidConnection(info)
            | GraphError::InvalidArgument(info)
            | GraphError::Serde(info) => info,
        }
    }

    /// Returns the stable code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry to the payload, keeping the variant.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        let value = value.to_string();
        match self {
            GraphError::NotFound(info) => GraphError::NotFound(info.with_context(key, value)),
            GraphError::DanglingReference(info) => {
                GraphError::DanglingReference(info.with_context(key, value))
            }
            GraphError::InvalidConnection(info) => {
                GraphError::InvalidConnection(info.with_context(key, value))
            }
            GraphError::InvalidArgument(info) => {
                GraphError::InvalidArgument(info.with_context(key, value))
            }
            GraphError::Serde(info) => GraphError::Serde(info.with_context(key, value)),
        }
    }

    /// Attaches a remediation hint to the payload, keeping the variant.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        match self {
            GraphError::NotFound(info) => GraphError::NotFound(info.with_hint(hint)),
            GraphError::DanglingReference(info) => {
                GraphError::DanglingReference(info.with_hint(hint))
            }
            GraphError::InvalidConnection(info) => {
                GraphError::InvalidConnection(info.with_hint(hint))
            }
            GraphError::InvalidArgument(info) => GraphError::InvalidArgument(info.with_hint(hint)),
            GraphError::Serde(info) => GraphError::Serde(info.with_hint(hint)),
        }
    }
}
