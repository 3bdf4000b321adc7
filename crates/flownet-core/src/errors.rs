//! Structured error types shared across flownet crates.

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
    /// Contextual key value pairs (identifiers, line numbers, etc.).
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

/// Canonical error type for the flownet engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum GraphError {
    /// The referenced vertex is not live in the graph.
    #[error("vertex not found: {0}")]
    VertexNotFound(ErrorInfo),
    /// The referenced edge is not stored in the graph.
    #[error("edge not found: {0}")]
    EdgeNotFound(ErrorInfo),
    /// The vertex identifier was minted by a different graph instance.
    #[error("vertex not in graph: {0}")]
    VertexNotInGraph(ErrorInfo),
    /// A self-loop was requested on a graph that does not allow them.
    #[error("self-loop rejected: {0}")]
    SelfLoopRejected(ErrorInfo),
    /// Generator parameters cannot produce a valid graph.
    #[error("invalid parameters: {0}")]
    InvalidParameters(ErrorInfo),
    /// A document or persisted line could not be decoded.
    #[error("malformed input: {0}")]
    Malformed(ErrorInfo),
    /// Reading or writing persisted data failed.
    #[error("io failure: {0}")]
    Io(ErrorInfo),
}

impl GraphError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            GraphError::VertexNotFound(info)
            | GraphError::EdgeNotFound(info)
            | GraphError::VertexNotInGraph(info)
            | GraphError::SelfLoopRejected(info)
            | GraphError::InvalidParameters(info)
            | GraphError::Malformed(info)
            | GraphError::Io(info) => info,
        }
    }

    /// Adds a context entry to the payload of any variant.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            GraphError::VertexNotFound(info) => {
                GraphError::VertexNotFound(info.with_context(key, value))
            }
            GraphError::EdgeNotFound(info) => GraphError::EdgeNotFound(info.with_context(key, value)),
            GraphError::VertexNotInGraph(info) => {
                GraphError::VertexNotInGraph(info.with_context(key, value))
            }
            GraphError::SelfLoopRejected(info) => {
                GraphError::SelfLoopRejected(info.with_context(key, value))
            }
            GraphError::InvalidParameters(info) => {
                GraphError::InvalidParameters(info.with_context(key, value))
            }
            GraphError::Malformed(info) => GraphError::Malformed(info.with_context(key, value)),
            GraphError::Io(info) => GraphError::Io(info.with_context(key, value)),
        }
    }

    /// Builds a [`GraphError::VertexNotFound`] for the raw identifier.
    pub fn vertex_not_found(raw: u64) -> Self {
        GraphError::VertexNotFound(
            ErrorInfo::new("unknown-vertex", "vertex does not exist").with_context("vertex", raw),
        )
    }

    /// Builds a [`GraphError::EdgeNotFound`] for the raw endpoint pair.
    pub fn edge_not_found(from: u64, to: u64) -> Self {
        GraphError::EdgeNotFound(
            ErrorInfo::new("unknown-edge", "edge does not exist")
                .with_context("from", from)
                .with_context("to", to),
        )
    }

    /// Builds a [`GraphError::Malformed`] with the provided code and message.
    pub fn malformed(code: impl Into<String>, message: impl Into<String>) -> Self {
        GraphError::Malformed(ErrorInfo::new(code, message))
    }

    /// Builds a [`GraphError::InvalidParameters`] with the provided code and message.
    pub fn invalid_parameters(code: impl Into<String>, message: impl Into<String>) -> Self {
        GraphError::InvalidParameters(ErrorInfo::new(code, message))
    }
}

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        GraphError::Io(
            ErrorInfo::new("io", err.to_string()).with_context("kind", format!("{:?}", err.kind())),
        )
    }
}
