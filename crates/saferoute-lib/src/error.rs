use thiserror::Error;

use crate::graph::NodeId;
use crate::path::Route;

/// Convenient result alias for the SafeRoute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an edge record cannot be inserted into the graph.
    #[error("malformed edge record at index {index}: {reason}")]
    MalformedEdge { index: usize, reason: String },

    /// Raised when no route connects the two nodes.
    #[error("no route found between {origin} and {destination}")]
    NoPathFound { origin: NodeId, destination: NodeId },

    /// Raised when the alternative search completed fewer routes than requested.
    /// The routes that were found are carried along so callers can still use them.
    #[error("requested {requested} routes but only {found} could be found")]
    InsufficientPaths {
        requested: usize,
        found: usize,
        routes: Vec<Route>,
    },

    /// Raised when relative danger is computed against a zero-risk baseline.
    #[error("relative danger is undefined against a zero-risk baseline")]
    UndefinedRiskRatio,

    /// Raised when a traversed edge has no risk entry in either direction.
    #[error("no risk recorded for edge {from} -> {to}")]
    UnknownEdge { from: NodeId, to: NodeId },

    /// Raised when a search exhausts its expansion budget.
    #[error("search exceeded its budget of {limit} expansions")]
    SearchBudgetExceeded { limit: usize },

    /// Raised when a routing request is internally inconsistent.
    #[error("invalid route request: {message}")]
    InvalidRequest { message: String },

    /// Raised when edge data could not be read or fails schema validation.
    #[error("invalid edge data: {message}")]
    EdgeData { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the caller can reasonably continue after this error
    /// (for example by presenting a partial result or an explanatory message).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::NoPathFound { .. }
                | Error::InsufficientPaths { .. }
                | Error::UndefinedRiskRatio
                | Error::SearchBudgetExceeded { .. }
        )
    }
}
