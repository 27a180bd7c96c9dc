//! Error type shared by every stage of the pipeline.

use thiserror::Error;

/// Fatal outcomes of loading, expanding or interpreting an L-System.
///
/// A symbol with no production rule is *not* an error: it is treated as terminal.
#[derive(Debug, Error)]
pub enum LSystemError {
    /// A production is too long for the base-100 position encoding.
    #[error("production for '{symbol}' has {len} symbols; at most {max} are encodable", max = crate::instance::MAX_BRANCHING)]
    PositionOverflow { symbol: char, len: usize },

    /// A scheduled expansion task failed; the whole run is discarded.
    #[error("expansion failed: {0}")]
    ExpansionFailure(String),

    /// Malformed grammar or turtle configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The async runtime could not be started.
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LSystemError>;
