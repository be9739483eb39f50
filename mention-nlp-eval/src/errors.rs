//! Error types for the evaluation harness.

use mention_nlp::MentionError;
use thiserror::Error;

use crate::fixture::Side;

/// Errors that can occur while loading or building a fixture.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The fixture is not valid TOML or does not have the fixture shape.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Error reading a fixture file or directory.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// Two entries of one side share an id.
    #[error("{side} mention `{id}` is defined more than once")]
    DuplicateId { side: Side, id: String },

    /// A complex slot names a filler id that no entry of the side defines.
    #[error("{side} mention `{id}` refers to unknown filler `{filler}`")]
    UnknownFiller {
        side: Side,
        id: String,
        filler: String,
    },

    /// A span is written end first.
    #[error("{side} mention `{id}` has reversed span [{start}, {end}]")]
    ReversedSpan {
        side: Side,
        id: String,
        start: usize,
        end: usize,
    },

    /// The entry could not be added to the mention graph.
    #[error("{side} mention `{id}`: {source}")]
    Graph {
        side: Side,
        id: String,
        #[source]
        source: MentionError,
    },
}

/// Result type for evaluation operations.
pub type EvalResult<T> = Result<T, EvalError>;
