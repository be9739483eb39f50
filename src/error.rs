//! Error types for graph construction, comparison and configuration.
//!
//! A comparison that finds two mentions unequal is *not* an error: it is
//! reported through the integer result. These types cover misuse only.

use thiserror::Error;

use crate::mention::{MentionId, MentionKind};

/// Errors raised while building or navigating a [`MentionGraph`](crate::MentionGraph).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MentionError {
    /// The id does not belong to this graph.
    #[error("unknown mention {0}")]
    Unknown(MentionId),

    /// An operation required a mention of another kind.
    #[error("{id} is a {found} mention, expected a {expected} mention")]
    WrongKind {
        id: MentionId,
        expected: MentionKind,
        found: MentionKind,
    },

    /// A class mention must be grounded by at least one span.
    #[error("class mention `{name}` has no spans")]
    NoSpans { name: String },

    /// Adding the filler would let a class mention reach itself.
    #[error("filler {filler} would make {complex_slot} part of a cycle")]
    Cycle {
        complex_slot: MentionId,
        filler: MentionId,
    },
}

/// Errors raised by the typed comparators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    /// A typed comparator was handed a mention of the wrong variant.
    #[error("cannot compare a {found} mention with a {expected} mention comparator")]
    TypeMismatch {
        expected: MentionKind,
        found: MentionKind,
    },
}

/// Errors raised while loading a [`CompareConfig`](crate::CompareConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse comparison config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Depths below `-1` have no meaning.
    #[error("invalid max depth {0}, expected -1 or a non-negative integer")]
    InvalidDepth(i64),
}

/// Result type for graph operations.
pub type MentionResult<T> = Result<T, MentionError>;

/// Result type for typed comparisons.
pub type CompareResult<T> = Result<T, CompareError>;
