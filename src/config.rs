//! Comparison settings loaded from TOML.
//!
//! ```toml
//! max_depth = 2            # -1 compares the whole structure
//! span_match = "overlap"   # or "strict"
//! class_descent = "descend" # or "legacy"
//! slot_matching = "loose"  # or "bijective"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compare::{ClassDescent, CompareOptions, MaxDepth, SlotMatching};
use crate::error::ConfigError;
use crate::span::{SpanComparator, SpanMatch};

/// Everything a comparison run needs besides the mentions themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
    pub max_depth: MaxDepth,
    pub span_match: SpanMatch,
    pub class_descent: ClassDescent,
    pub slot_matching: SlotMatching,
}

impl CompareConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn options(&self) -> CompareOptions {
        CompareOptions {
            class_descent: self.class_descent,
            slot_matching: self.slot_matching,
        }
    }

    pub fn span_comparator(&self) -> &'static dyn SpanComparator {
        self.span_match.comparator()
    }

    pub fn with_max_depth(mut self, max_depth: MaxDepth) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_span_match(mut self, span_match: SpanMatch) -> Self {
        self.span_match = span_match;
        self
    }
}
