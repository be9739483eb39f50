//! Structural comparison of mentions.
//!
//! Results follow an integer convention shared by every comparator here:
//! [`MATCH`] (`0`) when the mentions are judged identical, otherwise a
//! non-zero value scaled by [`MULTIPLIER`]. The walk in
//! [`MentionComparator`] always reports [`MISMATCH`]; the typed comparators
//! report the ordering of the two [`single_line`](crate::display::single_line)
//! renderings so mismatches can still be sorted for reports.
//!
//! Scaling by three keeps mention-structure differences apart from the
//! plain `-1`/`1` results of a span-only comparison run alongside.

mod class;
mod complex_slot;
mod identical;
mod matching;
mod slot;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::mention::{Mention, MentionRef, SlotValue};
use crate::span::{ordering_to_int, SpanComparator, StrictSpanComparator};

pub use class::IdenticalClassMentionComparator;
pub use complex_slot::IdenticalComplexSlotMentionComparator;
pub use identical::{case_insensitive_names, IdenticalMentionComparator};
pub use slot::IdenticalSlotMentionComparator;

pub const MATCH: i32 = 0;
pub const MULTIPLIER: i32 = 3;
pub const MISMATCH: i32 = -MULTIPLIER;

/// How deep below the root mention a comparison looks.
///
/// Serialized as the integer convention where `-1` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum MaxDepth {
    #[default]
    Unbounded,
    Limit(usize),
}

impl MaxDepth {
    /// Whether a node at `depth` lies beyond the bound.
    pub fn is_exceeded_by(self, depth: usize) -> bool {
        matches!(self, MaxDepth::Limit(max) if depth > max)
    }

    /// Whether a node at `depth` sits on or beyond the bound.
    pub fn is_reached_at(self, depth: usize) -> bool {
        matches!(self, MaxDepth::Limit(max) if depth >= max)
    }
}

impl TryFrom<i64> for MaxDepth {
    type Error = ConfigError;

    fn try_from(depth: i64) -> Result<Self, Self::Error> {
        match depth {
            -1 => Ok(MaxDepth::Unbounded),
            n if n >= 0 => Ok(MaxDepth::Limit(n as usize)),
            n => Err(ConfigError::InvalidDepth(n)),
        }
    }
}

impl From<MaxDepth> for i64 {
    fn from(depth: MaxDepth) -> Self {
        match depth {
            MaxDepth::Unbounded => -1,
            MaxDepth::Limit(n) => n as i64,
        }
    }
}

impl From<usize> for MaxDepth {
    fn from(depth: usize) -> Self {
        MaxDepth::Limit(depth)
    }
}

/// What a class mention comparison checks before the depth bound is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassDescent {
    /// Spans, primitive slots and complex slots must all be equal.
    #[default]
    Descend,
    /// Only the single-line renderings decide, as older tools did. Spans
    /// and slots never produce a match on their own.
    Legacy,
}

/// How the members of two slots are paired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotMatching {
    /// Every left member needs *some* equal right member. One right member
    /// may serve several left members.
    #[default]
    Loose,
    /// Members must pair up one-to-one.
    Bijective,
}

/// Options shared by the typed comparators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompareOptions {
    #[serde(default)]
    pub class_descent: ClassDescent,
    #[serde(default)]
    pub slot_matching: SlotMatching,
}

/// Deterministic fallback ordering of two mentions: the ordering of their
/// single-line renderings, scaled by [`MULTIPLIER`].
pub fn tie_break(mention1: MentionRef<'_>, mention2: MentionRef<'_>) -> i32 {
    ordering_to_int(mention1.single_line().cmp(&mention2.single_line())) * MULTIPLIER
}

/// [`tie_break`] for mentions already judged unequal: never returns [`MATCH`].
pub(crate) fn mismatch(mention1: MentionRef<'_>, mention2: MentionRef<'_>) -> i32 {
    match tie_break(mention1, mention2) {
        MATCH => MISMATCH,
        n => n,
    }
}

/// Decides whether two mention names denote the same thing.
pub type NamePolicy = fn(&str, &str) -> bool;

/// Lockstep pre-order comparison of two mention trees.
///
/// Both trees are flattened into `(mention, depth)` sequences by
/// [`MentionTree`](crate::MentionTree) and walked side by side. The pair at
/// each position must sit at the same depth and agree locally:
///
/// - same variant,
/// - same number of children,
/// - equivalent names under the [`NamePolicy`],
/// - primitive slots: equal values once rendered, sorted and compared,
///   so order is ignored and multiplicity counts,
/// - class mentions: spans equal under the span comparator.
///
/// Nodes deeper than the bound are skipped, but a tree with nodes left
/// over after the other is exhausted never matches.
#[derive(Clone, Copy)]
pub struct MentionComparator {
    names: NamePolicy,
}

impl std::fmt::Debug for MentionComparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MentionComparator").finish_non_exhaustive()
    }
}

impl MentionComparator {
    pub fn new(names: NamePolicy) -> Self {
        Self { names }
    }

    pub fn has_equivalent_mention_names(
        &self,
        mention1: MentionRef<'_>,
        mention2: MentionRef<'_>,
    ) -> bool {
        (self.names)(mention1.name(), mention2.name())
    }

    /// Compare whole trees with exact span matching.
    pub fn compare(&self, mention1: MentionRef<'_>, mention2: MentionRef<'_>) -> i32 {
        self.compare_with(mention1, mention2, &StrictSpanComparator, MaxDepth::Unbounded)
    }

    pub fn compare_with(
        &self,
        mention1: MentionRef<'_>,
        mention2: MentionRef<'_>,
        spans: &dyn SpanComparator,
        max_depth: MaxDepth,
    ) -> i32 {
        let mut walk1 = mention1.tree();
        let mut walk2 = mention2.tree();
        loop {
            let (node1, node2) = match (walk1.next(), walk2.next()) {
                (None, None) => return MATCH,
                (Some(node), None) | (None, Some(node)) => {
                    debug!(
                        depth = node.depth,
                        mention = node.mention.name(),
                        "mention walk: one tree has nodes left over"
                    );
                    return MISMATCH;
                }
                (Some(node1), Some(node2)) => (node1, node2),
            };

            if node1.depth != node2.depth {
                debug!(
                    left_depth = node1.depth,
                    right_depth = node2.depth,
                    "mention walk: depth mismatch"
                );
                return MISMATCH;
            }
            if max_depth.is_exceeded_by(node1.depth) {
                continue;
            }
            if !self.nodes_equal(node1.mention, node2.mention, spans) {
                debug!(
                    depth = node1.depth,
                    left = node1.mention.name(),
                    right = node2.mention.name(),
                    "mention walk: nodes differ"
                );
                return MISMATCH;
            }
        }
    }

    fn nodes_equal(
        &self,
        mention1: MentionRef<'_>,
        mention2: MentionRef<'_>,
        spans: &dyn SpanComparator,
    ) -> bool {
        if mention1.kind() != mention2.kind()
            || mention1.child_count() != mention2.child_count()
            || !self.has_equivalent_mention_names(mention1, mention2)
        {
            return false;
        }
        match (mention1.mention(), mention2.mention()) {
            (Mention::Slot(slot1), Mention::Slot(slot2)) => {
                sorted_keys(&slot1.values) == sorted_keys(&slot2.values)
            }
            (Mention::Class(class1), Mention::Class(class2)) => {
                spans.compare(class1.annotation.spans(), class2.annotation.spans()) == MATCH
            }
            _ => true,
        }
    }
}

fn sorted_keys(values: &[SlotValue]) -> Vec<String> {
    let mut keys: Vec<String> = values.iter().map(SlotValue::comparison_key).collect();
    keys.sort();
    keys
}
