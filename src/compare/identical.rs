use super::{CompareOptions, MaxDepth, MentionComparator};
use crate::error::{CompareError, CompareResult};
use crate::mention::{ClassRef, ComplexSlotRef, MentionKind, MentionRef, SlotRef};
use crate::span::SpanComparator;

/// Names are equivalent when they are equal ignoring case.
pub fn case_insensitive_names(name1: &str, name2: &str) -> bool {
    name1 == name2 || name1.to_lowercase() == name2.to_lowercase()
}

/// "Identical" means equal names (ignoring case) plus equal structure.
///
/// This is the policy shared by the typed comparators; it also exposes the
/// generic lockstep walk under that policy.
#[derive(Debug, Clone, Copy)]
pub struct IdenticalMentionComparator {
    walk: MentionComparator,
    options: CompareOptions,
}

impl Default for IdenticalMentionComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdenticalMentionComparator {
    pub fn new() -> Self {
        Self::with_options(CompareOptions::default())
    }

    pub fn with_options(options: CompareOptions) -> Self {
        Self {
            walk: MentionComparator::new(case_insensitive_names),
            options,
        }
    }

    pub fn options(&self) -> CompareOptions {
        self.options
    }

    pub fn has_equivalent_mention_names(
        &self,
        mention1: MentionRef<'_>,
        mention2: MentionRef<'_>,
    ) -> bool {
        self.walk.has_equivalent_mention_names(mention1, mention2)
    }

    /// Lockstep walk over both trees, exact spans, no depth bound.
    pub fn compare(&self, mention1: MentionRef<'_>, mention2: MentionRef<'_>) -> i32 {
        self.walk.compare(mention1, mention2)
    }

    /// Lockstep walk over both trees.
    pub fn compare_with(
        &self,
        mention1: MentionRef<'_>,
        mention2: MentionRef<'_>,
        spans: &dyn SpanComparator,
        max_depth: MaxDepth,
    ) -> i32 {
        self.walk.compare_with(mention1, mention2, spans, max_depth)
    }
}

pub(super) fn narrow_class(mention: MentionRef<'_>) -> CompareResult<ClassRef<'_>> {
    mention.as_class().ok_or(CompareError::TypeMismatch {
        expected: MentionKind::Class,
        found: mention.kind(),
    })
}

pub(super) fn narrow_slot(mention: MentionRef<'_>) -> CompareResult<SlotRef<'_>> {
    mention.as_slot().ok_or(CompareError::TypeMismatch {
        expected: MentionKind::Slot,
        found: mention.kind(),
    })
}

pub(super) fn narrow_complex_slot(mention: MentionRef<'_>) -> CompareResult<ComplexSlotRef<'_>> {
    mention.as_complex_slot().ok_or(CompareError::TypeMismatch {
        expected: MentionKind::ComplexSlot,
        found: mention.kind(),
    })
}
