use tracing::trace;

use super::identical::narrow_complex_slot;
use super::matching::all_matched;
use super::{
    mismatch, CompareOptions, IdenticalClassMentionComparator, IdenticalMentionComparator,
    MaxDepth, MATCH,
};
use crate::error::CompareResult;
use crate::mention::{ClassRef, ComplexSlotRef, MentionRef};
use crate::span::SpanComparator;

/// Compares complex slot mentions under the identical-name policy.
///
/// Both slots need the same number of fillers, and every filler on the left
/// must be judged equal to some filler on the right by
/// [`IdenticalClassMentionComparator`] at the same depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdenticalComplexSlotMentionComparator {
    base: IdenticalMentionComparator,
}

impl IdenticalComplexSlotMentionComparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompareOptions) -> Self {
        Self {
            base: IdenticalMentionComparator::with_options(options),
        }
    }

    pub fn compare(
        &self,
        slot1: ComplexSlotRef<'_>,
        slot2: ComplexSlotRef<'_>,
        spans: &dyn SpanComparator,
        max_depth: MaxDepth,
        depth: usize,
    ) -> i32 {
        let (mention1, mention2) = (slot1.as_mention(), slot2.as_mention());
        if slot1.filler_count() != slot2.filler_count()
            || !self.base.has_equivalent_mention_names(mention1, mention2)
        {
            trace!(
                left = slot1.name(),
                right = slot2.name(),
                depth,
                "complex slot name or filler count differs"
            );
            return mismatch(mention1, mention2);
        }

        let options = self.base.options();
        let class = IdenticalClassMentionComparator::with_options(options);
        let fillers1: Vec<ClassRef<'_>> = slot1.fillers().collect();
        let fillers2: Vec<ClassRef<'_>> = slot2.fillers().collect();
        let matched = all_matched(&fillers1, &fillers2, options.slot_matching, |f1, f2| {
            class.compare_at(*f1, *f2, spans, max_depth, depth) == MATCH
        });
        if matched {
            MATCH
        } else {
            trace!(name = slot1.name(), depth, "complex slot fillers differ");
            mismatch(mention1, mention2)
        }
    }

    /// Compare two mentions that must both be complex slot mentions.
    pub fn compare_mentions(
        &self,
        mention1: MentionRef<'_>,
        mention2: MentionRef<'_>,
        spans: &dyn SpanComparator,
        max_depth: MaxDepth,
        depth: usize,
    ) -> CompareResult<i32> {
        let slot1 = narrow_complex_slot(mention1)?;
        let slot2 = narrow_complex_slot(mention2)?;
        Ok(self.compare(slot1, slot2, spans, max_depth, depth))
    }
}
