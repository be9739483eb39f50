use tracing::trace;

use super::identical::narrow_slot;
use super::matching::all_matched;
use super::{mismatch, CompareOptions, IdenticalMentionComparator, MaxDepth, MATCH};
use crate::error::CompareResult;
use crate::mention::{MentionRef, SlotRef, SlotValue};
use crate::span::SpanComparator;

/// Compares primitive slot mentions under the identical-name policy.
///
/// Both slots need the same number of values, and every value on the left
/// must match a value on the right: text ignoring case, anything else by
/// plain equality. In the default [`SlotMatching::Loose`](super::SlotMatching)
/// mode a single right value may satisfy several left values.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdenticalSlotMentionComparator {
    base: IdenticalMentionComparator,
}

impl IdenticalSlotMentionComparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompareOptions) -> Self {
        Self {
            base: IdenticalMentionComparator::with_options(options),
        }
    }

    /// `spans`, `max_depth` and `depth` do not affect primitive values; they
    /// are accepted so every typed comparator has the same shape.
    pub fn compare(
        &self,
        slot1: SlotRef<'_>,
        slot2: SlotRef<'_>,
        _spans: &dyn SpanComparator,
        _max_depth: MaxDepth,
        depth: usize,
    ) -> i32 {
        let (mention1, mention2) = (slot1.as_mention(), slot2.as_mention());
        if slot1.values().len() != slot2.values().len()
            || !self.base.has_equivalent_mention_names(mention1, mention2)
        {
            trace!(left = slot1.name(), right = slot2.name(), depth, "slot name or size differs");
            return mismatch(mention1, mention2);
        }

        let matching = self.base.options().slot_matching;
        if all_matched(slot1.values(), slot2.values(), matching, SlotValue::matches) {
            MATCH
        } else {
            trace!(name = slot1.name(), depth, "slot values differ");
            mismatch(mention1, mention2)
        }
    }

    /// Compare two mentions that must both be primitive slot mentions.
    pub fn compare_mentions(
        &self,
        mention1: MentionRef<'_>,
        mention2: MentionRef<'_>,
        spans: &dyn SpanComparator,
        max_depth: MaxDepth,
        depth: usize,
    ) -> CompareResult<i32> {
        let slot1 = narrow_slot(mention1)?;
        let slot2 = narrow_slot(mention2)?;
        Ok(self.compare(slot1, slot2, spans, max_depth, depth))
    }
}
