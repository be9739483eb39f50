use tracing::trace;

use super::identical::narrow_class;
use super::matching::all_matched;
use super::{
    mismatch, tie_break, ClassDescent, CompareOptions, IdenticalComplexSlotMentionComparator,
    IdenticalMentionComparator, IdenticalSlotMentionComparator, MaxDepth, MATCH,
};
use crate::error::CompareResult;
use crate::mention::{ClassRef, ComplexSlotRef, MentionRef, SlotRef};
use crate::span::SpanComparator;

/// Compares class mentions under the identical-name policy.
///
/// Names are checked first. Once `depth` reaches the bound only the spans
/// are compared; before that the slots are compared too (see
/// [`ClassDescent`]). Unequal mentions are ordered by [`tie_break`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IdenticalClassMentionComparator {
    base: IdenticalMentionComparator,
}

impl IdenticalClassMentionComparator {
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
        class1: ClassRef<'_>,
        class2: ClassRef<'_>,
        spans: &dyn SpanComparator,
        max_depth: MaxDepth,
    ) -> i32 {
        self.compare_at(class1, class2, spans, max_depth, 0)
    }

    /// Compare two mentions that must both be class mentions.
    pub fn compare_mentions(
        &self,
        mention1: MentionRef<'_>,
        mention2: MentionRef<'_>,
        spans: &dyn SpanComparator,
        max_depth: MaxDepth,
        depth: usize,
    ) -> CompareResult<i32> {
        let class1 = narrow_class(mention1)?;
        let class2 = narrow_class(mention2)?;
        Ok(self.compare_at(class1, class2, spans, max_depth, depth))
    }

    pub(super) fn compare_at(
        &self,
        class1: ClassRef<'_>,
        class2: ClassRef<'_>,
        spans: &dyn SpanComparator,
        max_depth: MaxDepth,
        depth: usize,
    ) -> i32 {
        let (mention1, mention2) = (class1.as_mention(), class2.as_mention());
        if !self.base.has_equivalent_mention_names(mention1, mention2) {
            trace!(left = class1.name(), right = class2.name(), depth, "class names differ");
            return mismatch(mention1, mention2);
        }

        let spans_equal = spans.compare(class1.spans(), class2.spans()) == MATCH;
        if max_depth.is_reached_at(depth) {
            return if spans_equal {
                MATCH
            } else {
                mismatch(mention1, mention2)
            };
        }

        match self.base.options().class_descent {
            ClassDescent::Legacy => tie_break(mention1, mention2),
            ClassDescent::Descend => {
                if spans_equal
                    && self.slots_equal(class1, class2, spans, max_depth, depth + 1)
                    && self.complex_slots_equal(class1, class2, spans, max_depth, depth + 1)
                {
                    MATCH
                } else {
                    trace!(name = class1.name(), depth, "class mention structure differs");
                    mismatch(mention1, mention2)
                }
            }
        }
    }

    fn slots_equal(
        &self,
        class1: ClassRef<'_>,
        class2: ClassRef<'_>,
        spans: &dyn SpanComparator,
        max_depth: MaxDepth,
        depth: usize,
    ) -> bool {
        let slots1: Vec<SlotRef<'_>> = class1.primitive_slots().collect();
        let slots2: Vec<SlotRef<'_>> = class2.primitive_slots().collect();
        if slots1.len() != slots2.len() {
            return false;
        }
        let options = self.base.options();
        let slot = IdenticalSlotMentionComparator::with_options(options);
        all_matched(&slots1, &slots2, options.slot_matching, |s1, s2| {
            slot.compare(*s1, *s2, spans, max_depth, depth) == MATCH
        })
    }

    fn complex_slots_equal(
        &self,
        class1: ClassRef<'_>,
        class2: ClassRef<'_>,
        spans: &dyn SpanComparator,
        max_depth: MaxDepth,
        depth: usize,
    ) -> bool {
        let slots1: Vec<ComplexSlotRef<'_>> = class1.complex_slots().collect();
        let slots2: Vec<ComplexSlotRef<'_>> = class2.complex_slots().collect();
        if slots1.len() != slots2.len() {
            return false;
        }
        let options = self.base.options();
        let complex = IdenticalComplexSlotMentionComparator::with_options(options);
        all_matched(&slots1, &slots2, options.slot_matching, |c1, c2| {
            complex.compare(*c1, *c2, spans, max_depth, depth) == MATCH
        })
    }
}
