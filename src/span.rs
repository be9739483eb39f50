//! Character spans, text annotations and the pluggable span comparison strategies.
//!
//! A class mention is grounded in the document through a [`TextAnnotation`],
//! which may hold several disjoint spans when the mention is discontinuous.
//! How strictly two span lists must agree is decided by a [`SpanComparator`].

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A half-open character range `[start, end)` over a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start offset
    pub start: usize,
    /// Exclusive end offset
    pub end: usize,
}

impl Span {
    /// Create a new span. `start` and `end` are swapped when given in reverse.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if the two spans share at least one character.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Span::new(start, end)
    }
}

/// The text grounding of a class mention: one or more spans, kept sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextAnnotation {
    spans: Vec<Span>,
}

impl TextAnnotation {
    /// Create an annotation from spans in any order.
    ///
    /// Duplicate spans are collapsed since a character range can only be
    /// covered once.
    pub fn new(spans: impl IntoIterator<Item = Span>) -> Self {
        let mut spans: Vec<Span> = spans.into_iter().collect();
        spans.sort();
        spans.dedup();
        Self { spans }
    }

    /// The spans ordered by `(start, end)`.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Smallest range covering every span.
    pub fn covering_span(&self) -> Option<Span> {
        let start = self.spans.first()?.start;
        let end = self.spans.iter().map(|s| s.end).max()?;
        Some(Span::new(start, end))
    }

    pub fn is_discontinuous(&self) -> bool {
        self.spans.len() > 1
    }
}

impl fmt::Display for TextAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, span) in self.spans.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", span)?;
        }
        f.write_str("]")
    }
}

/// Strategy deciding whether two ordered span lists are equivalent.
///
/// A result of `0` means equivalent; any other value means they differ.
/// Implementations must be pure so comparators stay stateless.
pub trait SpanComparator: fmt::Debug + Send + Sync {
    fn compare(&self, spans1: &[Span], spans2: &[Span]) -> i32;
}

/// Both lists must hold exactly the same spans.
///
/// On difference the sign follows the lexicographic order of the lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictSpanComparator;

impl SpanComparator for StrictSpanComparator {
    fn compare(&self, spans1: &[Span], spans2: &[Span]) -> i32 {
        ordering_to_int(spans1.cmp(spans2))
    }
}

/// Lenient boundaries: any overlap between the two lists counts as a match.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapSpanComparator;

impl SpanComparator for OverlapSpanComparator {
    fn compare(&self, spans1: &[Span], spans2: &[Span]) -> i32 {
        if spans1 == spans2 {
            return 0;
        }
        let overlapping = spans1
            .iter()
            .any(|s1| spans2.iter().any(|s2| s1.overlaps(s2)));
        if overlapping {
            0
        } else {
            match ordering_to_int(spans1.cmp(spans2)) {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Serializable choice of span strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanMatch {
    #[default]
    Strict,
    Overlap,
}

impl SpanMatch {
    /// The comparator implementing this choice.
    pub fn comparator(self) -> &'static dyn SpanComparator {
        match self {
            SpanMatch::Strict => &StrictSpanComparator,
            SpanMatch::Overlap => &OverlapSpanComparator,
        }
    }
}

pub(crate) fn ordering_to_int(ordering: Ordering) -> i32 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}
