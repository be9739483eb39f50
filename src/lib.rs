//! Depth-bounded structural comparison of annotation mentions.
//!
//! Annotations are modelled as a graph of *mentions*: class mentions naming
//! an entity and grounded in text spans, primitive slots holding scalar
//! values, and complex slots holding nested class mentions. The comparators
//! decide whether two such structures (typically system output and a gold
//! standard) are identical, looking only as deep as asked.
//!
//! ## Modules
//!
//! - [`span`] - spans, text annotations and span comparison strategies
//! - [`mention`] - the mention graph arena and borrowed views
//! - [`tree`] - pre-order walk used by the lockstep comparison
//! - [`compare`] - the mention comparators
//! - [`config`] - TOML comparison settings
//! - [`display`] - single-line and annotated-text renderings
//!
//! ## Example
//!
//! ```
//! use mention_nlp::{IdenticalClassMentionComparator, MaxDepth, MentionGraph, Span, StrictSpanComparator};
//!
//! let mut gold = MentionGraph::new();
//! let expected = gold.add_class("protein", vec![Span::new(0, 8)]).unwrap();
//!
//! let mut system = MentionGraph::new();
//! let found = system.add_class("Protein", vec![Span::new(0, 8)]).unwrap();
//!
//! let result = IdenticalClassMentionComparator::new().compare(
//!     gold.get(expected).unwrap().as_class().unwrap(),
//!     system.get(found).unwrap().as_class().unwrap(),
//!     &StrictSpanComparator,
//!     MaxDepth::Unbounded,
//! );
//! assert_eq!(result, 0);
//! ```

pub mod compare;
pub mod config;
pub mod display;
pub mod error;
pub mod mention;
pub mod span;
pub mod tree;

pub use compare::{
    case_insensitive_names, tie_break, ClassDescent, CompareOptions,
    IdenticalClassMentionComparator, IdenticalComplexSlotMentionComparator,
    IdenticalMentionComparator, IdenticalSlotMentionComparator, MaxDepth, MentionComparator,
    NamePolicy, SlotMatching, MATCH, MISMATCH, MULTIPLIER,
};
pub use config::CompareConfig;
pub use display::{single_line, AnnotatedText};
pub use error::{CompareError, CompareResult, ConfigError, MentionError, MentionResult};
pub use mention::{
    ClassMention, ClassRef, ComplexSlotMention, ComplexSlotRef, Mention, MentionGraph, MentionId,
    MentionKind, MentionRef, PrimitiveSlotMention, SlotRef, SlotValue,
};
pub use span::{
    OverlapSpanComparator, Span, SpanComparator, SpanMatch, StrictSpanComparator, TextAnnotation,
};
pub use tree::{MentionTree, TreeNode};
