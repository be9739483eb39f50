//! The mention graph: class mentions, primitive slots and complex slots.
//!
//! All mentions live in a [`MentionGraph`] arena and refer to one another by
//! [`MentionId`]. A primitive or complex slot is owned by exactly one class
//! mention, while a class mention may fill any number of complex slots, so
//! the same sub-mention can be reached along several paths. The graph only
//! accepts fillers that keep it acyclic.

mod view;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MentionError, MentionResult};
use crate::span::{Span, TextAnnotation};

pub use view::{ClassRef, ComplexSlotRef, MentionRef, SlotRef};

/// Index of a mention inside its [`MentionGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MentionId(usize);

impl MentionId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for MentionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// The variant category of a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MentionKind {
    Class,
    Slot,
    ComplexSlot,
}

impl fmt::Display for MentionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MentionKind::Class => "class",
            MentionKind::Slot => "primitive slot",
            MentionKind::ComplexSlot => "complex slot",
        })
    }
}

/// A scalar held by a primitive slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SlotValue {
    /// Value equality where text is compared ignoring case.
    ///
    /// Floats compare by bit pattern, so `NaN` matches itself and `-0.0`
    /// does not match `0.0`.
    pub fn matches(&self, other: &SlotValue) -> bool {
        match (self, other) {
            (SlotValue::Text(a), SlotValue::Text(b)) => a.to_lowercase() == b.to_lowercase(),
            (SlotValue::Float(a), SlotValue::Float(b)) => a.to_bits() == b.to_bits(),
            (a, b) => a == b,
        }
    }

    /// The form used when slot values are compared as sorted strings.
    pub(crate) fn comparison_key(&self) -> String {
        match self {
            SlotValue::Text(text) => text.to_lowercase(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValue::Boolean(b) => write!(f, "{}", b),
            SlotValue::Integer(n) => write!(f, "{}", n),
            SlotValue::Float(x) => write!(f, "{}", x),
            SlotValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for SlotValue {
    fn from(b: bool) -> Self {
        SlotValue::Boolean(b)
    }
}

impl From<i64> for SlotValue {
    fn from(n: i64) -> Self {
        SlotValue::Integer(n)
    }
}

impl From<i32> for SlotValue {
    fn from(n: i32) -> Self {
        SlotValue::Integer(n.into())
    }
}

impl From<f64> for SlotValue {
    fn from(x: f64) -> Self {
        SlotValue::Float(x)
    }
}

impl From<&str> for SlotValue {
    fn from(s: &str) -> Self {
        SlotValue::Text(s.to_string())
    }
}

impl From<String> for SlotValue {
    fn from(s: String) -> Self {
        SlotValue::Text(s)
    }
}

/// A recognized entity or category, grounded by a text annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMention {
    pub name: String,
    pub annotation: TextAnnotation,
    /// Primitive and complex slots in insertion order
    slots: Vec<MentionId>,
}

impl ClassMention {
    pub fn slot_ids(&self) -> &[MentionId] {
        &self.slots
    }
}

/// A named multiset of scalar values attached to a class mention.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSlotMention {
    pub name: String,
    pub values: Vec<SlotValue>,
}

/// A named set of class mentions attached to a class mention.
///
/// Having no fillers is legitimate and distinct from the slot being absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSlotMention {
    pub name: String,
    fillers: Vec<MentionId>,
}

impl ComplexSlotMention {
    pub fn filler_ids(&self) -> &[MentionId] {
        &self.fillers
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mention {
    Class(ClassMention),
    Slot(PrimitiveSlotMention),
    ComplexSlot(ComplexSlotMention),
}

impl Mention {
    pub fn name(&self) -> &str {
        match self {
            Mention::Class(m) => &m.name,
            Mention::Slot(m) => &m.name,
            Mention::ComplexSlot(m) => &m.name,
        }
    }

    pub fn kind(&self) -> MentionKind {
        match self {
            Mention::Class(_) => MentionKind::Class,
            Mention::Slot(_) => MentionKind::Slot,
            Mention::ComplexSlot(_) => MentionKind::ComplexSlot,
        }
    }

    /// Ids of the mentions directly below this one in a tree walk.
    pub fn child_ids(&self) -> &[MentionId] {
        match self {
            Mention::Class(m) => &m.slots,
            Mention::Slot(_) => &[],
            Mention::ComplexSlot(m) => &m.fillers,
        }
    }
}

/// Arena owning every mention of one annotation set.
#[derive(Debug, Clone, Default)]
pub struct MentionGraph {
    mentions: Vec<Mention>,
}

impl MentionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }

    /// Add a class mention grounded by `spans`.
    pub fn add_class(
        &mut self,
        name: impl Into<String>,
        spans: impl IntoIterator<Item = Span>,
    ) -> MentionResult<MentionId> {
        let name = name.into();
        let annotation = TextAnnotation::new(spans);
        if annotation.spans().is_empty() {
            return Err(MentionError::NoSpans { name });
        }
        Ok(self.push(Mention::Class(ClassMention {
            name,
            annotation,
            slots: Vec::new(),
        })))
    }

    /// Attach a primitive slot holding `values` to the class mention `owner`.
    pub fn add_slot<I>(
        &mut self,
        owner: MentionId,
        name: impl Into<String>,
        values: I,
    ) -> MentionResult<MentionId>
    where
        I: IntoIterator,
        I::Item: Into<SlotValue>,
    {
        self.expect_kind(owner, MentionKind::Class)?;
        let id = self.push(Mention::Slot(PrimitiveSlotMention {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }));
        self.attach_slot(owner, id);
        Ok(id)
    }

    /// Attach an empty complex slot to the class mention `owner`.
    pub fn add_complex_slot(
        &mut self,
        owner: MentionId,
        name: impl Into<String>,
    ) -> MentionResult<MentionId> {
        self.expect_kind(owner, MentionKind::Class)?;
        let id = self.push(Mention::ComplexSlot(ComplexSlotMention {
            name: name.into(),
            fillers: Vec::new(),
        }));
        self.attach_slot(owner, id);
        Ok(id)
    }

    /// Add the class mention `filler` to a complex slot.
    ///
    /// A class mention may fill several slots, and the same slot twice.
    /// Fails if the complex slot is reachable from `filler`.
    pub fn add_filler(&mut self, complex_slot: MentionId, filler: MentionId) -> MentionResult<()> {
        self.expect_kind(complex_slot, MentionKind::ComplexSlot)?;
        self.expect_kind(filler, MentionKind::Class)?;
        if self.reaches(filler, complex_slot) {
            return Err(MentionError::Cycle {
                complex_slot,
                filler,
            });
        }
        if let Mention::ComplexSlot(slot) = &mut self.mentions[complex_slot.0] {
            slot.fillers.push(filler);
        }
        Ok(())
    }

    /// Borrowed view of a mention, if the id belongs to this graph.
    pub fn get(&self, id: MentionId) -> Option<MentionRef<'_>> {
        if id.0 < self.mentions.len() {
            Some(MentionRef::new(self, id))
        } else {
            None
        }
    }

    /// Like [`get`](Self::get) but reporting unknown ids as an error.
    pub fn mention(&self, id: MentionId) -> MentionResult<MentionRef<'_>> {
        self.get(id).ok_or(MentionError::Unknown(id))
    }

    /// Every mention in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = MentionRef<'_>> + '_ {
        (0..self.mentions.len()).map(move |idx| MentionRef::new(self, MentionId(idx)))
    }

    /// Class mentions that do not fill any complex slot, in insertion order.
    pub fn roots(&self) -> Vec<ClassRef<'_>> {
        let mut is_filler = vec![false; self.mentions.len()];
        for mention in &self.mentions {
            if let Mention::ComplexSlot(slot) = mention {
                for filler in &slot.fillers {
                    is_filler[filler.0] = true;
                }
            }
        }
        self.iter()
            .filter(|m| !is_filler[m.id().0])
            .filter_map(|m| m.as_class())
            .collect()
    }

    pub(crate) fn node(&self, id: MentionId) -> &Mention {
        &self.mentions[id.0]
    }

    fn push(&mut self, mention: Mention) -> MentionId {
        self.mentions.push(mention);
        MentionId(self.mentions.len() - 1)
    }

    fn attach_slot(&mut self, owner: MentionId, slot: MentionId) {
        if let Mention::Class(class) = &mut self.mentions[owner.0] {
            class.slots.push(slot);
        }
    }

    fn expect_kind(&self, id: MentionId, expected: MentionKind) -> MentionResult<()> {
        let found = self
            .mentions
            .get(id.0)
            .ok_or(MentionError::Unknown(id))?
            .kind();
        if found == expected {
            Ok(())
        } else {
            Err(MentionError::WrongKind {
                id,
                expected,
                found,
            })
        }
    }

    /// Whether `target` is `from` or lies below it.
    fn reaches(&self, from: MentionId, target: MentionId) -> bool {
        let mut seen = vec![false; self.mentions.len()];
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if std::mem::replace(&mut seen[id.0], true) {
                continue;
            }
            stack.extend_from_slice(self.node(id).child_ids());
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_class_with_slots() {
        let mut graph = MentionGraph::new();
        let protein = graph.add_class("protein", vec![Span::new(0, 8)]).unwrap();
        let slot = graph.add_slot(protein, "entrez_gene_id", vec![999999]).unwrap();
        let csm = graph.add_complex_slot(protein, "transport origin").unwrap();

        let class = graph.get(protein).unwrap().as_class().unwrap();
        assert_eq!(class.name(), "protein");
        assert_eq!(class.as_mention().child_count(), 2);
        assert_eq!(graph.node(protein).child_ids(), &[slot, csm]);
        assert_eq!(graph.get(slot).unwrap().kind(), MentionKind::Slot);
    }

    #[test]
    fn rejects_class_without_spans() {
        let mut graph = MentionGraph::new();
        let err = graph.add_class("protein", Vec::new()).unwrap_err();
        assert_eq!(
            err,
            MentionError::NoSpans {
                name: "protein".to_string()
            }
        );
    }

    #[test]
    fn slots_need_a_class_owner() {
        let mut graph = MentionGraph::new();
        let protein = graph.add_class("protein", vec![Span::new(0, 8)]).unwrap();
        let csm = graph.add_complex_slot(protein, "origin").unwrap();

        let err = graph.add_slot(csm, "id", vec![1]).unwrap_err();
        assert!(matches!(
            err,
            MentionError::WrongKind {
                expected: MentionKind::Class,
                found: MentionKind::ComplexSlot,
                ..
            }
        ));
    }

    #[test]
    fn shared_fillers_are_allowed() {
        let mut graph = MentionGraph::new();
        let nucleus = graph.add_class("nucleus", vec![Span::new(20, 27)]).unwrap();
        let transport = graph.add_class("protein transport", vec![Span::new(0, 9)]).unwrap();
        let origin = graph.add_complex_slot(transport, "transport origin").unwrap();
        let location = graph.add_complex_slot(transport, "transport location").unwrap();

        graph.add_filler(origin, nucleus).unwrap();
        graph.add_filler(location, nucleus).unwrap();

        let roots: Vec<_> = graph.roots().iter().map(|r| r.id()).collect();
        assert_eq!(roots, vec![transport]);
    }

    #[test]
    fn rejects_cyclic_fillers() {
        let mut graph = MentionGraph::new();
        let a = graph.add_class("a", vec![Span::new(0, 1)]).unwrap();
        let b = graph.add_class("b", vec![Span::new(2, 3)]).unwrap();
        let a_slot = graph.add_complex_slot(a, "next").unwrap();
        let b_slot = graph.add_complex_slot(b, "next").unwrap();

        graph.add_filler(a_slot, b).unwrap();
        assert_eq!(
            graph.add_filler(b_slot, a),
            Err(MentionError::Cycle {
                complex_slot: b_slot,
                filler: a
            })
        );
        assert!(graph.add_filler(a_slot, a).is_err());
    }

    #[test]
    fn unknown_ids_are_reported() {
        let graph = MentionGraph::new();
        assert!(graph.get(MentionId(3)).is_none());
        assert_eq!(
            graph.mention(MentionId(3)).unwrap_err(),
            MentionError::Unknown(MentionId(3))
        );
    }

    #[test]
    fn text_values_match_ignoring_case() {
        assert!(SlotValue::from("Nucleus").matches(&SlotValue::from("NUCLEUS")));
        assert!(SlotValue::from(3).matches(&SlotValue::Integer(3)));
        assert!(!SlotValue::from(3).matches(&SlotValue::from("3")));
    }

    #[test]
    fn float_values_match_by_bits() {
        assert!(SlotValue::from(f64::NAN).matches(&SlotValue::from(f64::NAN)));
        assert!(!SlotValue::from(-0.0).matches(&SlotValue::from(0.0)));
        assert!(SlotValue::from(1.5).matches(&SlotValue::Float(1.5)));
        assert!(!SlotValue::from(1.0).matches(&SlotValue::Integer(1)));
    }
}
