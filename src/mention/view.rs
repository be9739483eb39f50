//! Borrowed views over mentions of a [`MentionGraph`].
//!
//! A view pairs a graph with an id, so mentions of two different graphs (for
//! example gold and system annotations) can be compared side by side.

use std::fmt;

use super::{ClassMention, ComplexSlotMention, Mention, MentionGraph, MentionId, MentionKind};
use super::{PrimitiveSlotMention, SlotValue};
use crate::display;
use crate::span::{Span, TextAnnotation};
use crate::tree::MentionTree;

/// Any mention of a graph.
#[derive(Clone, Copy)]
pub struct MentionRef<'g> {
    graph: &'g MentionGraph,
    id: MentionId,
}

impl<'g> MentionRef<'g> {
    pub(crate) fn new(graph: &'g MentionGraph, id: MentionId) -> Self {
        Self { graph, id }
    }

    pub fn id(&self) -> MentionId {
        self.id
    }

    pub fn graph(&self) -> &'g MentionGraph {
        self.graph
    }

    pub fn mention(&self) -> &'g Mention {
        self.graph.node(self.id)
    }

    pub fn name(&self) -> &'g str {
        self.mention().name()
    }

    pub fn kind(&self) -> MentionKind {
        self.mention().kind()
    }

    /// Mentions directly below this one: slots of a class mention, fillers
    /// of a complex slot.
    pub fn children(&self) -> impl Iterator<Item = MentionRef<'g>> + 'g {
        let graph = self.graph;
        self.mention()
            .child_ids()
            .iter()
            .map(move |&id| MentionRef::new(graph, id))
    }

    pub fn child_count(&self) -> usize {
        self.mention().child_ids().len()
    }

    pub fn as_class(&self) -> Option<ClassRef<'g>> {
        match self.mention() {
            Mention::Class(mention) => Some(ClassRef {
                graph: self.graph,
                id: self.id,
                mention,
            }),
            _ => None,
        }
    }

    pub fn as_slot(&self) -> Option<SlotRef<'g>> {
        match self.mention() {
            Mention::Slot(mention) => Some(SlotRef {
                graph: self.graph,
                id: self.id,
                mention,
            }),
            _ => None,
        }
    }

    pub fn as_complex_slot(&self) -> Option<ComplexSlotRef<'g>> {
        match self.mention() {
            Mention::ComplexSlot(mention) => Some(ComplexSlotRef {
                graph: self.graph,
                id: self.id,
                mention,
            }),
            _ => None,
        }
    }

    /// Pre-order walk starting at this mention.
    pub fn tree(&self) -> MentionTree<'g> {
        MentionTree::new(*self)
    }

    /// Single-line rendering, see [`display::single_line`].
    pub fn single_line(&self) -> String {
        display::single_line(*self)
    }
}

impl fmt::Debug for MentionRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MentionRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

/// A class mention of a graph.
#[derive(Debug, Clone, Copy)]
pub struct ClassRef<'g> {
    graph: &'g MentionGraph,
    id: MentionId,
    mention: &'g ClassMention,
}

impl<'g> ClassRef<'g> {
    pub fn id(&self) -> MentionId {
        self.id
    }

    pub fn name(&self) -> &'g str {
        &self.mention.name
    }

    pub fn annotation(&self) -> &'g TextAnnotation {
        &self.mention.annotation
    }

    pub fn spans(&self) -> &'g [Span] {
        self.mention.annotation.spans()
    }

    pub fn as_mention(&self) -> MentionRef<'g> {
        MentionRef::new(self.graph, self.id)
    }

    pub fn primitive_slots(&self) -> impl Iterator<Item = SlotRef<'g>> + 'g {
        self.as_mention().children().filter_map(|m| m.as_slot())
    }

    pub fn complex_slots(&self) -> impl Iterator<Item = ComplexSlotRef<'g>> + 'g {
        self.as_mention().children().filter_map(|m| m.as_complex_slot())
    }
}

/// A primitive slot mention of a graph.
#[derive(Debug, Clone, Copy)]
pub struct SlotRef<'g> {
    graph: &'g MentionGraph,
    id: MentionId,
    mention: &'g PrimitiveSlotMention,
}

impl<'g> SlotRef<'g> {
    pub fn id(&self) -> MentionId {
        self.id
    }

    pub fn name(&self) -> &'g str {
        &self.mention.name
    }

    pub fn values(&self) -> &'g [SlotValue] {
        &self.mention.values
    }

    pub fn as_mention(&self) -> MentionRef<'g> {
        MentionRef::new(self.graph, self.id)
    }
}

/// A complex slot mention of a graph.
#[derive(Debug, Clone, Copy)]
pub struct ComplexSlotRef<'g> {
    graph: &'g MentionGraph,
    id: MentionId,
    mention: &'g ComplexSlotMention,
}

impl<'g> ComplexSlotRef<'g> {
    pub fn id(&self) -> MentionId {
        self.id
    }

    pub fn name(&self) -> &'g str {
        &self.mention.name
    }

    pub fn filler_count(&self) -> usize {
        self.mention.fillers.len()
    }

    pub fn fillers(&self) -> impl Iterator<Item = ClassRef<'g>> + 'g {
        self.as_mention().children().filter_map(|m| m.as_class())
    }

    pub fn as_mention(&self) -> MentionRef<'g> {
        MentionRef::new(self.graph, self.id)
    }
}
