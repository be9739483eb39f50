//! Fixture data structures and graph construction.
//!
//! A fixture is a TOML document describing a gold and a system annotation
//! set over the same text, plus the checks to run between them:
//!
//! ```toml
//! title = "Protein transport"
//! text = "MAPK1 moves from the nucleus"
//!
//! [[gold]]
//! id = "mapk1"
//! class = "protein"
//! spans = [[0, 5]]
//!
//! [[gold]]
//! id = "transport"
//! class = "protein transport"
//! spans = [[6, 11]]
//! slots = [{ name = "evidence", values = ["ECO:0000269"] }]
//! complex_slots = [{ name = "transported entity", fillers = ["mapk1"] }]
//!
//! [[check]]
//! gold = "transport"
//! system = "transport"
//! max_depth = 1
//! expect = "match"
//! ```
//!
//! Check references name an entry id, or `id/slot` for one of its slots.

use std::collections::HashMap;
use std::fmt;

use mention_nlp::{
    CompareConfig, MaxDepth, MentionError, MentionGraph, MentionId, MentionRef, SlotValue, Span,
};
use serde::{Deserialize, Serialize};

use crate::errors::{EvalError, EvalResult};

/// A parsed fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvalFixture {
    #[serde(default)]
    pub title: Option<String>,
    /// Document text the spans point into, used for reports.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub config: CompareConfig,
    #[serde(default)]
    pub gold: Vec<MentionEntry>,
    #[serde(default)]
    pub system: Vec<MentionEntry>,
    #[serde(default, rename = "check")]
    pub checks: Vec<Check>,
}

/// One class mention with its slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MentionEntry {
    pub id: String,
    pub class: String,
    /// `[start, end]` pairs, in characters. `start` may not exceed `end`.
    pub spans: Vec<(usize, usize)>,
    #[serde(default)]
    pub slots: Vec<SlotEntry>,
    #[serde(default)]
    pub complex_slots: Vec<ComplexSlotEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotEntry {
    pub name: String,
    #[serde(default)]
    pub values: Vec<SlotValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplexSlotEntry {
    pub name: String,
    /// Ids of entries on the same side.
    #[serde(default)]
    pub fillers: Vec<String>,
}

/// A comparison to run between one gold and one system mention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Check {
    pub gold: String,
    pub system: String,
    /// Overrides the fixture's `config.max_depth`.
    #[serde(default)]
    pub max_depth: Option<MaxDepth>,
    #[serde(default)]
    pub comparator: CheckComparator,
    pub expect: Expectation,
}

/// Which comparator a check runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckComparator {
    /// The typed comparator for the kind of the gold mention.
    #[default]
    Typed,
    /// The lockstep tree walk.
    Walk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    Match,
    Mismatch,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Match => f.write_str("match"),
            Expectation::Mismatch => f.write_str("mismatch"),
        }
    }
}

/// Which annotation set an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Gold,
    System,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Gold => f.write_str("gold"),
            Side::System => f.write_str("system"),
        }
    }
}

impl EvalFixture {
    pub fn entries(&self, side: Side) -> &[MentionEntry] {
        match side {
            Side::Gold => &self.gold,
            Side::System => &self.system,
        }
    }

    /// The depth bound for a check.
    pub fn max_depth_for(&self, check: &Check) -> MaxDepth {
        check.max_depth.unwrap_or(self.config.max_depth)
    }
}

/// A mention graph built from one side of a fixture, with its entry ids.
#[derive(Debug, Clone)]
pub struct SideGraph {
    pub side: Side,
    pub graph: MentionGraph,
    ids: HashMap<String, MentionId>,
}

impl SideGraph {
    pub fn id(&self, entry: &str) -> Option<MentionId> {
        self.ids.get(entry).copied()
    }

    /// Resolve a check reference: `id` for a class mention, `id/slot` for
    /// the first slot of that name on it.
    pub fn resolve(&self, reference: &str) -> Option<MentionRef<'_>> {
        let (entry, slot) = match reference.split_once('/') {
            Some((entry, slot)) => (entry, Some(slot)),
            None => (reference, None),
        };
        let class = self.graph.get(self.id(entry)?)?;
        match slot {
            None => Some(class),
            Some(slot) => class.children().find(|child| child.name() == slot),
        }
    }
}

/// Build the mention graph for one side.
///
/// Classes and their primitive slots are added first, so complex slots may
/// name fillers defined anywhere in the side.
pub fn build_graph(side: Side, entries: &[MentionEntry]) -> EvalResult<SideGraph> {
    let mut graph = MentionGraph::new();
    let mut ids: HashMap<String, MentionId> = HashMap::new();
    let graph_error = |id: &str| {
        let id = id.to_string();
        move |source: MentionError| EvalError::Graph { side, id, source }
    };

    for entry in entries {
        if ids.contains_key(&entry.id) {
            return Err(EvalError::DuplicateId {
                side,
                id: entry.id.clone(),
            });
        }
        if let Some(&(start, end)) = entry.spans.iter().find(|(start, end)| start > end) {
            return Err(EvalError::ReversedSpan {
                side,
                id: entry.id.clone(),
                start,
                end,
            });
        }
        let spans = entry.spans.iter().copied().map(Span::from);
        let class = graph
            .add_class(entry.class.as_str(), spans)
            .map_err(graph_error(&entry.id))?;
        for slot in &entry.slots {
            graph
                .add_slot(class, slot.name.as_str(), slot.values.iter().cloned())
                .map_err(graph_error(&entry.id))?;
        }
        ids.insert(entry.id.clone(), class);
    }

    for entry in entries {
        let class = ids[&entry.id];
        for slot in &entry.complex_slots {
            let complex = graph
                .add_complex_slot(class, slot.name.as_str())
                .map_err(graph_error(&entry.id))?;
            for filler in &slot.fillers {
                let filler_id = *ids.get(filler).ok_or_else(|| EvalError::UnknownFiller {
                    side,
                    id: entry.id.clone(),
                    filler: filler.clone(),
                })?;
                graph
                    .add_filler(complex, filler_id)
                    .map_err(graph_error(&entry.id))?;
            }
        }
    }

    Ok(SideGraph { side, graph, ids })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mention_nlp::MentionKind;

    fn entry(id: &str, class: &str, spans: Vec<(usize, usize)>) -> MentionEntry {
        MentionEntry {
            id: id.to_string(),
            class: class.to_string(),
            spans,
            slots: Vec::new(),
            complex_slots: Vec::new(),
        }
    }

    fn filled(mut owner: MentionEntry, slot: &str, fillers: &[&str]) -> MentionEntry {
        owner.complex_slots.push(ComplexSlotEntry {
            name: slot.to_string(),
            fillers: fillers.iter().map(|f| f.to_string()).collect(),
        });
        owner
    }

    #[test]
    fn test_fillers_resolve_in_any_order() {
        let entries = vec![
            filled(entry("t", "protein transport", vec![(6, 11)]), "origin", &["n"]),
            entry("n", "nucleus", vec![(21, 28)]),
        ];
        let side = build_graph(Side::Gold, &entries).unwrap();

        let transport = side.resolve("t").unwrap().as_class().unwrap();
        let fillers: Vec<_> = transport
            .complex_slots()
            .flat_map(|slot| slot.fillers().map(|f| f.name().to_string()).collect::<Vec<_>>())
            .collect();
        assert_eq!(fillers, vec!["nucleus"]);
        assert_eq!(side.graph.roots().len(), 1);
    }

    #[test]
    fn test_resolve_slot_reference() {
        let mut gene = entry("g", "gene", vec![(0, 3)]);
        gene.slots.push(SlotEntry {
            name: "synonyms".to_string(),
            values: vec!["TNF".into(), "TNFA".into()],
        });
        let side = build_graph(Side::System, &[gene]).unwrap();

        let slot = side.resolve("g/synonyms").unwrap();
        assert_eq!(slot.kind(), MentionKind::Slot);
        assert!(side.resolve("g/taxon").is_none());
        assert!(side.resolve("missing").is_none());
    }

    #[test]
    fn test_unknown_filler() {
        let entries = vec![filled(entry("t", "transport", vec![(0, 1)]), "origin", &["x"])];
        let err = build_graph(Side::Gold, &entries).unwrap_err();
        assert!(matches!(err, EvalError::UnknownFiller { ref filler, .. } if filler == "x"));
        assert_eq!(err.to_string(), "gold mention `t` refers to unknown filler `x`");
    }

    #[test]
    fn test_cycle_is_rejected() {
        let entries = vec![
            filled(entry("a", "complex", vec![(0, 1)]), "part", &["b"]),
            filled(entry("b", "complex", vec![(2, 3)]), "part", &["a"]),
        ];
        let err = build_graph(Side::System, &entries).unwrap_err();
        assert!(matches!(
            err,
            EvalError::Graph {
                source: MentionError::Cycle { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_reversed_span_is_rejected() {
        let entries = vec![entry("n", "nucleus", vec![(0, 3), (10, 5)])];
        let err = build_graph(Side::System, &entries).unwrap_err();
        assert!(matches!(
            err,
            EvalError::ReversedSpan {
                start: 10,
                end: 5,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "system mention `n` has reversed span [10, 5]"
        );
    }

    #[test]
    fn test_duplicate_id_and_missing_spans() {
        let dup = vec![entry("a", "x", vec![(0, 1)]), entry("a", "y", vec![(1, 2)])];
        assert!(matches!(
            build_graph(Side::Gold, &dup),
            Err(EvalError::DuplicateId { .. })
        ));

        let empty = vec![entry("a", "x", Vec::new())];
        assert!(matches!(
            build_graph(Side::Gold, &empty),
            Err(EvalError::Graph {
                source: MentionError::NoSpans { .. },
                ..
            })
        ));
    }
}
