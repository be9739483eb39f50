//! Text renderings of mentions.
//!
//! [`single_line`] gives the compact form used as the deterministic
//! tie-break key by the comparators. [`AnnotatedText`] draws class mentions
//! under the document text they are grounded in.

use std::collections::HashMap;
use std::fmt;
use std::fmt::Write;

use unicode_width::UnicodeWidthChar;

use crate::mention::{ClassRef, Mention, MentionGraph, MentionRef};
use crate::span::Span;

/// Render a mention and everything below it on one line.
///
/// The rendering always starts with the mention name:
///
/// - class mention: `protein [0..8] (entrez_gene_id = 999999; origin = [nucleus [20..27]])`
/// - primitive slot: `entrez_gene_id = 999999, 1`
/// - complex slot: `transport origin = [nucleus [20..27]]`
pub fn single_line(mention: MentionRef<'_>) -> String {
    let mut out = String::new();
    write_single_line(&mut out, mention);
    out
}

fn write_single_line(out: &mut String, mention: MentionRef<'_>) {
    match mention.mention() {
        Mention::Class(class) => {
            out.push_str(&format!("{} {}", class.name, class.annotation));
            if mention.child_count() > 0 {
                out.push_str(" (");
                for (idx, slot) in mention.children().enumerate() {
                    if idx > 0 {
                        out.push_str("; ");
                    }
                    write_single_line(out, slot);
                }
                out.push(')');
            }
        }
        Mention::Slot(slot) => {
            out.push_str(&slot.name);
            out.push_str(" =");
            for (idx, value) in slot.values.iter().enumerate() {
                out.push_str(if idx > 0 { ", " } else { " " });
                out.push_str(&value.to_string());
            }
        }
        Mention::ComplexSlot(slot) => {
            out.push_str(&slot.name);
            out.push_str(" = [");
            for (idx, filler) in mention.children().enumerate() {
                if idx > 0 {
                    out.push_str("; ");
                }
                write_single_line(out, filler);
            }
            out.push(']');
        }
    }
}

/// Convert a zero-based index to a base-26 label: A, B, ..., Z, AA, AB, ...
pub fn index_to_label(mut n: usize) -> String {
    let mut result = String::new();
    loop {
        let remainder = n % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

struct IncludedClass {
    spans: Vec<Span>,
    name: String,
    /// (complex slot name, filler spans)
    fillers: Vec<(String, Vec<Span>)>,
}

/// Document text with class mentions underlined beneath it.
///
/// Offsets are counted in characters. Fillers of complex slots are drawn as
/// arrows pointing at the label of the filler when the filler is included.
///
/// ```text
/// MAPK1 moves from the nucleus
/// ╰───╯[A] protein
///                      ╰─────╯[B] nucleus
///       ╰───╯protein transport
///         └─transported entity─>[A]
///         └─transport origin─>[B]
/// ```
pub struct AnnotatedText<'a> {
    text: &'a str,
    include: Vec<IncludedClass>,
}

impl<'a> AnnotatedText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            include: Vec::new(),
        }
    }

    /// Add one class mention (its slots are not drawn, only filler arrows).
    pub fn include(&mut self, class: ClassRef<'_>) {
        let fillers = class
            .complex_slots()
            .flat_map(|slot| {
                slot.fillers()
                    .map(move |filler| (slot.name().to_string(), filler.spans().to_vec()))
            })
            .collect();
        self.include.push(IncludedClass {
            spans: class.spans().to_vec(),
            name: class.name().to_string(),
            fillers,
        });
    }

    /// Takes self
    pub fn with(mut self, class: ClassRef<'_>) -> Self {
        self.include(class);
        self
    }

    /// Include every class mention of the graph in insertion order.
    pub fn with_graph(mut self, graph: &MentionGraph) -> Self {
        for class in graph.iter().filter_map(|m| m.as_class()) {
            self.include(class);
        }
        self
    }

    /// Labels for included mentions that some arrow points at, ordered by spans.
    fn build_span_labels(&self) -> HashMap<&[Span], String> {
        let mut targets: Vec<&[Span]> = self
            .include
            .iter()
            .flat_map(|class| class.fillers.iter().map(|(_, spans)| spans.as_slice()))
            .filter(|spans| self.include.iter().any(|c| c.spans.as_slice() == *spans))
            .collect();
        targets.sort();
        targets.dedup();
        targets
            .into_iter()
            .enumerate()
            .map(|(idx, spans)| (spans, format!("[{}]", index_to_label(idx))))
            .collect()
    }
}

impl fmt::Display for AnnotatedText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // display column at which each character starts, plus the end column
        let mut columns = vec![0];
        let mut opening_line = String::new();
        for ch in self.text.chars() {
            let ch = if ch.is_control() { ' ' } else { ch };
            opening_line.push(ch);
            let width = UnicodeWidthChar::width(ch).unwrap_or(0);
            columns.push(columns[columns.len() - 1] + width);
        }
        let column = |offset: usize| columns[offset.min(columns.len() - 1)];

        f.write_str(&opening_line)?;

        let span_labels = self.build_span_labels();

        for class in &self.include {
            f.write_char('\n')?;

            let mut cursor = 0;
            for span in &class.spans {
                let start = column(span.start).max(cursor);
                let end = column(span.end).max(start);
                for _ in cursor..start {
                    f.write_char(' ')?;
                }
                f.write_char('╰')?;
                for _ in (start + 1)..end.saturating_sub(1) {
                    f.write_char('─')?;
                }
                if end - start > 1 {
                    f.write_char('╯')?;
                }
                cursor = end.max(start + 1);
            }

            if let Some(label) = span_labels.get(class.spans.as_slice()) {
                write!(f, "{} ", label)?;
            }
            f.write_str(&class.name)?;

            let arrow_indent = class.spans.first().map_or(0, |s| column(s.start)) + 2;
            for (slot_name, filler_spans) in &class.fillers {
                f.write_char('\n')?;
                for _ in 0..arrow_indent {
                    f.write_char(' ')?;
                }
                let target = match span_labels.get(filler_spans.as_slice()) {
                    Some(label) => label.clone(),
                    None => filler_spans
                        .iter()
                        .map(|s| format!("[{}]", s))
                        .collect::<Vec<_>>()
                        .join(""),
                };
                write!(f, "└─{}─>{}", slot_name, target)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport_graph() -> MentionGraph {
        let mut graph = MentionGraph::new();
        let protein = graph.add_class("protein", vec![Span::new(0, 5)]).unwrap();
        let nucleus = graph.add_class("nucleus", vec![Span::new(21, 28)]).unwrap();
        let transport = graph.add_class("protein transport", vec![Span::new(6, 11)]).unwrap();
        let entity = graph.add_complex_slot(transport, "transported entity").unwrap();
        let origin = graph.add_complex_slot(transport, "transport origin").unwrap();
        graph.add_filler(entity, protein).unwrap();
        graph.add_filler(origin, nucleus).unwrap();
        graph
    }

    #[test]
    fn test_index_to_label() {
        assert_eq!(index_to_label(0), "A");
        assert_eq!(index_to_label(25), "Z");
        assert_eq!(index_to_label(26), "AA");
        assert_eq!(index_to_label(51), "AZ");
        assert_eq!(index_to_label(701), "ZZ");
        assert_eq!(index_to_label(702), "AAA");
    }

    #[test]
    fn single_line_starts_with_the_name() {
        let mut graph = MentionGraph::new();
        let protein = graph.add_class("protein", vec![Span::new(0, 8)]).unwrap();
        let gene_id = graph.add_slot(protein, "entrez_gene_id", vec![999999, 1]).unwrap();
        let origin = graph.add_complex_slot(protein, "origin").unwrap();
        let nucleus = graph.add_class("nucleus", vec![Span::new(20, 27)]).unwrap();
        graph.add_filler(origin, nucleus).unwrap();
        graph.add_complex_slot(protein, "empty").unwrap();

        assert_eq!(
            graph.get(protein).unwrap().single_line(),
            "protein [0..8] (entrez_gene_id = 999999, 1; origin = [nucleus [20..27]]; empty = [])"
        );
        assert_eq!(graph.get(nucleus).unwrap().single_line(), "nucleus [20..27]");
        assert_eq!(graph.get(gene_id).unwrap().single_line(), "entrez_gene_id = 999999, 1");
        assert_eq!(graph.get(origin).unwrap().single_line(), "origin = [nucleus [20..27]]");
    }

    #[test]
    fn test_annotated_text_with_fillers() {
        let graph = transport_graph();
        let display = AnnotatedText::new("MAPK1 moves from the nucleus").with_graph(&graph);

        insta::assert_snapshot!(display, @r###"
        MAPK1 moves from the nucleus
        ╰───╯[A] protein
                             ╰─────╯[B] nucleus
              ╰───╯protein transport
                └─transported entity─>[A]
                └─transport origin─>[B]
        "###);
    }

    #[test]
    fn test_annotated_text_discontinuous() {
        let mut graph = MentionGraph::new();
        let class = graph
            .add_class("gene", vec![Span::new(0, 3), Span::new(8, 13)])
            .unwrap();
        let display =
            AnnotatedText::new("TNF and alpha").with(graph.get(class).unwrap().as_class().unwrap());

        insta::assert_snapshot!(display, @r###"
        TNF and alpha
        ╰─╯     ╰───╯gene
        "###);
    }

    #[test]
    fn test_annotated_text_unlabelled_filler() {
        let graph = transport_graph();
        let transport = graph.roots()[0];
        let display = AnnotatedText::new("MAPK1 moves from the nucleus").with(transport);

        insta::assert_snapshot!(display, @r###"
        MAPK1 moves from the nucleus
              ╰───╯protein transport
                └─transported entity─>[0..5]
                └─transport origin─>[21..28]
        "###);
    }
}
