//! Pre-order tree walk over a mention graph.
//!
//! The walk treats the reachable part of the graph as a tree: a class
//! mention filling two complex slots is visited once per slot, at whatever
//! depth each occurrence sits. Children are always yielded in insertion
//! order, so two walks over the same structure produce the same sequence.

use crate::mention::MentionRef;

/// A mention together with its depth below the walk root (root = 0).
#[derive(Debug, Clone, Copy)]
pub struct TreeNode<'g> {
    pub mention: MentionRef<'g>,
    pub depth: usize,
}

/// Iterator yielding [`TreeNode`]s in pre-order.
#[derive(Debug)]
pub struct MentionTree<'g> {
    stack: Vec<TreeNode<'g>>,
}

impl<'g> MentionTree<'g> {
    pub fn new(root: MentionRef<'g>) -> Self {
        Self {
            stack: vec![TreeNode {
                mention: root,
                depth: 0,
            }],
        }
    }
}

impl<'g> Iterator for MentionTree<'g> {
    type Item = TreeNode<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(node.mention.children().map(|mention| TreeNode {
            mention,
            depth: node.depth + 1,
        }));
        // first child on top
        self.stack[start..].reverse();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use crate::{MentionGraph, Span};

    #[test]
    fn visits_every_occurrence_in_preorder() {
        let mut graph = MentionGraph::new();
        let nucleus = graph.add_class("nucleus", vec![Span::new(20, 27)]).unwrap();
        let transport = graph.add_class("protein transport", vec![Span::new(0, 9)]).unwrap();
        graph.add_slot(transport, "evidence", vec!["IDA"]).unwrap();
        let origin = graph.add_complex_slot(transport, "transport origin").unwrap();
        let location = graph.add_complex_slot(transport, "transport location").unwrap();
        graph.add_filler(origin, nucleus).unwrap();
        graph.add_filler(location, nucleus).unwrap();

        let walk: Vec<(String, usize)> = graph
            .get(transport)
            .unwrap()
            .tree()
            .map(|node| (node.mention.name().to_string(), node.depth))
            .collect();

        assert_eq!(
            walk,
            vec![
                ("protein transport".to_string(), 0),
                ("evidence".to_string(), 1),
                ("transport origin".to_string(), 1),
                ("nucleus".to_string(), 2),
                ("transport location".to_string(), 1),
                ("nucleus".to_string(), 2),
            ]
        );
    }

    #[test]
    fn single_class_is_a_single_node() {
        let mut graph = MentionGraph::new();
        let gene = graph.add_class("gene", vec![Span::new(0, 4)]).unwrap();
        assert_eq!(graph.get(gene).unwrap().tree().count(), 1);
    }
}
