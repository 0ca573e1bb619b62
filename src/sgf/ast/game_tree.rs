//! Game trees

use super::node::Node;
use serde::Serialize;
use std::fmt;

/// A trunk of nodes followed by alternative continuations.
///
/// A parsed tree always has at least one node in its sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GameTree {
    pub sequence: Vec<Node>,
    pub variations: Vec<GameTree>,
}

impl GameTree {
    pub fn new(sequence: Vec<Node>) -> Self {
        GameTree {
            sequence,
            variations: Vec::new(),
        }
    }

    /// Every tree from this one down, parents before their variations
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Number of nodes in this tree and every variation below it
    pub fn node_count(&self) -> usize {
        self.walk().map(|tree| tree.sequence.len()).sum()
    }

    /// Deepest nesting of variations; a tree without variations has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((tree, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(tree.variations.iter().map(|variation| (variation, depth + 1)));
        }
        deepest
    }
}

/// Pre-order iterator over a game tree and its variations, see [GameTree::walk]
pub struct Walk<'a> {
    stack: Vec<&'a GameTree>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a GameTree;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.stack.pop()?;
        self.stack.extend(tree.variations.iter().rev());
        Some(tree)
    }
}

// Nested variations are moved onto a work list so dropping never recurses.
impl Drop for GameTree {
    fn drop(&mut self) {
        let mut orphans = std::mem::take(&mut self.variations);
        while let Some(mut tree) = orphans.pop() {
            orphans.append(&mut tree.variations);
        }
    }
}

impl fmt::Display for GameTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Step<'a> {
            Open(&'a GameTree),
            Close,
        }

        let mut steps = vec![Step::Open(self)];
        while let Some(step) = steps.pop() {
            match step {
                Step::Open(tree) => {
                    write!(f, "(")?;
                    for node in &tree.sequence {
                        write!(f, "{}", node)?;
                    }
                    steps.push(Step::Close);
                    steps.extend(tree.variations.iter().rev().map(Step::Open));
                }
                Step::Close => write!(f, ")")?,
            }
        }
        Ok(())
    }
}
