//! Treeviz formatter
//!
//! Draws game trees, nodes and properties as an indented tree. Each property shows its
//! validation status.

use super::registry::{FormatError, Formatter};
use crate::sgf::ast::{GameTree, Node, Property};
use crate::sgf::parsing::Collection;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

fn connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}

fn child_prefix(prefix: &str, is_last: bool) -> String {
    format!("{}{}", prefix, if is_last { "  " } else { "│ " })
}

/// Trees waiting to be drawn, with their line prefix and whether they close their parent's list
type Pending<'a> = Vec<(&'a GameTree, String, bool)>;

pub fn to_treeviz_str(collection: &Collection) -> String {
    let mut result = String::new();
    let count = collection.game_trees.len();
    let mut pending: Pending = collection
        .game_trees
        .iter()
        .enumerate()
        .rev()
        .map(|(i, tree)| (tree, String::new(), i == count - 1))
        .collect();
    while let Some((tree, prefix, is_last)) = pending.pop() {
        append_game_tree(&mut result, tree, &prefix, is_last, &mut pending);
    }
    result
}

fn append_game_tree<'a>(
    result: &mut String,
    tree: &'a GameTree,
    prefix: &str,
    is_last: bool,
    pending: &mut Pending<'a>,
) {
    result.push_str(&format!(
        "{}{} GameTree: {}, {}\n",
        prefix,
        connector(is_last),
        counted(tree.sequence.len(), "node"),
        counted(tree.variations.len(), "variation")
    ));

    let prefix = child_prefix(prefix, is_last);
    let children = tree.sequence.len() + tree.variations.len();
    for (i, node) in tree.sequence.iter().enumerate() {
        append_node(result, node, &prefix, i == children - 1);
    }
    // reversed, so the first variation is drawn next
    for (i, variation) in tree.variations.iter().enumerate().rev() {
        let is_last = tree.sequence.len() + i == children - 1;
        pending.push((variation, prefix.clone(), is_last));
    }
}

fn append_node(result: &mut String, node: &Node, prefix: &str, is_last: bool) {
    let label = if node.is_empty() {
        "(empty)".to_string()
    } else {
        node.properties()
            .iter()
            .map(Property::identity)
            .collect::<Vec<_>>()
            .join(" ")
    };
    result.push_str(&format!("{}{} Node: {}\n", prefix, connector(is_last), label));

    let prefix = child_prefix(prefix, is_last);
    for (i, property) in node.properties().iter().enumerate() {
        let is_last = i == node.properties().len() - 1;
        result.push_str(&format!(
            "{}{} Property: {} ({})\n",
            prefix,
            connector(is_last),
            truncate(&property.to_string(), 30),
            property.status()
        ));
    }
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn extension(&self) -> &str {
        "txt"
    }

    fn serialize(&self, collection: &Collection) -> Result<String, FormatError> {
        Ok(to_treeviz_str(collection))
    }

    fn description(&self) -> &str {
        "Tree drawing of game trees, nodes and properties"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sgf::parse;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn test_variations() {
        let collection = parse("(;GM[1]SZ[19];B[pd](;W[dp])(;W[dd]))").unwrap();
        insta::assert_snapshot!(to_treeviz_str(&collection).trim_end(), @r###"
        └─ GameTree: 2 nodes, 2 variations
          ├─ Node: GM SZ
          │ ├─ Property: GM[1] (valid)
          │ └─ Property: SZ[19] (valid)
          ├─ Node: B
          │ └─ Property: B[pd] (deferred)
          ├─ GameTree: 1 node, 0 variations
          │ └─ Node: W
          │   └─ Property: W[dp] (deferred)
          └─ GameTree: 1 node, 0 variations
            └─ Node: W
              └─ Property: W[dd] (deferred)
        "###);
    }

    #[test]
    fn test_long_values_and_empty_nodes() {
        let collection =
            parse("(;C[a comment that is far too long to show in full];)(;SZ[x])").unwrap();
        insta::assert_snapshot!(to_treeviz_str(&collection).trim_end(), @r###"
        ├─ GameTree: 2 nodes, 0 variations
        │ ├─ Node: C
        │ │ └─ Property: C[a comment that is far too lo... (valid)
        │ └─ Node: (empty)
        └─ GameTree: 1 node, 0 variations
          └─ Node: SZ
            └─ Property: SZ[x] (invalid)
        "###);
    }
}
