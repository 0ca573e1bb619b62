//! Property-based tests for the tokenizer and parser
//!
//! Generated game trees are rendered to source, parsed, written back and parsed again. The
//! two parses must agree, and every value must come back with its raw text intact.

use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use sgf::sgf::lexing::tokenize;
use sgf::sgf::{parse, GameTree};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct GenTree {
    nodes: Vec<BTreeMap<String, Vec<String>>>,
    variations: Vec<GenTree>,
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace(']', "\\]")
}

fn render(tree: &GenTree, out: &mut String) {
    out.push('(');
    for node in &tree.nodes {
        out.push_str("\n;");
        for (identity, values) in node {
            out.push_str(identity);
            for value in values {
                out.push('[');
                out.push_str(&escape(value));
                out.push(']');
            }
            out.push(' ');
        }
    }
    for variation in &tree.variations {
        render(variation, out);
    }
    out.push(')');
}

fn node_strategy() -> impl Strategy<Value = BTreeMap<String, Vec<String>>> {
    btree_map(
        "[A-Z]{1,2}",
        vec("[a-z0-9 :;()\\[\\]\\\\\n世]{0,12}", 1..3),
        0..4,
    )
}

fn tree_strategy() -> impl Strategy<Value = GenTree> {
    let leaf = vec(node_strategy(), 1..4).prop_map(|nodes| GenTree {
        nodes,
        variations: vec![],
    });
    leaf.prop_recursive(3, 24, 3, |inner| {
        (vec(node_strategy(), 1..4), vec(inner, 0..3))
            .prop_map(|(nodes, variations)| GenTree { nodes, variations })
    })
}

/// Every generated value must be found, raw and unescaped, in the parsed tree
fn assert_values_kept(generated: &GenTree, parsed: &GameTree) {
    assert_eq!(generated.nodes.len(), parsed.sequence.len());
    for (expected, node) in generated.nodes.iter().zip(&parsed.sequence) {
        assert_eq!(expected.len(), node.properties().len());
        for (identity, values) in expected {
            let property = node.property(identity).unwrap();
            let raw: Vec<_> = property.values().iter().map(|v| v.raw().to_string()).collect();
            let escaped: Vec<_> = values.iter().map(|v| escape(v)).collect();
            assert_eq!(raw, escaped);
            let unescaped: Vec<_> = property.values().iter().map(|v| v.unescaped()).collect();
            assert_eq!(&unescaped, values);
        }
    }
    assert_eq!(generated.variations.len(), parsed.variations.len());
    for (expected, variation) in generated.variations.iter().zip(&parsed.variations) {
        assert_values_kept(expected, variation);
    }
}

proptest! {
    #[test]
    fn test_parse_write_parse_is_stable(tree in tree_strategy()) {
        let mut source = String::new();
        render(&tree, &mut source);

        let first = parse(&source).unwrap();
        prop_assert_eq!(first.game_trees.len(), 1);
        let second = parse(&first.to_string()).unwrap();
        prop_assert_eq!(&first.game_trees, &second.game_trees);
    }

    #[test]
    fn test_values_survive_parsing(tree in tree_strategy()) {
        let mut source = String::new();
        render(&tree, &mut source);
        let collection = parse(&source).unwrap();
        assert_values_kept(&tree, &collection.game_trees[0]);
    }

    #[test]
    fn test_tokenize_terminates_on_any_input(input in "[ -~\n]{0,40}") {
        let tokens = tokenize(&input);
        let terminals = tokens.iter().filter(|(t, _)| t.is_terminal()).count();
        prop_assert_eq!(terminals, 1);
        prop_assert!(tokens.last().unwrap().0.is_terminal());
        // parsing never panics either
        let _ = parse(&input);
    }
}
