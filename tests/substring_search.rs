//! End-to-end tests for the suffix tree: exact lookup, similarity,
//! aggregation gating, and structural invariants that must hold for any
//! sequence of valid inserts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roaring::RoaringBitmap;
use std::collections::HashSet;
use sufidx::utils::{longest_common_substring_len, strings_similar};
use sufidx::{Error, GeneralizedSuffixTree};

fn build(docs: &[&str]) -> GeneralizedSuffixTree {
    let mut tree = GeneralizedSuffixTree::new();
    for (id, doc) in docs.iter().enumerate() {
        tree.insert(doc, id as u32).unwrap();
    }
    tree
}

fn ids(bitmap: &RoaringBitmap) -> Vec<u32> {
    bitmap.iter().collect()
}

/// Every substring of `s`, the slow way
fn all_substrings(s: &str) -> HashSet<String> {
    let mut out = HashSet::new();
    for len in 1..=s.len() {
        for start in 0..=(s.len() - len) {
            out.insert(s[start..start + len].to_string());
        }
    }
    out
}

#[test]
fn single_document_lookup() {
    let tree = build(&["cacao"]);

    assert_eq!(ids(&tree.search("ca")), vec![0]);
    assert_eq!(ids(&tree.search("cao")), vec![0]);
    assert_eq!(ids(&tree.search("aca")), vec![0]);
    assert!(tree.search("xyz").is_empty());
}

#[test]
fn multiple_documents_lookup() {
    let mut tree = build(&["banana", "ananas", "bandana"]);
    tree.aggregate();

    assert_eq!(ids(&tree.search("ana")), vec![0, 1, 2]);
    assert_eq!(ids(&tree.search("ban")), vec![0, 2]);
    assert_eq!(ids(&tree.search("nas")), vec![1]);
    assert_eq!(ids(&tree.search("a")), vec![0, 1, 2]);
}

#[test]
fn out_of_order_id_fails() {
    let mut tree = GeneralizedSuffixTree::new();
    tree.insert("a", 5).unwrap();
    assert_eq!(
        tree.insert("b", 3),
        Err(Error::IdOrdering { id: 3, last: 5 })
    );
    // The failed insert must not have touched the table.
    assert_eq!(tree.document(3), None);
}

#[test]
fn single_char_document_and_empty_query() {
    let mut tree = build(&["a"]);
    tree.aggregate();

    assert_eq!(ids(&tree.search("a")), vec![0]);
    // Empty queries are defined to return the empty set.
    assert!(tree.search("").is_empty());
}

#[test]
fn aggregation_gates_similarity() {
    let mut tree = build(&["libertypike", "franklintn"]);
    assert_eq!(tree.similar("libertypike", 0.5), Err(Error::NotAggregated));

    tree.aggregate();
    assert!(tree.similar("libertypike", 0.5).is_ok());

    // A later insert re-arms the gate.
    tree.insert("bethesda", 2).unwrap();
    assert_eq!(tree.similar("libertypike", 0.5), Err(Error::NotAggregated));
}

#[test]
fn place_name_similarity() {
    let mut tree = build(&[
        "libertypike",
        "franklintn",
        "carothersjohnhenryhouse",
        "carothersezealhouse",
        "acrossthetauntonriverfromdightonindightonrockstatepark",
        "dightonma",
        "dightonrock",
        "bethesda",
    ]);
    tree.aggregate();

    let close = tree.similar("carothersezealhouse", 0.3).unwrap();
    assert!(close.contains(2), "shared carothers/house prefix and suffix");
    assert!(close.contains(3), "self match");
    assert!(!close.contains(7), "bethesda shares almost nothing");
}

#[test]
fn empty_tree_queries() {
    let mut tree = GeneralizedSuffixTree::new();
    tree.aggregate();

    assert!(tree.search("anything").is_empty());
    assert!(tree.similar("anything", 0.5).unwrap().is_empty());
    assert_eq!(tree.nodes().unwrap().count(), 1);
}

#[test]
fn aggregate_is_repeatable() {
    let mut tree = build(&["banana", "bandana"]);
    tree.aggregate();
    let first = tree.search("ban");
    tree.aggregate();
    assert_eq!(tree.search("ban"), first);
}

#[test]
fn every_substring_is_found() {
    let docs = ["banana", "ananas", "bandana", "mississippi"];
    let mut tree = build(&docs);
    tree.aggregate();

    for (id, doc) in docs.iter().enumerate() {
        for w in all_substrings(doc) {
            let node = tree
                .search_node(&w)
                .unwrap_or_else(|| panic!("no node for substring {w:?}"));
            assert!(
                tree.node(node).aggregated_ids().contains(id as u32),
                "{w:?} should report document {id}"
            );
        }
    }
}

#[test]
fn search_matches_brute_force() {
    let docs = ["banana", "ananas", "bandana", "anna", "bandanna"];
    let mut tree = build(&docs);
    tree.aggregate();

    let mut queries: HashSet<String> = docs.iter().flat_map(|d| all_substrings(d)).collect();
    for miss in ["x", "nab", "aaa", "bananaa", "dann"] {
        queries.insert(miss.to_string());
    }

    for q in queries {
        let expected: Vec<u32> = docs
            .iter()
            .enumerate()
            .filter(|(_, d)| d.contains(&q))
            .map(|(id, _)| id as u32)
            .collect();
        assert_eq!(ids(&tree.search(&q)), expected, "query {q:?}");
    }
}

/// Structural invariants over the whole graph: labels are non-empty, first
/// bytes are unique per node, cached depths follow the labels, back-edges
/// point home, and aggregated sets are exactly the subtree unions.
#[test]
fn structural_invariants_hold() {
    let mut tree = build(&["banana", "ananas", "bandana", "mississippi", "missouri"]);
    tree.aggregate();

    let mut stack = vec![tree.root()];
    let mut visited = 0usize;
    while let Some(id) = stack.pop() {
        visited += 1;
        let node = tree.node(id);

        let mut first_bytes = HashSet::new();
        let mut child_union = RoaringBitmap::new();
        for eid in node.edges() {
            let edge = tree.edge(eid);
            let label = tree.label_bytes(edge.label());

            assert!(!label.is_empty(), "edge labels must be non-empty");
            assert!(
                first_bytes.insert(label[0]),
                "two edges of one node start with {:?}",
                label[0] as char
            );
            assert_eq!(edge.source(), id);

            let dest = tree.node(edge.dest());
            assert_eq!(
                dest.substring_length(),
                node.substring_length() + edge.label().len(),
                "cached depth must extend the parent's by the label length"
            );
            assert_eq!(dest.source_edge(), Some(eid));

            child_union |= dest.aggregated_ids();
            stack.push(edge.dest());
        }

        for &doc in node.own_ids() {
            child_union.insert(doc);
        }
        assert_eq!(node.aggregated_ids(), &child_union);
    }

    assert_eq!(visited, tree.nodes().unwrap().count());
}

fn random_word(rng: &mut StdRng, alphabet: &[u8], max_len: usize) -> String {
    let len = rng.gen_range(1..=max_len);
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

#[test]
fn randomized_search_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let docs: Vec<String> = (0..24)
        .map(|_| random_word(&mut rng, b"abc", 18))
        .collect();

    let mut tree = GeneralizedSuffixTree::new();
    for (id, doc) in docs.iter().enumerate() {
        tree.insert(doc, id as u32).unwrap();
    }
    tree.aggregate();

    for _ in 0..200 {
        let q = random_word(&mut rng, b"abc", 8);
        let expected: Vec<u32> = docs
            .iter()
            .enumerate()
            .filter(|(_, d)| d.contains(&q))
            .map(|(id, _)| id as u32)
            .collect();
        assert_eq!(ids(&tree.search(&q)), expected, "query {q:?}");
    }
}

#[test]
fn randomized_similarity_is_sound() {
    let mut rng = StdRng::seed_from_u64(0xfeed);
    let docs: Vec<String> = (0..20)
        .map(|_| random_word(&mut rng, b"abcd", 24))
        .collect();

    let mut tree = GeneralizedSuffixTree::new();
    for (id, doc) in docs.iter().enumerate() {
        tree.insert(doc, id as u32).unwrap();
    }
    tree.aggregate();

    for query in &docs {
        for ratio in [0.25, 0.5, 0.75] {
            for id in tree.similar(query, ratio).unwrap().iter() {
                let doc = tree.document(id).unwrap();
                assert!(
                    strings_similar(query, doc, ratio),
                    "id {id} ({doc:?}) reported similar to {query:?} at {ratio} \
                     but LCSubstr is only {}",
                    longest_common_substring_len(query, doc)
                );
            }
        }
    }
}
