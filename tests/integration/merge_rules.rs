//! Behaviour of the public merge functions as seen by the request layer.

use estat::merge::{
    combine, combine_with, override_merge, retain_known_keys, to_key_val_list, CombineOptions,
    Key, KeyOrder, Node,
};
use estat::MergeError;
use serde_json::json;

#[test]
fn test_documented_combinations() {
    assert_eq!(
        combine(&Node::from("a"), &Node::from("b")).unwrap(),
        Node::from("a/b")
    );
    assert_eq!(
        combine(&Node::map([(1, "a"), (2, "b")]), &Node::from("c")).unwrap(),
        Node::map([(1, "a/c"), (2, "b/c")])
    );
    assert_eq!(
        combine(&Node::from("a"), &Node::map([(3, "c"), (4, "d")])).unwrap(),
        Node::map([(3, "a/c"), (4, "a/d")])
    );
}

#[test]
fn test_skip_empty_prunes_null_key_branch() {
    let left = Node::map([(1, "a"), (2, "b")]);
    let right = Node::map([(Key::Null, "c"), (Key::Int(4), "d")]);

    let kept = combine(&left, &right).unwrap();
    assert_eq!(
        kept.get(1).and_then(|n| n.get(Key::Null)),
        Some(&Node::from("a/c"))
    );

    let pruned = combine_with(&left, &right, CombineOptions::default().skip_empty(true)).unwrap();
    assert_eq!(
        pruned,
        Node::map([(1, Node::map([(4, "a/d")])), (2, Node::map([(4, "b/d")]))])
    );
}

#[test]
fn test_three_level_nesting() {
    // dataset -> dimension -> code
    let datasets = Node::map([("gdp", "nama_10_gdp")]);
    let dims = Node::map([("geo", Node::map([("de", "DE"), ("fr", "FR")]))]);
    let nested = combine(&datasets, &dims).unwrap();
    assert_eq!(
        nested,
        Node::map([(
            "gdp",
            Node::map([(
                "geo",
                Node::map([("de", "nama_10_gdp/DE"), ("fr", "nama_10_gdp/FR")])
            )])
        )])
    );
}

#[test]
fn test_json_parameters_merge() {
    let session = Node::from(json!({"lang": "en", "format": "json", "sort": "1"}));
    let request = Node::from(json!({"lang": "fr", "sort": null, "geo": "DE"}));

    let merged = override_merge(&request, &session, KeyOrder::Insertion).unwrap();
    assert_eq!(
        merged,
        Node::from(json!({"lang": "fr", "format": "json", "geo": "DE"}))
    );
}

#[test]
fn test_override_documented_cases() {
    let kv = Node::map([("k", "val")]);
    assert_eq!(
        override_merge(&kv, &Node::Absent, KeyOrder::default()).unwrap(),
        kv
    );
    assert_eq!(
        override_merge(&Node::Absent, &kv, KeyOrder::default()).unwrap(),
        kv
    );
    assert_eq!(
        override_merge(
            &Node::map([("a", 1)]),
            &Node::map([("a", 2), ("b", 3)]),
            KeyOrder::default()
        )
        .unwrap(),
        Node::map([("a", 1), ("b", 3)])
    );
    assert_eq!(
        override_merge(
            &Node::map([("a", Node::Absent)]),
            &Node::map([("a", 1), ("b", 2)]),
            KeyOrder::default()
        )
        .unwrap(),
        Node::map([("b", 2)])
    );
    assert_eq!(
        override_merge(&Node::from("x"), &Node::map([("a", 1)]), KeyOrder::default()).unwrap(),
        Node::from("x")
    );
}

#[test]
fn test_error_kinds() {
    assert!(matches!(
        combine(&Node::Int(42), &Node::map([(1, "a")])),
        Err(MergeError::Format { .. })
    ));
    assert!(matches!(
        to_key_val_list(&Node::from("string")),
        Err(MergeError::Conversion("text"))
    ));
}

#[test]
fn test_retain_then_merge() {
    let request = Node::map([("geo", "DE"), ("callback", "cb")]);
    let cleaned = retain_known_keys(&request, &["geo", "unit"]);
    let merged =
        override_merge(&cleaned, &Node::map([("unit", "CP_MEUR")]), KeyOrder::Sorted).unwrap();
    let keys: Vec<_> = merged
        .as_map()
        .unwrap()
        .keys()
        .map(|k| k.to_string())
        .collect();
    assert_eq!(keys, vec!["geo", "unit"]);
}
