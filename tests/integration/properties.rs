//! Property tests over generated graphs.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use regex::Regex;
use std::collections::BTreeMap;
use struct_sanitizer::sanitizer::{HtmlPolicy, HtmlSanitizer, Suffix};
use struct_sanitizer::{impl_deep_copy, GraphCopier, Transform};

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    key: String,
    values: Vec<String>,
    amount: f64,
    flag: bool,
    child: Option<Box<Entry>>,
}

impl_deep_copy!(Entry {
    key,
    values,
    amount,
    flag,
    child
});

fn entry_strategy() -> impl Strategy<Value = Entry> {
    let leaf = (
        ".{0,12}",
        prop::collection::vec(".{0,8}", 0..4),
        any::<f64>(),
        any::<bool>(),
    )
        .prop_map(|(key, values, amount, flag)| Entry {
            key,
            values,
            amount,
            flag,
            child: None,
        });

    leaf.prop_recursive(4, 16, 1, |inner| {
        (
            ".{0,12}",
            prop::collection::vec(".{0,8}", 0..4),
            any::<f64>(),
            any::<bool>(),
            inner,
        )
            .prop_map(|(key, values, amount, flag, child)| Entry {
                key,
                values,
                amount,
                flag,
                child: Some(Box::new(child)),
            })
    })
}

/// Walks original and copy side by side and checks every leaf.
fn assert_leaves(original: &Entry, copy: &Entry, transform: &dyn Transform) {
    assert_eq!(copy.key, transform.transform(&original.key));
    assert_eq!(copy.values.len(), original.values.len());
    for (before, after) in original.values.iter().zip(&copy.values) {
        assert_eq!(*after, transform.transform(before));
    }
    assert_eq!(copy.amount.to_bits(), original.amount.to_bits());
    assert_eq!(copy.flag, original.flag);
    match (&original.child, &copy.child) {
        (None, None) => {}
        (Some(before), Some(after)) => assert_leaves(before, after, transform),
        _ => panic!("child presence changed"),
    }
}

/// Markup fragments that glue into tags once an inner tag is removed.
fn markup_strategy() -> impl Strategy<Value = String> {
    let pieces = prop::sample::select(vec![
        "<", ">", "/", "=", "\"", "'", " ", "x", "p", "b", "img", "script", "<x>", "<p>", "</p>",
        "<b>", "</b>", "<!--", "-->", " src=x", " onerror=alert(1)", " href=javascript:x()",
        "<script>", "</script>", "<a href=\"/ok\">", "</a>",
    ]);
    prop::collection::vec(pieces, 0..24).prop_map(|parts| parts.concat())
}

/// Every `<` left by `Ugc` must start a rebuilt tag: a lowercase name and
/// quoted attribute values with no markup inside.
fn assert_only_rebuilt_tags(output: &str) {
    let rebuilt = Regex::new(r#"^</?([a-z0-9]+)((?: [a-z]+="[^"<>]*")*)(?: /)?>"#).unwrap();
    let attr_name = Regex::new(r#" ([a-z]+)=""#).unwrap();
    for (at, _) in output.match_indices('<') {
        let caps = rebuilt
            .captures(&output[at..])
            .unwrap_or_else(|| panic!("stray markup in {output:?}"));
        assert_ne!(&caps[1], "script", "{output:?}");
        for name in attr_name.captures_iter(&caps[2]) {
            assert!(!name[1].starts_with("on"), "{output:?}");
        }
    }
}

proptest! {
    #[test]
    fn prop_every_leaf_transformed(original in entry_strategy()) {
        let transform = Suffix::new("_updated");
        let snapshot = original.clone();
        let copy = GraphCopier::new(transform.clone()).copy(&original).unwrap();

        assert_leaves(&original, &copy, &transform);
        prop_assert_eq!(&original.key, &snapshot.key);
        prop_assert_eq!(original.values, snapshot.values);
    }

    #[test]
    fn prop_map_keys_and_lengths_kept(
        original in prop::collection::btree_map(".{0,6}", prop::collection::vec(".{0,6}", 0..5), 0..8)
    ) {
        let copy: BTreeMap<String, Vec<String>> =
            GraphCopier::new(Suffix::new("!")).copy(&original).unwrap();

        prop_assert_eq!(copy.len(), original.len());
        for (key, values) in &original {
            let copied = &copy[key];
            prop_assert_eq!(copied.len(), values.len());
            for (before, after) in values.iter().zip(copied) {
                prop_assert_eq!(after, &format!("{before}!"));
            }
        }
    }

    #[test]
    fn prop_ugc_output_has_no_script(text in "[a-zA-Z0-9 .,<>/=\"'!-]{0,40}") {
        let input = format!("{text}<script>{text}</script>{text}");
        let output = HtmlSanitizer::new(HtmlPolicy::Ugc).sanitize(&input);
        prop_assert!(!output.to_ascii_lowercase().contains("<script"));
    }

    #[test]
    fn prop_ugc_output_has_only_rebuilt_tags(input in markup_strategy()) {
        let output = HtmlSanitizer::new(HtmlPolicy::Ugc).sanitize(&input);
        assert_only_rebuilt_tags(&output);
    }

    #[test]
    fn prop_strict_output_has_no_tags(input in markup_strategy()) {
        let output = HtmlSanitizer::new(HtmlPolicy::Strict).sanitize(&input);
        prop_assert!(!output.contains('<'), "{:?} -> {:?}", input, output);
    }

    #[test]
    fn prop_escape_output_has_no_markup(text in ".{0,40}") {
        let output = HtmlSanitizer::new(HtmlPolicy::Escape).sanitize(&text);
        prop_assert!(!output.contains('<'));
        prop_assert!(!output.contains('>'));
        prop_assert!(!output.contains('"'));
    }
}
