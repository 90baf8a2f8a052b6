//! Sequence, map and tuple scenarios.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use std::collections::{BTreeMap, HashMap, VecDeque};
use struct_sanitizer::sanitizer::Suffix;
use struct_sanitizer::{impl_deep_copy, GraphCopier, Shape};

#[derive(Debug, Clone, PartialEq)]
struct Cell {
    text: String,
    weight: f32,
}

impl_deep_copy!(Cell { text, weight });

#[derive(Debug, PartialEq)]
struct Sheet {
    rows: Vec<Vec<Cell>>,
    headers: [String; 2],
    index: HashMap<u32, Vec<String>>,
    history: VecDeque<(String, u64)>,
}

impl_deep_copy!(Sheet {
    rows,
    headers,
    index,
    history
});

fn cell(text: &str) -> Cell {
    Cell {
        text: text.into(),
        weight: 1.5,
    }
}

fn sheet() -> Sheet {
    Sheet {
        rows: vec![vec![cell("a"), cell("b")], vec![], vec![cell("c")]],
        headers: ["h1".into(), "h2".into()],
        index: HashMap::from([(7, vec!["i".into()]), (8, Vec::new())]),
        history: VecDeque::from([("edit".to_string(), 1)]),
    }
}

#[test]
fn test_sheet_lengths_and_keys_kept() {
    let original = sheet();
    let copy = GraphCopier::new(Suffix::new("_updated"))
        .copy(&original)
        .unwrap();

    assert_eq!(copy.rows.len(), 3);
    assert_eq!(copy.rows[0].len(), 2);
    assert!(copy.rows[1].is_empty());
    assert_eq!(copy.rows[2][0], cell("c_updated"));
    assert_eq!(copy.headers, ["h1_updated".to_string(), "h2_updated".to_string()]);

    let mut keys: Vec<_> = copy.index.keys().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, vec![7, 8]);
    assert_eq!(copy.index[&7], vec!["i_updated"]);
    assert!(copy.index[&8].is_empty());

    assert_eq!(copy.history[0], ("edit_updated".to_string(), 1));
}

#[test]
fn test_sheet_report() {
    let (_, report) = GraphCopier::new(Suffix::new("!"))
        .copy_with_report(&sheet())
        .unwrap();

    // a, b, c, h1, h2, i, edit
    assert_eq!(report.strings_transformed, 7);
    assert_eq!(report.count(Shape::Map), 1);
    // rows, three row vectors, headers, two index vectors, history
    assert_eq!(report.count(Shape::Sequence), 8);
    // sheet, three cells, one history tuple
    assert_eq!(report.count(Shape::Aggregate), 5);
}

#[test]
fn test_map_keys_are_not_transformed() {
    let original = BTreeMap::from([
        ("<b>".to_string(), "<b>".to_string()),
        ("plain".to_string(), "plain".to_string()),
    ]);
    let copy = GraphCopier::new(|text: &str| text.to_uppercase())
        .copy(&original)
        .unwrap();

    assert_eq!(copy["<b>"], "<B>");
    assert_eq!(copy["plain"], "PLAIN");
}

#[test]
fn test_float_bits_preserved() {
    let original = vec![f64::NAN, -0.0, f64::INFINITY, 0.1 + 0.2];
    let copy = GraphCopier::new(Suffix::new("x")).copy(&original).unwrap();
    for (before, after) in original.iter().zip(&copy) {
        assert_eq!(before.to_bits(), after.to_bits());
    }
}
