//! Failure scenarios: every error aborts the copy and names the failing node.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;
use struct_sanitizer::sanitizer::Suffix;
use struct_sanitizer::{impl_deep_copy, CopyError, CopyOptions, GraphCopier, IdentityPolicy};

#[derive(Debug)]
struct Node {
    label: String,
    next: Option<Rc<RefCell<Node>>>,
}

impl_deep_copy!(Node { label, next });

fn node(label: &str) -> Rc<RefCell<Node>> {
    Rc::new(RefCell::new(Node {
        label: label.into(),
        next: None,
    }))
}

fn copier() -> GraphCopier<Suffix> {
    GraphCopier::new(Suffix::new("_updated"))
}

#[test]
fn test_two_node_cycle_detected() {
    let a = node("a");
    let b = node("b");
    a.borrow_mut().next = Some(Rc::clone(&b));
    b.borrow_mut().next = Some(Rc::clone(&a));

    let err = copier().copy(&a).unwrap_err();
    assert_eq!(
        err,
        CopyError::CycleDetected {
            type_name: "Rc<RefCell<Node>>".to_string(),
            path: "$.*.*.next.*.*.*.next.*".to_string(),
        }
    );
    assert!(err.is_structural());

    // Break the cycle so the test does not leak.
    b.borrow_mut().next = None;
}

#[test]
fn test_self_loop_detected_under_preserve() {
    let a = node("a");
    a.borrow_mut().next = Some(Rc::clone(&a));

    let copier = GraphCopier::with_options(
        Suffix::new("_updated"),
        CopyOptions::default().with_identity(IdentityPolicy::Preserve),
    );
    let err = copier.copy(&a).unwrap_err();
    assert!(matches!(err, CopyError::CycleDetected { .. }));

    a.borrow_mut().next = None;
}

#[test]
fn test_acyclic_chain_copies() {
    let a = node("a");
    let b = node("b");
    a.borrow_mut().next = Some(Rc::clone(&b));

    let copy = copier().copy(&a).unwrap();
    let copy_b = copy.borrow().next.clone().unwrap();
    assert_eq!(copy.borrow().label, "a_updated");
    assert_eq!(copy_b.borrow().label, "b_updated");
    assert!(!Rc::ptr_eq(&copy_b, &b));
}

#[test]
fn test_depth_limit_on_long_chain() {
    let head = node("0");
    let mut tail = Rc::clone(&head);
    for i in 1..50 {
        let next = node(&i.to_string());
        tail.borrow_mut().next = Some(Rc::clone(&next));
        tail = next;
    }

    let copier = GraphCopier::with_options(
        Suffix::new("_updated"),
        CopyOptions::default().with_max_depth(16),
    );
    let err = copier.copy(&head).unwrap_err();
    assert!(matches!(err, CopyError::DepthExceeded { limit: 16, .. }));
    assert!(err.path().starts_with("$.*.*.next"));

    // Every node is four levels below the previous one.
    let relaxed = GraphCopier::with_options(
        Suffix::new("_updated"),
        CopyOptions::default().with_max_depth(50 * 4),
    );
    assert!(relaxed.copy(&head).is_ok());
}

#[derive(Debug)]
struct Worker {
    name: String,
    inbox: mpsc::Receiver<String>,
}

impl_deep_copy!(Worker { name, inbox });

#[test]
fn test_channel_is_unsupported() {
    let (_tx, rx) = mpsc::channel();
    let original = vec![Worker {
        name: "w".into(),
        inbox: rx,
    }];

    let err = copier().copy(&original).unwrap_err();
    assert_eq!(
        err,
        CopyError::UnsupportedShape {
            type_name: "Receiver<String>".to_string(),
            path: "$[0].inbox".to_string(),
        }
    );
    assert!(!err.is_structural());
}

#[test]
fn test_borrowed_cell_is_inaccessible() {
    let a = node("a");
    let _guard = a.borrow_mut();

    let err = copier().copy(&a).unwrap_err();
    assert!(matches!(
        err,
        CopyError::InaccessibleField { ref path, .. } if path == "$.*"
    ));
}
