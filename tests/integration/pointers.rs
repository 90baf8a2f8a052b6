//! Pointer, shared-target and cell scenarios.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use struct_sanitizer::sanitizer::Suffix;
use struct_sanitizer::{impl_deep_copy, CopyOptions, GraphCopier, IdentityPolicy};

#[derive(Debug)]
struct Author {
    handle: String,
}

impl_deep_copy!(Author { handle });

#[derive(Debug)]
struct Article {
    title: String,
    author: Rc<Author>,
    editor: Rc<Author>,
    notes: RefCell<Vec<String>>,
}

impl_deep_copy!(Article {
    title,
    author,
    editor,
    notes
});

fn article() -> Article {
    let shared = Rc::new(Author {
        handle: "ann".into(),
    });
    Article {
        title: "t".into(),
        author: Rc::clone(&shared),
        editor: shared,
        notes: RefCell::new(vec!["n".into()]),
    }
}

fn copier(identity: IdentityPolicy) -> GraphCopier<Suffix> {
    GraphCopier::with_options(
        Suffix::new("_updated"),
        CopyOptions::default().with_identity(identity),
    )
}

#[test]
fn test_shared_author_split_when_independent() {
    let original = article();
    let (copy, report) = copier(IdentityPolicy::Independent)
        .copy_with_report(&original)
        .unwrap();

    assert_eq!(copy.author.handle, "ann_updated");
    assert_eq!(copy.editor.handle, "ann_updated");
    assert!(!Rc::ptr_eq(&copy.author, &copy.editor));
    assert_eq!(report.shared_reused, 0);
    // title, two handles, one note
    assert_eq!(report.strings_transformed, 4);
}

#[test]
fn test_shared_author_kept_when_preserved() {
    let original = article();
    let (copy, report) = copier(IdentityPolicy::Preserve)
        .copy_with_report(&original)
        .unwrap();

    assert!(Rc::ptr_eq(&copy.author, &copy.editor));
    assert!(!Rc::ptr_eq(&copy.author, &original.author));
    assert_eq!(Rc::strong_count(&copy.author), 2);
    assert_eq!(report.shared_reused, 1);
    assert_eq!(report.strings_transformed, 3);
}

#[test]
fn test_refcell_contents_detached() {
    let original = article();
    let copy = copier(IdentityPolicy::Independent).copy(&original).unwrap();

    copy.notes.borrow_mut().push("extra".into());
    original.notes.borrow_mut()[0].push('!');

    assert_eq!(*copy.notes.borrow(), vec!["n_updated", "extra"]);
    assert_eq!(*original.notes.borrow(), vec!["n!"]);
}

#[test]
fn test_arc_mutex_graph() {
    let shared = Arc::new(Mutex::new(vec!["a".to_string()]));
    let original = vec![Arc::clone(&shared), Arc::clone(&shared)];

    let copy = copier(IdentityPolicy::Preserve).copy(&original).unwrap();
    assert!(Arc::ptr_eq(&copy[0], &copy[1]));

    copy[0].lock().unwrap().push("b".into());
    assert_eq!(*copy[1].lock().unwrap(), vec!["a_updated", "b"]);
    assert_eq!(*shared.lock().unwrap(), vec!["a"]);
}

#[test]
fn test_nested_options_and_boxes() {
    let original: Option<Box<Option<Box<String>>>> = Some(Box::new(Some(Box::new("x".into()))));
    let copy = copier(IdentityPolicy::Independent).copy(&original).unwrap();
    assert_eq!(copy, Some(Box::new(Some(Box::new("x_updated".to_string())))));
}
