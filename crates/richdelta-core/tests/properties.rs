//! Property-based tests for delta normalization and the OT algorithms.

use proptest::prelude::*;
use richdelta_core::{AttributeMap, Delta, Embed, Op};
use serde_json::{json, Value};

// =============================================================================
// Test helpers
// =============================================================================

fn attrs(value: Value) -> Option<AttributeMap> {
    serde_json::from_value(value).unwrap()
}

/// Attributes an insert may carry.
fn insert_attrs() -> impl Strategy<Value = Option<AttributeMap>> {
    prop_oneof![
        3 => Just(None),
        1 => Just(attrs(json!({"bold": true}))),
        1 => Just(attrs(json!({"italic": true}))),
        1 => Just(attrs(json!({"color": "red"}))),
        1 => Just(attrs(json!({"bold": true, "color": "blue"}))),
    ]
}

/// Attributes a retain may carry, including removals.
fn retain_attrs() -> impl Strategy<Value = Option<AttributeMap>> {
    prop_oneof![
        3 => Just(None),
        1 => Just(attrs(json!({"bold": true}))),
        1 => Just(attrs(json!({"bold": null}))),
        1 => Just(attrs(json!({"color": "green"}))),
        1 => Just(attrs(json!({"color": null, "italic": true}))),
    ]
}

/// One step of a generated edit.
#[derive(Clone, Debug)]
enum EditStep {
    Retain(usize, Option<AttributeMap>),
    Delete(usize),
    Insert(String, Option<AttributeMap>),
    Embed(Option<AttributeMap>),
}

fn edit_step() -> impl Strategy<Value = EditStep> {
    prop_oneof![
        3 => (1..6usize, retain_attrs()).prop_map(|(n, a)| EditStep::Retain(n, a)),
        2 => (1..6usize).prop_map(EditStep::Delete),
        2 => ("[a-z]{1,5}", insert_attrs()).prop_map(|(t, a)| EditStep::Insert(t, a)),
        1 => insert_attrs().prop_map(EditStep::Embed),
    ]
}

/// A document: inserts only.
fn document() -> impl Strategy<Value = Delta> {
    prop::collection::vec(("[a-z]{1,6}", insert_attrs()), 0..6).prop_map(|runs| {
        runs.into_iter()
            .fold(Delta::new(), |doc, (text, a)| doc.insert(text, a))
    })
}

/// Build an edit that never reaches past a document of `len` units.
fn build_change(len: usize, steps: &[EditStep]) -> Delta {
    let mut remaining = len;
    let mut delta = Delta::new();
    for step in steps {
        match step {
            EditStep::Retain(n, a) => {
                let n = (*n).min(remaining);
                remaining -= n;
                delta.push(Op::retain(n, a.clone()));
            }
            EditStep::Delete(n) => {
                let n = (*n).min(remaining);
                remaining -= n;
                delta.push(Op::delete(n));
            }
            EditStep::Insert(text, a) => {
                delta.push(Op::insert(text.clone(), a.clone()));
            }
            EditStep::Embed(a) => {
                delta.push(Op::insert_embed(
                    Embed::new("image", json!("cat.png")),
                    a.clone(),
                ));
            }
        }
    }
    delta
}

fn steps() -> impl Strategy<Value = Vec<EditStep>> {
    prop::collection::vec(edit_step(), 0..8)
}

// =============================================================================
// Push normalization
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Pushing a zero-length operation never changes the delta.
    #[test]
    fn noop_push_is_ignored(doc in document(), edit in steps(), a in retain_attrs()) {
        let mut delta = build_change(doc.length(), &edit);
        let before = delta.clone();

        delta.push(Op::retain(0, a.clone()));
        delta.push(Op::delete(0));
        delta.push(Op::insert("", a));

        prop_assert_eq!(delta, before);
    }

    /// Delete-then-insert normalizes to the same ops as insert-then-delete.
    #[test]
    fn delete_insert_order_is_canonical(
        edit in steps(),
        n in 1..10usize,
        text in "[a-z]{1,5}",
        a in insert_attrs(),
    ) {
        let base = build_change(20, &edit);

        let mut delete_first = base.clone();
        delete_first.push(Op::delete(n));
        delete_first.push(Op::insert(text.clone(), a.clone()));

        let mut insert_first = base;
        insert_first.push(Op::insert(text, a));
        insert_first.push(Op::delete(n));

        prop_assert_eq!(delete_first, insert_first);
    }

    /// Same-attribute inserts and retains merge; differing ones do not.
    #[test]
    fn merge_depends_on_attributes(
        x in "[a-z]{1,5}",
        y in "[a-z]{1,5}",
        n in 1..10usize,
        m in 1..10usize,
        a in insert_attrs(),
        b in insert_attrs(),
    ) {
        let inserts = Delta::new().insert(x.clone(), a.clone()).insert(y.clone(), b.clone());
        let retains = Delta::new().retain(n, a.clone()).retain(m, b.clone());

        if a == b {
            prop_assert_eq!(inserts.ops().len(), 1);
            prop_assert_eq!(retains.ops().len(), 1);
        } else {
            prop_assert_eq!(inserts.ops().len(), 2);
            prop_assert_eq!(retains.ops().len(), 2);
        }
        prop_assert_eq!(inserts.length(), x.len() + y.len());
        prop_assert_eq!(retains.length(), n + m);
    }
}

// =============================================================================
// Algorithm properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Composition is associative when applied to a document.
    #[test]
    fn compose_is_associative(
        doc in document(),
        a_steps in steps(),
        b_steps in steps(),
        c_steps in steps(),
    ) {
        let a = build_change(doc.length(), &a_steps);
        let after_a = doc.compose(&a);
        let b = build_change(after_a.length(), &b_steps);
        let after_b = after_a.compose(&b);
        let c = build_change(after_b.length(), &c_steps);

        let sequential = after_b.compose(&c);
        let nested_right = doc.compose(&a.compose(&b.compose(&c)));
        let nested_left = doc.compose(&a.compose(&b).compose(&c));

        prop_assert_eq!(&sequential, &nested_right);
        prop_assert_eq!(&sequential, &nested_left);
    }

    /// Applying an edit and then its inverse restores the document.
    #[test]
    fn invert_round_trips(doc in document(), edit in steps()) {
        let change = build_change(doc.length(), &edit);
        let inverted = change.invert(&doc);

        prop_assert_eq!(doc.compose(&change).compose(&inverted), doc);
    }

    /// Concurrent edits converge once each side applies the other's transform.
    #[test]
    fn transform_converges(doc in document(), a_steps in steps(), b_steps in steps()) {
        let a = build_change(doc.length(), &a_steps);
        let b = build_change(doc.length(), &b_steps);

        let left = doc.compose(&a).compose(&a.transform(&b, false));
        let right = doc.compose(&b).compose(&b.transform(&a, true));
        prop_assert_eq!(&left, &right);

        let left = doc.compose(&a).compose(&a.transform(&b, true));
        let right = doc.compose(&b).compose(&b.transform(&a, false));
        prop_assert_eq!(left, right);
    }

    /// Slicing a document and concatenating the pieces gives it back.
    #[test]
    fn slice_and_concat_rebuild_document(doc in document(), split in 0..40usize) {
        let split = split.min(doc.length());
        let head = doc.slice(0, split);
        let tail = doc.slice(split, richdelta_core::INFINITY);

        prop_assert_eq!(head.length(), split);
        prop_assert_eq!(head.concat(&tail), doc);
    }
}
