//! Attribute algebra.
//!
//! Attribute maps are opaque name -> value sets attached to operations. The
//! JSON `null` value is the null-sentinel: it means "remove this attribute"
//! and is distinct from the key being absent.
//!
//! Every function borrows its inputs and returns a freshly allocated map, or
//! `None` when the result would have no keys.

use serde_json::Value;
use std::collections::BTreeMap;

/// Formatting attributes carried by an operation.
pub type AttributeMap = BTreeMap<String, Value>;

fn non_empty(map: AttributeMap) -> Option<AttributeMap> {
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// Compose attributes `a` followed by `b`.
///
/// Keys set by `b` win. With `keep_null` false, keys whose final value is
/// the null-sentinel are dropped; composing onto an insert uses this mode.
/// With `keep_null` true they survive, which composing two retains needs.
#[must_use]
pub fn compose(
    a: Option<&AttributeMap>,
    b: Option<&AttributeMap>,
    keep_null: bool,
) -> Option<AttributeMap> {
    let mut attributes = b.cloned().unwrap_or_default();

    if let Some(a) = a {
        for (key, value) in a {
            if !attributes.contains_key(key) {
                attributes.insert(key.clone(), value.clone());
            }
        }
    }

    if !keep_null {
        attributes.retain(|_, value| !value.is_null());
    }

    non_empty(attributes)
}

/// Attributes that turn `a` into `b`.
///
/// A key present in `a` but missing from `b` maps to the null-sentinel.
#[must_use]
pub fn diff(a: Option<&AttributeMap>, b: Option<&AttributeMap>) -> Option<AttributeMap> {
    let empty = AttributeMap::new();
    let a = a.unwrap_or(&empty);
    let b = b.unwrap_or(&empty);

    let mut attributes = AttributeMap::new();
    for key in a.keys().chain(b.keys()) {
        let left = a.get(key);
        let right = b.get(key);
        if left != right {
            attributes.insert(key.clone(), right.cloned().unwrap_or(Value::Null));
        }
    }

    non_empty(attributes)
}

/// Transform attributes `b` against concurrent attributes `a`.
///
/// Without priority `b` wins outright. With priority `a` is treated as
/// already applied, so keys it sets are dropped from `b`.
#[must_use]
pub fn transform(
    a: Option<&AttributeMap>,
    b: Option<&AttributeMap>,
    priority: bool,
) -> Option<AttributeMap> {
    let Some(a) = a else {
        return b.cloned();
    };
    let b = b?;
    if !priority {
        return Some(b.clone());
    }

    let attributes = b
        .iter()
        .filter(|(key, _)| !a.contains_key(*key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    non_empty(attributes)
}

/// Attributes that undo applying `attr` on top of `base`.
#[must_use]
pub fn invert(attr: Option<&AttributeMap>, base: Option<&AttributeMap>) -> Option<AttributeMap> {
    let empty = AttributeMap::new();
    let attr = attr.unwrap_or(&empty);
    let base = base.unwrap_or(&empty);

    let mut inverted = AttributeMap::new();
    for (key, base_value) in base {
        if let Some(value) = attr.get(key) {
            if value != base_value {
                inverted.insert(key.clone(), base_value.clone());
            }
        }
    }
    for (key, value) in attr {
        if !base.contains_key(key) && !value.is_null() {
            inverted.insert(key.clone(), Value::Null);
        }
    }

    non_empty(inverted)
}
