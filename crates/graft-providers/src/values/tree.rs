//! Nested value tree helpers
//!
//! Value trees are JSON objects addressed by dotted key paths. A `null` leaf
//! means "absent" everywhere in graft, so helpers drop nulls instead of
//! storing them.

use graft_domain::constants::KEY_PATH_SEPARATOR;
use serde_json::{Map, Value};

/// Insert `value` at the dotted `key`, creating intermediate objects.
///
/// A `null` value removes the key. A non-object value on the way is replaced.
pub fn insert_path(tree: &mut Map<String, Value>, key: &str, value: Value) {
    if value.is_null() {
        remove_path(tree, key);
        return;
    }

    let mut segments = key.split(KEY_PATH_SEPARATOR).peekable();
    let mut node = tree;
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            node.insert(segment.to_owned(), value);
            return;
        }
        let child = node
            .entry(segment.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        if !child.is_object() {
            *child = Value::Object(Map::new());
        }
        let Value::Object(next) = child else {
            return;
        };
        node = next;
    }
}

/// Remove the dotted `key`, returning the removed value
pub fn remove_path(tree: &mut Map<String, Value>, key: &str) -> Option<Value> {
    match key.split_once(KEY_PATH_SEPARATOR) {
        None => tree.remove(key),
        Some((head, rest)) => match tree.get_mut(head) {
            Some(Value::Object(child)) => remove_path(child, rest),
            _ => None,
        },
    }
}

/// Recursively drop `null` entries
pub fn strip_nulls(tree: Map<String, Value>) -> Map<String, Value> {
    tree.into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::Object(child) => Some((key, Value::Object(strip_nulls(child)))),
            other => Some((key, other)),
        })
        .collect()
}
