//! Reconciliation of used keys against defined keys.
//!
//! - `flatten_keys`: nested document → set of dot-paths
//! - `reconcile`: used/defined sets → missing and unused keys
//! - `delete_key_path`: structural delete with empty-parent pruning (fix mode)

use std::collections::BTreeSet;

use serde_json::Value;

/// Separator between nested property names in a key path.
pub const KEY_SEPARATOR: char = '.';

/// Result of comparing the used-key set with the defined-key set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyDiff {
    /// Used in code but not defined.
    pub missing: BTreeSet<String>,
    /// Defined but never used.
    pub unused: BTreeSet<String>,
}

/// `missing = used − defined`, `unused = defined − used`.
pub fn reconcile(defined: &BTreeSet<String>, used: &BTreeSet<String>) -> KeyDiff {
    KeyDiff {
        missing: used.difference(defined).cloned().collect(),
        unused: defined.difference(used).cloned().collect(),
    }
}

/// Produce a dot-path for every leaf of a nested document.
///
/// Anything that is not an object is a leaf, including arrays. Empty objects
/// contribute no keys.
pub fn flatten_keys(value: &Value) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    flatten_into(value, String::new(), &mut keys);
    keys
}

fn flatten_into(value: &Value, prefix: String, keys: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}{}{}", prefix, KEY_SEPARATOR, key)
                };
                flatten_into(child, path, keys);
            }
        }
        _ => {
            if !prefix.is_empty() {
                keys.insert(prefix);
            }
        }
    }
}

/// Delete `key_path` from a nested document.
///
/// Every ancestor object left empty by the deletion is removed as well.
/// Returns whether `value` itself became empty. A path that does not exist
/// (or that runs through a leaf) leaves the document untouched and returns
/// `false`.
pub fn delete_key_path(value: &mut Value, key_path: &str) -> bool {
    let segments: Vec<&str> = key_path.split(KEY_SEPARATOR).collect();
    delete_segments(value, &segments)
}

fn delete_segments(value: &mut Value, segments: &[&str]) -> bool {
    let Value::Object(map) = value else {
        return false;
    };
    let Some((head, rest)) = segments.split_first() else {
        return false;
    };

    if rest.is_empty() {
        // shift_remove keeps the order of the remaining keys
        if map.shift_remove(*head).is_none() {
            return false;
        }
    } else {
        let Some(child) = map.get_mut(*head) else {
            return false;
        };
        if !delete_segments(child, rest) {
            return false;
        }
        map.shift_remove(*head);
    }

    map.is_empty()
}
