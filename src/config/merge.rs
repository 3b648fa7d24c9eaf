// src/config/merge.rs

use serde_json::Value;
use serde_json::map::Entry;

/// Recursively merge `incoming` into `target`.
///
/// The walk visits `incoming`'s own keys only, so keys absent from
/// `incoming` are never removed or touched. Per key:
///
/// - when the existing value and the incoming value are both objects, the
///   merge recurses into them;
/// - otherwise the incoming value replaces the existing one outright. This
///   covers scalars, nulls, previously-absent keys, and arrays; arrays are
///   never element-wise merged, and a scalar wipes out a whole subtree.
///
/// A top-level `incoming` that is not an object (there are no keys to walk)
/// is a no-op, which also makes merging `{}` the identity.
pub fn merge_value(incoming: Value, target: &mut Value) {
    let Value::Object(entries) = incoming else {
        return;
    };

    let Value::Object(existing) = target else {
        // Recursion only descends when both sides are objects, so this arm
        // is only reachable on a non-object root; replace it wholesale.
        *target = Value::Object(entries);
        return;
    };

    for (key, value) in entries {
        match existing.entry(key) {
            Entry::Occupied(mut slot) => {
                if slot.get().is_object() && value.is_object() {
                    merge_value(value, slot.get_mut());
                } else {
                    slot.insert(value);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
        }
    }
}
