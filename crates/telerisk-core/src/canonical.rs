use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::sha256_hex;

/// Compact JSON with object keys sorted at every depth, so equal values
/// always produce equal bytes whatever map ordering serde_json was built with.
pub fn stable_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut value = serde_json::to_value(value)?;
    sort_keys(&mut value);
    serde_json::to_vec(&value)
}

pub fn stable_json_hash_hex<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    stable_json_bytes(value).map(|bytes| sha256_hex(&bytes))
}

fn sort_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let mut ordered: BTreeMap<String, Value> = std::mem::take(map).into_iter().collect();
            ordered.values_mut().for_each(sort_keys);
            map.extend(ordered);
        }
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        _ => {}
    }
}
