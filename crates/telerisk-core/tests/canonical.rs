use serde_json::json;
use telerisk_core::{canonical, sha256_hex};

#[test]
fn stable_json_bytes_are_key_order_deterministic() {
    let a = json!({"recommender_tag": "escalate", "risk_id": "R001"});
    let b = json!({"risk_id": "R001", "recommender_tag": "escalate"});
    let ba = canonical::stable_json_bytes(&a).expect("stable json a");
    let bb = canonical::stable_json_bytes(&b).expect("stable json b");
    assert_eq!(ba, bb);
}

#[test]
fn sha256_is_repeatable_for_same_bytes() {
    let bytes = b"Risk_ID,RMS_Stage,Recommender_Tag";
    assert_eq!(sha256_hex(bytes), sha256_hex(bytes));
}

#[test]
fn stable_json_hash_ignores_key_order() {
    let h1 = canonical::stable_json_hash_hex(&json!({"k2": 2, "k1": {"b": 2, "a": 1}}))
        .expect("hash1");
    let h2 = canonical::stable_json_hash_hex(&json!({"k1": {"a": 1, "b": 2}, "k2": 2}))
        .expect("hash2");
    assert_eq!(h1, h2);
}
