// Unit tests for request id generation.

use crate::request_id;

#[test]
fn given_generated_id_when_inspected_then_has_sdk_prefix_and_suffix() {
    let id = request_id::generate();

    let parts: Vec<&str> = id.splitn(3, '_').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "sdk");
    assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(parts[2].len(), 9);
    assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn given_repeated_generation_then_ids_are_unique() {
    let mut ids: Vec<String> = (0..100).map(|_| request_id::generate()).collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 100);
}
