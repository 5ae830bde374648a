use super::*;
use std::str::FromStr;

#[test]
fn test_typed_id_creation() {
    let id = UserId::new();
    assert!(!id.to_string().is_empty());
}

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = EnvelopeId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_id_roundtrip_through_string() {
    let id = TransactionId::new();
    let parsed = TransactionId::from_str(&id.to_string()).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn test_typed_id_from_str_rejects_garbage() {
    assert!(UserId::from_str("not-a-uuid").is_err());
}

#[test]
fn test_typed_ids_are_time_ordered() {
    // UUID v7 embeds a timestamp, so sequential IDs sort in creation order.
    let a = RecurringPaymentId::new();
    let b = RecurringPaymentId::new();
    assert!(a.into_inner() <= b.into_inner());
}

#[test]
fn test_typed_id_serde_transparent() {
    let id = UserId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", id.into_inner()));
}
