use serde_json::json;
use std::str::FromStr;
use truecommons_types::{EntityClass, Payload, ReferenceEntity, RemoteId};

// ── EntityClass ───────────────────────────────────────────────────

#[test]
fn class_display_roundtrip() {
    for class in [
        EntityClass::Unit,
        EntityClass::Action,
        EntityClass::ResourceSpecification,
        EntityClass::ProcessSpecification,
        EntityClass::Agent,
        EntityClass::EconomicResource,
    ] {
        let parsed = EntityClass::from_str(&class.to_string()).unwrap();
        assert_eq!(parsed, class);
    }
}

#[test]
fn class_from_str_invalid() {
    assert!(EntityClass::from_str("ledger").is_err());
}

#[test]
fn class_display_uses_wire_names() {
    assert_eq!(
        EntityClass::ResourceSpecification.to_string(),
        "resourceSpecification"
    );
    assert_eq!(EntityClass::Unit.to_string(), "unit");
}

#[test]
fn reference_classes_carry_the_baseline() {
    assert!(EntityClass::Unit.is_reference());
    assert!(EntityClass::Action.is_reference());
    assert!(!EntityClass::Agent.is_reference());
    assert!(!EntityClass::EconomicResource.is_reference());
}

#[test]
fn reconcile_order_puts_units_before_resource_specs() {
    let order = EntityClass::RECONCILE_ORDER;
    let units = order.iter().position(|&c| c == EntityClass::Unit).unwrap();
    let specs = order
        .iter()
        .position(|&c| c == EntityClass::ResourceSpecification)
        .unwrap();
    let processes = order
        .iter()
        .position(|&c| c == EntityClass::ProcessSpecification)
        .unwrap();
    assert!(units < specs);
    assert!(specs < processes);
}

// ── RemoteId ──────────────────────────────────────────────────────

#[test]
fn remote_id_is_an_opaque_wrapper() {
    let id = RemoteId::new("hrea:01J5...");
    assert_eq!(id.as_str(), "hrea:01J5...");
    assert_eq!(id.to_string(), "hrea:01J5...");
    assert_eq!(RemoteId::from("x"), RemoteId::new("x"));
}

#[test]
fn remote_id_serializes_transparently() {
    let id = RemoteId::new("abc-123");
    assert_eq!(serde_json::to_value(&id).unwrap(), json!("abc-123"));
}

// ── ReferenceEntity ───────────────────────────────────────────────

#[test]
fn entity_builders_and_accessors() {
    let mut payload = Payload::new();
    payload.insert("label".into(), json!("Hour"));
    payload.insert("conversionFactor".into(), json!(3600.0));

    let entity = ReferenceEntity::new("hour", "unit-1")
        .with_revision("rev-1")
        .with_payload(payload);

    assert_eq!(entity.stable_key, "hour");
    assert_eq!(entity.remote_id.as_str(), "unit-1");
    assert_eq!(entity.revision_id.as_deref(), Some("rev-1"));
    assert_eq!(entity.get_str("label"), Some("Hour"));
    assert_eq!(entity.get_number("conversionFactor"), Some(3600.0));
    assert_eq!(entity.get_str("missing"), None);
    assert_eq!(entity.get_number("label"), None);
}

#[test]
fn entity_deserializes_without_optional_fields() {
    let entity: ReferenceEntity = serde_json::from_value(json!({
        "stable_key": "hour",
        "remote_id": "unit-1"
    }))
    .unwrap();
    assert!(entity.revision_id.is_none());
    assert!(entity.payload.is_empty());
}
