use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use truecommons_types::{Measure, WriteIntent};

// ── Builders ──────────────────────────────────────────────────────

#[test]
fn for_action_sets_only_the_action() {
    let intent = WriteIntent::for_action("produce");
    assert_eq!(intent.action, "produce");
    assert!(intent.provider.is_none());
    assert!(intent.resource_quantity.is_none());
    assert!(intent.due.is_none());
}

#[test]
fn builders_compose() {
    let beginning = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 3, 1, 17, 0, 0).unwrap();

    let intent = WriteIntent::for_action("transfer")
        .with_provider("alice")
        .with_receiver("bob")
        .with_scope("the-commons")
        .with_resource("widget-1")
        .conforming_to("Document")
        .with_resource_quantity(Measure::new(2.0, "kilogram"))
        .with_effort_quantity(Measure::count(1.0))
        .spanning(beginning, end)
        .due_at(end);

    assert_eq!(intent.provider.as_deref(), Some("alice"));
    assert_eq!(intent.receiver.as_deref(), Some("bob"));
    assert_eq!(intent.in_scope_of.as_deref(), Some("the-commons"));
    assert_eq!(intent.resource_inventoried_as.as_deref(), Some("widget-1"));
    assert_eq!(intent.resource_conforms_to.as_deref(), Some("Document"));
    assert_eq!(intent.has_beginning, Some(beginning));
    assert_eq!(intent.has_end, Some(end));
    assert_eq!(intent.due, Some(end));
    assert_eq!(
        intent.resource_quantity.unwrap().has_unit.as_deref(),
        Some("kilogram")
    );
    assert!(intent.effort_quantity.unwrap().has_unit.is_none());
}

// ── Wire shape ────────────────────────────────────────────────────

#[test]
fn serializes_with_camel_case_field_names() {
    let intent = WriteIntent::for_action("produce")
        .with_resource_quantity(Measure::new(5.0, "hour"))
        .conforming_to("Document");

    let value = serde_json::to_value(&intent).unwrap();
    assert_eq!(
        value,
        json!({
            "action": "produce",
            "resourceConformsTo": "Document",
            "resourceQuantity": {
                "hasNumericalValue": 5.0,
                "hasUnit": "hour"
            }
        })
    );
}

#[test]
fn unset_fields_are_omitted_from_the_wire() {
    let value = serde_json::to_value(WriteIntent::for_action("use")).unwrap();
    assert_eq!(value, json!({ "action": "use" }));
}

#[test]
fn deserializes_from_sparse_wire_form() {
    let intent: WriteIntent = serde_json::from_value(json!({
        "action": "consume",
        "effortQuantity": { "hasNumericalValue": 2.5 }
    }))
    .unwrap();

    assert_eq!(intent.action, "consume");
    let effort = intent.effort_quantity.unwrap();
    assert_eq!(effort.has_numerical_value, 2.5);
    assert!(effort.has_unit.is_none());
}
