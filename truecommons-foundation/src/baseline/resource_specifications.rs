//! Default resource specifications.
//!
//! `defaultUnitOfResource` and `defaultUnitOfEffort` hold unit stable keys;
//! the reconciler resolves them to backend unit ids at creation time, which
//! is why units reconcile first.

use super::{BaselineRecord, ClassBaseline};
use serde_json::json;
use truecommons_types::EntityClass;

pub(super) fn baseline() -> ClassBaseline {
    let records = vec![
        BaselineRecord::new(
            "Document",
            json!({
                "note": "General document resource specification for text-based content, reports, and documentation",
                "defaultUnitOfResource": "one",
                "defaultUnitOfEffort": "hour",
            }),
        ),
        BaselineRecord::new(
            "Software",
            json!({
                "note": "Software resource specification for code, applications, and digital tools",
                "defaultUnitOfResource": "one",
                "defaultUnitOfEffort": "hour",
            }),
        ),
        BaselineRecord::new(
            "Design",
            json!({
                "note": "Design resource specification for visual designs, mockups, and creative assets",
                "defaultUnitOfResource": "one",
                "defaultUnitOfEffort": "hour",
            }),
        ),
        BaselineRecord::new(
            "Knowledge",
            json!({
                "note": "Knowledge resource specification for expertise, skills, and intellectual resources",
                "defaultUnitOfResource": "one",
                "defaultUnitOfEffort": "hour",
            }),
        ),
        BaselineRecord::new(
            "Dataset",
            json!({
                "note": "Dataset resource specification for structured data, databases, and information collections",
                "defaultUnitOfResource": "one",
                "defaultUnitOfEffort": "hour",
            }),
        ),
        BaselineRecord::new(
            "Hardware",
            json!({
                "note": "Hardware resource specification for physical devices, equipment, and infrastructure",
                "defaultUnitOfResource": "piece",
                "defaultUnitOfEffort": "hour",
            }),
        ),
        BaselineRecord::new(
            "Service",
            json!({
                "note": "Service resource specification for digital and professional services",
                "defaultUnitOfResource": "hour",
                "defaultUnitOfEffort": "hour",
            }),
        ),
        BaselineRecord::new(
            "Material",
            json!({
                "note": "Material resource specification for physical materials and supplies",
                "defaultUnitOfResource": "kilogram",
                "defaultUnitOfEffort": "hour",
            }),
        ),
    ];

    let required_keys = ["Document", "Software"].map(String::from).to_vec();

    ClassBaseline {
        class: EntityClass::ResourceSpecification,
        records,
        required_keys,
        core_keys: None,
    }
}
