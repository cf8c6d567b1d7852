//! Record comparison utilities for tests.
//!
//! Field-by-field diffs give readable failures where a plain `assert_eq!`
//! on two records would print both records whole.

#![allow(dead_code)]

use dxf_records::io::dxf::Tag;
use dxf_records::{EntityRecord, NotificationCollection, NotificationType};

/// Describe every difference between two records of the same type.
pub fn record_diffs(expected: &EntityRecord, actual: &EntityRecord) -> Vec<String> {
    let mut diffs = Vec::new();
    if expected.type_name() != actual.type_name() {
        diffs.push(format!("type: {} vs {}", expected.type_name(), actual.type_name()));
        return diffs;
    }
    if expected.handle != actual.handle {
        diffs.push(format!("handle: {:?} vs {:?}", expected.handle, actual.handle));
    }
    if expected.handles != actual.handles {
        diffs.push(format!("overlay: {:?} vs {:?}", expected.handles, actual.handles));
    }
    for (def, value) in expected.fields() {
        let other = actual.get_named(def.name);
        if other != Some(value) {
            diffs.push(format!("{} ({}): {:?} vs {:?}", def.name, def.code, value, other));
        }
    }
    diffs
}

/// Assert two records are equal, listing the differing fields otherwise.
pub fn assert_records_eq(expected: &EntityRecord, actual: &EntityRecord, label: &str) {
    let diffs = record_diffs(expected, actual);
    assert!(
        diffs.is_empty(),
        "{label}: {} differs:\n  {}",
        expected.type_name(),
        diffs.join("\n  ")
    );
    assert_eq!(expected, actual, "{label}");
}

/// Group codes of a tag sequence, in order.
pub fn codes(tags: &[Tag]) -> Vec<i32> {
    tags.iter().map(|tag| tag.code).collect()
}

/// Assert no notification reports dropped or suspicious data.
pub fn assert_clean(notes: &NotificationCollection, label: &str) {
    let noisy: Vec<String> = notes
        .iter()
        .filter(|n| n.notification_type != NotificationType::Comment)
        .map(|n| n.to_string())
        .collect();
    assert!(noisy.is_empty(), "{label}: unexpected notifications:\n  {}", noisy.join("\n  "));
}
