//! Message discriminator lookup.
//!
//! Servers have named the kind field three ways over time. Lookup order is
//! fixed: `type`, then `message`, then `update_type`; the first truthy field
//! governs. Anything unrecognized (or no field at all) is a data update.

use crate::value::{Object, Value};

/// Discriminator fields in priority order.
pub const DISCRIMINATOR_FIELDS: [&str; 3] = ["type", "message", "update_type"];

/// Metadata `version` emitted by servers that omit the `type` field.
pub const V2_METADATA_VERSION: &str = "2.0.0";

/// Semantic kind of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discriminator {
    Metadata,
    Error,
    Done,
    Ack,
    Snapshot,
    Incremental,
    /// Missing or unrecognized: handled as a data update.
    Unknown,
}

impl Discriminator {
    pub fn parse(s: &str) -> Self {
        match s {
            "metadata" => Discriminator::Metadata,
            "error" => Discriminator::Error,
            "done" => Discriminator::Done,
            "ack" => Discriminator::Ack,
            "snapshot" => Discriminator::Snapshot,
            "incremental" => Discriminator::Incremental,
            _ => Discriminator::Unknown,
        }
    }

    /// Snapshot, incremental, and unknown all take the data-update path.
    pub fn is_data_update(self) -> bool {
        matches!(
            self,
            Discriminator::Snapshot | Discriminator::Incremental | Discriminator::Unknown
        )
    }
}

/// Read the discriminator of `map`.
pub fn discriminator(map: &Object) -> Discriminator {
    DISCRIMINATOR_FIELDS
        .iter()
        .filter_map(|field| map.get(*field))
        .find(|v| v.is_truthy())
        .and_then(Value::as_str)
        .map(Discriminator::parse)
        .unwrap_or(Discriminator::Unknown)
}

/// Legacy fixup: v2 metadata sent without a `type` field.
///
/// Presence follows the discriminator rule: a falsy `type` counts as missing,
/// a falsy `streams` does not qualify. Returns true when `type = "metadata"`
/// was synthesized.
pub fn apply_metadata_fixup(map: &mut Object) -> bool {
    let needs_type = !map.get("type").is_some_and(Value::is_truthy)
        && map.get("streams").is_some_and(Value::is_truthy)
        && map.get("version").and_then(Value::as_str) == Some(V2_METADATA_VERSION);
    if needs_type {
        map.insert("type".into(), Value::from("metadata"));
    }
    needs_type
}
