//! Built-in v1 timeslice decoder.
//!
//! Shape: `{update_type?, vehicle_pose?, state_updates: [{timestamp,
//! primitives, variables}]}`. v1 primitive streams are flat lists whose items
//! carry their own `type`; with `convert_primitive` they are regrouped into
//! the v2 layout (`{"polygons": [...], "points": [...]}`).

use xviz_stream_core::error::{Result, XvizError};
use xviz_stream_core::{Object, Value};

use crate::config::MajorVersion;
use crate::dispatch::TimesliceDecoder;
use crate::record::{LogRecord, Timeslice};

use super::timeslice_v2::DEFAULT_UPDATE_TYPE;

/// Stream name given to the top-level `vehicle_pose`.
pub const VEHICLE_POSE_STREAM: &str = "/vehicle_pose";

/// Group for primitives without a `type`.
const UNTYPED_GROUP: &str = "primitives";

#[derive(Debug, Default, Clone, Copy)]
pub struct TimesliceV1;

impl TimesliceDecoder for TimesliceV1 {
    fn major_version(&self) -> MajorVersion {
        MajorVersion::V1
    }

    fn decode(&self, msg: Value, convert_primitive: bool) -> Result<LogRecord> {
        let mut map = match msg {
            Value::Object(map) => map,
            _ => return Err(XvizError::Decode("v1 timeslice must be an object".into())),
        };

        let state_updates = match map.remove("state_updates") {
            Some(Value::Array(updates)) if !updates.is_empty() => updates,
            _ => {
                return Err(XvizError::Decode(
                    "v1 timeslice requires a non-empty state_updates array".into(),
                ))
            }
        };

        let update_type = map
            .get("update_type")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_UPDATE_TYPE)
            .to_lowercase();

        let mut slice = Timeslice::new(MajorVersion::V1, update_type);
        slice.timestamp = state_updates
            .first()
            .and_then(|u| u.get("timestamp"))
            .and_then(Value::as_f64);

        if let Some(pose) = map.remove("vehicle_pose") {
            slice.streams.insert(VEHICLE_POSE_STREAM.into(), pose);
        }

        for update in state_updates {
            let Value::Object(mut update) = update else {
                return Err(XvizError::Decode("v1 state update must be an object".into()));
            };
            if let Some(Value::Object(primitives)) = update.remove("primitives") {
                for (stream, list) in primitives {
                    let list = if convert_primitive { regroup(list) } else { list };
                    slice.streams.insert(stream, list);
                }
            }
            if let Some(Value::Object(variables)) = update.remove("variables") {
                slice.streams.extend(variables);
            }
        }

        Ok(LogRecord::Timeslice(slice))
    }
}

/// v2 group name for a v1 primitive type.
pub fn primitive_group(v1_type: &str) -> String {
    match v1_type {
        "polygon" | "polygon2d" => "polygons".into(),
        "point" | "points2d" | "points3d" => "points".into(),
        "circle" | "circle2d" => "circles".into(),
        "line2d" | "polyline" => "polylines".into(),
        "text" => "texts".into(),
        "stadium" => "stadiums".into(),
        "image" => "images".into(),
        other => format!("{other}s"),
    }
}

/// Regroup a flat v1 primitive list by item type. Non-lists pass through.
fn regroup(list: Value) -> Value {
    let items = match list {
        Value::Array(items) => items,
        other => return other,
    };

    let mut groups = Object::new();
    for item in items {
        let (group, item) = match item {
            Value::Object(mut obj) => match obj.remove("type") {
                Some(Value::String(t)) => (primitive_group(&t), Value::Object(obj)),
                Some(other) => {
                    obj.insert("type".into(), other);
                    (UNTYPED_GROUP.to_string(), Value::Object(obj))
                }
                None => (UNTYPED_GROUP.to_string(), Value::Object(obj)),
            },
            other => (UNTYPED_GROUP.to_string(), other),
        };
        if let Value::Array(bucket) = groups.entry(group).or_insert_with(|| Value::Array(Vec::new())) {
            bucket.push(item);
        }
    }
    Value::Object(groups)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;
    use serde_json::json;

    fn slice(v: serde_json::Value, convert: bool) -> Timeslice {
        match TimesliceV1.decode(Value::from(v), convert).unwrap() {
            LogRecord::Timeslice(t) => t,
            other => panic!("expected timeslice, got {other:?}"),
        }
    }

    fn sample() -> serde_json::Value {
        json!({
            "vehicle_pose": {"time": 10, "x": 1},
            "state_updates": [{
                "timestamp": 10,
                "primitives": {
                    "/objects": [
                        {"type": "polygon2d", "vertices": [[0, 0], [1, 1]]},
                        {"type": "circle2d", "center": [0, 0], "radius_m": 1},
                        {"type": "polygon2d", "vertices": [[2, 2]]}
                    ]
                },
                "variables": {"/speed": {"values": [3]}}
            }]
        })
    }

    #[test]
    fn collects_pose_primitives_and_variables() {
        let t = slice(sample(), false);
        assert_eq!(t.timestamp, Some(10.0));
        assert_eq!(t.version, MajorVersion::V1);
        assert!(t.streams.contains_key(VEHICLE_POSE_STREAM));
        assert!(t.streams.contains_key("/speed"));
        assert_eq!(t.streams.get("/objects").and_then(Value::as_array).map(Vec::len), Some(3));
    }

    #[test]
    fn convert_primitive_regroups_by_type() {
        let t = slice(sample(), true);
        let objects = t.streams.get("/objects").unwrap();
        assert_eq!(objects.get("polygons").and_then(Value::as_array).map(Vec::len), Some(2));
        assert_eq!(objects.get("circles").and_then(Value::as_array).map(Vec::len), Some(1));
        let first = &objects.get("polygons").and_then(Value::as_array).unwrap()[0];
        assert!(first.get("type").is_none());
    }

    #[test]
    fn missing_state_updates_is_a_decode_error() {
        let err = TimesliceV1.decode(Value::from(json!({"vehicle_pose": {}})), false).unwrap_err();
        assert_eq!(err.code().as_str(), "DECODE_ERROR");
    }
}
