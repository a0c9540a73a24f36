//! Built-in v2 `state_update` decoder.
//!
//! Shape: `{update_type, updates: [{timestamp, poses, primitives,
//! time_series, future_instances, variables, ui_primitives}]}`. All stream
//! sections of all updates are merged into one stream map; later updates
//! overwrite earlier ones for the same stream.

use xviz_stream_core::error::{Result, XvizError};
use xviz_stream_core::{Object, Value};

use crate::config::MajorVersion;
use crate::dispatch::TimesliceDecoder;
use crate::record::{LogRecord, Timeslice};

/// Sections keyed by stream name.
const STREAM_SECTIONS: [&str; 5] = [
    "poses",
    "primitives",
    "future_instances",
    "variables",
    "ui_primitives",
];

/// Value arrays a time series entry may carry (first present wins).
const SERIES_VALUE_KINDS: [&str; 4] = ["doubles", "int32s", "bools", "strings"];

pub const DEFAULT_UPDATE_TYPE: &str = "snapshot";

#[derive(Debug, Default, Clone, Copy)]
pub struct TimesliceV2;

impl TimesliceDecoder for TimesliceV2 {
    fn major_version(&self) -> MajorVersion {
        MajorVersion::V2
    }

    fn decode(&self, msg: Value, _convert_primitive: bool) -> Result<LogRecord> {
        let mut map = match msg {
            Value::Object(map) => map,
            _ => return Err(XvizError::Decode("v2 state_update must be an object".into())),
        };

        let updates = match map.remove("updates") {
            Some(Value::Array(updates)) if !updates.is_empty() => updates,
            _ => {
                return Err(XvizError::Decode(
                    "v2 state_update requires a non-empty updates array".into(),
                ))
            }
        };

        let update_type = map
            .get("update_type")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_UPDATE_TYPE)
            .to_lowercase();

        let mut slice = Timeslice::new(MajorVersion::V2, update_type);
        slice.timestamp = updates
            .first()
            .and_then(|u| u.get("timestamp"))
            .and_then(Value::as_f64);

        for update in updates {
            let Value::Object(mut update) = update else {
                return Err(XvizError::Decode("v2 update entry must be an object".into()));
            };
            for section in STREAM_SECTIONS {
                if let Some(Value::Object(streams)) = update.remove(section) {
                    slice.streams.extend(streams);
                }
            }
            if let Some(Value::Array(series)) = update.remove("time_series") {
                for entry in &series {
                    merge_time_series(entry, &mut slice.streams);
                }
            }
        }

        Ok(LogRecord::Timeslice(slice))
    }
}

/// Split one multi-stream time series entry into per-stream values.
fn merge_time_series(entry: &Value, streams: &mut Object) {
    let Some(names) = entry.get("streams").and_then(Value::as_array) else {
        return;
    };
    let values = entry.get("values").and_then(|values| {
        SERIES_VALUE_KINDS
            .iter()
            .find_map(|kind| values.get(kind).and_then(Value::as_array))
    });

    for (i, name) in names.iter().enumerate() {
        let Some(name) = name.as_str() else { continue };
        let mut out = Object::new();
        if let Some(ts) = entry.get("timestamp") {
            out.insert("timestamp".into(), ts.clone());
        }
        if let Some(id) = entry.get("object_id") {
            out.insert("object_id".into(), id.clone());
        }
        out.insert(
            "value".into(),
            values.and_then(|v| v.get(i)).cloned().unwrap_or_default(),
        );
        streams.insert(name.to_string(), Value::Object(out));
    }
}
