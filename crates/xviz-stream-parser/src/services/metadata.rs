use xviz_stream_core::error::Result;
use xviz_stream_core::{Object, Value};

use crate::dispatch::MetadataParser;

/// Version assumed for metadata that predates `log_info`.
pub const LEGACY_METADATA_VERSION: &str = "1.0.0";

const LOG_INFO_TIMES: [&str; 2] = ["start_time", "end_time"];

/// Built-in metadata parser.
///
/// Lifts `log_info.start_time` / `log_info.end_time` to the top level when
/// the top level lacks them; metadata without `log_info` and without a
/// `version` is stamped with [`LEGACY_METADATA_VERSION`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMetadataParser;

impl MetadataParser for DefaultMetadataParser {
    fn parse(&self, mut msg: Object) -> Result<Object> {
        match msg.get("log_info").and_then(Value::as_object).cloned() {
            Some(info) => {
                for key in LOG_INFO_TIMES {
                    if msg.contains_key(key) {
                        continue;
                    }
                    if let Some(v) = info.get(key) {
                        msg.insert(key.to_string(), v.clone());
                    }
                }
            }
            None => {
                msg.entry("version".to_string())
                    .or_insert_with(|| Value::from(LEGACY_METADATA_VERSION));
            }
        }
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    fn obj(v: serde_json::Value) -> Object {
        Value::from(v).as_object().cloned().unwrap()
    }

    #[test]
    fn lifts_log_info_times() {
        let out = DefaultMetadataParser
            .parse(obj(json!({
                "version": "2.0.0",
                "start_time": 5,
                "log_info": {"start_time": 1, "end_time": 9}
            })))
            .unwrap();
        assert_eq!(out.get("start_time"), Some(&Value::from(json!(5))));
        assert_eq!(out.get("end_time"), Some(&Value::from(json!(9))));
    }

    #[test]
    fn stamps_legacy_version() {
        let out = DefaultMetadataParser.parse(obj(json!({"streams": {}}))).unwrap();
        assert_eq!(out.get("version").and_then(Value::as_str), Some("1.0.0"));
    }
}
