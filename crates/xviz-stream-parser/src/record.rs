//! Application-ready records produced by the parser.

use serde::Serialize;

use xviz_stream_core::{Object, Value};

use crate::config::MajorVersion;

/// Canonical `type` tag of metadata records.
pub const METADATA: &str = "METADATA";
/// Canonical `type` tag of server error records.
pub const ERROR: &str = "ERROR";
/// Canonical `type` tag of end-of-stream records.
pub const DONE: &str = "DONE";
/// Tag assigned by the built-in timeslice decoders.
pub const TIMESLICE: &str = "TIMESLICE";

/// Fixed human-readable message carried by every error record.
pub const STREAM_SERVER_ERROR: &str = "Stream server error";

/// One decoded stream message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogRecord {
    /// Metadata fields, `type` = `METADATA`.
    Metadata(Object),
    /// Server error fields, `type` = `ERROR`.
    Error(Object),
    /// End-of-stream fields, `type` = `DONE`.
    Done(Object),
    /// Data update from a versioned timeslice decoder.
    Timeslice(Timeslice),
}

impl LogRecord {
    /// Consumer-facing `type` tag.
    pub fn record_type(&self) -> &str {
        match self {
            LogRecord::Metadata(map) | LogRecord::Error(map) | LogRecord::Done(map) => {
                map.get("type").and_then(Value::as_str).unwrap_or_default()
            }
            LogRecord::Timeslice(t) => t.record_type,
        }
    }

    /// Field lookup on object-shaped records.
    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            LogRecord::Metadata(map) | LogRecord::Error(map) | LogRecord::Done(map) => map.get(key),
            LogRecord::Timeslice(_) => None,
        }
    }
}

/// Streams for one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeslice {
    #[serde(rename = "type")]
    pub record_type: &'static str,
    /// Protocol major version that produced this slice.
    pub version: MajorVersion,
    pub update_type: String,
    pub timestamp: Option<f64>,
    /// Stream name -> stream payload.
    pub streams: Object,
}

impl Timeslice {
    pub fn new(version: MajorVersion, update_type: impl Into<String>) -> Self {
        Self {
            record_type: TIMESLICE,
            version,
            update_type: update_type.into(),
            timestamp: None,
            streams: Object::new(),
        }
    }
}
