use xviz_stream_core::error::Result;
use xviz_stream_core::{MediaPayload, Object, Value};

use crate::config::MajorVersion;
use crate::record::LogRecord;

/// Metadata record parser. The router overwrites `type` on the result.
pub trait MetadataParser: Send + Sync {
    fn parse(&self, msg: Object) -> Result<Object>;
}

/// Versioned timeslice decoder (one per protocol major version).
pub trait TimesliceDecoder: Send + Sync {
    fn major_version(&self) -> MajorVersion;
    fn decode(&self, msg: Value, convert_primitive: bool) -> Result<LogRecord>;
}

/// Media sub-pipeline (blobs and opaque binary chunks).
///
/// `Ok(None)` means the payload was consumed without producing a record.
pub trait MediaHandler: Send + Sync {
    fn handle(&self, media: MediaPayload) -> Result<Option<LogRecord>>;
}
