use std::sync::Arc;

use xviz_stream_core::error::Result;
use xviz_stream_core::Value;

use crate::config::{MajorVersion, ProtocolSettings};
use crate::record::LogRecord;

use super::handlers::TimesliceDecoder;

/// Selects the timeslice decoder matching the configured major version.
#[derive(Clone)]
pub struct VersionGate {
    settings: ProtocolSettings,
    v1: Arc<dyn TimesliceDecoder>,
    v2: Arc<dyn TimesliceDecoder>,
}

impl VersionGate {
    pub fn new(
        settings: ProtocolSettings,
        v1: Arc<dyn TimesliceDecoder>,
        v2: Arc<dyn TimesliceDecoder>,
    ) -> Self {
        Self { settings, v1, v2 }
    }

    pub fn settings(&self) -> ProtocolSettings {
        self.settings
    }

    /// Decoder for the active version. Anything but v1 goes to v2.
    pub fn selected(&self) -> &Arc<dyn TimesliceDecoder> {
        match self.settings.major_version {
            MajorVersion::V1 => &self.v1,
            MajorVersion::V2 => &self.v2,
        }
    }

    pub fn route(&self, msg: Value, convert_primitive: bool) -> Result<LogRecord> {
        let decoder = self.selected();
        tracing::trace!(
            version = %self.settings.major_version,
            decoder = %decoder.major_version(),
            convert_primitive,
            "data update routed"
        );
        decoder.decode(msg, convert_primitive)
    }
}
