use xviz_stream_core::error::{Result, XvizError};
use xviz_stream_core::MediaPayload;

use crate::dispatch::MediaHandler;
use crate::record::LogRecord;

/// Default media handler: no media pipeline configured, every blob fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectMedia;

impl MediaHandler for RejectMedia {
    fn handle(&self, media: MediaPayload) -> Result<Option<LogRecord>> {
        tracing::debug!(
            len = media.data.len(),
            mime = media.mime_type.as_deref().unwrap_or("unknown"),
            "media payload rejected"
        );
        Err(XvizError::UnsupportedMedia {
            len: media.data.len(),
        })
    }
}
