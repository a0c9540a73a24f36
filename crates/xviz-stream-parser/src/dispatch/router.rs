use std::sync::Arc;

use xviz_stream_core::error::Result;
use xviz_stream_core::protocol::discriminator::{apply_metadata_fixup, discriminator, Discriminator};
use xviz_stream_core::{Object, Value};

use crate::record::{self, LogRecord};

use super::gate::VersionGate;
use super::handlers::MetadataParser;

/// Per-call parse options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Ask the timeslice decoder to convert legacy primitives.
    pub convert_primitive: bool,
}

/// Stateless dispatcher from a decoded value to a record.
///
/// Metadata, error and done messages are rewritten here; everything else is a
/// data update handed to the [`VersionGate`].
#[derive(Clone)]
pub struct MessageRouter {
    metadata: Arc<dyn MetadataParser>,
    gate: VersionGate,
}

impl MessageRouter {
    pub fn new(metadata: Arc<dyn MetadataParser>, gate: VersionGate) -> Self {
        Self { metadata, gate }
    }

    pub fn gate(&self) -> &VersionGate {
        &self.gate
    }

    /// Route one message. `Ok(None)` is an ack.
    pub fn route(&self, msg: Value, opts: &ParseOptions) -> Result<Option<LogRecord>> {
        let mut map = match msg {
            Value::Object(map) => map,
            // arrays and scalars have no discriminator
            other => return self.gate.route(other, opts.convert_primitive).map(Some),
        };

        if apply_metadata_fixup(&mut map) {
            tracing::trace!("untyped v2 metadata tagged as metadata");
        }

        let kind = discriminator(&map);
        tracing::trace!(?kind, "message routed");

        match kind {
            Discriminator::Metadata => {
                let mut parsed = self.metadata.parse(map)?;
                set_type(&mut parsed, record::METADATA);
                Ok(Some(LogRecord::Metadata(parsed)))
            }
            Discriminator::Error => {
                set_type(&mut map, record::ERROR);
                map.insert("message".into(), Value::from(record::STREAM_SERVER_ERROR));
                Ok(Some(LogRecord::Error(map)))
            }
            Discriminator::Done => {
                set_type(&mut map, record::DONE);
                Ok(Some(LogRecord::Done(map)))
            }
            Discriminator::Ack => Ok(None),
            Discriminator::Snapshot | Discriminator::Incremental | Discriminator::Unknown => self
                .gate
                .route(Value::Object(map), opts.convert_primitive)
                .map(Some),
        }
    }
}

fn set_type(map: &mut Object, tag: &str) {
    map.insert("type".into(), Value::from(tag));
}
