//! Stream parser facade.
//!
//! Decode-once pipeline, one synchronous call per received payload:
//! classify + decode -> envelope unwrap -> route -> version gate.
//!
//! The parser is immutable after construction and cheap to clone (shared
//! `Arc` internals), so one instance can serve every connection and thread.

use std::sync::Arc;

use xviz_stream_core::error::{Result, XvizError};
use xviz_stream_core::payload::{self, Decoded};
use xviz_stream_core::protocol::envelope;
use xviz_stream_core::protocol::glb::GlbCodec;
use xviz_stream_core::protocol::BinaryCodec;
use xviz_stream_core::{RawPayload, Value};

use crate::config::{ParserConfig, ProtocolSettings};
use crate::dispatch::{
    MediaHandler, MessageRouter, MetadataParser, ParseOptions, TimesliceDecoder, VersionGate,
};
use crate::record::LogRecord;
use crate::services::{DefaultMetadataParser, RejectMedia, TimesliceV1, TimesliceV2};

/// Why a payload produced no record and no error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Envelope addressed to another protocol sharing the channel.
    ForeignNamespace(String),
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamOutcome {
    /// Success; `None` for ack messages.
    Record(Option<LogRecord>),
    /// Deliberately dropped; callbacks are not invoked.
    Ignored(IgnoreReason),
}

#[derive(Clone)]
pub struct StreamParser {
    inner: Arc<StreamParserInner>,
}

struct StreamParserInner {
    codec: Arc<dyn BinaryCodec>,
    media: Arc<dyn MediaHandler>,
    router: MessageRouter,
    defaults: ParseOptions,
}

impl StreamParser {
    /// Parser with the built-in collaborators.
    pub fn new(settings: ProtocolSettings) -> Self {
        Self::builder(settings).build()
    }

    pub fn builder(settings: ProtocolSettings) -> StreamParserBuilder {
        StreamParserBuilder::new(settings)
    }

    pub fn from_config(cfg: &ParserConfig) -> Self {
        Self::builder(cfg.protocol_settings())
            .with_default_options(cfg.parse_options())
            .build()
    }

    pub fn settings(&self) -> ProtocolSettings {
        self.inner.router.gate().settings()
    }

    /// Options from configuration, for callers without their own.
    pub fn default_options(&self) -> ParseOptions {
        self.inner.defaults
    }

    /// Run the full pipeline and report the outcome explicitly.
    pub fn decode_stream_message(
        &self,
        payload: RawPayload,
        opts: &ParseOptions,
    ) -> Result<StreamOutcome> {
        let value = match payload::decode(payload, self.inner.codec.as_ref())? {
            Decoded::Media(media) => {
                return self.inner.media.handle(media).map(StreamOutcome::Record)
            }
            Decoded::Value(v) => v,
        };

        let value = match envelope::unpack(value) {
            Ok(env) if env.is_xviz() => {
                tracing::trace!(msg_type = %env.msg_type, "envelope unwrapped");
                env.data
            }
            Ok(env) => {
                tracing::debug!(
                    namespace = %env.namespace,
                    msg_type = %env.msg_type,
                    "foreign envelope dropped"
                );
                return Ok(StreamOutcome::Ignored(IgnoreReason::ForeignNamespace(
                    env.namespace,
                )));
            }
            Err(plain) => plain,
        };

        self.parse_log_data(value, opts).map(StreamOutcome::Record)
    }

    /// Callback form. Exactly one of `on_result` / `on_error` runs, except for
    /// foreign envelopes, where neither does.
    pub fn parse_stream_message<R, E>(
        &self,
        payload: RawPayload,
        on_result: R,
        on_error: E,
        opts: &ParseOptions,
    ) where
        R: FnOnce(Option<LogRecord>),
        E: FnOnce(XvizError),
    {
        match self.decode_stream_message(payload, opts) {
            Ok(StreamOutcome::Record(record)) => on_result(record),
            Ok(StreamOutcome::Ignored(_)) => {}
            Err(e) => {
                tracing::warn!(code = e.code().as_str(), error = %e, "stream message failed");
                on_error(e);
            }
        }
    }

    /// Core transform for callers that already hold a decoded value.
    pub fn parse_log_data(&self, value: Value, opts: &ParseOptions) -> Result<Option<LogRecord>> {
        self.inner.router.route(value, opts)
    }
}

pub struct StreamParserBuilder {
    settings: ProtocolSettings,
    codec: Arc<dyn BinaryCodec>,
    metadata: Arc<dyn MetadataParser>,
    v1: Arc<dyn TimesliceDecoder>,
    v2: Arc<dyn TimesliceDecoder>,
    media: Arc<dyn MediaHandler>,
    defaults: ParseOptions,
}

impl StreamParserBuilder {
    pub fn new(settings: ProtocolSettings) -> Self {
        Self {
            settings,
            codec: Arc::new(GlbCodec),
            metadata: Arc::new(DefaultMetadataParser),
            v1: Arc::new(TimesliceV1),
            v2: Arc::new(TimesliceV2),
            media: Arc::new(RejectMedia),
            defaults: ParseOptions::default(),
        }
    }

    pub fn with_binary_codec(mut self, codec: Arc<dyn BinaryCodec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_metadata_parser(mut self, parser: Arc<dyn MetadataParser>) -> Self {
        self.metadata = parser;
        self
    }

    pub fn with_timeslice_v1(mut self, decoder: Arc<dyn TimesliceDecoder>) -> Self {
        self.v1 = decoder;
        self
    }

    pub fn with_timeslice_v2(mut self, decoder: Arc<dyn TimesliceDecoder>) -> Self {
        self.v2 = decoder;
        self
    }

    pub fn with_media_handler(mut self, media: Arc<dyn MediaHandler>) -> Self {
        self.media = media;
        self
    }

    pub fn with_default_options(mut self, defaults: ParseOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn build(self) -> StreamParser {
        let gate = VersionGate::new(self.settings, self.v1, self.v2);
        StreamParser {
            inner: Arc::new(StreamParserInner {
                codec: self.codec,
                media: self.media,
                router: MessageRouter::new(self.metadata, gate),
                defaults: self.defaults,
            }),
        }
    }
}
