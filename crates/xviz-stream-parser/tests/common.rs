//! Shared helpers: callback recorder and spy timeslice decoders.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use xviz_stream_core::error::{Result, XvizError};
use xviz_stream_core::{RawPayload, Value};
use xviz_stream_parser::config::{MajorVersion, ProtocolSettings};
use xviz_stream_parser::dispatch::TimesliceDecoder;
use xviz_stream_parser::{LogRecord, ParseOptions, StreamParser, Timeslice};

/// Everything the callbacks saw for one call.
#[derive(Debug, Default)]
pub struct Calls {
    pub results: Vec<Option<LogRecord>>,
    pub errors: Vec<XvizError>,
}

impl Calls {
    pub fn single_result(mut self) -> Option<LogRecord> {
        assert_eq!(self.results.len(), 1, "expected one result, got {self:?}");
        assert!(self.errors.is_empty(), "unexpected error: {:?}", self.errors);
        self.results.pop().unwrap()
    }

    pub fn single_error(mut self) -> XvizError {
        assert_eq!(self.errors.len(), 1, "expected one error, got {self:?}");
        assert!(self.results.is_empty(), "unexpected result: {:?}", self.results);
        self.errors.pop().unwrap()
    }

    pub fn assert_silent(&self) {
        assert!(self.results.is_empty() && self.errors.is_empty(), "expected no calls: {self:?}");
    }
}

pub fn run(parser: &StreamParser, payload: impl Into<RawPayload>, opts: &ParseOptions) -> Calls {
    let mut results = Vec::new();
    let mut errors = Vec::new();
    parser.parse_stream_message(
        payload.into(),
        |r| results.push(r),
        |e| errors.push(e),
        opts,
    );
    Calls { results, errors }
}

pub fn run_text(parser: &StreamParser, text: &str) -> Calls {
    run(parser, text, &ParseOptions::default())
}

/// Timeslice decoder that records its calls.
pub struct SpyDecoder {
    version: MajorVersion,
    calls: AtomicUsize,
    last_convert: AtomicBool,
}

impl SpyDecoder {
    pub fn new(version: MajorVersion) -> Arc<Self> {
        Arc::new(Self {
            version,
            calls: AtomicUsize::new(0),
            last_convert: AtomicBool::new(false),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_convert(&self) -> bool {
        self.last_convert.load(Ordering::SeqCst)
    }
}

impl TimesliceDecoder for SpyDecoder {
    fn major_version(&self) -> MajorVersion {
        self.version
    }

    fn decode(&self, msg: Value, convert_primitive: bool) -> Result<LogRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_convert.store(convert_primitive, Ordering::SeqCst);
        let update_type = msg
            .get("update_type")
            .and_then(Value::as_str)
            .unwrap_or("spy")
            .to_string();
        Ok(LogRecord::Timeslice(Timeslice::new(self.version, update_type)))
    }
}

/// Parser whose v1/v2 decoders are spies.
pub fn spied_parser(version: MajorVersion) -> (StreamParser, Arc<SpyDecoder>, Arc<SpyDecoder>) {
    let v1 = SpyDecoder::new(MajorVersion::V1);
    let v2 = SpyDecoder::new(MajorVersion::V2);
    let parser = StreamParser::builder(ProtocolSettings::new(version))
        .with_timeslice_v1(v1.clone())
        .with_timeslice_v2(v2.clone())
        .build();
    (parser, v1, v2)
}
