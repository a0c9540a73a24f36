//! Raw payload classification and decode (one pass).
//!
//! Order of checks:
//! 1. empty/falsy payload: returned unchanged as a value (no parse)
//! 2. blob: media handler
//! 3. bytes with binary signature: binary codec
//! 4. bytes bracketed by `{}` / `[]`: UTF-8 JSON
//! 5. other bytes: opaque chunk for the media handler
//! 6. structured value: nested fields decoded, exactly one level deep
//! 7. text: JSON
//!
//! Step 6 stops at [`NESTED_DECODE_DEPTH`]. Deeper byte fields are left as-is
//! so that binary-looking data inside regular JSON trees is never mistaken for
//! a protocol message.

use bytes::Bytes;

use crate::error::Result;
use crate::protocol::BinaryCodec;
use crate::value::{Object, Value};

/// How many levels below the top of a structured payload get decoded.
pub const NESTED_DECODE_DEPTH: usize = 1;

/// Binary large object handed to the media handler (images, packed frames).
#[derive(Debug, Clone, PartialEq)]
pub struct MediaPayload {
    pub data: Bytes,
    pub mime_type: Option<String>,
}

impl MediaPayload {
    pub fn new(data: Bytes) -> Self {
        Self {
            data,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }
}

/// One received transport payload.
#[derive(Debug, Clone)]
pub enum RawPayload {
    /// Text frame.
    Text(String),
    /// Binary frame.
    Bytes(Bytes),
    /// Blob handle (always routed to the media handler).
    Blob(MediaPayload),
    /// Host-side structured value; fields may still hold undecoded bytes.
    Value(Value),
}

impl From<String> for RawPayload {
    fn from(s: String) -> Self {
        RawPayload::Text(s)
    }
}

impl From<&str> for RawPayload {
    fn from(s: &str) -> Self {
        RawPayload::Text(s.to_string())
    }
}

impl From<Bytes> for RawPayload {
    fn from(b: Bytes) -> Self {
        RawPayload::Bytes(b)
    }
}

impl From<Vec<u8>> for RawPayload {
    fn from(b: Vec<u8>) -> Self {
        RawPayload::Bytes(Bytes::from(b))
    }
}

impl From<Value> for RawPayload {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) => RawPayload::Text(s),
            Value::Bytes(b) => RawPayload::Bytes(b),
            other => RawPayload::Value(other),
        }
    }
}

impl RawPayload {
    /// The payload as a value, without decoding anything.
    pub fn into_value(self) -> Value {
        match self {
            RawPayload::Text(s) => Value::String(s),
            RawPayload::Bytes(b) => Value::Bytes(b),
            RawPayload::Blob(media) => Value::Bytes(media.data),
            RawPayload::Value(v) => v,
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            RawPayload::Text(s) => s.is_empty(),
            RawPayload::Bytes(b) => b.is_empty(),
            RawPayload::Blob(_) => false,
            RawPayload::Value(v) => !v.is_truthy(),
        }
    }
}

/// Decode path chosen for a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Ignore,
    Media,
    Binary,
    JsonBytes,
    OpaqueBytes,
    Structured,
    JsonText,
}

/// Result of the decode pass.
#[derive(Debug, Clone)]
pub enum Decoded {
    /// Blob or opaque chunk for the media handler.
    Media(MediaPayload),
    /// Structural value ready for envelope unwrap and routing.
    Value(Value),
}

/// True when the buffer starts and ends with matching JSON brackets.
pub fn looks_like_json(buf: &[u8]) -> bool {
    matches!(
        (buf.first(), buf.last()),
        (Some(b'{'), Some(b'}')) | (Some(b'['), Some(b']'))
    )
}

/// Pick the decode path without consuming the payload.
pub fn classify(payload: &RawPayload, codec: &dyn BinaryCodec) -> PayloadKind {
    if payload.is_empty() {
        return PayloadKind::Ignore;
    }
    match payload {
        RawPayload::Blob(_) => PayloadKind::Media,
        RawPayload::Bytes(b) if codec.is_binary(b) => PayloadKind::Binary,
        RawPayload::Bytes(b) if looks_like_json(b) => PayloadKind::JsonBytes,
        RawPayload::Bytes(_) => PayloadKind::OpaqueBytes,
        RawPayload::Value(Value::String(_)) => PayloadKind::JsonText,
        RawPayload::Value(Value::Bytes(b)) if codec.is_binary(b) => PayloadKind::Binary,
        RawPayload::Value(Value::Bytes(b)) if looks_like_json(b) => PayloadKind::JsonBytes,
        RawPayload::Value(Value::Bytes(_)) => PayloadKind::OpaqueBytes,
        RawPayload::Value(_) => PayloadKind::Structured,
        RawPayload::Text(_) => PayloadKind::JsonText,
    }
}

/// Classify and decode a payload. Errors propagate untouched.
pub fn decode(payload: RawPayload, codec: &dyn BinaryCodec) -> Result<Decoded> {
    let kind = classify(&payload, codec);
    tracing::debug!(?kind, "payload classified");

    match (kind, payload) {
        (PayloadKind::Ignore, payload) => Ok(Decoded::Value(payload.into_value())),
        (_, RawPayload::Blob(media)) => Ok(Decoded::Media(media)),
        (_, RawPayload::Text(s)) | (_, RawPayload::Value(Value::String(s))) => {
            Value::from_json_str(&s).map(Decoded::Value)
        }
        (PayloadKind::Binary, RawPayload::Bytes(b))
        | (PayloadKind::Binary, RawPayload::Value(Value::Bytes(b))) => {
            codec.decode(b).map(Decoded::Value)
        }
        (PayloadKind::JsonBytes, RawPayload::Bytes(b))
        | (PayloadKind::JsonBytes, RawPayload::Value(Value::Bytes(b))) => {
            Value::from_json_slice(&b).map(Decoded::Value)
        }
        (_, RawPayload::Bytes(b)) | (_, RawPayload::Value(Value::Bytes(b))) => {
            Ok(Decoded::Media(MediaPayload::new(b)))
        }
        (_, RawPayload::Value(v)) => decode_nested(v, 0, codec).map(Decoded::Value),
    }
}

/// Decode a structural value's fields down to [`NESTED_DECODE_DEPTH`].
///
/// The top-level value itself is never re-parsed.
pub fn decode_structured(v: Value, codec: &dyn BinaryCodec) -> Result<Value> {
    decode_nested(v, 0, codec)
}

fn decode_nested(v: Value, depth: usize, codec: &dyn BinaryCodec) -> Result<Value> {
    match v {
        Value::Bytes(b) if depth > 0 && codec.is_binary(&b) => codec.decode(b),
        Value::Bytes(b) if depth > 0 && looks_like_json(&b) => Value::from_json_slice(&b),
        Value::Object(map) if depth < NESTED_DECODE_DEPTH => map
            .into_iter()
            .map(|(k, field)| decode_nested(field, depth + 1, codec).map(|f| (k, f)))
            .collect::<Result<Object>>()
            .map(Value::Object),
        Value::Array(items) if depth < NESTED_DECODE_DEPTH => items
            .into_iter()
            .map(|item| decode_nested(item, depth + 1, codec))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other),
    }
}
