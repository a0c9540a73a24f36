//! Binary container (GLB) parsing (panic-free).
//!
//! Layout, all integers little-endian:
//! - header: magic (4 bytes, `glTF` or `XVIZ`), version (u32, must be 2),
//!   total length (u32)
//! - chunks: length (u32), type (u32), data. The first chunk is `JSON`, an
//!   optional `BIN\0` chunk follows. Unknown chunk types are skipped.
//!
//! The message lives under the JSON document's `xviz` member (or is the whole
//! document when absent). String leaves of the form `#/bufferViews/N` point
//! into the BIN chunk and are replaced with the referenced bytes.
//!
//! Parsing rules:
//! - Never index raw buffers; always use `Buf` and `remaining()` checks.
//! - Never `unwrap()` / `expect()` / `panic!()` in production paths.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, XvizError};
use crate::value::{Object, Value};

use super::BinaryCodec;

pub const MAGIC_GLTF: [u8; 4] = *b"glTF";
pub const MAGIC_XVIZ: [u8; 4] = *b"XVIZ";
pub const GLB_VERSION: u32 = 2;
pub const GLB_HEADER_LEN: usize = 12;

const CHUNK_HEADER_LEN: usize = 8;
const CHUNK_JSON: u32 = u32::from_le_bytes(*b"JSON");
const CHUNK_BIN: u32 = u32::from_le_bytes(*b"BIN\0");

const BUFFER_VIEW_PREFIX: &str = "#/bufferViews/";

/// Parsed container (chunks only, references unresolved).
#[derive(Debug, Clone)]
pub struct GlbContainer {
    pub magic: [u8; 4],
    pub json: Value,
    /// BIN chunk (zero-copy slice of the input).
    pub bin: Option<Bytes>,
}

/// Signature check: the 4-byte magic only.
///
/// Header length and version are checked by [`decode_container`], so a
/// container with a bad header is an error, never an opaque chunk.
pub fn is_glb(buf: &[u8]) -> bool {
    matches!(buf.get(..4), Some(m) if m == MAGIC_GLTF || m == MAGIC_XVIZ)
}

/// Split a container into its JSON document and BIN chunk.
pub fn decode_container(mut buf: Bytes) -> Result<GlbContainer> {
    if buf.remaining() < GLB_HEADER_LEN {
        return Err(XvizError::Binary("container too short".into()));
    }

    let mut magic = [0u8; 4];
    buf.copy_to_slice(&mut magic);
    if magic != MAGIC_GLTF && magic != MAGIC_XVIZ {
        return Err(XvizError::Binary("bad container magic".into()));
    }

    let version = buf.get_u32_le();
    if version != GLB_VERSION {
        return Err(XvizError::UnsupportedVersion(format!("container version {version}")));
    }

    let declared = buf.get_u32_le() as usize;
    let body_len = declared
        .checked_sub(GLB_HEADER_LEN)
        .ok_or_else(|| XvizError::Binary(format!("declared length {declared} below header size")))?;
    if body_len > buf.remaining() {
        return Err(XvizError::Binary(format!(
            "declared length {declared} exceeds buffer ({} bytes)",
            buf.remaining() + GLB_HEADER_LEN
        )));
    }
    buf.truncate(body_len);

    let mut json = None;
    let mut bin = None;

    while buf.has_remaining() {
        if buf.remaining() < CHUNK_HEADER_LEN {
            return Err(XvizError::Binary("truncated chunk header".into()));
        }
        let chunk_len = buf.get_u32_le() as usize;
        let chunk_type = buf.get_u32_le();
        if chunk_len > buf.remaining() {
            return Err(XvizError::Binary(format!(
                "chunk length {chunk_len} exceeds remaining {}",
                buf.remaining()
            )));
        }
        let data = buf.copy_to_bytes(chunk_len);

        match chunk_type {
            CHUNK_JSON if json.is_none() => {
                let doc = Value::from_json_slice(&data)
                    .map_err(|e| XvizError::Binary(format!("json chunk: {e}")))?;
                json = Some(doc);
            }
            CHUNK_JSON => return Err(XvizError::Binary("duplicate json chunk".into())),
            _ if json.is_none() => {
                return Err(XvizError::Binary("first chunk must be json".into()));
            }
            CHUNK_BIN if bin.is_none() => bin = Some(data),
            _ => {} // unknown or repeated chunk: skipped
        }
    }

    let json = json.ok_or_else(|| XvizError::Binary("missing json chunk".into()))?;
    Ok(GlbContainer { magic, json, bin })
}

/// Decode a container into the message value, resolving buffer views.
pub fn decode_glb(buf: Bytes) -> Result<Value> {
    let GlbContainer { json, bin, .. } = decode_container(buf)?;

    let views = json
        .get("bufferViews")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let payload = match json {
        Value::Object(mut doc) => match doc.remove("xviz") {
            Some(inner) => inner,
            None => Value::Object(doc),
        },
        other => other,
    };

    resolve_views(payload, &views, bin.as_ref())
}

fn resolve_views(v: Value, views: &[Value], bin: Option<&Bytes>) -> Result<Value> {
    match v {
        Value::String(s) => match s.strip_prefix(BUFFER_VIEW_PREFIX) {
            Some(idx) => {
                let idx: usize = idx
                    .parse()
                    .map_err(|_| XvizError::Binary(format!("bad buffer view pointer: {s}")))?;
                buffer_view(idx, views, bin).map(Value::Bytes)
            }
            None => Ok(Value::String(s)),
        },
        Value::Array(items) => items
            .into_iter()
            .map(|item| resolve_views(item, views, bin))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => map
            .into_iter()
            .map(|(k, item)| resolve_views(item, views, bin).map(|r| (k, r)))
            .collect::<Result<Object>>()
            .map(Value::Object),
        other => Ok(other),
    }
}

fn buffer_view(idx: usize, views: &[Value], bin: Option<&Bytes>) -> Result<Bytes> {
    let view = views
        .get(idx)
        .ok_or_else(|| XvizError::Binary(format!("buffer view {idx} not found")))?;
    let bin = bin.ok_or_else(|| XvizError::Binary("buffer view without bin chunk".into()))?;

    let offset = view.get("byteOffset").and_then(Value::as_f64).unwrap_or(0.0) as usize;
    let len = view
        .get("byteLength")
        .and_then(Value::as_f64)
        .ok_or_else(|| XvizError::Binary(format!("buffer view {idx} missing byteLength")))?
        as usize;

    let end = offset
        .checked_add(len)
        .filter(|end| *end <= bin.len())
        .ok_or_else(|| XvizError::Binary(format!("buffer view {idx} out of range")))?;
    Ok(bin.slice(offset..end))
}

/// Build a container from a JSON document and optional BIN payload.
///
/// Chunks are padded to 4-byte alignment (JSON with spaces, BIN with zeros).
pub fn encode_glb(magic: [u8; 4], json: &serde_json::Value, bin: Option<&[u8]>) -> Result<Bytes> {
    let mut doc = serde_json::to_vec(json)?;
    while doc.len() % 4 != 0 {
        doc.push(b' ');
    }
    let bin_padded = bin.map(|b| {
        let mut v = b.to_vec();
        while v.len() % 4 != 0 {
            v.push(0);
        }
        v
    });

    let total = GLB_HEADER_LEN
        + CHUNK_HEADER_LEN
        + doc.len()
        + bin_padded.as_ref().map(|b| CHUNK_HEADER_LEN + b.len()).unwrap_or(0);
    let total_u32 = u32::try_from(total)
        .map_err(|_| XvizError::Binary(format!("container too large: {total} bytes")))?;

    let mut out = BytesMut::with_capacity(total);
    out.put_slice(&magic);
    out.put_u32_le(GLB_VERSION);
    out.put_u32_le(total_u32);
    out.put_u32_le(doc.len() as u32);
    out.put_u32_le(CHUNK_JSON);
    out.put_slice(&doc);
    if let Some(b) = bin_padded {
        out.put_u32_le(b.len() as u32);
        out.put_u32_le(CHUNK_BIN);
        out.put_slice(&b);
    }
    Ok(out.freeze())
}

/// Default binary codec: GLB containers with `glTF` or `XVIZ` magic.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlbCodec;

impl BinaryCodec for GlbCodec {
    fn is_binary(&self, buf: &[u8]) -> bool {
        is_glb(buf)
    }

    fn decode(&self, buf: Bytes) -> Result<Value> {
        decode_glb(buf)
    }
}
