//! Protocol modules (binary container, envelope, discriminator).
//!
//! - Binary: GLB containers carrying a JSON document plus a BIN chunk.
//! - Envelope: `{type: "<namespace>/<type>", data}` multiplexing wrapper.
//! - Discriminator: the field that selects a message's semantic kind.
//!
//! All parsers are panic-free: malformed input is reported as `XvizError`
//! instead of panicking or indexing raw buffers.

pub mod discriminator;
pub mod envelope;
pub mod glb;

use bytes::Bytes;

use crate::error::Result;
use crate::value::Value;

/// Binary protocol codec boundary.
///
/// The classifier asks `is_binary` first and only hands signature-matching
/// buffers to `decode`.
pub trait BinaryCodec: Send + Sync {
    /// Signature check (magic bytes). Must not fail or allocate.
    fn is_binary(&self, buf: &[u8]) -> bool;
    /// Full decode of a signature-matching buffer.
    fn decode(&self, buf: Bytes) -> Result<Value>;
}
