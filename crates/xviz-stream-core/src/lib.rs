//! xviz-stream core: transport-agnostic payload decoding primitives.
//!
//! This crate owns the wire-level half of the stream pipeline: the error
//! surface, the structural value tree, payload classification, the binary
//! container codec, envelope unwrapping, and discriminator lookup. It carries
//! no runtime dependencies so it can be reused by any transport.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `XvizError`/`Result` so malformed
//! traffic never crashes the host.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod payload;
pub mod protocol;
pub mod value;

/// Shared result type.
pub use error::{ErrorCode, Result, XvizError};
pub use payload::{Decoded, MediaPayload, RawPayload};
pub use value::{Object, Value};
