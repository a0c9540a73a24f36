//! Top-level facade crate for xviz-stream.
//!
//! Re-exports the core decoding primitives and the parser library so users can
//! depend on a single crate.

pub mod core {
    pub use xviz_stream_core::*;
}

pub mod parser {
    pub use xviz_stream_parser::*;
}
