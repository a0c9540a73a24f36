//! xviz-stream parser library entry.
//!
//! This crate wires the core payload decoder, the envelope unwrapper, the
//! message router, and the version gate into one synchronous pipeline. It
//! also ships the built-in collaborators (metadata parser, v1/v2 timeslice
//! decoders, media handler) and the strict YAML configuration loader. It is
//! consumed by the binary (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod record;
pub mod services;
pub mod stream;

pub use dispatch::ParseOptions;
pub use record::{LogRecord, Timeslice};
pub use stream::{IgnoreReason, StreamOutcome, StreamParser, StreamParserBuilder};
