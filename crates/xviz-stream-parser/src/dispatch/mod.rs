//! Dispatch layer: message router, version gate, and collaborator traits.
//!
//! Re-exports the router and handler traits so downstream consumers can
//! depend on this module directly.

pub mod gate;
pub mod handlers;
pub mod router;

pub use gate::VersionGate;
pub use handlers::{MediaHandler, MetadataParser, TimesliceDecoder};
pub use router::{MessageRouter, ParseOptions};
