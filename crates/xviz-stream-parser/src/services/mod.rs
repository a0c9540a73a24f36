//! Built-in collaborators: metadata parser, timeslice decoders, media handler.

pub mod media;
pub mod metadata;
pub mod timeslice_v1;
pub mod timeslice_v2;

pub use media::RejectMedia;
pub use metadata::DefaultMetadataParser;
pub use timeslice_v1::TimesliceV1;
pub use timeslice_v2::TimesliceV2;
