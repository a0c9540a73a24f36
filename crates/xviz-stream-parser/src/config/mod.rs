//! Parser config loader (strict parsing).

pub mod schema;
pub mod settings;

use std::fs;
use std::path::Path;

use xviz_stream_core::error::{Result, XvizError};

pub use schema::{ParserConfig, ProtocolSection};
pub use settings::{MajorVersion, ProtocolSettings};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ParserConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        XvizError::Internal(format!("read config failed ({}): {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ParserConfig> {
    let cfg: ParserConfig = serde_yaml::from_str(s)
        .map_err(|e| XvizError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
