use serde::Deserialize;
use xviz_stream_core::error::{Result, XvizError};

use super::settings::{MajorVersion, ProtocolSettings};
use crate::dispatch::ParseOptions;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    pub version: u32,

    #[serde(default)]
    pub protocol: ProtocolSection,
}

impl ParserConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(XvizError::BadConfig(format!(
                "unsupported config version {} (expected 1)",
                self.version
            )));
        }
        Ok(())
    }

    pub fn protocol_settings(&self) -> ProtocolSettings {
        ProtocolSettings::new(self.protocol.major_version)
    }

    /// Options applied when a caller does not pass its own.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            convert_primitive: self.protocol.convert_primitive,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            version: 1,
            protocol: ProtocolSection::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProtocolSection {
    #[serde(default)]
    pub major_version: MajorVersion,

    #[serde(default)]
    pub convert_primitive: bool,
}
