//! Protocol settings shared by the version gate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Protocol major version (top-level schema generation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MajorVersion {
    V1,
    #[default]
    V2,
}

impl MajorVersion {
    pub fn as_u8(self) -> u8 {
        match self {
            MajorVersion::V1 => 1,
            MajorVersion::V2 => 2,
        }
    }
}

impl TryFrom<u8> for MajorVersion {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(MajorVersion::V1),
            2 => Ok(MajorVersion::V2),
            other => Err(format!("unsupported protocol major version: {other}")),
        }
    }
}

impl From<MajorVersion> for u8 {
    fn from(v: MajorVersion) -> u8 {
        v.as_u8()
    }
}

impl fmt::Display for MajorVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.as_u8())
    }
}

/// Active protocol configuration, fixed at parser construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProtocolSettings {
    pub major_version: MajorVersion,
}

impl ProtocolSettings {
    pub fn new(major_version: MajorVersion) -> Self {
        Self { major_version }
    }
}
