//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// xviz-stream-parser - decode captured stream payloads into JSON records
#[derive(Debug, Parser)]
#[command(name = "xviz-stream-parser")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the YAML parser config
    #[arg(long, short, env = "XVIZ_STREAM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Payload files, each fed through the pipeline as one binary frame
    #[arg(required = true)]
    pub payloads: Vec<PathBuf>,
}
