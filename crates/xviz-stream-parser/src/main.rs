//! xviz-stream-parser CLI.
//!
//! Each payload file is fed through the stream pipeline as one binary frame.
//! Records print to stdout as JSON lines; failures are logged and make the
//! process exit non-zero.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use xviz_stream_core::RawPayload;
use xviz_stream_parser::cli::Cli;
use xviz_stream_parser::config::{self, ParserConfig};
use xviz_stream_parser::StreamParser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cfg = match &cli.config {
        Some(path) => match config::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "config load failed");
                return ExitCode::from(2);
            }
        },
        None => ParserConfig::default(),
    };

    let parser = StreamParser::from_config(&cfg);
    let opts = parser.default_options();
    tracing::info!(version = %parser.settings().major_version, "xviz-stream-parser starting");

    let mut failed = 0usize;
    for file in &cli.payloads {
        let path = file.display();
        let bytes = match std::fs::read(file) {
            Ok(b) => b,
            Err(e) => {
                tracing::error!(%path, error = %e, "read payload failed");
                failed += 1;
                continue;
            }
        };

        parser.parse_stream_message(
            RawPayload::from(bytes),
            |record| match serde_json::to_string(&record) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::error!(%path, error = %e, "record serialization failed"),
            },
            |e| {
                tracing::error!(%path, code = e.code().as_str(), error = %e, "payload failed");
                failed += 1;
            },
            &opts,
        );
    }

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
