#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::path::PathBuf;

use clap::Parser;
use xviz_stream_parser::cli::Cli;

#[test]
fn config_and_payloads() {
    let cli = Cli::try_parse_from(["xviz-stream-parser", "--config", "parser.yaml", "a.glb", "b.json"])
        .expect("must parse");
    assert_eq!(cli.config, Some(PathBuf::from("parser.yaml")));
    assert_eq!(cli.payloads, vec![PathBuf::from("a.glb"), PathBuf::from("b.json")]);
}

#[test]
fn config_flag_without_value_is_rejected() {
    let res = Cli::try_parse_from(["xviz-stream-parser", "frame.bin", "--config"]);
    assert!(res.is_err());
}

#[test]
fn payloads_are_required() {
    let err = Cli::try_parse_from(["xviz-stream-parser"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}
