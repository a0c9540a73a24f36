//! Stream message vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use xviz_stream_parser::config::ProtocolSettings;
use xviz_stream_parser::{ParseOptions, StreamOutcome, StreamParser};

use vector_loader::load;

#[test]
fn stream_vectors() {
    let files = [
        "metadata_envelope_v2.json",
        "error_legacy_message.json",
        "done_update_type.json",
        "ack.json",
        "foreign_envelope.json",
        "state_update_v2.json",
        "malformed.json",
        "glb_metadata.json",
        "empty_text.json",
        "null_typed_metadata.json",
    ];

    let parser = StreamParser::new(ProtocolSettings::default());

    for f in files {
        let v = load(f);
        let res = parser.decode_stream_message(v.frame.into_payload(), &ParseOptions::default());

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let outcome = res.expect("expected ok outcome");
        let ex = v.expect.expect("missing expect block");

        match (ex["outcome"].as_str().unwrap(), outcome) {
            ("ignored", StreamOutcome::Ignored(_)) => {}
            ("none", StreamOutcome::Record(None)) => {}
            ("record", StreamOutcome::Record(Some(record))) => {
                assert_eq!(
                    record.record_type(),
                    ex["record_type"].as_str().unwrap(),
                    "vector={}",
                    v.description
                );
                let got = serde_json::to_value(&record).unwrap();
                for (k, want) in ex["fields"].as_object().unwrap() {
                    assert_eq!(&got[k], want, "vector={} field={k}", v.description);
                }
            }
            (want, other) => panic!("vector={} expected {want}, got {other:?}", v.description),
        }
    }
}
