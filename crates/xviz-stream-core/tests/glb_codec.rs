//! Binary container codec tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use bytes::Bytes;
use serde_json::json;

use xviz_stream_core::protocol::glb::{
    decode_container, decode_glb, encode_glb, is_glb, GlbCodec, MAGIC_GLTF, MAGIC_XVIZ,
};
use xviz_stream_core::protocol::BinaryCodec;
use xviz_stream_core::Value;

#[test]
fn signature_is_the_magic_alone() {
    let ok = encode_glb(MAGIC_GLTF, &json!({}), None).unwrap();
    assert!(is_glb(&ok));
    assert!(GlbCodec.is_binary(&ok));

    let mut wrong_version = ok.to_vec();
    wrong_version[4] = 1;
    assert!(is_glb(&wrong_version));

    assert!(is_glb(b"glTF"));
    assert!(is_glb(b"XVIZ\x02\x00\x00\x00"));
    assert!(!is_glb(b"glT"));
    assert!(!is_glb(b"{\"type\":\"done\"}"));
}

#[test]
fn recognized_magic_with_bad_header_is_an_error() {
    let mut v1 = encode_glb(MAGIC_GLTF, &json!({"xviz": {"type": "done"}}), None)
        .unwrap()
        .to_vec();
    v1[4] = 1;
    let err = GlbCodec.decode(Bytes::from(v1)).unwrap_err();
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");

    let err = GlbCodec
        .decode(Bytes::from_static(b"XVIZ\x02\x00\x00\x00"))
        .unwrap_err();
    assert_eq!(err.code().as_str(), "BINARY_ERROR");
}

#[test]
fn document_without_xviz_member_is_returned_whole() {
    let buf = encode_glb(MAGIC_XVIZ, &json!({"type": "ack"}), None).unwrap();
    let v = decode_glb(buf).unwrap();
    assert_eq!(v, Value::from(json!({"type": "ack"})));
}

#[test]
fn bin_chunk_is_zero_copy_slice() {
    let bin = [7u8, 8, 9];
    let buf = encode_glb(MAGIC_XVIZ, &json!({"xviz": {}}), Some(&bin)).unwrap();
    let c = decode_container(buf).unwrap();
    // padded to 4-byte alignment
    assert_eq!(c.bin.unwrap(), Bytes::from_static(&[7, 8, 9, 0]));
    assert_eq!(c.magic, MAGIC_XVIZ);
}

#[test]
fn buffer_view_without_bin_chunk_fails() {
    let doc = json!({
        "bufferViews": [{"buffer": 0, "byteLength": 4}],
        "xviz": {"colors": "#/bufferViews/0"}
    });
    let buf = encode_glb(MAGIC_GLTF, &doc, None).unwrap();
    let err = decode_glb(buf).unwrap_err();
    assert_eq!(err.code().as_str(), "BINARY_ERROR");
}

#[test]
fn short_buffer_is_rejected_not_panicking() {
    let err = decode_glb(Bytes::from_static(b"XVIZ\x02\x00")).unwrap_err();
    assert_eq!(err.code().as_str(), "BINARY_ERROR");
}
