//! Multiplexing envelope (`{type, data}`).
//!
//! Several protocols may share one channel; each wraps its messages as
//! `{"type": "<namespace>/<sub-type>", "data": ...}`. Only the `xviz`
//! namespace is processed by this crate.

use crate::value::Value;

/// Reserved namespace of this protocol.
pub const XVIZ_NAMESPACE: &str = "xviz";

/// Unpacked envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub namespace: String,
    /// Sub-type: every segment after the namespace, rejoined with `/`.
    pub msg_type: String,
    /// Inner payload, passed through untouched.
    pub data: Value,
}

impl Envelope {
    pub fn is_xviz(&self) -> bool {
        self.namespace == XVIZ_NAMESPACE
    }

    /// Original `type` string (`namespace/sub-type`).
    pub fn full_type(&self) -> String {
        format!("{}/{}", self.namespace, self.msg_type)
    }
}

/// True when `v` has a truthy string `type` and a truthy `data`.
pub fn is_envelope(v: &Value) -> bool {
    let ty = v.get("type").and_then(Value::as_str).is_some_and(|s| !s.is_empty());
    let data = v.get("data").is_some_and(Value::is_truthy);
    ty && data
}

/// Split an envelope into namespace, sub-type, and data.
///
/// Returns the value back unchanged when it is not an envelope.
pub fn unpack(v: Value) -> Result<Envelope, Value> {
    if !is_envelope(&v) {
        return Err(v);
    }
    let mut map = match v {
        Value::Object(map) => map,
        other => return Err(other),
    };

    let ty = match map.remove("type") {
        Some(Value::String(s)) => s,
        Some(other) => {
            map.insert("type".into(), other);
            return Err(Value::Object(map));
        }
        None => return Err(Value::Object(map)),
    };
    let data = map.remove("data").unwrap_or_default();

    let mut parts = ty.split('/');
    let namespace = parts.next().unwrap_or_default().to_string();
    let msg_type = parts.collect::<Vec<_>>().join("/");

    Ok(Envelope {
        namespace,
        msg_type,
        data,
    })
}
