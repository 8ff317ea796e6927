//! Scalar codecs (C5): lossless text encodings for str/float/bool/int payloads
//!
//! Each function encodes or decodes the single identifier token that sits in
//! the second child position of a scalar's `LinkNode` (see the encoder/decoder
//! in `linknote-codec` for the surrounding `(tag payload)` shape).

use base64::Engine as _;

use crate::error::CodecError;

/// `base64(utf8(s))`, standard alphabet with `=` padding.
pub fn encode_str(s: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(s.as_bytes())
}

/// Inverse of [`encode_str`].
pub fn decode_str(token: &str) -> Result<String, CodecError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(token)
        .map_err(|e| CodecError::MalformedScalar(format!("invalid base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| CodecError::MalformedScalar(format!("invalid utf-8: {e}")))
}

/// `True`/`False`, matching the Python source's `str(bool)` spelling.
pub fn encode_bool(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

/// Inverse of [`encode_bool`].
pub fn decode_bool(token: &str) -> Result<bool, CodecError> {
    match token {
        "True" => Ok(true),
        "False" => Ok(false),
        other => Err(CodecError::MalformedScalar(format!(
            "expected True or False, got {other}"
        ))),
    }
}

/// Decimal spelling of a signed integer.
pub fn encode_int(n: i64) -> String {
    n.to_string()
}

/// Inverse of [`encode_int`].
pub fn decode_int(token: &str) -> Result<i64, CodecError> {
    token
        .parse::<i64>()
        .map_err(|e| CodecError::MalformedScalar(format!("invalid integer {token:?}: {e}")))
}

/// `NaN`/`Infinity`/`-Infinity` for the non-finite values; `f64::to_string`
/// (already the shortest round-tripping decimal) otherwise.
pub fn encode_float(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_infinite() {
        if x > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else {
        x.to_string()
    }
}

/// Inverse of [`encode_float`].
pub fn decode_float(token: &str) -> Result<f64, CodecError> {
    match token {
        "NaN" => Ok(f64::NAN),
        "Infinity" => Ok(f64::INFINITY),
        "-Infinity" => Ok(f64::NEG_INFINITY),
        other => other
            .parse::<f64>()
            .map_err(|e| CodecError::MalformedScalar(format!("invalid float {other:?}: {e}"))),
    }
}
