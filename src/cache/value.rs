//! Storable Values
//!
//! The values `store` accepts, their stored byte encoding, and the textual
//! rendering written to call-history logs.

use std::fmt::{self, Write as _};

use crate::error::{CacheError, Result};

// == Value ==
/// A value that can be stored under a generated key.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

impl Value {
    // == Encoding ==
    /// Returns the bytes written to the store for this value.
    ///
    /// Numbers are stored as their decimal text, floats in the shortest form
    /// that reads back to the same `f64` (`1.0`, `0.1`, `1e300`).
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Text(text) => text.as_bytes().to_vec(),
            Value::Bytes(bytes) => bytes.clone(),
            Value::Int(n) => n.to_string().into_bytes(),
            Value::Float(x) => format!("{:?}", x).into_bytes(),
        }
    }

    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => {
                f.write_char('\'')?;
                for ch in text.chars() {
                    match ch {
                        '\\' => f.write_str("\\\\")?,
                        '\'' => f.write_str("\\'")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        // Control chars all sit below 0x100.
                        c if c.is_control() => write!(f, "\\x{:02x}", u32::from(c))?,
                        c => f.write_char(c)?,
                    }
                }
                f.write_char('\'')
            }
            Value::Bytes(bytes) => {
                f.write_str("b'")?;
                for &b in bytes {
                    match b {
                        b'\\' => f.write_str("\\\\")?,
                        b'\'' => f.write_str("\\'")?,
                        b'\n' => f.write_str("\\n")?,
                        b'\r' => f.write_str("\\r")?,
                        b'\t' => f.write_str("\\t")?,
                        0x20..=0x7e => f.write_char(b as char)?,
                        _ => write!(f, "\\x{:02x}", b)?,
                    }
                }
                f.write_char('\'')
            }
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{:?}", x),
        }
    }
}

// == JSON Conversion ==
/// Strings become `Text`, arrays of bytes `Bytes`, numbers that fit an `i64`
/// `Int` and fractional numbers `Float`.
///
/// Integers outside the `i64` range and any other JSON shape are rejected.
impl TryFrom<serde_json::Value> for Value {
    type Error = CacheError;

    fn try_from(json: serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::String(text) => Ok(Value::Text(text)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if n.is_u64() {
                    Err(CacheError::InvalidRequest(format!(
                        "integer {} is out of range",
                        n
                    )))
                } else {
                    n.as_f64().map(Value::Float).ok_or_else(|| {
                        CacheError::InvalidRequest(format!("unsupported number {}", n))
                    })
                }
            }
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|b| u8::try_from(b).ok())
                        .ok_or_else(|| {
                            CacheError::InvalidRequest(format!("{} is not a byte", item))
                        })
                })
                .collect::<Result<Vec<u8>>>()
                .map(Value::Bytes),
            other => Err(CacheError::InvalidRequest(format!(
                "cannot store a JSON {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Object(_) => "object",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::Array(_) => "array",
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(bytes.to_vec())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

// == Argument Rendering ==
/// Renders positional arguments as a tuple: `()`, `('a',)`, `(1, 2.5)`.
pub fn render_args(args: &[Value]) -> String {
    let joined = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    if args.len() == 1 {
        format!("({},)", joined)
    } else {
        format!("({})", joined)
    }
}

// == Decoders ==
/// Decodes stored bytes as UTF-8 text.
pub fn decode_text(raw: Vec<u8>) -> Result<String> {
    String::from_utf8(raw).map_err(|e| CacheError::Decode(format!("invalid UTF-8: {}", e)))
}

/// Decodes stored bytes as a big-endian unsigned integer.
///
/// Empty input decodes to zero; more than eight bytes cannot fit a `u64`.
pub fn decode_int(raw: Vec<u8>) -> Result<u64> {
    if raw.len() > 8 {
        return Err(CacheError::Decode(format!(
            "{} bytes do not fit in a 64-bit integer",
            raw.len()
        )));
    }
    Ok(raw.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bytes() {
        assert_eq!(Value::from("hello").to_bytes(), b"hello".to_vec());
        assert_eq!(Value::from(vec![0u8, 255]).to_bytes(), vec![0u8, 255]);
        assert_eq!(Value::from(42).to_bytes(), b"42".to_vec());
        assert_eq!(Value::from(-7i64).to_bytes(), b"-7".to_vec());
        assert_eq!(Value::from(1.0).to_bytes(), b"1.0".to_vec());
        assert_eq!(Value::from(3.25).to_bytes(), b"3.25".to_vec());
    }

    #[test]
    fn test_display_text_escapes() {
        assert_eq!(Value::from("foo").to_string(), "'foo'");
        assert_eq!(Value::from("it's").to_string(), "'it\\'s'");
        assert_eq!(Value::from("a\nb").to_string(), "'a\\nb'");
        assert_eq!(Value::from("héllo").to_string(), "'héllo'");
    }

    #[test]
    fn test_display_control_chars() {
        assert_eq!(Value::from("\0").to_string(), "'\\x00'");
        assert_eq!(Value::from("a\u{7f}b").to_string(), "'a\\x7fb'");
        assert_eq!(Value::from("\u{85}").to_string(), "'\\x85'");
        assert_eq!(Value::from("\u{2028}").to_string(), "'\u{2028}'");
    }

    #[test]
    fn test_display_bytes() {
        assert_eq!(Value::from(b"bar".as_slice()).to_string(), "b'bar'");
        assert_eq!(Value::from(vec![0u8, 0x2a, 0xff]).to_string(), "b'\\x00*\\xff'");
    }

    #[test]
    fn test_display_numbers() {
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_render_args() {
        assert_eq!(render_args(&[]), "()");
        assert_eq!(render_args(&[Value::from("foo")]), "('foo',)");
        assert_eq!(render_args(&[Value::from(1), Value::from(2.5)]), "(1, 2.5)");
    }

    #[test]
    fn test_from_json() {
        use serde_json::json;

        assert_eq!(Value::try_from(json!("hello")).unwrap(), Value::Text("hello".into()));
        assert_eq!(Value::try_from(json!(42)).unwrap(), Value::Int(42));
        assert_eq!(Value::try_from(json!(-42)).unwrap(), Value::Int(-42));
        assert_eq!(Value::try_from(json!(4.5)).unwrap(), Value::Float(4.5));
        assert_eq!(Value::try_from(json!([1, 2, 3])).unwrap(), Value::Bytes(vec![1, 2, 3]));
        assert_eq!(Value::try_from(json!([])).unwrap(), Value::Bytes(Vec::new()));
    }

    #[test]
    fn test_from_json_rejects_out_of_range_integer() {
        let result = Value::try_from(serde_json::json!(u64::MAX));

        match result {
            Err(CacheError::InvalidRequest(msg)) => assert!(msg.contains("out of range")),
            other => panic!("expected a range rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_rejects_other_shapes() {
        use serde_json::json;

        for json in [json!(null), json!(true), json!({"a": 1}), json!([1, 256]), json!([-1])] {
            assert!(matches!(Value::try_from(json), Err(CacheError::InvalidRequest(_))));
        }
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text(b"hello".to_vec()).unwrap(), "hello");
        assert!(matches!(decode_text(vec![0xff, 0xfe]), Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_decode_int() {
        assert_eq!(decode_int(42u64.to_be_bytes().to_vec()).unwrap(), 42);
        assert_eq!(decode_int(vec![0x01, 0x00]).unwrap(), 256);
        assert_eq!(decode_int(Vec::new()).unwrap(), 0);
        assert!(matches!(decode_int(vec![1; 9]), Err(CacheError::Decode(_))));
    }
}
