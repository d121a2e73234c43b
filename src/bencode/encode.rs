use super::error::BencodeError;
use super::value::Value;
use std::io::Write;

/// Encodes a value into a fresh byte vector.
///
/// Output is canonical: dictionary keys come out in lexicographic byte order
/// at every nesting level, so equal values always encode to equal bytes.
///
/// ```
/// use tmeta::bencode::{encode, Dict, Value};
/// use bytes::Bytes;
///
/// let mut dict = Dict::new();
/// dict.insert(Bytes::from_static(b"b"), Value::Integer(2));
/// dict.insert(Bytes::from_static(b"a"), Value::Integer(1));
/// assert_eq!(encode(&Value::Dict(dict)).unwrap(), b"d1:ai1e1:bi2ee");
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::new();
    encode_to(value, &mut buf)?;
    Ok(buf)
}

/// Streams the encoding of `value` into any writer.
pub fn encode_to<W: Write>(value: &Value, writer: &mut W) -> Result<(), BencodeError> {
    match value {
        Value::Integer(i) => write!(writer, "i{}e", i)?,
        Value::Bytes(b) => write_bytes(writer, b)?,
        Value::List(items) => {
            writer.write_all(b"l")?;
            for item in items {
                encode_to(item, writer)?;
            }
            writer.write_all(b"e")?;
        }
        Value::Dict(entries) => {
            writer.write_all(b"d")?;
            for (key, item) in entries {
                write_bytes(writer, key)?;
                encode_to(item, writer)?;
            }
            writer.write_all(b"e")?;
        }
    }
    Ok(())
}

fn write_bytes<W: Write>(writer: &mut W, bytes: &[u8]) -> std::io::Result<()> {
    write!(writer, "{}:", bytes.len())?;
    writer.write_all(bytes)
}
