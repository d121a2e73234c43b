//! Bencode encoding and decoding ([BEP-3]).
//!
//! This is the generic metadata value that torrent files are made of. The
//! metainfo layer never touches raw bytes directly: it decodes into a
//! [`Value`], pattern-matches on it, and hands a [`Value`] back to
//! [`encode`] when writing.
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Dictionaries are stored in a `BTreeMap`, so encoding always emits keys in
//! lexicographic byte order regardless of insertion order.
//!
//! ```
//! use tmeta::bencode::{decode, encode, Value};
//!
//! let value = decode(b"d3:cow3:moo4:spami42ee").unwrap();
//! assert_eq!(value.get(b"cow").and_then(Value::as_str), Some("moo"));
//! assert_eq!(value.get(b"spam").and_then(Value::as_integer), Some(42));
//! assert_eq!(encode(&value).unwrap(), b"d3:cow3:moo4:spami42ee");
//! ```
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod value;

pub use decode::decode;
pub use encode::{encode, encode_to};
pub use error::BencodeError;
pub use value::{Dict, Value};
