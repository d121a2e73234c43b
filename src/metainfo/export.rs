//! Canonical dictionary output for a [`Torrent`].
//!
//! Keys land in a `BTreeMap`, so the encoded form is ordered the same way at
//! every level and re-hashing the exported `info` reproduces the info hash of
//! any torrent whose info dictionary holds only the fields modelled here.

use bytes::Bytes;

use super::torrent::{Info, Torrent};
use crate::bencode::{Dict, Value};
use crate::constants::FALLBACK_MULTI_FILE_NAME;

fn key(k: &'static str) -> Bytes {
    Bytes::from_static(k.as_bytes())
}

/// Builds the top-level metainfo dictionary.
pub fn export(torrent: &Torrent) -> Value {
    let mut root = Dict::new();

    if let Some(announce) = torrent.announce() {
        root.insert(key("announce"), Value::string(announce));
    }
    if let Some(comment) = torrent.comment() {
        root.insert(key("comment"), Value::string(comment));
    }
    if let Some(date) = torrent.creation_date() {
        root.insert(key("creation date"), Value::Integer(date));
    }
    if let Some(created_by) = torrent.created_by() {
        root.insert(key("created by"), Value::string(created_by));
    }
    root.insert(key("info"), info_value(torrent.info()));

    Value::Dict(root)
}

/// Builds the `info` dictionary; its encoding is what the info hash covers.
pub fn info_value(info: &Info) -> Value {
    let mut dict = Dict::new();

    match (info.is_multi_file(), info.files()) {
        (false, [single]) => {
            dict.insert(key("length"), length(single.length));
            dict.insert(key("name"), Value::string(base_name(&single.path)));
        }
        (_, files) => {
            let name = info.save_as().unwrap_or(FALLBACK_MULTI_FILE_NAME);
            dict.insert(key("name"), Value::string(name));

            let list = files
                .iter()
                .map(|file| {
                    let mut entry = Dict::new();
                    entry.insert(key("length"), length(file.length));
                    entry.insert(key("path"), Value::List(path_list(&file.path)));
                    Value::Dict(entry)
                })
                .collect();
            dict.insert(key("files"), Value::List(list));
        }
    }

    dict.insert(key("piece length"), length(info.piece_length()));

    let pieces: Vec<u8> = info
        .pieces()
        .iter()
        .flat_map(|p| p.as_bytes().iter().copied())
        .collect();
    dict.insert(key("pieces"), Value::from(pieces));

    Value::Dict(dict)
}

/// Both the importer and the builder reject lengths past `i64::MAX`, so the
/// clamp never applies to a constructed [`Info`].
fn length(n: u64) -> Value {
    Value::Integer(i64::try_from(n).unwrap_or(i64::MAX))
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\']).filter(|s| !s.is_empty())
}

fn base_name(path: &str) -> &str {
    segments(path).last().unwrap_or(path)
}

/// Splits a stored path into `path` list segments. With more than one
/// segment the first is the shared root directory and is dropped.
fn path_list(path: &str) -> Vec<Value> {
    let parts: Vec<&str> = segments(path).collect();
    let parts = match parts.as_slice() {
        [_, rest @ ..] if !rest.is_empty() => rest,
        all => all,
    };
    parts.iter().map(|s| Value::string(s)).collect()
}
