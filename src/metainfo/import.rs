//! Building a [`Torrent`] from a decoded metainfo dictionary.

use thiserror::Error;
use tracing::debug;

use super::announce::{normalize, reconcile};
use super::builder::non_empty;
use super::error::MetainfoError;
use super::info_hash::{InfoHash, PieceHash};
use super::torrent::{FileEntry, Info, Torrent};
use crate::bencode::{decode, Dict, Value};
use crate::constants::DIGEST_LEN;

/// Import behaviour switches.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Remove spaces from tracker URLs. Repairs torrents written by broken
    /// encoders, but also mangles URLs that legitimately contain spaces.
    pub strip_whitespace: bool,
    /// Append the primary tracker after a tier only if it is not already in
    /// the flattened list.
    pub dedupe_primary: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            strip_whitespace: true,
            dedupe_primary: false,
        }
    }
}

impl ImportOptions {
    pub fn strip_whitespace(mut self, strip: bool) -> Self {
        self.strip_whitespace = strip;
        self
    }

    pub fn dedupe_primary(mut self, dedupe: bool) -> Self {
        self.dedupe_primary = dedupe;
        self
    }
}

/// A problem that was skipped over during import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportWarning {
    #[error("tier {tier}: skipped announce url {url:?}: {reason}")]
    SkippedAnnounceUrl {
        tier: usize,
        url: String,
        reason: url::ParseError,
    },

    #[error("primary announce url {url:?} does not parse: {reason}")]
    InvalidPrimaryAnnounce {
        url: String,
        reason: url::ParseError,
    },

    #[error("announce-list entry (tier {tier:?}) is a {found}")]
    MalformedAnnounceList {
        tier: Option<usize>,
        found: &'static str,
    },
}

/// Result of a successful import.
#[derive(Debug, Clone)]
pub struct Imported {
    pub torrent: Torrent,
    pub warnings: Vec<ImportWarning>,
}

/// Validates a decoded metainfo dictionary and turns it into a [`Torrent`].
///
/// # Examples
///
/// ```
/// use tmeta::metainfo::{ImportOptions, Importer};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = b"d8:announce23:http://tracker.test/ann4:infod6:lengthi5e\
/// 4:name5:a.txt12:piece lengthi16384e6:pieces20:aaaaaaaaaaaaaaaaaaaaee";
///
/// let imported = Importer::new(ImportOptions::default()).import_bytes(data)?;
/// assert!(imported.warnings.is_empty());
/// assert_eq!(imported.torrent.info().total_length(), 5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Importer {
    options: ImportOptions,
}

impl Importer {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn import_bytes(&self, data: &[u8]) -> Result<Imported, MetainfoError> {
        self.import(&decode(data)?)
    }

    pub fn import(&self, value: &Value) -> Result<Imported, MetainfoError> {
        let root = value.as_dict().ok_or(MetainfoError::TypeMismatch {
            field: "root",
            expected: "dictionary",
            found: value.kind(),
        })?;

        let announce_list = root.get(b"announce-list".as_slice());
        let announce = match root.get(b"announce".as_slice()) {
            Some(v) => Some(normalize(&text(v, "announce")?, &self.options)),
            None if announce_list.is_some() => None,
            None => return Err(MetainfoError::MissingAnnounce),
        };

        let reconciled = reconcile(announce.as_deref(), announce_list, &self.options);

        let comment = optional_text(root, "comment")?;
        let created_by = optional_text(root, "created by")?;
        let encoding = optional_text(root, "encoding")?;
        let creation_date = match root.get(b"creation date".as_slice()) {
            Some(v) => Some(integer(v, "creation date")?),
            None => None,
        };

        let info_value = root
            .get(b"info".as_slice())
            .ok_or(MetainfoError::MissingField("info"))?;
        let info_hash = InfoHash::of_info_value(info_value)?;
        let info = parse_info(info_value)?;

        debug!(
            %info_hash,
            files = info.files.len(),
            pieces = info.pieces.len(),
            trackers = reconciled.urls.len(),
            warnings = reconciled.warnings.len(),
            "imported torrent"
        );

        Ok(Imported {
            torrent: Torrent {
                announce: announce.and_then(non_empty),
                announce_urls: reconciled.urls,
                comment,
                created_by,
                creation_date,
                encoding,
                info,
                info_hash,
            },
            warnings: reconciled.warnings,
        })
    }
}

fn parse_info(value: &Value) -> Result<Info, MetainfoError> {
    let info = dict(value, "info")?;

    let piece_length = integer(required(info, "piece length")?, "piece length")?;
    if piece_length <= 0 {
        return Err(MetainfoError::InvalidPieceLength(piece_length));
    }

    let pieces_bytes = bytes(required(info, "pieces")?, "pieces")?;
    if pieces_bytes.len() % DIGEST_LEN != 0 {
        return Err(MetainfoError::InvalidPiecesLength(pieces_bytes.len()));
    }
    let pieces = pieces_bytes
        .chunks_exact(DIGEST_LEN)
        .map(|chunk| {
            let mut arr = [0u8; DIGEST_LEN];
            arr.copy_from_slice(chunk);
            PieceHash::from_array(arr)
        })
        .collect();

    let name = optional_text(info, "name")?.ok_or(MetainfoError::MissingField("name"))?;

    let (files, multi_file) = match info.get(b"files".as_slice()) {
        Some(files) => {
            let entries = files.as_list().ok_or(MetainfoError::TypeMismatch {
                field: "files",
                expected: "list",
                found: files.kind(),
            })?;
            let files = entries
                .iter()
                .map(|entry| parse_file_entry(entry, &name))
                .collect::<Result<Vec<_>, _>>()?;
            (files, true)
        }
        None => {
            let length = length(required(info, "length")?)?;
            (vec![FileEntry::new(name.clone(), length)], false)
        }
    };

    Info::new(piece_length as u64, files, pieces, Some(name), multi_file)
        .ok_or(MetainfoError::InvalidField("length"))
}

/// Reads one `files` entry. The path is prefixed with the torrent name so the
/// exporter's first-segment stripping gives back the original segments.
fn parse_file_entry(value: &Value, name: &str) -> Result<FileEntry, MetainfoError> {
    let entry = dict(value, "files")?;
    let length = length(required(entry, "length")?)?;

    let path_value = required(entry, "path")?;
    let segments = path_value.as_list().ok_or(MetainfoError::TypeMismatch {
        field: "path",
        expected: "list",
        found: path_value.kind(),
    })?;
    if segments.is_empty() {
        return Err(MetainfoError::InvalidField("path"));
    }

    let mut path: Vec<String> = Vec::with_capacity(segments.len() + 1);
    path.push(name.to_string());
    for segment in segments {
        path.push(text(segment, "path")?);
    }

    Ok(FileEntry::new(path.join("/"), length))
}

fn required<'a>(dict: &'a Dict, key: &'static str) -> Result<&'a Value, MetainfoError> {
    dict.get(key.as_bytes())
        .ok_or(MetainfoError::MissingField(key))
}

fn dict<'a>(value: &'a Value, field: &'static str) -> Result<&'a Dict, MetainfoError> {
    value.as_dict().ok_or(MetainfoError::TypeMismatch {
        field,
        expected: "dictionary",
        found: value.kind(),
    })
}

fn bytes<'a>(value: &'a Value, field: &'static str) -> Result<&'a [u8], MetainfoError> {
    match value {
        Value::Bytes(b) => Ok(b.as_ref()),
        other => Err(MetainfoError::TypeMismatch {
            field,
            expected: "byte string",
            found: other.kind(),
        }),
    }
}

fn text(value: &Value, field: &'static str) -> Result<String, MetainfoError> {
    bytes(value, field).map(|b| String::from_utf8_lossy(b).into_owned())
}

fn integer(value: &Value, field: &'static str) -> Result<i64, MetainfoError> {
    match value {
        Value::Integer(i) => Ok(*i),
        other => Err(MetainfoError::TypeMismatch {
            field,
            expected: "integer",
            found: other.kind(),
        }),
    }
}

fn length(value: &Value) -> Result<u64, MetainfoError> {
    u64::try_from(integer(value, "length")?).map_err(|_| MetainfoError::InvalidField("length"))
}

/// A text field where an empty string counts as absent.
fn optional_text(dict: &Dict, key: &'static str) -> Result<Option<String>, MetainfoError> {
    match dict.get(key.as_bytes()) {
        Some(v) => Ok(non_empty(text(v, key)?)),
        None => Ok(None),
    }
}
