use std::path::Path;

use url::Url;

use super::builder::TorrentBuilder;
use super::error::MetainfoError;
use super::export;
use super::import::Importer;
use super::info_hash::{InfoHash, PieceHash};
use crate::bencode::{encode, Value};

/// A validated torrent.
///
/// Instances come out of [`Importer`] or [`TorrentBuilder::build`] and are
/// immutable: the info hash always matches the info dictionary it was
/// computed from. To change anything, go through [`Torrent::into_builder`],
/// which drops the info hash so the rebuilt torrent gets a fresh one.
///
/// # Examples
///
/// ```no_run
/// use tmeta::metainfo::Torrent;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let torrent = Torrent::from_file("example.torrent")?;
///
/// println!("Info hash: {}", torrent.info_hash());
/// println!("Total size: {} bytes", torrent.info().total_length());
/// for url in torrent.announce_urls() {
///     println!("Tracker: {}", url);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Torrent {
    pub(crate) announce: Option<String>,
    pub(crate) announce_urls: Vec<Url>,
    pub(crate) comment: Option<String>,
    pub(crate) created_by: Option<String>,
    pub(crate) creation_date: Option<i64>,
    pub(crate) encoding: Option<String>,
    pub(crate) info: Info,
    pub(crate) info_hash: InfoHash,
}

/// The hashed part of a torrent: piece geometry, file layout and piece digests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub(crate) piece_length: u64,
    pub(crate) files: Vec<FileEntry>,
    pub(crate) total_length: u64,
    pub(crate) pieces: Vec<PieceHash>,
    pub(crate) save_as: Option<String>,
    pub(crate) multi_file: bool,
}

/// A file within a torrent.
///
/// Imported multi-file torrents store the path with the torrent name as its
/// first segment (`name/dir/file`), matching how the exporter strips it back
/// off. Paths use `/` between segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub length: u64,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, length: u64) -> Self {
        Self {
            path: path.into(),
            length,
        }
    }
}

impl Torrent {
    /// Decodes and imports a torrent with default [`ImportOptions`](super::ImportOptions).
    ///
    /// Skipped announce URLs are logged; use [`Importer`] directly to inspect them.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        Importer::default()
            .import_bytes(data)
            .map(|imported| imported.torrent)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MetainfoError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Builds the canonical dictionary for this torrent.
    pub fn to_value(&self) -> Value {
        export::export(self)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, MetainfoError> {
        Ok(encode(&self.to_value())?)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), MetainfoError> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Reopens this torrent for editing. The info hash is discarded.
    pub fn into_builder(self) -> TorrentBuilder {
        TorrentBuilder::from_torrent(self)
    }

    /// Primary tracker URL, whitespace-stripped.
    pub fn announce(&self) -> Option<&str> {
        self.announce.as_deref()
    }

    /// Every tracker URL across all tiers, in tier order.
    pub fn announce_urls(&self) -> &[Url] {
        &self.announce_urls
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn creation_date(&self) -> Option<i64> {
        self.creation_date
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn info_hash(&self) -> &InfoHash {
        &self.info_hash
    }
}

impl Info {
    /// Returns `None` when the file lengths do not sum to a `u64`.
    pub(crate) fn new(
        piece_length: u64,
        files: Vec<FileEntry>,
        pieces: Vec<PieceHash>,
        save_as: Option<String>,
        multi_file: bool,
    ) -> Option<Self> {
        let total_length = files
            .iter()
            .try_fold(0u64, |total, f| total.checked_add(f.length))?;
        Some(Self {
            piece_length,
            files,
            total_length,
            pieces,
            save_as,
            multi_file,
        })
    }

    pub fn piece_length(&self) -> u64 {
        self.piece_length
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Sum of all file lengths.
    pub fn total_length(&self) -> u64 {
        self.total_length
    }

    pub fn pieces(&self) -> &[PieceHash] {
        &self.pieces
    }

    /// Directory name for multi-file torrents.
    pub fn save_as(&self) -> Option<&str> {
        self.save_as.as_deref()
    }

    /// Whether the info dictionary uses the `files` list layout. Imported
    /// torrents keep the layout they were read with, even for a single entry.
    pub fn is_multi_file(&self) -> bool {
        self.multi_file
    }

    /// Number of pieces the content splits into: `ceil(total_length / piece_length)`.
    pub fn piece_count(&self) -> u64 {
        expected_piece_count(self.total_length, self.piece_length)
    }

    /// Byte length of piece `index`. Every piece is `piece_length` long
    /// except possibly the last one.
    pub fn piece_size(&self, index: u64) -> Option<u64> {
        if index >= self.piece_count() {
            return None;
        }
        let start = index * self.piece_length;
        Some((self.total_length - start).min(self.piece_length))
    }
}

pub(crate) fn expected_piece_count(total_length: u64, piece_length: u64) -> u64 {
    if piece_length == 0 {
        return 0;
    }
    total_length.div_ceil(piece_length)
}
