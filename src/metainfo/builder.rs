//! Publish-side construction of torrents.
//!
//! The builder collects fields in any order, hashes the content once the
//! file list is final, and only then yields an immutable [`Torrent`].
//!
//! # Examples
//!
//! ```no_run
//! use tmeta::metainfo::{PieceHasher, TorrentBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let torrent = TorrentBuilder::new()
//!     .announce("http://tracker.example.com/announce")
//!     .piece_length_kib(256)
//!     .add_file_from_path("path/to/file.iso")?
//!     .comment("Created with tmeta")
//!     .creation_date_now()
//!     .hash_pieces(&PieceHasher::new())?
//!     .build()?;
//!
//! torrent.write_to("file.iso.torrent")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;
use url::Url;

use super::error::{BuildError, HashError, MetainfoError};
use super::export;
use super::hasher::{ContentSource, PieceHasher};
use super::info_hash::{InfoHash, PieceHash};
use super::torrent::{expected_piece_count, FileEntry, Info, Torrent};
use crate::constants::{CREATED_BY, DEFAULT_PIECE_LENGTH};

/// Builder for [`Torrent`].
///
/// Changing the file list or the piece length clears any piece hashes
/// already computed, since they no longer describe the content.
#[derive(Debug, Clone)]
pub struct TorrentBuilder {
    announce: Option<String>,
    announce_urls: Vec<Url>,
    comment: Option<String>,
    created_by: Option<String>,
    creation_date: Option<i64>,
    encoding: Option<String>,
    save_as: Option<String>,
    piece_length: u64,
    files: Vec<FileEntry>,
    pieces: Vec<PieceHash>,
    multi_file: bool,
}

impl Default for TorrentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TorrentBuilder {
    pub fn new() -> Self {
        Self {
            announce: None,
            announce_urls: Vec::new(),
            comment: None,
            created_by: Some(CREATED_BY.to_string()),
            creation_date: None,
            encoding: None,
            save_as: None,
            piece_length: DEFAULT_PIECE_LENGTH,
            files: Vec::new(),
            pieces: Vec::new(),
            multi_file: false,
        }
    }

    pub(crate) fn from_torrent(torrent: Torrent) -> Self {
        let Info {
            piece_length,
            files,
            pieces,
            save_as,
            multi_file,
            ..
        } = torrent.info;

        Self {
            announce: torrent.announce,
            announce_urls: torrent.announce_urls,
            comment: torrent.comment,
            created_by: torrent.created_by,
            creation_date: torrent.creation_date,
            encoding: torrent.encoding,
            save_as,
            piece_length,
            files,
            pieces,
            multi_file,
        }
    }

    /// Sets the primary tracker URL.
    pub fn announce(mut self, url: impl Into<String>) -> Self {
        self.announce = non_empty(url.into());
        self
    }

    /// Adds a tracker to the flattened announce URL list.
    pub fn add_announce_url(mut self, url: Url) -> Self {
        self.announce_urls.push(url);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = non_empty(comment.into());
        self
    }

    pub fn created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = non_empty(created_by.into());
        self
    }

    /// Sets the creation date in milliseconds since the Unix epoch.
    pub fn creation_date(mut self, millis: i64) -> Self {
        self.creation_date = Some(millis);
        self
    }

    pub fn creation_date_now(self) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default();
        self.creation_date(millis)
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = non_empty(encoding.into());
        self
    }

    /// Directory name for multi-file torrents.
    pub fn save_as(mut self, name: impl Into<String>) -> Self {
        self.save_as = non_empty(name.into());
        self
    }

    /// Sets the piece length in bytes.
    pub fn piece_length(mut self, length: u64) -> Self {
        if length != self.piece_length {
            self.pieces.clear();
        }
        self.piece_length = length;
        self
    }

    /// Sets the piece length in KiB.
    pub fn piece_length_kib(self, kib: u64) -> Self {
        self.piece_length(kib.saturating_mul(1024))
    }

    /// Adds a file with a known length.
    pub fn add_file(mut self, path: impl Into<String>, length: u64) -> Self {
        self.files.push(FileEntry::new(path, length));
        self.pieces.clear();
        self
    }

    /// Adds a file from disk, taking its length from the filesystem.
    ///
    /// The path is stored as given and is what the piece hasher opens later.
    pub fn add_file_from_path(self, path: impl AsRef<Path>) -> Result<Self, MetainfoError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(MetainfoError::InvalidField("not a regular file"));
        }
        let name = path
            .to_str()
            .ok_or(MetainfoError::InvalidField("non UTF-8 path"))?;
        Ok(self.add_file(name, metadata.len()))
    }

    /// Adds several files from disk, stopping at the first one that cannot be read.
    pub fn add_files_from_paths<I, P>(self, paths: I) -> Result<Self, MetainfoError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths
            .into_iter()
            .try_fold(self, |builder, path| builder.add_file_from_path(path))
    }

    /// Sets precomputed piece hashes.
    pub fn pieces(mut self, pieces: Vec<PieceHash>) -> Self {
        self.pieces = pieces;
        self
    }

    /// Hashes the current file list with `hasher` and stores the result.
    pub fn hash_pieces<S: ContentSource>(
        mut self,
        hasher: &PieceHasher<S>,
    ) -> Result<Self, HashError> {
        self.pieces = hasher.hash_files(&self.files, self.piece_length)?;
        Ok(self)
    }

    /// Validates the collected fields and computes the info hash.
    ///
    /// More than one file, or a torrent reopened from a `files` list layout,
    /// exports as a multi-file torrent.
    pub fn build(self) -> Result<Torrent, BuildError> {
        if self.piece_length == 0 || i64::try_from(self.piece_length).is_err() {
            return Err(BuildError::InvalidPieceLength);
        }
        if self.files.is_empty() {
            return Err(BuildError::NoFiles);
        }
        if let Some(file) = self.files.iter().find(|f| i64::try_from(f.length).is_err()) {
            return Err(BuildError::FileTooLarge {
                path: file.path.clone(),
                length: file.length,
            });
        }

        let multi_file = self.multi_file || self.files.len() > 1;
        let info = Info::new(
            self.piece_length,
            self.files,
            self.pieces,
            self.save_as,
            multi_file,
        )
        .ok_or(BuildError::TotalLengthOverflow)?;

        let expected = expected_piece_count(info.total_length, info.piece_length);
        if expected != info.pieces.len() as u64 {
            return Err(BuildError::PieceCountMismatch {
                expected,
                actual: info.pieces.len(),
            });
        }

        let info_hash = InfoHash::of_info_value(&export::info_value(&info))?;
        debug!(%info_hash, files = info.files.len(), pieces = info.pieces.len(), "built torrent");

        let mut announce_urls = self.announce_urls;
        if announce_urls.is_empty() {
            announce_urls.extend(self.announce.as_deref().and_then(|a| Url::parse(a).ok()));
        }

        Ok(Torrent {
            announce: self.announce,
            announce_urls,
            comment: self.comment,
            created_by: self.created_by,
            creation_date: self.creation_date,
            encoding: self.encoding,
            info,
            info_hash,
        })
    }
}

pub(crate) fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
