use thiserror::Error;

use crate::bencode::BencodeError;

/// Errors that abort importing or exporting a torrent.
#[derive(Debug, Error)]
pub enum MetainfoError {
    /// The torrent file contains invalid bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    /// Neither `announce` nor `announce-list` is present.
    #[error("torrent has neither announce nor announce-list")]
    MissingAnnounce,

    /// A required field is missing.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field holds a different bencode type than expected.
    #[error("field {field} should be a {expected}, found a {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A field has the right type but an unusable value.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    /// The `pieces` byte string is not a whole number of digests.
    #[error("pieces length {0} is not a multiple of 20")]
    InvalidPiecesLength(usize),

    /// `piece length` is zero or negative.
    #[error("piece length must be positive, got {0}")]
    InvalidPieceLength(i64),

    /// The info hash has an invalid length or encoding.
    #[error("invalid info hash")]
    InvalidInfoHash,

    /// An I/O error occurred while reading or writing the torrent file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while hashing file content into pieces.
#[derive(Debug, Error)]
pub enum HashError {
    /// `piece length` is zero or does not fit in memory.
    #[error("piece length must be positive and addressable, got {0}")]
    InvalidPieceLength(u64),

    /// A content file could not be opened.
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading a content file failed part way through.
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A content file holds fewer bytes than its declared length.
    #[error("{path} ended after {actual} of {expected} bytes")]
    ShortRead {
        path: String,
        expected: u64,
        actual: u64,
    },

    /// A hashing worker exited before returning its results.
    #[error("hashing worker stopped unexpectedly")]
    Worker,
}

/// Errors raised when a [`TorrentBuilder`](super::TorrentBuilder) cannot
/// produce a consistent torrent.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The piece length is zero or too large to encode.
    #[error("piece length must be positive and fit in a bencode integer")]
    InvalidPieceLength,

    /// No files were added.
    #[error("torrent has no files")]
    NoFiles,

    /// A file length does not fit in a bencode integer.
    #[error("{path} is {length} bytes, too large to encode")]
    FileTooLarge { path: String, length: u64 },

    /// The file lengths do not sum to a `u64`.
    #[error("total length of all files overflows")]
    TotalLengthOverflow,

    /// The piece hashes do not cover the content exactly.
    #[error("expected {expected} piece hashes, have {actual}")]
    PieceCountMismatch { expected: u64, actual: usize },

    /// The info dictionary could not be encoded for hashing.
    #[error("encoding info dictionary: {0}")]
    Encode(#[from] BencodeError),
}
