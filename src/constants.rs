//! Metainfo constants and defaults.

/// Length of a SHA-1 digest; every piece hash and v1 info hash has this size.
pub const DIGEST_LEN: usize = 20;

/// Scheme prefixed to announce URLs that lack a `://` separator.
pub const DEFAULT_ANNOUNCE_SCHEME: &str = "http";

/// Default piece length (256 KiB).
pub const DEFAULT_PIECE_LENGTH: u64 = 262_144;

/// Directory name written for multi-file torrents when no save-as name was given.
pub const FALLBACK_MULTI_FILE_NAME: &str = "noDirSpec";

/// Value written to `created by` when the publisher does not set one.
pub const CREATED_BY: &str = concat!("tmeta/", env!("CARGO_PKG_VERSION"));

/// Read buffer used when streaming file content into pieces.
pub const READ_BUFFER_SIZE: usize = 64 * 1024;
