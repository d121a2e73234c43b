//! tmeta - Torrent metainfo processing
//!
//! Reads `.torrent` files into validated, strongly typed values, hashes
//! content into pieces for publishing, and writes torrents back out in
//! canonical, deterministically ordered form.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode encoding/decoding
//! - [`metainfo`] - Torrent import, piece hashing, building and export
//! - [`constants`] - Digest sizes and publishing defaults

pub mod bencode;
pub mod constants;
pub mod metainfo;

pub use bencode::{decode, encode, BencodeError, Value};
pub use metainfo::{
    BuildError, FileEntry, HashError, ImportOptions, ImportWarning, Imported, Importer, Info,
    InfoHash, MetainfoError, PieceHash, PieceHasher, Torrent, TorrentBuilder,
};
