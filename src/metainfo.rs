//! Torrent metainfo handling ([BEP-3], [BEP-12]).
//!
//! This module turns decoded `.torrent` dictionaries into validated
//! [`Torrent`] values, hashes content into pieces, and writes torrents back
//! out in canonical form.
//!
//! # Overview
//!
//! - [`Importer`] validates a decoded dictionary, reconciles `announce-list`
//!   tiers with the primary tracker and computes the info hash.
//! - [`PieceHasher`] splits an ordered list of files into fixed-size windows
//!   and hashes each one on a bounded thread pool.
//! - [`TorrentBuilder`] collects publish-side fields and yields an immutable
//!   [`Torrent`] once the piece hashes match the file layout.
//! - [`export`] produces the canonical dictionary for re-encoding.
//!
//! # Examples
//!
//! ## Reading a torrent file
//!
//! ```no_run
//! use tmeta::metainfo::Torrent;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let torrent = Torrent::from_file("example.torrent")?;
//!
//! println!("Info hash: {}", torrent.info_hash());
//! println!("Pieces: {}", torrent.info().piece_count());
//! for file in torrent.info().files() {
//!     println!("  {} ({} bytes)", file.path, file.length);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Publishing
//!
//! ```
//! use std::io::Cursor;
//! use tmeta::metainfo::{ContentSource, PieceHasher, Torrent, TorrentBuilder};
//!
//! struct Memory;
//!
//! impl ContentSource for Memory {
//!     type Reader = Cursor<Vec<u8>>;
//!
//!     fn open(&self, _path: &str) -> std::io::Result<Self::Reader> {
//!         Ok(Cursor::new(vec![7u8; 100]))
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let torrent = TorrentBuilder::new()
//!     .announce("http://tracker.example.com/announce")
//!     .piece_length(64)
//!     .add_file("data.bin", 100)
//!     .hash_pieces(&PieceHasher::with_source(Memory))?
//!     .build()?;
//!
//! assert_eq!(torrent.info().pieces().len(), 2);
//!
//! let reparsed = Torrent::from_bytes(&torrent.to_bytes()?)?;
//! assert_eq!(reparsed.info_hash(), torrent.info_hash());
//! # Ok(())
//! # }
//! ```
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html
//! [BEP-12]: http://bittorrent.org/beps/bep_0012.html

mod announce;
mod builder;
mod error;
mod export;
mod hasher;
mod import;
mod info_hash;
mod torrent;

pub use builder::TorrentBuilder;
pub use error::{BuildError, HashError, MetainfoError};
pub use export::{export, info_value};
pub use hasher::{ContentSource, FsSource, HashOptions, PieceHasher};
pub use import::{ImportOptions, ImportWarning, Imported, Importer};
pub use info_hash::{InfoHash, PieceHash};
pub use torrent::{FileEntry, Info, Torrent};

#[cfg(test)]
mod tests;
