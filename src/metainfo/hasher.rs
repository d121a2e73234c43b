//! Piece hashing over an ordered file list.
//!
//! The files are read one after another as a single stream and cut into
//! windows of exactly `piece_length` bytes; the final window may be shorter.
//! Reading stays on the calling thread, digests are computed by a bounded
//! pool of scoped worker threads, and results are put back in piece order.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::thread;

use crossbeam::channel::{self, Sender};
use tracing::{debug, trace};

use super::error::HashError;
use super::info_hash::PieceHash;
use super::torrent::FileEntry;
use crate::constants::READ_BUFFER_SIZE;

/// Opens the byte stream for one file of a torrent.
pub trait ContentSource {
    type Reader: Read;

    fn open(&self, path: &str) -> io::Result<Self::Reader>;
}

/// Reads files from the local filesystem, optionally relative to a root directory.
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    root: Option<PathBuf>,
}

impl FsSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

impl ContentSource for FsSource {
    type Reader = File;

    fn open(&self, path: &str) -> io::Result<File> {
        match &self.root {
            Some(root) => File::open(root.join(path)),
            None => File::open(path),
        }
    }
}

/// Tuning for [`PieceHasher`].
#[derive(Debug, Clone)]
pub struct HashOptions {
    /// Number of hashing threads. Also bounds the content windows held in memory.
    pub workers: usize,
}

impl Default for HashOptions {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
        }
    }
}

impl HashOptions {
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// Computes piece hashes for torrent content.
#[derive(Debug, Clone)]
pub struct PieceHasher<S = FsSource> {
    source: S,
    options: HashOptions,
}

impl PieceHasher<FsSource> {
    pub fn new() -> Self {
        Self::with_source(FsSource::new())
    }
}

impl Default for PieceHasher<FsSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ContentSource> PieceHasher<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            options: HashOptions::default(),
        }
    }

    pub fn options(mut self, options: HashOptions) -> Self {
        self.options = options;
        self
    }

    /// Hashes `files`, in order, as one contiguous stream.
    ///
    /// Each file must yield at least its declared length; extra bytes past it
    /// are ignored. A file that cannot be opened or read stops hashing and is
    /// reported with its path.
    pub fn hash_files(
        &self,
        files: &[FileEntry],
        piece_length: u64,
    ) -> Result<Vec<PieceHash>, HashError> {
        let window_len = window_len(piece_length)?;
        debug!(files = files.len(), piece_length, "hashing pieces");

        let pieces = self.run(window_len, |windows| {
            let mut buf = vec![0u8; READ_BUFFER_SIZE];
            for file in files {
                trace!(path = %file.path, length = file.length, "hashing file");
                let reader = self.source.open(&file.path).map_err(|source| HashError::Open {
                    path: file.path.clone(),
                    source,
                })?;
                let read = pump(reader.take(file.length), &mut buf, windows)
                    .map_err(|e| e.with_path(&file.path))?;
                if read < file.length {
                    return Err(HashError::ShortRead {
                        path: file.path.clone(),
                        expected: file.length,
                        actual: read,
                    });
                }
            }
            Ok(())
        })?;

        debug!(pieces = pieces.len(), "hashed pieces");
        Ok(pieces)
    }

    /// Hashes everything `reader` yields until end of stream.
    pub fn hash_reader<R: Read>(
        &self,
        reader: R,
        piece_length: u64,
    ) -> Result<Vec<PieceHash>, HashError> {
        let window_len = window_len(piece_length)?;
        self.run(window_len, |windows| {
            let mut buf = vec![0u8; READ_BUFFER_SIZE];
            pump(reader, &mut buf, windows)
                .map(|_| ())
                .map_err(|e| e.with_path("<reader>"))
        })
    }

    fn run<F>(&self, window_len: usize, feed: F) -> Result<Vec<PieceHash>, HashError>
    where
        F: FnOnce(&mut Windows) -> Result<(), HashError>,
    {
        let workers = self.options.workers.max(1);
        let (job_tx, job_rx) = channel::bounded::<(usize, Vec<u8>)>(workers);
        let (done_tx, done_rx) = channel::unbounded::<(usize, PieceHash)>();

        thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let done_tx = done_tx.clone();
                scope.spawn(move || {
                    for (index, window) in job_rx {
                        if done_tx.send((index, PieceHash::digest(&window))).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(job_rx);
            drop(done_tx);

            let mut windows = Windows::new(window_len, job_tx);
            let fed = feed(&mut windows).and_then(|()| windows.flush());
            // Dropping the last sender lets the workers drain and exit.
            let count = windows.next_index;
            drop(windows);

            let mut slots: Vec<Option<PieceHash>> = vec![None; count];
            for (index, hash) in done_rx {
                if let Some(slot) = slots.get_mut(index) {
                    *slot = Some(hash);
                }
            }

            fed?;
            slots
                .into_iter()
                .collect::<Option<Vec<_>>>()
                .ok_or(HashError::Worker)
        })
    }
}

fn window_len(piece_length: u64) -> Result<usize, HashError> {
    usize::try_from(piece_length)
        .ok()
        .filter(|&len| len > 0)
        .ok_or(HashError::InvalidPieceLength(piece_length))
}

enum PumpError {
    Read(io::Error),
    Closed,
}

impl PumpError {
    fn with_path(self, path: &str) -> HashError {
        match self {
            PumpError::Read(source) => HashError::Read {
                path: path.to_string(),
                source,
            },
            PumpError::Closed => HashError::Worker,
        }
    }
}

/// Copies `reader` into `windows` and returns the number of bytes read.
fn pump<R: Read>(mut reader: R, buf: &mut [u8], windows: &mut Windows) -> Result<u64, PumpError> {
    let mut total = 0u64;
    loop {
        let n = match reader.read(buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(PumpError::Read(e)),
        };
        windows.push(&buf[..n]).map_err(|_| PumpError::Closed)?;
        total += n as u64;
    }
}

/// Accumulates the concatenated stream into fixed-size windows and hands
/// each full window to the worker pool.
struct Windows {
    window_len: usize,
    current: Vec<u8>,
    next_index: usize,
    jobs: Sender<(usize, Vec<u8>)>,
}

impl Windows {
    fn new(window_len: usize, jobs: Sender<(usize, Vec<u8>)>) -> Self {
        Self {
            window_len,
            current: Vec::new(),
            next_index: 0,
            jobs,
        }
    }

    fn push(&mut self, mut data: &[u8]) -> Result<(), HashError> {
        while !data.is_empty() {
            let take = (self.window_len - self.current.len()).min(data.len());
            self.current.extend_from_slice(&data[..take]);
            data = &data[take..];
            if self.current.len() == self.window_len {
                self.emit()?;
            }
        }
        Ok(())
    }

    /// Emits the trailing short window, if any.
    fn flush(&mut self) -> Result<(), HashError> {
        if self.current.is_empty() {
            return Ok(());
        }
        self.emit()
    }

    fn emit(&mut self) -> Result<(), HashError> {
        let window = std::mem::take(&mut self.current);
        self.jobs
            .send((self.next_index, window))
            .map_err(|_| HashError::Worker)?;
        self.next_index += 1;
        Ok(())
    }
}
