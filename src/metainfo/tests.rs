use std::collections::HashMap;
use std::io::{self, Cursor};
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use proptest::prelude::*;
use tempfile::TempDir;

use super::*;
use crate::bencode::{decode, encode, Dict, Value};

struct MemorySource {
    files: HashMap<String, Vec<u8>>,
    opens: AtomicUsize,
}

impl MemorySource {
    fn new(files: &[(&str, Vec<u8>)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(p, d)| (p.to_string(), d.clone()))
                .collect(),
            opens: AtomicUsize::new(0),
        }
    }
}

impl ContentSource for &MemorySource {
    type Reader = Cursor<Vec<u8>>;

    fn open(&self, path: &str) -> io::Result<Self::Reader> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(path)
            .cloned()
            .map(Cursor::new)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }
}

fn dict(entries: Vec<(&'static str, Value)>) -> Value {
    Value::Dict(
        entries
            .into_iter()
            .map(|(k, v)| (Bytes::from_static(k.as_bytes()), v))
            .collect::<Dict>(),
    )
}

fn single_file_info(pieces: usize) -> Value {
    dict(vec![
        ("length", Value::Integer(40)),
        ("name", Value::string("a.txt")),
        ("piece length", Value::Integer(32)),
        ("pieces", Value::from(vec![0xabu8; pieces * 20])),
    ])
}

fn torrent_value(extra: Vec<(&'static str, Value)>) -> Value {
    let mut entries = vec![("info", single_file_info(2))];
    entries.extend(extra);
    dict(entries)
}

fn tiers(tiers: &[&[&str]]) -> Value {
    Value::List(
        tiers
            .iter()
            .map(|tier| Value::List(tier.iter().map(|u| Value::string(u)).collect()))
            .collect(),
    )
}

fn urls(torrent: &Torrent) -> Vec<&str> {
    torrent.announce_urls().iter().map(|u| u.as_str()).collect()
}

fn import(value: &Value) -> Result<Imported, MetainfoError> {
    Importer::default().import(value)
}

#[test]
fn test_import_requires_announce_or_list() {
    let value = torrent_value(vec![]);
    assert!(matches!(import(&value), Err(MetainfoError::MissingAnnounce)));

    let value = torrent_value(vec![("announce-list", tiers(&[&["http://a.test/ann"]]))]);
    let imported = import(&value).unwrap();
    assert_eq!(imported.torrent.announce(), None);
    assert_eq!(urls(&imported.torrent), vec!["http://a.test/ann"]);
}

#[test]
fn test_import_strips_spaces_from_announce() {
    let value = torrent_value(vec![("announce", Value::string("http://a.test/ a nn"))]);
    let torrent = import(&value).unwrap().torrent;
    assert_eq!(torrent.announce(), Some("http://a.test/ann"));

    let keep = Importer::new(ImportOptions::default().strip_whitespace(false));
    let torrent = keep.import(&value).unwrap().torrent;
    assert_eq!(torrent.announce(), Some("http://a.test/ a nn"));
}

#[test]
fn test_primary_appended_when_missing_from_tiers() {
    let value = torrent_value(vec![
        ("announce", Value::string("http://a.example/ann")),
        (
            "announce-list",
            tiers(&[&["http://b.example/ann"], &["http://c.example/ann"]]),
        ),
    ]);
    let torrent = import(&value).unwrap().torrent;

    assert_eq!(
        urls(&torrent),
        vec![
            "http://a.example/ann",
            "http://b.example/ann",
            "http://a.example/ann",
            "http://c.example/ann",
            "http://a.example/ann",
        ]
    );
}

#[test]
fn test_primary_not_repeated_once_seen() {
    let value = torrent_value(vec![
        ("announce", Value::string("http://a.example/ann")),
        (
            "announce-list",
            tiers(&[&["HTTP://A.EXAMPLE/ann"], &["http://b.example/ann"]]),
        ),
    ]);
    let torrent = import(&value).unwrap().torrent;

    assert_eq!(
        urls(&torrent),
        vec![
            "http://a.example/ann",
            "http://a.example/ann",
            "http://b.example/ann"
        ]
    );
}

#[test]
fn test_dedupe_primary_option() {
    let value = torrent_value(vec![
        ("announce", Value::string("http://a.example/ann")),
        (
            "announce-list",
            tiers(&[&["http://b.example/ann"], &["http://c.example/ann"]]),
        ),
    ]);
    let importer = Importer::new(ImportOptions::default().dedupe_primary(true));
    let torrent = importer.import(&value).unwrap().torrent;

    assert_eq!(
        urls(&torrent),
        vec![
            "http://a.example/ann",
            "http://b.example/ann",
            "http://c.example/ann"
        ]
    );
}

#[test]
fn test_announce_url_without_scheme_is_repaired() {
    let value = torrent_value(vec![("announce-list", tiers(&[&["tracker.example/ann"]]))]);
    let imported = import(&value).unwrap();

    assert!(imported.warnings.is_empty());
    assert_eq!(urls(&imported.torrent), vec!["http://tracker.example/ann"]);
}

#[test]
fn test_unparseable_announce_url_is_skipped_with_warning() {
    let value = torrent_value(vec![(
        "announce-list",
        tiers(&[&["http://[broken/ann", "http://ok.test/ann"]]),
    )]);
    let imported = import(&value).unwrap();

    assert_eq!(urls(&imported.torrent), vec!["http://ok.test/ann"]);
    assert_eq!(imported.warnings.len(), 1);
    assert!(matches!(
        &imported.warnings[0],
        ImportWarning::SkippedAnnounceUrl { tier: 0, url, .. } if url == "http://[broken/ann"
    ));
}

#[test]
fn test_announce_list_as_string_is_tolerated() {
    let value = torrent_value(vec![
        ("announce", Value::string("http://a.test/ann")),
        ("announce-list", Value::string("")),
    ]);
    let imported = import(&value).unwrap();

    assert_eq!(urls(&imported.torrent), vec!["http://a.test/ann"]);
    assert!(matches!(
        imported.warnings[0],
        ImportWarning::MalformedAnnounceList { tier: None, .. }
    ));
}

#[test]
fn test_import_optional_fields() {
    let value = torrent_value(vec![
        ("announce", Value::string("http://a.test/ann")),
        ("comment", Value::string("hello")),
        ("created by", Value::string("")),
        ("creation date", Value::Integer(1_700_000_000_000)),
        ("encoding", Value::string("UTF-8")),
    ]);
    let torrent = import(&value).unwrap().torrent;

    assert_eq!(torrent.comment(), Some("hello"));
    assert_eq!(torrent.created_by(), None);
    assert_eq!(torrent.creation_date(), Some(1_700_000_000_000));
    assert_eq!(torrent.encoding(), Some("UTF-8"));
}

#[test]
fn test_import_type_mismatch() {
    let value = torrent_value(vec![
        ("announce", Value::string("http://a.test/ann")),
        ("creation date", Value::string("yesterday")),
    ]);
    assert!(matches!(
        import(&value),
        Err(MetainfoError::TypeMismatch {
            field: "creation date",
            expected: "integer",
            found: "byte string",
        })
    ));
}

#[test]
fn test_import_missing_info_fields() {
    let announce = || ("announce", Value::string("http://a.test/ann"));

    let value = dict(vec![announce()]);
    assert!(matches!(
        import(&value),
        Err(MetainfoError::MissingField("info"))
    ));

    let value = dict(vec![
        announce(),
        ("info", dict(vec![("pieces", Value::from(vec![0u8; 20]))])),
    ]);
    assert!(matches!(
        import(&value),
        Err(MetainfoError::MissingField("piece length"))
    ));

    let value = dict(vec![
        announce(),
        ("info", dict(vec![("piece length", Value::Integer(16))])),
    ]);
    assert!(matches!(
        import(&value),
        Err(MetainfoError::MissingField("pieces"))
    ));
}

#[test]
fn test_import_rejects_partial_piece_hash() {
    let value = dict(vec![
        ("announce", Value::string("http://a.test/ann")),
        (
            "info",
            dict(vec![
                ("length", Value::Integer(10)),
                ("name", Value::string("x")),
                ("piece length", Value::Integer(16)),
                ("pieces", Value::from(vec![0u8; 37])),
            ]),
        ),
    ]);
    assert!(matches!(
        import(&value),
        Err(MetainfoError::InvalidPiecesLength(37))
    ));
}

#[test]
fn test_import_rejects_non_positive_piece_length() {
    let value = dict(vec![
        ("announce", Value::string("http://a.test/ann")),
        (
            "info",
            dict(vec![
                ("length", Value::Integer(10)),
                ("name", Value::string("x")),
                ("piece length", Value::Integer(0)),
                ("pieces", Value::from(vec![0u8; 20])),
            ]),
        ),
    ]);
    assert!(matches!(
        import(&value),
        Err(MetainfoError::InvalidPieceLength(0))
    ));
}

#[test]
fn test_import_bytes_rejects_garbage() {
    assert!(matches!(
        Importer::default().import_bytes(b"d8:announce"),
        Err(MetainfoError::Bencode(_))
    ));
}

#[test]
fn test_import_single_file() {
    let value = torrent_value(vec![("announce", Value::string("http://a.test/ann"))]);
    let torrent = import(&value).unwrap().torrent;
    let info = torrent.info();

    assert_eq!(info.files(), &[FileEntry::new("a.txt", 40)]);
    assert_eq!(info.total_length(), 40);
    assert_eq!(info.piece_length(), 32);
    assert_eq!(info.pieces().len(), 2);
    assert_eq!(info.pieces()[0].to_hex(), "ab".repeat(20));
    assert_eq!(info.pieces()[0].to_url_encoded(), "%AB".repeat(20));
    assert_eq!(info.piece_size(1), Some(8));
    assert_eq!(info.piece_size(2), None);
}

fn multi_file_value() -> Value {
    let file = |len: i64, path: &[&str]| {
        dict(vec![
            ("length", Value::Integer(len)),
            (
                "path",
                Value::List(path.iter().map(|s| Value::string(s)).collect()),
            ),
        ])
    };
    dict(vec![
        ("announce", Value::string("http://a.test/ann")),
        (
            "info",
            dict(vec![
                (
                    "files",
                    Value::List(vec![file(100, &["disc1", "a.bin"]), file(50, &["b.bin"])]),
                ),
                ("name", Value::string("album")),
                ("piece length", Value::Integer(120)),
                ("pieces", Value::from(vec![1u8; 40])),
            ]),
        ),
    ])
}

#[test]
fn test_import_multi_file() {
    let torrent = import(&multi_file_value()).unwrap().torrent;
    let info = torrent.info();

    assert!(info.is_multi_file());
    assert_eq!(info.save_as(), Some("album"));
    assert_eq!(
        info.files(),
        &[
            FileEntry::new("album/disc1/a.bin", 100),
            FileEntry::new("album/b.bin", 50),
        ]
    );
    assert_eq!(info.total_length(), 150);
}

#[test]
fn test_imported_info_hash_matches_raw_info() {
    let value = multi_file_value();
    let torrent = import(&value).unwrap().torrent;
    let raw = encode(value.get(b"info").unwrap()).unwrap();

    let expected = InfoHash::of_info_value(&decode(&raw).unwrap()).unwrap();
    assert_eq!(torrent.info_hash(), &expected);
    assert_eq!(torrent.info_hash().to_hex().len(), 40);
}

#[test]
fn test_export_reproduces_info_hash() {
    for value in [
        multi_file_value(),
        torrent_value(vec![("announce", Value::string("http://a.test/ann"))]),
    ] {
        let torrent = import(&value).unwrap().torrent;
        let exported = export(&torrent);
        let rehashed = InfoHash::of_info_value(exported.get(b"info").unwrap()).unwrap();
        assert_eq!(&rehashed, torrent.info_hash());
    }
}

#[test]
fn test_export_multi_file_layout() {
    let torrent = import(&multi_file_value()).unwrap().torrent;
    let exported = export(&torrent);
    let info = exported.get(b"info").unwrap();

    assert_eq!(info.get(b"name").and_then(Value::as_str), Some("album"));
    let files = info.get(b"files").and_then(Value::as_list).unwrap();
    let paths: Vec<Vec<&str>> = files
        .iter()
        .map(|f| {
            f.get(b"path")
                .and_then(Value::as_list)
                .unwrap()
                .iter()
                .filter_map(Value::as_str)
                .collect()
        })
        .collect();
    assert_eq!(paths, vec![vec!["disc1", "a.bin"], vec!["b.bin"]]);
}

#[test]
fn test_export_key_order_and_optional_fields() {
    let torrent = TorrentBuilder::new()
        .announce("http://a.test/ann")
        .comment("c")
        .created_by("me")
        .creation_date(5)
        .encoding("UTF-8")
        .piece_length(16)
        .add_file("dir/x.bin", 0)
        .build()
        .unwrap();

    let bytes = torrent.to_bytes().unwrap();
    let expected: &[u8] = b"d8:announce17:http://a.test/ann7:comment1:c10:created by2:me\
13:creation datei5e4:infod6:lengthi0e4:name5:x.bin12:piece lengthi16e6:pieces0:ee";
    assert_eq!(bytes, expected);
}

#[test]
fn test_export_omits_empty_optional_fields() {
    let torrent = TorrentBuilder::new()
        .created_by("")
        .piece_length(16)
        .add_file("x", 0)
        .build()
        .unwrap();
    let exported = torrent.to_value();
    let keys: Vec<&[u8]> = exported.as_dict().unwrap().keys().map(|k| k.as_ref()).collect();
    assert_eq!(keys, vec![b"info".as_slice()]);
}

#[test]
fn test_export_multi_file_without_save_as_uses_fallback_name() {
    let torrent = TorrentBuilder::new()
        .piece_length(16)
        .add_file("root/a", 0)
        .add_file("root/b", 0)
        .build()
        .unwrap();
    let info = torrent.to_value();
    let name = info.get(b"info").and_then(|i| i.get(b"name"));
    assert_eq!(name.and_then(Value::as_str), Some("noDirSpec"));
}

fn info_with_files(name: Option<&str>, files: &[(i64, &[&str])], pieces: usize) -> Value {
    let files = files
        .iter()
        .map(|(len, path)| {
            dict(vec![
                ("length", Value::Integer(*len)),
                (
                    "path",
                    Value::List(path.iter().map(|s| Value::string(s)).collect()),
                ),
            ])
        })
        .collect();
    let mut info = vec![
        ("files", Value::List(files)),
        ("piece length", Value::Integer(16)),
        ("pieces", Value::from(vec![7u8; pieces * 20])),
    ];
    info.extend(name.map(|n| ("name", Value::string(n))));
    dict(vec![
        ("announce", Value::string("http://a.test/ann")),
        ("info", dict(info)),
    ])
}

#[test]
fn test_single_entry_file_list_keeps_layout() {
    let value = info_with_files(Some("album"), &[(10, &["track.flac"][..])], 1);
    let torrent = import(&value).unwrap().torrent;

    assert!(torrent.info().is_multi_file());
    assert_eq!(torrent.info().files(), &[FileEntry::new("album/track.flac", 10)]);

    let exported = torrent.to_value();
    let info = exported.get(b"info").unwrap();
    assert!(info.get(b"length").is_none());
    assert_eq!(info.get(b"name").and_then(Value::as_str), Some("album"));
    assert_eq!(
        &InfoHash::of_info_value(info).unwrap(),
        torrent.info_hash()
    );

    let rebuilt = torrent.clone().into_builder().comment("c").build().unwrap();
    assert_eq!(rebuilt.info_hash(), torrent.info_hash());
}

#[test]
fn test_import_multi_file_requires_name() {
    let value = info_with_files(None, &[(1, &["dir", "a"][..]), (1, &["dir", "b"][..])], 1);
    assert!(matches!(
        import(&value),
        Err(MetainfoError::MissingField("name"))
    ));
}

#[test]
fn test_import_rejects_overflowing_total_length() {
    let big: (i64, &[&str]) = (i64::MAX, &["f"]);
    let value = info_with_files(Some("big"), &[big, big, big], 0);
    assert!(matches!(
        import(&value),
        Err(MetainfoError::InvalidField("length"))
    ));
}

#[test]
fn test_builder_rejects_unencodable_lengths() {
    assert!(matches!(
        TorrentBuilder::new().piece_length(u64::MAX).add_file("a", 1).build(),
        Err(BuildError::InvalidPieceLength)
    ));
    assert!(matches!(
        TorrentBuilder::new().add_file("a", u64::MAX).build(),
        Err(BuildError::FileTooLarge { length: u64::MAX, .. })
    ));

    let max = i64::MAX as u64;
    assert!(matches!(
        TorrentBuilder::new()
            .add_file("a", max)
            .add_file("b", max)
            .add_file("c", 2)
            .build(),
        Err(BuildError::TotalLengthOverflow)
    ));
}

#[test]
fn test_builder_rejects_inconsistent_state() {
    assert!(matches!(
        TorrentBuilder::new().piece_length(0).add_file("a", 1).build(),
        Err(BuildError::InvalidPieceLength)
    ));
    assert!(matches!(TorrentBuilder::new().build(), Err(BuildError::NoFiles)));
    assert!(matches!(
        TorrentBuilder::new().piece_length(16).add_file("a", 40).build(),
        Err(BuildError::PieceCountMismatch {
            expected: 3,
            actual: 0
        })
    ));
}

#[test]
fn test_adding_file_invalidates_pieces() {
    let source = MemorySource::new(&[("a", vec![1u8; 40]), ("b", vec![2u8; 8])]);
    let hasher = PieceHasher::with_source(&source);

    let builder = TorrentBuilder::new()
        .piece_length(16)
        .add_file("a", 40)
        .hash_pieces(&hasher)
        .unwrap()
        .add_file("b", 8);
    assert!(matches!(
        builder.clone().build(),
        Err(BuildError::PieceCountMismatch { .. })
    ));

    let torrent = builder.hash_pieces(&hasher).unwrap().build().unwrap();
    assert_eq!(torrent.info().pieces().len(), 3);
}

#[test]
fn test_into_builder_recomputes_info_hash() {
    let source = MemorySource::new(&[("a", vec![1u8; 40])]);
    let hasher = PieceHasher::with_source(&source);
    let torrent = TorrentBuilder::new()
        .piece_length(16)
        .add_file("a", 40)
        .hash_pieces(&hasher)
        .unwrap()
        .build()
        .unwrap();
    let original = *torrent.info_hash();

    let renamed = torrent.clone().into_builder().comment("new").build().unwrap();
    assert_eq!(renamed.info_hash(), &original);

    let rehashed = torrent
        .into_builder()
        .piece_length(32)
        .hash_pieces(&hasher)
        .unwrap()
        .build()
        .unwrap();
    assert_ne!(rehashed.info_hash(), &original);
    assert_eq!(rehashed.info().pieces().len(), 2);
}

#[test]
fn test_builder_announce_populates_url_list() {
    let torrent = TorrentBuilder::new()
        .announce("http://a.test/ann")
        .piece_length(16)
        .add_file("x", 0)
        .build()
        .unwrap();
    assert_eq!(urls(&torrent), vec!["http://a.test/ann"]);
}

#[test]
fn test_hash_spans_file_boundaries() {
    let a: Vec<u8> = (0..100).map(|i| i as u8).collect();
    let b: Vec<u8> = (100..150).map(|i| i as u8).collect();
    let source = MemorySource::new(&[("a", a.clone()), ("b", b.clone())]);

    let files = [FileEntry::new("a", 100), FileEntry::new("b", 50)];
    let pieces = PieceHasher::with_source(&source)
        .hash_files(&files, 120)
        .unwrap();

    let stream: Vec<u8> = a.into_iter().chain(b).collect();
    assert_eq!(
        pieces,
        vec![
            PieceHash::digest(&stream[..120]),
            PieceHash::digest(&stream[120..])
        ]
    );
}

#[test]
fn test_hash_one_mib_of_zeros() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("x.bin");
    std::fs::write(&path, vec![0u8; 1_048_576]).unwrap();

    let files = [FileEntry::new("x.bin", 1_048_576)];
    let pieces = PieceHasher::with_source(FsSource::rooted(temp.path()))
        .hash_files(&files, 262_144)
        .unwrap();

    let zeros = PieceHash::digest(&vec![0u8; 262_144]);
    assert_eq!(pieces, vec![zeros; 4]);
}

#[test]
fn test_hash_order_independent_of_worker_count() {
    let data: Vec<u8> = (0..10_000u32).map(|i| (i * 7 % 251) as u8).collect();
    let source = MemorySource::new(&[("d", data)]);
    let files = [FileEntry::new("d", 10_000)];

    let serial = PieceHasher::with_source(&source)
        .options(HashOptions::default().workers(1))
        .hash_files(&files, 97)
        .unwrap();
    let parallel = PieceHasher::with_source(&source)
        .options(HashOptions::default().workers(8))
        .hash_files(&files, 97)
        .unwrap();

    assert_eq!(serial.len(), 104);
    assert_eq!(serial, parallel);
}

#[test]
fn test_hash_missing_file_is_an_error() {
    let source = MemorySource::new(&[("a", vec![1u8; 10])]);
    let files = [FileEntry::new("a", 10), FileEntry::new("gone", 10)];
    let err = PieceHasher::with_source(&source)
        .hash_files(&files, 4)
        .unwrap_err();

    match err {
        HashError::Open { path, source } => {
            assert_eq!(path, "gone");
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_hash_short_file_is_an_error() {
    let source = MemorySource::new(&[("a", vec![1u8; 10])]);
    let files = [FileEntry::new("a", 12)];
    assert!(matches!(
        PieceHasher::with_source(&source).hash_files(&files, 4),
        Err(HashError::ShortRead {
            expected: 12,
            actual: 10,
            ..
        })
    ));
}

#[test]
fn test_hash_ignores_bytes_past_declared_length() {
    let source = MemorySource::new(&[("a", vec![1u8; 10])]);
    let files = [FileEntry::new("a", 8)];
    let pieces = PieceHasher::with_source(&source)
        .hash_files(&files, 4)
        .unwrap();
    assert_eq!(pieces.len(), 2);
}

#[test]
fn test_zero_piece_length_rejected_before_io() {
    let source = MemorySource::new(&[("a", vec![1u8; 10])]);
    let files = [FileEntry::new("a", 10)];
    assert!(matches!(
        PieceHasher::with_source(&source).hash_files(&files, 0),
        Err(HashError::InvalidPieceLength(0))
    ));
    assert_eq!(source.opens.load(Ordering::SeqCst), 0);
}

#[test]
fn test_info_hash_forms() {
    let hash = InfoHash::from_hex("0123456789abcdef0123456789abcdef01234567").unwrap();
    assert_eq!(hash.to_hex(), "0123456789abcdef0123456789abcdef01234567");
    assert!(hash.to_url_encoded().starts_with("%01%23Eg%89"));
    assert!(InfoHash::from_hex("0123").is_err());
    assert!(InfoHash::from_hex("zz23456789abcdef0123456789abcdef01234567").is_err());
}

#[test]
fn test_torrent_file_roundtrip() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("pack");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(dir.join("a.bin"), vec![3u8; 70]).unwrap();
    std::fs::write(dir.join("b.bin"), vec![4u8; 30]).unwrap();

    let torrent = TorrentBuilder::new()
        .announce("http://a.test/ann")
        .save_as("pack")
        .piece_length(64)
        .add_file("pack/a.bin", 70)
        .add_file("pack/b.bin", 30)
        .hash_pieces(&PieceHasher::with_source(FsSource::rooted(temp.path())))
        .unwrap()
        .build()
        .unwrap();

    let out = temp.path().join("pack.torrent");
    torrent.write_to(&out).unwrap();
    let reread = Torrent::from_file(&out).unwrap();

    assert_eq!(reread.info_hash(), torrent.info_hash());
    assert_eq!(reread.info(), torrent.info());
}

proptest! {
    #[test]
    fn prop_piece_count_and_last_size(len in 0usize..2048, piece_length in 1u64..300) {
        let data = vec![9u8; len];
        let pieces = PieceHasher::new()
            .options(HashOptions::default().workers(2))
            .hash_reader(Cursor::new(data.clone()), piece_length)
            .unwrap();

        let expected = (len as u64).div_ceil(piece_length);
        prop_assert_eq!(pieces.len() as u64, expected);

        if let Some(last) = pieces.last() {
            let rem = len as u64 % piece_length;
            let last_len = if rem == 0 { piece_length } else { rem };
            prop_assert_eq!(*last, PieceHash::digest(&data[len - last_len as usize..]));
        }
    }
}
