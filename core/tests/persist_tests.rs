use checker_core::persist::{from_bytes, load_index, load_meta, save_index, save_meta, to_bytes, IndexPaths, INDEX_VERSION};
use checker_core::{CheckerError, IndexBuilder, StemmingTokenizer};
use tempfile::tempdir;

fn sample_index() -> checker_core::CorpusIndex {
    let mut builder = IndexBuilder::new(StemmingTokenizer::new());
    builder.add_doc("a.txt", "Rust is a systems programming language.").unwrap();
    builder.add_doc("b.txt", "Python is a scripting language with dynamic typing.").unwrap();
    builder.add_doc("c.txt", "").unwrap();
    builder.finalize()
}

#[test]
fn bytes_round_trip_is_exact() {
    let index = sample_index();
    let restored = from_bytes(&to_bytes(&index).unwrap()).unwrap();
    assert_eq!(restored, index);
    for (id, v) in index.docs() {
        for (t, w) in v {
            assert_eq!(restored.doc(id).unwrap()[t].to_bits(), w.to_bits());
        }
    }
}

#[test]
fn save_then_load_reproduces_index() {
    let dir = tempdir().unwrap();
    let paths = IndexPaths::new(dir.path());
    let index = sample_index();
    let meta = save_index(&paths, &index).unwrap();
    assert_eq!(meta.num_docs, 3);
    assert_eq!(meta.tokenizer, "stemming");
    assert_eq!(meta.version, INDEX_VERSION);

    let loaded = load_index(&paths).unwrap();
    assert_eq!(loaded, index);
    assert_eq!(load_meta(&paths).unwrap(), meta);
}

#[test]
fn missing_index_is_reported() {
    let dir = tempdir().unwrap();
    let paths = IndexPaths::new(dir.path().join("nowhere"));
    assert!(matches!(load_index(&paths), Err(CheckerError::NoIndex(_))));
}

#[test]
fn incompatible_version_is_rejected() {
    let dir = tempdir().unwrap();
    let paths = IndexPaths::new(dir.path());
    let mut meta = save_index(&paths, &sample_index()).unwrap();
    meta.version = INDEX_VERSION + 1;
    save_meta(&paths, &meta).unwrap();
    assert!(matches!(
        load_index(&paths),
        Err(CheckerError::IncompatibleIndex { found, expected }) if found == INDEX_VERSION + 1 && expected == INDEX_VERSION
    ));
}

#[test]
fn corrupt_payload_is_an_error() {
    let dir = tempdir().unwrap();
    let paths = IndexPaths::new(dir.path());
    save_index(&paths, &sample_index()).unwrap();
    std::fs::write(paths.index(), b"\xff\xff\xff\xff\xff\xff\xff\xff\xff").unwrap();
    assert!(matches!(load_index(&paths), Err(CheckerError::Encode(_))));
}
