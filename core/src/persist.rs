use crate::error::{CheckerError, Result};
use crate::index::CorpusIndex;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const INDEX_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: usize,
    pub vocabulary_size: usize,
    pub tokenizer: String,
    pub created_at: String,
    pub version: u32,
}

impl MetaFile {
    pub fn for_index(index: &CorpusIndex) -> Self {
        Self {
            num_docs: index.num_docs(),
            vocabulary_size: index.vocabulary_size(),
            tokenizer: index.tokenizer().to_string(),
            created_at: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| "".into()),
            version: INDEX_VERSION,
        }
    }
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn index(&self) -> PathBuf { self.root.join("index.bin") }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }

    pub fn exists(&self) -> bool { self.index().is_file() }
}

pub fn to_bytes(index: &CorpusIndex) -> Result<Vec<u8>> {
    Ok(bincode::serialize(index)?)
}

pub fn from_bytes(bytes: &[u8]) -> Result<CorpusIndex> {
    Ok(bincode::deserialize(bytes)?)
}

/// Write the index payload and its metadata under `paths.root`.
pub fn save_index(paths: &IndexPaths, index: &CorpusIndex) -> Result<MetaFile> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.index())?;
    let bytes = to_bytes(index)?;
    f.write_all(&bytes)?;

    let meta = MetaFile::for_index(index);
    save_meta(paths, &meta)?;
    tracing::info!(path = %paths.root.display(), bytes = bytes.len(), num_docs = meta.num_docs, "index saved");
    Ok(meta)
}

pub fn load_index(paths: &IndexPaths) -> Result<CorpusIndex> {
    if !paths.exists() {
        return Err(CheckerError::NoIndex(paths.root.clone()));
    }
    let meta = load_meta(paths)?;
    if meta.version != INDEX_VERSION {
        return Err(CheckerError::IncompatibleIndex { found: meta.version, expected: INDEX_VERSION });
    }
    let mut f = File::open(paths.index())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let index = from_bytes(&buf)?;
    tracing::debug!(num_docs = index.num_docs(), created_at = %meta.created_at, "index loaded");
    Ok(index)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = match File::open(paths.meta()) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CheckerError::NoIndex(paths.root.clone()))
        }
        Err(e) => return Err(e.into()),
    };
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}
