use crate::persist::codec::{self, ExportFormat};
use crate::persist::record_store::RecordStore;
use crate::record::Record;
use anyhow::Context;
use crc32fast::Hasher;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const SNAPSHOT_FILE: &str = "directory.json";
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("checksum mismatch in {0:?}")]
    Checksum(PathBuf),
    #[error("unsupported snapshot version {0}")]
    Version(u32),
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    table_size: usize,
    checksum: u32,
    records: Vec<Record>,
}

fn checksum(records: &[Record]) -> anyhow::Result<u32> {
    let mut hasher = Hasher::new();
    hasher.update(&serde_json::to_vec(records)?);
    Ok(hasher.finalize())
}

/// Stores a checksummed JSON snapshot under a data directory.
pub struct FsRecordStore {
    base: PathBuf,
}

impl FsRecordStore {
    pub fn new<P: AsRef<Path>>(base: P) -> anyhow::Result<Self> {
        let base = base.as_ref();
        fs::create_dir_all(base).with_context(|| format!("creating data dir {:?}", base))?;
        Ok(Self {
            base: base.to_path_buf(),
        })
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.base.join(SNAPSHOT_FILE)
    }
}

impl RecordStore for FsRecordStore {
    fn load(&self) -> anyhow::Result<Vec<Record>> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))?;
        let snap: Snapshot =
            serde_json::from_str(&raw).with_context(|| format!("parsing {:?}", path))?;
        if snap.version != SNAPSHOT_VERSION {
            return Err(StoreError::Version(snap.version).into());
        }
        if checksum(&snap.records)? != snap.checksum {
            return Err(StoreError::Checksum(path.clone()))
                .with_context(|| format!("while loading {:?}", path));
        }

        info!(
            "loaded {} record(s) from {:?} (saved with table size {})",
            snap.records.len(),
            path,
            snap.table_size
        );
        Ok(snap.records)
    }

    fn save(&mut self, records: &[Record], table_size: usize) -> anyhow::Result<()> {
        let path = self.snapshot_path();
        let snap = Snapshot {
            version: SNAPSHOT_VERSION,
            table_size,
            checksum: checksum(records)?,
            records: records.to_vec(),
        };

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&snap)?)
            .with_context(|| format!("writing {:?}", tmp))?;
        fs::rename(&tmp, &path).with_context(|| format!("replacing {:?}", path))?;
        info!("saved {} record(s) to {:?}", records.len(), path);
        Ok(())
    }

    fn sync(&mut self) -> anyhow::Result<()> {
        let directory = File::open(&self.base)?;
        directory.sync_all()?;
        Ok(())
    }
}

pub fn export_records(path: &Path, records: &[Record]) -> anyhow::Result<()> {
    let text = codec::encode(records, ExportFormat::from_path(path))?;
    fs::write(path, text).with_context(|| format!("exporting to {:?}", path))?;
    Ok(())
}

pub fn import_records(path: &Path) -> anyhow::Result<Vec<Record>> {
    let text = fs::read_to_string(path).with_context(|| format!("importing from {:?}", path))?;
    let records = codec::decode(&text, ExportFormat::from_path(path))
        .with_context(|| format!("decoding {:?}", path))?;
    if records.is_empty() {
        warn!("no records found in {:?}", path);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("alice_smith", "555-0101", "123 Maple Street, Springfield"),
            Record::new("bob_jones", "555-0102", "456 Oak Avenue, Riverside"),
        ]
    }

    #[test]
    fn store_creation_makes_nested_dirs() -> anyhow::Result<()> {
        let temp_directory = TempDir::new()?;
        let nested = temp_directory.path().join("nested").join("data");
        let _store = FsRecordStore::new(&nested)?;
        assert!(nested.is_dir());
        Ok(())
    }

    #[test]
    fn missing_snapshot_loads_empty() -> anyhow::Result<()> {
        let temp_directory = TempDir::new()?;
        let store = FsRecordStore::new(temp_directory.path())?;
        assert!(store.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn save_load_round_trip() -> anyhow::Result<()> {
        let temp_directory = TempDir::new()?;
        let mut store = FsRecordStore::new(temp_directory.path())?;
        store.save(&sample(), 45)?;
        store.sync()?;

        assert!(temp_directory.path().join(SNAPSHOT_FILE).exists());
        assert!(!temp_directory.path().join("directory.json.tmp").exists());
        assert_eq!(store.load()?, sample());
        Ok(())
    }

    #[test]
    fn checksum_catches_tampering() -> anyhow::Result<()> {
        let temp_directory = TempDir::new()?;
        let mut store = FsRecordStore::new(temp_directory.path())?;
        store.save(&sample(), 45)?;

        let path = store.snapshot_path();
        let tampered = fs::read_to_string(&path)?.replace("Riverside", "Elsewhere");
        fs::File::create(&path)?.write_all(tampered.as_bytes())?;

        let err = store.load().unwrap_err();
        let message = format!("{:?}", err);
        assert!(message.contains("checksum"));
        Ok(())
    }

    #[test]
    fn unknown_version_is_rejected() -> anyhow::Result<()> {
        let temp_directory = TempDir::new()?;
        let store = FsRecordStore::new(temp_directory.path())?;
        let snap = Snapshot {
            version: 99,
            table_size: 45,
            checksum: checksum(&[])?,
            records: Vec::new(),
        };
        fs::write(store.snapshot_path(), serde_json::to_vec(&snap)?)?;
        assert!(store.load().is_err());
        Ok(())
    }

    #[test]
    fn export_import_by_extension() -> anyhow::Result<()> {
        let temp_directory = TempDir::new()?;
        let json = temp_directory.path().join("out.json");
        let text = temp_directory.path().join("out.txt");

        export_records(&json, &sample())?;
        export_records(&text, &sample())?;

        assert!(fs::read_to_string(&json)?.contains("\"phoneNumber\""));
        assert!(fs::read_to_string(&text)?.starts_with("alice_smith,555-0101,"));
        assert_eq!(import_records(&json)?, sample());
        assert_eq!(import_records(&text)?, sample());
        Ok(())
    }

    #[test]
    fn import_missing_file_fails() -> anyhow::Result<()> {
        let temp_directory = TempDir::new()?;
        assert!(import_records(&temp_directory.path().join("nope.json")).is_err());
        Ok(())
    }
}
