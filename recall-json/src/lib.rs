use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use parking_lot::RwLock;
use recall_core::{repair_all, Card, CollectionStore, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::task;
use tracing::debug;

pub mod paths;

const FILE_VERSION: u32 = 1;
pub const DEFAULT_MAX_BACKUPS: usize = 10;
const BACKUP_STAMP: &str = "%Y%m%d-%H%M%S%.3f";

#[derive(Clone, Serialize, Deserialize)]
struct FileImage {
    version: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    cards: Vec<Card>,
}

// The browser build stored a bare array under the collection key.
#[derive(Deserialize)]
#[serde(untagged)]
enum OnDisk {
    Image(FileImage),
    Bare(Vec<Card>),
}

pub struct JsonStore {
    key: String,
    path: PathBuf,
    backups_dir: PathBuf,
    max_backups: usize,
    created_at: RwLock<Option<DateTime<Utc>>>,
}

impl JsonStore {
    /// Opens collection `key` under `root`; nothing is written until the first save.
    pub fn open_in(root: impl AsRef<Path>, key: &str, max_backups: usize) -> Result<Self, StorageError> {
        let root = root.as_ref();
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageError::Backend(format!("unusable collection key {key:?}")));
        }
        let backups_dir = paths::backups_dir(root);
        fs::create_dir_all(root)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            key: key.to_string(),
            path: paths::collection_file(root, key),
            backups_dir,
            max_backups: max_backups.max(1),
            created_at: RwLock::new(None),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }
}

#[async_trait]
impl CollectionStore for JsonStore {
    fn collection(&self) -> &str {
        &self.key
    }

    async fn load(&self) -> Result<Vec<Card>, StorageError> {
        let path = self.path.clone();
        let on_disk = task::spawn_blocking(move || read_file(&path))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))??;

        let (created_at, mut cards) = match on_disk {
            None => (None, Vec::new()),
            Some(OnDisk::Image(img)) => (Some(img.created_at), img.cards),
            Some(OnDisk::Bare(cards)) => (None, cards),
        };
        if let Some(ts) = created_at {
            *self.created_at.write() = Some(ts);
        }
        let repaired = repair_all(&mut cards);
        debug!(key = %self.key, cards = cards.len(), repaired, "loaded collection");
        Ok(cards)
    }

    async fn save(&self, cards: &[Card]) -> Result<(), StorageError> {
        let now = Utc::now();
        let created_at = *self.created_at.write().get_or_insert(now);
        let img = FileImage {
            version: FILE_VERSION,
            created_at,
            updated_at: now,
            cards: cards.to_vec(),
        };
        let path = self.path.clone();
        let backups = self.backups_dir.clone();
        let key = self.key.clone();
        let keep = self.max_backups;

        task::spawn_blocking(move || write_with_backup(&path, &backups, &key, keep, &img))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))??;
        debug!(key = %self.key, cards = cards.len(), "saved collection");
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<Option<OnDisk>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    let buf = fs::read_to_string(path)?;
    if buf.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str::<OnDisk>(&buf)?))
}

fn write_with_backup(
    path: &Path,
    backups_dir: &Path,
    key: &str,
    max_backups: usize,
    img: &FileImage,
) -> Result<(), StorageError> {
    let json = serde_json::to_vec_pretty(img)?;

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    // Backup rotation
    fs::create_dir_all(backups_dir)?;
    let ts = Utc::now().format(BACKUP_STAMP);
    let backup_path = backups_dir.join(format!("{key}-{ts}.json"));
    let mut btmp = NamedTempFile::new_in(backups_dir)?;
    btmp.write_all(&json)?;
    btmp.flush()?;
    btmp.persist(&backup_path).map_err(|e| e.error)?;

    rotate_backups(backups_dir, key, max_backups)?;
    Ok(())
}

/// True for `{key}-{stamp}.json`; keys that merely share a prefix (`deck` vs `deck-1`) do not match.
fn is_backup_of(name: &str, key: &str) -> bool {
    name.strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|rest| rest.strip_suffix(".json"))
        .is_some_and(|stamp| NaiveDateTime::parse_from_str(stamp, BACKUP_STAMP).is_ok())
}

// Names embed the timestamp, so lexical order is age order.
fn rotate_backups(dir: &Path, key: &str, keep: usize) -> Result<(), std::io::Error> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|n| is_backup_of(n, key))
        .collect();
    names.sort();
    if names.len() > keep {
        for n in &names[0..names.len() - keep] {
            let _ = fs::remove_file(dir.join(n));
        }
    }
    Ok(())
}
