//! File-based flag store
//!
//! Keeps every flag in one JSON object in the application data directory.
//! Writes go through a read-modify-write under a lock so concurrent setters
//! in this process never drop each other's keys. The file is replaced
//! atomically (temp file + rename), so readers and crashes only ever see a
//! complete copy.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use crew_core::ports::{FlagKey, FlagStorePort, StorageError};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::debug;

pub const DEFAULT_FLAG_FILE: &str = ".crew_flags";

const TEMP_SUFFIX: &str = ".tmp";

const APP_DIR: &str = "crew";

type FlagMap = BTreeMap<String, String>;

pub struct FileFlagStore {
    flag_file_path: PathBuf,
    file_lock: RwLock<()>,
}

impl FileFlagStore {
    /// Create store with custom file path
    pub fn new(flag_file_path: PathBuf) -> Self {
        Self {
            flag_file_path,
            file_lock: RwLock::new(()),
        }
    }

    /// Create store with base dir and filename
    pub fn with_base_dir(base_dir: PathBuf, filename: impl Into<String>) -> Self {
        Self::new(base_dir.join(filename.into()))
    }

    /// Create store with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_FLAG_FILE))
    }

    /// Store under the platform's local data directory.
    pub fn in_default_location() -> anyhow::Result<Self> {
        let base_dir = default_data_dir().context("no local data directory on this platform")?;
        Ok(Self::with_defaults(base_dir))
    }

    pub fn path(&self) -> &Path {
        &self.flag_file_path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .flag_file_path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(TEMP_SUFFIX);
        self.flag_file_path.with_file_name(name)
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.flag_file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        Ok(())
    }

    async fn load(&self) -> Result<FlagMap, StorageError> {
        let content = match fs::read_to_string(&self.flag_file_path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(FlagMap::new()),
            Err(err) => return Err(io_error(err)),
        };

        if content.trim().is_empty() {
            return Ok(FlagMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            StorageError::Corrupt(format!(
                "failed to parse {}: {}",
                self.flag_file_path.display(),
                e
            ))
        })
    }

    async fn persist(&self, flags: &FlagMap) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(flags).context("failed to serialize flags")?;

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path)
            .await
            .with_context(|| format!("failed to create {}", temp_path.display()))?;
        file.write_all(json.as_bytes())
            .await
            .context("failed to write flag file")?;
        file.sync_all().await.context("failed to sync flag file")?;
        drop(file);

        fs::rename(&temp_path, &self.flag_file_path)
            .await
            .with_context(|| format!("failed to replace {}", self.flag_file_path.display()))?;

        Ok(())
    }

    async fn modify(&self, apply: impl FnOnce(&mut FlagMap) -> bool) -> Result<(), StorageError> {
        let _guard = self.file_lock.write().await;
        let mut flags = self.load().await?;
        if !apply(&mut flags) {
            return Ok(());
        }
        self.persist(&flags)
            .await
            .map_err(|e| StorageError::Io(format!("{e:#}")))
    }
}

#[async_trait]
impl FlagStorePort for FileFlagStore {
    async fn get(&self, key: FlagKey) -> Result<Option<String>, StorageError> {
        let flags = {
            let _guard = self.file_lock.read().await;
            self.load().await?
        };
        Ok(flags.get(key.as_str()).cloned())
    }

    async fn set(&self, key: FlagKey, value: &str) -> Result<(), StorageError> {
        debug!(key = %key, "writing flag");
        self.modify(|flags| {
            let previous = flags.insert(key.as_str().to_string(), value.to_string());
            previous.as_deref() != Some(value)
        })
        .await
    }

    async fn remove(&self, keys: &[FlagKey]) -> Result<(), StorageError> {
        debug!(?keys, "removing flags");
        self.modify(|flags| {
            let mut changed = false;
            for key in keys {
                changed |= flags.remove(key.as_str()).is_some();
            }
            changed
        })
        .await
    }
}

/// `<local data dir>/crew`
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR))
}

fn io_error(err: std::io::Error) -> StorageError {
    StorageError::Io(err.to_string())
}
