pub mod policy;
pub mod record;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;
use record::CounterRecord;

/// Directory, under the platform's document/files area, that the app and
/// its widget extension agree on.
pub const SHARED_DIR: &str = "shared";
pub const COUNTER_FILE: &str = "counter.json";

/// Handle on `<base>/shared/counter.json`.
///
/// Holds no value of its own: every read goes to disk, every write replaces
/// the whole file. Two handles on the same base directory, in the same or in
/// different processes, see each other's writes (last writer wins).
#[derive(Clone, Debug)]
pub struct CounterStore {
    dir: PathBuf,
}

impl CounterStore {
    /// `base` is the platform's app-private document/files directory.
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self { dir: base.as_ref().join(SHARED_DIR) }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file(&self) -> PathBuf {
        self.dir.join(COUNTER_FILE)
    }

    pub fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    fn read_bytes(&self) -> Result<Option<Vec<u8>>, StoreError> {
        self.ensure_dir()?;
        let path = self.file();
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    /// Current value, with every failure reported. A missing file is not a
    /// failure: it reads as 0.
    pub fn try_read_value(&self) -> Result<i64, StoreError> {
        match self.read_bytes()? {
            None => Ok(policy::DEFAULT_VALUE),
            Some(bytes) => record::decode_value(&bytes)
                .ok_or_else(|| StoreError::Decode { path: self.file() }),
        }
    }

    /// Current value; 0 when the file is absent, unreadable or malformed.
    pub fn read_value(&self) -> i64 {
        let v = policy::read_or_zero(self.try_read_value());
        debug!(value = v, path = %self.file().display(), "counter read");
        v
    }

    /// Whole record including the advisory timestamp. `Ok(None)` when
    /// nothing has been stored yet.
    pub fn read_record(&self) -> Result<Option<CounterRecord>, StoreError> {
        match self.read_bytes()? {
            None => Ok(None),
            Some(bytes) => record::decode_record(&bytes)
                .map(Some)
                .ok_or_else(|| StoreError::Decode { path: self.file() }),
        }
    }

    /// Overwrite the file with `value` and a fresh timestamp.
    pub fn write_value(&self, value: i64) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let bytes = record::encode(value)?;
        let path = self.file();
        fs::write(&path, bytes).map_err(|source| StoreError::Write { path, source })?;
        debug!(value, "counter written");
        Ok(())
    }

    /// [`write_value`](Self::write_value) with failures dropped.
    pub fn save_value(&self, value: i64) {
        policy::discard_write(self.write_value(value));
    }
}
