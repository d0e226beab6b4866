use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::InvoiceError;

/// Storage key of the invoice list.
pub const INVOICES_KEY: &str = "invoices";
/// Storage key of the client list.
pub const CLIENTS_KEY: &str = "clients";
/// Storage key of the company profile.
pub const COMPANY_KEY: &str = "companyInfo";

/// A keyed blob store. Each key holds one JSON document that is read once
/// at startup and overwritten in full on every change.
pub trait Storage {
    /// Read the blob stored under `key`, or `None` if it was never written.
    fn load(&self, key: &str) -> Result<Option<String>, InvoiceError>;

    /// Replace the blob stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<(), InvoiceError>;
}

/// In-memory storage, for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blobs: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw access to a stored blob.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }

    /// Put a raw blob, bypassing the store.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.blobs.insert(key.into(), value.into());
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, InvoiceError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), InvoiceError> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: one `{key}.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` for storage, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, InvoiceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            InvoiceError::Storage(format!("cannot create {}: {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, InvoiceError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(InvoiceError::Storage(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), InvoiceError> {
        let path = self.path_for(key);
        // Write to a sibling file first so a failed write keeps the old blob.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .and_then(|()| fs::rename(&tmp, &path))
            .map_err(|e| InvoiceError::Storage(format!("cannot write {}: {e}", path.display())))
    }
}
