// crates/remediation-providers/src/audit_file.rs
// ============================================================================
// Module: Filesystem Audit Store
// Description: Audit records written under a local root directory.
// Purpose: Persist decision records without object storage.
// Dependencies: remediation-core
// ============================================================================

//! ## Overview
//! Keys map one-to-one onto relative paths under the root, so the on-disk
//! layout mirrors the object-store layout. Writes go to a sibling temporary
//! file first and are renamed into place; existing records are never
//! overwritten.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use remediation_core::AuditError;
use remediation_core::AuditKey;
use remediation_core::AuditStore;

// ============================================================================
// SECTION: Store
// ============================================================================

/// Audit store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FileAuditStore {
    /// Root directory.
    root: PathBuf,
}

impl FileAuditStore {
    /// Creates a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Io`] when the root cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AuditError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| AuditError::Io(err.to_string()))?;
        Ok(Self {
            root,
        })
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a key to a path under the root.
    fn path_for(&self, key: &AuditKey) -> Result<PathBuf, AuditError> {
        let relative = Path::new(key.as_str());
        let safe = relative.components().all(|component| matches!(component, Component::Normal(_)));
        if !safe {
            return Err(AuditError::Io(format!("audit key escapes root: {}", key.as_str())));
        }
        Ok(self.root.join(relative))
    }
}

impl AuditStore for FileAuditStore {
    fn put(&self, key: &AuditKey, body: &[u8]) -> Result<String, AuditError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| AuditError::Io(err.to_string()))?;
        }
        if path.exists() {
            return Err(AuditError::Io(format!("audit record already exists: {}", key.as_str())));
        }
        let temp = path.with_extension("json.tmp");
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp)
            .map_err(|err| AuditError::Io(err.to_string()))?;
        let written = file.write_all(body).and_then(|()| file.sync_all());
        if let Err(err) = written {
            let _ = fs::remove_file(&temp);
            return Err(AuditError::Io(err.to_string()));
        }
        fs::rename(&temp, &path).map_err(|err| AuditError::Io(err.to_string()))?;
        Ok(path.display().to_string())
    }
}
