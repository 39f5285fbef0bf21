// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local-disk storage for uploaded IFC files.
//!
//! Files are written once under a generated `<uuid>.ifc` name and never
//! modified or deleted afterwards.

use crate::error::ApiError;
use crate::types::StoredFile;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Extension of accepted model files.
pub const IFC_EXTENSION: &str = ".ifc";

/// Check for the `.ifc` extension (case-insensitive).
pub fn has_ifc_extension(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(IFC_EXTENSION)
}

/// A name is servable only if it is a single, ordinary path component.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && Path::new(name).file_name().is_some_and(|n| n == name)
}

/// A freshly written upload.
#[derive(Debug, Clone)]
pub struct SavedFile {
    pub file_name: String,
    pub path: PathBuf,
    pub size: u64,
    pub sha256: String,
}

/// Upload directory on local disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the store, creating the directory if it doesn't exist.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, ApiError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generate a unique stored name.
    pub fn generate_name() -> String {
        format!("{}{}", Uuid::new_v4(), IFC_EXTENSION)
    }

    /// SHA-256 of file content (hex).
    pub fn content_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }

    /// Write `data` under a new generated name.
    pub async fn save(&self, data: &[u8]) -> Result<SavedFile, ApiError> {
        let file_name = Self::generate_name();
        let path = self.root.join(&file_name);

        if let Err(e) = write_new(&path, data).await {
            // Don't leave a truncated file behind
            if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                tracing::warn!(error = %cleanup, path = %path.display(), "Failed to remove partial upload");
            }
            return Err(e.into());
        }

        tracing::debug!(file_name = %file_name, size = data.len(), "Stored upload");

        Ok(SavedFile {
            file_name,
            path,
            size: data.len() as u64,
            sha256: Self::content_hash(data),
        })
    }

    /// All stored IFC files, newest first.
    pub async fn list(&self) -> Result<Vec<StoredFile>, ApiError> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let Ok(file_name) = entry.file_name().into_string() else {
                continue;
            };
            if !has_ifc_extension(&file_name) {
                continue;
            }

            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }

            // Birth time is not recorded on every filesystem
            let created = metadata.created().or_else(|_| metadata.modified())?;

            files.push(StoredFile {
                file_name,
                size: metadata.len(),
                upload_date: OffsetDateTime::from(created),
            });
        }

        files.sort_by(|a, b| {
            b.upload_date
                .cmp(&a.upload_date)
                .then_with(|| a.file_name.cmp(&b.file_name))
        });
        Ok(files)
    }

    /// Read a stored file by name.
    pub async fn read(&self, file_name: &str) -> Result<Vec<u8>, ApiError> {
        if !is_plain_file_name(file_name) {
            return Err(ApiError::NotFound(file_name.to_string()));
        }

        match tokio::fs::read(self.root.join(file_name)).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ApiError::NotFound(file_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_new(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    Ok(())
}
