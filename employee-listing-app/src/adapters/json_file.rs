//! `EmployeeStore` persisted as a JSON array file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use employee_listing_core::error::{CoreError, CoreResult};
use employee_listing_core::traits::EmployeeStore;
use employee_listing_core::types::{EmployeeFields, EmployeeId, EmployeeItem};

/// JSON file backed record store.
///
/// The file holds an array of rows in the remote list's column layout. Every
/// call reads the file and every write rewrites it; a missing file is an empty
/// store. Calls are serialized by an internal lock.
pub struct JsonFileEmployeeStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileEmployeeStore {
    /// Open a store at `path`, creating its parent directory.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if the directory cannot be created.
    pub async fn new(path: &Path) -> CoreResult<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }
        Ok(Self {
            path: path.to_path_buf(),
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_items(&self) -> CoreResult<Vec<EmployeeItem>> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CoreError::StorageError(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&json).map_err(|e| {
            CoreError::SerializationError(format!("Invalid store file {}: {e}", self.path.display()))
        })
    }

    async fn write_items(&self, items: &[EmployeeItem]) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(items)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            CoreError::StorageError(format!("Failed to write {}: {e}", self.path.display()))
        })
    }
}

#[async_trait]
impl EmployeeStore for JsonFileEmployeeStore {
    async fn list_all(&self) -> CoreResult<Vec<EmployeeItem>> {
        let _guard = self.lock.lock().await;
        self.read_items().await
    }

    async fn create(&self, fields: &EmployeeFields) -> CoreResult<EmployeeId> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;
        let id = EmployeeId(items.iter().map(|i| i.id).max().unwrap_or(0) + 1);
        items.push(EmployeeItem::from_fields(id, fields));
        self.write_items(&items).await?;
        log::debug!("[json-file] created employee {id}");
        Ok(id)
    }

    async fn update(&self, id: EmployeeId, fields: &EmployeeFields) -> CoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;
        let slot = items
            .iter_mut()
            .find(|i| i.id == id.0)
            .ok_or(CoreError::RecordNotFound(id))?;
        *slot = EmployeeItem::from_fields(id, fields);
        self.write_items(&items).await
    }

    async fn delete(&self, id: EmployeeId) -> CoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;
        let before = items.len();
        items.retain(|i| i.id != id.0);
        if items.len() == before {
            return Err(CoreError::RecordNotFound(id));
        }
        self.write_items(&items).await
    }
}
