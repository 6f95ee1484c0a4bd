//! Test helper module
//!
//! Provides a mock record store and convenient test factory methods.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{ControllerConfig, EmployeeListController, PersistenceMode};
use crate::traits::EmployeeStore;
use crate::types::{Department, EmployeeFields, EmployeeId, EmployeeItem};

// ===== MockEmployeeStore =====

pub struct MockEmployeeStore {
    items: RwLock<Vec<EmployeeItem>>,
    /// Id handed out by the next successful `create`
    next_id: RwLock<u64>,
    /// If Some, the matching call returns this error
    list_error: RwLock<Option<String>>,
    create_error: RwLock<Option<String>>,
    update_error: RwLock<Option<String>>,
    delete_error: RwLock<Option<String>>,
    /// When set, `create`/`update` never resolve
    hang_create: AtomicBool,
    hang_update: AtomicBool,
    /// Call log
    pub created: RwLock<Vec<EmployeeFields>>,
    pub updated: RwLock<Vec<(EmployeeId, EmployeeFields)>>,
    pub deleted: RwLock<Vec<EmployeeId>>,
}

impl MockEmployeeStore {
    pub fn new(items: Vec<EmployeeItem>) -> Self {
        let next_id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        Self {
            items: RwLock::new(items),
            next_id: RwLock::new(next_id),
            list_error: RwLock::new(None),
            create_error: RwLock::new(None),
            update_error: RwLock::new(None),
            delete_error: RwLock::new(None),
            hang_create: AtomicBool::new(false),
            hang_update: AtomicBool::new(false),
            created: RwLock::new(Vec::new()),
            updated: RwLock::new(Vec::new()),
            deleted: RwLock::new(Vec::new()),
        }
    }

    pub async fn set_next_id(&self, id: u64) {
        *self.next_id.write().await = id;
    }

    pub async fn set_list_error(&self, err: Option<String>) {
        *self.list_error.write().await = err;
    }

    pub async fn set_create_error(&self, err: Option<String>) {
        *self.create_error.write().await = err;
    }

    pub async fn set_update_error(&self, err: Option<String>) {
        *self.update_error.write().await = err;
    }

    pub async fn set_delete_error(&self, err: Option<String>) {
        *self.delete_error.write().await = err;
    }

    pub fn set_hang_create(&self, hang: bool) {
        self.hang_create.store(hang, Ordering::SeqCst);
    }

    pub fn set_hang_update(&self, hang: bool) {
        self.hang_update.store(hang, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmployeeStore for MockEmployeeStore {
    async fn list_all(&self) -> CoreResult<Vec<EmployeeItem>> {
        if let Some(ref msg) = *self.list_error.read().await {
            return Err(CoreError::NetworkError(msg.clone()));
        }
        Ok(self.items.read().await.clone())
    }

    async fn create(&self, fields: &EmployeeFields) -> CoreResult<EmployeeId> {
        if self.hang_create.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if let Some(ref msg) = *self.create_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        let mut next_id = self.next_id.write().await;
        let id = EmployeeId(*next_id);
        *next_id += 1;
        self.items
            .write()
            .await
            .push(EmployeeItem::from_fields(id, fields));
        self.created.write().await.push(fields.clone());
        Ok(id)
    }

    async fn update(&self, id: EmployeeId, fields: &EmployeeFields) -> CoreResult<()> {
        if self.hang_update.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if let Some(ref msg) = *self.update_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.updated.write().await.push((id, fields.clone()));
        Ok(())
    }

    async fn delete(&self, id: EmployeeId) -> CoreResult<()> {
        if let Some(ref msg) = *self.delete_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.items.write().await.retain(|i| i.id != id.0);
        self.deleted.write().await.push(id);
        Ok(())
    }
}

// ===== Factory methods =====

/// Build a raw store row
pub fn item(id: u64, name: &str, department: Department, experience: i64) -> EmployeeItem {
    EmployeeItem {
        id,
        name: Some(name.to_string()),
        date_of_birth: None,
        department: Some(department.as_str().to_string()),
        experience: Some(experience),
    }
}

/// Rows used by most controller tests (load order: Bob, Amy, carl, amy)
pub fn sample_items() -> Vec<EmployeeItem> {
    vec![
        item(1, "Bob", Department::Sales, 4),
        item(2, "Amy", Department::Hr, 2),
        item(3, "carl", Department::It, 9),
        item(4, "amy", Department::It, 1),
    ]
}

/// Create a controller over a mock store, not yet loaded
pub fn create_test_controller(
    items: Vec<EmployeeItem>,
    persistence: PersistenceMode,
) -> (EmployeeListController, Arc<MockEmployeeStore>) {
    let store = Arc::new(MockEmployeeStore::new(items));
    let config = ControllerConfig {
        persistence,
        ..ControllerConfig::default()
    };
    let controller = EmployeeListController::with_config(store.clone(), config);
    (controller, store)
}

/// Create a local-only controller and run the initial load
pub async fn loaded_controller(
    items: Vec<EmployeeItem>,
) -> (EmployeeListController, Arc<MockEmployeeStore>) {
    let (mut controller, store) = create_test_controller(items, PersistenceMode::LocalOnly);
    controller.load().await.unwrap();
    (controller, store)
}

/// Names of the visible records, in order
pub fn visible_names(controller: &EmployeeListController) -> Vec<String> {
    controller
        .visible_records()
        .iter()
        .map(|e| e.name.clone())
        .collect()
}
