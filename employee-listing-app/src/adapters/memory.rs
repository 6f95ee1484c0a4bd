//! `EmployeeStore` kept entirely in memory.

use async_trait::async_trait;
use tokio::sync::RwLock;

use employee_listing_core::error::{CoreError, CoreResult};
use employee_listing_core::traits::EmployeeStore;
use employee_listing_core::types::{EmployeeFields, EmployeeId, EmployeeItem};

/// In-memory record store.
///
/// Rows keep insertion order; ids are assigned sequentially after the highest
/// seeded id.
pub struct InMemoryEmployeeStore {
    inner: RwLock<Rows>,
}

struct Rows {
    items: Vec<EmployeeItem>,
    next_id: u64,
}

impl InMemoryEmployeeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Seed the store with existing rows.
    #[must_use]
    pub fn with_items(items: Vec<EmployeeItem>) -> Self {
        let next_id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(Rows { items, next_id }),
        }
    }

    /// Current rows, in store order.
    pub async fn snapshot(&self) -> Vec<EmployeeItem> {
        self.inner.read().await.items.clone()
    }
}

impl Default for InMemoryEmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn list_all(&self) -> CoreResult<Vec<EmployeeItem>> {
        Ok(self.inner.read().await.items.clone())
    }

    async fn create(&self, fields: &EmployeeFields) -> CoreResult<EmployeeId> {
        let mut rows = self.inner.write().await;
        let id = EmployeeId(rows.next_id);
        rows.next_id += 1;
        rows.items.push(EmployeeItem::from_fields(id, fields));
        log::debug!("[memory] created employee {id}");
        Ok(id)
    }

    async fn update(&self, id: EmployeeId, fields: &EmployeeFields) -> CoreResult<()> {
        let mut rows = self.inner.write().await;
        let slot = rows
            .items
            .iter_mut()
            .find(|i| i.id == id.0)
            .ok_or(CoreError::RecordNotFound(id))?;
        *slot = EmployeeItem::from_fields(id, fields);
        Ok(())
    }

    async fn delete(&self, id: EmployeeId) -> CoreResult<()> {
        let mut rows = self.inner.write().await;
        let before = rows.items.len();
        rows.items.retain(|i| i.id != id.0);
        if rows.items.len() == before {
            return Err(CoreError::RecordNotFound(id));
        }
        Ok(())
    }
}
