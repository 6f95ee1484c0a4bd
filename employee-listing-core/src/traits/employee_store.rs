//! Remote record store abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{EmployeeFields, EmployeeId, EmployeeItem};

/// Employee record store Trait
///
/// Platform implementation:
/// - Portal panel: the hosting framework's list client
/// - Bootstrap / tests: `InMemoryEmployeeStore`, `JsonFileEmployeeStore`
///   (employee-listing-app)
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Get all records (single unbounded read, load order)
    async fn list_all(&self) -> CoreResult<Vec<EmployeeItem>>;

    /// Create a record and return the id assigned by the store
    ///
    /// # Arguments
    /// * `fields` - Field values, date of birth in interchange form
    async fn create(&self, fields: &EmployeeFields) -> CoreResult<EmployeeId>;

    /// Replace the fields of an existing record
    ///
    /// # Arguments
    /// * `id` - Employee ID
    /// * `fields` - New field values
    async fn update(&self, id: EmployeeId, fields: &EmployeeFields) -> CoreResult<()>;

    /// Delete a record
    ///
    /// # Arguments
    /// * `id` - Employee ID
    async fn delete(&self, id: EmployeeId) -> CoreResult<()>;
}
