//! Employee Listing Core Library
//!
//! Provides the list state and workflow controller behind the Employee
//! Listing panel:
//! - Loading the record set from a remote store
//! - Search and name sort over the displayed view
//! - Edit / add dialogs with confirmation, and delete
//!
//! This library is platform-independent: the remote record store is abstracted
//! behind the [`EmployeeStore`] trait and injected at construction, and the
//! presentation layer renders from [`types::ListView`] snapshots.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{ControllerConfig, EmployeeListController, PersistenceMode};
pub use traits::EmployeeStore;
