//! Business logic service layer

mod list_controller;

pub use list_controller::EmployeeListController;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::datetime::DateDisplay;

/// Default bound on a single record store call
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Whether edit/delete reach the record store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersistenceMode {
    /// Edit and delete only mutate local state; add always persists.
    #[default]
    LocalOnly,
    /// Edit and delete call `update`/`delete` before mutating local state.
    Remote,
}

/// Controller settings
///
/// The platform layer builds this (see `ListingConfig` in employee-listing-app).
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Bound on each store call
    pub request_timeout: Duration,
    /// Edit/delete persistence
    pub persistence: PersistenceMode,
    /// Date rendering for the presentation layer
    pub date_display: DateDisplay,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            persistence: PersistenceMode::default(),
            date_display: DateDisplay::default(),
        }
    }
}
