//! Platform-agnostic bootstrap for the Employee Listing panel.
//!
//! Provides `ListingApp` (store + config holder that mounts controllers),
//! `ListingAppBuilder` (adapter injection) and `ListingConfig` (JSON panel
//! configuration).

pub mod adapters;
mod config;

pub use config::{ListingConfig, DEFAULT_LIST_TITLE};

use std::sync::Arc;

use employee_listing_core::error::{CoreError, CoreResult};
use employee_listing_core::services::{ControllerConfig, EmployeeListController};
use employee_listing_core::traits::EmployeeStore;

/// Platform-agnostic panel state.
///
/// Every host constructs this once via `ListingAppBuilder` and mounts one
/// controller per displayed panel.
pub struct ListingApp {
    store: Arc<dyn EmployeeStore>,
    config: ListingConfig,
    controller_config: ControllerConfig,
}

impl ListingApp {
    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn EmployeeStore> {
        &self.store
    }

    /// Create a controller without loading it.
    #[must_use]
    pub fn controller(&self) -> EmployeeListController {
        EmployeeListController::with_config(
            Arc::clone(&self.store),
            self.controller_config.clone(),
        )
    }

    /// Create a controller and run the initial load.
    ///
    /// A failed load still yields a mounted controller: it renders no rows
    /// and carries the failure in `last_error`.
    pub async fn mount(&self) -> EmployeeListController {
        let mut controller = self.controller();
        match controller.load().await {
            Ok(count) => {
                log::info!(
                    "Mounted panel for list `{}` with {count} employees",
                    self.config.list_title
                );
            }
            Err(e) => {
                log::warn!(
                    "Mounted panel for list `{}` without data: {e}",
                    self.config.list_title
                );
            }
        }
        controller
    }
}

/// Builder for constructing `ListingApp` with a platform-specific store.
///
/// # Required adapters
/// - `store`: where employee rows live
///
/// # Optional
/// - `config`: defaults to `ListingConfig::default()`
pub struct ListingAppBuilder {
    store: Option<Arc<dyn EmployeeStore>>,
    config: Option<ListingConfig>,
}

impl ListingAppBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            config: None,
        }
    }

    #[must_use]
    pub fn store(mut self, store: Arc<dyn EmployeeStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn config(mut self, config: ListingConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the `ListingApp`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if the store is missing or the
    /// config is invalid.
    pub fn build(self) -> CoreResult<ListingApp> {
        let store = self
            .store
            .ok_or_else(|| CoreError::ValidationError("store is required".to_string()))?;
        let config = self.config.unwrap_or_default();
        let controller_config = config.controller_config()?;

        Ok(ListingApp {
            store,
            config,
            controller_config,
        })
    }
}

impl Default for ListingAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
