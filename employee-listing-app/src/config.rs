//! Panel configuration.
//!
//! Loaded from a camelCase JSON document; every field is optional and falls
//! back to its default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use employee_listing_core::error::{CoreError, CoreResult};
use employee_listing_core::services::{ControllerConfig, PersistenceMode};
use employee_listing_core::utils::datetime::{DateDisplay, DEFAULT_DISPLAY_FORMAT};

/// Remote list holding the employee rows
pub const DEFAULT_LIST_TITLE: &str = "Q-14_Employees";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Panel configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingConfig {
    /// Title of the remote list the store reads and writes
    pub list_title: String,
    /// Bound on each store call, in seconds
    pub request_timeout_secs: u64,
    /// Whether edit/delete reach the store
    pub persistence: PersistenceMode,
    /// strftime pattern for rendered dates
    pub date_display_format: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            list_title: DEFAULT_LIST_TITLE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            persistence: PersistenceMode::default(),
            date_display_format: DEFAULT_DISPLAY_FORMAT.to_string(),
        }
    }
}

impl ListingConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CoreError::SerializationError(format!("Invalid panel config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::StorageError(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded panel config from {}", path.display());
        Ok(config)
    }

    /// Check every field without building anything.
    pub fn validate(&self) -> CoreResult<()> {
        if self.list_title.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "listTitle cannot be empty".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::ValidationError(
                "requestTimeoutSecs must be at least 1".to_string(),
            ));
        }
        DateDisplay::new(&self.date_display_format)?;
        Ok(())
    }

    /// Controller settings derived from this config.
    pub fn controller_config(&self) -> CoreResult<ControllerConfig> {
        self.validate()?;
        Ok(ControllerConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            persistence: self.persistence,
            date_display: DateDisplay::new(&self.date_display_format)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ListingConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ListingConfig::default());
        assert_eq!(config.list_title, "Q-14_Employees");
        assert_eq!(config.persistence, PersistenceMode::LocalOnly);
    }

    #[test]
    fn fields_are_camel_case() {
        let config = ListingConfig::from_json_str(
            r#"{ "requestTimeoutSecs": 5, "persistence": "remote", "dateDisplayFormat": "%d.%m.%Y" }"#,
        )
        .unwrap();

        let controller = config.controller_config().unwrap();
        assert_eq!(controller.request_timeout, Duration::from_secs(5));
        assert_eq!(controller.persistence, PersistenceMode::Remote);
        assert_eq!(controller.date_display.pattern(), "%d.%m.%Y");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            ListingConfig::from_json_str(r#"{ "requestTimeoutSecs": 0 }"#),
            Err(CoreError::ValidationError(_))
        ));
        assert!(matches!(
            ListingConfig::from_json_str(r#"{ "dateDisplayFormat": "%Q" }"#),
            Err(CoreError::ValidationError(_))
        ));
        assert!(matches!(
            ListingConfig::from_json_str(r#"{ "persistence": "sometimes" }"#),
            Err(CoreError::SerializationError(_))
        ));
    }
}
