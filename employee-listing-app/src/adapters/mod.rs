//! Platform-agnostic record store adapters for hosts without a portal list
//! client (local tooling, demos, tests).

mod memory;

pub use memory::InMemoryEmployeeStore;

#[cfg(feature = "json-file-store")]
mod json_file;

#[cfg(feature = "json-file-store")]
pub use json_file::JsonFileEmployeeStore;
