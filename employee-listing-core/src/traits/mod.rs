//! Storage layer abstraction trait definition

mod employee_store;

pub use employee_store::EmployeeStore;
