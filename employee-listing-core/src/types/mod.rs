//! Type definitions

mod employee;
mod view;
mod workflow;

pub use employee::{Department, Employee, EmployeeFields, EmployeeId, EmployeeItem};
pub use view::{Column, EmployeeRow, ListView, SortDirection};
pub use workflow::{Workflow, WorkflowKind};
