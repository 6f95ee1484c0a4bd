//! Dialog workflow state
//!
//! At most one dialog is open at a time, so the whole workflow is a single
//! enum: each variant carries exactly the data its dialog needs.

use std::fmt;

use serde::Serialize;

use super::employee::Employee;

/// Current dialog workflow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Workflow {
    /// No dialog open
    #[default]
    Idle,
    /// Edit dialog open over a copy of the record
    Editing { record: Employee },
    /// "Save the changes?" confirmation
    ConfirmingEdit {
        record: Employee,
        /// Remote update in flight
        pending: bool,
    },
    /// Add dialog open over a draft
    Adding { draft: Employee },
    /// "Add new employee?" confirmation
    ConfirmingAdd {
        draft: Employee,
        /// Remote create in flight
        pending: bool,
    },
}

impl Workflow {
    #[must_use]
    pub fn kind(&self) -> WorkflowKind {
        match self {
            Self::Idle => WorkflowKind::Idle,
            Self::Editing { .. } => WorkflowKind::Editing,
            Self::ConfirmingEdit { pending: false, .. } => WorkflowKind::ConfirmingEdit,
            Self::ConfirmingEdit { pending: true, .. } => WorkflowKind::SavingEdit,
            Self::Adding { .. } => WorkflowKind::Adding,
            Self::ConfirmingAdd { pending: false, .. } => WorkflowKind::ConfirmingAdd,
            Self::ConfirmingAdd { pending: true, .. } => WorkflowKind::SavingAdd,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether a store call issued from this state is still unresolved.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            Self::ConfirmingEdit { pending: true, .. } | Self::ConfirmingAdd { pending: true, .. }
        )
    }

    /// Set or clear the in-flight flag of a confirmation; no-op elsewhere.
    pub(crate) fn set_pending(&mut self, value: bool) {
        if let Self::ConfirmingEdit { pending, .. } | Self::ConfirmingAdd { pending, .. } = self {
            *pending = value;
        }
    }

    /// The record held by the edit or add dialog, if any.
    pub fn held_record(&self) -> Option<&Employee> {
        match self {
            Self::Idle => None,
            Self::Editing { record } | Self::ConfirmingEdit { record, .. } => Some(record),
            Self::Adding { draft } | Self::ConfirmingAdd { draft, .. } => Some(draft),
        }
    }
}

/// Payload-free workflow tag, used in errors and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkflowKind {
    Idle,
    Editing,
    ConfirmingEdit,
    SavingEdit,
    Adding,
    ConfirmingAdd,
    SavingAdd,
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Idle => "idle",
            Self::Editing => "editing",
            Self::ConfirmingEdit => "confirming edit",
            Self::SavingEdit => "saving edit",
            Self::Adding => "adding",
            Self::ConfirmingAdd => "confirming add",
            Self::SavingAdd => "saving add",
        };
        f.write_str(text)
    }
}
