//! Presentation-facing types: table columns, sort state and the render snapshot

use serde::Serialize;

use super::employee::{Department, Employee, EmployeeId};
use super::workflow::Workflow;
use crate::utils::datetime::DateDisplay;

/// Name-column sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Next direction when the column header is clicked.
    ///
    /// An unsorted column starts ascending.
    #[must_use]
    pub fn toggled(current: Option<Self>) -> Self {
        match current {
            None | Some(Self::Descending) => Self::Ascending,
            Some(Self::Ascending) => Self::Descending,
        }
    }
}

/// Table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Actions,
    Name,
    DateOfBirth,
    Department,
    Experience,
}

impl Column {
    /// Columns in render order
    pub const ALL: [Self; 5] = [
        Self::Actions,
        Self::Name,
        Self::DateOfBirth,
        Self::Department,
        Self::Experience,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Actions => "actions",
            Self::Name => "name",
            Self::DateOfBirth => "dob",
            Self::Department => "department",
            Self::Experience => "experience",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Actions => "Actions",
            Self::Name => "Name",
            Self::DateOfBirth => "Date of Birth",
            Self::Department => "Department",
            Self::Experience => "Experience",
        }
    }

    /// Only the name column sorts.
    pub fn is_sortable(self) -> bool {
        matches!(self, Self::Name)
    }
}

/// One rendered table row, date already localized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRow {
    pub id: EmployeeId,
    pub name: String,
    pub date_of_birth: String,
    pub department: String,
    pub experience_years: u32,
}

/// Everything the presentation layer needs for one render
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView<'a> {
    pub visible_records: &'a [Employee],
    pub search_text: &'a str,
    pub sort: Option<SortDirection>,
    pub workflow: &'a Workflow,
    pub department_options: [Department; 3],
    pub last_error: Option<&'a str>,
    #[serde(skip)]
    pub(crate) date_display: &'a DateDisplay,
}

impl ListView<'_> {
    /// Visible records formatted for the table.
    pub fn rows(&self) -> Vec<EmployeeRow> {
        self.visible_records
            .iter()
            .map(|e| EmployeeRow {
                id: e.id,
                name: e.name.clone(),
                date_of_birth: self.date_display.format(e.date_of_birth),
                department: e.department.map(|d| d.to_string()).unwrap_or_default(),
                experience_years: e.experience_years,
            })
            .collect()
    }

    /// Localized date of birth of the record held by the open dialog.
    pub fn held_date_of_birth(&self) -> Option<String> {
        self.workflow
            .held_record()
            .map(|r| self.date_display.format(r.date_of_birth))
    }
}
