//! Employee record types

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::utils::coerce::clamp_experience;

/// Store-assigned employee identifier
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl EmployeeId {
    /// Placeholder carried by a draft until the store assigns a real id
    pub const UNASSIGNED: Self = Self(0);

    #[must_use]
    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Department (fixed option set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "HR")]
    Hr,
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "Sales")]
    Sales,
}

impl Department {
    /// Dropdown options, in display order
    pub const ALL: [Self; 3] = [Self::Hr, Self::It, Self::Sales];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hr => "HR",
            Self::It => "IT",
            Self::Sales => "Sales",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown department: {trimmed}")))
    }
}

/// Employee record as held by the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Store-assigned ID (`UNASSIGNED` for a draft)
    pub id: EmployeeId,
    pub name: String,
    /// Canonical date of birth; localized only when rendered
    #[serde(default, with = "crate::utils::datetime")]
    pub date_of_birth: Option<NaiveDate>,
    /// `None` while a draft has no department selected
    #[serde(default)]
    pub department: Option<Department>,
    pub experience_years: u32,
}

impl Employee {
    /// A fresh add-flow draft: sentinel id, every field empty.
    #[must_use]
    pub fn draft() -> Self {
        Self {
            id: EmployeeId::UNASSIGNED,
            name: String::new(),
            date_of_birth: None,
            department: None,
            experience_years: 0,
        }
    }

    /// Builds a record from store-assigned id and submitted fields.
    #[must_use]
    pub fn from_fields(id: EmployeeId, fields: EmployeeFields) -> Self {
        Self {
            id,
            name: fields.name,
            date_of_birth: fields.date_of_birth,
            department: fields.department,
            experience_years: fields.experience_years,
        }
    }

    /// The mutable fields, as sent on create/update.
    #[must_use]
    pub fn fields(&self) -> EmployeeFields {
        EmployeeFields {
            name: self.name.clone(),
            date_of_birth: self.date_of_birth,
            department: self.department,
            experience_years: self.experience_years,
        }
    }

    /// Case-insensitive substring match against the name.
    ///
    /// `needle_lower` must already be lowercased.
    pub(crate) fn name_matches(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.name.to_lowercase().contains(needle_lower)
    }
}

impl From<EmployeeItem> for Employee {
    fn from(item: EmployeeItem) -> Self {
        let department = item
            .department
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| match raw.parse::<Department>() {
                Ok(d) => Some(d),
                Err(e) => {
                    log::warn!("Employee {}: {e}", item.id);
                    None
                }
            });

        Self {
            id: EmployeeId(item.id),
            name: item.name.unwrap_or_default(),
            date_of_birth: item.date_of_birth,
            department,
            experience_years: item.experience.map_or(0, clamp_experience),
        }
    }
}

/// Field set submitted to the record store on create/update
///
/// Serialized with the remote list's column names; the date of birth travels
/// in interchange form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFields {
    #[serde(rename = "Name1")]
    pub name: String,
    #[serde(rename = "DOB", default, with = "crate::utils::datetime")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(rename = "Department1", default)]
    pub department: Option<Department>,
    #[serde(rename = "Experience")]
    pub experience_years: u32,
}

/// Raw row returned by the record store's `list_all`
///
/// Columns other than `Id` may be missing or hold values outside the
/// controller's domain. Unreadable dates and non-integer experience are
/// absorbed while deserializing; conversion into [`Employee`] normalizes the
/// rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeItem {
    #[serde(rename = "Id")]
    pub id: u64,
    #[serde(rename = "Name1", default)]
    pub name: Option<String>,
    #[serde(
        rename = "DOB",
        default,
        serialize_with = "crate::utils::datetime::serialize",
        deserialize_with = "crate::utils::datetime::deserialize_lenient"
    )]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(rename = "Department1", default)]
    pub department: Option<String>,
    #[serde(
        rename = "Experience",
        default,
        deserialize_with = "crate::utils::coerce::deserialize_experience"
    )]
    pub experience: Option<i64>,
}

impl EmployeeItem {
    /// Builds the stored row for a freshly created record.
    #[must_use]
    pub fn from_fields(id: EmployeeId, fields: &EmployeeFields) -> Self {
        Self {
            id: id.0,
            name: Some(fields.name.clone()),
            date_of_birth: fields.date_of_birth,
            department: fields.department.map(|d| d.as_str().to_string()),
            experience: Some(i64::from(fields.experience_years)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_carries_sentinel_id() {
        let draft = Employee::draft();
        assert!(!draft.id.is_assigned());
        assert!(draft.name.is_empty());
        assert_eq!(draft.department, None);
        assert_eq!(draft.experience_years, 0);
    }

    #[test]
    fn department_parses_case_insensitively() {
        assert_eq!("hr".parse::<Department>().unwrap(), Department::Hr);
        assert_eq!(" Sales ".parse::<Department>().unwrap(), Department::Sales);
        assert!("Finance".parse::<Department>().is_err());
    }

    #[test]
    fn item_deserializes_from_remote_columns() {
        let json = r#"{
            "Id": 4,
            "Name1": "Dana",
            "DOB": "1991-03-15T08:00:00Z",
            "Department1": "IT",
            "Experience": 6
        }"#;
        let item: EmployeeItem = serde_json::from_str(json).unwrap();
        let employee = Employee::from(item);

        assert_eq!(employee.id, EmployeeId(4));
        assert_eq!(employee.name, "Dana");
        assert_eq!(employee.date_of_birth, NaiveDate::from_ymd_opt(1991, 3, 15));
        assert_eq!(employee.department, Some(Department::It));
        assert_eq!(employee.experience_years, 6);
    }

    #[test]
    fn item_with_missing_or_foreign_values_is_normalized() {
        let json = r#"{ "Id": 9, "Department1": "Finance", "Experience": -3, "DOB": null }"#;
        let item: EmployeeItem = serde_json::from_str(json).unwrap();
        let employee = Employee::from(item);

        assert_eq!(employee.name, "");
        assert_eq!(employee.date_of_birth, None);
        assert_eq!(employee.department, None);
        assert_eq!(employee.experience_years, 0);
    }

    #[test]
    fn malformed_row_values_do_not_fail_the_list() {
        let json = r#"[
            { "Id": 1, "Name1": "Ann", "DOB": "1990-01-01", "Experience": 2 },
            { "Id": 2, "Name1": "Ben", "DOB": "01/02/1990", "Experience": 5.0 },
            { "Id": 3, "Name1": "Cy", "DOB": false, "Experience": "7" }
        ]"#;
        let items: Vec<EmployeeItem> = serde_json::from_str(json).unwrap();
        let employees: Vec<Employee> = items.into_iter().map(Employee::from).collect();

        assert_eq!(employees.len(), 3);
        assert_eq!(employees[0].date_of_birth, NaiveDate::from_ymd_opt(1990, 1, 1));
        assert_eq!(employees[1].date_of_birth, None);
        assert_eq!(employees[1].experience_years, 5);
        assert_eq!(employees[2].date_of_birth, None);
        assert_eq!(employees[2].experience_years, 7);
    }

    #[test]
    fn fields_keep_strict_dates() {
        let json = r#"{ "Name1": "Ben", "DOB": "01/02/1990", "Experience": 1 }"#;
        assert!(serde_json::from_str::<EmployeeFields>(json).is_err());
    }

    #[test]
    fn fields_serialize_with_interchange_date() {
        let fields = EmployeeFields {
            name: "Cara".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1995, 7, 2),
            department: Some(Department::It),
            experience_years: 3,
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["Name1"], "Cara");
        assert_eq!(json["DOB"], "1995-07-02T00:00:00Z");
        assert_eq!(json["Department1"], "IT");
        assert_eq!(json["Experience"], 3);
    }
}
