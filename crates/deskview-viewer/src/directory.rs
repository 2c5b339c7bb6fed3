//! Employee directory joined against workplace numbers
//!
//! The directory is keyed two ways: by employee id (deep links) and by
//! workplace number (card aggregation). Workplace numbers are matched
//! exactly after trimming; an employee without a number never occupies
//! a workplace.

use serde::{Deserialize, Serialize};

/// One employee record
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    /// Assigned workplace number, if any
    pub workplace_number: Option<String>,
}

/// In-memory employee directory
///
/// Backed by seed data until a real HR integration exists; the lookup
/// surface stays the same either way.
#[derive(Clone, Debug)]
pub struct EmployeeDirectory {
    employees: Vec<Employee>,
}

impl EmployeeDirectory {
    /// Build a directory from explicit records
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn get_employee_by_id(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Exact match on the assigned workplace number, whitespace-trimmed
    pub fn get_employee_by_workplace_number(&self, number: &str) -> Option<&Employee> {
        let wanted = number.trim();
        if wanted.is_empty() {
            return None;
        }
        self.employees
            .iter()
            .find(|e| e.workplace_number.as_deref().map(str::trim) == Some(wanted))
    }
}

impl Default for EmployeeDirectory {
    fn default() -> Self {
        let seed = [
            ("1", "Anna Mitchell", Some("1")),
            ("2", "Mark Weber", Some("3")),
            ("3", "Julia Fischer", Some("WP-005")),
            ("4", "Thomas Klein", Some("2")),
            ("5", "Sarah Hoffmann", Some("WP-002")),
            ("6", "Michael Braun", Some("4")),
            ("7", "Lisa Wagner", None),
            ("8", "David Schulz", Some("7")),
            ("9", "Laura Becker", Some("WP-006")),
            ("10", "Felix Richter", None),
        ];
        let employees = seed
            .iter()
            .map(|(id, name, number)| Employee {
                id: (*id).to_string(),
                name: (*name).to_string(),
                avatar_url: format!("https://i.pravatar.cc/150?u={id}"),
                workplace_number: number.map(str::to_string),
            })
            .collect();
        Self { employees }
    }
}
