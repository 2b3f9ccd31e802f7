//! Employee Model (per-store staff records)

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorCode};

/// Positions offered by the employee form. Other values are accepted as-is.
pub const POSITIONS: [&str; 8] = [
    "Branch:Fulltime",
    "Branch:Manager",
    "Branch:Parttime",
    "Branch:Mini-job",
    "Head:Fulltime",
    "Head:Manager",
    "Head:Parttime",
    "Head:Mini-job",
];

pub const BRANCHES: [&str; 6] = [
    "Mitte",
    "Kreuzberg",
    "Neukölln",
    "Charlottenburg",
    "Prenzlauer Berg",
    "Head Office",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum SalaryType {
    Hourly,
    Monthly,
}

impl SalaryType {
    /// Part-time and mini-job positions are paid hourly
    pub fn for_position(position: &str) -> Self {
        if position.contains("Parttime") || position.contains("Mini-job") {
            SalaryType::Hourly
        } else {
            SalaryType::Monthly
        }
    }
}

/// Employee entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub store: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub branch: String,
    pub salary_type: SalaryType,
    pub salary: f64,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub branch: String,
    pub salary: f64,
}

impl EmployeeCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("position", &self.position),
            ("branch", &self.branch),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(AppError::with_message(
                    ErrorCode::EmployeeInvalid,
                    format!("Missing {field}"),
                )
                .with_detail("field", field));
            }
        }
        if !self.salary.is_finite() || self.salary < 0.0 {
            return Err(AppError::with_message(
                ErrorCode::EmployeeInvalid,
                format!("Salary must be a non-negative amount, got {}", self.salary),
            ));
        }
        Ok(())
    }

    pub fn salary_type(&self) -> SalaryType {
        SalaryType::for_position(&self.position)
    }
}
