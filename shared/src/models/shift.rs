//! Shift Model (per-store schedule entries)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AppError, ErrorCode};
use crate::util::{parse_clock_minutes, parse_date};

/// Shift entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Shift {
    pub id: i64,
    pub store: String,
    pub staff_id: i64,
    pub staff_name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
}

impl Shift {
    /// Shift length in hours; zero for unparsable times
    pub fn hours(&self) -> f64 {
        match (
            parse_clock_minutes(&self.start_time),
            parse_clock_minutes(&self.end_time),
        ) {
            (Some(start), Some(end)) if end > start => f64::from(end - start) / 60.0,
            _ => 0.0,
        }
    }
}

/// Create shift payload. The staff name is resolved from the employee record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftCreate {
    pub staff_id: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl ShiftCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        if parse_date(&self.date).is_none() {
            return Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Invalid shift date: {}", self.date),
            ));
        }
        let start = parse_clock_minutes(&self.start_time);
        let end = parse_clock_minutes(&self.end_time);
        match (start, end) {
            (Some(start), Some(end)) if end > start => Ok(()),
            (Some(_), Some(_)) => Err(AppError::new(ErrorCode::ShiftTimeInvalid)),
            _ => Err(AppError::with_message(
                ErrorCode::ShiftTimeInvalid,
                format!("Invalid shift times: {} - {}", self.start_time, self.end_time),
            )),
        }
    }
}

/// Hours worked per staff name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffHours {
    pub staff_name: String,
    pub hours: f64,
}

/// Sum shift hours per staff name, sorted by name
pub fn hours_by_staff(shifts: &[Shift]) -> Vec<StaffHours> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for shift in shifts {
        *totals.entry(shift.staff_name.as_str()).or_default() += shift.hours();
    }
    totals
        .into_iter()
        .map(|(name, hours)| StaffHours {
            staff_name: name.to_string(),
            hours,
        })
        .collect()
}
