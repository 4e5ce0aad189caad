//! Employee payloads carried by chat messages
//!
//! `EmployeeDraft` is what the local assistant extracts from free text and
//! asks the user to review. `Employee` is the record the workflow engine
//! returns once a hire has actually been accepted.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

/// Monday through Friday, the availability every local draft gets
pub const WEEKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Full English name for a weekday ("Monday", not "Mon")
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// A not-yet-confirmed employee, built from the user's request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Whole currency units per hour
    pub pay_rate: u32,
    pub hours_per_week: u32,
    pub availability: Vec<Weekday>,
    pub start_date: NaiveDate,
}

impl EmployeeDraft {
    pub fn availability_names(&self) -> Vec<&'static str> {
        self.availability.iter().map(|d| weekday_name(*d)).collect()
    }
}

/// Recurring shift attached to an accepted employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSchedule {
    pub start_date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub days: Vec<String>,
}

/// Employee record returned by the workflow engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub hours_per_week: f64,
    pub pay_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<EmployeeSchedule>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Weekly cost of this employee: rate times hours
    pub fn weekly_payroll(&self) -> f64 {
        self.pay_rate * self.hours_per_week
    }
}

// Workflow steps are free to hand back numeric ids
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
