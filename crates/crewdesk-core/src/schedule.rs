use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The two daily shift buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Morning,
    Evening,
}

impl Shift {
    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning Shift (8am-2pm)",
            Shift::Evening => "Evening Shift (2pm-8pm)",
        }
    }
}

/// One person placed on a shift
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub id: String,
    pub name: String,
}

/// Staffing for a single date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub morning: Vec<ShiftAssignment>,
    #[serde(default)]
    pub evening: Vec<ShiftAssignment>,
}

impl ScheduleDay {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            morning: Vec::new(),
            evening: Vec::new(),
        }
    }

    pub fn shift(&self, shift: Shift) -> &[ShiftAssignment] {
        match shift {
            Shift::Morning => &self.morning,
            Shift::Evening => &self.evening,
        }
    }

    /// Add someone to a shift unless they are already on it
    pub fn assign(&mut self, shift: Shift, assignment: ShiftAssignment) -> bool {
        let bucket = match shift {
            Shift::Morning => &mut self.morning,
            Shift::Evening => &mut self.evening,
        };
        if bucket.iter().any(|a| a.id == assignment.id) {
            return false;
        }
        bucket.push(assignment);
        true
    }

    pub fn headcount(&self) -> usize {
        self.morning.len() + self.evening.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str, name: &str) -> ShiftAssignment {
        ShiftAssignment {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_assign_skips_duplicate_ids() {
        let mut day = ScheduleDay::new(NaiveDate::from_ymd_opt(2025, 9, 28).unwrap());
        assert!(day.assign(Shift::Morning, person("1", "Sarah Johnson")));
        assert!(!day.assign(Shift::Morning, person("1", "Sarah J.")));
        assert!(day.assign(Shift::Evening, person("1", "Sarah Johnson")));
        assert_eq!(day.shift(Shift::Morning).len(), 1);
        assert_eq!(day.headcount(), 2);
    }

    #[test]
    fn test_missing_buckets_default_empty() {
        let day: ScheduleDay = serde_json::from_str(r#"{"date":"2025-09-29","morning":[{"id":"a","name":"A"}]}"#).unwrap();
        assert_eq!(day.morning.len(), 1);
        assert!(day.evening.is_empty());
    }
}
