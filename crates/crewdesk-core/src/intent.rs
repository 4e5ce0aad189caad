//! Offline intent matching
//!
//! The local assistant answers without any remote model: it only knows how to
//! turn "add <name>, $<rate>, <hours> hours" into an employee draft. Anything
//! it can't find falls back to a placeholder instead of failing.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::employee::{EmployeeDraft, WEEKDAYS};
use crate::message::ChatMessage;

pub const EMPLOYEE_FORM_PROMPT: &str =
    "Here's a summary of the new employee. Please review and confirm.";

pub const UNKNOWN_NAME: &str = "Unknown";

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)add ([\w\s]+),").expect("name pattern"));
static RATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+)").expect("rate pattern"));
static HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*hours?").expect("hours pattern"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+").expect("email pattern")
});
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}\b").expect("phone pattern")
});

/// Refusal for anything that isn't an "add" request
pub fn refusal(input: &str) -> String {
    format!(
        "I understand you want to {}. However, I can only help with adding new employees right now.",
        input
    )
}

/// Whether the local assistant treats this input as an add request
pub fn is_add_request(input: &str) -> bool {
    input.to_lowercase().contains("add")
}

#[derive(Debug, Clone)]
pub struct LocalAssistant {
    start_date: NaiveDate,
}

impl LocalAssistant {
    pub fn new(start_date: NaiveDate) -> Self {
        Self { start_date }
    }

    /// Produce the single assistant message answering `input`
    pub fn reply(&self, input: &str) -> ChatMessage {
        if is_add_request(input) {
            let draft = self.extract_employee(input);
            tracing::debug!(name = %draft.name, pay_rate = draft.pay_rate, hours = draft.hours_per_week, "extracted employee draft");
            ChatMessage::employee_form(EMPLOYEE_FORM_PROMPT, draft)
        } else {
            ChatMessage::assistant(refusal(input))
        }
    }

    pub fn extract_employee(&self, input: &str) -> EmployeeDraft {
        let name = capture(&NAME_RE, input).unwrap_or_else(|| UNKNOWN_NAME.to_string());
        let pay_rate = capture_number(&RATE_RE, input);
        let hours_per_week = capture_number(&HOURS_RE, input);

        EmployeeDraft {
            name,
            email: EMAIL_RE.find(input).map(|m| m.as_str().to_string()),
            phone: PHONE_RE.find(input).map(|m| m.as_str().to_string()),
            pay_rate,
            hours_per_week,
            availability: WEEKDAYS.to_vec(),
            start_date: self.start_date,
        }
    }
}

fn capture(re: &Regex, input: &str) -> Option<String> {
    re.captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

// Missing or out-of-range numbers become 0
fn capture_number(re: &Regex, input: &str) -> u32 {
    capture(re, input)
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}
