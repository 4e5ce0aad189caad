//! UI-agnostic chat message types
//!
//! These are shared by every front-end and don't depend on any specific UI
//! framework. A message's structured payload lives inside its action tag,
//! so an action can never be paired with the wrong kind of data.

use serde::{Deserialize, Serialize};

use crate::employee::{Employee, EmployeeDraft};
use crate::schedule::ScheduleDay;

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    Tool,
    Employee,
    Schedule,
}

/// Special render modes, each with the payload it needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "snake_case")]
pub enum MessageAction {
    RenderEmployeeForm(EmployeeDraft),
    EmployeeAdded(Employee),
    Schedule(ScheduleDay),
}

impl MessageAction {
    pub fn tag(&self) -> &'static str {
        match self {
            MessageAction::RenderEmployeeForm(_) => "render_employee_form",
            MessageAction::EmployeeAdded(_) => "employee_added",
            MessageAction::Schedule(_) => "schedule",
        }
    }
}

/// A chat message in the assistant conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(flatten)]
    pub action: Option<MessageAction>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::text(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text(ChatRole::Assistant, content)
    }

    pub fn tool(content: impl Into<String>) -> Self {
        Self::text(ChatRole::Tool, content)
    }

    fn text(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            action: None,
        }
    }

    pub fn employee_form(content: impl Into<String>, draft: EmployeeDraft) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            action: Some(MessageAction::RenderEmployeeForm(draft)),
        }
    }

    pub fn employee_added(content: impl Into<String>, employee: Employee) -> Self {
        Self {
            role: ChatRole::Employee,
            content: content.into(),
            action: Some(MessageAction::EmployeeAdded(employee)),
        }
    }

    pub fn schedule(day: ScheduleDay) -> Self {
        Self {
            role: ChatRole::Schedule,
            content: format!("Schedule for {}", day.date),
            action: Some(MessageAction::Schedule(day)),
        }
    }
}
