pub mod config;
pub mod conversation;
pub mod employee;
pub mod events;
pub mod intent;
pub mod message;
pub mod metrics;
pub mod provider;
pub mod schedule;
pub mod workflow;

// Re-export main types for convenience
pub use config::Config;
pub use conversation::{Conversation, Reply, Responder};
pub use employee::{Employee, EmployeeDraft, EmployeeSchedule};
pub use events::{Calendar, ScheduleBus, SchedulePlanEvent};
pub use intent::LocalAssistant;
pub use message::{ChatMessage, ChatRole, MessageAction};
pub use metrics::{BusinessMetrics, MetricsStore};
pub use provider::Provider;
pub use schedule::{ScheduleDay, Shift, ShiftAssignment};
pub use workflow::{HttpWorkflowClient, WorkflowEngine, WorkflowError, WorkflowResult};
