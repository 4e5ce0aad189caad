//! The chat controller
//!
//! `Conversation` owns the ordered message list. Submitting appends the user
//! message right away; the answer is produced elsewhere (usually a spawned
//! task running `Responder::respond`) and comes back as a `Reply` to apply.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::employee::Employee;
use crate::events::{ScheduleBus, SchedulePlanEvent};
use crate::intent::LocalAssistant;
use crate::message::ChatMessage;
use crate::metrics::{BusinessMetrics, MetricsStore};
use crate::provider::Provider;
use crate::workflow::{EmployeeRequest, WorkflowEngine, PROCESS_EMPLOYEE_REQUEST};

pub const GREETING: &str = "Hi! I can help you manage your employees. Try saying \"Add Sarah Johnson, $28/hour, 22 hours/week, Mon-Fri, start Sep 28\"";

pub const ERROR_REPLY: &str = "There was an error processing your request. Please try again.";

pub fn hire_confirmation(employee: &Employee) -> String {
    format!("Successfully added {} to the system!", employee.full_name())
}

/// Everything one answer adds to the conversation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reply {
    pub messages: Vec<ChatMessage>,
    /// Accepted hire to fold into metrics and announce to calendars
    pub hire: Option<Employee>,
}

impl Reply {
    pub fn message(message: ChatMessage) -> Self {
        Self {
            messages: vec![message],
            hire: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    pending: usize,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            pending: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True while at least one reply is still outstanding
    pub fn is_awaiting_reply(&self) -> bool {
        self.pending > 0
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Record the user's message. Returns the text to answer, or `None`
    /// for blank input. Non-blank input is kept exactly as typed.
    pub fn submit(&mut self, input: &str) -> Option<String> {
        if input.trim().is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(input));
        self.pending += 1;
        tracing::info!(pending = self.pending, "user message submitted");
        Some(input.to_string())
    }

    /// Append a finished reply. Hires update `metrics` and put the new
    /// employee on the morning shift of `today`.
    pub fn apply(
        &mut self,
        reply: Reply,
        metrics: &mut MetricsStore,
        bus: &ScheduleBus,
        today: NaiveDate,
    ) {
        self.pending = self.pending.saturating_sub(1);

        let Reply { messages, hire } = reply;
        let mut messages = messages.into_iter();

        match hire {
            Some(employee) => {
                // The raw tool output lands before the hire takes effect
                if let Some(first) = messages.next() {
                    self.messages.push(first);
                }
                metrics.record_hire(&employee);
                bus.publish(SchedulePlanEvent::for_new_hire(&employee, today));
                self.messages.extend(messages);
            }
            None => self.messages.extend(messages),
        }
    }
}

/// Produces replies for submitted input
#[derive(Clone)]
pub struct Responder {
    local: LocalAssistant,
    engine: Arc<dyn WorkflowEngine>,
    delay: Duration,
}

impl Responder {
    pub fn new(local: LocalAssistant, engine: Arc<dyn WorkflowEngine>, delay: Duration) -> Self {
        Self {
            local,
            engine,
            delay,
        }
    }

    pub async fn respond(&self, provider: Provider, input: String, metrics: BusinessMetrics) -> Reply {
        match provider {
            Provider::Local => self.local_reply(&input).await,
            Provider::Workflow => self.workflow_reply(input, metrics).await,
        }
    }

    async fn local_reply(&self, input: &str) -> Reply {
        // Simulated latency so the local assistant feels like the remote one
        tokio::time::sleep(self.delay).await;
        Reply::message(self.local.reply(input))
    }

    async fn workflow_reply(&self, input: String, metrics: BusinessMetrics) -> Reply {
        let request = EmployeeRequest {
            input,
            business_metrics: metrics,
        };
        let payload = match serde_json::to_value(&request) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(error = %err, "could not encode workflow request");
                return Reply::message(ChatMessage::assistant(ERROR_REPLY));
            }
        };

        match self.engine.execute(PROCESS_EMPLOYEE_REQUEST, payload).await {
            Ok(result) => {
                let mut reply = Reply::message(ChatMessage::tool(result.pretty()));

                if let Some(employee) = result.employee {
                    reply.messages.push(ChatMessage::employee_added(
                        hire_confirmation(&employee),
                        employee.clone(),
                    ));
                    reply.hire = Some(employee);
                }
                if let Some(day) = result.schedule {
                    reply.messages.push(ChatMessage::schedule(day));
                }
                reply
            }
            Err(err) => {
                tracing::error!(error = %err, "workflow error");
                Reply::message(ChatMessage::assistant(ERROR_REPLY))
            }
        }
    }
}
