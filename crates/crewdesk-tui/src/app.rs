use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use crewdesk_core::message::MessageAction;
use crewdesk_core::{
    Calendar, ChatMessage, Config, Conversation, EmployeeDraft, HttpWorkflowClient, LocalAssistant,
    MetricsStore, Provider, Reply, Responder, ScheduleBus, SchedulePlanEvent,
};
use tokio::sync::{broadcast, mpsc};

use crate::tui::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Buttons on the employee summary card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardButton {
    Edit,
    Confirm,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,

    // Input buffer
    pub input: String,
    pub cursor: usize, // cursor position in input, in chars

    // Conversation state
    pub conversation: Conversation,
    pub metrics: MetricsStore,
    pub provider: Provider,
    pub provider_name: String,
    pub base_url: String,
    responder: Responder,
    events: mpsc::UnboundedSender<AppEvent>,

    // Calendar listening on the schedule bus
    pub bus: ScheduleBus,
    pub calendar: Calendar,
    calendar_rx: broadcast::Receiver<SchedulePlanEvent>,
    pub show_calendar: bool,

    // Chat scrolling (updated during render)
    pub chat_scroll: u16,
    pub chat_max_scroll: u16,
    pub follow_bottom: bool,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // One-line footer notice
    pub status: Option<String>,
}

impl App {
    pub fn new(config: &Config, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        let engine = Arc::new(HttpWorkflowClient::new(
            &config.base_url,
            &config.user_id,
            &config.thread_id,
        ));
        let responder = Responder::new(
            LocalAssistant::new(config.default_start_date),
            engine,
            Duration::from_millis(config.reply_delay_ms),
        );
        Self::with_responder(config, responder, events)
    }

    pub fn with_responder(
        config: &Config,
        responder: Responder,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let bus = ScheduleBus::new();
        let calendar_rx = bus.subscribe();

        Self {
            should_quit: false,
            input_mode: InputMode::Editing,

            input: String::new(),
            cursor: 0,

            conversation: Conversation::new(),
            metrics: MetricsStore::new(),
            provider: config.provider(),
            provider_name: config.provider_name.clone(),
            base_url: config.base_url.clone(),
            responder,
            events,

            bus,
            calendar: Calendar::new(),
            calendar_rx,
            show_calendar: true,

            chat_scroll: 0,
            chat_max_scroll: 0,
            follow_bottom: true,

            animation_frame: 0,

            status: None,
        }
    }

    /// Send the input buffer. The reply arrives later as `AppEvent::Reply`.
    pub fn submit(&mut self) {
        let Some(text) = self.conversation.submit(&self.input) else {
            return;
        };
        self.input.clear();
        self.cursor = 0;
        self.follow_bottom = true;

        tracing::info!(provider = self.provider.as_str(), "requesting reply");

        let responder = self.responder.clone();
        let provider = self.provider;
        let metrics = self.metrics.snapshot();
        let events = self.events.clone();
        tokio::spawn(async move {
            let reply = responder.respond(provider, text, metrics).await;
            if events.send(AppEvent::Reply(reply)).is_err() {
                tracing::debug!("reply arrived after the event loop closed");
            }
        });
    }

    pub fn apply_reply(&mut self, reply: Reply) {
        // Plans are dated by the UTC calendar day
        let today = Utc::now().date_naive();
        self.conversation
            .apply(reply, &mut self.metrics, &self.bus, today);
        self.calendar.drain(&mut self.calendar_rx);
        self.follow_bottom = true;
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.conversation.is_awaiting_reply() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn toggle_provider(&mut self) {
        self.provider = self.provider.toggled();
        if let Err(err) = Config::save_provider(self.provider) {
            tracing::warn!(error = %err, "could not save provider");
        }
        self.status = Some(format!("Using {}", self.provider.display_name()));
    }

    /// Most recent employee summary card, if any
    pub fn latest_employee_form(&self) -> Option<&EmployeeDraft> {
        self.conversation
            .messages()
            .iter()
            .rev()
            .find_map(|m: &ChatMessage| match &m.action {
                Some(MessageAction::RenderEmployeeForm(draft)) => Some(draft),
                _ => None,
            })
    }

    /// Card buttons only log; saving happens through the workflow engine
    pub fn press_card_button(&mut self, button: CardButton) {
        let Some(name) = self.latest_employee_form().map(|d| d.name.clone()) else {
            return;
        };
        match button {
            CardButton::Edit => {
                tracing::info!(employee = %name, "edit clicked");
                self.status = Some(format!("Edit clicked for {}", name));
            }
            CardButton::Confirm => {
                tracing::info!(employee = %name, "confirm clicked");
                self.status = Some(format!("Confirm clicked for {}", name));
            }
        }
    }

    /// Rows rewrap at the new width, so the old offset no longer points
    /// at the same text. Jump back to the newest message.
    pub fn resize(&mut self, width: u16, height: u16) {
        tracing::debug!(width, height, "terminal resized");
        self.follow_bottom = true;
    }

    // Chat scrolling
    pub fn scroll_up(&mut self, lines: u16) {
        self.follow_bottom = false;
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(self.chat_max_scroll);
        if self.chat_scroll >= self.chat_max_scroll {
            self.follow_bottom = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.follow_bottom = false;
        self.chat_scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow_bottom = true;
        self.chat_scroll = self.chat_max_scroll;
    }

    // Input editing
    pub fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.input, self.cursor);
        self.input.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.input, self.cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.input.chars().count() {
            let byte_pos = char_to_byte_index(&self.input, self.cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.input.chars().count();
    }
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
