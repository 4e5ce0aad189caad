//! Schedule notifications for calendar views
//!
//! After a hire, the conversation broadcasts a one-day plan. Any number of
//! listeners can pick it up; nobody acknowledges it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::employee::Employee;
use crate::schedule::{ScheduleDay, Shift, ShiftAssignment};

pub const SCHEDULE_EVENT_NAME: &str = "crewdesk:schedule";
pub const SCHEDULE_EVENT_VERSION: u32 = 1;

const BUS_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub morning: Vec<ShiftAssignment>,
}

/// Payload of the `crewdesk:schedule` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePlanEvent {
    pub version: u32,
    pub plan: Vec<PlannedDay>,
}

impl SchedulePlanEvent {
    pub fn new(plan: Vec<PlannedDay>) -> Self {
        Self {
            version: SCHEDULE_EVENT_VERSION,
            plan,
        }
    }

    /// Put a freshly added employee on the morning shift of `date`
    pub fn for_new_hire(employee: &Employee, date: NaiveDate) -> Self {
        Self::new(vec![PlannedDay {
            date,
            morning: vec![ShiftAssignment {
                id: employee.id.clone(),
                name: employee.full_name(),
            }],
        }])
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleBus {
    tx: broadcast::Sender<SchedulePlanEvent>,
}

impl ScheduleBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SchedulePlanEvent> {
        self.tx.subscribe()
    }

    /// Fire and forget. Returns how many listeners got the event.
    pub fn publish(&self, event: SchedulePlanEvent) -> usize {
        let days = event.plan.len();
        match self.tx.send(event) {
            Ok(listeners) => {
                tracing::info!(event = SCHEDULE_EVENT_NAME, days, listeners, "schedule plan published");
                listeners
            }
            Err(_) => {
                tracing::debug!(event = SCHEDULE_EVENT_NAME, "schedule plan published with no listeners");
                0
            }
        }
    }
}

impl Default for ScheduleBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Calendar state rebuilt from schedule plan events
#[derive(Debug, Clone, Default)]
pub struct Calendar {
    days: BTreeMap<NaiveDate, ScheduleDay>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a plan into the calendar. Returns the number of new assignments.
    pub fn reconcile(&mut self, event: &SchedulePlanEvent) -> usize {
        if event.version != SCHEDULE_EVENT_VERSION {
            tracing::warn!(version = event.version, "ignoring schedule plan with unknown version");
            return 0;
        }

        let mut added = 0;
        for planned in &event.plan {
            let day = self
                .days
                .entry(planned.date)
                .or_insert_with(|| ScheduleDay::new(planned.date));
            for assignment in &planned.morning {
                if day.assign(Shift::Morning, assignment.clone()) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Pull every pending event off a bus receiver without blocking
    pub fn drain(&mut self, rx: &mut broadcast::Receiver<SchedulePlanEvent>) -> usize {
        let mut added = 0;
        loop {
            match rx.try_recv() {
                Ok(event) => added += self.reconcile(&event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "calendar fell behind the schedule bus");
                }
                Err(_) => break,
            }
        }
        added
    }

    pub fn day(&self, date: NaiveDate) -> Option<&ScheduleDay> {
        self.days.get(&date)
    }

    pub fn days(&self) -> impl Iterator<Item = &ScheduleDay> {
        self.days.values()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
