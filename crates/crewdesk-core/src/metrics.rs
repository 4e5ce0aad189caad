use serde::{Deserialize, Serialize};

use crate::employee::Employee;

/// Aggregate counters derived from accepted hires
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessMetrics {
    pub total_employees: u32,
    pub total_hours: f64,
    pub total_payroll: f64,
}

/// Owner of the business metrics.
///
/// The store is handed around explicitly rather than living in a global, and
/// `record_hire` is the only way to change it. Callers apply hires from the
/// UI loop one at a time, so two replies finishing out of order both count.
#[derive(Debug, Clone, Default)]
pub struct MetricsStore {
    metrics: BusinessMetrics,
}

impl MetricsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: BusinessMetrics) -> Self {
        Self { metrics }
    }

    pub fn snapshot(&self) -> BusinessMetrics {
        self.metrics
    }

    pub fn record_hire(&mut self, employee: &Employee) -> BusinessMetrics {
        self.metrics.total_employees += 1;
        self.metrics.total_hours += employee.hours_per_week;
        self.metrics.total_payroll += employee.weekly_payroll();

        tracing::info!(
            employee = %employee.full_name(),
            total_employees = self.metrics.total_employees,
            total_hours = self.metrics.total_hours,
            total_payroll = self.metrics.total_payroll,
            "business metrics updated"
        );

        self.metrics
    }
}
