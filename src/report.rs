//! Maps terminal job statuses to log events.

use crate::api::{ImportStatus, JobStatus};
use crate::logger::{Level, Logger};

/// One report line at a given severity.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEvent {
    pub level: Level,
    pub message: String,
}

/// Events for a single status: one NOTICE always; one CRITICAL carrying the
/// error text on FAILURE; one ERROR per warning naming the offending record.
pub fn events_for(status: &JobStatus) -> Vec<ReportEvent> {
    let mut events = vec![ReportEvent {
        level: Level::Notice,
        message: format!(
            "{} at {}: message {} status {}",
            status.import_type, status.timestamp, status.message_id, status.import_status
        ),
    }];

    if status.import_status == ImportStatus::Failure {
        events.push(ReportEvent {
            level: Level::Critical,
            message: format!(
                "Error: {}",
                status.error.as_deref().unwrap_or("no error detail provided")
            ),
        });
    }

    for warning in &status.warnings {
        events.push(ReportEvent {
            level: Level::Error,
            message: format!("{} / {}", warning.warning, warning.external_id),
        });
    }

    events
}

/// Writes every status's events through the logger, in the order the last
/// polling round returned them.
pub fn report(log: &Logger, statuses: &[JobStatus]) {
    for status in statuses {
        for event in events_for(status) {
            log.write(event.level, &event.message);
        }
    }
}
