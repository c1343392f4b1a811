//! Top-level run driver: sequential, per-connection synchronization.
//!
//! Connections are processed one at a time; the polling sleep blocks the
//! whole run. Each connection gets its own logger, adapter and client, so
//! nothing leaks between tenants.

use std::path::PathBuf;
use std::time::Duration;

use uuid::Uuid;

use crate::api::{HrApiClient, JobHandle};
use crate::config::{ConnectionConfig, SyncConfig};
use crate::error::SyncError;
use crate::logger::{Level, Logger};
use crate::poller::PollPolicy;
use crate::records::ImportKind;
use crate::ui::PollProgress;
use crate::{orchestrator, poller, report, source, ui};

/// What the command line asked of this run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Enabled kinds, already in submission order.
    pub kinds: Vec<ImportKind>,
    /// Process only the connection with this name.
    pub only_connection: Option<String>,
    /// Fetch and display without submitting anything.
    pub dry_run: bool,
    pub verbose: bool,
}

/// Runs every configured connection in sequence.
///
/// Configuration and transport failures abort the run. Failures scoped to
/// one connection abort only that connection when `continue_on_error` is
/// set; otherwise they abort the run too.
pub async fn run(config: &SyncConfig, options: &RunOptions) -> Result<(), SyncError> {
    let run_id = Uuid::new_v4();
    let policy = PollPolicy {
        interval: Duration::from_millis(config.poll.interval_ms),
        max_rounds: config.poll.max_rounds,
    };

    for connection in &config.connections {
        let log = logger_for(connection, options.verbose);

        if let Some(only) = &options.only_connection {
            if only != &connection.name {
                log.write(
                    Level::Info,
                    &format!("Skipping import for '{}'", connection.name),
                );
                continue;
            }
        }

        log.write(
            Level::Info,
            &format!("Running import for '{}' (run {run_id})", connection.name),
        );

        match run_connection(connection, &log, options, &policy).await {
            Ok(()) => {}
            Err(e) if config.continue_on_error && e.is_connection_scoped() => {
                log.write(
                    Level::Critical,
                    &format!("Import for '{}' failed: {e}", connection.name),
                );
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// One connection, start to finish: submit every enabled kind, then poll
/// every produced handle to a terminal state, then report.
async fn run_connection(
    connection: &ConnectionConfig,
    log: &Logger,
    options: &RunOptions,
    policy: &PollPolicy,
) -> Result<(), SyncError> {
    let source = source::resolve(&connection.source);
    let api = HrApiClient::new(
        &connection.api_server,
        &connection.client_id,
        &connection.client_secret,
    );

    let submissions = orchestrator::submit_all(
        &api,
        source.as_ref(),
        log,
        &connection.organization_id,
        &options.kinds,
        options.dry_run,
    )
    .await?;

    // Dry-run, or every kind suppressed: nothing to reconcile.
    if submissions.is_empty() {
        return Ok(());
    }

    let handles: Vec<JobHandle> = submissions.iter().map(|s| s.handle.clone()).collect();

    let progress = PollProgress::start(handles.len());
    let polled = poller::await_all(
        &api,
        &connection.organization_id,
        &handles,
        policy,
        Some(&progress),
    )
    .await;
    progress.finish();

    let statuses = polled?;
    report::report(log, &statuses);
    ui::print_summary(&statuses);

    Ok(())
}

fn logger_for(connection: &ConnectionConfig, verbose: bool) -> Logger {
    if verbose {
        Logger::new(connection.log_file.clone().map(PathBuf::from), Level::Debug)
    } else {
        Logger::for_connection(
            connection.log_file.as_deref(),
            connection.log_level.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::{PollConfig, SourceConfig};
    use crate::records::{Absence, CostCenter, Department, Employee};
    use crate::report::events_for;
    use crate::source::{RecordSource, SampleSource, SourceError};

    fn connection(server_url: &str) -> ConnectionConfig {
        ConnectionConfig {
            name: "Test".into(),
            api_server: server_url.into(),
            client_id: "id".into(),
            client_secret: "secret".into(),
            organization_id: "org-1".into(),
            log_file: None,
            log_level: None,
            source: SourceConfig::Sample,
        }
    }

    fn config(server_url: &str) -> SyncConfig {
        SyncConfig {
            continue_on_error: false,
            poll: PollConfig {
                interval_ms: 1,
                max_rounds: None,
            },
            connections: vec![connection(server_url)],
        }
    }

    fn options(kinds: Vec<ImportKind>, dry_run: bool) -> RunOptions {
        RunOptions {
            kinds,
            only_connection: None,
            dry_run,
            verbose: false,
        }
    }

    #[tokio::test]
    async fn dry_run_makes_no_network_calls() {
        // Nothing listens here; any request would fail the run.
        let config = config("http://127.0.0.1:1");
        let result = run(&config, &options(ImportKind::ALL.to_vec(), true)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn connection_filter_skips_other_tenants() {
        let config = config("http://127.0.0.1:1");
        let opts = RunOptions {
            kinds: ImportKind::ALL.to_vec(),
            only_connection: Some("SomeoneElse".into()),
            dry_run: false,
            verbose: false,
        };
        // The only connection is filtered out, so the dead endpoint is
        // never contacted.
        assert!(run(&config, &opts).await.is_ok());
    }

    /// Adapter returning exactly two employees and nothing else.
    struct TwoEmployees;

    impl RecordSource for TwoEmployees {
        fn departments(&self) -> Result<Vec<Department>, SourceError> {
            Ok(vec![])
        }

        fn cost_centers(&self) -> Result<Vec<CostCenter>, SourceError> {
            Ok(vec![])
        }

        fn personnel(&self) -> Result<Vec<Employee>, SourceError> {
            let mut personnel = SampleSource.personnel()?;
            personnel.truncate(2);
            Ok(personnel)
        }

        fn absences(&self) -> Result<Vec<Absence>, SourceError> {
            Ok(vec![])
        }
    }

    // Employee-only import of two records: submission yields "abc123",
    // polling sees IN_PROGRESS once and then DONE with no warnings, and the
    // reporter produces exactly one NOTICE and nothing at higher severities.
    #[tokio::test]
    async fn employee_import_end_to_end() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/hr"))
            .and(header("X-API-key", "id:secret"))
            .and(body_string_contains("importEmployees"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"importEmployees": {"messageId": "abc123"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let in_progress = json!({
            "data": {"processingStatusWithVerify": [{
                "messageId": "abc123",
                "importType": "EMPLOYEES",
                "importStatus": "IN_PROGRESS",
                "timestamp": "2021-02-03T04:05:06Z"
            }]}
        });
        let done = json!({
            "data": {"processingStatusWithVerify": [{
                "messageId": "abc123",
                "importType": "EMPLOYEES",
                "importStatus": "DONE",
                "timestamp": "2021-02-03T04:05:09Z"
            }]}
        });

        // First status round answers IN_PROGRESS and expires; the second
        // mock takes over from there.
        Mock::given(method("POST"))
            .and(path("/hr"))
            .and(body_string_contains("processingStatusWithVerify"))
            .respond_with(ResponseTemplate::new(200).set_body_json(in_progress))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/hr"))
            .and(body_string_contains("processingStatusWithVerify"))
            .respond_with(ResponseTemplate::new(200).set_body_json(done))
            .mount(&server)
            .await;

        let api = HrApiClient::new(&server.uri(), "id", "secret");
        let log = Logger::new(None, Level::Notice);
        let policy = PollPolicy {
            interval: Duration::from_millis(1),
            max_rounds: None,
        };

        let submissions = orchestrator::submit_all(
            &api,
            &TwoEmployees,
            &log,
            "org-1",
            &[ImportKind::Employee],
            false,
        )
        .await
        .unwrap();

        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].handle, "abc123");

        let handles: Vec<JobHandle> = submissions.iter().map(|s| s.handle.clone()).collect();
        let statuses = poller::await_all(&api, "org-1", &handles, &policy, None)
            .await
            .unwrap();

        assert_eq!(statuses.len(), 1);
        let events = events_for(&statuses[0]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::Notice);
        assert!(events[0].message.contains("DONE"));
        assert!(events[0].message.contains("abc123"));
    }

    #[tokio::test]
    async fn continue_on_error_reaches_later_connections() {
        let server = MockServer::start().await;

        // Every submission is rejected by the platform.
        Mock::given(method("POST"))
            .and(path("/hr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{"message": "bad ID", "locations": [{"line": 3, "column": 12}]}]
            })))
            .mount(&server)
            .await;

        let mut config = config(&server.uri());
        config.connections.push(connection(&server.uri()));
        config.connections[1].name = "Second".into();

        let opts = options(vec![ImportKind::Department], false);

        // Fail-fast by default: the first rejection ends the run.
        let err = run(&config, &opts).await.unwrap_err();
        assert!(matches!(err, SyncError::Api(_)));
        let first_pass = server.received_requests().await.unwrap().len();
        assert_eq!(first_pass, 1);

        // With isolation on, the second connection is still attempted.
        config.continue_on_error = true;
        assert!(run(&config, &opts).await.is_ok());
        let second_pass = server.received_requests().await.unwrap().len() - first_pass;
        assert_eq!(second_pass, 2);
    }
}
