//! Load sequencing for the viewer.
//!
//! Loads run in spawned tasks and report back as `LoadEvent`s over an MPSC
//! channel. The receiving side is the only writer of the `Store`.
//!
//! Bootstrap order:
//!
//! 1. health check
//! 2. department info (logged), only when the health check says connected
//! 3. advisors, students, progress and department stats, concurrently
//! 4. `BootstrapComplete` once all of step 3 has reported
//!
//! Every load reports its own failure; one failing load never stops the
//! others.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::{endpoints, AdvisingApi, ApiError};
use crate::models::{
    Advisor, ConnectionStatus, DepartmentStats, ProgressRecord, Student, StudentDetail,
};
use crate::store::{LoadKind, LoadTicket, Store};

/// Result of a load, sent from the load task to the application.
#[derive(Debug)]
pub enum LoadEvent {
    /// Health check finished
    Connection(LoadTicket, ConnectionStatus),
    Advisors(LoadTicket, Vec<Advisor>),
    Students(LoadTicket, Vec<Student>),
    Progress(LoadTicket, Vec<ProgressRecord>),
    DepartmentStats(LoadTicket, DepartmentStats),
    StudentDetail(LoadTicket, Box<StudentDetail>),
    /// Detail lookup for this id found nothing
    StudentNotFound(LoadTicket, String),
    /// Raw JSON for the debug view (endpoint, pretty-printed body or error)
    Debug(String, Result<String, String>),
    /// A load failed; message is ready to show to the user
    Failed { ticket: LoadTicket, message: String },
    /// Every bootstrap collection load has reported
    BootstrapComplete,
}

/// A single load the application can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    Health,
    Advisors,
    Students,
    Progress,
    DepartmentStats,
    StudentDetail(String),
}

impl LoadRequest {
    pub fn kind(&self) -> LoadKind {
        match self {
            LoadRequest::Health => LoadKind::Health,
            LoadRequest::Advisors => LoadKind::Advisors,
            LoadRequest::Students => LoadKind::Students,
            LoadRequest::Progress => LoadKind::Progress,
            LoadRequest::DepartmentStats => LoadKind::DepartmentStats,
            LoadRequest::StudentDetail(_) => LoadKind::StudentDetail,
        }
    }
}

/// Tickets for every load in one bootstrap run.
#[derive(Debug, Clone, Copy)]
pub struct BootstrapTickets {
    pub health: LoadTicket,
    pub advisors: LoadTicket,
    pub students: LoadTicket,
    pub progress: LoadTicket,
    pub department_stats: LoadTicket,
}

impl BootstrapTickets {
    pub fn issue(store: &mut Store) -> Self {
        Self {
            health: store.issue_ticket(LoadKind::Health),
            advisors: store.issue_ticket(LoadKind::Advisors),
            students: store.issue_ticket(LoadKind::Students),
            progress: store.issue_ticket(LoadKind::Progress),
            department_stats: store.issue_ticket(LoadKind::DepartmentStats),
        }
    }
}

/// Helper to send load events, logging any channel errors
async fn send_event(tx: &mpsc::Sender<LoadEvent>, event: LoadEvent) {
    if let Err(e) = tx.send(event).await {
        error!(error = %e, "Failed to send load event - channel closed");
    }
}

/// Turn a fetch result into an event, logging failures.
fn into_event<T>(
    ticket: LoadTicket,
    result: Result<T, ApiError>,
    wrap: impl FnOnce(LoadTicket, T) -> LoadEvent,
) -> LoadEvent {
    match result {
        Ok(data) => {
            debug!(kind = ?ticket.kind, "Load succeeded");
            wrap(ticket, data)
        }
        Err(e) => {
            error!(kind = ?ticket.kind, error = %e, "Load failed");
            LoadEvent::Failed {
                ticket,
                message: e.to_string(),
            }
        }
    }
}

/// Check backend health; when connected, log the department info.
pub async fn check_connection(
    api: &dyn AdvisingApi,
    ticket: LoadTicket,
    tx: &mpsc::Sender<LoadEvent>,
) -> ConnectionStatus {
    let status = match api.health().await {
        Ok(report) => ConnectionStatus::from_report(&report),
        Err(e) if e.status().is_some() => {
            warn!(error = %e, "Health check answered with an error status");
            ConnectionStatus::Disconnected { reachable: true }
        }
        Err(e) => {
            error!(error = %e, "Connection check failed");
            ConnectionStatus::unreachable()
        }
    };
    info!(status = %status.label(), "Connection checked");

    send_event(tx, LoadEvent::Connection(ticket, status.clone())).await;

    if status.is_connected() {
        log_department_info(api).await;
    }
    status
}

async fn log_department_info(api: &dyn AdvisingApi) {
    match api.info().await {
        Ok(info) => info!(info = %info, "Database info"),
        Err(e) => warn!(error = %e, "Error loading database info"),
    }
}

/// Run one load and report its outcome.
pub async fn run(
    api: &dyn AdvisingApi,
    request: LoadRequest,
    ticket: LoadTicket,
    tx: &mpsc::Sender<LoadEvent>,
) {
    let event = match request {
        LoadRequest::Health => {
            check_connection(api, ticket, tx).await;
            return;
        }
        LoadRequest::Advisors => into_event(ticket, api.advisors().await, LoadEvent::Advisors),
        LoadRequest::Students => into_event(ticket, api.students().await, LoadEvent::Students),
        LoadRequest::Progress => {
            into_event(ticket, api.academic_progress().await, LoadEvent::Progress)
        }
        LoadRequest::DepartmentStats => into_event(
            ticket,
            api.department_stats().await,
            LoadEvent::DepartmentStats,
        ),
        LoadRequest::StudentDetail(student_id) => match api.student_detail(&student_id).await {
            Ok(detail) => LoadEvent::StudentDetail(ticket, Box::new(detail)),
            Err(e) if e.is_not_found() => {
                debug!(student_id = %student_id, "Student not found");
                LoadEvent::StudentNotFound(ticket, student_id)
            }
            Err(e) => {
                error!(student_id = %student_id, error = %e, "Error loading student details");
                LoadEvent::Failed {
                    ticket,
                    message: e.to_string(),
                }
            }
        },
    };
    send_event(tx, event).await;
}

/// Initial load: health, gated info, then the four collections in parallel.
pub async fn bootstrap(
    api: Arc<dyn AdvisingApi>,
    tickets: BootstrapTickets,
    tx: mpsc::Sender<LoadEvent>,
) {
    info!("Bootstrap started");
    check_connection(api.as_ref(), tickets.health, &tx).await;

    // Independent loads; renderers that cross-reference wait for the join
    tokio::join!(
        run(api.as_ref(), LoadRequest::Advisors, tickets.advisors, &tx),
        run(api.as_ref(), LoadRequest::Students, tickets.students, &tx),
        run(api.as_ref(), LoadRequest::Progress, tickets.progress, &tx),
        run(
            api.as_ref(),
            LoadRequest::DepartmentStats,
            tickets.department_stats,
            &tx
        ),
    );

    info!("Bootstrap complete");
    send_event(&tx, LoadEvent::BootstrapComplete).await;
}

/// Fetch an endpoint's raw JSON, pretty-printed, for the debug view.
pub async fn dump(api: &dyn AdvisingApi, endpoint: &str, tx: &mpsc::Sender<LoadEvent>) {
    let result = api
        .raw(endpoint)
        .await
        .map_err(|e| e.to_string())
        .and_then(|value: Value| serde_json::to_string_pretty(&value).map_err(|e| e.to_string()));
    send_event(tx, LoadEvent::Debug(endpoint.to_string(), result)).await;
}

/// Endpoint the debug view dumps.
pub const DEBUG_ENDPOINT: &str = endpoints::ADVISORS;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Backend double that records calls and answers from fixed data.
    #[derive(Default)]
    struct ScriptedApi {
        calls: Mutex<Vec<String>>,
        health_status: String,
        fail_students: Option<(u16, String)>,
        detail: Option<Value>,
    }

    impl ScriptedApi {
        fn connected() -> Self {
            Self {
                health_status: "connected".to_string(),
                ..Default::default()
            }
        }

        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AdvisingApi for ScriptedApi {
        async fn health(&self) -> Result<crate::models::HealthReport, ApiError> {
            self.record("health");
            Ok(serde_json::from_value(json!({ "status": self.health_status })).unwrap())
        }

        async fn info(&self) -> Result<Value, ApiError> {
            self.record("info");
            Ok(json!({ "collections": ["students"] }))
        }

        async fn department_stats(&self) -> Result<DepartmentStats, ApiError> {
            self.record("department_stats");
            Ok(DepartmentStats::default())
        }

        async fn students(&self) -> Result<Vec<Student>, ApiError> {
            self.record("students");
            match &self.fail_students {
                Some((status, body)) => Err(ApiError::from_status(*status, body)),
                None => Ok(vec![serde_json::from_value(json!({"studentId": "S1"})).unwrap()]),
            }
        }

        async fn student_detail(&self, student_id: &str) -> Result<StudentDetail, ApiError> {
            self.record("student_detail");
            match &self.detail {
                Some(value) if StudentDetail::is_present(value) => {
                    Ok(serde_json::from_value(value.clone()).unwrap())
                }
                _ => Err(ApiError::NotFound(student_id.to_string())),
            }
        }

        async fn advisors(&self) -> Result<Vec<Advisor>, ApiError> {
            self.record("advisors");
            Ok(vec![])
        }

        async fn academic_progress(&self) -> Result<Vec<ProgressRecord>, ApiError> {
            self.record("academic_progress");
            Ok(vec![])
        }

        async fn raw(&self, endpoint: &str) -> Result<Value, ApiError> {
            self.record(endpoint);
            Ok(json!([{ "advisorId": "A1" }]))
        }
    }

    async fn collect(mut rx: mpsc::Receiver<LoadEvent>) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_bootstrap_connected_loads_everything() {
        let api = Arc::new(ScriptedApi::connected());
        let mut store = Store::new();
        let tickets = BootstrapTickets::issue(&mut store);
        let (tx, rx) = mpsc::channel(32);

        bootstrap(api.clone(), tickets, tx).await;
        let events = collect(rx).await;

        let calls = api.calls();
        assert_eq!(&calls[..2], &["health", "info"]);
        for call in ["advisors", "students", "academic_progress", "department_stats"] {
            assert!(calls.contains(&call.to_string()), "missing {}", call);
        }

        assert!(matches!(events.first(), Some(LoadEvent::Connection(_, s)) if s.is_connected()));
        assert!(matches!(events.last(), Some(LoadEvent::BootstrapComplete)));
        assert_eq!(events.len(), 6);
    }

    #[tokio::test]
    async fn test_info_skipped_when_disconnected() {
        let api = Arc::new(ScriptedApi {
            health_status: "error".to_string(),
            ..Default::default()
        });
        let mut store = Store::new();
        let tickets = BootstrapTickets::issue(&mut store);
        let (tx, rx) = mpsc::channel(32);

        bootstrap(api.clone(), tickets, tx).await;
        let events = collect(rx).await;

        assert!(!api.calls().contains(&"info".to_string()));
        // Collections still load after a failed health check
        assert!(api.calls().contains(&"students".to_string()));
        assert!(matches!(
            events.first(),
            Some(LoadEvent::Connection(_, ConnectionStatus::Disconnected { reachable: true }))
        ));
    }

    #[tokio::test]
    async fn test_failed_load_does_not_abort_others() {
        let api = Arc::new(ScriptedApi {
            fail_students: Some((500, r#"{"error":"db down"}}"#.to_string())),
            ..ScriptedApi::connected()
        });
        let mut store = Store::new();
        let tickets = BootstrapTickets::issue(&mut store);
        let (tx, rx) = mpsc::channel(32);

        bootstrap(api, tickets, tx).await;
        let events = collect(rx).await;

        let failure = events.iter().find_map(|e| match e {
            LoadEvent::Failed { ticket, message } => Some((ticket.kind, message.clone())),
            _ => None,
        });
        assert_eq!(failure, Some((LoadKind::Students, "db down".to_string())));
        assert!(events.iter().any(|e| matches!(e, LoadEvent::Advisors(..))));
        assert!(events.iter().any(|e| matches!(e, LoadEvent::Progress(..))));
        assert!(matches!(events.last(), Some(LoadEvent::BootstrapComplete)));
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let api = ScriptedApi {
            detail: Some(json!({})),
            ..ScriptedApi::connected()
        };
        let mut store = Store::new();
        let ticket = store.issue_ticket(LoadKind::StudentDetail);
        let (tx, rx) = mpsc::channel(4);

        run(&api, LoadRequest::StudentDetail("S404".to_string()), ticket, &tx).await;
        drop(tx);
        let events = collect(rx).await;

        assert!(matches!(&events[..], [LoadEvent::StudentNotFound(_, id)] if id == "S404"));
    }

    #[tokio::test]
    async fn test_detail_found() {
        let api = ScriptedApi {
            detail: Some(json!({"studentId": "S1", "name": "Ada Smith"})),
            ..ScriptedApi::connected()
        };
        let mut store = Store::new();
        let ticket = store.issue_ticket(LoadKind::StudentDetail);
        let (tx, rx) = mpsc::channel(4);

        run(&api, LoadRequest::StudentDetail("S1".to_string()), ticket, &tx).await;
        drop(tx);
        let events = collect(rx).await;

        assert!(matches!(&events[..], [LoadEvent::StudentDetail(_, d)] if d.name() == "Ada Smith"));
    }

    #[tokio::test]
    async fn test_dump_pretty_prints() {
        let api = ScriptedApi::connected();
        let (tx, rx) = mpsc::channel(4);

        dump(&api, DEBUG_ENDPOINT, &tx).await;
        drop(tx);
        let events = collect(rx).await;

        match &events[..] {
            [LoadEvent::Debug(endpoint, Ok(body))] => {
                assert_eq!(endpoint, "/api/advisors");
                assert!(body.contains("\"advisorId\": \"A1\""));
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn test_request_kinds() {
        assert_eq!(LoadRequest::Students.kind(), LoadKind::Students);
        assert_eq!(
            LoadRequest::StudentDetail("S1".to_string()).kind(),
            LoadKind::StudentDetail
        );
    }
}
