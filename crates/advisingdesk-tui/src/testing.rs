//! Scripted backend shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use advisingdesk_core::models::{
    Advisor, DepartmentStats, HealthReport, ProgressRecord, Student, StudentDetail,
};
use advisingdesk_core::{AdvisingApi, ApiError};

use crate::app::App;

/// Answers from canned JSON and records every call by endpoint name.
pub struct ScriptedApi {
    calls: Mutex<Vec<String>>,
    student_failures: Mutex<VecDeque<(u16, String)>>,
    students: Value,
    advisors: Value,
    progress: Value,
    /// Fixed detail body; when unset the requested id is echoed back.
    detail: Option<Value>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            student_failures: Mutex::new(VecDeque::new()),
            students: json!([]),
            advisors: json!([]),
            progress: json!([]),
            detail: None,
        }
    }

    pub fn with_students(mut self, students: Value) -> Self {
        self.students = students;
        self
    }

    pub fn with_advisors(mut self, advisors: Value) -> Self {
        self.advisors = advisors;
        self
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Fail the next students load with `status` and `body`.
    pub fn failing_students_once(self, status: u16, body: &str) -> Self {
        self.student_failures
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
        self
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl AdvisingApi for ScriptedApi {
    async fn health(&self) -> Result<HealthReport, ApiError> {
        self.record("health");
        Ok(serde_json::from_value(json!({"status": "connected", "database": "advising"})).unwrap())
    }

    async fn info(&self) -> Result<Value, ApiError> {
        self.record("info");
        Ok(json!({}))
    }

    async fn department_stats(&self) -> Result<DepartmentStats, ApiError> {
        self.record("department_stats");
        Ok(DepartmentStats::default())
    }

    async fn students(&self) -> Result<Vec<Student>, ApiError> {
        self.record("students");
        if let Some((status, body)) = self.student_failures.lock().unwrap().pop_front() {
            return Err(ApiError::from_status(status, &body));
        }
        Ok(serde_json::from_value(self.students.clone()).unwrap())
    }

    async fn student_detail(&self, student_id: &str) -> Result<StudentDetail, ApiError> {
        self.record("student_detail");
        let body = self
            .detail
            .clone()
            .unwrap_or_else(|| json!({"studentId": student_id, "name": student_id}));
        if !StudentDetail::is_present(&body) {
            return Err(ApiError::NotFound(student_id.to_string()));
        }
        Ok(serde_json::from_value(body).unwrap())
    }

    async fn advisors(&self) -> Result<Vec<Advisor>, ApiError> {
        self.record("advisors");
        Ok(serde_json::from_value(self.advisors.clone()).unwrap())
    }

    async fn academic_progress(&self) -> Result<Vec<ProgressRecord>, ApiError> {
        self.record("academic_progress");
        Ok(serde_json::from_value(self.progress.clone()).unwrap())
    }

    async fn raw(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.record(endpoint);
        Ok(self.advisors.clone())
    }
}

/// Receive and apply `count` load events.
pub async fn pump(app: &mut App, count: usize) {
    for _ in 0..count {
        let event = tokio::time::timeout(Duration::from_secs(5), app.next_event())
            .await
            .expect("timed out waiting for a load event")
            .expect("load channel closed");
        app.process_load_event(event);
    }
}

/// Flatten rendered lines into plain strings.
pub fn text(lines: &[ratatui::text::Line<'_>]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}

/// Whether any rendered line contains `needle`.
pub fn contains(lines: &[ratatui::text::Line<'_>], needle: &str) -> bool {
    text(lines).iter().any(|l| l.contains(needle))
}
