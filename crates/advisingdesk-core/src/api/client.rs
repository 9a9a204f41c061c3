//! API client for the advising backend.
//!
//! This module provides the `ApiClient` struct for making GET requests to
//! the backend, and the `AdvisingApi` trait it implements.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::models::{
    Advisor, DepartmentStats, HealthReport, ProgressRecord, Student, StudentDetail,
};

use super::ApiError;

/// Backend endpoint paths.
pub mod endpoints {
    pub const HEALTH: &str = "/api/health";
    pub const INFO: &str = "/api/info";
    pub const DEPARTMENT_STATS: &str = "/api/department-stats";
    pub const STUDENTS: &str = "/api/students";
    pub const ADVISORS: &str = "/api/advisors";
    pub const ACADEMIC_PROGRESS: &str = "/api/academic-progress";
}

/// Everything the viewer needs from a backend.
///
/// `ApiClient` is the real implementation; tests script their own.
#[async_trait]
pub trait AdvisingApi: Send + Sync {
    async fn health(&self) -> Result<HealthReport, ApiError>;

    /// Free-form database info; only ever logged.
    async fn info(&self) -> Result<Value, ApiError>;

    async fn department_stats(&self) -> Result<DepartmentStats, ApiError>;

    async fn students(&self) -> Result<Vec<Student>, ApiError>;

    /// Denormalized single-student view. `ApiError::NotFound` when the
    /// backend has no such student.
    async fn student_detail(&self, student_id: &str) -> Result<StudentDetail, ApiError>;

    async fn advisors(&self) -> Result<Vec<Advisor>, ApiError>;

    async fn academic_progress(&self) -> Result<Vec<ProgressRecord>, ApiError>;

    /// Untyped body of any endpoint, for the debug view and `--dump`.
    async fn raw(&self, endpoint: &str) -> Result<Value, ApiError>;
}

/// API client for the advising backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Arc<str>,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5000`).
    ///
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// URL for `/api/students/<id>` with the id percent-encoded as one segment.
    fn student_url(&self, student_id: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.url(endpoints::STUDENTS))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .push(student_id);
        Ok(url)
    }

    /// Send a GET and return the status and body, whatever the status.
    async fn send(&self, url: Url, endpoint: &str) -> Result<(StatusCode, String), ApiError> {
        debug!(endpoint = endpoint, "GET");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    /// Send a GET and return the body of a successful response.
    async fn get_body(&self, url: Url, endpoint: &str) -> Result<String, ApiError> {
        let (status, body) = self.send(url, endpoint).await?;

        if status.is_success() {
            Ok(body)
        } else {
            debug!(endpoint = endpoint, status = status.as_u16(), "Request failed");
            Err(ApiError::from_status(status.as_u16(), &body))
        }
    }

    /// GET `endpoint` and parse the body into `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = Url::parse(&self.url(endpoint))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", endpoint, e)))?;
        let body = self.get_body(url, endpoint).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::parse(endpoint, e))
    }
}

#[async_trait]
impl AdvisingApi for ApiClient {
    /// The health body is read on any status; a degraded backend answers
    /// with an error status and a report saying why.
    async fn health(&self) -> Result<HealthReport, ApiError> {
        let url = Url::parse(&self.url(endpoints::HEALTH))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        let (status, body) = self.send(url, endpoints::HEALTH).await?;

        match serde_json::from_str::<HealthReport>(&body) {
            Ok(report) => Ok(report),
            Err(_) if !status.is_success() => Err(ApiError::from_status(status.as_u16(), &body)),
            Err(e) => Err(ApiError::parse(endpoints::HEALTH, e)),
        }
    }

    async fn info(&self) -> Result<Value, ApiError> {
        self.fetch_json(endpoints::INFO).await
    }

    async fn department_stats(&self) -> Result<DepartmentStats, ApiError> {
        self.fetch_json(endpoints::DEPARTMENT_STATS).await
    }

    async fn students(&self) -> Result<Vec<Student>, ApiError> {
        let students: Vec<Student> = self.fetch_json(endpoints::STUDENTS).await?;
        debug!(count = students.len(), "Students fetched");
        Ok(students)
    }

    async fn student_detail(&self, student_id: &str) -> Result<StudentDetail, ApiError> {
        let url = self.student_url(student_id)?;
        let endpoint = url.path().to_string();

        let body = match self.get_body(url, &endpoint).await {
            Ok(body) => body,
            Err(e) if e.is_not_found() => return Err(ApiError::NotFound(student_id.to_string())),
            Err(e) => return Err(e),
        };

        let value: Value =
            serde_json::from_str(&body).map_err(|e| ApiError::parse(&endpoint, e))?;
        if !StudentDetail::is_present(&value) {
            return Err(ApiError::NotFound(student_id.to_string()));
        }
        serde_json::from_value(value).map_err(|e| ApiError::parse(&endpoint, e))
    }

    async fn advisors(&self) -> Result<Vec<Advisor>, ApiError> {
        let advisors: Vec<Advisor> = self.fetch_json(endpoints::ADVISORS).await?;
        debug!(count = advisors.len(), "Advisors fetched");
        Ok(advisors)
    }

    async fn academic_progress(&self) -> Result<Vec<ProgressRecord>, ApiError> {
        let progress: Vec<ProgressRecord> = self.fetch_json(endpoints::ACADEMIC_PROGRESS).await?;
        debug!(count = progress.len(), "Progress records fetched");
        Ok(progress)
    }

    async fn raw(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.fetch_json(endpoint).await
    }
}

// ============================================================================
// Tests
// ============================================================================
