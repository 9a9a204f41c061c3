use serde::{Deserialize, Serialize};

/// Body of `/api/health`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub connected: Option<bool>,
}

impl HealthReport {
    /// Only the literal status `connected` counts.
    pub fn is_connected(&self) -> bool {
        self.status.as_deref() == Some("connected")
    }
}

/// Backend connection state.
///
/// Starts `Unknown`; a health check moves it to `Connected` or
/// `Disconnected`, where it stays until the user asks for another check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Unknown,
    Connected {
        database: Option<String>,
    },
    Disconnected {
        /// False when no response came back at all.
        reachable: bool,
    },
}

impl ConnectionStatus {
    pub fn from_report(report: &HealthReport) -> Self {
        if report.is_connected() {
            ConnectionStatus::Connected {
                database: report.database.clone(),
            }
        } else {
            ConnectionStatus::Disconnected { reachable: true }
        }
    }

    pub fn unreachable() -> Self {
        ConnectionStatus::Disconnected { reachable: false }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected { .. })
    }

    pub fn label(&self) -> String {
        match self {
            ConnectionStatus::Unknown => "Checking connection...".to_string(),
            ConnectionStatus::Connected { database: Some(db) } => format!("Connected to {}", db),
            ConnectionStatus::Connected { database: None } => "Connected".to_string(),
            ConnectionStatus::Disconnected { reachable: true } => "Connection failed".to_string(),
            ConnectionStatus::Disconnected { reachable: false } => {
                "Cannot connect to server".to_string()
            }
        }
    }
}
