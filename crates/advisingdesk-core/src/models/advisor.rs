use serde::{Deserialize, Serialize};

use super::de;

/// Department shown when neither the advisor nor their personal info has one.
pub const DEFAULT_DEPARTMENT: &str = "Computer Science";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorPersonalInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advisor {
    pub advisor_id: String,
    #[serde(default)]
    pub personal_info: Option<AdvisorPersonalInfo>,
    #[serde(default)]
    pub department: Option<String>,
    /// Advisees, in the order the backend lists them. Weak references.
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub students: Vec<String>,
}

impl Advisor {
    /// "First Last", trimmed; empty when neither name is known.
    pub fn full_name(&self) -> String {
        let info = self.personal_info.as_ref();
        let first = info.and_then(|p| p.first_name.as_deref()).unwrap_or("");
        let last = info.and_then(|p| p.last_name.as_deref()).unwrap_or("");
        format!("{} {}", first, last).trim().to_string()
    }

    pub fn display_name(&self) -> String {
        let name = self.full_name();
        if name.is_empty() {
            "Unknown Name".to_string()
        } else {
            name
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.personal_info
            .as_ref()
            .and_then(|p| p.email.as_deref())
            .filter(|e| !e.is_empty())
    }

    /// Top-level department, then the personal-info one, then the default.
    pub fn department(&self) -> &str {
        self.department
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .or_else(|| {
                self.personal_info
                    .as_ref()
                    .and_then(|p| p.department.as_deref())
                    .filter(|d| !d.trim().is_empty())
            })
            .unwrap_or(DEFAULT_DEPARTMENT)
    }
}
