use serde::{Deserialize, Serialize};

use super::de;
use super::student::Standing;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub total_students: Option<i64>,
    #[serde(rename = "averageGPA")]
    pub average_gpa: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub honor_roll: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub total_credits: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandingStats {
    #[serde(rename = "_id")]
    pub standing: Option<Standing>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub count: Option<i64>,
    #[serde(rename = "avgGPA")]
    pub avg_gpa: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisorLoad {
    #[serde(rename = "_id")]
    pub advisor_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub count: Option<i64>,
}

/// Aggregates computed by the backend; never derived client-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentStats {
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub overview: Vec<OverviewStats>,
    #[serde(rename = "byStanding", default, deserialize_with = "de::null_as_empty")]
    pub by_standing: Vec<StandingStats>,
    #[serde(rename = "byAdvisor", default, deserialize_with = "de::null_as_empty")]
    pub by_advisor: Vec<AdvisorLoad>,
}

impl DepartmentStats {
    fn overview(&self) -> Option<&OverviewStats> {
        self.overview.first()
    }

    pub fn total_students(&self) -> i64 {
        self.overview().and_then(|o| o.total_students).unwrap_or(0)
    }

    pub fn average_gpa(&self) -> f64 {
        self.overview().and_then(|o| o.average_gpa).unwrap_or(0.0)
    }

    pub fn honor_roll(&self) -> i64 {
        self.overview().and_then(|o| o.honor_roll).unwrap_or(0)
    }

    /// Number of distinct standings the backend grouped students into.
    pub fn class_levels(&self) -> usize {
        self.by_standing.len()
    }
}
