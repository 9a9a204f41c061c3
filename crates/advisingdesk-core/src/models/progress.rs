use serde::{Deserialize, Serialize};

use super::de;

/// Credits required for a degree; the denominator of every progress bar.
pub const DEGREE_CREDITS: i64 = 120;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub code: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub credits: Option<i64>,
}

impl Course {
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn credits(&self) -> i64 {
        self.credits.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeProgress {
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub total_credits_earned: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub remaining_credits: Option<i64>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub current_semester_courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Weak reference into the student collection.
    pub student_id: String,
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub catalog_year: Option<String>,
    #[serde(default)]
    pub current_semester: Option<String>,
    #[serde(default)]
    pub degree_progress: Option<DegreeProgress>,
}

impl ProgressRecord {
    pub fn credits_earned(&self) -> i64 {
        self.degree_progress
            .as_ref()
            .and_then(|d| d.total_credits_earned)
            .unwrap_or(0)
    }

    pub fn remaining_credits(&self) -> i64 {
        self.degree_progress
            .as_ref()
            .and_then(|d| d.remaining_credits)
            .unwrap_or(0)
    }

    pub fn courses(&self) -> &[Course] {
        self.degree_progress
            .as_ref()
            .map(|d| d.current_semester_courses.as_slice())
            .unwrap_or(&[])
    }

    pub fn completion_percent(&self) -> u16 {
        completion_percent(self.credits_earned())
    }
}

/// Share of `DEGREE_CREDITS` earned, rounded and clamped to 0..=100.
pub fn completion_percent(credits_earned: i64) -> u16 {
    let percent = (credits_earned as f64 / DEGREE_CREDITS as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u16
}
