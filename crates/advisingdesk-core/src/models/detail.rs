use serde::{Deserialize, Serialize};

use super::de;
use super::progress::{completion_percent, Course};
use super::student::{EnrollmentStatus, Standing};

/// Advisor summary embedded in the single-student view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedAdvisor {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

/// Denormalized shape of `/api/students/:id`.
///
/// Unlike `Student`, names and academic fields are flattened to the top
/// level, the advisor is embedded and the current courses come from the
/// student's progress record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetail {
    pub student_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub standing: Option<Standing>,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub credits_earned: Option<i64>,
    #[serde(default)]
    pub expected_graduation: Option<String>,
    #[serde(default)]
    pub enrollment_status: Option<EnrollmentStatus>,
    #[serde(default)]
    pub advisor: Option<EmbeddedAdvisor>,
    #[serde(default)]
    pub current_semester: Option<String>,
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub current_courses: Vec<Course>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub total_credits_earned: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub remaining_credits: Option<i64>,
}

impl StudentDetail {
    /// Whether a raw response carries a student at all.
    ///
    /// The backend answers an unknown id with an empty object on some
    /// deployments, so presence of a non-blank `studentId` is the test.
    pub fn is_present(value: &serde_json::Value) -> bool {
        value
            .get("studentId")
            .and_then(|id| id.as_str())
            .map(|id| !id.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().map(str::trim).unwrap_or("")
    }

    pub fn gpa(&self) -> f64 {
        self.gpa.unwrap_or(0.0)
    }

    pub fn total_credits_earned(&self) -> i64 {
        self.total_credits_earned.unwrap_or(0)
    }

    pub fn remaining_credits(&self) -> i64 {
        self.remaining_credits.unwrap_or(0)
    }

    pub fn completion_percent(&self) -> u16 {
        completion_percent(self.total_credits_earned())
    }

    pub fn advisor_name(&self) -> &str {
        self.advisor
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .map(str::trim)
            .unwrap_or("")
    }

    pub fn advisor_email(&self) -> &str {
        self.advisor
            .as_ref()
            .and_then(|a| a.email.as_deref())
            .unwrap_or("")
    }

    pub fn advisor_department(&self) -> &str {
        self.advisor
            .as_ref()
            .and_then(|a| a.department.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_detail_view() {
        let value = json!({
            "studentId": "S1001",
            "name": "Ada Smith",
            "email": "ada@uni.edu",
            "phone": "555-0100",
            "major": "Computer Science",
            "standing": "Junior",
            "gpa": 3.8,
            "creditsEarned": 64,
            "expectedGraduation": "May 2027",
            "enrollmentStatus": "Active",
            "advisor": {"name": "Grace Hopper", "email": "gh@uni.edu", "department": "Mathematics"},
            "currentSemester": "Fall 2025",
            "currentCourses": [{"code": "CS301", "name": "Algorithms", "credits": 3}],
            "totalCreditsEarned": 64,
            "remainingCredits": 56
        });
        assert!(StudentDetail::is_present(&value));
        let detail: StudentDetail = serde_json::from_value(value).unwrap();
        assert_eq!(detail.name(), "Ada Smith");
        assert_eq!(detail.advisor_name(), "Grace Hopper");
        assert_eq!(detail.current_courses.len(), 1);
        assert_eq!(detail.completion_percent(), 53);
    }

    #[test]
    fn test_empty_object_is_not_present() {
        assert!(!StudentDetail::is_present(&json!({})));
        assert!(!StudentDetail::is_present(&json!({"studentId": ""})));
        assert!(!StudentDetail::is_present(&json!(null)));
        assert!(!StudentDetail::is_present(&json!([])));
    }

    #[test]
    fn test_blank_advisor_name_trims() {
        let detail: StudentDetail = serde_json::from_value(json!({
            "studentId": "S1",
            "name": " ",
            "advisor": {"name": " ", "department": "Computer Science"}
        }))
        .unwrap();
        assert_eq!(detail.name(), "");
        assert_eq!(detail.advisor_name(), "");
        assert_eq!(detail.advisor_email(), "");
    }
}
