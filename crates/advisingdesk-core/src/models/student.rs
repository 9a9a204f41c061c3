use std::fmt;

use serde::{Deserialize, Serialize};

use super::de;

/// Class level of a student.
///
/// Only the exact level names are known levels. Anything else, including
/// other casings, is kept verbatim so it still displays, but it never
/// matches a standing filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Standing {
    Freshman,
    Sophomore,
    Junior,
    Senior,
    Other(String),
}

impl Standing {
    pub fn as_str(&self) -> &str {
        match self {
            Standing::Freshman => "Freshman",
            Standing::Sophomore => "Sophomore",
            Standing::Junior => "Junior",
            Standing::Senior => "Senior",
            Standing::Other(s) => s,
        }
    }

    /// Display label, `N/A` for a missing or blank standing.
    pub fn label(standing: Option<&Standing>) -> &str {
        match standing {
            Some(s) if !s.as_str().trim().is_empty() => s.as_str(),
            _ => "N/A",
        }
    }
}

impl From<String> for Standing {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Freshman" => Standing::Freshman,
            "Sophomore" => Standing::Sophomore,
            "Junior" => Standing::Junior,
            "Senior" => Standing::Senior,
            _ => Standing::Other(value),
        }
    }
}

impl From<Standing> for String {
    fn from(value: Standing) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EnrollmentStatus {
    Active,
    Inactive,
    Graduated,
    Suspended,
    Withdrawn,
    Other(String),
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EnrollmentStatus::Active => "Active",
            EnrollmentStatus::Inactive => "Inactive",
            EnrollmentStatus::Graduated => "Graduated",
            EnrollmentStatus::Suspended => "Suspended",
            EnrollmentStatus::Withdrawn => "Withdrawn",
            EnrollmentStatus::Other(s) => s,
        }
    }

    /// Display label, `Unknown` for a missing or blank status.
    pub fn label(status: Option<&EnrollmentStatus>) -> &str {
        match status {
            Some(s) if !s.as_str().trim().is_empty() => s.as_str(),
            _ => "Unknown",
        }
    }
}

impl From<String> for EnrollmentStatus {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "active" => EnrollmentStatus::Active,
            "inactive" => EnrollmentStatus::Inactive,
            "graduated" => EnrollmentStatus::Graduated,
            "suspended" => EnrollmentStatus::Suspended,
            "withdrawn" => EnrollmentStatus::Withdrawn,
            _ => EnrollmentStatus::Other(value),
        }
    }
}

impl From<EnrollmentStatus> for String {
    fn from(value: EnrollmentStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicInfo {
    pub major: Option<String>,
    pub standing: Option<Standing>,
    pub gpa: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub credits_earned: Option<i64>,
    pub expected_graduation: Option<String>,
}

/// A student as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: String,
    #[serde(default)]
    pub personal_info: Option<PersonalInfo>,
    #[serde(default)]
    pub academic_info: Option<AcademicInfo>,
    #[serde(default)]
    pub enrollment_status: Option<EnrollmentStatus>,
    /// Weak reference into the advisor collection.
    #[serde(default)]
    pub advisor_id: Option<String>,
}

impl Student {
    pub fn first_name(&self) -> &str {
        self.personal_info
            .as_ref()
            .and_then(|p| p.first_name.as_deref())
            .unwrap_or("")
    }

    pub fn last_name(&self) -> &str {
        self.personal_info
            .as_ref()
            .and_then(|p| p.last_name.as_deref())
            .unwrap_or("")
    }

    pub fn email(&self) -> &str {
        self.personal_info
            .as_ref()
            .and_then(|p| p.email.as_deref())
            .unwrap_or("")
    }

    pub fn phone(&self) -> &str {
        self.personal_info
            .as_ref()
            .and_then(|p| p.phone.as_deref())
            .unwrap_or("")
    }

    /// "First Last", trimmed; empty when neither name is known.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
            .trim()
            .to_string()
    }

    pub fn standing(&self) -> Option<&Standing> {
        self.academic_info.as_ref().and_then(|a| a.standing.as_ref())
    }

    pub fn gpa(&self) -> f64 {
        self.academic_info.as_ref().and_then(|a| a.gpa).unwrap_or(0.0)
    }

    pub fn credits_earned(&self) -> i64 {
        self.academic_info
            .as_ref()
            .and_then(|a| a.credits_earned)
            .unwrap_or(0)
    }

    pub fn enrollment_label(&self) -> &str {
        EnrollmentStatus::label(self.enrollment_status.as_ref())
    }

    /// Advisor id, ignoring blank strings.
    pub fn advisor_id(&self) -> Option<&str> {
        self.advisor_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standing_parse_known_and_other() {
        assert_eq!(Standing::from("Senior".to_string()), Standing::Senior);
        assert_eq!(
            Standing::from("senior".to_string()),
            Standing::Other("senior".to_string())
        );
        assert_eq!(
            Standing::from(" Junior ".to_string()),
            Standing::Other(" Junior ".to_string())
        );
        assert_eq!(
            Standing::from("Graduate".to_string()),
            Standing::Other("Graduate".to_string())
        );
    }

    #[test]
    fn test_standing_label_defaults() {
        assert_eq!(Standing::label(None), "N/A");
        assert_eq!(Standing::label(Some(&Standing::Other(String::new()))), "N/A");
        assert_eq!(Standing::label(Some(&Standing::Sophomore)), "Sophomore");
    }

    #[test]
    fn test_parse_listing_student() {
        let json = r#"{
            "_id": {"$oid": "65f0c1"},
            "studentId": "S1001",
            "personalInfo": {"firstName": "Ada", "lastName": "Smith", "email": "ada@uni.edu"},
            "academicInfo": {"major": "Computer Science", "standing": "Junior", "gpa": 3.8, "creditsEarned": 64.0},
            "advisorId": "A01",
            "enrollmentStatus": "Active"
        }"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.student_id, "S1001");
        assert_eq!(student.full_name(), "Ada Smith");
        assert_eq!(student.standing(), Some(&Standing::Junior));
        assert_eq!(student.credits_earned(), 64);
        assert_eq!(student.enrollment_status, Some(EnrollmentStatus::Active));
        assert_eq!(student.advisor_id(), Some("A01"));
    }

    #[test]
    fn test_missing_fields_default_for_display() {
        let student: Student = serde_json::from_str(r#"{"studentId": "S2"}"#).unwrap();
        assert_eq!(student.full_name(), "");
        assert_eq!(student.email(), "");
        assert_eq!(student.gpa(), 0.0);
        assert_eq!(student.credits_earned(), 0);
        assert_eq!(Standing::label(student.standing()), "N/A");
        assert_eq!(student.enrollment_label(), "Unknown");
        assert_eq!(student.advisor_id(), None);
    }

    #[test]
    fn test_student_requires_id() {
        let result = serde_json::from_str::<Student>(r#"{"personalInfo": {"firstName": "X"}}"#);
        assert!(result.is_err());
    }
}
