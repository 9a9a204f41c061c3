//! Student search and standing filter.
//!
//! Filtering is a full linear scan on every keystroke. That is fine for the
//! few hundred records a department holds; a larger roster would need an
//! index instead.

use crate::models::{Standing, Student};

/// Standing selection for the student list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StandingFilter {
    #[default]
    All,
    Only(Standing),
}

impl StandingFilter {
    /// Next filter in the cycle All → Freshman → ... → Senior → All.
    pub fn next(&self) -> Self {
        match self {
            StandingFilter::All => StandingFilter::Only(Standing::Freshman),
            StandingFilter::Only(Standing::Freshman) => StandingFilter::Only(Standing::Sophomore),
            StandingFilter::Only(Standing::Sophomore) => StandingFilter::Only(Standing::Junior),
            StandingFilter::Only(Standing::Junior) => StandingFilter::Only(Standing::Senior),
            StandingFilter::Only(_) => StandingFilter::All,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StandingFilter::All => "All Standings",
            StandingFilter::Only(standing) => standing.as_str(),
        }
    }

    pub fn matches(&self, standing: Option<&Standing>) -> bool {
        match self {
            StandingFilter::All => true,
            StandingFilter::Only(wanted) => standing == Some(wanted),
        }
    }
}

/// Case-insensitive substring test. `needle_lower` must already be lowercase.
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Whether a student matches a lowercased query on id, names or email.
fn matches_query(student: &Student, query_lower: &str) -> bool {
    contains_ignore_case(&student.student_id, query_lower)
        || contains_ignore_case(student.first_name(), query_lower)
        || contains_ignore_case(student.last_name(), query_lower)
        || contains_ignore_case(student.email(), query_lower)
}

/// Students matching `query` and `standing`, in input order.
pub fn filter_students<'a>(
    students: &'a [Student],
    query: &str,
    standing: &StandingFilter,
) -> Vec<&'a Student> {
    let query = query.to_lowercase();
    students
        .iter()
        .filter(|s| matches_query(s, &query) && standing.matches(s.standing()))
        .collect()
}
