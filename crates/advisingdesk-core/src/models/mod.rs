//! Data models for the advising backend.
//!
//! Each endpoint gets an explicit schema. Identity fields (`studentId`,
//! `advisorId`) are required, so a record without one fails to parse instead
//! of rendering as a blank card. Everything shown on screen is optional and
//! only defaulted when it is displayed.
//!
//! - `Student`, `Standing`, `EnrollmentStatus`: listing shape of `/api/students`
//! - `Advisor`: `/api/advisors`
//! - `ProgressRecord`, `Course`: `/api/academic-progress`
//! - `StudentDetail`: the denormalized `/api/students/:id` shape
//! - `DepartmentStats`: `/api/department-stats`
//! - `HealthReport`, `ConnectionStatus`: `/api/health`

mod de;

pub mod advisor;
pub mod detail;
pub mod health;
pub mod progress;
pub mod stats;
pub mod student;

pub use advisor::{Advisor, AdvisorPersonalInfo, DEFAULT_DEPARTMENT};
pub use detail::{EmbeddedAdvisor, StudentDetail};
pub use health::{ConnectionStatus, HealthReport};
pub use progress::{Course, DegreeProgress, ProgressRecord, DEGREE_CREDITS};
pub use stats::{AdvisorLoad, DepartmentStats, OverviewStats, StandingStats};
pub use student::{AcademicInfo, EnrollmentStatus, PersonalInfo, Standing, Student};
