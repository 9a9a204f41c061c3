//! Single-student overlay built from `/api/students/:id`.

use ratatui::text::{Line, Span};

use advisingdesk_core::models::{EnrollmentStatus, Standing, StudentDetail, DEGREE_CREDITS};

use crate::app::DetailState;
use crate::ui::styles;
use crate::ui::tabs::progress::credit_line;
use crate::ui::tabs::{label_value, section};
use crate::utils::{course_tag, or_default};

fn or_blank(value: Option<&str>) -> String {
    value.unwrap_or("").to_string()
}

fn detail_lines(detail: &StudentDetail) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            or_default(detail.name(), &detail.student_id).to_string(),
            styles::title_style(),
        )),
        Line::from(""),
        section("Student Information"),
        label_value("Name", detail.name().to_string()),
        label_value("Student ID", detail.student_id.clone()),
        label_value("Email", or_blank(detail.email.as_deref())),
        label_value("Phone", or_blank(detail.phone.as_deref())),
        label_value(
            "Status",
            EnrollmentStatus::label(detail.enrollment_status.as_ref()),
        ),
        Line::from(""),
        section("Academic Information"),
        label_value("Major", or_blank(detail.major.as_deref())),
        label_value("Standing", Standing::label(detail.standing.as_ref())),
        label_value("GPA", detail.gpa().to_string()),
        label_value(
            "Expected Graduation",
            or_blank(detail.expected_graduation.as_deref()),
        ),
        Line::from(""),
        section("Advisor"),
        label_value("Name", detail.advisor_name().to_string()),
        label_value("Email", detail.advisor_email().to_string()),
        label_value("Department", detail.advisor_department().to_string()),
        Line::from(""),
        section("Academic Progress"),
        label_value("Current Semester", or_blank(detail.current_semester.as_deref())),
        label_value(
            "Credits Earned",
            format!("{}/{}", detail.total_credits_earned(), DEGREE_CREDITS),
        ),
        credit_line(detail.completion_percent()),
        label_value("Remaining Credits", detail.remaining_credits().to_string()),
        Line::from(""),
        section("Current Courses"),
    ];

    if detail.current_courses.is_empty() {
        lines.push(Line::from(Span::styled(
            "No courses this semester",
            styles::muted_style(),
        )));
    } else {
        for course in &detail.current_courses {
            lines.push(Line::from(Span::styled(
                format!("  {}", course_tag(course)),
                styles::tag_style(),
            )));
        }
    }
    lines
}

/// Overlay body for every detail state.
pub fn lines(state: &DetailState) -> Vec<Line<'static>> {
    match state {
        DetailState::Loading(student_id) => vec![Line::from(Span::styled(
            format!("Loading student {}...", student_id),
            styles::muted_style(),
        ))],
        DetailState::Loaded(detail) => detail_lines(detail),
        DetailState::NotFound(student_id) => vec![
            Line::from(Span::styled("Student not found", styles::error_style())),
            Line::from(""),
            Line::from(Span::styled(
                format!("No record for {}", student_id),
                styles::muted_style(),
            )),
        ],
        DetailState::Failed { message, .. } => vec![
            Line::from(Span::styled(
                "Error loading student details",
                styles::error_style(),
            )),
            Line::from(""),
            Line::from(message.clone()),
            Line::from(""),
            Line::from(vec![
                Span::styled("[r]", styles::help_key_style()),
                Span::styled(" Retry", styles::help_desc_style()),
            ]),
        ],
    }
}
