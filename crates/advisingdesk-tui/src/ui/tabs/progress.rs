use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};

use advisingdesk_core::models::{ProgressRecord, DEGREE_CREDITS};
use advisingdesk_core::{LoadKind, Store};

use crate::app::{App, PanelState};
use crate::ui::styles;
use crate::ui::tabs::{label_value, panel_block, panel_message, placeholder, render_panel, PanelContent};
use crate::utils::{course_tag, credit_bar};

/// Width of the credit bar in cells
const BAR_WIDTH: usize = 30;

/// Student name for a progress record, or its raw student id.
pub fn student_name(record: &ProgressRecord, store: &Store) -> String {
    store
        .student(&record.student_id)
        .map(|s| s.full_name())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| record.student_id.clone())
}

/// Credit bar line shared with the detail overlay.
pub fn credit_line(percent: u16) -> Line<'static> {
    Line::from(vec![
        Span::styled(credit_bar(percent, BAR_WIDTH), styles::progress_style(percent)),
        Span::raw(format!(" {}%", percent)),
    ])
}

pub fn progress_card(record: &ProgressRecord, store: &Store) -> Vec<Line<'static>> {
    let semester = record.current_semester.as_deref().unwrap_or("");
    let catalog_year = record.catalog_year.as_deref().unwrap_or("");

    let mut lines = vec![
        Line::from(Span::styled(student_name(record, store), styles::title_style())),
        Line::from(vec![
            Span::styled("Semester: ", styles::muted_style()),
            Span::raw(semester.to_string()),
            Span::styled("  Catalog Year: ", styles::muted_style()),
            Span::raw(catalog_year.to_string()),
        ]),
        credit_line(record.completion_percent()),
        Line::from(format!(
            "{} credits earned  {} credits remaining  (of {})",
            record.credits_earned(),
            record.remaining_credits(),
            DEGREE_CREDITS
        )),
    ];

    if record.courses().is_empty() {
        lines.push(label_value("Courses", "None this semester"));
    } else {
        for course in record.courses() {
            lines.push(Line::from(Span::styled(
                format!("  {}", course_tag(course)),
                styles::tag_style(),
            )));
        }
    }
    lines
}

pub fn content(panel: &PanelState, store: &Store, bootstrap_complete: bool) -> PanelContent {
    if let Some(message) = panel_message(LoadKind::Progress, panel, bootstrap_complete) {
        return PanelContent::Message(message);
    }
    if store.progress.is_empty() {
        return PanelContent::Message(placeholder("No progress records found"));
    }

    PanelContent::Cards(
        store
            .progress
            .items()
            .iter()
            .map(|record| progress_card(record, store))
            .collect(),
    )
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Academic Progress ({}) ", app.store.progress.len());
    let content = content(&app.progress_panel, &app.store, app.bootstrap_complete);
    render_panel(frame, area, panel_block(title), content, app.progress_selection);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{contains, text};
    use serde_json::json;

    fn store_with(progress: serde_json::Value) -> Store {
        let mut store = Store::new();
        let ticket = store.issue_ticket(LoadKind::Students);
        store.replace_students(
            &ticket,
            serde_json::from_value(json!([
                {"studentId": "S1", "personalInfo": {"firstName": "Ada", "lastName": "Smith"}}
            ]))
            .unwrap(),
        );
        let ticket = store.issue_ticket(LoadKind::Progress);
        store.replace_progress(&ticket, serde_json::from_value(progress).unwrap());
        store
    }

    #[test]
    fn test_progress_card() {
        let store = store_with(json!([{
            "studentId": "S1",
            "catalogYear": 2023,
            "currentSemester": "Fall 2025",
            "degreeProgress": {
                "totalCreditsEarned": 60,
                "remainingCredits": 60,
                "currentSemesterCourses": [{"code": "CS301", "name": "Algorithms", "credits": 3}]
            }
        }]));
        let lines = text(&progress_card(&store.progress.items()[0], &store));
        assert_eq!(lines[0], "Ada Smith");
        assert_eq!(lines[1], "Semester: Fall 2025  Catalog Year: 2023");
        assert!(lines[2].ends_with("] 50%"));
        assert_eq!(lines[3], "60 credits earned  60 credits remaining  (of 120)");
        assert_eq!(lines[4], "  CS301 - Algorithms (3 cr)");
    }

    #[test]
    fn test_unresolved_student_shows_raw_id() {
        let store = store_with(json!([{"studentId": "S404"}]));
        let lines = text(&progress_card(&store.progress.items()[0], &store));
        assert_eq!(lines[0], "S404");
        assert_eq!(lines[1], "Semester:   Catalog Year: ");
        assert!(lines[2].ends_with("] 0%"));
        assert_eq!(lines[4], "Courses: None this semester");
    }

    #[test]
    fn test_empty_collection_placeholder() {
        let store = store_with(json!([]));
        let content = content(&PanelState::Ready, &store, true);
        assert!(contains(&content.lines(), "No progress records found"));
    }
}
