use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};

use advisingdesk_core::models::{Standing, Student};
use advisingdesk_core::{LoadKind, Store};

use crate::app::{App, AppState, PanelState};
use crate::ui::styles;
use crate::ui::tabs::{label_value, panel_block, panel_message, placeholder, render_panel, PanelContent};

/// Name of the student's advisor, resolved through the advisor collection.
///
/// No advisor id gives "Unknown"; an id that does not resolve is shown raw.
pub fn advisor_label(student: &Student, store: &Store) -> String {
    match student.advisor_id() {
        None => "Unknown".to_string(),
        Some(id) => match store.advisor(id) {
            Some(advisor) => advisor.full_name(),
            None => format!("ID: {}", id),
        },
    }
}

pub fn student_card(student: &Student, advisor: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(student.full_name(), styles::title_style()),
            Span::styled(format!("  {}", student.student_id), styles::muted_style()),
        ]),
        label_value("Email", student.email()),
        Line::from(vec![
            Span::styled("Standing: ", styles::muted_style()),
            Span::raw(Standing::label(student.standing()).to_string()),
            Span::styled("  GPA: ", styles::muted_style()),
            Span::raw(student.gpa().to_string()),
            Span::styled("  Credits: ", styles::muted_style()),
            Span::raw(student.credits_earned().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", styles::muted_style()),
            Span::raw(student.enrollment_label().to_string()),
            Span::styled("  Advisor: ", styles::muted_style()),
            Span::raw(advisor.to_string()),
        ]),
    ]
}

/// Cards for the visible students, or the message that replaces them.
pub fn content(
    panel: &PanelState,
    store: &Store,
    visible: &[&Student],
    bootstrap_complete: bool,
) -> PanelContent {
    if let Some(message) = panel_message(LoadKind::Students, panel, bootstrap_complete) {
        return PanelContent::Message(message);
    }
    if store.students.is_empty() {
        return PanelContent::Message(placeholder("No students found in database"));
    }
    if visible.is_empty() {
        return PanelContent::Message(placeholder("No students found"));
    }

    PanelContent::Cards(
        visible
            .iter()
            .map(|student| student_card(student, &advisor_label(student, store)))
            .collect(),
    )
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_students();
    let title = format!(
        " Students ({}/{}) - {} [f] ",
        visible.len(),
        app.store.students.len(),
        app.standing_filter.label()
    );

    let mut block = panel_block(title);
    let searching = matches!(app.state, AppState::Searching);
    if searching || !app.search_query.is_empty() {
        let cursor = if searching { "▌" } else { "" };
        block = block.title_bottom(Line::from(vec![
            Span::styled(" Search: ", styles::muted_style()),
            Span::styled(format!("{}{} ", app.search_query, cursor), styles::search_style()),
        ]));
    }

    let content = content(&app.students_panel, &app.store, &visible, app.bootstrap_complete);
    render_panel(frame, area, block, content, app.student_selection);
}
