use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};

use advisingdesk_core::models::Advisor;
use advisingdesk_core::{LoadKind, Store};

use crate::app::{App, PanelState};
use crate::ui::styles;
use crate::ui::tabs::{label_value, panel_block, panel_message, placeholder, render_panel, PanelContent};
use crate::utils::or_default;

/// Advisee names, falling back to the raw id when a student is not loaded.
pub fn advisee_names(advisor: &Advisor, store: &Store) -> Vec<String> {
    advisor
        .students
        .iter()
        .map(|id| {
            store
                .student(id)
                .map(|s| s.full_name())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| id.clone())
        })
        .collect()
}

pub fn advisor_card(advisor: &Advisor, store: &Store) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(advisor.display_name(), styles::title_style())),
        label_value("Email", advisor.email().unwrap_or("No email")),
        label_value("Department", advisor.department()),
        label_value("Advisor ID", or_default(&advisor.advisor_id, "N/A")),
        label_value("Students", advisor.students.len().to_string()),
    ];

    let names = advisee_names(advisor, store);
    if !names.is_empty() {
        let mut chips = vec![Span::raw("  ")];
        for (i, name) in names.into_iter().enumerate() {
            if i > 0 {
                chips.push(Span::styled(" · ", styles::muted_style()));
            }
            chips.push(Span::styled(name, styles::tag_style()));
        }
        lines.push(Line::from(chips));
    }
    lines
}

pub fn content(panel: &PanelState, store: &Store, bootstrap_complete: bool) -> PanelContent {
    if let Some(message) = panel_message(LoadKind::Advisors, panel, bootstrap_complete) {
        return PanelContent::Message(message);
    }
    if store.advisors.is_empty() {
        return PanelContent::Message(placeholder("No advisors to display"));
    }

    PanelContent::Cards(
        store
            .advisors
            .items()
            .iter()
            .map(|advisor| advisor_card(advisor, store))
            .collect(),
    )
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Advisors ({}) - [D] raw JSON ", app.store.advisors.len());
    let content = content(&app.advisors_panel, &app.store, app.bootstrap_complete);
    render_panel(frame, area, panel_block(title), content, app.advisor_selection);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{contains, text};
    use serde_json::json;

    fn store_with(advisors: serde_json::Value) -> Store {
        let mut store = Store::new();
        let ticket = store.issue_ticket(LoadKind::Students);
        store.replace_students(
            &ticket,
            serde_json::from_value(json!([
                {"studentId": "S1", "personalInfo": {"firstName": "Ada", "lastName": "Smith"}}
            ]))
            .unwrap(),
        );
        let ticket = store.issue_ticket(LoadKind::Advisors);
        store.replace_advisors(&ticket, serde_json::from_value(advisors).unwrap());
        store
    }

    #[test]
    fn test_card_resolves_advisees() {
        let store = store_with(json!([{
            "advisorId": "A1",
            "personalInfo": {"firstName": "Grace", "lastName": "Hopper", "email": "gh@uni.edu"},
            "department": "Mathematics",
            "students": ["S1", "S77"]
        }]));
        let lines = text(&advisor_card(&store.advisors.items()[0], &store));
        assert_eq!(
            lines,
            vec![
                "Grace Hopper",
                "Email: gh@uni.edu",
                "Department: Mathematics",
                "Advisor ID: A1",
                "Students: 2",
                "  Ada Smith · S77",
            ]
        );
    }

    #[test]
    fn test_card_defaults() {
        let store = store_with(json!([{"advisorId": ""}]));
        let lines = text(&advisor_card(&store.advisors.items()[0], &store));
        assert_eq!(
            lines,
            vec![
                "Unknown Name",
                "Email: No email",
                "Department: Computer Science",
                "Advisor ID: N/A",
                "Students: 0",
            ]
        );
    }

    #[test]
    fn test_empty_collection_placeholder() {
        let store = store_with(json!([]));
        let content = content(&PanelState::Ready, &store, true);
        assert!(contains(&content.lines(), "No advisors to display"));
    }

    #[test]
    fn test_failed_panel_offers_debug() {
        let store = Store::new();
        let content = content(&PanelState::Failed("timeout".into()), &store, true);
        assert!(contains(&content.lines(), "Error Loading Advisors"));
        assert!(contains(&content.lines(), "[D] Debug"));
    }
}
