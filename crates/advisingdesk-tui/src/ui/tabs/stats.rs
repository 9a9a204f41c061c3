//! Department statistics strip shown above every tab.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use advisingdesk_core::models::{DepartmentStats, Standing};
use advisingdesk_core::LoadKind;

use crate::app::{App, PanelState};
use crate::ui::styles;
use crate::ui::tabs::loading;
use crate::utils::{format_gpa, truncate_string};

/// Longest error message shown on the one-line strip
const MAX_MESSAGE_LENGTH: usize = 60;

fn figure(label: &str, value: String) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("{}: ", label), styles::muted_style()),
        Span::styled(value, styles::title_style()),
        Span::raw("   "),
    ]
}

/// Headline figures plus a per-standing breakdown.
pub fn lines(panel: &PanelState, stats: Option<&DepartmentStats>) -> Vec<Line<'static>> {
    let stats = match (panel, stats) {
        (PanelState::Failed(message), _) => {
            return vec![Line::from(vec![
                Span::styled(
                    format!(
                        "{} unavailable: {} ",
                        LoadKind::DepartmentStats.noun(),
                        truncate_string(message, MAX_MESSAGE_LENGTH)
                    ),
                    styles::error_style(),
                ),
                Span::styled("[r]", styles::help_key_style()),
                Span::styled(" Retry", styles::help_desc_style()),
            ])];
        }
        (PanelState::Ready, Some(stats)) => stats,
        _ => return loading(LoadKind::DepartmentStats.noun()),
    };

    let mut headline = Vec::new();
    headline.extend(figure("Total Students", stats.total_students().to_string()));
    headline.extend(figure("Average GPA", format_gpa(stats.average_gpa())));
    headline.extend(figure("Honor Roll", stats.honor_roll().to_string()));
    headline.extend(figure("Class Levels", stats.class_levels().to_string()));

    let breakdown: Vec<String> = stats
        .by_standing
        .iter()
        .map(|group| {
            format!(
                "{} {} (avg {})",
                Standing::label(group.standing.as_ref()),
                group.count.unwrap_or(0),
                format_gpa(group.avg_gpa.unwrap_or(0.0))
            )
        })
        .collect();

    vec![
        Line::from(headline),
        Line::from(Span::styled(breakdown.join(" · "), styles::muted_style())),
    ]
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    let paragraph =
        Paragraph::new(lines(&app.stats_panel, app.store.department_stats.as_ref())).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::text;

    #[test]
    fn test_headline_and_breakdown() {
        let stats: DepartmentStats = serde_json::from_str(
            r#"{
                "overview": [{"totalStudents": 42, "averageGPA": 3.214, "honorRoll": 7}],
                "byStanding": [
                    {"_id": "Freshman", "count": 10, "avgGPA": 3.0},
                    {"_id": null, "count": 2}
                ]
            }"#,
        )
        .unwrap();
        let lines = text(&lines(&PanelState::Ready, Some(&stats)));
        assert_eq!(
            lines[0].trim_end(),
            "Total Students: 42   Average GPA: 3.21   Honor Roll: 7   Class Levels: 2"
        );
        assert_eq!(lines[1], "Freshman 10 (avg 3.00) · N/A 2 (avg 0.00)");
    }

    #[test]
    fn test_empty_overview_shows_zeroes() {
        let stats = DepartmentStats::default();
        let lines = text(&lines(&PanelState::Ready, Some(&stats)));
        assert!(lines[0].starts_with("Total Students: 0   Average GPA: 0.00"));
    }

    #[test]
    fn test_loading_and_failed() {
        assert_eq!(text(&lines(&PanelState::Loading, None)), vec!["Loading statistics..."]);
        let failed = text(&lines(&PanelState::Failed("db down".into()), None));
        assert_eq!(failed, vec!["Statistics unavailable: db down [r] Retry"]);
    }
}
