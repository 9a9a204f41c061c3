//! Raw JSON overlay for diagnosing advisor data.

use ratatui::text::{Line, Span};

use advisingdesk_core::loader::DEBUG_ENDPOINT;

use crate::app::DebugState;
use crate::ui::styles;

pub fn lines(state: &DebugState) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("GET {}", DEBUG_ENDPOINT),
            styles::highlight_style(),
        )),
        Line::from(""),
    ];

    match state {
        DebugState::Loading => {
            lines.push(Line::from(Span::styled("Loading...", styles::muted_style())));
        }
        DebugState::Loaded(body) => {
            lines.extend(body.lines().map(|l| Line::from(l.to_string())));
        }
        DebugState::Failed(message) => {
            lines.push(Line::from(Span::styled(
                format!("Debug error: {}", message),
                styles::error_style(),
            )));
        }
    }
    lines
}
