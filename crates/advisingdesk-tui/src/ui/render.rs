use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState, Tab};

use super::styles;
use super::tabs::{advisors, debug, detail, progress, stats, students};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(2), // Tabs
            Constraint::Length(3), // Department stats
            Constraint::Min(8),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    stats::render(frame, app, chunks[2]);
    render_main_content(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);

    // Render overlays
    match app.state {
        AppState::ShowingDetail => render_detail_overlay(frame, app),
        AppState::ShowingDebug => render_debug_overlay(frame, app),
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::Normal | AppState::Searching | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Advising Desk";
    let connection = app.connection.label();
    let help_hint = "[?] Help";
    let connection_style = if app.connection.is_connected() {
        styles::success_style()
    } else {
        styles::error_style()
    };

    let used = title.len() + connection.chars().count() + help_hint.len() + 4;
    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat((area.width as usize).saturating_sub(used))),
        Span::styled(connection, connection_style),
        Span::raw("  "),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in Tab::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        spans.push(Span::styled(
            format!("[{}] {}", i + 1, tab.title()),
            styles::tab_style(app.current_tab == *tab),
        ));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Students => students::render(frame, app, area),
        Tab::Advisors => advisors::render(frame, app, area),
        Tab::Progress => progress::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if app.is_loading() {
        " Loading... ".to_string()
    } else {
        format!(" Updated {} ", app.store.last_updated())
    };

    let shortcuts = match app.state {
        AppState::Searching => "[Enter] keep | [Esc] clear",
        AppState::ShowingDetail | AppState::ShowingDebug => "[↑/↓] scroll | [Esc] close",
        _ => "[/] search | [r]etry | [c]onnection | [q]uit",
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

/// Scrollable bordered overlay over most of the screen.
fn render_scroll_overlay(frame: &mut Frame, title: &str, lines: Vec<Line<'static>>, scroll: u16) {
    let area = centered_rect_percent(80, 80, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(styles::title_style())
        .title_bottom(Line::from(Span::styled(" [Esc] close ", styles::muted_style())))
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_detail_overlay(frame: &mut Frame, app: &App) {
    if let Some(ref state) = app.detail {
        render_scroll_overlay(frame, "Student Details", detail::lines(state), app.overlay_scroll);
    }
}

fn render_debug_overlay(frame: &mut Frame, app: &App) {
    if let Some(ref state) = app.debug {
        render_scroll_overlay(frame, "Debug", debug::lines(state), app.overlay_scroll);
    }
}

fn help_entry(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(description.to_string(), styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(50, 24, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Advising Desk", styles::title_style())),
        Line::from(Span::styled(
            format!("  version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_entry("1-3", "Switch tabs"),
        help_entry("←/→", "Previous/next tab"),
        help_entry("↑/↓", "Navigate list"),
        help_entry("PgUp/PgDn", "Scroll a page"),
        help_entry("Enter", "Open student details"),
        help_entry("Esc", "Close / clear search"),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        help_entry("/", "Search students"),
        help_entry("f", "Cycle standing filter"),
        help_entry("r", "Retry this panel"),
        help_entry("c", "Check connection again"),
        help_entry("D", "Show raw advisors JSON"),
        help_entry("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(40, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled("  Quit Advising Desk?", styles::title_style())),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[y]", styles::help_key_style()),
            Span::styled("es  ", styles::help_desc_style()),
            Span::styled("[n]", styles::help_key_style()),
            Span::styled("o", styles::help_desc_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

/// Create a centered rectangle sized as a share of `r`
fn centered_rect_percent(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let share = |total: u16, percent: u16| {
        (u32::from(total) * u32::from(percent.min(100)) / 100) as u16
    };
    centered_rect_fixed(share(r.width, percent_x), share(r.height, percent_y), r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedApi;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_initial_frame_shows_loading() {
        let app = App::new(Arc::new(ScriptedApi::new()), Tab::Students);
        let screen = screen(&app);
        assert!(screen.contains("Advising Desk"));
        assert!(screen.contains("Checking connection..."));
        assert!(screen.contains("[1] Students"));
        assert!(screen.contains("Loading students..."));
        assert!(screen.contains("Loading statistics..."));
    }

    #[test]
    fn test_overlays_render() {
        let mut app = App::new(Arc::new(ScriptedApi::new()), Tab::Advisors);
        app.state = AppState::ShowingHelp;
        assert!(screen(&app).contains("Cycle standing filter"));

        app.state = AppState::ConfirmingQuit;
        assert!(screen(&app).contains("Quit Advising Desk?"));
    }

    #[test]
    fn test_centered_rect_clamps() {
        let outer = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_rect_fixed(50, 24, outer), Rect::new(0, 0, 30, 10));
        assert_eq!(centered_rect_fixed(10, 4, outer), Rect::new(10, 3, 10, 4));
    }

    #[test]
    fn test_centered_rect_percent_on_wide_terminal() {
        let wide = Rect {
            x: 0,
            y: 0,
            width: 1000,
            height: 30,
        };
        let overlay = centered_rect_percent(80, 80, wide);
        assert_eq!((overlay.x, overlay.y), (100, 3));
        assert_eq!((overlay.width, overlay.height), (800, 24));
    }
}
