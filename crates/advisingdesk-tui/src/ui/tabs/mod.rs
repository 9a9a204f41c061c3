//! Views for each tab plus the overlays that show a single record.
//!
//! Builders here are pure: they take store data and panel state and return
//! lines. Only the `render` functions touch the frame.

pub mod advisors;
pub mod debug;
pub mod detail;
pub mod progress;
pub mod stats;
pub mod students;

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use advisingdesk_core::LoadKind;

use crate::app::PanelState;
use crate::ui::styles;

/// What a list panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    /// One multi-line card per record
    Cards(Vec<Vec<Line<'static>>>),
    /// A single message in place of the list
    Message(Vec<Line<'static>>),
}

impl PanelContent {
    /// Every line, cards in order.
    pub fn lines(&self) -> Vec<Line<'static>> {
        match self {
            PanelContent::Cards(cards) => cards.iter().flatten().cloned().collect(),
            PanelContent::Message(lines) => lines.clone(),
        }
    }
}

pub fn loading(noun: &str) -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(
        format!("Loading {}...", noun.to_lowercase()),
        styles::muted_style(),
    ))]
}

pub fn placeholder(text: &str) -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(text.to_string(), styles::muted_style()))]
}

/// Failed-load panel with its retry control. The advisors panel also offers
/// the raw JSON dump.
pub fn error_panel(kind: LoadKind, message: &str) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Error Loading {}", kind.noun()),
            styles::error_style(),
        )),
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
    ];

    let mut controls = vec![
        Span::styled("[r]", styles::help_key_style()),
        Span::styled(" Retry", styles::help_desc_style()),
    ];
    if kind == LoadKind::Advisors {
        controls.push(Span::raw("   "));
        controls.push(Span::styled("[D]", styles::help_key_style()));
        controls.push(Span::styled(" Debug", styles::help_desc_style()));
    }
    lines.push(Line::from(controls));
    lines
}

/// Message for a panel that cannot show its list yet, if any.
///
/// Views that resolve ids across collections wait for the whole initial
/// load, not just their own collection.
pub fn panel_message(
    kind: LoadKind,
    panel: &PanelState,
    bootstrap_complete: bool,
) -> Option<Vec<Line<'static>>> {
    match panel {
        PanelState::Failed(message) => Some(error_panel(kind, message)),
        PanelState::Loading => Some(loading(kind.noun())),
        PanelState::Ready if !bootstrap_complete => Some(loading(kind.noun())),
        PanelState::Ready => None,
    }
}

/// `Label: value` with a muted label.
pub fn label_value(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), styles::muted_style()),
        Span::raw(value.into()),
    ])
}

pub fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(title.to_string(), styles::highlight_style()))
}

/// Draw a panel: a selectable list of cards, or a centered message.
pub fn render_panel(
    frame: &mut Frame,
    area: Rect,
    block: Block<'_>,
    content: PanelContent,
    selection: usize,
) {
    match content {
        PanelContent::Cards(cards) => {
            let items: Vec<ListItem> = cards
                .into_iter()
                .map(|mut card| {
                    card.push(Line::from(""));
                    ListItem::new(card)
                })
                .collect();
            let list = List::new(items)
                .block(block)
                .style(styles::list_item_style())
                .highlight_style(styles::selected_style());

            let mut state = ListState::default();
            state.select(Some(selection));
            frame.render_stateful_widget(list, area, &mut state);
        }
        PanelContent::Message(lines) => {
            let paragraph = Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
    }
}

/// Bordered block with the muted title used by every panel.
pub fn panel_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
}
