//! Keyboard input handling for the TUI.
//!
//! Keys are mapped onto `App` handlers; no state changes happen here
//! beyond choosing which overlay is open.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use advisingdesk_core::LoadKind;

use crate::app::{App, AppState, Tab, PAGE_SCROLL_SIZE};

/// Lines scrolled per key press in overlays
const OVERLAY_SCROLL_STEP: i16 = 1;

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            Ok(false)
        }
        AppState::ConfirmingQuit => Ok(handle_quit_input(app, key)),
        AppState::Searching => {
            handle_search_input(app, key);
            Ok(false)
        }
        AppState::ShowingDetail => {
            handle_detail_input(app, key);
            Ok(false)
        }
        AppState::ShowingDebug => {
            handle_debug_input(app, key);
            Ok(false)
        }
        AppState::Quitting => Ok(true),
        AppState::Normal => {
            handle_normal_input(app, key);
            Ok(false)
        }
    }
}

fn handle_quit_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.state = AppState::Quitting;
            return true;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.state = AppState::Normal;
        }
        _ => {}
    }
    false
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.clear_search();
        }
        KeyCode::Enter => {
            // Keep search query active
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        _ => {}
    }
}

fn handle_detail_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_detail(),
        KeyCode::Up => app.scroll_overlay(-OVERLAY_SCROLL_STEP),
        KeyCode::Down => app.scroll_overlay(OVERLAY_SCROLL_STEP),
        KeyCode::Char('r') => app.retry(LoadKind::StudentDetail),
        _ => {}
    }
}

fn handle_debug_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('D') | KeyCode::Char('q') => app.close_debug(),
        KeyCode::Up => app.scroll_overlay(-OVERLAY_SCROLL_STEP),
        KeyCode::Down => app.scroll_overlay(OVERLAY_SCROLL_STEP),
        KeyCode::PageUp => app.scroll_overlay(-(PAGE_SCROLL_SIZE as i16)),
        KeyCode::PageDown => app.scroll_overlay(PAGE_SCROLL_SIZE as i16),
        KeyCode::Char('r') => app.open_debug(),
        _ => {}
    }
}

fn handle_normal_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('1') => app.switch_tab(Tab::Students),
        KeyCode::Char('2') => app.switch_tab(Tab::Advisors),
        KeyCode::Char('3') => app.switch_tab(Tab::Progress),
        KeyCode::Left => app.switch_tab(app.current_tab.prev()),
        KeyCode::Right => app.switch_tab(app.current_tab.next()),
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-(PAGE_SCROLL_SIZE as isize)),
        KeyCode::PageDown => app.move_selection(PAGE_SCROLL_SIZE as isize),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('f') => {
            app.switch_tab(Tab::Students);
            app.cycle_standing_filter();
        }
        KeyCode::Char('r') => app.retry_current(),
        KeyCode::Char('c') => app.retry(LoadKind::Health),
        KeyCode::Char('D') => app.open_debug(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedApi;
    use advisingdesk_core::filter::StandingFilter;
    use advisingdesk_core::models::Standing;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn press(app: &mut App, codes: &[KeyCode]) -> bool {
        let mut quit = false;
        for code in codes {
            quit = handle_input(app, key(*code)).await.unwrap();
        }
        quit
    }

    fn app() -> App {
        App::new(Arc::new(ScriptedApi::new()), Tab::Students)
    }

    #[tokio::test]
    async fn test_number_and_arrow_keys_switch_tabs() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3')]).await;
        assert_eq!(app.current_tab, Tab::Progress);
        press(&mut app, &[KeyCode::Right]).await;
        assert_eq!(app.current_tab, Tab::Students);
        press(&mut app, &[KeyCode::Left, KeyCode::Left]).await;
        assert_eq!(app.current_tab, Tab::Advisors);
    }

    #[tokio::test]
    async fn test_search_typing_enter_keeps_esc_clears() {
        let mut app = app();
        let codes: Vec<KeyCode> = "/smith".chars().map(KeyCode::Char).collect();
        press(&mut app, &codes).await;
        assert_eq!(app.state, AppState::Searching);
        assert_eq!(app.search_query, "smith");

        press(&mut app, &[KeyCode::Backspace, KeyCode::Enter]).await;
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.search_query, "smit");

        press(&mut app, &[KeyCode::Char('/'), KeyCode::Char('x'), KeyCode::Esc]).await;
        assert_eq!(app.state, AppState::Normal);
        assert!(app.search_query.is_empty());
    }

    #[tokio::test]
    async fn test_filter_key_cycles_standing() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('2'), KeyCode::Char('f')]).await;
        assert_eq!(app.current_tab, Tab::Students);
        assert_eq!(app.standing_filter, StandingFilter::Only(Standing::Freshman));
    }

    #[tokio::test]
    async fn test_quit_requires_confirmation() {
        let mut app = app();
        assert!(!press(&mut app, &[KeyCode::Char('q')]).await);
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(!press(&mut app, &[KeyCode::Char('n')]).await);
        assert_eq!(app.state, AppState::Normal);
        assert!(press(&mut app, &[KeyCode::Char('q'), KeyCode::Char('y')]).await);
        assert_eq!(app.state, AppState::Quitting);
    }

    #[tokio::test]
    async fn test_help_opens_and_closes() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('?')]).await;
        assert_eq!(app.state, AppState::ShowingHelp);
        // Tab keys are ignored while help is open
        press(&mut app, &[KeyCode::Char('2'), KeyCode::Esc]).await;
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.current_tab, Tab::Students);
    }

    #[tokio::test]
    async fn test_debug_overlay_keys() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('D')]).await;
        assert_eq!(app.state, AppState::ShowingDebug);
        press(&mut app, &[KeyCode::Down, KeyCode::Down, KeyCode::Up]).await;
        assert_eq!(app.overlay_scroll, 1);
        press(&mut app, &[KeyCode::Esc]).await;
        assert_eq!(app.state, AppState::Normal);
        assert!(app.debug.is_none());
    }

    #[tokio::test]
    async fn test_enter_without_students_does_nothing() {
        let mut app = app();
        press(&mut app, &[KeyCode::Enter]).await;
        assert_eq!(app.state, AppState::Normal);
        assert!(app.detail.is_none());
    }
}
