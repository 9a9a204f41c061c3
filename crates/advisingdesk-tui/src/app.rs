//! Application state management for advisingdesk.
//!
//! `App` owns the `Store` and is its only writer. Loads run in spawned tasks
//! and report back over an MPSC channel, which `check_background_tasks`
//! drains between frames. Every user action goes through one of the explicit
//! handlers below; `ui::input` only maps keys onto them.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use advisingdesk_core::loader::{self, BootstrapTickets, DEBUG_ENDPOINT};
use advisingdesk_core::models::{ConnectionStatus, Student, StudentDetail};
use advisingdesk_core::{
    filter_students, AdvisingApi, LoadEvent, LoadKind, LoadRequest, LoadTicket, StandingFilter,
    Store,
};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the load event channel.
/// A bootstrap sends six events; retries add one each.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Students,
    Advisors,
    Progress,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Students, Tab::Advisors, Tab::Progress];

    /// Get the display title for this tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Students => "Students",
            Tab::Advisors => "Advisors",
            Tab::Progress => "Progress",
        }
    }

    /// Stable name stored in the config file.
    pub fn key(&self) -> &'static str {
        match self {
            Tab::Students => "students",
            Tab::Advisors => "advisors",
            Tab::Progress => "progress",
        }
    }

    pub fn from_key(key: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|tab| tab.key() == key)
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Students => Tab::Advisors,
            Tab::Advisors => Tab::Progress,
            Tab::Progress => Tab::Students,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Students => Tab::Progress,
            Tab::Advisors => Tab::Students,
            Tab::Progress => Tab::Advisors,
        }
    }

    /// Collection listed on this tab.
    pub fn load_kind(&self) -> LoadKind {
        match self {
            Tab::Students => LoadKind::Students,
            Tab::Advisors => LoadKind::Advisors,
            Tab::Progress => LoadKind::Progress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingDetail,
    ShowingDebug,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Load state of one collection panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Loading,
    Ready,
    /// Load failed; holds the message shown in the error panel
    Failed(String),
}

/// Single-student overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading(String),
    Loaded(Box<StudentDetail>),
    NotFound(String),
    Failed { student_id: String, message: String },
}

impl DetailState {
    pub fn student_id(&self) -> &str {
        match self {
            DetailState::Loading(id) | DetailState::NotFound(id) => id,
            DetailState::Loaded(detail) => &detail.student_id,
            DetailState::Failed { student_id, .. } => student_id,
        }
    }
}

/// Raw JSON overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugState {
    Loading,
    Loaded(String),
    Failed(String),
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub state: AppState,
    pub current_tab: Tab,
    pub store: Store,
    pub connection: ConnectionStatus,

    pub students_panel: PanelState,
    pub advisors_panel: PanelState,
    pub progress_panel: PanelState,
    pub stats_panel: PanelState,
    /// Set once every bootstrap collection load has reported.
    pub bootstrap_complete: bool,

    pub search_query: String,
    pub standing_filter: StandingFilter,
    pub student_selection: usize,
    pub advisor_selection: usize,
    pub progress_selection: usize,

    pub detail: Option<DetailState>,
    pub debug: Option<DebugState>,
    /// Scroll offset of whichever overlay is open
    pub overlay_scroll: u16,
    pub status_message: Option<String>,

    api: Arc<dyn AdvisingApi>,
    event_tx: mpsc::Sender<LoadEvent>,
    event_rx: mpsc::Receiver<LoadEvent>,
    detail_ticket: Option<LoadTicket>,
}

impl App {
    pub fn new(api: Arc<dyn AdvisingApi>, initial_tab: Tab) -> Self {
        let (event_tx, event_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        Self {
            state: AppState::Normal,
            current_tab: initial_tab,
            store: Store::new(),
            connection: ConnectionStatus::Unknown,
            students_panel: PanelState::Loading,
            advisors_panel: PanelState::Loading,
            progress_panel: PanelState::Loading,
            stats_panel: PanelState::Loading,
            bootstrap_complete: false,
            search_query: String::new(),
            standing_filter: StandingFilter::All,
            student_selection: 0,
            advisor_selection: 0,
            progress_selection: 0,
            detail: None,
            debug: None,
            overlay_scroll: 0,
            status_message: None,
            api,
            event_tx,
            event_rx,
            detail_ticket: None,
        }
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// Kick off the initial load of every collection.
    pub fn start_bootstrap(&mut self) {
        let tickets = BootstrapTickets::issue(&mut self.store);
        self.connection = ConnectionStatus::Unknown;
        self.students_panel = PanelState::Loading;
        self.advisors_panel = PanelState::Loading;
        self.progress_panel = PanelState::Loading;
        self.stats_panel = PanelState::Loading;
        self.bootstrap_complete = false;

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            loader::bootstrap(api, tickets, tx).await;
        });
    }

    /// Issue a ticket for `request` and run it in the background.
    fn spawn_load(&mut self, request: LoadRequest) -> LoadTicket {
        let ticket = self.store.issue_ticket(request.kind());
        debug!(kind = ?ticket.kind, generation = ticket.generation, "Starting load");

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            loader::run(api.as_ref(), request, ticket, &tx).await;
        });
        ticket
    }

    /// Re-issue the load behind a panel.
    pub fn retry(&mut self, kind: LoadKind) {
        info!(kind = ?kind, "Retrying load");
        self.status_message = None;
        match kind {
            LoadKind::Health => {
                self.connection = ConnectionStatus::Unknown;
                self.spawn_load(LoadRequest::Health);
            }
            LoadKind::StudentDetail => {
                if let Some(student_id) = self.detail.as_ref().map(|d| d.student_id().to_string()) {
                    self.open_student(&student_id);
                }
            }
            LoadKind::Students => {
                self.students_panel = PanelState::Loading;
                self.spawn_load(LoadRequest::Students);
            }
            LoadKind::Advisors => {
                self.advisors_panel = PanelState::Loading;
                self.spawn_load(LoadRequest::Advisors);
            }
            LoadKind::Progress => {
                self.progress_panel = PanelState::Loading;
                self.spawn_load(LoadRequest::Progress);
            }
            LoadKind::DepartmentStats => {
                self.stats_panel = PanelState::Loading;
                self.spawn_load(LoadRequest::DepartmentStats);
            }
        }
    }

    /// Retry the current tab's panel, plus the statistics strip if it failed.
    pub fn retry_current(&mut self) {
        self.retry(self.current_tab.load_kind());
        if matches!(self.stats_panel, PanelState::Failed(_)) {
            self.retry(LoadKind::DepartmentStats);
        }
    }

    /// Whether any panel is still waiting on a load.
    pub fn is_loading(&self) -> bool {
        [
            &self.students_panel,
            &self.advisors_panel,
            &self.progress_panel,
            &self.stats_panel,
        ]
        .into_iter()
        .any(|panel| *panel == PanelState::Loading)
    }

    /// Health and details have no panel of their own.
    fn panel_mut(&mut self, kind: LoadKind) -> Option<&mut PanelState> {
        match kind {
            LoadKind::Students => Some(&mut self.students_panel),
            LoadKind::Advisors => Some(&mut self.advisors_panel),
            LoadKind::Progress => Some(&mut self.progress_panel),
            LoadKind::DepartmentStats => Some(&mut self.stats_panel),
            LoadKind::Health | LoadKind::StudentDetail => None,
        }
    }

    /// Check for completed background loads and apply them.
    pub async fn check_background_tasks(&mut self) {
        // Collect first so processing can borrow self mutably
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }

        for event in events {
            self.process_load_event(event);
        }
    }

    #[cfg(test)]
    pub async fn next_event(&mut self) -> Option<LoadEvent> {
        self.event_rx.recv().await
    }

    fn is_detail_current(&self, ticket: &LoadTicket) -> bool {
        self.detail.is_some()
            && self.detail_ticket == Some(*ticket)
            && self.store.is_current(ticket)
    }

    /// Apply one load result. Results from superseded loads are dropped.
    pub fn process_load_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Connection(ticket, status) => {
                if self.store.is_current(&ticket) {
                    self.connection = status;
                }
            }
            LoadEvent::Students(ticket, students) => {
                let count = students.len();
                if self.store.replace_students(&ticket, students) {
                    debug!(count, "Students loaded");
                    self.students_panel = PanelState::Ready;
                    self.clamp_selections();
                }
            }
            LoadEvent::Advisors(ticket, advisors) => {
                let count = advisors.len();
                if self.store.replace_advisors(&ticket, advisors) {
                    debug!(count, "Advisors loaded");
                    self.advisors_panel = PanelState::Ready;
                    self.clamp_selections();
                }
            }
            LoadEvent::Progress(ticket, progress) => {
                let count = progress.len();
                if self.store.replace_progress(&ticket, progress) {
                    debug!(count, "Progress loaded");
                    self.progress_panel = PanelState::Ready;
                    self.clamp_selections();
                }
            }
            LoadEvent::DepartmentStats(ticket, stats) => {
                if self.store.replace_department_stats(&ticket, stats) {
                    self.stats_panel = PanelState::Ready;
                }
            }
            LoadEvent::StudentDetail(ticket, detail) => {
                if self.is_detail_current(&ticket) {
                    self.detail = Some(DetailState::Loaded(detail));
                }
            }
            LoadEvent::StudentNotFound(ticket, student_id) => {
                if self.is_detail_current(&ticket) {
                    self.detail = Some(DetailState::NotFound(student_id));
                }
            }
            LoadEvent::Failed { ticket, message } => {
                if ticket.kind == LoadKind::StudentDetail {
                    if self.is_detail_current(&ticket) {
                        let student_id = self
                            .detail
                            .as_ref()
                            .map(|d| d.student_id().to_string())
                            .unwrap_or_default();
                        self.detail = Some(DetailState::Failed {
                            student_id,
                            message,
                        });
                    }
                    return;
                }
                if !self.store.is_current(&ticket) {
                    debug!(kind = ?ticket.kind, "Ignoring stale failure");
                    return;
                }
                warn!(kind = ?ticket.kind, message = %message, "Panel load failed");
                if let Some(panel) = self.panel_mut(ticket.kind) {
                    *panel = PanelState::Failed(message);
                }
            }
            LoadEvent::Debug(endpoint, result) => {
                if self.debug.is_none() {
                    debug!(endpoint = %endpoint, "Debug dump arrived after close");
                    return;
                }
                self.debug = Some(match result {
                    Ok(body) => DebugState::Loaded(body),
                    Err(message) => DebugState::Failed(message),
                });
            }
            LoadEvent::BootstrapComplete => {
                info!("Initial load finished");
                self.bootstrap_complete = true;
            }
        }
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn switch_tab(&mut self, tab: Tab) {
        if self.current_tab != tab {
            debug!(tab = tab.title(), "Switching tab");
        }
        self.current_tab = tab;
        self.status_message = None;
    }

    /// Open the detail overlay and fetch the student's record.
    pub fn open_student(&mut self, student_id: &str) {
        info!(student_id, "Opening student details");
        self.detail = Some(DetailState::Loading(student_id.to_string()));
        self.state = AppState::ShowingDetail;
        self.overlay_scroll = 0;
        let ticket = self.spawn_load(LoadRequest::StudentDetail(student_id.to_string()));
        self.detail_ticket = Some(ticket);
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.detail_ticket = None;
        self.overlay_scroll = 0;
        self.state = AppState::Normal;
    }

    /// Open the raw advisors JSON overlay.
    pub fn open_debug(&mut self) {
        info!(endpoint = DEBUG_ENDPOINT, "Opening debug dump");
        self.debug = Some(DebugState::Loading);
        self.state = AppState::ShowingDebug;
        self.overlay_scroll = 0;

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            loader::dump(api.as_ref(), DEBUG_ENDPOINT, &tx).await;
        });
    }

    pub fn close_debug(&mut self) {
        self.debug = None;
        self.overlay_scroll = 0;
        self.state = AppState::Normal;
    }

    /// Student id behind the current selection, on tabs that list students.
    pub fn selected_student_id(&self) -> Option<String> {
        match self.current_tab {
            Tab::Students => self
                .visible_students()
                .get(self.student_selection)
                .map(|s| s.student_id.clone()),
            Tab::Progress => self
                .store
                .progress
                .items()
                .get(self.progress_selection)
                .map(|p| p.student_id.clone()),
            Tab::Advisors => None,
        }
    }

    pub fn open_selected(&mut self) {
        if let Some(student_id) = self.selected_student_id() {
            self.open_student(&student_id);
        }
    }

    fn list_len(&self) -> usize {
        match self.current_tab {
            Tab::Students => self.visible_students().len(),
            Tab::Advisors => self.store.advisors.len(),
            Tab::Progress => self.store.progress.len(),
        }
    }

    fn selection_mut(&mut self) -> &mut usize {
        match self.current_tab {
            Tab::Students => &mut self.student_selection,
            Tab::Advisors => &mut self.advisor_selection,
            Tab::Progress => &mut self.progress_selection,
        }
    }

    /// Move the current tab's selection by `delta`, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.list_len();
        let selection = self.selection_mut();
        if len == 0 {
            *selection = 0;
            return;
        }
        let moved = selection.saturating_add_signed(delta);
        *selection = moved.min(len - 1);
    }

    pub fn select_first(&mut self) {
        *self.selection_mut() = 0;
    }

    pub fn select_last(&mut self) {
        let len = self.list_len();
        *self.selection_mut() = len.saturating_sub(1);
    }

    pub fn scroll_overlay(&mut self, delta: i16) {
        self.overlay_scroll = self.overlay_scroll.saturating_add_signed(delta);
    }

    fn clamp_selections(&mut self) {
        let students = self.visible_students().len();
        self.student_selection = self.student_selection.min(students.saturating_sub(1));
        self.advisor_selection = self
            .advisor_selection
            .min(self.store.advisors.len().saturating_sub(1));
        self.progress_selection = self
            .progress_selection
            .min(self.store.progress.len().saturating_sub(1));
    }

    // ------------------------------------------------------------------------
    // Search and filter
    // ------------------------------------------------------------------------

    /// Students matching the search query and standing filter, in load order.
    pub fn visible_students(&self) -> Vec<&Student> {
        filter_students(
            self.store.students.items(),
            &self.search_query,
            &self.standing_filter,
        )
    }

    pub fn start_search(&mut self) {
        self.switch_tab(Tab::Students);
        self.state = AppState::Searching;
        self.search_query.clear();
        self.student_selection = 0;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        // Reset selection when search changes
        self.student_selection = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.student_selection = 0;
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.student_selection = 0;
    }

    pub fn cycle_standing_filter(&mut self) {
        self.standing_filter = self.standing_filter.next();
        self.student_selection = 0;
        debug!(filter = self.standing_filter.label(), "Standing filter changed");
    }
}

// ============================================================================
// Tests
// ============================================================================
