use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{Advisor, DepartmentStats, ProgressRecord, Student};

/// What a load fetches. One generation counter per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadKind {
    Health,
    Advisors,
    Students,
    Progress,
    DepartmentStats,
    StudentDetail,
}

impl LoadKind {
    /// Plural noun used in panel titles ("Error Loading Students").
    pub fn noun(&self) -> &'static str {
        match self {
            LoadKind::Health => "Connection",
            LoadKind::Advisors => "Advisors",
            LoadKind::Students => "Students",
            LoadKind::Progress => "Progress",
            LoadKind::DepartmentStats => "Statistics",
            LoadKind::StudentDetail => "Student Details",
        }
    }
}

/// Identifies one issued load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub kind: LoadKind,
    pub generation: u64,
}

/// Format an age in minutes for the status bar.
pub fn format_age(minutes: i64) -> String {
    if minutes < 1 {
        // Negative covers clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        if minutes % 60 >= 30 {
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        if (minutes % 1440) / 60 >= 12 {
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}

/// A loaded collection and when it was loaded.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    loaded_at: Option<DateTime<Utc>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loaded_at: None,
        }
    }
}

impl<T> Collection<T> {
    /// Replace the whole collection.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.loaded_at = Some(Utc::now());
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}

/// All state fetched from the backend.
#[derive(Debug, Default)]
pub struct Store {
    pub students: Collection<Student>,
    pub advisors: Collection<Advisor>,
    pub progress: Collection<ProgressRecord>,
    pub department_stats: Option<DepartmentStats>,
    generations: HashMap<LoadKind, u64>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket for `kind`, superseding any in flight.
    pub fn issue_ticket(&mut self, kind: LoadKind) -> LoadTicket {
        let generation = self.generations.entry(kind).or_insert(0);
        *generation += 1;
        LoadTicket {
            kind,
            generation: *generation,
        }
    }

    /// Whether `ticket` is the newest issued for its kind.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.generations.get(&ticket.kind).copied() == Some(ticket.generation)
    }

    fn accept(&self, ticket: &LoadTicket) -> bool {
        let current = self.is_current(ticket);
        if !current {
            debug!(kind = ?ticket.kind, generation = ticket.generation, "Discarding stale load result");
        }
        current
    }

    pub fn replace_students(&mut self, ticket: &LoadTicket, students: Vec<Student>) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.students.replace(students);
        true
    }

    pub fn replace_advisors(&mut self, ticket: &LoadTicket, advisors: Vec<Advisor>) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.advisors.replace(advisors);
        true
    }

    pub fn replace_progress(&mut self, ticket: &LoadTicket, progress: Vec<ProgressRecord>) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.progress.replace(progress);
        true
    }

    pub fn replace_department_stats(&mut self, ticket: &LoadTicket, stats: DepartmentStats) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.department_stats = Some(stats);
        true
    }

    pub fn student(&self, student_id: &str) -> Option<&Student> {
        self.students
            .items()
            .iter()
            .find(|s| s.student_id == student_id)
    }

    pub fn advisor(&self, advisor_id: &str) -> Option<&Advisor> {
        self.advisors
            .items()
            .iter()
            .find(|a| a.advisor_id == advisor_id)
    }

    /// Age of the most recently loaded collection, or "never".
    pub fn last_updated(&self) -> String {
        [
            self.students.loaded_at(),
            self.advisors.loaded_at(),
            self.progress.loaded_at(),
        ]
        .into_iter()
        .flatten()
        .max()
        .map(|at| format_age((Utc::now() - at).num_minutes()))
        .unwrap_or_else(|| "never".to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
