/// Search box state with a trailing-edge debounce.
///
/// The caller supplies the clock, so the same type drives a real timer loop and
/// deterministic tests. Raw keystrokes update `search_text` immediately; the
/// trimmed, lower-cased `effective_query` only catches up once the input has been
/// quiet for the debounce window. A burst of edits collapses into one update
/// carrying the last value.
use std::time::{Duration, Instant};

use crate::model::{InternshipRecord, ALL_DOMAINS};
use crate::search;

/// Quiet period before keystrokes reach the effective query.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct QueryState {
    search_text: String,
    effective_query: String,
    domain_filter: String,
    window: Duration,
    last_edit: Option<Instant>,
}

impl QueryState {
    pub fn new(window: Duration) -> Self {
        Self {
            search_text: String::new(),
            effective_query: String::new(),
            domain_filter: ALL_DOMAINS.to_string(),
            window,
            last_edit: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn effective_query(&self) -> &str {
        &self.effective_query
    }

    pub fn domain_filter(&self) -> &str {
        &self.domain_filter
    }

    /// Record a keystroke. Supersedes any pending update.
    pub fn set_search_text(&mut self, text: impl Into<String>, now: Instant) {
        self.search_text = text.into();
        self.last_edit = Some(now);
    }

    /// Domain changes apply immediately; results must never be computed
    /// against a stale filter.
    pub fn set_domain_filter(&mut self, domain: impl Into<String>) {
        self.domain_filter = domain.into();
    }

    pub fn is_pending(&self) -> bool {
        self.last_edit.is_some()
    }

    /// When the pending update becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.last_edit.map(|at| at + self.window)
    }

    /// Apply the pending update if the window has elapsed. Returns `true` when
    /// the effective query changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(due) if now >= due => {
                self.last_edit = None;
                let next = self.search_text.trim().to_lowercase();
                if next == self.effective_query {
                    return false;
                }
                self.effective_query = next;
                true
            }
            _ => false,
        }
    }

    /// Results for the current effective query and domain filter.
    pub fn results<'a>(&self, records: &'a [InternshipRecord]) -> Vec<&'a InternshipRecord> {
        search::search(records, &self.effective_query, &self.domain_filter)
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }
}
