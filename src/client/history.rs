use std::collections::VecDeque;

use tracing::debug;

use crate::{client::relay::RelayError, wheel::Outcome};

/// Number of winners kept in the session history.
pub const HISTORY_LEN: usize = 5;

const EMPTY_PLACEHOLDER: &str = "No spins yet";
const LOADING_PLACEHOLDER: &str = "Loading history...";

/// Rolling buffer of this session's winners, newest first.
#[derive(Debug, Clone, Default)]
pub struct SpinHistory {
    entries: VecDeque<Outcome>,
}

impl SpinHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a winner to the front, dropping the oldest beyond [`HISTORY_LEN`].
    pub fn record(&mut self, outcome: Outcome) {
        self.entries.push_front(outcome);
        self.entries.truncate(HISTORY_LEN);
    }

    /// Winners newest first.
    pub fn entries(&self) -> impl Iterator<Item = Outcome> + '_ {
        self.entries.iter().copied()
    }

    /// Number of recorded winners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display form of the session history.
    pub fn view(&self) -> HistoryView {
        if self.entries.is_empty() {
            HistoryView::Empty
        } else {
            HistoryView::Entries(self.entries().map(|o| o.label().to_string()).collect())
        }
    }
}

/// What the history panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryView {
    /// Recent results, newest first.
    Entries(Vec<String>),
    /// The log holds no spins.
    Empty,
    /// The relay could not be reached; shown instead of an error.
    Loading,
}

impl HistoryView {
    /// Build the view from a file-backed history fetch.
    pub fn from_fetch(result: Result<Vec<String>, RelayError>) -> Self {
        match result {
            Ok(entries) if entries.is_empty() => HistoryView::Empty,
            Ok(entries) => HistoryView::Entries(entries),
            Err(err) => {
                debug!(error = %err, "history fetch failed");
                HistoryView::Loading
            }
        }
    }

    /// Lines to render, one per entry or a single placeholder.
    pub fn lines(&self) -> Vec<String> {
        match self {
            HistoryView::Entries(entries) => entries.clone(),
            HistoryView::Empty => vec![EMPTY_PLACEHOLDER.to_string()],
            HistoryView::Loading => vec![LOADING_PLACEHOLDER.to_string()],
        }
    }
}
