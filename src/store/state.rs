//! State of the single current query.

use crate::api::AnswerPayload;
use crate::mvi::UiState;

/// Lifecycle phase, derived from [`QueryState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    /// Nothing submitted yet, or everything cleared.
    Idle,
    /// A request is in flight.
    Pending,
    /// The last settled request produced an answer.
    Fulfilled,
    /// The last settled request failed.
    Rejected,
}

/// The one query state of a session.
///
/// Invariants, maintained by [`QueryReducer`](super::QueryReducer):
/// - `loading` and `error` are never both set.
/// - `error` is cleared when a submission begins.
/// - `response` survives a new submission (shown as stale) and is dropped only
///   by a clear.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryState {
    pub response: Option<AnswerPayload>,
    pub loading: bool,
    pub error: Option<String>,
}

impl UiState for QueryState {}

impl QueryState {
    pub fn phase(&self) -> QueryPhase {
        if self.loading {
            QueryPhase::Pending
        } else if self.error.is_some() {
            QueryPhase::Rejected
        } else if self.response.is_some() {
            QueryPhase::Fulfilled
        } else {
            QueryPhase::Idle
        }
    }

    pub fn response(&self) -> Option<&AnswerPayload> {
        self.response.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a response is on screen but a newer request is in flight.
    pub fn is_stale(&self) -> bool {
        self.loading && self.response.is_some()
    }
}
