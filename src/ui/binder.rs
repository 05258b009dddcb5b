//! View binder between the presentation layer and the query store.
//!
//! The only logic that lives here is the blank-input check; everything else
//! forwards to [`QueryStore`].

use std::sync::Arc;

use crate::api::AnswerService;
use crate::store::{QueryPhase, QueryState, QueryStore, Settled, SupersedePolicy};

pub struct QueryBinder {
    store: QueryStore,
}

impl QueryBinder {
    pub fn new(service: Arc<dyn AnswerService>, policy: SupersedePolicy) -> Self {
        Self {
            store: QueryStore::new(service, policy),
        }
    }

    /// Read-only snapshot. Pointer-equal across calls until the next transition.
    pub fn state(&self) -> Arc<QueryState> {
        Arc::clone(self.store.state())
    }

    pub fn phase(&self) -> QueryPhase {
        self.store.phase()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Submit `text` unless it is blank. Returns whether a request was started.
    pub fn trigger_submit(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.store.submit(text);
        true
    }

    pub fn trigger_clear(&mut self) {
        self.store.clear();
    }

    /// Apply completions that have already arrived. Returns true if any did.
    pub fn sync(&mut self) -> bool {
        !self.store.apply_completions().is_empty()
    }

    /// Wait for the next completion. Cancel safe.
    pub async fn next_completion(&mut self) -> Option<Settled> {
        self.store.next_completion().await
    }
}
