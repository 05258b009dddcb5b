//! Query state store.
//!
//! Owns the session's single [`QueryState`], applies transitions through
//! [`QueryReducer`], and runs the request client in the background.
//!
//! # Flow
//!
//! ```text
//! submit(text) ──→ Submit ──→ Pending
//!      │
//!      └─ spawn ──→ AnswerService::submit ──→ completion channel
//!                                                   │
//! apply_completions / next_completion ←─────────────┘
//!      │
//!      └──→ Resolved | Failed ──→ Fulfilled | Rejected
//! ```
//!
//! The store is owned by one task (the UI loop or the `ask` command) and is
//! only mutated there. Request tasks never touch the state; they report back
//! over the completion channel and the owner applies the result.
//!
//! # Overlapping submissions
//!
//! A new submit does not cancel an earlier request. Every submission gets a
//! generation number, and [`SupersedePolicy`] decides what happens when an
//! older request settles after a newer one was issued.

mod intent;
mod reducer;
mod state;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::api::{AnswerPayload, AnswerService};
use crate::mvi::Reducer;

pub use intent::QueryIntent;
pub use reducer::QueryReducer;
pub use state::{QueryPhase, QueryState};

/// How completions of superseded submissions are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupersedePolicy {
    /// Apply every completion in arrival order; the last one to land wins.
    #[default]
    LastWriteWins,
    /// Apply only the completion of the most recent submission.
    LatestOnly,
}

/// Result of one request, already reduced to what the state needs.
#[derive(Debug)]
struct Completion {
    generation: u64,
    outcome: Result<AnswerPayload, String>,
}

/// What happened to a completion taken off the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied { generation: u64 },
    Discarded { generation: u64 },
}

pub struct QueryStore {
    state: Arc<QueryState>,
    revision: u64,
    generation: u64,
    in_flight: usize,
    policy: SupersedePolicy,
    service: Arc<dyn AnswerService>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl QueryStore {
    pub fn new(service: Arc<dyn AnswerService>, policy: SupersedePolicy) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            state: Arc::new(QueryState::default()),
            revision: 0,
            generation: 0,
            in_flight: 0,
            policy,
            service,
            completion_tx,
            completion_rx,
        }
    }

    /// Current snapshot. The same `Arc` is returned until a transition changes it.
    pub fn state(&self) -> &Arc<QueryState> {
        &self.state
    }

    pub fn phase(&self) -> QueryPhase {
        self.state.phase()
    }

    /// Bumped once per transition that changed the state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Generation of the most recent submission (0 before the first).
    pub fn latest_generation(&self) -> u64 {
        self.generation
    }

    /// Requests started but not yet taken off the completion channel.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn policy(&self) -> SupersedePolicy {
        self.policy
    }

    /// Start a request for `question` and move to `Pending`.
    ///
    /// The caller is responsible for rejecting blank questions. Must be called
    /// from within a tokio runtime. Returns the submission's generation.
    pub fn submit(&mut self, question: impl Into<String>) -> u64 {
        let question = question.into();
        self.generation += 1;
        let generation = self.generation;

        self.dispatch(QueryIntent::Submit);
        self.in_flight += 1;

        tracing::info!(generation, in_flight = self.in_flight, "Query submitted");

        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let outcome = service
                .submit(&question)
                .await
                .map_err(|err| err.user_message());
            // The receiver lives as long as the store; a send error only
            // means the store is gone and nobody is listening.
            let _ = tx.send(Completion {
                generation,
                outcome,
            });
        });

        generation
    }

    /// Drop the current answer and error. Does not touch `loading`.
    pub fn clear(&mut self) {
        if self.dispatch(QueryIntent::Clear) {
            tracing::debug!("Query state cleared");
        }
    }

    /// Apply every completion that has already arrived. Never waits.
    pub fn apply_completions(&mut self) -> Vec<Settled> {
        let mut settled = Vec::new();
        while let Ok(completion) = self.completion_rx.try_recv() {
            settled.push(self.settle(completion));
        }
        settled
    }

    /// Wait for the next completion and apply it.
    ///
    /// Pends forever when nothing is in flight; meant to be raced against
    /// other events in a `tokio::select!`. Cancel safe.
    pub async fn next_completion(&mut self) -> Option<Settled> {
        let completion = self.completion_rx.recv().await?;
        Some(self.settle(completion))
    }

    fn settle(&mut self, completion: Completion) -> Settled {
        let Completion {
            generation,
            outcome,
        } = completion;
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.policy == SupersedePolicy::LatestOnly && generation != self.generation {
            tracing::debug!(
                generation,
                latest = self.generation,
                "Discarding completion of superseded query"
            );
            return Settled::Discarded { generation };
        }

        let intent = match outcome {
            Ok(payload) => {
                tracing::info!(generation, "Query fulfilled");
                QueryIntent::Resolved { payload }
            }
            Err(message) => {
                tracing::info!(generation, error = %message, "Query rejected");
                QueryIntent::Failed { message }
            }
        };
        self.dispatch(intent);
        Settled::Applied { generation }
    }

    fn dispatch(&mut self, intent: QueryIntent) -> bool {
        let changed = QueryReducer::reduce_shared(&mut self.state, intent);
        if changed {
            self.revision += 1;
        }
        changed
    }
}
