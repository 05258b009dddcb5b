//! Model-View-Intent primitives.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! Every change to a state goes through one pure `reduce` function. Views
//! read shared snapshots (`Arc<State>`) that are swapped whole, never edited
//! in place.

use std::sync::Arc;

/// Something that can change a state: a user action or a request completion.
pub trait Intent: Send + 'static {}

/// A self-contained, comparable snapshot of what a view renders.
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}

pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    /// `(State, Intent) -> State`, with no side effects.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;

    /// Apply `intent` to a shared snapshot.
    ///
    /// The `Arc` is replaced only when the new state differs, so readers that
    /// compare pointers see no change for no-op transitions. Returns whether
    /// the snapshot was replaced.
    fn reduce_shared(snapshot: &mut Arc<Self::State>, intent: Self::Intent) -> bool {
        let next = Self::reduce(Self::State::clone(snapshot), intent);
        if next == **snapshot {
            return false;
        }
        *snapshot = Arc::new(next);
        true
    }
}
