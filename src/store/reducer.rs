//! Reducer for the query store.

use crate::api::FALLBACK_ERROR_MESSAGE;
use crate::mvi::Reducer;

use super::intent::QueryIntent;
use super::state::QueryState;

/// Pure transition function for [`QueryState`].
///
/// Which completions reach the reducer is decided by the store; the reducer
/// applies whatever it is given.
pub struct QueryReducer;

impl Reducer for QueryReducer {
    type State = QueryState;
    type Intent = QueryIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            // Previous response stays visible until the new one lands.
            QueryIntent::Submit => QueryState {
                response: state.response,
                loading: true,
                error: None,
            },

            QueryIntent::Resolved { payload } => QueryState {
                response: Some(payload),
                loading: false,
                error: None,
            },

            QueryIntent::Failed { message } => {
                let message = if message.trim().is_empty() {
                    FALLBACK_ERROR_MESSAGE.to_string()
                } else {
                    message
                };
                QueryState {
                    response: state.response,
                    loading: false,
                    error: Some(message),
                }
            }

            QueryIntent::Clear => QueryState {
                response: None,
                loading: state.loading,
                error: None,
            },
        }
    }
}
