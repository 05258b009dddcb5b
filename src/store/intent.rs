//! Intents for the query store.

use crate::api::AnswerPayload;
use crate::mvi::Intent;

/// Everything that can change the query state.
#[derive(Debug, Clone)]
pub enum QueryIntent {
    /// A question was handed to the request client.
    Submit,

    /// The request client produced an answer.
    Resolved { payload: AnswerPayload },

    /// The request client failed; `message` is already the display string.
    Failed { message: String },

    /// Drop the current answer and error.
    Clear,
}

impl Intent for QueryIntent {}
