//! Request client for the answering service.
//!
//! One call, one `POST /api/query`. Failures are classified into
//! [`RequestError`] and reduced to a display string with
//! [`RequestError::user_message`] before they reach the query store.

mod client;
mod error;
mod types;

pub use client::{AnswerService, QueryClient};
pub use error::{RequestError, FALLBACK_ERROR_MESSAGE};
pub use types::{AnswerPayload, ErrorBody, QueryRequest, Source};
