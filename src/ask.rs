//! One-shot `ask` command.
//!
//! Drives the same [`QueryStore`] as the TUI: submit, wait for the terminal
//! transition, print the result.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use crate::api::{AnswerPayload, AnswerService};
use crate::cli::AskArgs;
use crate::store::{QueryPhase, QueryStore, SupersedePolicy};

/// Exit code for a request that failed.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code for a blank question.
pub const EXIT_USAGE: u8 = 2;

pub async fn run(
    service: Arc<dyn AnswerService>,
    policy: SupersedePolicy,
    args: &AskArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<ExitCode> {
    let question = args.question_text();
    if question.trim().is_empty() {
        writeln!(err, "Error: question must not be empty")?;
        writeln!(err, "Usage: gastroassist ask [--json] <QUESTION>...")?;
        return Ok(ExitCode::from(EXIT_USAGE));
    }

    let mut store = QueryStore::new(service, policy);
    store.submit(question);

    while store.phase() == QueryPhase::Pending {
        if store.next_completion().await.is_none() {
            break;
        }
    }

    let state = Arc::clone(store.state());
    match (state.response(), state.error()) {
        (_, Some(message)) => {
            writeln!(err, "Error: {}", message)?;
            Ok(ExitCode::from(EXIT_FAILURE))
        }
        (Some(payload), None) => {
            if args.json {
                let json = serde_json::to_string_pretty(payload).map_err(io::Error::other)?;
                writeln!(out, "{}", json)?;
            } else {
                out.write_all(format_answer(payload).as_bytes())?;
            }
            Ok(ExitCode::SUCCESS)
        }
        (None, None) => {
            writeln!(err, "Error: {}", crate::api::FALLBACK_ERROR_MESSAGE)?;
            Ok(ExitCode::from(EXIT_FAILURE))
        }
    }
}

/// Plain-text rendering of an answer for stdout.
pub fn format_answer(payload: &AnswerPayload) -> String {
    let mut text = String::new();
    text.push_str(payload.answer.trim_end());
    text.push('\n');

    if !payload.sources.is_empty() {
        text.push_str("\nSources:\n");
        for (idx, source) in payload.sources.iter().enumerate() {
            text.push_str(&format!(
                "  {}. {} ({}%)\n",
                idx + 1,
                source.title,
                source.confidence_percent()
            ));
            if let Some(url) = source.url.as_deref().filter(|u| !u.is_empty()) {
                text.push_str(&format!("     {}\n", url));
            }
            if !source.snippet.trim().is_empty() {
                text.push_str(&format!("     {}\n", source.snippet.trim()));
            }
        }
    }

    text.push_str(&format!("\nConfidence: {}%\n", payload.confidence_percent()));
    text
}
