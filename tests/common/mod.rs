//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use gastroassist::api::{AnswerPayload, AnswerService, RequestError, Source};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::oneshot;

pub type Outcome = Result<AnswerPayload, RequestError>;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Base URL nothing listens on.
pub fn closed_base_url() -> String {
    format!("http://127.0.0.1:{}", free_port())
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- Payload helpers ----------------------------------------------------------

pub fn gerd_payload() -> AnswerPayload {
    AnswerPayload {
        answer: "GERD is caused by...".into(),
        sources: vec![Source {
            title: "Study A".into(),
            url: None,
            snippet: "...".into(),
            confidence: 0.8,
        }],
        confidence_score: 0.75,
    }
}

pub fn payload(answer: &str) -> AnswerPayload {
    AnswerPayload {
        answer: answer.into(),
        sources: vec![],
        confidence_score: 0.5,
    }
}

// -- Scripted service ---------------------------------------------------------

/// `AnswerService` whose replies are settled by the test.
///
/// Each call takes the next slot queued with [`ScriptedService::expect_call`]
/// and waits until the test sends the outcome through the returned sender.
/// Calls arriving with no slot queued fail as transport errors.
#[derive(Default)]
pub struct ScriptedService {
    slots: Mutex<VecDeque<oneshot::Receiver<Outcome>>>,
    questions: Mutex<Vec<String>>,
}

impl ScriptedService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn expect_call(&self) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.slots.lock().push_back(rx);
        tx
    }

    /// Questions received so far, in call order.
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().clone()
    }
}

#[async_trait]
impl AnswerService for ScriptedService {
    async fn submit(&self, question: &str) -> Result<AnswerPayload, RequestError> {
        self.questions.lock().push(question.to_string());
        let slot = self.slots.lock().pop_front();
        match slot {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(RequestError::Transport("reply dropped".into()))),
            None => Err(RequestError::Transport("unexpected call".into())),
        }
    }
}

/// Let spawned request tasks run up to their first await.
pub async fn settle_tasks() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}
