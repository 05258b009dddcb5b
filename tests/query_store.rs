//! Query store behaviour, including overlapping submissions.

mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::*;
use gastroassist::api::{QueryClient, RequestError, FALLBACK_ERROR_MESSAGE};
use gastroassist::config::Config;
use gastroassist::store::{QueryPhase, QueryState, QueryStore, Settled, SupersedePolicy};
use std::sync::Arc;

fn store_with(service: Arc<ScriptedService>, policy: SupersedePolicy) -> QueryStore {
    QueryStore::new(service, policy)
}

// -- single submissions -------------------------------------------------------

#[tokio::test]
async fn pending_is_observable_before_resolution() {
    let service = ScriptedService::new();
    let reply = service.expect_call();
    let mut store = store_with(service.clone(), SupersedePolicy::default());

    store.submit("What causes GERD?");
    settle_tasks().await;

    assert_eq!(store.phase(), QueryPhase::Pending);
    assert!(store.apply_completions().is_empty());
    assert_eq!(service.questions(), vec!["What causes GERD?"]);

    reply.send(Ok(gerd_payload())).unwrap();
    store.next_completion().await;

    assert_eq!(
        **store.state(),
        QueryState {
            response: Some(gerd_payload()),
            loading: false,
            error: None,
        }
    );
}

#[tokio::test]
async fn failure_keeps_previous_response() {
    let service = ScriptedService::new();
    let first = service.expect_call();
    let second = service.expect_call();
    let mut store = store_with(service, SupersedePolicy::default());

    store.submit("first");
    first.send(Ok(payload("first answer"))).unwrap();
    store.next_completion().await;

    store.submit("second");
    assert!(store.state().is_stale());
    second
        .send(Err(RequestError::Server {
            status: 400,
            detail: Some("Question too short".into()),
        }))
        .unwrap();
    store.next_completion().await;

    let state = store.state();
    assert_eq!(state.phase(), QueryPhase::Rejected);
    assert_eq!(state.error(), Some("Question too short"));
    assert_eq!(state.response().map(|p| p.answer.as_str()), Some("first answer"));
    assert!(!state.loading);
}

#[tokio::test]
async fn clear_during_pending_keeps_loading() {
    let service = ScriptedService::new();
    let reply = service.expect_call();
    let mut store = store_with(service, SupersedePolicy::default());

    store.submit("q");
    store.clear();
    assert!(store.state().loading);
    assert!(store.state().response().is_none());

    reply.send(Ok(payload("late"))).unwrap();
    store.next_completion().await;
    assert_eq!(store.phase(), QueryPhase::Fulfilled);
}

#[tokio::test]
async fn snapshot_is_stable_between_transitions() {
    let service = ScriptedService::new();
    let reply = service.expect_call();
    let mut store = store_with(service, SupersedePolicy::default());

    let idle = Arc::clone(store.state());
    store.clear();
    assert!(Arc::ptr_eq(&idle, store.state()));
    assert_eq!(store.revision(), 0);

    store.submit("q");
    let pending = Arc::clone(store.state());
    assert!(!Arc::ptr_eq(&idle, &pending));
    assert_eq!(store.revision(), 1);

    settle_tasks().await;
    store.apply_completions();
    assert!(Arc::ptr_eq(&pending, store.state()));

    reply.send(Ok(payload("a"))).unwrap();
    store.next_completion().await;
    assert_eq!(store.revision(), 2);
}

// -- overlapping submissions --------------------------------------------------

#[tokio::test]
async fn last_write_wins_applies_every_completion() {
    let service = ScriptedService::new();
    let a = service.expect_call();
    let b = service.expect_call();
    let mut store = store_with(service, SupersedePolicy::LastWriteWins);

    assert_eq!(store.submit("A"), 1);
    assert_eq!(store.submit("B"), 2);
    assert_eq!(store.in_flight(), 2);

    b.send(Ok(payload("B"))).unwrap();
    assert_eq!(
        store.next_completion().await,
        Some(Settled::Applied { generation: 2 })
    );
    // The first settlement ends loading even though A is still outstanding.
    assert!(!store.state().loading);

    a.send(Ok(payload("A"))).unwrap();
    assert_eq!(
        store.next_completion().await,
        Some(Settled::Applied { generation: 1 })
    );
    assert_eq!(
        store.state().response().map(|p| p.answer.as_str()),
        Some("A")
    );
    assert_eq!(store.in_flight(), 0);
}

#[tokio::test]
async fn latest_only_discards_stale_completions() {
    let service = ScriptedService::new();
    let a = service.expect_call();
    let b = service.expect_call();
    let mut store = store_with(service, SupersedePolicy::LatestOnly);

    store.submit("A");
    store.submit("B");

    a.send(Ok(payload("A"))).unwrap();
    assert_eq!(
        store.next_completion().await,
        Some(Settled::Discarded { generation: 1 })
    );
    assert_eq!(store.phase(), QueryPhase::Pending);

    b.send(Err(RequestError::Transport("reset".into()))).unwrap();
    assert_eq!(
        store.next_completion().await,
        Some(Settled::Applied { generation: 2 })
    );
    assert_eq!(store.state().error(), Some(FALLBACK_ERROR_MESSAGE));
    assert!(store.state().response().is_none());
}

#[tokio::test]
async fn latest_only_ignores_stale_after_latest_landed() {
    let service = ScriptedService::new();
    let a = service.expect_call();
    let b = service.expect_call();
    let mut store = store_with(service, SupersedePolicy::LatestOnly);

    store.submit("A");
    store.submit("B");

    b.send(Ok(payload("B"))).unwrap();
    store.next_completion().await;
    let after_b = Arc::clone(store.state());

    a.send(Ok(payload("A"))).unwrap();
    store.next_completion().await;
    assert!(Arc::ptr_eq(&after_b, store.state()));
}

// -- end to end through the HTTP client ---------------------------------------

fn http_store(base_url: &str) -> QueryStore {
    let mut config = Config::default();
    config.server.base_url = base_url.to_string();
    let client = QueryClient::from_config(&config).unwrap();
    QueryStore::new(Arc::new(client), config.query.supersede)
}

#[tokio::test]
async fn gerd_question_is_fulfilled_with_exact_payload() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(
            r#"{"answer": "GERD is caused by...",
                "sources": [{"title": "Study A", "snippet": "...", "confidence": 0.8}],
                "confidence_score": 0.75}"#,
        ))
        .await;

    let mut store = http_store(&backend.base_url());
    store.submit("What causes GERD?");
    store.next_completion().await;

    assert_eq!(store.phase(), QueryPhase::Fulfilled);
    assert_eq!(store.state().response(), Some(&gerd_payload()));
    assert_eq!(store.state().error(), None);
}

#[tokio::test]
async fn transport_failure_is_rejected_with_fallback() {
    let mut store = http_store(&closed_base_url());
    store.submit("test");
    store.next_completion().await;

    assert_eq!(store.phase(), QueryPhase::Rejected);
    assert_eq!(store.state().error(), Some(FALLBACK_ERROR_MESSAGE));
    assert!(store.state().response().is_none());
}

#[tokio::test]
async fn server_detail_is_rejected_with_detail() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::detail(400, serde_json::json!("Question too short")))
        .await;

    let mut store = http_store(&backend.base_url());
    store.submit("test");
    store.next_completion().await;

    assert_eq!(store.state().error(), Some("Question too short"));
}
