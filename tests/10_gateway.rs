mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};

use baft_admin::error::GatewayError;
use baft_admin::gateway::Gateway;
use baft_admin::session::{AdminProfile, Session, SessionStore};

fn ops_admin() -> AdminProfile {
    AdminProfile {
        id: "adm-1".to_string(),
        email: "ops@baft.in".to_string(),
        role: "OPS".to_string(),
        full_name: None,
    }
}

fn store_with_tokens(access: &str, refresh: Option<&str>) -> Result<Arc<SessionStore>> {
    let store = Arc::new(SessionStore::in_memory());
    store.replace(Session {
        access_token: Some(access.to_string()),
        refresh_token: refresh.map(str::to_string),
        admin: Some(ops_admin()),
    })?;
    Ok(store)
}

#[tokio::test]
async fn stored_token_rides_as_bearer() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let store = store_with_tokens("A1", Some("R1"))?;
    let gateway = Gateway::with_base_url(&backend.base_url, store)?;

    let echoed: Value = gateway.get("/echo-auth").await?;
    assert_eq!(echoed["authorization"], json!("Bearer A1"));
    Ok(())
}

#[tokio::test]
async fn explicit_bearer_replaces_stored_token() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let store = store_with_tokens("A1", Some("R1"))?;
    let gateway = Gateway::with_base_url(&backend.base_url, store)?;

    let echoed: Value = gateway
        .post_with_bearer("/echo-auth", json!({}), "temp-override")
        .await?;
    assert_eq!(echoed["authorization"], json!("Bearer temp-override"));
    Ok(())
}

#[tokio::test]
async fn unauthorized_request_refreshes_and_retries_once() -> Result<()> {
    let backend = common::spawn_backend().await?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");
    let store = Arc::new(SessionStore::load(path.clone()));
    // Stale access token; the stub only honors A1 until a refresh rotates it
    store.replace(Session {
        access_token: Some("A0".to_string()),
        refresh_token: Some("R1".to_string()),
        admin: Some(ops_admin()),
    })?;
    let gateway = Gateway::with_base_url(&backend.base_url, store.clone())?;

    let page: Value = gateway.get("/users").await?;
    assert_eq!(page["data"][0]["email"], json!("alice@example.com"));
    assert_eq!(backend.state.refresh_calls.load(Ordering::SeqCst), 1);

    // Rotated pair landed in memory and on disk
    assert_eq!(store.access_token().as_deref(), Some("A2"));
    assert_eq!(store.refresh_token().as_deref(), Some("R2"));
    let record: Session = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(record.access_token.as_deref(), Some("A2"));
    Ok(())
}

#[tokio::test]
async fn failed_refresh_clears_the_session() -> Result<()> {
    let backend = common::spawn_backend().await?;
    backend.state.refresh_ok.store(false, Ordering::SeqCst);

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");
    let store = Arc::new(SessionStore::load(path.clone()));
    store.replace(Session {
        access_token: Some("A0".to_string()),
        refresh_token: Some("R1".to_string()),
        admin: Some(ops_admin()),
    })?;
    let gateway = Gateway::with_base_url(&backend.base_url, store.clone())?;

    let err = gateway.get::<Value>("/users").await.unwrap_err();
    assert!(err.is_session_expired(), "got {err:?}");
    assert!(!store.is_authenticated());
    assert!(!path.exists(), "session record should be removed");
    Ok(())
}

#[tokio::test]
async fn unauthorized_without_refresh_token_propagates() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let store = store_with_tokens("A0", None)?;
    let gateway = Gateway::with_base_url(&backend.base_url, store)?;

    let err = gateway.get::<Value>("/users").await.unwrap_err();
    match err {
        GatewayError::Api { status, .. } => assert_eq!(status, 401),
        other => panic!("expected the raw 401, got {other:?}"),
    }
    assert_eq!(backend.state.refresh_calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn no_content_resolves_to_empty_object() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let store = store_with_tokens("A1", Some("R1"))?;
    let gateway = Gateway::with_base_url(&backend.base_url, store)?;

    let value: Value = gateway.get("/no-content").await?;
    assert_eq!(value, json!({}));
    Ok(())
}

#[tokio::test]
async fn error_envelope_is_surfaced() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let store = store_with_tokens("A1", Some("R1"))?;
    let gateway = Gateway::with_base_url(&backend.base_url, store)?;

    let err = gateway.get::<Value>("/forbidden").await.unwrap_err();
    match err {
        GatewayError::Api { status, code, message } => {
            assert_eq!(status, 403);
            assert_eq!(code.as_deref(), Some("MAINTENANCE_LOCKED"));
            assert_eq!(message, "Maintenance config is locked");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_generic_message() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let store = store_with_tokens("A1", Some("R1"))?;
    let gateway = Gateway::with_base_url(&backend.base_url, store)?;

    let err = gateway.get::<Value>("/broken").await.unwrap_err();
    match err {
        GatewayError::Api { status, code, message } => {
            assert_eq!(status, 500);
            assert_eq!(code, None);
            assert_eq!(message, "Request failed");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn valid_token_passes_body_through_unmodified() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let store = store_with_tokens("A1", Some("R1"))?;
    let gateway = Gateway::with_base_url(&backend.base_url, store)?;

    let page: Value = gateway.get("/users").await?;
    assert_eq!(
        page,
        json!({
            "data": [{
                "id": "u_1",
                "email": "alice@example.com",
                "status": "ACTIVE",
                "createdAt": "2024-01-01T00:00:00Z"
            }],
            "pagination": { "page": 1, "limit": 20, "total": 1, "totalPages": 1 }
        })
    );
    assert_eq!(backend.state.refresh_calls.load(Ordering::SeqCst), 0);
    Ok(())
}
