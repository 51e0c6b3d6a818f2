mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use baft_admin::gateway::Gateway;
use baft_admin::session::{AdminProfile, Session, SessionStore};

#[tokio::test]
async fn concurrent_unauthorized_requests_share_one_refresh() -> Result<()> {
    let backend = common::spawn_backend().await?;

    let store = Arc::new(SessionStore::in_memory());
    // Every task starts with the same stale token, so each of them sees a
    // 401 and races into the refresh path together
    store.replace(Session {
        access_token: Some("A0".to_string()),
        refresh_token: Some("R1".to_string()),
        admin: Some(AdminProfile {
            id: "adm-1".to_string(),
            email: "ops@baft.in".to_string(),
            role: "OPS".to_string(),
            full_name: None,
        }),
    })?;
    let gateway = Arc::new(Gateway::with_base_url(&backend.base_url, store.clone())?);

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let gateway = gateway.clone();
        tasks.push(tokio::spawn(async move {
            gateway.get::<Value>("/users").await
        }));
    }

    for task in tasks {
        let page = task.await??;
        assert_eq!(page["data"][0]["id"], "u_1");
    }

    assert_eq!(
        backend.state.refresh_calls.load(Ordering::SeqCst),
        1,
        "all waiters must reuse the single rotation"
    );
    assert_eq!(store.access_token().as_deref(), Some("A2"));
    Ok(())
}
