//! Session & Request Gateway: performs all outbound calls to the admin
//! backend, attaches credentials, and keeps the session valid transparently
//! to callers via a single refresh-and-retry pass on 401.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use url::Url;

use crate::config;
use crate::error::GatewayError;
use crate::session::{AdminProfile, Session, SessionStore};

/// `POST /auth/refresh` response. The backend may piggyback a fresh admin
/// profile on the rotation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    admin: Option<AdminProfile>,
}

pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    store: Arc<SessionStore>,
    /// Serializes token refresh so concurrent 401s produce at most one
    /// in-flight refresh call; waiters re-check the store and reuse the
    /// rotated token instead of spending their own refresh.
    refresh_gate: Mutex<()>,
}

impl Gateway {
    /// Gateway against the configured backend (see `config::ApiConfig`).
    pub fn new(store: Arc<SessionStore>) -> Result<Self, GatewayError> {
        let cfg = config::config();
        Self::with_base_url(&cfg.api.base_url, store)
    }

    /// Gateway against an explicit backend URL. Used directly by tests.
    pub fn with_base_url(base_url: &str, store: Arc<SessionStore>) -> Result<Self, GatewayError> {
        // Fail early on malformed bases rather than on the first request
        let parsed = Url::parse(base_url).map_err(|e| GatewayError::Api {
            status: 0,
            code: None,
            message: format!("invalid backend base URL {base_url:?}: {e}"),
        })?;

        let cfg = config::config();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.http.timeout_secs))
            .user_agent(cfg.http.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url: parsed.to_string().trim_end_matches('/').to_string(),
            store,
            refresh_gate: Mutex::new(()),
        })
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn session(&self) -> Session {
        self.store.snapshot()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    pub fn has_role(&self, required: &[&str]) -> bool {
        self.store.has_role(required)
    }

    /// Replace the entire session in memory and on disk. Called once the
    /// MFA verify step hands back the final token pair.
    pub fn login_finalize(
        &self,
        admin: AdminProfile,
        access_token: String,
        refresh_token: String,
    ) -> Result<(), GatewayError> {
        tracing::debug!("session established for {}", admin.email);
        self.store.replace(Session::new(admin, access_token, refresh_token))
    }

    /// Best-effort backend notification, then an unconditional local clear.
    /// The remote call failing never prevents the logout.
    pub async fn logout(&self) -> Result<(), GatewayError> {
        if let Some(refresh_token) = self.store.refresh_token() {
            let body = json!({ "refreshToken": refresh_token });
            if let Err(e) = self.request(Method::POST, "/auth/logout", Some(body), None).await {
                tracing::debug!("logout notification failed (ignored): {}", e);
            }
        }
        self.store.clear()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let value = self.request(Method::GET, path, None, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, GatewayError> {
        let value = self.request(Method::POST, path, Some(body), None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// POST with an explicit bearer credential. The stored access token is
    /// never consulted; this is how pre-authentication MFA calls run on the
    /// temp token.
    pub async fn post_with_bearer<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
        bearer: &str,
    ) -> Result<T, GatewayError> {
        let value = self.request(Method::POST, path, Some(body), Some(bearer)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, GatewayError> {
        let value = self.request(Method::PATCH, path, Some(body), None).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete(&self, path: &str) -> Result<Value, GatewayError> {
        self.request(Method::DELETE, path, None, None).await
    }

    /// Issue one backend call with credential decoration and the 401
    /// recovery protocol. `204 No Content` resolves to an empty object.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer_override: Option<&str>,
    ) -> Result<Value, GatewayError> {
        let bearer = match bearer_override {
            Some(explicit) => Some(explicit.to_string()),
            None => self.store.access_token(),
        };

        let res = self
            .dispatch(method.clone(), path, body.as_ref(), bearer.as_deref())
            .await?;

        // 401 recovery: never for auth endpoints (avoids recursing into the
        // refresh path), never for explicit-bearer calls, and only when a
        // refresh token exists - otherwise the 401 propagates unchanged.
        if res.status() == StatusCode::UNAUTHORIZED
            && bearer_override.is_none()
            && !is_auth_path(path)
            && self.store.refresh_token().is_some()
        {
            let fresh = self.refresh_access_token(bearer.as_deref()).await?;
            let retry = self
                .dispatch(method, path, body.as_ref(), Some(&fresh))
                .await?;
            // The retry's outcome stands as-is, even another 401
            return finish(retry).await;
        }

        finish(res).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        if config::config().http.log_requests {
            tracing::debug!("{} {}", method, url);
        }

        let mut req = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        Ok(req.send().await?)
    }

    /// Single-flight refresh. `stale` is the access token the failing
    /// request went out with; after acquiring the gate, a differing stored
    /// token means another task already rotated and we reuse its result.
    /// Any refresh failure clears the whole session.
    async fn refresh_access_token(&self, stale: Option<&str>) -> Result<String, GatewayError> {
        let _gate = self.refresh_gate.lock().await;

        if let Some(current) = self.store.access_token() {
            if stale != Some(current.as_str()) {
                return Ok(current);
            }
        }

        // May have been cleared by a concurrent failed refresh
        let Some(refresh_token) = self.store.refresh_token() else {
            return Err(GatewayError::SessionExpired);
        };

        tracing::debug!("access token rejected, refreshing session");
        let body = json!({ "refreshToken": refresh_token });
        let outcome = self
            .dispatch(Method::POST, "/auth/refresh", Some(&body), None)
            .await;

        let res = match outcome {
            Ok(res) if res.status().is_success() => res,
            Ok(res) => {
                tracing::warn!("session refresh rejected with status {}", res.status());
                self.store.clear()?;
                return Err(GatewayError::SessionExpired);
            }
            Err(e) => {
                tracing::warn!("session refresh failed: {}", e);
                self.store.clear()?;
                return Err(GatewayError::SessionExpired);
            }
        };

        let rotated: RefreshResponse = match res.json().await {
            Ok(rotated) => rotated,
            Err(e) => {
                tracing::warn!("unreadable refresh response: {}", e);
                self.store.clear()?;
                return Err(GatewayError::SessionExpired);
            }
        };

        // Persist before the retry fires so a crash cannot lose the rotation
        self.store.apply_refresh(
            rotated.access_token.clone(),
            rotated.refresh_token,
            rotated.admin,
        )?;

        Ok(rotated.access_token)
    }
}

fn is_auth_path(path: &str) -> bool {
    path.contains("/auth/login") || path.contains("/auth/refresh")
}

async fn finish(res: reqwest::Response) -> Result<Value, GatewayError> {
    let status = res.status();

    if status == StatusCode::NO_CONTENT {
        return Ok(Value::Object(Map::new()));
    }

    if status.is_success() {
        return Ok(res.json::<Value>().await?);
    }

    let body = res.text().await.unwrap_or_default();
    Err(GatewayError::from_response(status.as_u16(), &body))
}
