//! Session state owned by the gateway: the admin profile plus the
//! access/refresh token pair, persisted as one serialized record so a
//! partial write can never leave a half-logged-in session behind.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::GatewayError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: String,
    pub email: String,
    /// Raw role string from the backend (e.g. "OPS", "SUPPORT", "FINANCE",
    /// "SUPERADMIN", "SUPER_ADMIN"). Compared case-insensitively.
    pub role: String,
    #[serde(rename = "fullName", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub admin: Option<AdminProfile>,
}

impl Session {
    pub fn new(admin: AdminProfile, access_token: String, refresh_token: String) -> Self {
        Self {
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
            admin: Some(admin),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Role gate check. Any role containing "SUPER" (any casing) passes
    /// unconditionally; otherwise the uppercased role must be a member of the
    /// uppercased required set. Always false with no admin loaded.
    pub fn has_role(&self, required: &[&str]) -> bool {
        let Some(admin) = &self.admin else {
            return false;
        };
        let current = admin.role.to_uppercase();

        if current.contains("SUPER") {
            return true;
        }

        required.iter().any(|r| r.to_uppercase() == current)
    }
}

/// Explicit session store injected into the gateway: in-memory state behind a
/// lock, optionally mirrored to a single JSON file on disk.
#[derive(Debug)]
pub struct SessionStore {
    inner: RwLock<Session>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Hydrate from the given file. A missing or corrupt record is treated as
    /// logged-out rather than an error.
    pub fn load(path: PathBuf) -> Self {
        let session = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!("discarding corrupt session record at {:?}: {}", path, e);
                    Session::default()
                }
            },
            Err(_) => Session::default(),
        };

        Self {
            inner: RwLock::new(session),
            path: Some(path),
        }
    }

    /// Store without a disk mirror, for tests and embedding.
    pub fn in_memory() -> Self {
        Self {
            inner: RwLock::new(Session::default()),
            path: None,
        }
    }

    pub fn snapshot(&self) -> Session {
        self.inner.read().expect("session lock poisoned").clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.read().expect("session lock poisoned").access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner.read().expect("session lock poisoned").refresh_token.clone()
    }

    pub fn admin(&self) -> Option<AdminProfile> {
        self.inner.read().expect("session lock poisoned").admin.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().expect("session lock poisoned").is_authenticated()
    }

    pub fn has_role(&self, required: &[&str]) -> bool {
        self.inner.read().expect("session lock poisoned").has_role(required)
    }

    /// Replace the whole session in memory and on disk.
    pub fn replace(&self, session: Session) -> Result<(), GatewayError> {
        {
            let mut guard = self.inner.write().expect("session lock poisoned");
            *guard = session;
        }
        self.persist()
    }

    /// Apply rotated tokens from a refresh response. The admin profile is
    /// replaced only when the backend included one.
    pub fn apply_refresh(
        &self,
        access_token: String,
        refresh_token: String,
        admin: Option<AdminProfile>,
    ) -> Result<(), GatewayError> {
        {
            let mut guard = self.inner.write().expect("session lock poisoned");
            guard.access_token = Some(access_token);
            guard.refresh_token = Some(refresh_token);
            if let Some(admin) = admin {
                guard.admin = Some(admin);
            }
        }
        self.persist()
    }

    /// Wipe the session in memory and remove the record from disk.
    pub fn clear(&self) -> Result<(), GatewayError> {
        {
            let mut guard = self.inner.write().expect("session lock poisoned");
            *guard = Session::default();
        }
        if let Some(path) = &self.path {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), GatewayError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let snapshot = self.snapshot();
        let raw = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, raw)?;
        Ok(())
    }
}
