// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cache: the auth token and the last known user profile.
//!
//! Kept in a small JSON file between CLI invocations. Written on
//! login/register, refreshed on profile reads, removed on logout or when the
//! API rejects the token on a profile call.

use crate::error::{AppError, Result};
use crate::models::User;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What is persisted for a logged-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// File-backed session store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the session, if any. A missing file means "logged out".
    pub fn load(&self) -> Result<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Session(e.to_string())),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| AppError::Session(format!("Corrupt session file: {}", e)))
    }

    /// Persist a fresh session.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AppError::Session(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(session)
            .map_err(|e| AppError::Session(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| AppError::Session(e.to_string()))
    }

    /// Current token, or `Unauthorized` when logged out.
    pub fn token(&self) -> Result<String> {
        self.load()?
            .map(|s| s.token)
            .ok_or(AppError::Unauthorized)
    }

    /// Current token, if any. Unreadable sessions count as logged out.
    pub fn token_opt(&self) -> Option<String> {
        match self.load() {
            Ok(session) => session.map(|s| s.token),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable session");
                None
            }
        }
    }

    /// Cached user, if logged in.
    pub fn current_user(&self) -> Result<Option<User>> {
        Ok(self.load()?.map(|s| s.user))
    }

    /// Replace the cached user while keeping the token.
    pub fn update_user(&self, user: &User) -> Result<()> {
        match self.load()? {
            Some(mut session) => {
                session.user = user.clone();
                self.save(&session)
            }
            None => Ok(()),
        }
    }

    /// Remove the session. Succeeds when already logged out.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Session(e.to_string())),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token_opt().is_some()
    }
}
