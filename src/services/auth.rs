// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account service: register, login, logout and the user profile.
//!
//! Successful auth calls persist the token and user to the session store.
//! A 401 from a profile call means the token is no longer valid, so the
//! session is dropped.

use crate::error::{AppError, Result};
use crate::models::user::UserEnvelope;
use crate::models::{AuthResponse, ProfileUpdate, User};
use crate::services::api::ApiClient;
use crate::services::session::{Session, SessionStore};
use serde::Serialize;
use validator::Validate;

#[derive(Debug, Serialize, Validate)]
struct RegisterRequest {
    #[validate(email(message = "invalid email address"))]
    email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    password: String,
    #[validate(length(min = 1, max = 100, message = "name must not be empty"))]
    name: String,
}

#[derive(Debug, Serialize, Validate)]
struct LoginRequest {
    #[validate(length(min = 1, message = "email must not be empty"))]
    email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    password: String,
}

/// Authentication and profile calls.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
    session: SessionStore,
}

impl AuthService {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Create an account and start a session for it.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<AuthResponse> {
        let request = RegisterRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            name: name.trim().to_string(),
        };
        request.validate()?;

        let response: AuthResponse = self.api.post_json("/auth/register", None, &request).await?;
        self.start_session(&response)?;
        tracing::info!(user_id = %response.user.id, "Registered new account");
        Ok(response)
    }

    /// Log in and start a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        let response: AuthResponse = self.api.post_json("/auth/login", None, &request).await?;
        self.start_session(&response)?;
        tracing::info!(user_id = %response.user.id, "Logged in");
        Ok(response)
    }

    /// Forget the local session. There is no server-side logout.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// User cached at login or last profile read, without a network call.
    pub fn current_user(&self) -> Result<Option<User>> {
        self.session.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Fetch the profile from `GET /me` and refresh the cached copy.
    pub async fn get_profile(&self) -> Result<User> {
        let token = self.session.token()?;
        let result = self
            .api
            .get_json::<UserEnvelope>("/me", Some(&token))
            .await;
        let user = self.handle_profile_result(result)?;
        self.session.update_user(&user)?;
        Ok(user)
    }

    /// Send a partial profile update via `PUT /profile`.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        if update.is_empty() {
            return Err(AppError::Validation("Nothing to update".to_string()));
        }
        let token = self.session.token()?;
        let result = self
            .api
            .put_json::<_, UserEnvelope>("/profile", Some(&token), update)
            .await;
        let user = self.handle_profile_result(result)?;
        self.session.update_user(&user)?;
        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    fn start_session(&self, response: &AuthResponse) -> Result<()> {
        self.session.save(&Session {
            token: response.token.clone(),
            user: response.user.clone(),
        })
    }

    fn handle_profile_result(&self, result: Result<UserEnvelope>) -> Result<User> {
        match result {
            Ok(envelope) => Ok(envelope.user),
            Err(e) => {
                if e.status() == Some(401) {
                    tracing::warn!("Token rejected by the API, clearing session");
                    self.session.clear()?;
                }
                Err(e)
            }
        }
    }
}
