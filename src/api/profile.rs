use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::errors::{AppError, Result};
use crate::utils::Validator;

const PROVIDER: &str = "profile";

/// An authenticated user session: the id and bearer token the profile
/// store hands out at sign-in. Stateless on the server side; dropping it
/// is the client half of sign-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub token: String,
}

/// Per-user profile document held by the remote store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub favorites: Vec<String>,
}

/// Seam over the remote profile document store, so session-level logic can
/// be tested against an in-memory implementation.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch_profile(&self, session: &Session) -> Result<Profile>;
    async fn update_favorites(&self, session: &Session, favorites: &[String]) -> Result<()>;
}

/// REST client for the auth/profile store.
///
/// Sign-in and sign-up are email+password exchanges for a bearer token;
/// the profile document is read with GET and updated with PATCH. Unlike
/// the market-data providers there is a single project API key, so no
/// rotation applies here.
#[derive(Clone)]
pub struct ProfileClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct AuthPayload {
    #[serde(rename = "localId")]
    user_id: String,
    #[serde(rename = "idToken")]
    token: String,
}

#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    error: AuthErrorDetail,
}

#[derive(Debug, Deserialize)]
struct AuthErrorDetail {
    message: String,
}

impl ProfileClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: super::http_client()?,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        Validator::validate_email(email)?;
        Validator::validate_password(password)?;
        let session = self.auth_call("accounts:signUp", email, password).await?;
        info!("signed up user {}", session.user_id);
        Ok(session)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        Validator::validate_email(email)?;
        let session = self
            .auth_call("accounts:signInWithPassword", email, password)
            .await?;
        info!("signed in user {}", session.user_id);
        Ok(session)
    }

    async fn auth_call(&self, endpoint: &str, email: &str, password: &str) -> Result<Session> {
        let url = format!("{}/{}?key={}", self.base_url, endpoint, self.api_key);

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            // Surface the store's own message; it is the one shown to the user.
            let message = response
                .json::<AuthErrorBody>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "authentication rejected".to_string());
            return Err(AppError::auth(message).into());
        }

        let payload: AuthPayload = response
            .json()
            .await
            .map_err(|e| AppError::parse(PROVIDER, e.to_string()))?;

        Ok(Session {
            user_id: payload.user_id,
            token: payload.token,
        })
    }

    fn profile_url(&self, session: &Session) -> String {
        format!("{}/profiles/{}", self.base_url, session.user_id)
    }
}

#[async_trait]
impl ProfileStore for ProfileClient {
    async fn fetch_profile(&self, session: &Session) -> Result<Profile> {
        let response = self
            .client
            .get(self.profile_url(session))
            .bearer_auth(&session.token)
            .send()
            .await?;

        // A fresh account has no document yet.
        if response.status() == StatusCode::NOT_FOUND {
            debug!("no profile document for {}, using empty", session.user_id);
            return Ok(Profile::default());
        }

        if !response.status().is_success() {
            return Err(AppError::api(
                PROVIDER,
                format!("profile fetch failed: HTTP {}", response.status()),
            )
            .into());
        }

        response
            .json::<Profile>()
            .await
            .map_err(|e| AppError::parse(PROVIDER, e.to_string()).into())
    }

    async fn update_favorites(&self, session: &Session, favorites: &[String]) -> Result<()> {
        let response = self
            .client
            .patch(self.profile_url(session))
            .bearer_auth(&session.token)
            .json(&json!({ "favorites": favorites }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::api(
                PROVIDER,
                format!("favorites update failed: HTTP {}", response.status()),
            )
            .into());
        }

        debug!(
            "favorites for {} now has {} symbols",
            session.user_id,
            favorites.len()
        );

        Ok(())
    }
}
