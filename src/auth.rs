/// Three-legged OAuth handshake with the Pocket service
///
/// The handshake is split in two because the consent step happens in a
/// separate browser tab that the popup cannot wait on:
/// 1. `begin_auth_flow`: fetch a request token, stash it, open the consent page
/// 2. (user approves; the service redirects to auth.html)
/// 3. `complete_auth_flow`: trade the stashed token for an access token
///
/// The only state shared between the two halves is what `CredentialStore`
/// persists.
use crate::api::{
    AUTHORIZE_PATH, ApiClient, HttpTransport, JsonObject, REQUEST_TOKEN_PATH, string_field,
};
use crate::config::PocketConfig;
use crate::credentials::{CredentialStore, KeyValueStore};
use crate::error::SaveError;
use serde_json::Value;
use std::cell::Cell;
use url::Url;

/// Opens a URL in a new top-level browsing context
#[cfg_attr(test, mockall::automock)]
pub trait WindowOpener {
    fn open(&self, url: &Url) -> Result<(), SaveError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    RequestingToken,
    AwaitingUserConsent,
    Authenticated,
}

/// Outcome of a completed handshake
#[derive(Debug, Clone, PartialEq)]
pub struct AccessGrant {
    pub username: String,
}

pub struct AuthFlow<'a, T, S, W> {
    config: &'a PocketConfig,
    api: &'a ApiClient<T>,
    credentials: &'a CredentialStore<S>,
    opener: &'a W,
    requesting: Cell<bool>,
}

impl<'a, T, S, W> AuthFlow<'a, T, S, W>
where
    T: HttpTransport,
    S: KeyValueStore,
    W: WindowOpener,
{
    pub fn new(
        config: &'a PocketConfig,
        api: &'a ApiClient<T>,
        credentials: &'a CredentialStore<S>,
        opener: &'a W,
    ) -> Self {
        AuthFlow {
            config,
            api,
            credentials,
            opener,
            requesting: Cell::new(false),
        }
    }

    pub fn state(&self) -> AuthState {
        if self.credentials.is_authenticated() {
            AuthState::Authenticated
        } else if self.requesting.get() {
            AuthState::RequestingToken
        } else if matches!(self.credentials.load_pending_request_token(), Ok(Some(_))) {
            AuthState::AwaitingUserConsent
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Start the handshake; returns the consent URL that was opened
    ///
    /// A stale pending token from an earlier attempt is overwritten.
    pub async fn begin_auth_flow(&self) -> Result<Url, SaveError> {
        self.requesting.set(true);
        let token = self.request_token().await;
        self.requesting.set(false);
        let token = token?;

        self.credentials.save_pending_request_token(&token)?;
        let url = self.config.authorize_url(&token)?;
        log::info!("Opening consent page");
        self.opener.open(&url)?;
        Ok(url)
    }

    /// Finish the handshake from the redirect page
    pub async fn complete_auth_flow(&self) -> Result<AccessGrant, SaveError> {
        let request_token = self
            .credentials
            .load_pending_request_token()?
            .ok_or(SaveError::MissingPendingToken)?;

        let payload = JsonObject::from_iter([
            (
                "consumer_key".to_string(),
                Value::String(self.credentials.consumer_key().to_string()),
            ),
            ("code".to_string(), Value::String(request_token)),
        ]);
        let response = self.api.call(AUTHORIZE_PATH, &payload).await?;
        let access_token = string_field(&response, "access_token")?;
        let username = string_field(&response, "username")?;

        // Credentials first: if the write fails the pending token is still there to retry with
        self.credentials.save_access_credentials(&access_token, &username)?;
        self.credentials.clear_pending_request_token()?;
        log::info!("Authorized as {}", username);

        Ok(AccessGrant { username })
    }

    async fn request_token(&self) -> Result<String, SaveError> {
        let payload = JsonObject::from_iter([
            (
                "consumer_key".to_string(),
                Value::String(self.credentials.consumer_key().to_string()),
            ),
            (
                "redirect_uri".to_string(),
                Value::String(self.config.redirect_uri().to_string()),
            ),
        ]);
        log::info!("Requesting OAuth request token");
        let response = self.api.call(REQUEST_TOKEN_PATH, &payload).await?;
        string_field(&response, "code")
    }
}
