/// JSON-over-POST calls against the Pocket v3 API
use crate::config::PocketConfig;
use crate::error::SaveError;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::{Map, Value};
use url::Url;

/// A JSON object, as sent to and returned by every endpoint
pub type JsonObject = Map<String, Value>;

pub const REQUEST_TOKEN_PATH: &str = "oauth/request";
pub const AUTHORIZE_PATH: &str = "oauth/authorize";
pub const ADD_PATH: &str = "add";

/// Raw response as seen by the transport, before status/body checks
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

/// The one network capability the client needs
///
/// Production: reqwest (fetch on wasm32)
/// Testing: scripted responses
#[async_trait(?Send)]
pub trait HttpTransport {
    /// POST a serialized JSON body; only transport failures are errors
    async fn post_json(&self, url: &Url, body: String) -> Result<HttpResponse, SaveError>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        ReqwestTransport {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &Url, body: String) -> Result<HttpResponse, SaveError> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json; charset=UTF-8")
            .header(ACCEPT, "application/json")
            // Pocket picks the response format from this header, not Accept
            .header("X-Accept", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| SaveError::Transport(e.to_string()))?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| SaveError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

/// Wraps a transport with the service root and response normalization
pub struct ApiClient<T> {
    transport: T,
    config: PocketConfig,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T, config: &PocketConfig) -> Self {
        ApiClient {
            transport,
            config: config.clone(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POST `payload` to `<root>/v3/<path>` and parse the JSON reply
    pub async fn call(&self, path: &str, payload: &JsonObject) -> Result<JsonObject, SaveError> {
        let url = self.config.api_endpoint(path)?;
        let body = serde_json::to_string(payload)?;

        log::debug!("POST {}", url);
        let response = self.transport.post_json(&url, body).await?;

        if response.status != 200 {
            log::warn!("{} answered {} {}", path, response.status, response.status_text);
            return Err(SaveError::HttpStatus {
                status: response.status,
                status_text: response.status_text,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}

/// Pull a string field out of a response object
pub fn string_field(object: &JsonObject, name: &'static str) -> Result<String, SaveError> {
    object
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(SaveError::MissingField(name))
}
