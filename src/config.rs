/// Fixed client configuration for the Pocket service
use crate::error::SaveError;
use url::Url;

pub const DEFAULT_SERVICE_ROOT: &str = "https://getpocket.com/";

/// Consumer key issued to this extension; override with POCKET_CONSUMER_KEY at build time
pub const DEFAULT_CONSUMER_KEY: &str = match option_env!("POCKET_CONSUMER_KEY") {
    Some(key) => key,
    None => "30559-c9bebc6f13a469d6e6417b38",
};

/// Page the service redirects to once the user has answered the consent prompt
pub const AUTH_CALLBACK_PAGE: &str = "auth.html";

const API_NAMESPACE: &str = "v3/";
const AUTHORIZE_PATH: &str = "auth/authorize";

#[derive(Debug, Clone, PartialEq)]
pub struct PocketConfig {
    service_root: Url,
    consumer_key: String,
    redirect_uri: String,
}

impl PocketConfig {
    pub fn new(
        consumer_key: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Result<Self, SaveError> {
        Ok(PocketConfig {
            service_root: Url::parse(DEFAULT_SERVICE_ROOT)?,
            consumer_key: consumer_key.into(),
            redirect_uri: redirect_uri.into(),
        })
    }

    /// Point the client at another deployment of the service
    pub fn with_service_root(mut self, root: &str) -> Result<Self, SaveError> {
        let mut url = Url::parse(root)?;
        // Url::join drops the last path segment unless it ends with a slash
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.service_root = url;
        Ok(self)
    }

    pub fn service_root(&self) -> &Url {
        &self.service_root
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// `<root>/v3/<path>`
    pub fn api_endpoint(&self, path: &str) -> Result<Url, SaveError> {
        let namespace = self.service_root.join(API_NAMESPACE)?;
        Ok(namespace.join(path.trim_start_matches('/'))?)
    }

    /// Consent page for a request token
    pub fn authorize_url(&self, request_token: &str) -> Result<Url, SaveError> {
        let mut url = self.service_root.join(AUTHORIZE_PATH)?;
        url.query_pairs_mut()
            .append_pair("request_token", request_token)
            .append_pair("redirect_uri", &self.redirect_uri);
        Ok(url)
    }
}
