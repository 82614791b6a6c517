/// Host-browser implementations of the collaborator traits
use crate::api::{ApiClient, ReqwestTransport};
use crate::auth::{AuthFlow, WindowOpener};
use crate::config::{AUTH_CALLBACK_PAGE, DEFAULT_CONSUMER_KEY, PocketConfig};
use crate::credentials::{CredentialStore, KeyValueStore};
use crate::error::SaveError;
use crate::flow::SaveFlow;
use crate::tabs::{TabInfo, TabSource};
use async_trait::async_trait;
use url::Url;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTabs() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    fn extensionUrl(path: &str) -> Result<String, JsValue>;
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn window() -> Result<web_sys::Window, SaveError> {
    web_sys::window().ok_or_else(|| SaveError::Browser("no window object".to_string()))
}

/// window.localStorage, shared by the popup and auth.html
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    pub fn new() -> Result<Self, SaveError> {
        let storage = window()?
            .local_storage()
            .map_err(|e| SaveError::Storage(describe(&e)))?
            .ok_or_else(|| SaveError::Storage("localStorage is unavailable".to_string()))?;
        Ok(LocalStorageStore { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError> {
        self.storage
            .get_item(key)
            .map_err(|e| SaveError::Storage(describe(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SaveError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| SaveError::Storage(describe(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), SaveError> {
        self.storage
            .remove_item(key)
            .map_err(|e| SaveError::Storage(describe(&e)))
    }
}

/// chrome.tabs, via the JS bridge
pub struct ChromeTabs;

#[async_trait(?Send)]
impl TabSource for ChromeTabs {
    async fn active_tabs(&self) -> Result<Vec<TabInfo>, SaveError> {
        let tabs_js = getActiveTabs()
            .await
            .map_err(|e| SaveError::Browser(format!("Failed to query tabs: {}", describe(&e))))?;
        serde_wasm_bindgen::from_value(tabs_js)
            .map_err(|e| SaveError::Browser(format!("Failed to parse tabs: {}", e)))
    }
}

pub struct BrowserWindow;

impl WindowOpener for BrowserWindow {
    fn open(&self, url: &Url) -> Result<(), SaveError> {
        match window()?.open_with_url_and_target(url.as_str(), "_blank") {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(SaveError::Browser("the consent window was blocked".to_string())),
            Err(e) => Err(SaveError::Browser(describe(&e))),
        }
    }
}

/// Everything an extension page needs, wired to the real browser
pub struct BrowserServices {
    config: PocketConfig,
    api: ApiClient<ReqwestTransport>,
    credentials: CredentialStore<LocalStorageStore>,
    tabs: ChromeTabs,
    window: BrowserWindow,
}

impl BrowserServices {
    pub fn connect() -> Result<Self, SaveError> {
        let redirect_uri =
            extensionUrl(AUTH_CALLBACK_PAGE).map_err(|e| SaveError::Browser(describe(&e)))?;
        let config = PocketConfig::new(DEFAULT_CONSUMER_KEY, redirect_uri)?;

        Ok(BrowserServices {
            api: ApiClient::new(ReqwestTransport::new(), &config),
            credentials: CredentialStore::new(LocalStorageStore::new()?, config.consumer_key()),
            config,
            tabs: ChromeTabs,
            window: BrowserWindow,
        })
    }

    pub fn auth_flow(&self) -> AuthFlow<'_, ReqwestTransport, LocalStorageStore, BrowserWindow> {
        AuthFlow::new(&self.config, &self.api, &self.credentials, &self.window)
    }

    pub fn save_flow(
        &self,
    ) -> SaveFlow<'_, ReqwestTransport, LocalStorageStore, ChromeTabs, BrowserWindow> {
        SaveFlow::new(&self.api, &self.credentials, &self.tabs, self.auth_flow())
    }
}
