/// Active tab lookup
use crate::error::SaveError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Information about a browser tab, as returned by chrome.tabs.query
///
/// Chrome omits `url` and `title` for tabs the extension has no permission
/// to see, so everything but the flags is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TabInfo {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub index: i32,
}

impl TabInfo {
    pub fn new(id: i32, url: String, title: String) -> TabInfo {
        TabInfo {
            id: Some(id),
            url: Some(url),
            title: Some(title),
            pinned: false,
            index: 0,
        }
    }
}

/// Source of the tabs that are active in the current window
#[async_trait(?Send)]
pub trait TabSource {
    async fn active_tabs(&self) -> Result<Vec<TabInfo>, SaveError>;
}

/// URL of the first tab that has a non-empty one
pub fn active_tab_url(tabs: &[TabInfo]) -> Result<String, SaveError> {
    tabs.iter()
        .filter_map(|tab| tab.url.as_deref())
        .find(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or(SaveError::NoActiveTab)
}
