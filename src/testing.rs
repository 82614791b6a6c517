/// Test doubles for the host collaborators
use crate::api::{HttpResponse, HttpTransport};
use crate::config::PocketConfig;
use crate::credentials::{KeyValueStore, MemoryStore};
use crate::error::SaveError;
use crate::tabs::{TabInfo, TabSource};
use async_trait::async_trait;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use url::Url;

pub fn test_config() -> PocketConfig {
    PocketConfig::new("test-consumer-key", "chrome-extension://test/auth.html").unwrap()
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: Url,
    pub body: String,
}

/// Transport that replays scripted responses in order and records every request
#[derive(Default)]
pub struct FakeTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, String>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, response: HttpResponse) {
        self.responses.borrow_mut().push_back(Ok(response));
    }

    pub fn respond_ok(&self, body: Value) {
        self.respond(HttpResponse {
            status: 200,
            status_text: "OK".to_string(),
            body: body.to_string(),
        });
    }

    pub fn respond_status(&self, status: u16, status_text: &str) {
        self.respond(HttpResponse {
            status,
            status_text: status_text.to_string(),
            body: String::new(),
        });
    }

    pub fn fail(&self, message: &str) {
        self.responses.borrow_mut().push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_body(&self) -> Value {
        let requests = self.requests.borrow();
        let last = requests.last().expect("no request was sent");
        serde_json::from_str(&last.body).unwrap()
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn post_json(&self, url: &Url, body: String) -> Result<HttpResponse, SaveError> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.clone(),
            body,
        });
        match self.responses.borrow_mut().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(SaveError::Transport(message)),
            None => panic!("unexpected request to {}", url),
        }
    }
}

/// Tab source returning a fixed list
pub struct FakeTabs {
    tabs: Vec<TabInfo>,
    queried: Cell<usize>,
}

impl FakeTabs {
    pub fn new(tabs: Vec<TabInfo>) -> Self {
        FakeTabs {
            tabs,
            queried: Cell::new(0),
        }
    }

    pub fn with_url(url: &str) -> Self {
        Self::new(vec![TabInfo::new(1, url.to_string(), "Tab".to_string())])
    }

    pub fn times_queried(&self) -> usize {
        self.queried.get()
    }
}

#[async_trait(?Send)]
impl TabSource for FakeTabs {
    async fn active_tabs(&self) -> Result<Vec<TabInfo>, SaveError> {
        self.queried.set(self.queried.get() + 1);
        Ok(self.tabs.clone())
    }
}

/// Store whose writes to one key always fail
pub struct FailingStore {
    inner: MemoryStore,
    failing_key: &'static str,
}

impl FailingStore {
    pub fn new(failing_key: &'static str) -> Self {
        FailingStore {
            inner: MemoryStore::new(),
            failing_key,
        }
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SaveError> {
        if key == self.failing_key {
            return Err(SaveError::Storage("quota exceeded".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SaveError> {
        self.inner.remove(key)
    }
}
