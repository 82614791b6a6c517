/// Top-level popup and consent-callback sequences
///
/// These are the only places errors are caught: everything below returns
/// `Result` and the failure is rendered as a status line here.
use crate::api::{ApiClient, HttpTransport};
use crate::auth::{AuthFlow, WindowOpener};
use crate::credentials::{CredentialStore, KeyValueStore};
use crate::error::SaveError;
use crate::items::{AddedItem, add_item};
use crate::tabs::{TabSource, active_tab_url};
use std::fmt;
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Authorizing,
    Authorized { username: String },
    Saving { url: String },
    Saved { title: String, excerpt: String },
    Failed { message: String },
}

impl Status {
    pub fn failed(err: &SaveError) -> Status {
        Status::Failed {
            message: format!("{}. See the browser console for details.", err),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Status::Authorizing | Status::Saving { .. })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Authorizing => write!(f, "Authorizing..."),
            Status::Authorized { username } => {
                write!(
                    f,
                    "Authorized as {}. Press the toolbar button again to save.",
                    username
                )
            }
            Status::Saving { url } => write!(f, "Saving {}...", url),
            Status::Saved { title, excerpt } => write!(f, "Saved {}.\n{}", title, excerpt),
            Status::Failed { message } => write!(f, "{}", message),
        }
    }
}

/// Where status updates go (the popup body, in the extension)
pub trait StatusSink {
    fn report(&self, status: &Status);
}

impl<F: Fn(&Status)> StatusSink for F {
    fn report(&self, status: &Status) {
        self(status)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The consent page was opened; the popup's work ends here
    AuthorizationStarted(Url),
    Saved(AddedItem),
}

fn report_error(err: &SaveError, sink: &impl StatusSink) {
    log::error!("{:?}", err);
    sink.report(&Status::failed(err));
}

/// What the toolbar popup runs each time it opens
pub struct SaveFlow<'a, T, S, B, W> {
    api: &'a ApiClient<T>,
    credentials: &'a CredentialStore<S>,
    tabs: &'a B,
    auth: AuthFlow<'a, T, S, W>,
}

impl<'a, T, S, B, W> SaveFlow<'a, T, S, B, W>
where
    T: HttpTransport,
    S: KeyValueStore,
    B: TabSource,
    W: WindowOpener,
{
    pub fn new(
        api: &'a ApiClient<T>,
        credentials: &'a CredentialStore<S>,
        tabs: &'a B,
        auth: AuthFlow<'a, T, S, W>,
    ) -> Self {
        SaveFlow {
            api,
            credentials,
            tabs,
            auth,
        }
    }

    pub async fn try_run(&self, sink: &impl StatusSink) -> Result<SaveOutcome, SaveError> {
        if !self.credentials.is_authenticated() {
            sink.report(&Status::Authorizing);
            // Opening the consent tab closes the popup, so nothing waits on the result
            let consent_url = self.auth.begin_auth_flow().await?;
            return Ok(SaveOutcome::AuthorizationStarted(consent_url));
        }

        let tabs = self.tabs.active_tabs().await?;
        let url = active_tab_url(&tabs)?;
        sink.report(&Status::Saving { url: url.clone() });

        let item = add_item(self.api, self.credentials, &url).await?;
        log::info!("Saved {}", url);
        sink.report(&Status::Saved {
            title: item.title.clone(),
            excerpt: item.excerpt.clone(),
        });
        Ok(SaveOutcome::Saved(item))
    }

    /// Like `try_run`, with failures rendered to `sink` instead of returned
    pub async fn run(&self, sink: &impl StatusSink) -> Option<SaveOutcome> {
        match self.try_run(sink).await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                report_error(&err, sink);
                None
            }
        }
    }
}

/// What auth.html runs once the service redirects back
pub async fn run_auth_callback<T, S, W>(
    auth: &AuthFlow<'_, T, S, W>,
    sink: &impl StatusSink,
) -> Option<String>
where
    T: HttpTransport,
    S: KeyValueStore,
    W: WindowOpener,
{
    sink.report(&Status::Authorizing);
    match auth.complete_auth_flow().await {
        Ok(grant) => {
            sink.report(&Status::Authorized {
                username: grant.username.clone(),
            });
            Some(grant.username)
        }
        Err(err) => {
            report_error(&err, sink);
            None
        }
    }
}
