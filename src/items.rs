/// Adding a URL to the user's list
/// See https://getpocket.com/developer/docs/v3/add
use crate::api::{ADD_PATH, ApiClient, HttpTransport, JsonObject};
use crate::credentials::{CredentialStore, KeyValueStore};
use crate::error::SaveError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The item the service created, as echoed back by `add`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AddedItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    /// Everything else the service reports (item_id, resolved_url, word_count, ...)
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Save `url`; the caller has already checked `is_authenticated`
pub async fn add_item<T, S>(
    api: &ApiClient<T>,
    credentials: &CredentialStore<S>,
    url: &str,
) -> Result<AddedItem, SaveError>
where
    T: HttpTransport,
    S: KeyValueStore,
{
    let payload = JsonObject::from_iter([("url".to_string(), Value::String(url.to_string()))]);
    let payload = credentials.decorate_request(payload)?;

    let mut response = api.call(ADD_PATH, &payload).await?;
    let item = response.remove("item").ok_or(SaveError::MissingField("item"))?;
    Ok(serde_json::from_value(item)?)
}
