use crate::config::EndpointConfig;
use crate::error::{NotifierError, Result};
use serde::de::DeserializeOwned;

const USER_AGENT: &str = concat!("iss-notifier/", env!("CARGO_PKG_VERSION"));

/// Build the client shared by the position and sunrise/sunset fetchers.
pub fn client(endpoints: &EndpointConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if endpoints.request_timeout_secs > 0 {
        builder = builder.timeout(endpoints.request_timeout());
    }
    builder
        .build()
        .map_err(|e| NotifierError::Config(format!("cannot build HTTP client: {e}")))
}

/// GET `url` and decode a JSON body.
///
/// Transport failures map to `Network`, non-2xx to `Status`, and anything
/// serde rejects to `Parse`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T> {
    let network = |source| NotifierError::Network {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).query(query).send().await.map_err(network)?;
    let status = response.status();
    if !status.is_success() {
        return Err(NotifierError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(network)?;
    serde_json::from_slice(&body).map_err(|e| NotifierError::parse(url, e.to_string()))
}
