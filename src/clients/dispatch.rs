use std::collections::BTreeMap;

use log::{debug, warn};

use crate::clients::{
    errors::{Result, TransportError},
    http::HttpClient,
};

/// Query parameters, kept sorted by name so identical requests build identical URLs.
pub type Params<'a> = BTreeMap<&'a str, &'a str>;

/// `base_url + endpoint + "?" + encoded params`.
///
/// Names and values are percent-encoded; the values are never encoded twice.
pub fn build_url(base_url: &str, endpoint: &str, params: &Params<'_>) -> String {
    let query = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{base_url}{endpoint}?{query}")
}

/// Issue one GET for `endpoint` and return the undecoded body.
///
/// Transport failures and non-2xx statuses come back as [`TransportError`];
/// nothing is retried.
pub async fn dispatch(
    http: &dyn HttpClient,
    base_url: &str,
    endpoint: &str,
    params: &Params<'_>,
) -> Result<Vec<u8>> {
    let url = build_url(base_url, endpoint, params);
    debug!("Requesting {url}");
    let response = http.get(&url).await?;
    if !response.is_success() {
        warn!("{url} answered with HTTP {}", response.status);
        return Err(TransportError::Status {
            status: response.status,
            url,
        }
        .into());
    }
    debug!("Received {} bytes from {url}", response.body.len());
    Ok(response.body)
}
