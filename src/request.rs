//! Signed URL construction for the STS Query API.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Url;

use crate::credential::Credential;
use crate::error::{Result, StsError};
use crate::sign::{canonical_query, sign};

/// STS Query API version sent with every request.
pub const API_VERSION: &str = "2011-06-15";

const HTTP_METHOD: &str = "GET";
const REQUEST_PATH: &str = "/";

/// Formats a timestamp as RFC 3339 with second precision and a `Z` suffix.
fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Host as it is signed: lowercase host, plus `:port` when the endpoint names
/// a non-default port.
fn signing_host(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Builds a signed `GET` URL for the STS Query API.
///
/// This function:
/// 1. Adds `Version` and `Timestamp` (current UTC time)
/// 2. Adds the signing metadata and the Signature Version 2 signature
/// 3. Returns the endpoint with path `/` and the sorted, percent-encoded query
///
/// # Errors
///
/// Returns [`StsError::Build`] if `endpoint` is not an absolute URL with a
/// host. Nothing is sent over the network in that case.
pub fn build_signed_url(
    params: BTreeMap<String, String>,
    credential: &Credential,
    endpoint: &str,
) -> Result<Url> {
    build_signed_url_at(params, credential, endpoint, Utc::now())
}

pub(crate) fn build_signed_url_at(
    mut params: BTreeMap<String, String>,
    credential: &Credential,
    endpoint: &str,
    now: DateTime<Utc>,
) -> Result<Url> {
    let mut url = Url::parse(endpoint).map_err(|e| StsError::Build {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;
    let host = signing_host(&url).ok_or_else(|| StsError::Build {
        endpoint: endpoint.to_string(),
        reason: "endpoint has no host".to_string(),
    })?;

    params.insert("Version".to_string(), API_VERSION.to_string());
    params.insert("Timestamp".to_string(), format_timestamp(now));

    sign(&mut params, credential, HTTP_METHOD, &host, REQUEST_PATH)?;

    url.set_path(REQUEST_PATH);
    url.set_fragment(None);
    url.set_query(Some(&canonical_query(&params)));
    Ok(url)
}
