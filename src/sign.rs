use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::credential::Credential;
use crate::error::{Result, StsError};

type HmacSha256 = Hmac<Sha256>;

pub(crate) const SIGNATURE_VERSION: &str = "2";
pub(crate) const SIGNATURE_METHOD: &str = "HmacSHA256";

/// Percent-encodes a string per the AWS query signing rules (RFC 3986).
///
/// Unreserved characters (A-Z, a-z, 0-9, '-', '.', '_', '~') are NOT encoded.
/// All other characters are encoded as `%XX` (uppercase hex).
/// Spaces become `%20` (NOT `+`).
pub(crate) fn percent_encode(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len() * 2);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}

/// Builds the canonical query string: encoded `key=value` pairs sorted by
/// encoded key and joined with `&`.
///
/// The same string is signed and sent on the wire.
pub(crate) fn canonical_query(params: &BTreeMap<String, String>) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Computes the Signature Version 2 signature over a canonical query.
///
/// StringToSign is `{method}\n{host}\n{path}\n{canonical_query}`, signed with
/// HMAC-SHA256 keyed by the secret access key and Base64 encoded.
pub(crate) fn signature_v2(
    secret_access_key: &str,
    http_method: &str,
    host: &str,
    path: &str,
    canonical_query: &str,
) -> Result<String> {
    let string_to_sign = format!("{}\n{}\n{}\n{}", http_method, host, path, canonical_query);

    // Any key length is accepted; the error arm is unreachable for HMAC.
    let mut mac = HmacSha256::new_from_slice(secret_access_key.as_bytes())
        .map_err(|e| StsError::Signature(format!("HMAC key error: {}", e)))?;
    mac.update(string_to_sign.as_bytes());
    let result = mac.finalize().into_bytes();

    Ok(BASE64.encode(result))
}

/// Adds the signing metadata and the `Signature` itself to `params`.
///
/// Depends only on its arguments: the same inputs always yield the same
/// parameter set.
pub(crate) fn sign(
    params: &mut BTreeMap<String, String>,
    credential: &Credential,
    http_method: &str,
    host: &str,
    path: &str,
) -> Result<()> {
    params.insert(
        "AWSAccessKeyId".to_string(),
        credential.access_key_id.clone(),
    );
    params.insert(
        "SignatureVersion".to_string(),
        SIGNATURE_VERSION.to_string(),
    );
    params.insert("SignatureMethod".to_string(), SIGNATURE_METHOD.to_string());
    if let Some(token) = &credential.session_token {
        params.insert("SecurityToken".to_string(), token.clone());
    }

    let query = canonical_query(params);
    let signature = signature_v2(
        &credential.secret_access_key,
        http_method,
        host,
        path,
        &query,
    )?;
    params.insert("Signature".to_string(), signature);
    Ok(())
}
