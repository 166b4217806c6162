use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::credential::Credential;

/// Temporary security credentials issued by STS.
///
/// The `Debug` implementation redacts `secret_access_key` and `session_token`
/// to prevent accidental credential leakage in logs.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime<Utc>,
}

impl Credentials {
    /// Converts the issued credentials into a [`Credential`] that can sign
    /// further requests.
    pub fn to_credential(&self) -> Credential {
        Credential::new(&self.access_key_id, &self.secret_access_key)
            .with_session_token(&self.session_token)
    }

    /// Checks if the credentials have expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expiration
    }

    /// Returns the remaining time until expiration.
    ///
    /// Returns `None` if the credentials are already expired.
    pub fn time_to_expiry(&self) -> Option<std::time::Duration> {
        (self.expiration - Utc::now()).to_std().ok()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"****")
            .field("session_token", &"****")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// `ResponseMetadata` block present in every successful response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseMetadata {
    pub request_id: String,
}

/// Identity of a federated user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FederatedUser {
    pub arn: String,
    pub federated_user_id: String,
}

/// Identity of an assumed role session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssumedRoleUser {
    pub arn: String,
    pub assumed_role_id: String,
}

/// Response from the GetFederationToken API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetFederationTokenResponse {
    #[serde(rename = "GetFederationTokenResult")]
    pub result: GetFederationTokenResult,
    pub response_metadata: ResponseMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetFederationTokenResult {
    pub credentials: Credentials,
    pub federated_user: FederatedUser,
    /// Percentage of the allowed packed policy size used by the session policy.
    #[serde(default)]
    pub packed_policy_size: u32,
}

/// Response from the GetSessionToken API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSessionTokenResponse {
    #[serde(rename = "GetSessionTokenResult")]
    pub result: GetSessionTokenResult,
    pub response_metadata: ResponseMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSessionTokenResult {
    pub credentials: Credentials,
}

/// Response from the AssumeRole API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssumeRoleResponse {
    #[serde(rename = "AssumeRoleResult")]
    pub result: AssumeRoleResult,
    pub response_metadata: ResponseMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssumeRoleResult {
    pub credentials: Credentials,
    pub assumed_role_user: AssumedRoleUser,
    #[serde(default)]
    pub packed_policy_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_identity: Option<String>,
}

/// Response from the GetCallerIdentity API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCallerIdentityResponse {
    #[serde(rename = "GetCallerIdentityResult")]
    pub result: GetCallerIdentityResult,
    pub response_metadata: ResponseMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCallerIdentityResult {
    pub arn: String,
    pub user_id: String,
    pub account: String,
}

macro_rules! impl_request_id {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// Request ID assigned by STS.
                pub fn request_id(&self) -> &str {
                    &self.response_metadata.request_id
                }
            }
        )+
    };
}

impl_request_id!(
    GetFederationTokenResponse,
    GetSessionTokenResponse,
    AssumeRoleResponse,
    GetCallerIdentityResponse,
);

/// STS error envelope: `<ErrorResponse>` with zero or more `<Error>` entries.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(rename = "Error", default)]
    pub errors: Vec<ErrorEntry>,
    #[serde(rename = "RequestId", default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct ErrorEntry {
    pub code: String,
    pub message: String,
}
