use std::collections::BTreeMap;

use log::debug;
use serde::de::DeserializeOwned;

use crate::config::{ClientConfig, Region};
use crate::credential::Credential;
use crate::error::Result;
use crate::exec::handle_response;
use crate::http_send::{HttpSend, ReqwestHttpSend};
use crate::request::build_signed_url;
use crate::response::{
    AssumeRoleResponse, GetCallerIdentityResponse, GetFederationTokenResponse,
    GetSessionTokenResponse,
};

/// Request parameters for the GetFederationToken API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetFederationTokenRequest {
    /// Name of the federated user.
    pub name: String,
    /// IAM policy in JSON format. Sent even when empty.
    pub policy: String,
    /// Token validity duration in seconds.
    pub duration_seconds: u32,
}

impl GetFederationTokenRequest {
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("DurationSeconds", self.duration_seconds.to_string()),
            ("Name", self.name.clone()),
            ("Policy", self.policy.clone()),
        ]
    }
}

/// Request parameters for the GetSessionToken API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetSessionTokenRequest {
    /// Token validity duration in seconds.
    pub duration_seconds: Option<u32>,
    /// Identification number of the MFA device.
    pub serial_number: Option<String>,
    /// Code from the MFA device.
    pub token_code: Option<String>,
}

impl GetSessionTokenRequest {
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(duration) = self.duration_seconds {
            params.push(("DurationSeconds", duration.to_string()));
        }
        if let Some(ref serial_number) = self.serial_number {
            params.push(("SerialNumber", serial_number.clone()));
        }
        if let Some(ref token_code) = self.token_code {
            params.push(("TokenCode", token_code.clone()));
        }
        params
    }
}

/// Request parameters for the AssumeRole API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumeRoleRequest {
    /// ARN of the role to assume.
    pub role_arn: String,
    /// Identifier for the assumed role session.
    pub role_session_name: String,
    /// Additional policy to further restrict permissions.
    pub policy: Option<String>,
    /// Token validity duration in seconds.
    pub duration_seconds: Option<u32>,
    /// External ID for cross-account role assumption.
    pub external_id: Option<String>,
}

impl AssumeRoleRequest {
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("RoleArn", self.role_arn.clone()),
            ("RoleSessionName", self.role_session_name.clone()),
        ];
        if let Some(ref policy) = self.policy {
            params.push(("Policy", policy.clone()));
        }
        if let Some(duration) = self.duration_seconds {
            params.push(("DurationSeconds", duration.to_string()));
        }
        if let Some(ref external_id) = self.external_id {
            params.push(("ExternalId", external_id.clone()));
        }
        params
    }
}

/// Assembles the parameter map for one action.
pub(crate) fn action_params(
    action: &str,
    params: Vec<(&'static str, String)>,
) -> BTreeMap<String, String> {
    let mut all_params = BTreeMap::new();
    all_params.insert("Action".to_string(), action.to_string());
    for (key, value) in params {
        all_params.insert(key.to_string(), value);
    }
    all_params
}

/// Async client for the AWS STS Query API.
///
/// Every call builds, signs and sends exactly one request. The client holds no
/// per-call state and can be shared between tasks.
#[derive(Debug)]
pub struct Client<H: HttpSend = ReqwestHttpSend> {
    http: H,
    config: ClientConfig,
    credential: Credential,
}

impl Client {
    /// Creates a new client for the given region.
    pub fn new(credential: Credential, region: Region) -> Result<Self> {
        Self::with_config(credential, ClientConfig::default().with_region(region))
    }

    /// Creates a new client with an explicit credential and custom configuration.
    pub fn with_config(credential: Credential, config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_http_send(
            credential,
            config,
            ReqwestHttpSend::new(http),
        ))
    }
}

impl<H: HttpSend> Client<H> {
    /// Creates a client that sends requests through a custom [`HttpSend`].
    pub fn with_http_send(credential: Credential, config: ClientConfig, http: H) -> Self {
        Self {
            http,
            config,
            credential,
        }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns temporary credentials for a federated user.
    pub async fn get_federation_token(
        &self,
        request: GetFederationTokenRequest,
    ) -> Result<GetFederationTokenResponse> {
        self.execute("GetFederationToken", request.to_params()).await
    }

    /// Returns temporary credentials for the calling IAM user.
    pub async fn get_session_token(
        &self,
        request: GetSessionTokenRequest,
    ) -> Result<GetSessionTokenResponse> {
        self.execute("GetSessionToken", request.to_params()).await
    }

    /// Assumes an IAM role and obtains temporary security credentials.
    pub async fn assume_role(&self, request: AssumeRoleRequest) -> Result<AssumeRoleResponse> {
        self.execute("AssumeRole", request.to_params()).await
    }

    /// Queries the identity of the current caller.
    pub async fn get_caller_identity(&self) -> Result<GetCallerIdentityResponse> {
        self.execute("GetCallerIdentity", Vec::new()).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        action: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<T> {
        let url = build_signed_url(
            action_params(action, params),
            &self.credential,
            self.config.endpoint(),
        )?;

        debug!(
            "sending STS {} request to {}",
            action,
            url.host_str().unwrap_or_default()
        );
        let response = self.http.http_send(url).await?;

        handle_response(response.status(), response.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn federation_token_params_always_sent() {
        let request = GetFederationTokenRequest {
            name: "bob".into(),
            policy: String::new(),
            duration_seconds: 3600,
        };
        let params = action_params("GetFederationToken", request.to_params());
        assert_eq!(params["Action"], "GetFederationToken");
        assert_eq!(params["DurationSeconds"], "3600");
        assert_eq!(params["Name"], "bob");
        assert_eq!(params["Policy"], "");
    }

    #[test]
    fn session_token_params_optional() {
        assert!(GetSessionTokenRequest::default().to_params().is_empty());

        let request = GetSessionTokenRequest {
            duration_seconds: Some(900),
            serial_number: Some("arn:aws:iam::123456789012:mfa/user".into()),
            token_code: Some("123456".into()),
        };
        let params = action_params("GetSessionToken", request.to_params());
        assert_eq!(params.len(), 4);
        assert_eq!(params["SerialNumber"], "arn:aws:iam::123456789012:mfa/user");
        assert_eq!(params["TokenCode"], "123456");
    }

    #[test]
    fn assume_role_params() {
        let request = AssumeRoleRequest {
            role_arn: "arn:aws:iam::123456789012:role/demo".into(),
            role_session_name: "session".into(),
            policy: None,
            duration_seconds: Some(3600),
            external_id: Some("ext-1".into()),
        };
        let params = action_params("AssumeRole", request.to_params());
        assert_eq!(params["RoleArn"], "arn:aws:iam::123456789012:role/demo");
        assert_eq!(params["RoleSessionName"], "session");
        assert_eq!(params["DurationSeconds"], "3600");
        assert_eq!(params["ExternalId"], "ext-1");
        assert!(!params.contains_key("Policy"));
    }
}
