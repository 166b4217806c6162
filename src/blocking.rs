//! Synchronous (blocking) client for the AWS STS Query API.
//!
//! This module is only available when the `blocking` feature is enabled.
//! It mirrors the async [`crate::client::Client`] API using `reqwest::blocking`.
//!
//! # Example
//!
//! ```no_run
//! use rs_aws_sts::blocking::Client;
//! use rs_aws_sts::{Credential, GetFederationTokenRequest, Region};
//!
//! fn main() -> rs_aws_sts::Result<()> {
//!     let client = Client::new(Credential::new("id", "secret"), Region::global())?;
//!
//!     let resp = client.get_federation_token(GetFederationTokenRequest {
//!         name: "bob".into(),
//!         policy: String::new(),
//!         duration_seconds: 3600,
//!     })?;
//!     println!("AK: {}", resp.result.credentials.access_key_id);
//!     Ok(())
//! }
//! ```

use log::debug;
use serde::de::DeserializeOwned;

use crate::client::{
    AssumeRoleRequest, GetFederationTokenRequest, GetSessionTokenRequest, action_params,
};
use crate::config::{ClientConfig, Region};
use crate::credential::Credential;
use crate::error::Result;
use crate::exec::handle_response;
use crate::request::build_signed_url;
use crate::response::{
    AssumeRoleResponse, GetCallerIdentityResponse, GetFederationTokenResponse,
    GetSessionTokenResponse,
};

/// Synchronous client for the AWS STS Query API.
#[derive(Debug)]
pub struct Client {
    http: reqwest::blocking::Client,
    config: ClientConfig,
    credential: Credential,
}

impl Client {
    /// Creates a new blocking client for the given region.
    pub fn new(credential: Credential, region: Region) -> Result<Self> {
        Self::with_config(credential, ClientConfig::default().with_region(region))
    }

    /// Creates a new blocking client with custom configuration.
    pub fn with_config(credential: Credential, config: ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            config,
            credential,
        })
    }

    /// Returns temporary credentials for a federated user.
    pub fn get_federation_token(
        &self,
        request: GetFederationTokenRequest,
    ) -> Result<GetFederationTokenResponse> {
        self.execute("GetFederationToken", request.to_params())
    }

    /// Returns temporary credentials for the calling IAM user.
    pub fn get_session_token(
        &self,
        request: GetSessionTokenRequest,
    ) -> Result<GetSessionTokenResponse> {
        self.execute("GetSessionToken", request.to_params())
    }

    /// Assumes an IAM role and obtains temporary security credentials.
    pub fn assume_role(&self, request: AssumeRoleRequest) -> Result<AssumeRoleResponse> {
        self.execute("AssumeRole", request.to_params())
    }

    /// Queries the identity of the current caller.
    pub fn get_caller_identity(&self) -> Result<GetCallerIdentityResponse> {
        self.execute("GetCallerIdentity", Vec::new())
    }

    fn execute<T: DeserializeOwned>(
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
        let response = self.http.get(url).send()?;

        let status = response.status();
        let body = response.bytes()?;

        handle_response(status, &body)
    }
}
