//! AWS STS (Security Token Service) Query API client for Rust.
//!
//! Each call builds a Signature Version 2 signed `GET` request, sends it and
//! decodes the XML answer into a typed response or a [`StsError`]:
//!
//! - [`Client::get_federation_token`] — temporary credentials for a federated user
//! - [`Client::get_session_token`] — temporary credentials for the calling IAM user
//! - [`Client::assume_role`] — temporary credentials for an IAM role
//! - [`Client::get_caller_identity`] — identity of the calling credential
//!
//! A synchronous client with the same methods lives in [`blocking`] behind the
//! `blocking` feature.
//!
//! # Quick Start
//!
//! ```no_run
//! use rs_aws_sts::{Client, Credential, GetFederationTokenRequest, Region};
//!
//! # async fn example() -> rs_aws_sts::Result<()> {
//! let client = Client::new(
//!     Credential::new("your-access-key-id", "your-secret-access-key"),
//!     Region::global(),
//! )?;
//!
//! let resp = client
//!     .get_federation_token(GetFederationTokenRequest {
//!         name: "bob".into(),
//!         policy: String::new(),
//!         duration_seconds: 3600,
//!     })
//!     .await?;
//!
//! println!("Temporary AK: {}", resp.result.credentials.access_key_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod http_send;
pub mod request;
pub mod response;

#[cfg(feature = "blocking")]
pub mod blocking;

mod exec;
mod sign;

pub use client::{AssumeRoleRequest, Client, GetFederationTokenRequest, GetSessionTokenRequest};
pub use config::{ClientConfig, Region};
pub use credential::Credential;
pub use error::{Result, ServiceError, StsError};
pub use http_send::{HttpSend, ReqwestHttpSend};
pub use request::build_signed_url;
pub use response::{
    AssumeRoleResponse, AssumeRoleResult, AssumedRoleUser, Credentials, FederatedUser,
    GetCallerIdentityResponse, GetCallerIdentityResult, GetFederationTokenResponse,
    GetFederationTokenResult, GetSessionTokenResponse, GetSessionTokenResult, ResponseMetadata,
};

// Compile-time assertions: key types must be Send + Sync for use across threads.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<Client>;
    let _ = assert_send_sync::<StsError>;
    let _ = assert_send_sync::<Credential>;
};
