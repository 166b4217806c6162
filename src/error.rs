use std::fmt;

use thiserror::Error;

/// Errors that can occur when using the STS client.
#[derive(Debug, Error)]
pub enum StsError {
    /// The endpoint could not be turned into a request URL. No request was sent.
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    Build { endpoint: String, reason: String },

    /// HTTP/network layer error from reqwest; no response was received.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// STS answered with a non-200 status.
    #[error("service error: {0}")]
    Service(ServiceError),

    /// The service answered 200 but the body did not match the expected schema.
    #[error("deserialization error: {0}")]
    Deserialize(#[from] quick_xml::DeError),

    /// Signature computation error.
    ///
    /// HMAC-SHA256 accepts keys of any length, so signing never produces this
    /// today. It stays so the signer's key setup has a typed failure path.
    #[error("signature error: {0}")]
    Signature(String),
}

impl StsError {
    /// Returns the HTTP status code if this is a service error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            StsError::Service(err) => Some(err.status_code),
            _ => None,
        }
    }

    /// Returns the AWS error code if this is a service error carrying one.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            StsError::Service(err) if !err.code.is_empty() => Some(&err.code),
            _ => None,
        }
    }

    /// Returns the request ID if the service reported one.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            StsError::Service(err) => err.request_id.as_deref(),
            _ => None,
        }
    }
}

impl From<ServiceError> for StsError {
    fn from(err: ServiceError) -> Self {
        StsError::Service(err)
    }
}

/// A single error reported by STS.
///
/// When the service returns several `<Error>` entries only the first is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// AWS error code, e.g. `InvalidParameterValue`. Empty when the body had none.
    pub code: String,
    /// Message explaining the error.
    pub message: String,
    /// Request ID from the error envelope, if present.
    pub request_id: Option<String>,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.code.is_empty() {
            write!(f, "{}: {}", self.code, self.message)
        } else if self.status_code > 0 {
            write!(f, "{}: {}", self.status_code, self.message)
        } else {
            f.write_str(&self.message)
        }
    }
}

impl std::error::Error for ServiceError {}

/// A specialized Result type for STS operations.
pub type Result<T> = std::result::Result<T, StsError>;
