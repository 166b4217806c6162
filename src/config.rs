use std::time::Duration;

/// Endpoint used when no region is chosen.
pub const GLOBAL_ENDPOINT: &str = "https://sts.amazonaws.com";

/// An STS region and the endpoint that serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Region name, e.g. `eu-west-1`.
    ///
    /// A label for the caller only. Signature Version 2 does not sign the
    /// region, and requests go to `sts_endpoint` whatever this says.
    pub name: String,
    /// STS endpoint URL, e.g. `https://sts.eu-west-1.amazonaws.com`.
    pub sts_endpoint: String,
}

impl Region {
    /// Regional STS endpoint for the named region.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let sts_endpoint = format!("https://sts.{}.amazonaws.com", name);
        Self { name, sts_endpoint }
    }

    /// The global endpoint, `https://sts.amazonaws.com`, labelled `us-east-1`.
    pub fn global() -> Self {
        Self {
            name: "us-east-1".to_string(),
            sts_endpoint: GLOBAL_ENDPOINT.to_string(),
        }
    }

    /// A region served by an arbitrary endpoint (VPC endpoints, local stacks, tests).
    pub fn custom(name: impl Into<String>, sts_endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sts_endpoint: sts_endpoint.into(),
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::global()
    }
}

/// Configuration for the STS client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Region whose endpoint requests are sent to.
    pub region: Region,

    /// HTTP request timeout, applied by the transport.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            region: Region::global(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Returns the configured STS endpoint.
    pub fn endpoint(&self) -> &str {
        &self.region.sts_endpoint
    }

    /// Uses the given region.
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Keeps the region name but sends requests to a custom endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.region.sts_endpoint = endpoint.into();
        self
    }

    /// Sets the HTTP request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
