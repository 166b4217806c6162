//! Live integration tests against the real AWS STS endpoint.
//!
//! These tests are ignored by default. Run with:
//! ```bash
//! export STS_TEST_ACCESS_KEY_ID=your-access-key-id
//! export STS_TEST_SECRET_ACCESS_KEY=your-secret-access-key
//!
//! cargo test --test live -- --ignored --nocapture
//! ```

use rs_aws_sts::{Client, Credential, GetFederationTokenRequest, Region};

/// Create client using credentials handed to the test run.
fn live_client() -> Client {
    let id = std::env::var("STS_TEST_ACCESS_KEY_ID")
        .expect("STS_TEST_ACCESS_KEY_ID environment variable not set");
    let secret = std::env::var("STS_TEST_SECRET_ACCESS_KEY")
        .expect("STS_TEST_SECRET_ACCESS_KEY environment variable not set");
    Client::new(Credential::new(id, secret), Region::global()).expect("failed to build client")
}

#[tokio::test]
#[ignore = "requires real AWS credentials"]
async fn live_get_caller_identity() {
    let client = live_client();

    let resp = client
        .get_caller_identity()
        .await
        .expect("get_caller_identity failed");

    println!("=== GetCallerIdentity Response ===");
    println!("RequestId: {}", resp.request_id());
    println!("Account: {}", resp.result.account);
    println!("Arn: {}", resp.result.arn);
    println!("UserId: {}", resp.result.user_id);

    assert!(!resp.result.account.is_empty());
}

#[tokio::test]
#[ignore = "requires real AWS credentials"]
async fn live_get_federation_token() {
    let client = live_client();

    let resp = client
        .get_federation_token(GetFederationTokenRequest {
            name: "rs-aws-sts-live".into(),
            policy: String::new(),
            duration_seconds: 900,
        })
        .await
        .expect("get_federation_token failed");

    println!("=== GetFederationToken Response ===");
    println!("RequestId: {}", resp.request_id());
    println!("FederatedUser: {}", resp.result.federated_user.arn);
    println!("Expiration: {}", resp.result.credentials.expiration);

    assert!(!resp.result.credentials.is_expired());
}

#[tokio::test]
#[ignore = "requires real AWS credentials"]
async fn live_bad_credentials_are_service_errors() {
    let client = Client::new(Credential::new("AKIDINVALID", "invalid"), Region::global())
        .expect("failed to build client");

    let err = client.get_caller_identity().await.unwrap_err();
    println!("error: {}", err);
    assert_eq!(err.status_code(), Some(403));
    assert!(err.error_code().is_some());
}
