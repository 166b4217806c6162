//! Common execution utilities for async and blocking clients.

use http::StatusCode;
use log::debug;
use serde::de::DeserializeOwned;

use crate::error::{Result, ServiceError, StsError};
use crate::response::ErrorResponse;

/// Formats the HTTP status line, e.g. `500 Internal Server Error`.
pub(crate) fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Parses a successful response body.
///
/// The body must be valid UTF-8; anything else is a [`StsError::Deserialize`].
pub(crate) fn parse_success_response<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let text = std::str::from_utf8(body).map_err(|e| {
        StsError::Deserialize(quick_xml::DeError::Custom(format!(
            "response body is not valid UTF-8: {}",
            e
        )))
    })?;
    quick_xml::de::from_str(text).map_err(StsError::from)
}

/// Parses an error response body into a [`StsError::Service`].
///
/// Only the first `<Error>` entry is kept. A body without any decodable entry
/// yields an error with an empty code and the status line as message.
pub(crate) fn parse_error_response(status: StatusCode, body: &[u8]) -> StsError {
    let text = String::from_utf8_lossy(body);
    let envelope: ErrorResponse = quick_xml::de::from_str(&text).unwrap_or_default();

    let (code, message) = envelope
        .errors
        .into_iter()
        .next()
        .map(|entry| (entry.code, entry.message))
        .unwrap_or_default();

    StsError::Service(ServiceError {
        status_code: status.as_u16(),
        code,
        message: if message.is_empty() {
            status_line(status)
        } else {
            message
        },
        request_id: envelope.request_id,
    })
}

/// Handles response parsing for both success and error cases.
///
/// Only `200 OK` counts as success; every other status, other 2xx codes
/// included, is decoded as an error envelope.
pub(crate) fn handle_response<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
    if status == StatusCode::OK {
        parse_success_response(body)
    } else {
        debug!("STS responded with {}, decoding error envelope", status);
        Err(parse_error_response(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::GetCallerIdentityResponse;
    use pretty_assertions::assert_eq;

    const IDENTITY_XML: &str = r#"<GetCallerIdentityResponse xmlns="https://sts.amazonaws.com/doc/2011-06-15/">
  <GetCallerIdentityResult>
    <Arn>arn:aws:iam::123456789012:user/Alice</Arn>
    <UserId>AKIAI44QH8DHBEXAMPLE</UserId>
    <Account>123456789012</Account>
  </GetCallerIdentityResult>
  <ResponseMetadata>
    <RequestId>01234567-89ab-cdef-0123-456789abcdef</RequestId>
  </ResponseMetadata>
</GetCallerIdentityResponse>"#;

    const TWO_ERRORS_XML: &str = r#"<ErrorResponse>
  <Error>
    <Type>Sender</Type>
    <Code>InvalidParameterValue</Code>
    <Message>first error</Message>
  </Error>
  <Error>
    <Type>Sender</Type>
    <Code>MissingParameter</Code>
    <Message>second error</Message>
  </Error>
  <RequestId>req-two</RequestId>
</ErrorResponse>"#;

    fn expect_service(err: StsError) -> ServiceError {
        match err {
            StsError::Service(e) => e,
            other => panic!("expected StsError::Service, got: {:?}", other),
        }
    }

    #[test]
    fn status_line_formats() {
        assert_eq!(
            status_line(StatusCode::INTERNAL_SERVER_ERROR),
            "500 Internal Server Error"
        );
        assert_eq!(status_line(StatusCode::FORBIDDEN), "403 Forbidden");
        assert_eq!(status_line(StatusCode::from_u16(599).unwrap()), "599");
    }

    #[test]
    fn ok_is_decoded() {
        let resp: GetCallerIdentityResponse =
            handle_response(StatusCode::OK, IDENTITY_XML.as_bytes()).unwrap();
        assert_eq!(resp.result.account, "123456789012");
        assert_eq!(resp.request_id(), "01234567-89ab-cdef-0123-456789abcdef");
    }

    #[test]
    fn other_success_codes_are_failures() {
        for status in [StatusCode::CREATED, StatusCode::NO_CONTENT] {
            let err = handle_response::<GetCallerIdentityResponse>(status, IDENTITY_XML.as_bytes())
                .unwrap_err();
            let err = expect_service(err);
            assert_eq!(err.status_code, status.as_u16());
            assert_eq!(err.code, "");
            assert_eq!(err.message, status_line(status));
        }
    }

    #[test]
    fn malformed_success_body_is_deserialize_error() {
        let err =
            handle_response::<GetCallerIdentityResponse>(StatusCode::OK, b"<not-closed>").unwrap_err();
        assert!(matches!(err, StsError::Deserialize(_)), "got: {:?}", err);
    }

    #[test]
    fn invalid_utf8_success_body_is_deserialize_error() {
        let (head, tail) = IDENTITY_XML.split_once("AKIAI44QH8DHBEXAMPLE").unwrap();
        let mut body = head.as_bytes().to_vec();
        body.extend_from_slice(b"AKID\xFF");
        body.extend_from_slice(tail.as_bytes());

        let err = handle_response::<GetCallerIdentityResponse>(StatusCode::OK, &body).unwrap_err();
        assert!(matches!(err, StsError::Deserialize(_)), "got: {:?}", err);
        assert!(err.to_string().contains("UTF-8"), "got: {}", err);
    }

    #[test]
    fn invalid_utf8_error_body_still_synthesizes_error() {
        let err = expect_service(parse_error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            b"<ErrorResponse>\xFF",
        ));
        assert_eq!(err.code, "");
        assert_eq!(err.message, "503 Service Unavailable");
    }

    #[test]
    fn first_error_entry_wins() {
        let err = expect_service(parse_error_response(
            StatusCode::BAD_REQUEST,
            TWO_ERRORS_XML.as_bytes(),
        ));
        assert_eq!(
            err,
            ServiceError {
                status_code: 400,
                code: "InvalidParameterValue".to_string(),
                message: "first error".to_string(),
                request_id: Some("req-two".to_string()),
            }
        );
    }

    #[test]
    fn empty_body_synthesizes_error() {
        let err = expect_service(parse_error_response(StatusCode::INTERNAL_SERVER_ERROR, b""));
        assert_eq!(err.status_code, 500);
        assert_eq!(err.code, "");
        assert_eq!(err.message, "500 Internal Server Error");
        assert_eq!(err.request_id, None);
    }

    #[test]
    fn undecodable_body_synthesizes_error() {
        let err = expect_service(parse_error_response(
            StatusCode::BAD_GATEWAY,
            b"<html>upstream down",
        ));
        assert_eq!(err.code, "");
        assert_eq!(err.message, "502 Bad Gateway");
    }

    #[test]
    fn entry_without_message_uses_status_line() {
        let body = r#"<ErrorResponse><Error><Code>Throttling</Code></Error></ErrorResponse>"#;
        let err = expect_service(parse_error_response(
            StatusCode::TOO_MANY_REQUESTS,
            body.as_bytes(),
        ));
        assert_eq!(err.code, "Throttling");
        assert_eq!(err.message, "429 Too Many Requests");
    }
}
