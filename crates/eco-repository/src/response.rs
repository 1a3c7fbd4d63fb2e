//! Upstream response envelope.

use eco_core::{EcoError, EcoResult};
use serde::{Deserialize, Serialize};

/// Outcome of one upstream call: an HTTP-like status plus optional payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamResponse<T> {
    /// Status reported by the upstream (2xx means success).
    pub status: u16,

    /// Payload, when the upstream returned one.
    pub data: Option<T>,

    /// Error description for failed calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> UpstreamResponse<T> {
    /// A 200 response carrying `data`.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            status: 200,
            data: Some(data),
            message: None,
        }
    }

    /// A 200 response without a payload.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            status: 200,
            data: None,
            message: None,
        }
    }

    /// A failed response.
    #[must_use]
    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Converts into the payload, turning a non-success status into an
    /// [`EcoError::ExternalService`] for `service`.
    ///
    /// A successful response without payload yields `Ok(None)`.
    pub fn into_result(self, service: &str) -> EcoResult<Option<T>> {
        if self.is_ok() {
            return Ok(self.data);
        }
        let message = match self.message {
            Some(message) => format!("status {}: {}", self.status, message),
            None => format!("status {}", self.status),
        };
        Err(EcoError::external(service, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response() {
        let response = UpstreamResponse::ok(vec!["C1".to_string()]);
        assert!(response.is_ok());
        assert_eq!(response.into_result("magento").unwrap(), Some(vec!["C1".to_string()]));
    }

    #[test]
    fn test_empty_response_is_success_without_payload() {
        let response: UpstreamResponse<Vec<String>> = UpstreamResponse::empty();
        assert!(response.is_ok());
        assert_eq!(response.into_result("magento").unwrap(), None);
    }

    #[test]
    fn test_failure_becomes_external_error() {
        let response: UpstreamResponse<Vec<String>> = UpstreamResponse::failure(503, "maintenance");
        assert!(!response.is_ok());

        match response.into_result("magento:cart") {
            Err(EcoError::ExternalService { service, message }) => {
                assert_eq!(service, "magento:cart");
                assert_eq!(message, "status 503: maintenance");
            }
            other => panic!("Expected ExternalService error, got {:?}", other),
        }
    }

    #[test]
    fn test_status_boundaries() {
        let mut response: UpstreamResponse<()> = UpstreamResponse::empty();
        response.status = 299;
        assert!(response.is_ok());
        response.status = 300;
        assert!(!response.is_ok());
        response.status = 199;
        assert!(!response.is_ok());
    }
}
