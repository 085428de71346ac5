//! Failures of remote calls

use thiserror::Error;
use tonic::Code;

/// Fallback shown when the service gave no usable message
const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// Why the "create conversation" mutation failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// The service could not be reached or did not answer in time
    #[error("conversations service unavailable: {0}")]
    Unavailable(String),
    /// The service answered with an error
    #[error("mutation rejected ({}): {message}", .code.as_deref().unwrap_or("unknown"))]
    Rejected {
        code: Option<String>,
        message: String,
    },
    /// The service answered with something we cannot use
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl MutationError {
    /// Single human-readable message for display under the form
    pub fn user_message(&self) -> String {
        match self {
            Self::Unavailable(detail) if detail.trim().is_empty() => {
                "Could not reach the conversations service. Please try again.".to_string()
            }
            Self::Unavailable(detail) => {
                format!("Could not reach the conversations service: {detail}")
            }
            Self::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Rejected { .. } | Self::InvalidResponse(_) => GENERIC_MESSAGE.to_string(),
        }
    }
}

impl From<tonic::Status> for MutationError {
    fn from(status: tonic::Status) -> Self {
        match status.code() {
            Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled => {
                Self::Unavailable(status.message().to_string())
            }
            code => Self::Rejected {
                code: Some(format!("{code:?}")),
                message: status.message().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unavailable_status_maps_to_unavailable() {
        let err = MutationError::from(tonic::Status::unavailable("connection refused"));
        assert_eq!(err, MutationError::Unavailable("connection refused".to_string()));
    }

    #[test]
    fn test_deadline_maps_to_unavailable() {
        let err = MutationError::from(tonic::Status::deadline_exceeded("timeout"));
        assert!(matches!(err, MutationError::Unavailable(_)));
    }

    #[test]
    fn test_other_status_maps_to_rejected() {
        let err = MutationError::from(tonic::Status::permission_denied(
            "You must be a member of this collective",
        ));
        assert_eq!(
            err,
            MutationError::Rejected {
                code: Some("PermissionDenied".to_string()),
                message: "You must be a member of this collective".to_string(),
            }
        );
    }

    #[test]
    fn test_user_message_uses_service_message() {
        let err = MutationError::Rejected {
            code: None,
            message: "Title is too long".to_string(),
        };
        assert_eq!(err.user_message(), "Title is too long");
    }

    #[test]
    fn test_user_message_falls_back_when_blank() {
        let err = MutationError::Rejected {
            code: Some("Internal".to_string()),
            message: "  ".to_string(),
        };
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
        assert_eq!(
            MutationError::InvalidResponse("missing conversation".to_string()).user_message(),
            GENERIC_MESSAGE
        );
    }

    #[test]
    fn test_user_message_for_unavailable() {
        assert_eq!(
            MutationError::Unavailable(String::new()).user_message(),
            "Could not reach the conversations service. Please try again."
        );
        assert_eq!(
            MutationError::Unavailable("connection refused".to_string()).user_message(),
            "Could not reach the conversations service: connection refused"
        );
    }

    #[test]
    fn test_display_includes_code() {
        let err = MutationError::Rejected {
            code: Some("InvalidArgument".to_string()),
            message: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "mutation rejected (InvalidArgument): bad");
    }
}
