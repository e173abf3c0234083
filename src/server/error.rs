//! HTTP mapping of domain errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::Error;

impl Error {
    /// Status code this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidSlug(_)
            | Error::MissingContent
            | Error::MissingFile
            | Error::UnknownPost(_)
            | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::EditingDisabled => StatusCode::FORBIDDEN,
            Error::Io(_) | Error::Vcs(_) | Error::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Error::InvalidSlug(_) => "Bad slug".to_string(),
            Error::EditingDisabled => "Forbidden".to_string(),
            _ if status.is_server_error() => {
                tracing::error!("Request failed: {}", self);
                "Internal Server Error".to_string()
            }
            _ => self.to_string(),
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcs::VcsError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::InvalidSlug("X".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::MissingContent.status(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::EditingDisabled.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            Error::PayloadTooLarge.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        let push = VcsError::Failed {
            command: "git push".into(),
            status: "exit status: 1".into(),
            stderr: "rejected".into(),
        };
        assert_eq!(
            Error::from(push).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
