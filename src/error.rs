use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Invalid Microsoft Graph base URL: {0}")]
    InvalidGraphUrl(String),
    #[error("Required header '{0}' is missing or empty")]
    MissingField(&'static str),
    #[error("No user identifier could be extracted from the identity token")]
    NoIdentifier,
    #[error("Profile provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("The provider confirmed a different user than the identity token claims")]
    IdentityMismatch,
    #[error("A user profile requires a non-empty id")]
    EmptyProfileId,
}

/// Failures of the single outbound call to the profile endpoint.
///
/// Variants never carry the response body.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderError {
    #[error("No response from the profile endpoint")]
    BadResponse,
    #[error("Failed reading the profile response body")]
    FailedReadingBody,
    #[error("Profile endpoint returned status code {0}")]
    StatusCode(u16),
    #[error("Profile response body is not a JSON object")]
    FailedSerialization,
    #[error("Profile response lacks a usable 'id'")]
    FailedCreatingProfile,
}

pub(crate) fn send_error(error: reqwest::Error) -> ProviderError {
    tracing::debug!(timeout = error.is_timeout(), "Profile request failed in transport");
    ProviderError::BadResponse
}

pub(crate) fn read_body_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        tracing::debug!("Timed out reading profile response body");
        return ProviderError::BadResponse;
    }
    ProviderError::FailedReadingBody
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_convert_into_crate_error() {
        let err: Error = ProviderError::StatusCode(401).into();
        assert!(matches!(err, Error::Provider(ProviderError::StatusCode(401))));
        assert_eq!(
            err.to_string(),
            "Profile provider error: Profile endpoint returned status code 401"
        );
    }

    #[test]
    fn missing_field_names_the_header() {
        let err = Error::MissingField("access_token");
        assert_eq!(
            err.to_string(),
            "Required header 'access_token' is missing or empty"
        );
    }
}
