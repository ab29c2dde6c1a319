//! Error taxonomy shared by every network-backed and local operation.

use thiserror::Error;

/// Failures surfaced by the client core.
///
/// Each variant carries a human-readable message; the variant itself tells the
/// caller how to react (re-prompt for credentials, show a validation message,
/// re-fetch, and so on).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Transport failure, timeout, or a server-side (5xx) failure.
    #[error("network error: {message}")]
    Network { message: String },
    /// Missing, invalid or expired token, or bad credentials.
    #[error("authentication failed: {message}")]
    Auth { message: String },
    /// The server (or local draft check) rejected the submitted fields.
    #[error("rejected input: {message}")]
    Validation { message: String },
    /// The referenced identifier does not exist server-side.
    #[error("not found: {message}")]
    NotFound { message: String },
    /// The response payload did not match the expected schema.
    #[error("malformed response: {message}")]
    Decode { message: String },
    /// A story url could not be parsed into a host.
    #[error("invalid url {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl Error {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    /// True when the error means the stored token can no longer be used.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = Error::validation("url must be a valid URL");
        assert_eq!(err.to_string(), "rejected input: url must be a valid URL");

        let err = Error::invalid_url("nope", "relative URL without a base");
        assert_eq!(
            err.to_string(),
            "invalid url \"nope\": relative URL without a base"
        );
    }

    #[test]
    fn classifiers_match_only_their_variant() {
        assert!(Error::auth("x").is_auth());
        assert!(!Error::network("x").is_auth());
        assert!(Error::not_found("x").is_not_found());
        assert!(!Error::decode("x").is_not_found());
    }
}
