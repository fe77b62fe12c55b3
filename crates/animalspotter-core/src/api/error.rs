use thiserror::Error;

/// Failure kinds surfaced by [`ApiClient`](super::ApiClient).
///
/// Transport and decoding details are logged where they happen and never
/// carried in the variant; every variant is terminal for the call that
/// produced it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[error("Sign up failed")]
    FailedSignUp,

    #[error("Sign in failed")]
    FailedSignIn,

    #[error("Response contained no data")]
    NoData,

    #[error("Response data could not be decoded")]
    BadData,

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Fetch failed")]
    FailedFetch,

    #[error("Invalid URL")]
    BadUrl,
}
