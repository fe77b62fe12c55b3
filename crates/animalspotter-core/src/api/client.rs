//! API client for communicating with the AnimalSpotter REST API.
//!
//! This module provides the `ApiClient` struct for registering and signing
//! in users, and for making authenticated requests for animal sightings.

use anyhow::{Context, Result};
use image::DynamicImage;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::{Session, SessionData};
use crate::models::{Animal, Bearer, Credentials};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL of the hosted AnimalSpotter service
pub const DEFAULT_BASE_URL: &str = "https://lambdaanimalspotter.vapor.cloud/api";

const SIGN_UP_PATH: &[&str] = &["users", "signup"];
const SIGN_IN_PATH: &[&str] = &["users", "login"];
const ANIMAL_NAMES_PATH: &[&str] = &["animals", "all"];
const ANIMALS_SEGMENT: &str = "animals";

/// API client for AnimalSpotter.
/// Clone is cheap - reqwest::Client and Session are both shared handles,
/// so clones use the same connection pool and the same sign-in.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    /// Create a new API client rooted at `base_url`.
    ///
    /// The base URL must be absolute and able to carry a path, e.g.
    /// `https://example.com/api`. A trailing slash is optional.
    pub fn new(base_url: &str, session: Session) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid base URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Base URL cannot carry a path: {}", base_url);
        }

        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Check whether a bearer token is available for authenticated calls
    pub async fn is_signed_in(&self) -> bool {
        self.session.is_valid().await
    }

    // ===== Authentication =====

    /// Register a new user. Any status other than 200 is a failure.
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let url = self.endpoint(SIGN_UP_PATH)?;
        let request = self.client.post(url).json(credentials);

        self.fetch_body(request, ApiError::FailedSignUp).await?;

        debug!(username = %credentials.username, "Sign up succeeded");
        Ok(())
    }

    /// Sign in and store the returned bearer token in the session,
    /// replacing any token from an earlier sign-in.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let url = self.endpoint(SIGN_IN_PATH)?;
        let request = self.client.post(url).json(credentials);

        let body = self.fetch_body(request, ApiError::FailedSignIn).await?;
        if body.is_empty() {
            warn!("Sign in response contained no data");
            return Err(ApiError::NoData);
        }

        let bearer: Bearer = Self::decode(&body, "bearer", ApiError::FailedSignIn)?;
        if bearer.token.trim().is_empty() {
            warn!("Sign in response contained an empty token");
            return Err(ApiError::FailedSignIn);
        }

        self.session
            .update(SessionData::new(bearer.token, credentials.username.clone()))
            .await;

        debug!(username = %credentials.username, "Sign in succeeded");
        Ok(())
    }

    // ===== Data Fetching Methods =====

    /// Fetch the names of all animals with recorded sightings
    pub async fn list_animal_names(&self) -> Result<Vec<String>, ApiError> {
        let token = self.bearer_token().await?;
        let url = self.endpoint(ANIMAL_NAMES_PATH)?;
        let request = self.client.get(url).bearer_auth(token);

        let body = self.fetch_body(request, ApiError::FailedFetch).await?;
        if body.is_empty() {
            warn!("Animal names response contained no data");
            return Err(ApiError::BadData);
        }

        Self::decode(&body, "animal names", ApiError::BadData)
    }

    /// Fetch the sighting record for a single animal
    pub async fn get_animal(&self, name: &str) -> Result<Animal, ApiError> {
        let token = self.bearer_token().await?;
        let url = self.endpoint(&[ANIMALS_SEGMENT, name])?;
        let request = self.client.get(url).bearer_auth(token);

        let body = self.fetch_body(request, ApiError::FailedFetch).await?;
        if body.is_empty() {
            warn!(animal = name, "Animal response contained no data");
            return Err(ApiError::BadData);
        }

        Self::decode(&body, "animal", ApiError::BadData)
    }

    /// Fetch and decode an image from an arbitrary absolute URL.
    /// No authorization is sent.
    pub async fn get_image(&self, url: &str) -> Result<DynamicImage, ApiError> {
        let image_url = Url::parse(url).map_err(|e| {
            warn!(error = %e, url, "Invalid image URL");
            ApiError::BadUrl
        })?;
        let request = self.client.get(image_url);

        let body = self.fetch_body(request, ApiError::FailedFetch).await?;
        if body.is_empty() {
            warn!(url, "Image response contained no data");
            return Err(ApiError::BadData);
        }

        image::load_from_memory(&body).map_err(|e| {
            warn!(error = %e, url, "Failed to decode image");
            ApiError::BadData
        })
    }

    // ===== Request Helpers =====

    /// Build an endpoint URL by appending path segments to the base URL.
    /// Each segment is percent-encoded on its own, so a name containing
    /// `/` or spaces stays a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::BadUrl)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn bearer_token(&self) -> Result<String, ApiError> {
        self.session.token().await.ok_or_else(|| {
            debug!("No token available, not sending request");
            ApiError::NotSignedIn
        })
    }

    /// Send a request and return the body of a 200 response.
    /// Build errors, transport errors and every other status map to `failure`.
    async fn fetch_body(&self, request: RequestBuilder, failure: ApiError) -> Result<Vec<u8>, ApiError> {
        let request = request.build().map_err(|e| {
            warn!(error = %e, "Failed to build request");
            failure
        })?;
        let url = request.url().clone();

        let response = self.client.execute(request).await.map_err(|e| {
            warn!(error = %e, %url, "Request failed");
            failure
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%status, %url, "Request received bad response");
            return Err(failure);
        }

        let body = response.bytes().await.map_err(|e| {
            warn!(error = %e, %url, "Failed to read response body");
            failure
        })?;

        debug!(%url, bytes = body.len(), "Response received");
        Ok(body.to_vec())
    }

    fn decode<T: DeserializeOwned>(body: &[u8], what: &str, failure: ApiError) -> Result<T, ApiError> {
        serde_json::from_slice(body).map_err(|e| {
            warn!(error = %e, "Failed to decode {}", what);
            failure
        })
    }
}
