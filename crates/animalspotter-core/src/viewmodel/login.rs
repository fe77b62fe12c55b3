use tracing::{info, warn};

use crate::api::ApiClient;
use crate::models::Credentials;

use super::{send_result, ResultChannel};

/// Outcome of a sign-up or sign-in request, ready for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginResult {
    SignUpSuccess,
    SignInSuccess,
    SignUpError,
    SignInError,
    MissingCredentials,
}

impl LoginResult {
    pub fn message(&self) -> &'static str {
        match self {
            LoginResult::SignUpSuccess => "Sign up successful. Now please log in.",
            LoginResult::SignInSuccess => "Sign in successful.",
            LoginResult::SignUpError => "Error occurred during sign up.",
            LoginResult::SignInError => "Error occurred during sign in.",
            LoginResult::MissingCredentials => "Username and password required.",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LoginResult::SignUpSuccess | LoginResult::SignInSuccess)
    }
}

pub struct LoginViewModel {
    api: ApiClient,
    results: ResultChannel<LoginResult>,
}

impl LoginViewModel {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            results: ResultChannel::new(),
        }
    }

    /// Spawn a sign-up request. Incomplete credentials are rejected
    /// without contacting the server. Never waits on the result channel,
    /// so the owner may issue requests before draining.
    pub async fn sign_up(&self, credentials: Credentials) {
        let api = self.api.clone();
        let tx = self.results.sender();

        tokio::spawn(async move {
            if !credentials.is_complete() {
                send_result(&tx, LoginResult::MissingCredentials).await;
                return;
            }

            let result = match api.sign_up(&credentials).await {
                Ok(()) => {
                    info!(username = %credentials.username, "Sign up successful");
                    LoginResult::SignUpSuccess
                }
                Err(e) => {
                    warn!(error = %e, "Sign up failed");
                    LoginResult::SignUpError
                }
            };
            send_result(&tx, result).await;
        });
    }

    /// Spawn a sign-in request. On success the shared session holds the
    /// new token before `SignInSuccess` is delivered.
    pub async fn sign_in(&self, credentials: Credentials) {
        let api = self.api.clone();
        let tx = self.results.sender();

        tokio::spawn(async move {
            if !credentials.is_complete() {
                send_result(&tx, LoginResult::MissingCredentials).await;
                return;
            }

            let result = match api.sign_in(&credentials).await {
                Ok(()) => {
                    info!(username = %credentials.username, "Login successful");
                    LoginResult::SignInSuccess
                }
                Err(e) => {
                    warn!(error = %e, "Login failed");
                    LoginResult::SignInError
                }
            };
            send_result(&tx, result).await;
        });
    }

    /// Results that have arrived since the last check
    pub fn check_results(&mut self) -> Vec<LoginResult> {
        self.results.drain()
    }

    pub async fn next_result(&mut self) -> Option<LoginResult> {
        self.results.recv().await
    }
}
