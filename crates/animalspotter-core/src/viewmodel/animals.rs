use tracing::{debug, error};

use crate::api::{ApiClient, ApiError};

use super::{send_result, ResultChannel};

const FETCH_NAMES_FAILED: &str = "Unable to fetch animal names.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetAnimalNamesResult {
    Success,
    Failure(String),
}

/// Holds the most recently fetched list of animal names.
pub struct AnimalsViewModel {
    api: ApiClient,
    animal_names: Vec<String>,
    results: ResultChannel<Result<Vec<String>, ApiError>>,
}

impl AnimalsViewModel {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            animal_names: Vec::new(),
            results: ResultChannel::new(),
        }
    }

    pub fn animal_names(&self) -> &[String] {
        &self.animal_names
    }

    /// True when there is no sign-in and the login screen must be shown first
    pub async fn should_present_login(&self) -> bool {
        !self.api.is_signed_in().await
    }

    /// Spawn a fetch of all animal names
    pub async fn get_animal_names(&self) {
        let api = self.api.clone();
        let tx = self.results.sender();

        tokio::spawn(async move {
            let result = api.list_animal_names().await;
            send_result(&tx, result).await;
        });
    }

    /// Apply every result that has arrived since the last check
    pub fn check_results(&mut self) -> Vec<GetAnimalNamesResult> {
        self.results
            .drain()
            .into_iter()
            .map(|result| self.apply(result))
            .collect()
    }

    pub async fn next_result(&mut self) -> Option<GetAnimalNamesResult> {
        let result = self.results.recv().await?;
        Some(self.apply(result))
    }

    /// A successful fetch replaces the list; a failed one leaves it untouched.
    fn apply(&mut self, result: Result<Vec<String>, ApiError>) -> GetAnimalNamesResult {
        match result {
            Ok(names) => {
                debug!(count = names.len(), "Animal names fetched successfully");
                self.animal_names = names;
                GetAnimalNamesResult::Success
            }
            Err(e) => {
                error!(error = %e, "Animal names fetch failed");
                GetAnimalNamesResult::Failure(FETCH_NAMES_FAILED.to_string())
            }
        }
    }
}
