//! View models adapting `ApiClient` results for presentation.
//!
//! Each view model spawns its API calls as background tokio tasks. A task
//! never touches view state; it sends its result through the view model's
//! channel and the owner applies it when it next drains the channel with
//! `check_results` (once per frame) or waits with `next_result`.
//!
//! - `LoginViewModel`: sign-up and sign-in
//! - `AnimalsViewModel`: the list of animal names
//! - `AnimalDetailViewModel`: one animal followed by its picture

pub mod animal_detail;
pub mod animals;
pub mod login;

pub use animal_detail::{AnimalDetailViewModel, GetAnimalResult};
pub use animals::{AnimalsViewModel, GetAnimalNamesResult};
pub use login::{LoginResult, LoginViewModel};

use tokio::sync::mpsc;
use tracing::error;

/// Buffer size for each view model's result channel.
/// A view model has at most a handful of requests in flight.
const CHANNEL_BUFFER_SIZE: usize = 16;

/// Result channel owned by a view model. Background tasks get a clone of
/// the sender; only the owner receives.
struct ResultChannel<T> {
    tx: mpsc::Sender<T>,
    rx: mpsc::Receiver<T>,
}

impl<T> ResultChannel<T> {
    fn new() -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        Self { tx, rx }
    }

    fn sender(&self) -> mpsc::Sender<T> {
        self.tx.clone()
    }

    /// Collect every result that has already arrived, without waiting
    fn drain(&mut self) -> Vec<T> {
        let mut results = Vec::new();
        while let Ok(result) = self.rx.try_recv() {
            results.push(result);
        }
        results
    }

    /// Wait for the next result. The channel holds its own sender, so this
    /// only returns `None` if the receiver was closed.
    async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

/// Helper to send a result to the owner, logging if the owner is gone
async fn send_result<T>(tx: &mpsc::Sender<T>, result: T) {
    if let Err(e) = tx.send(result).await {
        error!(error = %e, "Failed to send view model result - channel closed");
    }
}
