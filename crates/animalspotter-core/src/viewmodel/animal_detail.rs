use image::DynamicImage;
use tracing::{debug, error};

use crate::api::ApiClient;
use crate::models::Animal;

use super::{send_result, ResultChannel};

/// Events produced by a single `get_animal` request.
///
/// A successful record is always followed by exactly one more event for
/// its picture: `SuccessfulWithImage` or `Failure`.
#[derive(Debug, Clone)]
pub enum GetAnimalResult {
    SuccessfulWithAnimal(Animal),
    SuccessfulWithImage(DynamicImage),
    Failure(String),
}

pub struct AnimalDetailViewModel {
    api: ApiClient,
    results: ResultChannel<GetAnimalResult>,
}

impl AnimalDetailViewModel {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            results: ResultChannel::new(),
        }
    }

    /// Spawn a fetch of the named animal, then of its picture.
    pub async fn get_animal(&self, name: &str) {
        let api = self.api.clone();
        let tx = self.results.sender();
        let name = name.to_string();

        tokio::spawn(async move {
            let animal = match api.get_animal(&name).await {
                Ok(animal) => animal,
                Err(e) => {
                    error!(error = %e, animal = %name, "Animal fetch failed");
                    let message = format!("Unable to fetch animal: {}", name);
                    send_result(&tx, GetAnimalResult::Failure(message)).await;
                    return;
                }
            };

            let image_url = animal.image_url.clone();
            let animal_name = animal.name.clone();
            debug!(animal = %animal_name, "Animal fetched successfully");
            send_result(&tx, GetAnimalResult::SuccessfulWithAnimal(animal)).await;

            let result = match api.get_image(&image_url).await {
                Ok(image) => GetAnimalResult::SuccessfulWithImage(image),
                Err(e) => {
                    error!(error = %e, url = %image_url, "Animal image fetch failed");
                    GetAnimalResult::Failure(format!(
                        "Unable to fetch image for animal: {}",
                        animal_name
                    ))
                }
            };
            send_result(&tx, result).await;
        });
    }

    pub fn check_results(&mut self) -> Vec<GetAnimalResult> {
        self.results.drain()
    }

    pub async fn next_result(&mut self) -> Option<GetAnimalResult> {
        self.results.recv().await
    }
}
