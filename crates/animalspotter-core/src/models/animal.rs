use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single animal sighting as returned by `GET /animals/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub name: String,
    pub description: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "timeSeen")]
    pub time_seen: DateTime<Utc>,
}

impl Animal {
    pub fn coordinates_display(&self) -> String {
        format!("lat: {}, long: {}", self.latitude, self.longitude)
    }

    /// Short date and time, e.g. "01/31/20, 14:05"
    pub fn time_seen_display(&self) -> String {
        self.time_seen.format("%m/%d/%y, %H:%M").to_string()
    }
}
