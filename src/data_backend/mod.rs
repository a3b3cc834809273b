use std::future::Future;

use chrono::{DateTime, Datelike, Local};

use crate::data_types::demand_data_types::{DemandRow, DemandUpload};
use crate::data_types::dish_data_types::{Dish, GenerateRequest, GenerateResponse, ImageSource, NewDish};
use crate::errors::BackendError;

#[cfg(test)]
pub mod fake_backend;
pub mod http_backend;

pub const EMOJIS: [&str; 6] = ["🍅", "🧂", "🥦", "🍳", "🦀", "🌶️"];

/// Everything the dashboard asks of the kitchen backend.
pub trait KitchenBackend: Send + Sync {
    /// Origin used to resolve relative photo paths.
    fn base_url(&self) -> &str;

    fn upload_demand(
        &self,
        upload: DemandUpload,
    ) -> impl Future<Output = Result<Vec<DemandRow>, BackendError>> + Send;

    /// `None` when the backend answered without an ingredient list.
    fn analyze_image(
        &self,
        source: ImageSource,
    ) -> impl Future<Output = Result<Option<Vec<String>>, BackendError>> + Send;

    fn generate_dishes(
        &self,
        request: GenerateRequest,
    ) -> impl Future<Output = Result<GenerateResponse, BackendError>> + Send;

    fn get_dishes(&self) -> impl Future<Output = Result<Vec<Dish>, BackendError>> + Send;

    fn add_dish(&self, new_dish: NewDish) -> impl Future<Output = Result<Dish, BackendError>> + Send;
}

/// Photos stored by the backend come back as `/uploads/...`
pub fn absolute_photo_url(base_url: &str, photo: &str) -> String {
    if photo.starts_with("http") {
        photo.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), photo)
    }
}

pub fn build_date_string(date: DateTime<Local>) -> String {
    let (year, month, day) = (date.year(), date.month(), date.day());

    format!("{:04}-{:02}-{:02}", year, month, day)
}
