//! In-memory backend for exercising page state without a server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::data_backend::KitchenBackend;
use crate::data_types::demand_data_types::{DemandRow, DemandUpload};
use crate::data_types::dish_data_types::{Dish, GenerateRequest, GenerateResponse, ImageSource, NewDish};
use crate::errors::BackendError;

#[derive(Debug, Clone)]
pub enum Call {
    Upload(DemandUpload),
    Analyze(ImageSource),
    Generate(GenerateRequest),
    GetDishes,
    AddDish(NewDish),
}

#[derive(Debug, Clone)]
pub struct FakeBackend {
    pub base_url: String,
    pub upload: Result<Vec<DemandRow>, BackendError>,
    pub detected: Result<Option<Vec<String>>, BackendError>,
    /// Per-URL answers, checked before `detected`.
    pub detected_by_url: HashMap<String, Vec<String>>,
    pub generated: Result<GenerateResponse, BackendError>,
    pub dishes: Result<Vec<Dish>, BackendError>,
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        FakeBackend {
            base_url: "http://localhost:5001".to_string(),
            upload: Ok(Vec::new()),
            detected: Ok(Some(Vec::new())),
            detected_by_url: HashMap::new(),
            generated: Ok(GenerateResponse {
                success: true,
                dishes: Vec::new(),
                message: None,
            }),
            dishes: Ok(Vec::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl KitchenBackend for FakeBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn upload_demand(&self, upload: DemandUpload) -> Result<Vec<DemandRow>, BackendError> {
        self.record(Call::Upload(upload));
        self.upload.clone()
    }

    async fn analyze_image(
        &self,
        source: ImageSource,
    ) -> Result<Option<Vec<String>>, BackendError> {
        let by_url = match &source {
            ImageSource::Url(url) => self.detected_by_url.get(url).cloned(),
            ImageSource::File { .. } => None,
        };
        self.record(Call::Analyze(source));

        match by_url {
            Some(ingredients) => Ok(Some(ingredients)),
            None => self.detected.clone(),
        }
    }

    async fn generate_dishes(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, BackendError> {
        self.record(Call::Generate(request));
        self.generated.clone()
    }

    async fn get_dishes(&self) -> Result<Vec<Dish>, BackendError> {
        self.record(Call::GetDishes);
        self.dishes.clone()
    }

    async fn add_dish(&self, new_dish: NewDish) -> Result<Dish, BackendError> {
        let saved = Dish {
            id: Some("fake-id".to_string()),
            ..new_dish.dish.clone()
        };
        self.record(Call::AddDish(new_dish));
        Ok(saved)
    }
}
