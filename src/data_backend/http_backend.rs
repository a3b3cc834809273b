use std::time::Instant;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::data_backend::KitchenBackend;
use crate::data_types::demand_data_types::{DemandRow, DemandUpload};
use crate::data_types::dish_data_types::{
    AddDishResponse, AnalyzeImageResponse, Dish, DishesResponse, GenerateRequest, GenerateResponse,
    ImageSource, NewDish,
};
use crate::errors::BackendError;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpBackend {
            base_url,
            client: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

// the backend is not consistent about which key carries the reason
#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, BackendError> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message.or(body.error));
        log::warn!("Backend answered {}: {:?}", status, message);

        return Err(BackendError::Server {
            status: status.as_u16(),
            message,
        });
    }

    Ok(resp.json::<T>().await?)
}

fn file_part(file_name: String, bytes: Vec<u8>) -> Part {
    Part::bytes(bytes).file_name(file_name)
}

impl KitchenBackend for HttpBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn upload_demand(&self, upload: DemandUpload) -> Result<Vec<DemandRow>, BackendError> {
        let mut form = Form::new()
            .part("file", file_part(upload.file_name, upload.bytes))
            .text("date", upload.date);
        if let Some(season) = upload.season {
            form = form.text("season", season.as_str());
        }

        let now = Instant::now();
        let resp = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        log::debug!("upload response: {:.2?}", now.elapsed());

        read_json(resp).await
    }

    async fn analyze_image(
        &self,
        source: ImageSource,
    ) -> Result<Option<Vec<String>>, BackendError> {
        let form = match source {
            ImageSource::Url(url) => Form::new().text("image_url", url),
            ImageSource::File { file_name, bytes } => {
                Form::new().part("image_file", file_part(file_name, bytes))
            }
        };

        let now = Instant::now();
        let resp = self
            .client
            .post(self.endpoint("analyze-image"))
            .multipart(form)
            .send()
            .await?;
        log::debug!("analyze-image response: {:.2?}", now.elapsed());

        Ok(read_json::<AnalyzeImageResponse>(resp).await?.ingredients)
    }

    async fn generate_dishes(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, BackendError> {
        let now = Instant::now();
        let resp = self
            .client
            .post(self.endpoint("generate-dishes"))
            .json(&request)
            .send()
            .await?;
        log::debug!("generate-dishes response: {:.2?}", now.elapsed());

        read_json(resp).await
    }

    async fn get_dishes(&self) -> Result<Vec<Dish>, BackendError> {
        let now = Instant::now();
        let resp = self.client.get(self.endpoint("get-dishes")).send().await?;
        log::debug!("get-dishes response: {:.2?}", now.elapsed());

        let body: DishesResponse = read_json(resp).await?;
        if !body.success {
            return Err(BackendError::Server {
                status: 200,
                message: None,
            });
        }

        Ok(body.dishes)
    }

    async fn add_dish(&self, new_dish: NewDish) -> Result<Dish, BackendError> {
        let NewDish { dish, photo } = new_dish;
        let ingredient_names: Vec<&str> = dish.ingredients.iter().map(|i| i.name()).collect();
        let ingredients = serde_json::to_string(&ingredient_names)
            .map_err(|e| BackendError::UnexpectedResponse(e.to_string()))?;

        let form = Form::new()
            .text("name", dish.name.clone())
            .text("price", dish.price.to_string())
            .text("ingredients", ingredients);
        let form = match photo {
            ImageSource::Url(url) => form.text("photo_url", url),
            ImageSource::File { file_name, bytes } => {
                form.part("photo_file", file_part(file_name, bytes))
            }
        };

        let now = Instant::now();
        let resp = self
            .client
            .post(self.endpoint("add-dish"))
            .multipart(form)
            .send()
            .await?;
        log::debug!("add-dish response: {:.2?}", now.elapsed());

        let body: AddDishResponse = read_json(resp).await?;
        match body.dish {
            Some(saved) if body.success => Ok(saved),
            _ => Err(BackendError::Server {
                status: 200,
                message: body.error,
            }),
        }
    }
}
