use base64::{engine::general_purpose, Engine as _};
use tokio::task::JoinHandle;

use crate::constants::{DETECTION_FAILED_MSG, PLACEHOLDER_INGREDIENTS};
use crate::data_backend::KitchenBackend;
use crate::data_types::dish_data_types::{Dish, DishIngredient, ImageSource, NewDish};
use crate::data_types::LocalFile;
use crate::errors::{BackendError, FormError};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PhotoInputMode {
    #[default]
    Url,
    File,
}

type DetectionResult = Result<Option<Vec<String>>, BackendError>;

#[derive(Debug)]
struct PendingDetection {
    selection: u64,
    handle: JoinHandle<DetectionResult>,
}

/// Create-dish form.
///
/// Every photo selection and every manual ingredient edit moves `selection`
/// forward. A detection answer is only applied if it was requested for the
/// current selection, so neither a newer photo nor a hand-edited list is ever
/// overwritten by an older request.
#[derive(Debug, Default)]
pub struct DishForm {
    draft: Dish,
    price_input: String,
    photo_mode: PhotoInputMode,
    photo_source: Option<ImageSource>,
    preview: Option<String>,
    photo_file_name: Option<String>,
    ingredient_input: String,
    error: Option<String>,
    selection: u64,
    pending_detection: Option<PendingDetection>,
}

impl DishForm {
    pub fn set_name(&mut self, name: &str) {
        self.draft.name = name.to_string();
    }

    pub fn set_price(&mut self, price: &str) {
        self.price_input = price.to_string();
        self.draft.price = price.trim().parse().unwrap_or(0.0);
    }

    pub fn set_photo_mode(&mut self, mode: PhotoInputMode) {
        self.photo_mode = mode;
    }

    /// Previews `url` and starts detecting its ingredients in the background.
    ///
    /// # Panics
    ///
    /// Detection is spawned onto the current Tokio runtime, so this must be
    /// called from within one.
    pub fn select_photo_url<B>(&mut self, url: &str, backend: &B)
    where
        B: KitchenBackend + Clone + 'static,
    {
        self.draft.photo = url.to_string();
        self.photo_source = Some(ImageSource::Url(url.to_string()));

        if url.trim().is_empty() {
            self.preview = None;
            self.supersede_detection();
        } else {
            self.preview = Some(url.to_string());
            self.start_detection(ImageSource::Url(url.to_string()), backend);
        }
    }

    /// Same as [`DishForm::select_photo_url`] for a local file, previewed as a data URL.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn select_photo_file<B>(&mut self, file: LocalFile, backend: &B)
    where
        B: KitchenBackend + Clone + 'static,
    {
        let data_url = to_data_url(&file);
        self.photo_file_name = Some(file.file_name.clone());
        self.draft.photo = data_url.clone();
        self.preview = Some(data_url);

        let source = ImageSource::File {
            file_name: file.file_name,
            bytes: file.bytes,
        };
        self.photo_source = Some(source.clone());
        self.start_detection(source, backend);
    }

    fn start_detection<B>(&mut self, source: ImageSource, backend: &B)
    where
        B: KitchenBackend + Clone + 'static,
    {
        self.supersede_detection();

        let backend = backend.clone();
        let handle = tokio::spawn(async move { backend.analyze_image(source).await });
        self.pending_detection = Some(PendingDetection {
            selection: self.selection,
            handle,
        });
    }

    fn supersede_detection(&mut self) {
        self.selection += 1;
        if let Some(pending) = self.pending_detection.take() {
            log::debug!("Dropping detection for selection {}", pending.selection);
            pending.handle.abort();
        }
    }

    /// Waits for the pending detection, if any, and applies its answer.
    pub async fn settle_detection(&mut self) {
        let Some(pending) = self.pending_detection.take() else {
            return;
        };

        match pending.handle.await {
            Ok(result) => self.apply_detection(pending.selection, result),
            Err(e) => log::warn!("Ingredient detection did not finish: {}", e),
        }
    }

    fn apply_detection(&mut self, selection: u64, result: DetectionResult) {
        if selection != self.selection {
            log::debug!(
                "Ignoring detection for selection {} (current {})",
                selection,
                self.selection
            );
            return;
        }

        match result {
            Ok(Some(ingredients)) => {
                log::info!("Detected {} ingredients", ingredients.len());
                self.draft.ingredients = ingredients.into_iter().map(DishIngredient::Named).collect();
            }
            Ok(None) => log::debug!("Detection answered without ingredients"),
            Err(e) => {
                log::warn!("Failed to analyze image: {:?}", e);
                self.error = Some(DETECTION_FAILED_MSG.to_string());
                if self.draft.ingredients.is_empty() {
                    self.draft.ingredients = PLACEHOLDER_INGREDIENTS
                        .iter()
                        .map(|name| DishIngredient::from(*name))
                        .collect();
                }
            }
        }
    }

    pub fn set_ingredient_input(&mut self, input: &str) {
        self.ingredient_input = input.to_string();
    }

    pub fn add_ingredient(&mut self) {
        let name = self.ingredient_input.trim();
        if name.is_empty() {
            return;
        }
        self.draft.ingredients.push(DishIngredient::from(name));
        self.ingredient_input.clear();
        self.supersede_detection();
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Result<(), FormError> {
        if index >= self.draft.ingredients.len() {
            return Err(FormError::NoSuchIngredient(index));
        }
        self.draft.ingredients.remove(index);
        self.supersede_detection();
        Ok(())
    }

    /// Hands the finished dish to `on_add_dish` and empties the form.
    pub fn handle_add_dish(&mut self, on_add_dish: impl FnOnce(NewDish)) -> Result<(), FormError> {
        if self.draft.name.is_empty() || self.draft.photo.is_empty() || !(self.draft.price > 0.0) {
            let err = FormError::MissingDishFields;
            self.error = Some(err.to_string());
            return Err(err);
        }

        let photo = self
            .photo_source
            .take()
            .unwrap_or_else(|| ImageSource::Url(self.draft.photo.clone()));
        on_add_dish(NewDish {
            dish: self.draft.clone(),
            photo,
        });
        self.reset();

        Ok(())
    }

    pub fn reset(&mut self) {
        self.supersede_detection();
        self.draft = Dish::default();
        self.price_input.clear();
        self.photo_source = None;
        self.preview = None;
        self.photo_file_name = None;
        self.ingredient_input.clear();
        self.error = None;
    }

    pub fn draft(&self) -> &Dish {
        &self.draft
    }

    pub fn price_input(&self) -> &str {
        &self.price_input
    }

    pub fn photo_mode(&self) -> PhotoInputMode {
        self.photo_mode
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn photo_file_name(&self) -> Option<&str> {
        self.photo_file_name.as_deref()
    }

    pub fn ingredient_input(&self) -> &str {
        &self.ingredient_input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.pending_detection.is_some()
    }
}

fn mime_for(file: &LocalFile) -> &'static str {
    match file.extension().as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

pub fn to_data_url(file: &LocalFile) -> String {
    format!(
        "data:{};base64,{}",
        mime_for(file),
        general_purpose::STANDARD.encode(&file.bytes)
    )
}

pub fn dish_form_to_msg(form: &DishForm) -> String {
    let draft = form.draft();
    let mut msg = String::from("Create New Dish\n");

    msg += &format!("Name:  {}\n", draft.name);
    msg += &format!("Price: ${:.2}\n", draft.price);
    match (form.photo_mode(), form.photo_file_name()) {
        (PhotoInputMode::File, Some(file_name)) => msg += &format!("Photo: {}\n", file_name),
        _ => msg += &format!("Photo: {}\n", draft.photo),
    }
    if form.is_analyzing() {
        msg += "Analyzing ingredients...\n";
    }
    for ingredient in &draft.ingredients {
        msg += &format!("     + {}\n", ingredient);
    }
    if let Some(error) = form.error() {
        msg += &format!("\n⚠ {}\n", error);
    }

    msg
}
