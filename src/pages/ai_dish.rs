use rand::Rng;
use regex_lite::Regex;
use static_init::dynamic;

use crate::constants::GENERATION_FAILED_MSG;
use crate::data_backend::{KitchenBackend, EMOJIS};
use crate::data_types::dish_data_types::{
    CustomIngredient, GenerateRequest, GenerateResponse, GeneratedDish, IngredientAmount,
};
use crate::data_types::RequestStatus;
use crate::errors::{BackendError, FormError};

/// Generator panel: asks the backend for dish ideas, either from the whole
/// inventory or from a hand-written ingredient list.
#[derive(Debug)]
pub struct DishGenerator {
    status: RequestStatus,
    error: Option<String>,
    dishes: Vec<GeneratedDish>,
    message: String,
    show_custom_ingredients: bool,
    custom_ingredients: Vec<CustomIngredient>,
}

impl Default for DishGenerator {
    fn default() -> Self {
        DishGenerator {
            status: RequestStatus::Idle,
            error: None,
            dishes: Vec::new(),
            message: String::new(),
            show_custom_ingredients: false,
            custom_ingredients: vec![CustomIngredient::default()],
        }
    }
}

impl DishGenerator {
    pub fn toggle_custom_ingredients(&mut self) {
        self.show_custom_ingredients = !self.show_custom_ingredients;
    }

    pub fn set_message(&mut self, message: &str) {
        self.message = message.to_string();
    }

    pub fn add_ingredient(&mut self) {
        self.custom_ingredients.push(CustomIngredient::default());
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Result<(), FormError> {
        if index >= self.custom_ingredients.len() {
            return Err(FormError::NoSuchIngredient(index));
        }
        self.custom_ingredients.remove(index);
        Ok(())
    }

    pub fn update_name(&mut self, index: usize, name: &str) -> Result<(), FormError> {
        self.ingredient_mut(index)?.name = name.to_string();
        Ok(())
    }

    /// Unreadable quantities count as zero, which keeps the row out of the request.
    pub fn update_quantity(&mut self, index: usize, quantity: &str) -> Result<(), FormError> {
        self.ingredient_mut(index)?.quantity = parse_quantity(quantity);
        Ok(())
    }

    pub fn toggle_completed(&mut self, index: usize) -> Result<(), FormError> {
        let ingredient = self.ingredient_mut(index)?;
        ingredient.completed = !ingredient.completed;
        Ok(())
    }

    fn ingredient_mut(&mut self, index: usize) -> Result<&mut CustomIngredient, FormError> {
        self.custom_ingredients
            .get_mut(index)
            .ok_or(FormError::NoSuchIngredient(index))
    }

    pub fn valid_ingredients(&self) -> Vec<IngredientAmount> {
        self.custom_ingredients
            .iter()
            .filter(|ing| !ing.name.trim().is_empty() && ing.quantity > 0)
            .map(|ing| IngredientAmount {
                name: ing.name.trim().to_string(),
                quantity: ing.quantity,
            })
            .collect()
    }

    pub fn begin_inventory(&mut self) -> Option<GenerateRequest> {
        if self.status == RequestStatus::Submitting {
            return None;
        }
        self.status = RequestStatus::Submitting;
        self.error = None;
        self.show_custom_ingredients = false;
        self.message.clear();

        Some(GenerateRequest::Inventory)
    }

    pub fn begin_custom(&mut self) -> Option<GenerateRequest> {
        if self.status == RequestStatus::Submitting {
            return None;
        }
        let ingredients = self.valid_ingredients();
        if ingredients.is_empty() {
            self.error = Some(FormError::NoValidIngredients.to_string());
            return None;
        }
        self.status = RequestStatus::Submitting;
        self.error = None;

        Some(GenerateRequest::Custom {
            ingredients,
            message: self.message.trim().to_string(),
        })
    }

    pub fn finish(&mut self, result: Result<GenerateResponse, BackendError>) {
        self.status = RequestStatus::Idle;
        match result {
            Ok(resp) if resp.success => {
                log::info!("Received {} generated dishes", resp.dishes.len());
                self.dishes = resp.dishes;
            }
            Ok(resp) => {
                self.error = Some(resp.message.unwrap_or_else(|| GENERATION_FAILED_MSG.to_string()));
            }
            Err(e) => {
                log::warn!("Dish generation failed: {:?}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    pub async fn generate_from_inventory<B: KitchenBackend>(&mut self, backend: &B) {
        if let Some(request) = self.begin_inventory() {
            let result = backend.generate_dishes(request).await;
            self.finish(result);
        }
    }

    pub async fn generate_from_custom_ingredients<B: KitchenBackend>(&mut self, backend: &B) {
        if let Some(request) = self.begin_custom() {
            let result = backend.generate_dishes(request).await;
            self.finish(result);
        }
    }

    pub fn dishes(&self) -> &[GeneratedDish] {
        &self.dishes
    }

    pub fn custom_ingredients(&self) -> &[CustomIngredient] {
        &self.custom_ingredients
    }

    pub fn shows_custom_ingredients(&self) -> bool {
        self.show_custom_ingredients
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Submitting
    }
}

/// Leading whole number of `txt`, so "2.5" is 2 and "3kg" is 3. Negative or missing is 0.
fn parse_quantity(txt: &str) -> u32 {
    #[dynamic]
    static RE: Regex = Regex::new(r"^\s*([+-]?)(\d+)").unwrap();

    match RE.captures(txt) {
        Some(caps) if &caps[1] != "-" => caps[2].parse().unwrap_or(u32::MAX),
        _ => 0,
    }
}

pub fn generated_dishes_to_msg(dishes: &[GeneratedDish]) -> String {
    let mut msg = String::new();

    let rand_emoji = EMOJIS[rand::thread_rng().gen_range(0..EMOJIS.len())];
    msg += &format!("{} AI Dish Generator {}\n", rand_emoji, rand_emoji);

    if dishes.is_empty() {
        msg += "\nNo dishes generated yet.\n";
        return msg;
    }

    for dish in dishes {
        msg += &format!("\n{}\n", dish.name);
        if !dish.description.is_empty() {
            msg += &format!("   {}\n", dish.description);
        }
        for ingredient in &dish.ingredients {
            msg += &format!("     + {}\n", ingredient);
        }
        msg += &format!(
            "   Cost: ${:.2}   Profit: {}%\n",
            dish.cost, dish.profit_margin
        );
        if dish.special_occasion {
            msg += "   ★ Special Occasion\n";
        }
    }

    msg
}
