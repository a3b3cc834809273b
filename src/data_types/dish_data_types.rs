use std::fmt;

use serde::{Deserialize, Serialize};

/// Ingredients come back either as bare names (created through the form)
/// or with an amount attached (seeded menu data).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DishIngredient {
    Named(String),
    Measured {
        name: String,
        quantity: f64,
        unit: String,
    },
}

impl DishIngredient {
    pub fn name(&self) -> &str {
        match self {
            DishIngredient::Named(name) => name,
            DishIngredient::Measured { name, .. } => name,
        }
    }
}

impl fmt::Display for DishIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DishIngredient::Named(name) => write!(f, "{}", name),
            DishIngredient::Measured {
                name,
                quantity,
                unit,
            } => write!(f, "{} ({} {})", name, quantity, unit),
        }
    }
}

impl From<&str> for DishIngredient {
    fn from(name: &str) -> Self {
        DishIngredient::Named(name.to_string())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Dish {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub photo: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub ingredients: Vec<DishIngredient>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeneratedDish {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub profit_margin: f64,
    #[serde(default)]
    pub special_occasion: bool,
}

/// Row of the custom ingredient editor. `completed` only lives in the editor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomIngredient {
    pub name: String,
    pub quantity: u32,
    pub completed: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IngredientAmount {
    pub name: String,
    pub quantity: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GenerateRequest {
    Inventory,
    Custom {
        ingredients: Vec<IngredientAmount>,
        #[serde(skip_serializing_if = "String::is_empty")]
        message: String,
    },
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default)]
    pub dishes: Vec<GeneratedDish>,
    pub message: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct DishesResponse {
    pub success: bool,
    #[serde(default)]
    pub dishes: Vec<Dish>,
}

/// `ingredients` may be missing, in which case the draft keeps what it has.
#[derive(Deserialize, Debug)]
pub struct AnalyzeImageResponse {
    pub ingredients: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
pub struct AddDishResponse {
    #[serde(default)]
    pub success: bool,
    pub dish: Option<Dish>,
    pub error: Option<String>,
}

/// Where a dish photo comes from. Files are shipped as bytes, URLs as text.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Url(String),
    File { file_name: String, bytes: Vec<u8> },
}

/// A finished draft on its way to `/add-dish`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDish {
    pub dish: Dish,
    pub photo: ImageSource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dish_accepts_both_ingredient_shapes() {
        let dish: Dish = serde_json::from_value(json!({
            "_id": "66a1",
            "name": "Paella",
            "photo": "/uploads/paella.png",
            "price": 14.5,
            "ingredients": ["Rice", {"name": "Saffron", "quantity": 2, "unit": "g"}],
            "created_at": "2024-05-01T12:00:00"
        }))
        .unwrap();

        assert_eq!(dish.id.as_deref(), Some("66a1"));
        assert_eq!(dish.ingredients[0].name(), "Rice");
        assert_eq!(dish.ingredients[1].name(), "Saffron");
        assert_eq!(dish.ingredients[1].to_string(), "Saffron (2 g)");
    }

    #[test]
    fn inventory_request_only_carries_its_tag() {
        let body = serde_json::to_value(GenerateRequest::Inventory).unwrap();
        assert_eq!(body, json!({"type": "inventory"}));
    }

    #[test]
    fn custom_request_omits_empty_message() {
        let req = GenerateRequest::Custom {
            ingredients: vec![IngredientAmount {
                name: "Rice".to_string(),
                quantity: 2,
            }],
            message: String::new(),
        };
        assert_eq!(
            serde_json::to_value(req).unwrap(),
            json!({"type": "custom", "ingredients": [{"name": "Rice", "quantity": 2}]})
        );
    }

    #[test]
    fn analyze_response_tells_missing_from_empty() {
        let missing: AnalyzeImageResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.ingredients, None);

        let empty: AnalyzeImageResponse =
            serde_json::from_value(json!({"ingredients": []})).unwrap();
        assert_eq!(empty.ingredients, Some(vec![]));
    }

    #[test]
    fn generate_response_without_dishes() {
        let resp: GenerateResponse =
            serde_json::from_value(json!({"success": false, "message": "No ingredients provided"}))
                .unwrap();
        assert!(!resp.success);
        assert!(resp.dishes.is_empty());
        assert_eq!(resp.message.as_deref(), Some("No ingredients provided"));
    }
}
