use std::sync::OnceLock;

pub static API_URL: OnceLock<String> = OnceLock::new();

pub const DEFAULT_API_URL: &str = "http://localhost:5001";

// form validation
pub const MISSING_DISH_FIELDS_MSG: &str = "Please fill in all fields";
pub const NO_CUSTOM_INGREDIENTS_MSG: &str = "Please add at least one ingredient with name and quantity";
pub const NO_UPLOAD_FILE_MSG: &str = "Please select a file to upload";
pub const INVALID_UPLOAD_FILE_MSG: &str = "Only Excel files (.xlsx, .xls) are supported";

// backend failures
pub const SERVER_ERROR_MSG: &str = "Server error occurred. Please try again.";
pub const NETWORK_ERROR_MSG: &str = "Network error occurred. Please check your connection and try again.";
pub const UNEXPECTED_ERROR_MSG: &str = "An unexpected error occurred. Please try again.";
pub const GENERATION_FAILED_MSG: &str = "Failed to generate dishes";
pub const UPLOAD_FAILED_MSG: &str = "Failed to upload file. Please try again.";
pub const DETECTION_FAILED_MSG: &str =
    "Failed to analyze image for ingredients. Using default ingredients.";

pub const PLACEHOLDER_INGREDIENTS: [&str; 3] = ["Ingredient 1", "Ingredient 2", "Ingredient 3"];

pub const DEMAND_FILE_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];
