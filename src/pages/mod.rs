pub mod ai_dish;
pub mod demand_page;
pub mod dish_list;
pub mod dish_page;
pub mod home;
pub mod navbar;
