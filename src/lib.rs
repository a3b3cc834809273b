pub mod constants;
pub mod data_backend;
pub mod data_types;
pub mod errors;
pub mod pages;
pub mod shared_main;
