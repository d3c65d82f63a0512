// Public API - what other modules can use
pub use handlers::{create_twit, delete_twit, get_twit, list_twits, update_twit};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
