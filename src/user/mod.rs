// Public API - what other modules can use
pub use handlers::{login, logout, signup};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
