#![allow(clippy::missing_docs_in_private_items)]

pub mod config;
pub mod embedding;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
