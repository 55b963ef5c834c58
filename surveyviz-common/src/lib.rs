//! # Surveyviz Common Library
//!
//! Shared code for the survey visualization application:
//! - Database schema, initialization and the `SurveyResponse` model
//! - Configuration and root folder resolution
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
