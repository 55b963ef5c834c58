//! HTTP handlers for surveyviz-ui

pub mod clear;
pub mod health;
pub mod pages;
pub mod report;
pub mod upload;

pub use clear::clear_data;
pub use health::health_routes;
pub use pages::{conclusions_page, upload_form};
pub use report::view_data;
pub use upload::upload_dataset;
