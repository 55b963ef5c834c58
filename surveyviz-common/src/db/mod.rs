//! Database schema and models for surveyviz

mod init;
mod models;

pub use init::init_database;
pub use models::SurveyResponse;
