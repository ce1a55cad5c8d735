//! Restaurant settings singleton: get-or-create and upsert.

pub mod input;
pub mod repository;
pub mod repo;
pub mod service;

pub use input::SettingsInput;
pub use service::SettingsService;
