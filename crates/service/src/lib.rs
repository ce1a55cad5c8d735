//! Service layer for the restaurant admin panel.
//! - Menu collection and settings singleton over pluggable repositories.
//! - Storage backends: SeaORM/Postgres or JSON files, chosen by connection string.
//! - Session authentication behind the `Authenticator` trait.

pub mod errors;
pub mod auth;
pub mod storage;
pub mod menu;
pub mod settings;
pub mod text;
#[cfg(test)]
pub mod test_support;
