//! Backends for [`SettingsRepository`](super::repository::SettingsRepository).

pub mod file;
pub mod seaorm;
