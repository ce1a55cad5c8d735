//! Backends for [`MenuRepository`](super::repository::MenuRepository).

pub mod file;
pub mod seaorm;
