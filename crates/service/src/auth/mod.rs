//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Admin sessions are issued by an [`Authenticator`]; the bundled
//! implementation checks argon2 hashes and signs HS256 tokens.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;

pub use service::{hash_password, Authenticator, PasswordAuthenticator, SessionConfig};
