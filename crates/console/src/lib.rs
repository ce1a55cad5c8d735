//! Admin console for the restaurant API.
//!
//! [`AdminConsole`] is a state machine (logged out, or logged in on the menu
//! or add tab) driven by line commands; it talks to the server through the
//! [`RestaurantApi`] trait and keeps a read-through cache of the menu and
//! settings.

pub mod cache;
pub mod client;
pub mod command;
pub mod console;
pub mod draft;
pub mod errors;
pub mod image;
pub mod render;
pub mod repl;
pub mod state;

pub use client::{HttpRestaurantClient, RestaurantApi};
pub use console::AdminConsole;
pub use errors::ConsoleError;
