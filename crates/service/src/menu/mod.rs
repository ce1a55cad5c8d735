//! Menu collection: list/create/update/delete over menu item documents.

pub mod patch;
pub mod repository;
pub mod repo;
pub mod service;

pub use patch::MenuItemPatch;
pub use service::MenuService;
