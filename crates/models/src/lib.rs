pub mod errors;
pub mod db;
pub mod menu_item;
pub mod restaurant_settings;

#[cfg(test)]
mod tests;
