use serde::Serialize;

pub mod envelope;
pub mod restaurant;

pub use restaurant::{MenuItem, RestaurantSettings};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
