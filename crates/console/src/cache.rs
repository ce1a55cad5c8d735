use common::types::{MenuItem, RestaurantSettings};
use uuid::Uuid;

/// Read-through cache of the two server resources.
///
/// `None` means "not fetched or invalidated"; the console refetches on next read.
#[derive(Debug, Clone, Default)]
pub struct ResourceCache {
    menu: Option<Vec<MenuItem>>,
    settings: Option<RestaurantSettings>,
}

impl ResourceCache {
    pub fn menu(&self) -> Option<&[MenuItem]> {
        self.menu.as_deref()
    }

    pub fn settings(&self) -> Option<&RestaurantSettings> {
        self.settings.as_ref()
    }

    pub fn store_menu(&mut self, items: Vec<MenuItem>) {
        self.menu = Some(items);
    }

    pub fn store_settings(&mut self, settings: RestaurantSettings) {
        self.settings = Some(settings);
    }

    pub fn invalidate_menu(&mut self) {
        self.menu = None;
    }

    pub fn invalidate_all(&mut self) {
        self.menu = None;
        self.settings = None;
    }

    /// Drop one item without refetching.
    pub fn remove_item(&mut self, id: Uuid) {
        if let Some(items) = self.menu.as_mut() {
            items.retain(|i| i.id != id);
        }
    }

    /// 1-based lookup, as shown in listings.
    pub fn item_at(&self, position: usize) -> Option<&MenuItem> {
        position.checked_sub(1).and_then(|i| self.menu.as_ref()?.get(i))
    }
}
