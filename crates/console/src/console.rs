use std::path::Path;

use serde_json::json;
use tracing::{error, info, warn};

use common::types::{MenuItem, RestaurantSettings};

use crate::client::RestaurantApi;
use crate::draft::MenuDraft;
use crate::errors::ConsoleError;
use crate::image::encode_image_file;
use crate::state::{Screen, Tab, Workspace};

pub const MSG_ADDED: &str = "Item added successfully!";
pub const MSG_UPDATED: &str = "Item updated successfully!";
pub const MSG_DELETED: &str = "Item deleted successfully!";
pub const MSG_ADD_FAILED: &str = "Error adding item";
pub const MSG_UPDATE_FAILED: &str = "Error updating item";
pub const MSG_LOGIN_FAILED: &str = "Invalid credentials";
pub const MSG_SESSION_EXPIRED: &str = "Session expired, please log in again";

/// Stateful admin console over a [`RestaurantApi`].
///
/// Service failures never escape as errors: they land in the visible
/// `message`/`notice` fields. Errors returned from these methods are usage
/// errors (wrong state, bad argument).
pub struct AdminConsole<C: RestaurantApi> {
    api: C,
    screen: Screen,
}

impl<C: RestaurantApi> AdminConsole<C> {
    pub fn new(api: C) -> Self {
        Self { api, screen: Screen::default() }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn workspace(&self) -> Option<&Workspace> {
        match &self.screen {
            Screen::LoggedIn(ws) => Some(&**ws),
            Screen::LoggedOut { .. } => None,
        }
    }

    fn workspace_mut(&mut self) -> Result<&mut Workspace, ConsoleError> {
        match &mut self.screen {
            Screen::LoggedIn(ws) => Ok(&mut **ws),
            Screen::LoggedOut { .. } => Err(ConsoleError::NotLoggedIn),
        }
    }

    /// Authenticate against the server; on success fetch menu and settings.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ConsoleError> {
        if self.workspace().is_some() {
            return Err(ConsoleError::usage("already logged in; logout first"));
        }
        match self.api.login(username, password).await {
            Ok(session) => {
                info!(username = %session.username, expires_at = %session.expires_at, "console_login");
                self.screen = Screen::LoggedIn(Box::new(Workspace::new(session.username, session.token)));
                self.refresh().await
            }
            Err(e) => {
                warn!(error = %e, "console login failed");
                let login_error = match e {
                    ConsoleError::Unauthorized => MSG_LOGIN_FAILED.to_string(),
                    other => other.to_string(),
                };
                self.screen = Screen::LoggedOut { login_error: Some(login_error) };
                Ok(())
            }
        }
    }

    /// Drop the session, cache and drafts.
    pub fn logout(&mut self) {
        if let Screen::LoggedIn(ws) = &self.screen {
            info!(username = %ws.username, "console_logout");
        }
        self.screen = Screen::default();
    }

    /// Invalidate both cached resources and fetch them again.
    pub async fn refresh(&mut self) -> Result<(), ConsoleError> {
        let ws = self.workspace_mut()?;
        ws.cache.invalidate_all();
        ws.notice = None;
        self.ensure_menu().await?;
        self.ensure_settings().await?;
        Ok(())
    }

    /// Cached menu, fetched when missing.
    pub async fn menu(&mut self) -> Result<Vec<MenuItem>, ConsoleError> {
        self.ensure_menu().await?;
        Ok(self.workspace_mut()?.cache.menu().map(<[MenuItem]>::to_vec).unwrap_or_default())
    }

    /// Cached settings, fetched when missing.
    pub async fn settings(&mut self) -> Result<Option<RestaurantSettings>, ConsoleError> {
        self.ensure_settings().await?;
        Ok(self.workspace_mut()?.cache.settings().cloned())
    }

    async fn ensure_menu(&mut self) -> Result<(), ConsoleError> {
        if self.workspace_mut()?.cache.menu().is_some() {
            return Ok(());
        }
        let fetched = self.api.list_menu().await;
        let ws = self.workspace_mut()?;
        match fetched {
            Ok(items) => ws.cache.store_menu(items),
            Err(e) => {
                error!(error = %e, "error fetching menu");
                ws.notice = Some(format!("Could not load menu: {e}"));
            }
        }
        Ok(())
    }

    async fn ensure_settings(&mut self) -> Result<(), ConsoleError> {
        if self.workspace_mut()?.cache.settings().is_some() {
            return Ok(());
        }
        let fetched = self.api.get_settings().await;
        let ws = self.workspace_mut()?;
        match fetched {
            Ok(settings) => ws.cache.store_settings(settings),
            Err(e) => {
                error!(error = %e, "error fetching settings");
                ws.notice = Some(format!("Could not load settings: {e}"));
            }
        }
        Ok(())
    }

    /// Switch tabs. Choosing `Add` directly starts a fresh item.
    pub fn select_tab(&mut self, tab: Tab) -> Result<(), ConsoleError> {
        let ws = self.workspace_mut()?;
        if tab == Tab::Add {
            ws.reset_draft();
            ws.message = None;
        }
        ws.tab = tab;
        Ok(())
    }

    /// Load item `position` (1-based) into the draft and switch to `Add`.
    pub fn edit(&mut self, position: usize) -> Result<(), ConsoleError> {
        let ws = self.workspace_mut()?;
        let item = ws
            .cache
            .item_at(position)
            .cloned()
            .ok_or_else(|| ConsoleError::usage(format!("no item #{position}")))?;
        ws.editing = Some(item.id);
        ws.draft = MenuDraft::from_item(&item);
        ws.tab = Tab::Add;
        Ok(())
    }

    /// Open the delete confirmation for item `position`.
    pub fn request_delete(&mut self, position: usize) -> Result<(), ConsoleError> {
        let ws = self.workspace_mut()?;
        let id = ws
            .cache
            .item_at(position)
            .map(|i| i.id)
            .ok_or_else(|| ConsoleError::usage(format!("no item #{position}")))?;
        ws.pending_delete = Some(id);
        Ok(())
    }

    /// Close the confirmation without touching the server.
    pub fn cancel_delete(&mut self) -> Result<(), ConsoleError> {
        self.workspace_mut()?.pending_delete = None;
        Ok(())
    }

    pub async fn confirm_delete(&mut self) -> Result<(), ConsoleError> {
        let ws = self.workspace_mut()?;
        let id = ws.pending_delete.take().ok_or_else(|| ConsoleError::usage("nothing to confirm"))?;
        let token = ws.token.clone();

        let result = self.api.delete_item(&token, &id.to_string()).await;
        match result {
            Ok(()) => {
                let ws = self.workspace_mut()?;
                ws.cache.remove_item(id);
                ws.message = Some(MSG_DELETED.to_string());
                info!(item_id = %id, "console_item_deleted");
            }
            Err(e) => self.record_failure(e, "Error deleting item")?,
        }
        Ok(())
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), ConsoleError> {
        self.workspace_mut()?.draft.set_field(field, value)
    }

    /// Attach an image file to the draft as a data URL.
    pub async fn attach_image(&mut self, path: &Path) -> Result<(), ConsoleError> {
        self.workspace_mut()?;
        let data_url = encode_image_file(path).await?;
        self.workspace_mut()?.draft.image_data = Some(data_url);
        Ok(())
    }

    pub fn remove_image(&mut self) -> Result<(), ConsoleError> {
        self.workspace_mut()?.draft.remove_image();
        Ok(())
    }

    /// Create, or update the item being edited; then refetch the menu.
    pub async fn submit(&mut self) -> Result<(), ConsoleError> {
        let ws = self.workspace_mut()?;
        let editing = ws.editing;
        let body = ws.draft.to_body(editing);
        let token = ws.token.clone();

        let result = match editing {
            Some(_) => self.api.update_item(&token, body).await,
            None => self.api.create_item(&token, body).await,
        };
        match result {
            Ok(item) => {
                let ws = self.workspace_mut()?;
                ws.message = Some(if editing.is_some() { MSG_UPDATED } else { MSG_ADDED }.to_string());
                ws.reset_draft();
                ws.cache.invalidate_menu();
                info!(item_id = %item.id, updated = editing.is_some(), "console_item_saved");
                self.ensure_menu().await
            }
            Err(e) => {
                let msg = if editing.is_some() { MSG_UPDATE_FAILED } else { MSG_ADD_FAILED };
                self.record_failure(e, msg)
            }
        }
    }

    /// Leave edit mode and clear the form.
    pub fn cancel_edit(&mut self) -> Result<(), ConsoleError> {
        self.workspace_mut()?.reset_draft();
        Ok(())
    }

    /// Upload a logo file; the cached settings take the server's answer.
    pub async fn upload_logo(&mut self, path: &Path) -> Result<(), ConsoleError> {
        self.workspace_mut()?;
        let data_url = encode_image_file(path).await?;
        self.save_settings(json!({ "logoData": data_url }), "Logo updated").await
    }

    pub async fn rename(&mut self, name: &str) -> Result<(), ConsoleError> {
        self.save_settings(json!({ "name": name }), "Restaurant renamed").await
    }

    async fn save_settings(&mut self, body: serde_json::Value, success: &str) -> Result<(), ConsoleError> {
        let token = self.workspace_mut()?.token.clone();
        match self.api.update_settings(&token, body).await {
            Ok(settings) => {
                let ws = self.workspace_mut()?;
                ws.cache.store_settings(settings);
                ws.message = Some(success.to_string());
                Ok(())
            }
            Err(e) => self.record_failure(e, "Error saving settings"),
        }
    }

    /// Log a failed call and surface it; an expired session logs the admin out.
    fn record_failure(&mut self, e: ConsoleError, message: &str) -> Result<(), ConsoleError> {
        error!(error = %e, "{message}");
        if matches!(e, ConsoleError::Unauthorized) {
            self.screen = Screen::LoggedOut { login_error: Some(MSG_SESSION_EXPIRED.to_string()) };
            return Ok(());
        }
        self.workspace_mut()?.message = Some(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockRestaurantApi, MOCK_PASSWORD};
    use chrono::Utc;
    use uuid::Uuid;

    fn seeded_api() -> MockRestaurantApi {
        let api = MockRestaurantApi::default();
        let mut soup = MenuItem::blank(Uuid::new_v4(), Utc::now());
        soup.title = "Soup".into();
        soup.price = "5".into();
        soup.currency = "USD".into();
        api.menu.lock().unwrap().push(soup);
        api
    }

    async fn logged_in(api: MockRestaurantApi) -> AdminConsole<MockRestaurantApi> {
        let mut console = AdminConsole::new(api);
        console.login("admin", MOCK_PASSWORD).await.unwrap();
        console
    }

    #[tokio::test]
    async fn failed_login_stays_logged_out() {
        let mut console = AdminConsole::new(MockRestaurantApi::default());
        console.login("admin", "wrong").await.unwrap();
        match console.screen() {
            Screen::LoggedOut { login_error } => assert_eq!(login_error.as_deref(), Some(MSG_LOGIN_FAILED)),
            Screen::LoggedIn(_) => panic!("should stay logged out"),
        }
        assert_eq!(console.api().calls(), vec!["login"]);
    }

    #[tokio::test]
    async fn login_fetches_menu_and_settings() {
        let console = logged_in(seeded_api()).await;
        assert_eq!(console.api().calls(), vec!["login", "list_menu", "get_settings"]);
        let ws = console.workspace().unwrap();
        assert_eq!(ws.tab, Tab::Menu);
        assert_eq!(ws.cache.menu().map(|m| m.len()), Some(1));
        assert!(ws.cache.settings().is_some());
    }

    #[tokio::test]
    async fn edit_then_submit_calls_update() {
        let mut console = logged_in(seeded_api()).await;
        console.edit(1).unwrap();
        {
            let ws = console.workspace().unwrap();
            assert_eq!(ws.tab, Tab::Add);
            assert_eq!(ws.draft.title, "Soup");
            assert!(ws.editing.is_some());
        }
        console.set_field("title", "Soup Deluxe").unwrap();
        console.submit().await.unwrap();

        let calls = console.api().calls();
        assert!(calls.contains(&"update_item".to_string()));
        assert!(!calls.contains(&"create_item".to_string()));
        let ws = console.workspace().unwrap();
        assert_eq!(ws.message.as_deref(), Some(MSG_UPDATED));
        assert!(ws.editing.is_none());
        assert_eq!(ws.draft, MenuDraft::default());
        assert_eq!(ws.cache.item_at(1).map(|i| i.title.as_str()), Some("Soup Deluxe"));
    }

    #[tokio::test]
    async fn removing_image_while_editing_clears_it_on_submit() {
        let api = seeded_api();
        api.menu.lock().unwrap()[0].image_data = Some("data:image/png;base64,AAAA".into());
        let mut console = logged_in(api).await;
        console.edit(1).unwrap();
        assert!(console.workspace().unwrap().draft.image_data.is_some());

        console.remove_image().unwrap();
        console.submit().await.unwrap();

        let ws = console.workspace().unwrap();
        assert_eq!(ws.message.as_deref(), Some(MSG_UPDATED));
        assert_eq!(ws.cache.item_at(1).and_then(|i| i.image_data.clone()), None);
    }

    #[tokio::test]
    async fn submit_without_edit_creates_and_refetches() {
        let mut console = logged_in(MockRestaurantApi::default()).await;
        console.select_tab(Tab::Add).unwrap();
        console.set_field("title", "Salad").unwrap();
        console.submit().await.unwrap();

        assert_eq!(
            console.api().calls(),
            vec!["login", "list_menu", "get_settings", "create_item", "list_menu"]
        );
        let ws = console.workspace().unwrap();
        assert_eq!(ws.message.as_deref(), Some(MSG_ADDED));
        assert_eq!(ws.cache.item_at(1).map(|i| i.title.as_str()), Some("Salad"));
    }

    #[tokio::test]
    async fn failed_submit_shows_error_without_retry() {
        let api = MockRestaurantApi::default();
        *api.fail_writes.lock().unwrap() = Some("boom".into());
        let mut console = logged_in(api).await;
        console.set_field("title", "Salad").unwrap();
        console.submit().await.unwrap();

        let creates = console.api().calls().iter().filter(|c| *c == "create_item").count();
        assert_eq!(creates, 1);
        let ws = console.workspace().unwrap();
        assert_eq!(ws.message.as_deref(), Some(MSG_ADD_FAILED));
        assert_eq!(ws.draft.title, "Salad");
    }

    #[tokio::test]
    async fn delete_cancel_never_calls_service() {
        let mut console = logged_in(seeded_api()).await;
        console.request_delete(1).unwrap();
        console.cancel_delete().unwrap();
        assert!(!console.api().calls().contains(&"delete_item".to_string()));
        assert!(console.workspace().unwrap().pending_delete.is_none());
        assert!(console.confirm_delete().await.is_err());
    }

    #[tokio::test]
    async fn delete_confirm_removes_from_cache() {
        let mut console = logged_in(seeded_api()).await;
        console.request_delete(1).unwrap();
        console.confirm_delete().await.unwrap();
        let ws = console.workspace().unwrap();
        assert_eq!(ws.message.as_deref(), Some(MSG_DELETED));
        assert_eq!(ws.cache.menu().map(|m| m.len()), Some(0));
    }

    #[tokio::test]
    async fn selecting_add_tab_clears_edit() {
        let mut console = logged_in(seeded_api()).await;
        console.edit(1).unwrap();
        console.select_tab(Tab::Add).unwrap();
        let ws = console.workspace().unwrap();
        assert!(ws.editing.is_none());
        assert_eq!(ws.draft, MenuDraft::default());
        assert!(ws.message.is_none());
    }

    #[tokio::test]
    async fn fetch_failure_sets_visible_notice() {
        let api = seeded_api();
        *api.fail_reads.lock().unwrap() = Some("db down".into());
        let console = logged_in(api).await;
        let ws = console.workspace().unwrap();
        assert!(ws.notice.as_deref().unwrap_or_default().contains("db down"));
        assert!(ws.cache.menu().is_none());
    }

    #[tokio::test]
    async fn rename_updates_cached_settings_and_logout_drops_everything() {
        let mut console = logged_in(MockRestaurantApi::default()).await;
        console.rename("Corner Cafe").await.unwrap();
        assert_eq!(console.settings().await.unwrap().map(|s| s.name), Some("Corner Cafe".to_string()));

        console.logout();
        assert!(console.workspace().is_none());
        assert!(matches!(console.set_field("title", "x"), Err(ConsoleError::NotLoggedIn)));
    }
}
