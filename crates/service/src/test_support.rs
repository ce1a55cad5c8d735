use std::path::PathBuf;

use crate::storage::Storage;

/// Fresh file-backed storage under the system temp dir.
pub async fn temp_file_storage() -> Result<(Storage, PathBuf), anyhow::Error> {
    let dir = std::env::temp_dir().join(format!("restaurant_service_{}", uuid::Uuid::new_v4()));
    let storage = Storage::open_file(&dir).await?;
    Ok((storage, dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuService;
    use crate::settings::SettingsService;
    use serde_json::json;

    #[tokio::test]
    async fn file_storage_survives_reopen() -> Result<(), anyhow::Error> {
        let (storage, dir) = temp_file_storage().await?;
        let menu = MenuService::new(storage.menu.clone());
        let settings = SettingsService::new(storage.settings.clone());

        let soup = menu.create(json!({ "title": "Soup", "price": "5", "currency": "USD" })).await?;
        let first = settings.get_or_create().await?;
        settings.upsert(json!({ "name": "Corner Cafe" })).await?;
        storage.shutdown().await?;

        let reopened = Storage::open_file(&dir).await?;
        let items = MenuService::new(reopened.menu.clone()).list().await?;
        assert_eq!(items, vec![soup]);
        let again = SettingsService::new(reopened.settings.clone()).get_or_create().await?;
        assert_eq!(again.id, first.id);
        assert_eq!(again.name, "Corner Cafe");

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
