//! Storage handle for the service layer.
//!
//! `Storage` is built once at startup from the configured connection string
//! and hands out the repository objects the services run against. The
//! Postgres pool (if any) is closed through [`Storage::shutdown`].

pub mod json_map_store;

use std::{path::{Path, PathBuf}, sync::Arc};

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tracing::info;

use configs::{DatabaseConfig, StoreLocation};

use crate::errors::ServiceError;
use crate::menu::repo::{file::FileMenuRepository, seaorm::SeaOrmMenuRepository};
use crate::menu::repository::MenuRepository;
use crate::settings::repo::{file::FileSettingsRepository, seaorm::SeaOrmSettingsRepository};
use crate::settings::repository::SettingsRepository;

pub const MENU_FILE: &str = "menu_items.json";
pub const SETTINGS_FILE: &str = "restaurant_settings.json";

enum Backend {
    Postgres(DatabaseConnection),
    File(PathBuf),
}

#[derive(Clone)]
pub struct Storage {
    pub menu: Arc<dyn MenuRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    backend: Arc<Backend>,
}

impl Storage {
    /// Open the store named by `cfg.url`, running migrations when configured.
    pub async fn open(cfg: &DatabaseConfig) -> Result<Self, ServiceError> {
        let location = cfg.location().map_err(|e| ServiceError::Storage(e.to_string()))?;
        match location {
            StoreLocation::Postgres(_) => {
                let db = models::db::connect_with_config(cfg).await?;
                if cfg.run_migrations {
                    migration::Migrator::up(&db, None).await?;
                    info!("migrations applied");
                }
                Ok(Self::from_connection(db))
            }
            StoreLocation::File(dir) => Self::open_file(&dir).await,
        }
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            menu: Arc::new(SeaOrmMenuRepository::new(db.clone())),
            settings: Arc::new(SeaOrmSettingsRepository::new(db.clone())),
            backend: Arc::new(Backend::Postgres(db)),
        }
    }

    /// JSON document files under `dir`, one per collection.
    pub async fn open_file(dir: &Path) -> Result<Self, ServiceError> {
        common::env::ensure_data_dir(dir)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        let menu = FileMenuRepository::open(dir.join(MENU_FILE)).await?;
        let settings = FileSettingsRepository::open(dir.join(SETTINGS_FILE)).await?;
        Ok(Self {
            menu: Arc::new(menu),
            settings: Arc::new(settings),
            backend: Arc::new(Backend::File(dir.to_path_buf())),
        })
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend.as_ref() {
            Backend::Postgres(_) => "postgres",
            Backend::File(_) => "file",
        }
    }

    /// Close the database pool. File stores are flushed on every write.
    pub async fn shutdown(self) -> Result<(), ServiceError> {
        match self.backend.as_ref() {
            Backend::Postgres(db) => {
                db.clone().close().await?;
                info!("database pool closed");
            }
            Backend::File(dir) => info!(dir = %dir.display(), "file store released"),
        }
        Ok(())
    }
}
