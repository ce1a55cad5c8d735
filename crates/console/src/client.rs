use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use common::types::envelope::{
    AckEnvelope, ErrorEnvelope, LoginEnvelope, MenuItemEnvelope, MenuListEnvelope, SettingsEnvelope,
};
use common::types::{MenuItem, RestaurantSettings};

use crate::errors::ConsoleError;

/// The calls the console makes against the restaurant API.
#[async_trait]
pub trait RestaurantApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<LoginEnvelope, ConsoleError>;
    async fn list_menu(&self) -> Result<Vec<MenuItem>, ConsoleError>;
    async fn get_settings(&self) -> Result<RestaurantSettings, ConsoleError>;
    async fn create_item(&self, token: &str, body: Value) -> Result<MenuItem, ConsoleError>;
    async fn update_item(&self, token: &str, body: Value) -> Result<MenuItem, ConsoleError>;
    async fn delete_item(&self, token: &str, id: &str) -> Result<(), ConsoleError>;
    async fn update_settings(&self, token: &str, body: Value) -> Result<RestaurantSettings, ConsoleError>;
}

/// reqwest-backed client.
#[derive(Clone)]
pub struct HttpRestaurantClient {
    http: Client,
    base_url: String,
}

impl HttpRestaurantClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConsoleError> {
        let http = Client::builder().build()?;
        Ok(Self { http, base_url: base_url.into().trim_end_matches('/').to_string() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<T, ConsoleError> {
        let mut req = self.http.request(method.clone(), self.url(path));
        if let Some(t) = token {
            req = req.bearer_auth(t);
        }
        if let Some(b) = body {
            req = req.json(&b);
        }
        let res = req.send().await?;
        let status = res.status();
        debug!(%method, path, status = status.as_u16(), "api call");
        if status == StatusCode::UNAUTHORIZED {
            return Err(ConsoleError::Unauthorized);
        }
        let bytes = res.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&bytes)
                .map(|e| e.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            return Err(ConsoleError::Api { status: status.as_u16(), message });
        }
        serde_json::from_slice(&bytes).map_err(|e| ConsoleError::Decode(e.to_string()))
    }
}

fn required<T>(value: Option<T>, what: &str) -> Result<T, ConsoleError> {
    value.ok_or_else(|| ConsoleError::Decode(format!("response without {what}")))
}

#[async_trait]
impl RestaurantApi for HttpRestaurantClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginEnvelope, ConsoleError> {
        let body = json!({ "username": username, "password": password });
        self.send(Method::POST, "/auth/login", None, Some(body)).await
    }

    async fn list_menu(&self) -> Result<Vec<MenuItem>, ConsoleError> {
        let env: MenuListEnvelope = self.send(Method::GET, "/api/restaurant", None, None).await?;
        Ok(env.menu)
    }

    async fn get_settings(&self) -> Result<RestaurantSettings, ConsoleError> {
        let env: SettingsEnvelope = self.send(Method::GET, "/api/restaurant/settings", None, None).await?;
        required(env.settings, "settings")
    }

    async fn create_item(&self, token: &str, body: Value) -> Result<MenuItem, ConsoleError> {
        let env: MenuItemEnvelope = self.send(Method::POST, "/api/restaurant", Some(token), Some(body)).await?;
        required(env.menu_item, "menuItem")
    }

    async fn update_item(&self, token: &str, body: Value) -> Result<MenuItem, ConsoleError> {
        let env: MenuItemEnvelope = self.send(Method::PUT, "/api/restaurant", Some(token), Some(body)).await?;
        required(env.menu_item, "menuItem")
    }

    async fn delete_item(&self, token: &str, id: &str) -> Result<(), ConsoleError> {
        let path = format!("/api/restaurant?id={id}");
        let _: AckEnvelope = self.send(Method::DELETE, &path, Some(token), None).await?;
        Ok(())
    }

    async fn update_settings(&self, token: &str, body: Value) -> Result<RestaurantSettings, ConsoleError> {
        let env: SettingsEnvelope =
            self.send(Method::POST, "/api/restaurant/settings", Some(token), Some(body)).await?;
        required(env.settings, "settings")
    }
}

/// Scripted in-memory API for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::{Duration, Utc};
    use std::sync::Mutex;
    use uuid::Uuid;

    pub const MOCK_PASSWORD: &str = "admin-pass";
    pub const MOCK_TOKEN: &str = "mock-token";

    #[derive(Default)]
    pub struct MockRestaurantApi {
        pub menu: Mutex<Vec<MenuItem>>,
        pub settings: Mutex<Option<RestaurantSettings>>,
        /// Names of the calls made, in order.
        pub calls: Mutex<Vec<String>>,
        /// When set, reads fail with this message.
        pub fail_reads: Mutex<Option<String>>,
        /// When set, writes fail with this message.
        pub fail_writes: Mutex<Option<String>>,
    }

    impl MockRestaurantApi {
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn check(&self, flag: &Mutex<Option<String>>) -> Result<(), ConsoleError> {
            match flag.lock().unwrap().clone() {
                Some(message) => Err(ConsoleError::Api { status: 500, message }),
                None => Ok(()),
            }
        }

        fn authorize(&self, token: &str) -> Result<(), ConsoleError> {
            if token == MOCK_TOKEN { Ok(()) } else { Err(ConsoleError::Unauthorized) }
        }

        fn text(body: &Value, key: &str) -> Option<String> {
            body.get(key).and_then(Value::as_str).map(str::to_string)
        }
    }

    #[async_trait]
    impl RestaurantApi for MockRestaurantApi {
        async fn login(&self, username: &str, password: &str) -> Result<LoginEnvelope, ConsoleError> {
            self.record("login");
            if username != "admin" || password != MOCK_PASSWORD {
                return Err(ConsoleError::Unauthorized);
            }
            Ok(LoginEnvelope {
                success: true,
                username: username.to_string(),
                token: MOCK_TOKEN.to_string(),
                expires_at: Utc::now() + Duration::hours(12),
            })
        }

        async fn list_menu(&self) -> Result<Vec<MenuItem>, ConsoleError> {
            self.record("list_menu");
            self.check(&self.fail_reads)?;
            Ok(self.menu.lock().unwrap().clone())
        }

        async fn get_settings(&self) -> Result<RestaurantSettings, ConsoleError> {
            self.record("get_settings");
            self.check(&self.fail_reads)?;
            let mut settings = self.settings.lock().unwrap();
            Ok(settings.get_or_insert_with(|| RestaurantSettings::empty(Uuid::new_v4(), Utc::now())).clone())
        }

        async fn create_item(&self, token: &str, body: Value) -> Result<MenuItem, ConsoleError> {
            self.record("create_item");
            self.authorize(token)?;
            self.check(&self.fail_writes)?;
            let mut item = MenuItem::blank(Uuid::new_v4(), Utc::now());
            item.title = Self::text(&body, "title").unwrap_or_default();
            item.price = Self::text(&body, "price").unwrap_or_default();
            item.currency = Self::text(&body, "currency").unwrap_or_default();
            item.image_data = Self::text(&body, "imageData");
            self.menu.lock().unwrap().insert(0, item.clone());
            Ok(item)
        }

        async fn update_item(&self, token: &str, body: Value) -> Result<MenuItem, ConsoleError> {
            self.record("update_item");
            self.authorize(token)?;
            self.check(&self.fail_writes)?;
            let id = Self::text(&body, "_id").and_then(|s| Uuid::parse_str(&s).ok());
            let mut menu = self.menu.lock().unwrap();
            let item = menu
                .iter_mut()
                .find(|i| Some(i.id) == id)
                .ok_or(ConsoleError::Api { status: 404, message: "Menu item not found".into() })?;
            if let Some(title) = Self::text(&body, "title") {
                item.title = title;
            }
            if let Some(price) = Self::text(&body, "price") {
                item.price = price;
            }
            if let Some(image) = body.get("imageData") {
                item.image_data = image.as_str().map(str::to_string);
            }
            Ok(item.clone())
        }

        async fn delete_item(&self, token: &str, id: &str) -> Result<(), ConsoleError> {
            self.record("delete_item");
            self.authorize(token)?;
            self.check(&self.fail_writes)?;
            self.menu.lock().unwrap().retain(|i| i.id.to_string() != id);
            Ok(())
        }

        async fn update_settings(&self, token: &str, body: Value) -> Result<RestaurantSettings, ConsoleError> {
            self.record("update_settings");
            self.authorize(token)?;
            self.check(&self.fail_writes)?;
            let mut settings = self.settings.lock().unwrap();
            let current = settings.get_or_insert_with(|| RestaurantSettings::empty(Uuid::new_v4(), Utc::now()));
            if let Some(name) = Self::text(&body, "name") {
                current.name = name;
            }
            if let Some(logo) = body.get("logoData") {
                current.logo_data = logo.as_str().map(str::to_string);
            }
            current.updated_at = Utc::now();
            Ok(current.clone())
        }
    }
}
