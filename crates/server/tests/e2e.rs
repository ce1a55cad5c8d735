use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use configs::AppConfig;
use server::startup::build_app;
use service::storage::Storage;

const PASSWORD: &str = "e2e-password";

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let dir = std::env::temp_dir().join(format!("restaurant_e2e_{}", Uuid::new_v4()));
    let storage = Storage::open_file(&dir).await?;
    let mut cfg = AppConfig::default();
    cfg.auth.admin_password_hash = Some(service::auth::hash_password(PASSWORD)?);
    let app = build_app(&storage, &cfg)?;

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder().cookie_store(true).build()?)
}

fn titles(list: &Value) -> Vec<String> {
    list["menu"]
        .as_array()
        .map(|items| items.iter().filter_map(|i| i["title"].as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()?.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_menu_lifecycle_with_cookie_session() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client()?;
    let api = format!("{}/api/restaurant", app.base_url);

    // Login; the cookie store carries the session from here on
    let res = c
        .post(format!("{}/auth/login", app.base_url))
        .json(&json!({"username": "admin", "password": PASSWORD}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    // Create
    let res = c
        .post(&api)
        .json(&json!({"title": "Soup", "price": "5", "currency": "USD"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created = res.json::<Value>().await?;
    assert_eq!(created["success"], json!(true));
    let id = created["menuItem"]["_id"].as_str().unwrap_or_default().to_string();
    assert!(!id.is_empty());

    // Listed first
    let list = c.get(&api).send().await?.json::<Value>().await?;
    assert_eq!(list["menu"][0]["_id"], json!(id));

    // Update
    let res = c.put(&api).json(&json!({"_id": id, "title": "Soup Deluxe"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated["menuItem"]["price"], json!("5"));
    let list = c.get(&api).send().await?.json::<Value>().await?;
    assert_eq!(titles(&list), vec!["Soup Deluxe".to_string()]);

    // Delete
    let res = c.delete(&api).query(&[("id", id.as_str())]).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let list = c.get(&api).send().await?.json::<Value>().await?;
    assert!(titles(&list).is_empty());

    // Logout drops the cookie
    c.post(format!("{}/auth/logout", app.base_url)).send().await?;
    let res = c.post(&api).json(&json!({"title": "Late"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn e2e_sequential_creates_list_newest_first() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client()?;
    c.post(format!("{}/auth/login", app.base_url))
        .json(&json!({"username": "admin", "password": PASSWORD}))
        .send()
        .await?;

    let api = format!("{}/api/restaurant", app.base_url);
    for n in 0..4 {
        c.post(&api).json(&json!({"title": format!("Dish {n}")})).send().await?;
    }
    let list = c.get(&api).send().await?.json::<Value>().await?;
    assert_eq!(titles(&list), vec!["Dish 3", "Dish 2", "Dish 1", "Dish 0"]);
    Ok(())
}
