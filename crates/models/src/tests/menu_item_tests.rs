use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use common::types::MenuItem;

use super::setup_test_db;
use crate::menu_item;

fn dish(title: &str) -> MenuItem {
    let mut item = MenuItem::blank(Uuid::new_v4(), Utc::now());
    item.title = title.to_string();
    item.price = "5".into();
    item.currency = "USD".into();
    item
}

#[tokio::test]
async fn test_menu_item_crud() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let mut doc = dish(&format!("soup_{}", Uuid::new_v4()));
    doc.extra.insert("spicy".into(), json!(true));
    let created = menu_item::insert(&db, &doc).await?;
    assert_eq!(created.id, doc.id);
    assert_eq!(created.extra.get("spicy"), Some(&json!(true)));

    let found = menu_item::find(&db, doc.id).await?.expect("row exists");
    assert_eq!(found.title, doc.title);

    let mut edited = found.clone();
    edited.title = "Soup Deluxe".into();
    let replaced = menu_item::replace(&db, &edited).await?.expect("row updated");
    assert_eq!(replaced.title, "Soup Deluxe");
    assert_eq!(replaced.id, doc.id);

    assert!(menu_item::delete(&db, doc.id).await?);
    assert!(!menu_item::delete(&db, doc.id).await?);
    assert!(menu_item::find(&db, doc.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_replace_missing_row_returns_none() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let ghost = dish("ghost");
    assert!(menu_item::replace(&db, &ghost).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_list_is_newest_first() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    // Far-future timestamps keep these rows ahead of anything else in the table
    let base = Utc::now() + Duration::days(3650);
    let mut ids = Vec::new();
    for i in 0..3 {
        let mut doc = dish(&format!("ordered_{i}"));
        doc.created_at = base + Duration::seconds(i);
        menu_item::insert(&db, &doc).await?;
        ids.push(doc.id);
    }

    let listed = menu_item::list_newest_first(&db).await?;
    let top: Vec<Uuid> = listed.iter().take(3).map(|m| m.id).collect();
    assert_eq!(top, vec![ids[2], ids[1], ids[0]]);

    for id in ids {
        menu_item::delete(&db, id).await?;
    }
    Ok(())
}
