mod common;

use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::TestServer;

#[tokio::test]
async fn insert_sets_owner_and_timestamps() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (user_id, token) = server.signup("chef@example.com").await?;

    let (status, body) = server
        .post("/menu/add", Some(&token), json!({"name": "Dinner", "logo": "logo.png"}))
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let menu = &body["data"];
    assert_eq!(menu["user_id"], user_id.as_str());
    assert_eq!(menu["name"], "Dinner");
    assert_eq!(menu["logo"], "logo.png");
    assert_eq!(menu["banner"], serde_json::Value::Null);
    assert_eq!(menu["created_at"], menu["updated_at"]);
    assert_eq!(server.store.count("menu").await, 1);
    Ok(())
}

#[tokio::test]
async fn update_keeps_identity_owner_and_creation_time() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (user_id, token) = server.signup("chef@example.com").await?;

    let (_, created) = server.post("/menu/add", Some(&token), json!({"name": "Dinner"})).await?;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    tokio::time::sleep(Duration::from_millis(20)).await;

    let (status, updated) = server
        .post(
            "/menu/add",
            Some(&token),
            json!({
                "id": id,
                "name": "Supper",
                "banner": "b.png",
                "user_id": "someone-else",
                "created_at": "2000-01-01T00:00:00Z"
            }),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["id"], id.as_str());
    assert_eq!(updated["data"]["name"], "Supper");
    assert_eq!(updated["data"]["user_id"], user_id.as_str());
    assert_eq!(updated["data"]["created_at"], created["data"]["created_at"]);
    assert_ne!(updated["data"]["updated_at"], created["data"]["updated_at"]);

    // Persisted, not only echoed
    let (status, fetched) = server.post("/menu", Some(&token), json!({"id": id})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], updated["data"]);
    assert_eq!(server.store.count("menu").await, 1);
    Ok(())
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.signup("chef@example.com").await?;

    let (status, body) = server
        .post("/menu/add", Some(&token), json!({"id": "does-not-exist", "name": "Ghost"}))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(server.store.count("menu").await, 0);
    Ok(())
}

#[tokio::test]
async fn delete_of_missing_id_leaves_store_unchanged() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.signup("chef@example.com").await?;
    server.add_menu(&token, "Dinner").await?;
    let before = server.store.total().await;

    let (status, body) = server.post("/menu/delete", Some(&token), json!({"id": "missing"})).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(server.store.total().await, before);
    Ok(())
}

#[tokio::test]
async fn delete_does_not_cascade() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.signup("chef@example.com").await?;
    let menu_id = server.add_menu(&token, "Dinner").await?;
    server.add_group(&token, &menu_id, "Starters").await?;

    let (status, body) = server.post("/menu/delete", Some(&token), json!({"id": menu_id})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], menu_id.as_str());
    assert_eq!(server.store.count("menu").await, 0);
    assert_eq!(server.store.count("menu-group").await, 1);

    // The orphaned group is no longer reachable through its menu
    let (status, _) = server.post("/menu/group", Some(&token), json!({"menu_id": menu_id})).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn menus_are_isolated_between_users() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, alice) = server.signup("alice@example.com").await?;
    let (_, bob) = server.signup("bob@example.com").await?;
    let menu_id = server.add_menu(&alice, "Alice's").await?;
    let group_id = server.add_group(&alice, &menu_id, "Mains").await?;

    let (status, body) = server.get("/menu", Some(&bob)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let (status, _) = server.post("/menu", Some(&bob), json!({"id": menu_id})).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server
        .post("/menu/add", Some(&bob), json!({"id": menu_id, "name": "Hijacked"}))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server.post("/menu/delete", Some(&bob), json!({"id": menu_id})).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Bob cannot hang groups or items under Alice's menu
    let (status, _) = server
        .post("/menu/group/add", Some(&bob), json!({"menu_id": menu_id, "name": "Extra"}))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = server
        .post("/menu/group/item/add", Some(&bob), json!({"group_id": group_id, "name": "Soup", "price": 3}))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = server.post("/menu", Some(&alice), json!({"id": menu_id})).await?;
    assert_eq!(body["data"]["name"], "Alice's");
    assert_eq!(server.store.count("menu-group").await, 1);
    assert_eq!(server.store.count("menu-item").await, 0);
    Ok(())
}

#[tokio::test]
async fn groups_and_items_follow_the_same_lifecycle() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.signup("chef@example.com").await?;
    let menu_id = server.add_menu(&token, "Dinner").await?;
    let group_id = server.add_group(&token, &menu_id, "Starters").await?;
    let item_id = server.add_item(&token, &group_id, "Soup", "4.50").await?;

    let (status, body) = server
        .post(
            "/menu/group/item/add",
            Some(&token),
            json!({"id": item_id, "group_id": "other-group", "name": "Soup of the day", "price": 5, "description": "Ask"}),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["group_id"], group_id.as_str());
    assert_eq!(body["data"]["description"], "Ask");

    let (status, body) = server.post("/menu/group/item", Some(&token), json!({"group_id": group_id})).await?;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Soup of the day");

    let (status, body) = server
        .post(
            "/menu/group/add",
            Some(&token),
            json!({"id": group_id, "menu_id": "other-menu", "name": "Small plates"}),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["menu_id"], menu_id.as_str());
    let (_, body) = server.post("/menu/group", Some(&token), json!({"menu_id": menu_id})).await?;
    assert_eq!(body["data"][0]["name"], "Small plates");

    let (status, _) = server.post("/menu/group/item/delete", Some(&token), json!({"id": item_id})).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = server.post("/menu/group/delete", Some(&token), json!({"id": group_id})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(server.store.count("menu-item").await, 0);
    assert_eq!(server.store.count("menu-group").await, 0);
    Ok(())
}

#[tokio::test]
async fn invalid_items_are_rejected_with_field_errors() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.signup("chef@example.com").await?;
    let menu_id = server.add_menu(&token, "Dinner").await?;
    let group_id = server.add_group(&token, &menu_id, "Starters").await?;

    let (status, body) = server
        .post("/menu/group/item/add", Some(&token), json!({"group_id": group_id, "price": -2}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["name", "price"]);

    let (status, _) = server.post("/menu/group/add", Some(&token), json!({"name": "No parent"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(server.store.count("menu-item").await, 0);
    assert_eq!(server.store.count("menu-group").await, 1);
    Ok(())
}
