mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::TestServer;

#[tokio::test]
async fn show_returns_nested_tree_in_stored_order() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.signup("chef@example.com").await?;
    let menu_id = server.add_menu(&token, "Dinner").await?;

    let starters = server.add_group(&token, &menu_id, "Starters").await?;
    let drinks = server.add_group(&token, &menu_id, "Drinks").await?;
    for name in ["Soup", "Salad", "Bread"] {
        server.add_item(&token, &starters, name, "3.00").await?;
    }
    server.add_item(&token, &drinks, "Water", "1.00").await?;

    // Public: no token needed
    let (status, body) = server.post("/menu/show", None, json!({"id": menu_id})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let tree = &body["data"];
    assert_eq!(tree["id"], menu_id.as_str());
    assert_eq!(tree["name"], "Dinner");

    let groups = tree["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["name"], "Starters");
    assert_eq!(groups[1]["name"], "Drinks");

    let names: Vec<&str> = groups[0]["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| item["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Soup", "Salad", "Bread"]);
    assert_eq!(groups[1]["items"].as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn show_of_unknown_menu_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;

    let (status, body) = server.post("/menu/show", None, json!({"id": "nope"})).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = server.post("/menu/show", None, json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}
