// Behaviour every DocumentStore must share, run against each backend's tests.
// Collections are suffixed per run so a shared database can be reused.

use serde_json::{json, Value};
use uuid::Uuid;

use super::filter::Filter;
use super::store::{DatabaseError, Document, DocumentStore};

pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn scoped(name: &str) -> String {
    format!("{}-{}", name, Uuid::new_v4().simple())
}

async fn count(store: &dyn DocumentStore, collection: &str) -> usize {
    store.find(collection, &Filter::new()).await.unwrap().len()
}

pub async fn find_preserves_insertion_order(store: &dyn DocumentStore) {
    let collection = scoped("menu-group");
    for (id, name) in [("b", "Second"), ("a", "First"), ("c", "Third")] {
        store
            .insert(&collection, doc(json!({"id": id, "menu_id": "m1", "name": name})))
            .await
            .unwrap();
    }
    store
        .insert(&collection, doc(json!({"id": "x", "menu_id": "m2", "name": "Other"})))
        .await
        .unwrap();

    let found = store
        .find(&collection, &Filter::new().eq("menu_id", "m1"))
        .await
        .unwrap();
    let ids: Vec<&str> = found.iter().map(|d| d["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
    assert_eq!(count(store, &collection).await, 4);
}

pub async fn update_merges_fields_into_one_document(store: &dyn DocumentStore) {
    let collection = scoped("menu");
    store
        .insert(&collection, doc(json!({"id": "m1", "user_id": "u1", "name": "Old", "logo": "a.png"})))
        .await
        .unwrap();
    store
        .insert(&collection, doc(json!({"id": "m2", "user_id": "u1", "name": "Old"})))
        .await
        .unwrap();

    let matched = store
        .update_one(&collection, &Filter::by_id("m1"), doc(json!({"name": "New", "logo": null})))
        .await
        .unwrap();
    assert_eq!(matched, 1);

    let stored = store.find_one(&collection, &Filter::by_id("m1")).await.unwrap().unwrap();
    assert_eq!(stored["name"], "New");
    assert_eq!(stored["user_id"], "u1");
    assert_eq!(stored["logo"], Value::Null);

    let untouched = store.find_one(&collection, &Filter::by_id("m2")).await.unwrap().unwrap();
    assert_eq!(untouched["name"], "Old");

    let missed = store
        .update_one(&collection, &Filter::by_id("nope"), doc(json!({"name": "X"})))
        .await
        .unwrap();
    assert_eq!(missed, 0);
}

pub async fn delete_removes_exactly_one(store: &dyn DocumentStore) {
    let collection = scoped("menu-item");
    for id in ["i1", "i2"] {
        store
            .insert(&collection, doc(json!({"id": id, "group_id": "g1"})))
            .await
            .unwrap();
    }

    assert_eq!(store.delete_one(&collection, &Filter::by_id("missing")).await.unwrap(), 0);
    assert_eq!(count(store, &collection).await, 2);

    // Several matches, one removal, oldest first
    let removed = store
        .delete_one(&collection, &Filter::new().eq("group_id", "g1"))
        .await
        .unwrap();
    assert_eq!(removed, 1);
    let left = store.find(&collection, &Filter::new()).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0]["id"], "i2");
}

pub async fn duplicates_are_rejected(store: &dyn DocumentStore) {
    let email = format!("{}@example.com", Uuid::new_v4().simple());
    store
        .insert("users", doc(json!({"id": Uuid::new_v4().to_string(), "email": email})))
        .await
        .unwrap();
    let err = store
        .insert("users", doc(json!({"id": Uuid::new_v4().to_string(), "email": email})))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Duplicate { .. }));
    assert_eq!(store.find("users", &Filter::new().eq("email", email)).await.unwrap().len(), 1);

    let collection = scoped("menu");
    store.insert(&collection, doc(json!({"id": "m1"}))).await.unwrap();
    let err = store.insert(&collection, doc(json!({"id": "m1"}))).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Duplicate { .. }));
    assert_eq!(count(store, &collection).await, 1);
}

pub async fn insert_requires_identifier(store: &dyn DocumentStore) {
    let collection = scoped("menu");
    let err = store
        .insert(&collection, doc(json!({"name": "No id"})))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::MissingId));
    assert_eq!(count(store, &collection).await, 0);
}
