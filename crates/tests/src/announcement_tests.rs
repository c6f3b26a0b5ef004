use dutydesk_services::rank::AdminLevel;
use serde_json::Value;

use crate::fixtures::test_app::TestApp;

#[tokio::test]
async fn create_requires_direction_board() {
    let app = TestApp::spawn().await;
    let mgmt = app.token_for("mgr", AdminLevel::Management, &[]);

    let resp = app
        .auth_post("/api/announcements", &mgmt)
        .json(&serde_json::json!({ "title": "Hi", "content": "Body" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);
}

#[tokio::test]
async fn create_list_delete_roundtrip() {
    let app = TestApp::spawn().await;
    let board = app.token_for("director", AdminLevel::DirectionBoard, &[]);
    let viewer = app.token_for("viewer", AdminLevel::TraineeMod, &[]);

    let resp = app
        .auth_post("/api/announcements", &board)
        .json(&serde_json::json!({
            "title": "New SOP",
            "content": "Read the updated procedures before your next shift.",
            "priority": "high",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["author"], "director");
    assert_eq!(created["priority"], "high");
    let id = created["_id"]["$oid"].as_str().unwrap().to_string();

    // Any staff member can read
    let resp = app
        .auth_get("/api/announcements", &viewer)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let list: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "New SOP");

    let resp = app
        .auth_delete(&format!("/api/announcements/{id}"), &board)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let resp = app
        .auth_get("/api/announcements", &viewer)
        .send()
        .await
        .unwrap();
    let list: Vec<Value> = resp.json().await.unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let app = TestApp::spawn().await;
    let board = app.token_for("director", AdminLevel::DirectionBoard, &[]);

    let resp = app
        .auth_post("/api/announcements", &board)
        .json(&serde_json::json!({ "title": "", "content": "Body" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
async fn priority_defaults_to_medium() {
    let app = TestApp::spawn().await;
    let board = app.token_for("director", AdminLevel::DirectionBoard, &[]);

    let resp = app
        .auth_post("/api/announcements", &board)
        .json(&serde_json::json!({ "title": "Heads up", "content": "No priority given" }))
        .send()
        .await
        .unwrap();
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["priority"], "medium");
}
