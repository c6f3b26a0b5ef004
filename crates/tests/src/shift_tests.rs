use crate::fixtures::test_app::TestApp;
use dutydesk_services::rank::AdminLevel;
use serde_json::Value;

#[tokio::test]
async fn start_requires_trainee_mod_level() {
    let app = TestApp::spawn().await;
    let token = app.token_for("civilian", AdminLevel::None, &["role-shift-moderating"]);

    let resp = app
        .auth_post("/api/shift/start", &token)
        .json(&serde_json::json!({ "type": "MODERATING" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);
}

#[tokio::test]
async fn start_requires_the_shift_type_role() {
    let app = TestApp::spawn().await;
    // Moderator level, but holds only the moderating shift role
    let token = app.token_for("alice", AdminLevel::Moderator, &["role-shift-moderating"]);

    let resp = app
        .auth_post("/api/shift/start", &token)
        .json(&serde_json::json!({ "type": "HR_SUPERVISOR" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    let resp = app
        .auth_post("/api/shift/start", &token)
        .json(&serde_json::json!({ "type": "FIFTY_FIFTY" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    let resp = app
        .auth_post("/api/shift/start", &token)
        .json(&serde_json::json!({ "type": "MODERATING" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn start_and_end_roundtrip() {
    let app = TestApp::spawn().await;
    let token = app.token_for("bob", AdminLevel::Moderator, &["role-shift-moderating"]);

    let resp = app
        .auth_post("/api/shift/start", &token)
        .json(&serde_json::json!({ "type": "MODERATING" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let shift: Value = resp.json().await.unwrap();
    assert_eq!(shift["username"], "bob");
    assert_eq!(shift["shift_type"], "MODERATING");
    assert!(shift["end_time"].is_null());

    // Visible as the current shift
    let resp = app
        .auth_get("/api/shift/current", &token)
        .send()
        .await
        .unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["active_shift"]["username"], "bob");

    let resp = app.auth_post("/api/shift/end", &token).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let ended: Value = resp.json().await.unwrap();
    assert!(!ended["end_time"].is_null());

    // No longer current
    let resp = app
        .auth_get("/api/shift/current", &token)
        .send()
        .await
        .unwrap();
    let json: Value = resp.json().await.unwrap();
    assert!(json["active_shift"].is_null());
}

#[tokio::test]
async fn second_start_conflicts_while_on_duty() {
    let app = TestApp::spawn().await;
    let token = app.token_for(
        "carol",
        AdminLevel::Moderator,
        &["role-shift-moderating", "role-shift-hr"],
    );

    let resp = app
        .auth_post("/api/shift/start", &token)
        .json(&serde_json::json!({ "type": "MODERATING" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    // A second start conflicts even for a different shift type
    let resp = app
        .auth_post("/api/shift/start", &token)
        .json(&serde_json::json!({ "type": "HR_SUPERVISOR" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 409);

    // Exactly one open shift survived
    let dao = dutydesk_services::dao::shift::ShiftDao::new(&app.db);
    assert_eq!(dao.open_shift_count("user-carol").await.unwrap(), 1);
}

#[tokio::test]
async fn end_without_active_shift_conflicts() {
    let app = TestApp::spawn().await;
    let token = app.token_for("dave", AdminLevel::Moderator, &[]);

    let resp = app.auth_post("/api/shift/end", &token).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 409);
}

#[tokio::test]
async fn ending_again_after_close_conflicts() {
    let app = TestApp::spawn().await;
    let token = app.token_for("erin", AdminLevel::Moderator, &["role-shift-moderating"]);

    app.auth_post("/api/shift/start", &token)
        .json(&serde_json::json!({ "type": "MODERATING" }))
        .send()
        .await
        .unwrap();
    let resp = app.auth_post("/api/shift/end", &token).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let resp = app.auth_post("/api/shift/end", &token).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 409);
}

#[tokio::test]
async fn a_closed_shift_does_not_block_a_new_start() {
    let app = TestApp::spawn().await;
    let token = app.token_for("frank", AdminLevel::Moderator, &["role-shift-moderating"]);

    for _ in 0..2 {
        let resp = app
            .auth_post("/api/shift/start", &token)
            .json(&serde_json::json!({ "type": "MODERATING" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);

        let resp = app.auth_post("/api/shift/end", &token).send().await.unwrap();
        assert_eq!(resp.status().as_u16(), 200);
    }
}
