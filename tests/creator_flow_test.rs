//! Creator platform flows against PostgreSQL
//!
//! Skipped unless `DATABASE_URL` is set.

mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use serial_test::serial;

use common::{
    assert_error, assert_status, register_user, register_verified_creator, test_app, TestDatabase,
    TestUser,
};
use pathmatch::shared::Role;

fn video_form(title: &str) -> MultipartForm {
    MultipartForm::new().add_text("title", title.to_string()).add_part(
        "video",
        Part::bytes(vec![0u8; 64])
            .file_name("clip.mp4")
            .mime_type("video/mp4"),
    )
}

async fn upload(server: &TestServer, creator: &TestUser, form: MultipartForm) -> Value {
    let response = server
        .post("/api/content/upload")
        .authorization_bearer(&creator.token)
        .multipart(form)
        .await;
    assert_status(&response, StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    body["data"].clone()
}

#[tokio::test]
#[serial]
async fn test_posts_purchases_and_feed() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let app = test_app(Some(db.pool().clone()));

    let creator = register_verified_creator(&app.server, db.pool()).await;
    let fan = register_user(&app.server, Role::User).await;
    let username = creator.username.clone().unwrap_or_default();

    // Private posts need a price
    let response = app
        .server
        .post("/api/content/upload")
        .authorization_bearer(&creator.token)
        .multipart(video_form("Locked").add_text("isPrivate", "true"))
        .await;
    assert_error(
        &response,
        StatusCode::BAD_REQUEST,
        "Price is required for private content",
    );

    let public = upload(&app.server, &creator, video_form("Trailer")).await;
    let private = upload(
        &app.server,
        &creator,
        video_form("Full episode")
            .add_text("isPrivate", "true")
            .add_text("price", "4.5")
            .add_text("description", "the good part"),
    )
    .await;
    assert_eq!(private["media"][0]["type"], "video");
    let private_id = private["id"].as_str().unwrap_or_default().to_string();

    // Strangers see the private post redacted
    let response = app
        .server
        .get(&format!("/api/content/creator/{}/posts?limit=1", username))
        .await;
    assert_status(&response, StatusCode::OK);
    let page: Value = response.json();
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["current_page"], 1);
    assert_eq!(page["posts"][0]["id"], private["id"]);
    assert_eq!(page["posts"][0]["content"], "This is private content");
    assert_eq!(page["posts"][0]["media"], json!([]));

    let response = app
        .server
        .get(&format!("/api/content/creator/{}/posts?type=public", username))
        .await;
    let page: Value = response.json();
    assert_eq!(page["posts"].as_array().map(Vec::len), Some(1));
    assert_eq!(page["posts"][0]["id"], public["id"]);

    let response = app.server.get("/api/content/creator/nobody_here/posts").await;
    assert_error(&response, StatusCode::NOT_FOUND, "Creator not found");

    // Pages far past the end are empty, not an error
    let response = app
        .server
        .get(&format!(
            "/api/content/creator/{}/posts?page={}",
            username,
            i64::MAX
        ))
        .await;
    assert_status(&response, StatusCode::OK);
    let page: Value = response.json();
    assert_eq!(page["posts"], json!([]));
    assert_eq!(page["current_page"], i64::MAX);

    // Follow, then read the feed
    let response = app
        .server
        .post(&format!("/api/users/follow/{}", username))
        .authorization_bearer(&fan.token)
        .await;
    assert_status(&response, StatusCode::OK);
    let counts: Value = response.json();
    assert_eq!(counts["following"], 1);
    assert_eq!(counts["followers"], 1);

    let response = app
        .server
        .get("/api/content/subscriber/feed")
        .authorization_bearer(&fan.token)
        .await;
    let feed: Value = response.json();
    assert_eq!(feed["posts"].as_array().map(Vec::len), Some(2));

    let response = app
        .server
        .get(&format!("/api/content/posts/{}", private_id))
        .authorization_bearer(&fan.token)
        .await;
    assert_error(&response, StatusCode::FORBIDDEN, "Access denied");

    // Purchase unlocks it; buying twice is fine
    for _ in 0..2 {
        let response = app
            .server
            .post(&format!("/api/content/subscriber/purchase/{}", private_id))
            .authorization_bearer(&fan.token)
            .await;
        assert_status(&response, StatusCode::OK);
    }

    let response = app
        .server
        .post(&format!(
            "/api/content/subscriber/purchase/{}",
            public["id"].as_str().unwrap_or_default()
        ))
        .authorization_bearer(&fan.token)
        .await;
    assert_status(&response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .get(&format!("/api/content/posts/{}", private_id))
        .authorization_bearer(&fan.token)
        .await;
    assert_status(&response, StatusCode::OK);
    let post: Value = response.json();
    assert_eq!(post["post"]["content"], "the good part");
    assert_eq!(post["post"]["views"], 1);
    assert_eq!(post["post"]["purchased"], true);

    let response = app
        .server
        .get("/api/content/creator/stats")
        .authorization_bearer(&creator.token)
        .await;
    assert_status(&response, StatusCode::OK);
    let stats: Value = response.json();
    assert_eq!(stats["total_posts"], 2);
    assert_eq!(stats["total_views"], 1);
    assert_eq!(stats["total_purchases"], 1);
    assert_eq!(stats["total_earnings"], 4.5);

    // Only the owner edits
    let response = app
        .server
        .put(&format!("/api/content/creator/posts/{}", private_id))
        .authorization_bearer(&fan.token)
        .multipart(MultipartForm::new().add_text("title", "Mine now"))
        .await;
    assert_status(&response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .put(&format!("/api/content/creator/posts/{}", private_id))
        .authorization_bearer(&creator.token)
        .multipart(MultipartForm::new().add_text("isPrivate", "false"))
        .await;
    assert_status(&response, StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["post"]["is_private"], false);
    assert_eq!(updated["post"]["price"], 0.0);

    let response = app
        .server
        .delete(&format!("/api/content/creator/posts/{}", private_id))
        .authorization_bearer(&creator.token)
        .await;
    assert_status(&response, StatusCode::OK);

    let response = app
        .server
        .delete(&format!("/api/content/creator/posts/{}", private_id))
        .authorization_bearer(&creator.token)
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "Post not found or unauthorized");
}

#[tokio::test]
#[serial]
async fn test_likes_and_comments() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let app = test_app(Some(db.pool().clone()));

    let creator = register_verified_creator(&app.server, db.pool()).await;
    let fan = register_user(&app.server, Role::User).await;
    let stranger = register_user(&app.server, Role::User).await;

    let post = upload(&app.server, &creator, video_form("Hello")).await;
    let post_id = post["id"].as_str().unwrap_or_default().to_string();

    let like_path = format!("/api/interactions/posts/{}/like", post_id);
    let response = app.server.post(&like_path).authorization_bearer(&fan.token).await;
    assert_eq!(response.json::<Value>(), json!({"likes": 1, "liked": true}));
    let response = app.server.post(&like_path).authorization_bearer(&fan.token).await;
    assert_eq!(response.json::<Value>(), json!({"likes": 0, "liked": false}));

    let response = app
        .server
        .post(&format!("/api/interactions/posts/{}/comments", post_id))
        .authorization_bearer(&fan.token)
        .json(&json!({"content": " Nice one "}))
        .await;
    assert_status(&response, StatusCode::CREATED);
    let comment: Value = response.json();
    assert_eq!(comment["content"], "Nice one");
    let comment_id = comment["id"].as_str().unwrap_or_default().to_string();

    let response = app
        .server
        .post(&format!(
            "/api/interactions/posts/{}/comments/{}/like",
            post_id, comment_id
        ))
        .authorization_bearer(&creator.token)
        .await;
    assert_eq!(response.json::<Value>()["likes"], 1);

    let comment_path = format!("/api/interactions/posts/{}/comments/{}", post_id, comment_id);
    let response = app
        .server
        .delete(&comment_path)
        .authorization_bearer(&stranger.token)
        .await;
    assert_error(
        &response,
        StatusCode::FORBIDDEN,
        "Not authorized to delete this comment",
    );

    // The post's author may moderate
    let response = app
        .server
        .delete(&comment_path)
        .authorization_bearer(&creator.token)
        .await;
    assert_status(&response, StatusCode::OK);

    let response = app
        .server
        .delete(&comment_path)
        .authorization_bearer(&creator.token)
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "Comment not found");
}

#[tokio::test]
#[serial]
async fn test_follow_rules() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let app = test_app(Some(db.pool().clone()));

    let alice = register_user(&app.server, Role::User).await;
    let bob = register_user(&app.server, Role::Creator).await;
    let alice_name = alice.username.clone().unwrap_or_default();
    let bob_name = bob.username.clone().unwrap_or_default();

    let response = app
        .server
        .post(&format!("/api/users/follow/{}", alice_name))
        .authorization_bearer(&alice.token)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "Cannot follow yourself");

    let response = app
        .server
        .post("/api/users/follow/ghost_user")
        .authorization_bearer(&alice.token)
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "User not found");

    let follow = format!("/api/users/follow/{}", bob_name);
    assert_status(
        &app.server.post(&follow).authorization_bearer(&alice.token).await,
        StatusCode::OK,
    );
    let response = app.server.post(&follow).authorization_bearer(&alice.token).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "Already following this user");

    let response = app
        .server
        .get(&format!("/api/users/{}/followers", bob_name))
        .authorization_bearer(&alice.token)
        .await;
    let followers: Vec<Value> = response.json();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0]["username"], alice_name.as_str());

    let unfollow = format!("/api/users/unfollow/{}", bob_name);
    let response = app.server.post(&unfollow).authorization_bearer(&alice.token).await;
    assert_status(&response, StatusCode::OK);
    let counts: Value = response.json();
    assert_eq!(counts["following"], 0);
    assert_eq!(counts["followers"], 0);

    let response = app.server.post(&unfollow).authorization_bearer(&alice.token).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "Not following this user");
}

#[tokio::test]
#[serial]
async fn test_conversations_and_unread_counts() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let app = test_app(Some(db.pool().clone()));

    let alice = register_user(&app.server, Role::User).await;
    let bob = register_user(&app.server, Role::Creator).await;
    let eve = register_user(&app.server, Role::User).await;

    let response = app
        .server
        .post("/api/messages/conversations")
        .authorization_bearer(&alice.token)
        .json(&json!({"participant_id": bob.id}))
        .await;
    assert_status(&response, StatusCode::CREATED);
    let conversation: Value = response.json();
    let conversation_id = conversation["id"].as_str().unwrap_or_default().to_string();

    // Same pair from the other side returns the existing conversation
    let response = app
        .server
        .post("/api/messages/conversations")
        .authorization_bearer(&bob.token)
        .json(&json!({"participant_id": alice.id}))
        .await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(response.json::<Value>()["id"], conversation["id"]);

    for text in ["hi bob", "are you there?"] {
        let response = app
            .server
            .post("/api/messages/messages")
            .authorization_bearer(&alice.token)
            .json(&json!({"conversation_id": conversation_id, "content": text}))
            .await;
        assert_status(&response, StatusCode::CREATED);
    }

    let response = app
        .server
        .post("/api/messages/messages")
        .authorization_bearer(&eve.token)
        .json(&json!({"conversation_id": conversation_id, "content": "let me in"}))
        .await;
    assert_status(&response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .get("/api/messages/unread")
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(response.json::<Value>()["unread_count"], 2);

    let response = app
        .server
        .get("/api/messages/conversations")
        .authorization_bearer(&bob.token)
        .await;
    let listed: Vec<Value> = response.json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["unread_count"], 2);
    assert_eq!(listed[0]["last_message"]["content"], "are you there?");
    assert_eq!(listed[0]["other_participant"]["id"], alice.id.to_string());

    let response = app
        .server
        .get(&format!(
            "/api/messages/conversations/{}/messages",
            conversation_id
        ))
        .authorization_bearer(&bob.token)
        .await;
    assert_status(&response, StatusCode::OK);
    let messages: Vec<Value> = response.json();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["content"], "are you there?");

    let response = app
        .server
        .get("/api/messages/unread")
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(response.json::<Value>()["unread_count"], 0);

    let response = app
        .server
        .get(&format!(
            "/api/messages/conversations/{}/messages",
            conversation_id
        ))
        .authorization_bearer(&eve.token)
        .await;
    assert_error(
        &response,
        StatusCode::FORBIDDEN,
        "Not authorized to view this conversation",
    );
}
