mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{titles, TestApp};

#[tokio::test]
async fn sharing_fills_only_the_recipients_recommended() -> Result<()> {
    let app = TestApp::new()?;
    let mut alice = app.signed_up("alice", "pw1").await?;
    let mut bob = app.signed_up("bob", "pw2").await?;

    let res = alice
        .post(
            "/api/share",
            json!({"user": "bob", "book": {"title": "Dune", "author": "Herbert"}}),
        )
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["message"], "succesfully shared book");

    let res = bob
        .post("/api/collection/instance", json!({"collection": "recommended"}))
        .await?;
    assert_eq!(
        titles(&res.body),
        vec![("Dune".to_string(), "Herbert".to_string())]
    );

    let res = bob
        .post("/api/collection/instance", json!({"collection": "bestsellers"}))
        .await?;
    assert_eq!(res.body, json!([]));

    for name in ["recommended", "bestsellers"] {
        let res = alice
            .post("/api/collection/instance", json!({"collection": name}))
            .await?;
        assert_eq!(res.body, json!([]));
    }
    Ok(())
}

#[tokio::test]
async fn sharing_with_unknown_user_is_not_found() -> Result<()> {
    let app = TestApp::new()?;
    let mut alice = app.signed_up("alice", "pw1").await?;

    let res = alice
        .post(
            "/api/share",
            json!({"user": "ghost", "book": {"title": "Dune", "author": "Herbert"}}),
        )
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "User with username: ghost does not exist");
    Ok(())
}

#[tokio::test]
async fn sharing_requires_a_session() -> Result<()> {
    let app = TestApp::new()?;
    app.signed_up("bob", "pw2").await?;

    let res = app
        .client()
        .post(
            "/api/share",
            json!({"user": "bob", "book": {"title": "Dune", "author": "Herbert"}}),
        )
        .await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn friends_lists_at_most_five_users() -> Result<()> {
    let app = TestApp::new()?;
    let names = ["ann", "ben", "cat", "dan", "eve", "fay", "gus"];
    for name in names {
        app.signed_up(name, "pw").await?;
    }
    let mut ann = app.client();
    ann.post("/api/signin", json!({"username": "ann", "password": "pw"}))
        .await?;

    let res = ann.get("/api/friends").await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!(["ann", "ben", "cat", "dan", "eve"]));
    Ok(())
}
