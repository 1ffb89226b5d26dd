mod common;

use anyhow::Result;
use orchestrator_api::auth::Role;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn login(server: &common::TestServer, payload: Value) -> Result<reqwest::Response> {
    Ok(server
        .client
        .post(server.url("/auth/login"))
        .json(&payload)
        .send()
        .await?)
}

#[tokio::test]
async fn login_issues_user_token() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = login(&server, json!({"username": "testuser", "password": "testpassword"})).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let token = body["token"].as_str().expect("token in response");
    let claims = server.tokens.verify(token)?;
    assert_eq!(claims.user_id, 1);
    assert_eq!(claims.username, "testuser");
    assert_eq!(claims.role, Role::User);
    Ok(())
}

#[tokio::test]
async fn login_token_opens_protected_endpoint() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = login(&server, json!({"username": "testuser", "password": "testpassword"})).await?;
    let token = res.json::<Value>().await?["token"]
        .as_str()
        .unwrap_or_default()
        .to_string();

    let res = server
        .client
        .get(server.url("/protected"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server
        .client
        .get(server.url("/admin/protected"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn admin_login_opens_admin_endpoint() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = login(&server, json!({"username": "admin", "password": "adminpassword"})).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let token = res.json::<Value>().await?["token"]
        .as_str()
        .unwrap_or_default()
        .to_string();

    let res = server
        .client
        .get(server.url("/admin/protected"))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn login_rejects_bad_credentials() -> Result<()> {
    let server = common::spawn_server().await?;

    for payload in [
        json!({"username": "testuser", "password": "wrong"}),
        json!({"username": "nobody", "password": "testpassword"}),
        json!({"username": "testuser"}),
        json!({}),
    ] {
        let res = login(&server, payload).await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.json::<Value>().await?, json!({"error": "Invalid credentials"}));
    }
    Ok(())
}

#[tokio::test]
async fn login_requires_json_body() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/auth/login"))
        .body("username=testuser")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    Ok(())
}

#[tokio::test]
async fn login_only_accepts_post() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/auth/login")).send().await?;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"error": "Method GET not allowed on /auth/login"})
    );
    Ok(())
}
