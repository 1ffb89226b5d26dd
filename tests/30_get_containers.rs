mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn list_on_empty_store() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/orchestrator/containers")).send().await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({"error": "containers are empty"}));
    Ok(())
}

#[tokio::test]
async fn list_returns_every_container() -> Result<()> {
    let server = common::spawn_server().await?;
    let first = server
        .create_container(&json!({"Hostname": "a", "Image": "alpine"}))
        .await?;
    let second = server
        .create_container(&json!({"Hostname": "b", "Entrypoint": "/bin/sh"}))
        .await?;

    let res = server.client.get(server.url("/orchestrator/containers")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let containers = res.json::<Vec<Value>>().await?;
    assert_eq!(containers.len(), 2);
    assert!(containers.contains(&first));
    assert!(containers.contains(&second));
    for container in &containers {
        for key in ["id", "Hostname", "Entrypoint", "Image"] {
            assert!(container.get(key).is_some(), "missing {key} in {container}");
        }
    }
    Ok(())
}

#[tokio::test]
async fn get_by_id() -> Result<()> {
    let server = common::spawn_server().await?;
    let created = server.create_container(&common::sample_data()).await?;

    let res = server
        .client
        .get(server.url(&format!("/orchestrator/containers/{}", created["id"])))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);
    Ok(())
}

#[tokio::test]
async fn get_unknown_ids() -> Result<()> {
    let server = common::spawn_server().await?;
    server.create_container(&common::sample_data()).await?;

    for id in ["1010", "0", "-1", "invalid_id", "1.5", "99999999999999999999999"] {
        let res = server
            .client
            .get(server.url(&format!("/orchestrator/containers/{id}")))
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::NOT_FOUND, "id {id}");
        assert_eq!(res.json::<Value>().await?, json!({"error": "container not found"}));
    }
    Ok(())
}

#[tokio::test]
async fn unknown_path_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/orchestrator/unknown")).send().await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Not Found"}));
    Ok(())
}
