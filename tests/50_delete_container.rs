mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn scenario_create_delete_get() -> Result<()> {
    let server = common::spawn_server().await?;

    let first = server.create_container(&json!({"Hostname": "h"})).await?;
    assert_eq!(first, json!({"id": 1, "Hostname": "h", "Entrypoint": "", "Image": "ubuntu"}));
    let second = server.create_container(&json!({"Hostname": "h"})).await?;
    assert_eq!(second["id"], 2);

    let res = server
        .client
        .delete(server.url("/orchestrator/containers/1"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"message": "container 1 deleted"}));

    let res = server
        .client
        .get(server.url("/orchestrator/containers/1"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"error": "container not found"}));
    Ok(())
}

#[tokio::test]
async fn delete_twice() -> Result<()> {
    let server = common::spawn_server().await?;
    let created = server.create_container(&common::sample_data()).await?;
    let url = server.url(&format!("/orchestrator/containers/{}", created["id"]));

    let res = server.client.delete(&url).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.client.delete(&url).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"error": "container not found"}));
    Ok(())
}

#[tokio::test]
async fn delete_unknown_ids() -> Result<()> {
    let server = common::spawn_server().await?;

    for id in ["9999", "invalid_id", "-1"] {
        let res = server
            .client
            .delete(server.url(&format!("/orchestrator/containers/{id}")))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "id {id}");
        assert_eq!(res.json::<Value>().await?, json!({"error": "container not found"}));
    }
    Ok(())
}

#[tokio::test]
async fn deleting_everything_empties_the_list() -> Result<()> {
    let server = common::spawn_server().await?;
    for _ in 0..3 {
        server.create_container(&common::sample_data()).await?;
    }

    let containers = server
        .client
        .get(server.url("/orchestrator/containers"))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(containers.len(), 3);

    for container in &containers {
        let res = server
            .client
            .delete(server.url(&format!("/orchestrator/containers/{}", container["id"])))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.json::<Value>().await?,
            json!({"message": format!("container {} deleted", container["id"])})
        );
    }

    let res = server.client.get(server.url("/orchestrator/containers")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({"error": "containers are empty"}));
    Ok(())
}

#[tokio::test]
async fn deleted_top_id_is_reused() -> Result<()> {
    let server = common::spawn_server().await?;
    server.create_container(&common::sample_data()).await?;
    server.create_container(&common::sample_data()).await?;

    server
        .client
        .delete(server.url("/orchestrator/containers/2"))
        .send()
        .await?;

    let created = server.create_container(&common::sample_data()).await?;
    assert_eq!(created["id"], 2);
    Ok(())
}
