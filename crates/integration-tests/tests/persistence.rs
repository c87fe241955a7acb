//! File-backed storage across router instances.

#![allow(clippy::unwrap_used)]

use postboard_api::{ApiRequest, StatusCode};
use postboard_core::{Comment, Post, PostWithComments};
use postboard_integration_tests::{ScratchFile, file_api, login};
use serde_json::json;

#[tokio::test]
async fn test_writes_survive_reopen() {
    let scratch = ScratchFile::new().unwrap();
    let path = scratch.path();

    let created = {
        let api = file_api(path).unwrap();
        let token = login(&api, "maria@exemplo.com", "123456").await.unwrap();

        let created: Post = api
            .fetch(
                ApiRequest::post("/api/posts")
                    .bearer(token.as_str())
                    .json(&json!({"title": "Persistido", "content": "C"})),
            )
            .await
            .json()
            .unwrap();

        let _: Comment = api
            .fetch(
                ApiRequest::post(format!("/api/posts/{}/comments", created.id))
                    .bearer(token.as_str())
                    .json(&json!({"author": "Aluno", "content": "Salvo"})),
            )
            .await
            .json()
            .unwrap();

        api.fetch(ApiRequest::delete("/api/posts/2").bearer(token.as_str()))
            .await;
        created
    };

    let api = file_api(path).unwrap();

    let detail: PostWithComments = api
        .fetch(ApiRequest::get(format!("/api/posts/{}", created.id)))
        .await
        .json()
        .unwrap();
    assert_eq!(detail.post, created);
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].content, "Salvo");

    let response = api.fetch(ApiRequest::get("/api/posts/2")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reads_alone_do_not_create_file() {
    let scratch = ScratchFile::new().unwrap();
    let path = scratch.path();
    let api = file_api(path).unwrap();

    let posts: Vec<Post> = api.fetch(ApiRequest::get("/api/posts")).await.json().unwrap();
    assert_eq!(posts.len(), 5);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_corrupt_file_falls_back_to_seed() {
    let scratch = ScratchFile::new().unwrap();
    let path = scratch.path();
    std::fs::write(path, "definitely not json").unwrap();

    let api = file_api(path).unwrap();
    let posts: Vec<Post> = api.fetch(ApiRequest::get("/api/posts")).await.json().unwrap();
    assert_eq!(posts.len(), 5);
}

#[tokio::test]
async fn test_corrupt_values_fall_back_per_key() {
    let scratch = ScratchFile::new().unwrap();
    let path = scratch.path();
    let contents = json!({
        "posts": "[{\"id\": broken",
        "comments/1": "also broken",
    });
    std::fs::write(path, contents.to_string()).unwrap();

    let api = file_api(path).unwrap();

    let posts: Vec<Post> = api.fetch(ApiRequest::get("/api/posts")).await.json().unwrap();
    assert_eq!(posts.len(), 5);

    let detail: PostWithComments = api
        .fetch(ApiRequest::get("/api/posts/1"))
        .await
        .json()
        .unwrap();
    assert!(detail.comments.is_empty());
}
