//! Typed client flows.

#![allow(clippy::unwrap_used)]

use postboard_api::{ApiClient, MockApi, StatusCode};
use postboard_core::{NewComment, NewPost, PostId, PostPatch};

#[tokio::test]
async fn test_full_session() {
    let mut client = ApiClient::new(MockApi::in_memory());
    let user = client
        .login("professor@exemplo.com", "demo123")
        .await
        .unwrap()
        .user;

    let post = client
        .create_post(
            &NewPost::new("Ownership em Rust", "Cada valor tem um dono.")
                .with_author(user.name.clone())
                .with_description("Resumo"),
        )
        .await
        .unwrap();
    assert_eq!(post.author, "Prof. João Silva");
    assert_eq!(post.description.as_deref(), Some("Resumo"));

    let updated = client
        .update_post(&post.id, &PostPatch::title("Borrowing em Rust"))
        .await
        .unwrap();
    assert_eq!(updated.id, post.id);
    assert_eq!(updated.created_at, post.created_at);
    assert_eq!(updated.content, post.content);
    assert!(updated.updated_at >= post.updated_at);

    let found = client.list_posts(Some("borrowing")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, post.id);

    client
        .create_comment(&post.id, &NewComment::new("Aluno", "Claro!"))
        .await
        .unwrap();
    assert_eq!(client.get_post(&post.id).await.unwrap().comments.len(), 1);

    client.logout();
    let err = client.delete_post(&post.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn test_comment_on_missing_post_is_allowed() {
    let mut client = ApiClient::new(MockApi::in_memory());
    client.login("admin@exemplo.com", "admin123").await.unwrap();
    let ghost = PostId::new("nao-existe");

    let comment = client
        .create_comment(&ghost, &NewComment::new("Admin", "Olá?"))
        .await
        .unwrap();
    assert_eq!(comment.post_id, ghost);
    assert_eq!(client.list_comments(&ghost).await.unwrap(), vec![comment]);
}

#[tokio::test]
async fn test_comment_ids_are_unique_and_ordered() {
    let mut client = ApiClient::new(MockApi::in_memory());
    client.login("admin@exemplo.com", "admin123").await.unwrap();
    let id = PostId::new("5");

    let mut ids = Vec::new();
    for i in 0..5 {
        let comment = client
            .create_comment(&id, &NewComment::new("Admin", format!("#{i}")))
            .await
            .unwrap();
        ids.push(comment.id);
    }

    let listed: Vec<_> = client
        .list_comments(&id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(listed, ids);

    let mut sorted = ids.clone();
    sorted.dedup();
    assert_eq!(sorted.len(), ids.len());
}
