use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use pressroom_client::{
    BlogClient, ClientConfig, ClientError, DEFAULT_API_URL, LoginRequest, MemoryStore,
    PageRequest, PostInput, RegisterRequest,
};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

#[tokio::test]
#[ignore = "requires running REST backend and database"]
async fn rest_smoke_flow() {
    let base_url =
        std::env::var("PRESSROOM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let client = BlogClient::with_store(ClientConfig::new(base_url), Arc::new(MemoryStore::new()))
        .expect("client must build");

    let suffix = unique_suffix();
    let username = format!("user_{}", &suffix[suffix.len() - 10..]);
    let email = format!("smoke_{suffix}@example.com");
    let password = "password123";

    let register = client
        .auth()
        .register(&RegisterRequest {
            username: username.clone(),
            email,
            password: password.to_string(),
            nickname: None,
        })
        .await
        .expect("register must succeed");
    assert!(!register.token.is_empty());
    assert_eq!(register.user.username, username);

    client.auth().logout();
    assert!(!client.auth().is_authenticated());

    let login = client
        .auth()
        .login(&LoginRequest {
            username: username.clone(),
            password: password.to_string(),
        })
        .await
        .expect("login must succeed");
    assert_eq!(login.user.username, username);
    assert!(client.auth().is_authenticated());

    let draft = client
        .posts()
        .create(&PostInput {
            title: "smoke draft".to_string(),
            content: "# Intro\nbody".to_string(),
            ..PostInput::default()
        })
        .await
        .expect("create must succeed");
    assert!(draft.is_draft());

    let drafts = client
        .posts()
        .drafts(PageRequest::first())
        .await
        .expect("drafts must succeed");
    assert!(drafts.items.iter().any(|post| post.id == draft.id));

    let published = client
        .posts()
        .update(
            draft.id,
            &PostInput {
                title: "smoke post".to_string(),
                content: "# Intro\nbody updated".to_string(),
                published: true,
                change_note: Some("publish".to_string()),
                ..PostInput::default()
            },
        )
        .await
        .expect("update must succeed");
    assert!(!published.is_draft());

    let history = client
        .versions()
        .history(draft.id)
        .await
        .expect("history must succeed");
    assert!(!history.is_empty());

    client
        .posts()
        .delete(draft.id)
        .await
        .expect("delete must succeed");

    let after_delete = client.posts().get(draft.id).await;
    assert!(matches!(after_delete, Err(ClientError::NotFound(_))));
}
