use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use pressroom_client::{
    AutoSave, BlogClient, ClientConfig, ClientError, DraftForm, LoginRequest, MemoryStore,
    Direction, PageRequest, PostDraftSaver, PostInput, Reaction, ReactionToggle, Refresh, Route,
    SaveOutcome, SortBy,
};

const GOOD_TOKEN: &str = "good-token";

#[derive(Default)]
struct Recorded {
    authorization: Vec<Option<String>>,
    created: Vec<Value>,
    updated: Vec<(i64, Value)>,
    uploads: Vec<(String, Option<String>, usize)>,
}

type Shared = Arc<Mutex<Recorded>>;

fn post_json(id: i64, title: &str, content: &str, published: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": content,
        "summary": null,
        "coverImage": null,
        "categoryId": null,
        "categoryName": null,
        "authorId": 1,
        "authorName": "max",
        "published": published,
        "views": 0,
        "createdAt": "2025-11-17T10:30:00",
        "updatedAt": "2025-11-17T10:30:00",
        "tags": "",
        "commentCount": 0,
        "likeCount": 0
    })
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn require_token(headers: &HeaderMap) -> Result<(), Response> {
    if bearer(headers).as_deref() == Some(&format!("Bearer {GOOD_TOKEN}")) {
        return Ok(());
    }
    Err((
        StatusCode::UNAUTHORIZED,
        Json(json!({"status": 401, "message": "token expired"})),
    )
        .into_response())
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn login(Json(body): Json<LoginBody>) -> Response {
    if body.password == "wrong-password" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"status": 401, "message": "bad username or password"})),
        )
            .into_response();
    }
    let token = if body.username == "stale" {
        "stale-token"
    } else {
        GOOD_TOKEN
    };
    Json(json!({
        "token": token,
        "id": 1,
        "username": body.username,
        "email": "max@example.com",
        "role": "USER"
    }))
    .into_response()
}

async fn profile(State(shared): State<Shared>, headers: HeaderMap) -> Response {
    shared
        .lock()
        .expect("lock")
        .authorization
        .push(bearer(&headers));
    if let Err(response) = require_token(&headers) {
        return response;
    }
    Json(json!({
        "id": 1,
        "username": "max",
        "createdAt": "2025-01-01T00:00:00",
        "postCount": 3
    }))
    .into_response()
}

#[derive(Deserialize)]
struct PageQuery {
    page: u32,
    size: u32,
}

async fn list_posts(Query(query): Query<PageQuery>) -> Response {
    Json(json!({
        "content": [post_json(1, "first", "body", true), post_json(2, "second", "body", true)],
        "totalElements": 12,
        "totalPages": 6,
        "number": query.page,
        "size": query.size
    }))
    .into_response()
}

async fn get_post(Path(id): Path<i64>) -> Response {
    match id {
        1 => Json(post_json(1, "first", "body", true)).into_response(),
        403 => (
            StatusCode::FORBIDDEN,
            Json(json!({"message": "not your post"})),
        )
            .into_response(),
        500 => (StatusCode::INTERNAL_SERVER_ERROR, "oops").into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"status": 404, "error": "Not Found", "message": format!("post {id} does not exist")})),
        )
            .into_response(),
    }
}

async fn create_post(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = require_token(&headers) {
        return response;
    }
    if body["title"] == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Validation failed", "errors": {"title": "title is taken"}})),
        )
            .into_response();
    }
    shared.lock().expect("lock").created.push(body.clone());
    let title = body["title"].as_str().unwrap_or_default();
    let content = body["content"].as_str().unwrap_or_default();
    let published = body["published"].as_bool().unwrap_or_default();
    Json(post_json(42, title, content, published)).into_response()
}

async fn update_post(
    State(shared): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = require_token(&headers) {
        return response;
    }
    shared.lock().expect("lock").updated.push((id, body.clone()));
    let title = body["title"].as_str().unwrap_or_default();
    let content = body["content"].as_str().unwrap_or_default();
    Json(post_json(id, title, content, false)).into_response()
}

async fn upload(
    State(shared): State<Shared>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Err(response) = require_token(&headers) {
        return response;
    }
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let mime = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.len()).unwrap_or_default();
        shared
            .lock()
            .expect("lock")
            .uploads
            .push((filename.clone(), mime, bytes));
        return Json(json!({"url": format!("/uploads/{filename}"), "filename": filename}))
            .into_response();
    }
    (StatusCode::BAD_REQUEST, Json(json!({"message": "file is required"}))).into_response()
}

async fn like(headers: HeaderMap) -> Response {
    if let Err(response) = require_token(&headers) {
        return response;
    }
    StatusCode::OK.into_response()
}

async fn like_count() -> Json<u64> {
    Json(5)
}

async fn like_status() -> Json<bool> {
    Json(false)
}

async fn spawn_backend() -> (String, Shared) {
    let shared = Shared::default();
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/users/profile", get(profile))
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post).put(update_post))
        .route("/files/upload", post(upload))
        .route("/likes/post/{id}", post(like).delete(like))
        .route("/likes/post/{id}/count", get(like_count))
        .route("/likes/post/{id}/status", get(like_status))
        .with_state(Arc::clone(&shared));
    let app = Router::new().nest("/api", api);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve fake backend");
    });

    (format!("http://{addr}/api"), shared)
}

fn new_client(base_url: &str) -> BlogClient {
    BlogClient::with_store(ClientConfig::new(base_url), Arc::new(MemoryStore::new()))
        .expect("client must build")
}

async fn logged_in(base_url: &str, username: &str) -> BlogClient {
    let client = new_client(base_url);
    client
        .auth()
        .login(&LoginRequest {
            username: username.to_string(),
            password: "password123".to_string(),
        })
        .await
        .expect("login must succeed");
    client
}

#[tokio::test]
async fn login_attaches_bearer_token() {
    let (base_url, shared) = spawn_backend().await;

    let anonymous = new_client(&base_url);
    assert!(matches!(
        anonymous.users().profile().await,
        Err(ClientError::Unauthorized(_))
    ));

    let client = new_client(&base_url);
    let mut refresh = client.session().refresh_events();
    client
        .auth()
        .login(&LoginRequest {
            username: "max".to_string(),
            password: "password123".to_string(),
        })
        .await
        .expect("login must succeed");
    assert_eq!(refresh.try_recv().expect("login signal"), Refresh::LoggedIn);

    let profile = client.users().profile().await.expect("profile");
    assert_eq!(profile.username, "max");
    assert_eq!(profile.post_count, 3);

    let recorded = shared.lock().expect("lock");
    assert_eq!(recorded.authorization[0], None);
    assert_eq!(
        recorded.authorization[1].as_deref(),
        Some("Bearer good-token")
    );
}

#[tokio::test]
async fn unauthorized_purges_session_and_redirects_to_login() {
    let (base_url, _) = spawn_backend().await;
    let client = logged_in(&base_url, "stale").await;
    assert!(client.session().is_authenticated());
    client.navigator().navigate(Route::Drafts);

    let err = client.users().profile().await.expect_err("must be 401");
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert!(!client.session().is_authenticated());
    assert!(client.session().user().is_none());
    assert_eq!(client.navigator().current(), Route::Login);
}

#[tokio::test]
async fn wrong_password_on_login_screen_keeps_route_and_message() {
    let (base_url, _) = spawn_backend().await;
    let client = new_client(&base_url);
    client.navigator().navigate(Route::Login);

    let err = client
        .auth()
        .login(&LoginRequest {
            username: "max".to_string(),
            password: "wrong-password".to_string(),
        })
        .await
        .expect_err("must be 401");

    match err {
        ClientError::Unauthorized(message) => assert_eq!(message, "bad username or password"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(client.navigator().current(), Route::Login);
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn unauthorized_on_login_screen_does_not_navigate() {
    let (base_url, _) = spawn_backend().await;
    let client = new_client(&base_url);
    client.navigator().navigate(Route::Register);

    let _ = client.users().profile().await;
    assert_eq!(client.navigator().current(), Route::Register);
}

#[tokio::test]
async fn http_errors_are_classified() {
    let (base_url, _) = spawn_backend().await;
    let client = logged_in(&base_url, "max").await;

    match client.posts().get(404).await {
        Err(ClientError::NotFound(message)) => assert_eq!(message, "post 404 does not exist"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    match client.posts().get(403).await {
        Err(ClientError::Forbidden(message)) => assert_eq!(message, "not your post"),
        other => panic!("expected Forbidden, got {other:?}"),
    }
    assert!(matches!(
        client.posts().get(500).await,
        Err(ClientError::Server { status: 500, .. })
    ));

    let taken = PostInput {
        title: "taken".to_string(),
        content: "body".to_string(),
        ..Default::default()
    };
    let err = client.posts().create(&taken).await.expect_err("must fail");
    assert_eq!(err.field_message("title"), Some("title is taken"));
}

#[tokio::test]
async fn client_side_validation_skips_the_request() {
    let (base_url, shared) = spawn_backend().await;
    let client = logged_in(&base_url, "max").await;

    let err = client
        .posts()
        .create(&PostInput::default())
        .await
        .expect_err("empty title must fail");
    assert!(err.field_message("title").is_some());
    assert!(shared.lock().expect("lock").created.is_empty());
}

#[tokio::test]
async fn pages_are_mapped_from_spring_layout() {
    let (base_url, _) = spawn_backend().await;
    let client = new_client(&base_url);

    let page = client
        .posts()
        .list(PageRequest::new(1, 2), SortBy::CreatedAt, Direction::Desc)
        .await
        .expect("list");

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].title, "first");
    assert_eq!(page.page, 1);
    assert_eq!(page.size, 2);
    assert_eq!(page.total_elements, 12);
    assert!(page.has_next());
}

#[tokio::test]
async fn autosave_creates_draft_once_then_updates_it() {
    let (base_url, shared) = spawn_backend().await;
    let client = logged_in(&base_url, "max").await;

    let autosave = AutoSave::new(
        PostDraftSaver::new(client.clone()),
        DraftForm::default(),
        Duration::from_secs(30),
    );

    autosave.observe(DraftForm {
        title: "Draft".to_string(),
        content: "first".to_string(),
        published: true,
        ..DraftForm::default()
    });
    assert_eq!(autosave.flush().await.expect("first save"), SaveOutcome::Saved);
    assert_eq!(autosave.saver().draft_id(), Some(42));

    autosave.observe(DraftForm {
        title: "Draft".to_string(),
        content: "second".to_string(),
        published: true,
        ..DraftForm::default()
    });
    assert_eq!(autosave.flush().await.expect("second save"), SaveOutcome::Saved);

    let recorded = shared.lock().expect("lock");
    assert_eq!(recorded.created.len(), 1);
    assert_eq!(recorded.created[0]["published"], false);
    assert_eq!(recorded.updated.len(), 1);
    assert_eq!(recorded.updated[0].0, 42);
    assert_eq!(recorded.updated[0].1["content"], "second");
    assert_eq!(recorded.updated[0].1["published"], false);
    drop(recorded);
    assert!(autosave.last_saved_at().is_some());
}

#[tokio::test]
async fn upload_sends_multipart_file_field() {
    let (base_url, shared) = spawn_backend().await;
    let client = logged_in(&base_url, "max").await;

    let uploaded = client
        .files()
        .upload_image("cover.png", vec![0x89, b'P', b'N', b'G'])
        .await
        .expect("upload");
    assert_eq!(uploaded.url, "/uploads/cover.png");

    let recorded = shared.lock().expect("lock");
    assert_eq!(
        recorded.uploads,
        vec![("cover.png".to_string(), Some("image/png".to_string()), 4)]
    );
    drop(recorded);

    let err = client
        .files()
        .upload_image("notes.txt", b"text".to_vec())
        .await
        .expect_err("must reject");
    assert!(err.field_message("file").is_some());
}

#[tokio::test]
async fn like_toggle_updates_local_state() {
    let (base_url, _) = spawn_backend().await;
    let client = logged_in(&base_url, "max").await;

    let toggle = ReactionToggle::load(client, Reaction::Like, 1)
        .await
        .expect("load");
    assert_eq!(toggle.snapshot().count, 5);
    assert!(!toggle.snapshot().active);

    let after = toggle.toggle().await.expect("like");
    assert!(after.active);
    assert_eq!(after.count, 6);

    let after = toggle.toggle().await.expect("unlike");
    assert!(!after.active);
    assert_eq!(after.count, 5);
}
