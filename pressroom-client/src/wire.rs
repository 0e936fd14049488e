use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{AuthResponse, AuthUser, Page, Post, PostInput};

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponseDto {
    pub(crate) message: Option<String>,
    pub(crate) error: Option<String>,
    #[serde(default)]
    pub(crate) errors: BTreeMap<String, String>,
}

impl ErrorResponseDto {
    pub(crate) fn into_parts(self) -> (Option<String>, BTreeMap<String, String>) {
        (self.message.or(self.error), self.errors)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponseDto {
    token: String,
    id: i64,
    username: String,
    email: String,
    #[serde(default = "default_role")]
    role: String,
}

fn default_role() -> String {
    "USER".to_string()
}

impl From<AuthResponseDto> for AuthResponse {
    fn from(value: AuthResponseDto) -> Self {
        Self {
            token: value.token,
            user: AuthUser {
                id: value.id,
                username: value.username,
                email: value.email,
                role: value.role,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    id: i64,
    title: String,
    content: String,
    summary: Option<String>,
    cover_image: Option<String>,
    category_id: Option<i64>,
    category_name: Option<String>,
    author_id: i64,
    author_name: Option<String>,
    #[serde(default)]
    published: Option<bool>,
    #[serde(default)]
    views: Option<i64>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    #[serde(default)]
    tags: Option<String>,
    #[serde(default)]
    comment_count: Option<i64>,
    #[serde(default)]
    like_count: Option<i64>,
}

fn non_negative(value: Option<i64>) -> u64 {
    value.unwrap_or(0).max(0) as u64
}

impl From<PostDto> for Post {
    fn from(value: PostDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
            summary: value.summary,
            cover_image: value.cover_image,
            category_id: value.category_id,
            category_name: value.category_name,
            author_id: value.author_id,
            author_name: value.author_name,
            published: value.published.unwrap_or(false),
            views: non_negative(value.views),
            tags: split_tags(value.tags.as_deref().unwrap_or_default()),
            comment_count: non_negative(value.comment_count),
            like_count: non_negative(value.like_count),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

pub(crate) fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn join_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostPayloadDto<'a> {
    title: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cover_image: Option<&'a str>,
    category_id: Option<i64>,
    published: bool,
    tags: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    change_note: Option<&'a str>,
}

impl<'a> From<&'a PostInput> for PostPayloadDto<'a> {
    fn from(value: &'a PostInput) -> Self {
        Self {
            title: &value.title,
            content: &value.content,
            summary: value.summary.as_deref().filter(|s| !s.is_empty()),
            cover_image: value.cover_image.as_deref().filter(|s| !s.is_empty()),
            category_id: value.category_id,
            published: value.published,
            tags: join_tags(&value.tags),
            change_note: value.change_note.as_deref().filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageDto<T> {
    #[serde(default = "Vec::new")]
    content: Vec<T>,
    #[serde(default)]
    total_elements: i64,
    #[serde(default)]
    total_pages: i64,
    #[serde(default)]
    number: u32,
    #[serde(default)]
    size: u32,
}

impl<T> PageDto<T> {
    pub(crate) fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.content.into_iter().map(f).collect(),
            page: self.number,
            size: self.size,
            total_elements: self.total_elements.max(0) as u64,
            total_pages: self.total_pages.clamp(0, i64::from(u32::MAX)) as u32,
        }
    }
}

impl<T> From<PageDto<T>> for Page<T> {
    fn from(value: PageDto<T>) -> Self {
        value.map(|item| item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_dto_splits_tags_and_clamps_counters() {
        let raw = r#"{
            "id": 7,
            "title": "t",
            "content": "c",
            "summary": null,
            "coverImage": null,
            "categoryId": 3,
            "categoryName": "rust",
            "authorId": 2,
            "authorName": "max",
            "published": true,
            "views": -4,
            "createdAt": "2025-11-17T10:30:00",
            "updatedAt": "2025-11-17T10:31:00.123",
            "tags": "rust, async,,  blog ",
            "commentCount": 5,
            "likeCount": null
        }"#;

        let post = Post::from(serde_json::from_str::<PostDto>(raw).expect("must parse"));
        assert_eq!(post.tags, vec!["rust", "async", "blog"]);
        assert_eq!(post.views, 0);
        assert_eq!(post.comment_count, 5);
        assert_eq!(post.like_count, 0);
        assert!(!post.is_draft());
    }

    #[test]
    fn post_payload_joins_tags_and_drops_empty_optionals() {
        let input = PostInput {
            title: "t".to_string(),
            content: "c".to_string(),
            summary: Some(String::new()),
            tags: vec!["rust".to_string(), " ".to_string(), "web".to_string()],
            ..PostInput::default()
        };

        let json = serde_json::to_value(PostPayloadDto::from(&input)).expect("must serialize");
        assert_eq!(json["tags"], "rust,web");
        assert_eq!(json["published"], false);
        assert!(json.get("summary").is_none());
        assert!(json["categoryId"].is_null());
    }

    #[test]
    fn page_dto_clamps_negative_total() {
        let dto = PageDto::<i64> {
            content: vec![1, 2],
            total_elements: -7,
            total_pages: 3,
            number: 1,
            size: 2,
        };

        let page = dto.map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.page, 1);
        assert!(page.has_next());
    }

    #[test]
    fn auth_response_is_flat_on_the_wire() {
        let raw = r#"{"token":"jwt","id":1,"username":"u","email":"u@example.com","role":"ADMIN"}"#;
        let auth = AuthResponse::from(serde_json::from_str::<AuthResponseDto>(raw).expect("parse"));
        assert_eq!(auth.token, "jwt");
        assert_eq!(auth.user.username, "u");
        assert_eq!(auth.user.role, "ADMIN");
    }

    #[test]
    fn error_body_prefers_message_over_error() {
        let raw = r#"{"status":404,"error":"Not Found","message":"post 1 does not exist"}"#;
        let (message, fields) = serde_json::from_str::<ErrorResponseDto>(raw)
            .expect("parse")
            .into_parts();
        assert_eq!(message.as_deref(), Some("post 1 does not exist"));
        assert!(fields.is_empty());
    }
}
