use reqwest::Method;

use crate::error::ClientResult;
use crate::http_client::HttpClient;
use crate::models::{Comment, CreateCommentRequest, Page, PageRequest};
use crate::services::validate;
use crate::wire::PageDto;

#[derive(Debug, Clone, Copy)]
/// Комментарии к постам.
pub struct CommentService<'a> {
    http: &'a HttpClient,
}

impl<'a> CommentService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Комментарии верхнего уровня с вложенными ответами.
    pub async fn for_post(&self, post_id: i64, page: PageRequest) -> ClientResult<Page<Comment>> {
        let dto: PageDto<Comment> = self
            .http
            .get_json_query(&format!("/comments/post/{post_id}"), &page)
            .await?;
        Ok(dto.into())
    }

    /// Оставляет комментарий или ответ (`parent_id`).
    ///
    /// Требует сессию.
    pub async fn create(&self, request: &CreateCommentRequest) -> ClientResult<Comment> {
        validate(request)?;
        self.http
            .send_json(Method::POST, "/comments", request)
            .await
    }

    /// Удаляет комментарий.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http
            .send_empty(Method::DELETE, &format!("/comments/{id}"))
            .await
    }

    /// Количество комментариев к посту.
    pub async fn count(&self, post_id: i64) -> ClientResult<u64> {
        self.http
            .get_json(&format!("/comments/post/{post_id}/count"))
            .await
    }
}
