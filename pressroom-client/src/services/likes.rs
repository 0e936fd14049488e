use reqwest::Method;

use crate::error::ClientResult;
use crate::http_client::HttpClient;

#[derive(Debug, Clone, Copy)]
/// Лайки постов.
pub struct LikeService<'a> {
    http: &'a HttpClient,
}

impl<'a> LikeService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Ставит лайк. Требует сессию.
    pub async fn like(&self, post_id: i64) -> ClientResult<()> {
        self.http
            .send_empty(Method::POST, &format!("/likes/post/{post_id}"))
            .await
    }

    /// Снимает лайк. Требует сессию.
    pub async fn unlike(&self, post_id: i64) -> ClientResult<()> {
        self.http
            .send_empty(Method::DELETE, &format!("/likes/post/{post_id}"))
            .await
    }

    /// Количество лайков.
    pub async fn count(&self, post_id: i64) -> ClientResult<u64> {
        self.http
            .get_json(&format!("/likes/post/{post_id}/count"))
            .await
    }

    /// Лайкнул ли пост текущий пользователь. Без сессии сервер отвечает `false`.
    pub async fn status(&self, post_id: i64) -> ClientResult<bool> {
        self.http
            .get_json(&format!("/likes/post/{post_id}/status"))
            .await
    }
}
