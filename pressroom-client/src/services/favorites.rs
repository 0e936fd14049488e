use reqwest::Method;

use crate::error::ClientResult;
use crate::http_client::HttpClient;
use crate::models::{Page, PageRequest, Post};
use crate::wire::{PageDto, PostDto};

#[derive(Debug, Clone, Copy)]
/// Избранные посты.
pub struct FavoriteService<'a> {
    http: &'a HttpClient,
}

impl<'a> FavoriteService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Добавляет пост в избранное. Требует сессию.
    pub async fn favorite(&self, post_id: i64) -> ClientResult<()> {
        self.http
            .send_empty(Method::POST, &format!("/favorites/post/{post_id}"))
            .await
    }

    /// Убирает пост из избранного. Требует сессию.
    pub async fn unfavorite(&self, post_id: i64) -> ClientResult<()> {
        self.http
            .send_empty(Method::DELETE, &format!("/favorites/post/{post_id}"))
            .await
    }

    /// Избранное текущего пользователя.
    pub async fn mine(&self, page: PageRequest) -> ClientResult<Page<Post>> {
        let dto: PageDto<PostDto> = self.http.get_json_query("/favorites", &page).await?;
        Ok(dto.map(Post::from))
    }

    /// В избранном ли пост.
    pub async fn status(&self, post_id: i64) -> ClientResult<bool> {
        self.http
            .get_json(&format!("/favorites/post/{post_id}/status"))
            .await
    }

    /// Сколько пользователей добавили пост в избранное.
    pub async fn count(&self, post_id: i64) -> ClientResult<u64> {
        self.http
            .get_json(&format!("/favorites/post/{post_id}/count"))
            .await
    }
}
