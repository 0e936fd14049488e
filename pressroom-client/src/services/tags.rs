use serde::Serialize;

use crate::error::ClientResult;
use crate::http_client::HttpClient;
use crate::models::{Page, PageRequest, Post, Tag};
use crate::wire::{PageDto, PostDto};

#[derive(Serialize)]
struct KeywordQuery<'a> {
    keyword: &'a str,
}

#[derive(Debug, Clone, Copy)]
/// Теги.
pub struct TagService<'a> {
    http: &'a HttpClient,
}

impl<'a> TagService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Все теги.
    pub async fn all(&self) -> ClientResult<Vec<Tag>> {
        self.http.get_json("/tags").await
    }

    /// Популярные теги для облака тегов.
    pub async fn popular(&self) -> ClientResult<Vec<Tag>> {
        self.http.get_json("/tags/popular").await
    }

    /// Поиск тегов для автодополнения.
    pub async fn search(&self, keyword: &str) -> ClientResult<Vec<Tag>> {
        self.http
            .get_json_query("/tags/search", &KeywordQuery { keyword })
            .await
    }

    /// Посты с тегом.
    pub async fn posts(&self, tag_id: i64, page: PageRequest) -> ClientResult<Page<Post>> {
        let dto: PageDto<PostDto> = self
            .http
            .get_json_query(&format!("/tags/{tag_id}/posts"), &page)
            .await?;
        Ok(dto.map(Post::from))
    }
}
