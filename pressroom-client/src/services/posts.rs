use reqwest::Method;
use serde::Serialize;

use crate::error::ClientResult;
use crate::http_client::HttpClient;
use crate::models::{Direction, Page, PageRequest, Post, PostInput, SortBy};
use crate::services::validate;
use crate::wire::{PageDto, PostDto, PostPayloadDto};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListPostsQuery {
    page: u32,
    size: u32,
    sort_by: SortBy,
    direction: Direction,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    keyword: &'a str,
    page: u32,
    size: u32,
}

#[derive(Debug, Clone, Copy)]
/// Посты и черновики.
pub struct PostService<'a> {
    http: &'a HttpClient,
}

impl<'a> PostService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Лента опубликованных постов.
    pub async fn list(
        &self,
        page: PageRequest,
        sort_by: SortBy,
        direction: Direction,
    ) -> ClientResult<Page<Post>> {
        let query = ListPostsQuery {
            page: page.page,
            size: page.size,
            sort_by,
            direction,
        };
        let dto: PageDto<PostDto> = self.http.get_json_query("/posts", &query).await?;
        Ok(dto.map(Post::from))
    }

    /// Пост по идентификатору.
    pub async fn get(&self, id: i64) -> ClientResult<Post> {
        let dto: PostDto = self.http.get_json(&format!("/posts/{id}")).await?;
        Ok(dto.into())
    }

    /// Создаёт пост; с `published == false` это черновик.
    ///
    /// Требует сессию.
    pub async fn create(&self, input: &PostInput) -> ClientResult<Post> {
        validate(input)?;
        let dto: PostDto = self
            .http
            .send_json(Method::POST, "/posts", &PostPayloadDto::from(input))
            .await?;
        Ok(dto.into())
    }

    /// Обновляет пост; сервер при этом пишет новую версию в историю.
    ///
    /// Требует сессию.
    pub async fn update(&self, id: i64, input: &PostInput) -> ClientResult<Post> {
        validate(input)?;
        let dto: PostDto = self
            .http
            .send_json(
                Method::PUT,
                &format!("/posts/{id}"),
                &PostPayloadDto::from(input),
            )
            .await?;
        Ok(dto.into())
    }

    /// Удаляет пост или черновик.
    ///
    /// Требует сессию. Подтверждение у пользователя запрашивает вызывающий
    /// (см. [`crate::confirm_then`]).
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http
            .send_empty(Method::DELETE, &format!("/posts/{id}"))
            .await
    }

    /// Поиск по ключевому слову.
    pub async fn search(&self, keyword: &str, page: PageRequest) -> ClientResult<Page<Post>> {
        let query = SearchQuery {
            keyword,
            page: page.page,
            size: page.size,
        };
        let dto: PageDto<PostDto> = self.http.get_json_query("/posts/search", &query).await?;
        Ok(dto.map(Post::from))
    }

    /// Популярные посты.
    pub async fn popular(&self) -> ClientResult<Vec<Post>> {
        let dto: Vec<PostDto> = self.http.get_json("/posts/popular").await?;
        Ok(dto.into_iter().map(Post::from).collect())
    }

    /// Последние посты.
    pub async fn recent(&self) -> ClientResult<Vec<Post>> {
        let dto: Vec<PostDto> = self.http.get_json("/posts/recent").await?;
        Ok(dto.into_iter().map(Post::from).collect())
    }

    /// Черновики текущего пользователя, свежие первыми.
    pub async fn drafts(&self, page: PageRequest) -> ClientResult<Page<Post>> {
        let dto: PageDto<PostDto> = self.http.get_json_query("/posts/drafts", &page).await?;
        Ok(dto.map(Post::from))
    }

    /// Все посты текущего пользователя, включая черновики.
    pub async fn mine(&self, page: PageRequest) -> ClientResult<Page<Post>> {
        let dto: PageDto<PostDto> = self.http.get_json_query("/posts/my-posts", &page).await?;
        Ok(dto.map(Post::from))
    }
}
