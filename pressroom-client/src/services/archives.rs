use crate::error::{ClientError, ClientResult};
use crate::http_client::HttpClient;
use crate::models::{Archive, Page, PageRequest, Post};
use crate::wire::{PageDto, PostDto};

#[derive(Debug, Clone, Copy)]
/// Архив постов по месяцам.
pub struct ArchiveService<'a> {
    http: &'a HttpClient,
}

impl<'a> ArchiveService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Количество постов по годам и месяцам.
    pub async fn list(&self) -> ClientResult<Vec<Archive>> {
        self.http.get_json("/posts/archives").await
    }

    /// Посты за указанный месяц.
    pub async fn posts(&self, year: i32, month: u32, page: PageRequest) -> ClientResult<Page<Post>> {
        if !(1..=12).contains(&month) {
            return Err(ClientError::InvalidRequest(format!(
                "month must be in 1..=12, got {month}"
            )));
        }
        let dto: PageDto<PostDto> = self
            .http
            .get_json_query(&format!("/posts/archives/{year}/{month}"), &page)
            .await?;
        Ok(dto.map(Post::from))
    }
}
