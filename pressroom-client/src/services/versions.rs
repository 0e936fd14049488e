use serde::Serialize;

use crate::error::ClientResult;
use crate::http_client::HttpClient;
use crate::models::{Page, PageRequest, PostVersion, VersionComparison, VersionStats};
use crate::wire::PageDto;

#[derive(Serialize)]
struct CompareQuery {
    v1: u32,
    v2: u32,
}

#[derive(Debug, Clone, Copy)]
/// История версий поста. Только чтение: версии создаёт сервер при обновлении.
pub struct VersionService<'a> {
    http: &'a HttpClient,
}

impl<'a> VersionService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Все версии поста.
    pub async fn history(&self, post_id: i64) -> ClientResult<Vec<PostVersion>> {
        self.http
            .get_json(&format!("/posts/{post_id}/versions"))
            .await
    }

    /// Версии поста постранично.
    pub async fn history_page(
        &self,
        post_id: i64,
        page: PageRequest,
    ) -> ClientResult<Page<PostVersion>> {
        let dto: PageDto<PostVersion> = self
            .http
            .get_json_query(&format!("/posts/{post_id}/versions/page"), &page)
            .await?;
        Ok(dto.into())
    }

    /// Конкретная версия.
    pub async fn get(&self, post_id: i64, version: u32) -> ClientResult<PostVersion> {
        self.http
            .get_json(&format!("/posts/{post_id}/versions/{version}"))
            .await
    }

    /// Сравнение двух версий. Разницу считает сервер.
    pub async fn compare(&self, post_id: i64, v1: u32, v2: u32) -> ClientResult<VersionComparison> {
        self.http
            .get_json_query(
                &format!("/posts/{post_id}/versions/compare"),
                &CompareQuery { v1, v2 },
            )
            .await
    }

    /// Количество версий.
    pub async fn stats(&self, post_id: i64) -> ClientResult<VersionStats> {
        self.http
            .get_json(&format!("/posts/{post_id}/versions/stats"))
            .await
    }
}
