use crate::error::ClientResult;
use crate::http_client::HttpClient;
use crate::models::RssInfo;

#[derive(Debug, Clone, Copy)]
/// RSS-подписка.
pub struct RssService<'a> {
    http: &'a HttpClient,
}

impl<'a> RssService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Описание подписки для вывода пользователю.
    pub async fn info(&self) -> ClientResult<RssInfo> {
        self.http.get_json("/rss/info").await
    }

    /// XML ленты всего блога.
    pub async fn feed_xml(&self) -> ClientResult<String> {
        self.http.get_text("/rss/feed.xml").await
    }

    /// XML ленты категории.
    pub async fn category_feed_xml(&self, category_id: i64) -> ClientResult<String> {
        self.http
            .get_text(&format!("/rss/category/{category_id}.xml"))
            .await
    }
}
