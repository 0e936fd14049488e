use reqwest::Method;

use crate::error::{ClientError, ClientResult};
use crate::http_client::HttpClient;
use crate::models::Category;

#[derive(Debug, Clone, Copy)]
/// Категории постов.
pub struct CategoryService<'a> {
    http: &'a HttpClient,
}

impl<'a> CategoryService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Все категории.
    pub async fn all(&self) -> ClientResult<Vec<Category>> {
        self.http.get_json("/categories").await
    }

    /// Категория по идентификатору.
    pub async fn get(&self, id: i64) -> ClientResult<Category> {
        self.http.get_json(&format!("/categories/{id}")).await
    }

    /// Создаёт категорию.
    pub async fn create(&self, category: &Category) -> ClientResult<Category> {
        check_name(category)?;
        self.http
            .send_json(Method::POST, "/categories", category)
            .await
    }

    /// Обновляет категорию.
    pub async fn update(&self, id: i64, category: &Category) -> ClientResult<Category> {
        check_name(category)?;
        self.http
            .send_json(Method::PUT, &format!("/categories/{id}"), category)
            .await
    }

    /// Удаляет категорию.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http
            .send_empty(Method::DELETE, &format!("/categories/{id}"))
            .await
    }
}

fn check_name(category: &Category) -> ClientResult<()> {
    if category.name.trim().is_empty() {
        return Err(ClientError::Validation {
            message: "input validation failed".to_string(),
            fields: [("name".to_string(), "category name is required".to_string())].into(),
        });
    }
    Ok(())
}
