use reqwest::Method;

use crate::error::ClientResult;
use crate::http_client::HttpClient;
use crate::models::{UpdateProfileRequest, UserProfile};
use crate::services::validate;

#[derive(Debug, Clone, Copy)]
/// Профили пользователей.
pub struct UserService<'a> {
    http: &'a HttpClient,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Профиль текущего пользователя со статистикой.
    pub async fn profile(&self) -> ClientResult<UserProfile> {
        self.http.get_json("/users/profile").await
    }

    /// Публичный профиль по логину.
    pub async fn by_username(&self, username: &str) -> ClientResult<UserProfile> {
        self.http.get_json(&format!("/users/{username}")).await
    }

    /// Обновляет профиль текущего пользователя.
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> ClientResult<UserProfile> {
        validate(request)?;
        self.http
            .send_json(Method::PUT, "/users/profile", request)
            .await
    }
}
