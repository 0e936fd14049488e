use reqwest::Method;

use crate::error::ClientResult;
use crate::http_client::HttpClient;
use crate::models::{AuthResponse, AuthUser, LoginRequest, RegisterRequest};
use crate::services::validate;
use crate::wire::AuthResponseDto;

#[derive(Debug, Clone, Copy)]
/// Регистрация, вход и выход.
pub struct AuthService<'a> {
    http: &'a HttpClient,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Регистрирует пользователя и открывает сессию.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        validate(request)?;
        let dto: AuthResponseDto = self
            .http
            .send_json(Method::POST, "/auth/register", request)
            .await?;
        let auth = AuthResponse::from(dto);
        self.http.session().establish(&auth);
        Ok(auth)
    }

    /// Выполняет вход и открывает сессию.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        validate(request)?;
        let dto: AuthResponseDto = self
            .http
            .send_json(Method::POST, "/auth/login", request)
            .await?;
        let auth = AuthResponse::from(dto);
        self.http.session().establish(&auth);
        Ok(auth)
    }

    /// Закрывает сессию. Запрос на сервер не отправляется.
    pub fn logout(&self) {
        self.http.session().clear();
    }

    /// Пользователь текущей сессии.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.http.session().user()
    }

    /// Есть ли токен в сессии.
    pub fn is_authenticated(&self) -> bool {
        self.http.session().is_authenticated()
    }
}
