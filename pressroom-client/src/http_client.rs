use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::navigation::Navigator;
use crate::session::SessionContext;
use crate::wire::ErrorResponseDto;

/// Базовый URL REST API по умолчанию.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api";

#[derive(Debug, Clone)]
/// Параметры HTTP-клиента.
pub struct ClientConfig {
    /// Базовый URL API, например `http://127.0.0.1:8080/api`.
    pub base_url: String,
    /// Таймаут установки соединения.
    pub connect_timeout: Duration,
    /// Таймаут запроса целиком.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Конфигурация с указанным URL и таймаутами по умолчанию.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-обёртка над REST API блога.
///
/// Подставляет bearer-токен из сессии, классифицирует ошибки и централизованно
/// обрабатывает 401: сбрасывает сессию и уводит на экран входа.
pub struct HttpClient {
    base_url: String,
    client: Client,
    session: SessionContext,
    navigator: Navigator,
}

impl HttpClient {
    /// Создаёт клиент поверх внедрённых сессии и навигатора.
    pub fn new(
        config: ClientConfig,
        session: SessionContext,
        navigator: Navigator,
    ) -> ClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            base_url: config.base_url,
            client,
            session,
            navigator,
        })
    }

    /// Контекст сессии.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Навигатор.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");
        let request = self.client.request(method, self.endpoint(path));
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = request
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(self.decode_error(response).await);
        }
        Ok(response)
    }

    async fn decode_error(&self, response: Response) -> ClientError {
        let status = response.status();
        let path = response.url().path().to_string();

        let (message, fields) = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body.into_parts(),
            Err(_) => (None, BTreeMap::new()),
        };

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!(%path, "unauthorized, purging session");
                self.session.purge_expired();
                self.navigator.redirect_to_login();
            }
            StatusCode::FORBIDDEN => warn!(%path, "no permission to access the resource"),
            StatusCode::NOT_FOUND => warn!(%path, "requested resource does not exist"),
            status if status.is_server_error() => warn!(%path, %status, "server error"),
            status => warn!(
                %path,
                %status,
                message = message.as_deref().unwrap_or("request failed"),
                "request failed"
            ),
        }

        ClientError::from_http_status(status, message, fields)
    }

    /// GET с JSON-ответом.
    pub(crate) async fn get_json<TRes>(&self, path: &str) -> ClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = self.execute(self.request(Method::GET, path)).await?;
        response.json::<TRes>().await.map_err(ClientError::from_reqwest)
    }

    /// GET с query-параметрами и JSON-ответом.
    pub(crate) async fn get_json_query<TQuery, TRes>(
        &self,
        path: &str,
        query: &TQuery,
    ) -> ClientResult<TRes>
    where
        TQuery: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        let request = self.request(Method::GET, path).query(query);
        let response = self.execute(request).await?;
        response.json::<TRes>().await.map_err(ClientError::from_reqwest)
    }

    /// GET с текстовым ответом (RSS).
    pub(crate) async fn get_text(&self, path: &str) -> ClientResult<String> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        response.text().await.map_err(ClientError::from_reqwest)
    }

    /// универсальный helper для отправки запросов с json-payload
    pub(crate) async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
    ) -> ClientResult<TRes>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        let request = self.request(method, path).json(body);
        let response = self.execute(request).await?;
        response.json::<TRes>().await.map_err(ClientError::from_reqwest)
    }

    /// Запрос без тела, ответ игнорируется.
    pub(crate) async fn send_empty(&self, method: Method, path: &str) -> ClientResult<()> {
        self.execute(self.request(method, path)).await?;
        Ok(())
    }

    /// POST multipart/form-data с JSON-ответом.
    pub(crate) async fn send_multipart<TRes>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).multipart(form);
        let response = self.execute(request).await?;
        response.json::<TRes>().await.map_err(ClientError::from_reqwest)
    }
}
