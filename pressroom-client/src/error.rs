use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `pressroom-client`.
pub enum ClientError {
    /// Ответ не получен: сеть, DNS, таймаут (`reqwest`).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Сервер ответил 401: сессия истекла, токен недействителен
    /// или неверны учётные данные.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Операция требует входа, а сессии нет. Запрос не отправлялся.
    #[error("login required")]
    LoginRequired,

    /// Сервер ответил 403.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Запрошенный ресурс не найден.
    #[error("not found: {0}")]
    NotFound(String),

    /// Ошибка на стороне сервера (5xx).
    #[error("server error {status}: {message}")]
    Server {
        /// HTTP-статус ответа.
        status: u16,
        /// Сообщение сервера или текст статуса.
        message: String,
    },

    /// Ошибка валидации: клиентская (до отправки) или из ответа 400.
    #[error("validation failed: {message}")]
    Validation {
        /// Общее сообщение.
        message: String,
        /// Сообщения по полям формы.
        fields: BTreeMap<String, String>,
    },

    /// Некорректный запрос, не попавший в другие категории.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Тело ответа не удалось разобрать.
    #[error("decode error: {0}")]
    Decode(String),

    /// Ошибка локального хранилища сессии/темы.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Результат операций `pressroom-client`.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Классифицирует неуспешный HTTP-ответ по статусу.
    ///
    /// `fields` берётся из `errors` в теле ответа 400, если сервер его прислал.
    pub(crate) fn from_http_status(
        status: reqwest::StatusCode,
        message: Option<String>,
        fields: BTreeMap<String, String>,
    ) -> Self {
        let message = message.unwrap_or_else(|| status_text(status));
        match status {
            reqwest::StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            reqwest::StatusCode::FORBIDDEN => Self::Forbidden(message),
            reqwest::StatusCode::NOT_FOUND => Self::NotFound(message),
            reqwest::StatusCode::BAD_REQUEST | reqwest::StatusCode::UNPROCESSABLE_ENTITY => {
                Self::Validation { message, fields }
            }
            status if status.is_server_error() => Self::Server {
                status: status.as_u16(),
                message,
            },
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None, BTreeMap::new());
        }
        Self::Network(err)
    }

    pub(crate) fn from_validation(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                let first = errs.first()?;
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                Some((field.to_string(), message))
            })
            .collect();

        Self::Validation {
            message: "input validation failed".to_string(),
            fields,
        }
    }

    /// Сообщение для конкретного поля формы, если ошибка валидационная.
    pub fn field_message(&self, field: &str) -> Option<&str> {
        match self {
            Self::Validation { fields, .. } => fields.get(field).map(String::as_str),
            _ => None,
        }
    }
}

fn status_text(status: reqwest::StatusCode) -> String {
    match status.as_u16() {
        400 => "bad request".to_string(),
        401 => "authorization required".to_string(),
        403 => "no permission to access this resource".to_string(),
        404 => "resource not found".to_string(),
        409 => "conflict".to_string(),
        500..=599 => "internal server error".to_string(),
        _ => format!("http status {status}"),
    }
}
