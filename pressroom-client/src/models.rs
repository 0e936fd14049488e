use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Пользователь текущей сессии (то, что сервер вернул при входе).
pub struct AuthUser {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Логин.
    pub username: String,
    /// Email.
    pub email: String,
    /// Роль (`USER`, `ADMIN`).
    pub role: String,
}

#[derive(Debug, Clone)]
/// Ответ после успешной регистрации или входа.
pub struct AuthResponse {
    /// Bearer-токен.
    pub token: String,
    /// Данные пользователя.
    pub user: AuthUser,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Данные формы регистрации.
pub struct RegisterRequest {
    /// Логин.
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    /// Email.
    #[validate(email(message = "email is malformed"))]
    pub email: String,
    /// Пароль.
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    /// Отображаемое имя; по умолчанию сервер берёт логин.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
/// Данные формы входа.
pub struct LoginRequest {
    /// Логин.
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    /// Пароль.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
/// Пост (опубликованный или черновик).
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// Markdown-содержимое.
    pub content: String,
    /// Краткое описание.
    pub summary: Option<String>,
    /// Ссылка на обложку.
    pub cover_image: Option<String>,
    /// Категория.
    pub category_id: Option<i64>,
    /// Название категории.
    pub category_name: Option<String>,
    /// Автор.
    pub author_id: i64,
    /// Имя автора.
    pub author_name: Option<String>,
    /// `false` для черновика.
    pub published: bool,
    /// Счётчик просмотров.
    pub views: u64,
    /// Теги.
    pub tags: Vec<String>,
    /// Количество комментариев.
    pub comment_count: u64,
    /// Количество лайков.
    pub like_count: u64,
    /// Время создания (серверное локальное время).
    pub created_at: NaiveDateTime,
    /// Время последнего обновления.
    pub updated_at: NaiveDateTime,
}

impl Post {
    /// Черновик: неопубликованный пост.
    pub fn is_draft(&self) -> bool {
        !self.published
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
/// Данные для создания или обновления поста.
pub struct PostInput {
    /// Заголовок.
    #[validate(
        length(min = 1, max = 200, message = "title must be 1-200 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,
    /// Markdown-содержимое.
    #[validate(
        length(min = 1, message = "content is required"),
        custom(function = "not_blank")
    )]
    pub content: String,
    /// Краткое описание.
    #[validate(length(max = 500, message = "summary must not exceed 500 characters"))]
    pub summary: Option<String>,
    /// Ссылка на обложку.
    pub cover_image: Option<String>,
    /// Категория.
    pub category_id: Option<i64>,
    /// Публиковать ли пост.
    pub published: bool,
    /// Теги.
    pub tags: Vec<String>,
    /// Комментарий к изменению; попадает в историю версий.
    #[validate(length(max = 200, message = "change note must not exceed 200 characters"))]
    pub change_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Комментарий к посту; ответы вложены на один уровень.
pub struct Comment {
    /// Идентификатор комментария.
    pub id: i64,
    /// Пост.
    pub post_id: i64,
    /// Автор.
    pub user_id: i64,
    /// Логин автора.
    pub username: String,
    /// Аватар автора.
    #[serde(default)]
    pub user_avatar: Option<String>,
    /// Родительский комментарий для ответа.
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// Текст.
    pub content: String,
    /// Время создания.
    pub created_at: NaiveDateTime,
    /// Ответы на комментарий.
    #[serde(default)]
    pub replies: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Данные нового комментария.
pub struct CreateCommentRequest {
    /// Пост.
    pub post_id: i64,
    /// Комментарий, на который отвечаем.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// Текст.
    #[validate(
        length(min = 1, message = "comment must not be empty"),
        custom(function = "not_blank")
    )]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Тег со счётчиком использования.
pub struct Tag {
    /// Идентификатор тега.
    pub id: i64,
    /// Название.
    pub name: String,
    /// Сколько постов помечено тегом.
    #[serde(default)]
    pub use_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Категория постов.
pub struct Category {
    /// Идентификатор категории.
    #[serde(default, skip_serializing)]
    pub id: i64,
    /// Название.
    pub name: String,
    /// Описание.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Количество постов за месяц.
pub struct Archive {
    /// Год.
    pub year: i32,
    /// Месяц, 1-12.
    pub month: u32,
    /// Сколько постов опубликовано.
    pub count: u64,
    /// Готовая подпись для вывода.
    #[serde(default)]
    pub archive_name: Option<String>,
}

impl Archive {
    /// Подпись архива: серверная, если есть, иначе `YYYY-MM`.
    pub fn label(&self) -> String {
        self.archive_name
            .clone()
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Профиль пользователя со статистикой.
pub struct UserProfile {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Логин.
    pub username: String,
    /// Email.
    #[serde(default)]
    pub email: Option<String>,
    /// Отображаемое имя.
    #[serde(default)]
    pub nickname: Option<String>,
    /// Аватар.
    #[serde(default)]
    pub avatar: Option<String>,
    /// О себе.
    #[serde(default)]
    pub bio: Option<String>,
    /// Роль.
    #[serde(default)]
    pub role: Option<String>,
    /// Дата регистрации.
    pub created_at: NaiveDateTime,
    /// Всего постов.
    #[serde(default)]
    pub post_count: u64,
    /// Опубликованных постов.
    #[serde(default)]
    pub published_post_count: u64,
    /// Суммарные просмотры.
    #[serde(default)]
    pub total_views: u64,
    /// Постов в избранном.
    #[serde(default)]
    pub favorite_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
/// Изменяемые поля профиля. `None` оставляет поле без изменений.
pub struct UpdateProfileRequest {
    /// Отображаемое имя.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "nickname must not exceed 100 characters"))]
    pub nickname: Option<String>,
    /// Email.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        email(message = "email is malformed"),
        length(max = 100, message = "email must not exceed 100 characters")
    )]
    pub email: Option<String>,
    /// О себе.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "bio must not exceed 500 characters"))]
    pub bio: Option<String>,
    /// Ссылка на аватар.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "avatar url must not exceed 500 characters"))]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Результат загрузки файла.
pub struct UploadedFile {
    /// Публичный путь файла, например `/uploads/<uuid>.png`.
    pub url: String,
    /// Имя файла на сервере.
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Неизменяемый снимок поста в истории версий.
pub struct PostVersion {
    /// Идентификатор записи.
    pub id: i64,
    /// Пост.
    pub post_id: i64,
    /// Порядковый номер версии.
    pub version: u32,
    /// Заголовок на момент снимка.
    pub title: String,
    /// Содержимое на момент снимка.
    pub content: String,
    /// Краткое описание.
    #[serde(default)]
    pub summary: Option<String>,
    /// Обложка.
    #[serde(default)]
    pub cover_image: Option<String>,
    /// Теги через запятую.
    #[serde(default)]
    pub tags: Option<String>,
    /// Комментарий к изменению.
    #[serde(default)]
    pub change_note: Option<String>,
    /// Время создания версии.
    pub created_at: NaiveDateTime,
    /// Кто создал версию.
    #[serde(default)]
    pub created_by: Option<i64>,
    /// Логин создателя.
    #[serde(default)]
    pub created_by_username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Серверное сравнение двух версий.
pub struct VersionComparison {
    /// Первая версия.
    pub version1: PostVersion,
    /// Вторая версия.
    pub version2: PostVersion,
    /// Изменился заголовок.
    pub title_changed: bool,
    /// Изменилось содержимое.
    pub content_changed: bool,
    /// Изменилось описание.
    pub summary_changed: bool,
    /// Изменились теги.
    pub tags_changed: bool,
}

impl VersionComparison {
    /// Есть ли хоть одно отличие.
    pub fn has_changes(&self) -> bool {
        self.title_changed || self.content_changed || self.summary_changed || self.tags_changed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Статистика истории версий.
pub struct VersionStats {
    /// Пост.
    pub post_id: i64,
    /// Количество версий.
    pub total_versions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Описание RSS-подписки.
pub struct RssInfo {
    /// Путь к ленте.
    pub feed_url: String,
    /// Заголовок.
    pub title: String,
    /// Описание.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
/// Страница выборки.
pub struct Page<T> {
    /// Элементы текущей страницы.
    pub items: Vec<T>,
    /// Номер страницы, с нуля.
    pub page: u32,
    /// Размер страницы.
    pub size: u32,
    /// Всего элементов.
    pub total_elements: u64,
    /// Всего страниц.
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Есть ли следующая страница.
    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Параметры пагинации (`page` с нуля).
pub struct PageRequest {
    /// Номер страницы.
    pub page: u32,
    /// Размер страницы.
    pub size: u32,
}

impl PageRequest {
    /// Создаёт запрос страницы; нулевой размер поднимается до 1.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    /// Первая страница по 10 элементов.
    pub fn first() -> Self {
        Self::new(0, 10)
    }

    /// Первая страница комментариев, по 20.
    pub fn comments() -> Self {
        Self::new(0, 20)
    }

    /// Следующая страница того же размера.
    pub fn next(self) -> Self {
        Self::new(self.page.saturating_add(1), self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Поле сортировки постов.
pub enum SortBy {
    /// По дате создания.
    CreatedAt,
    /// По дате обновления.
    UpdatedAt,
    /// По просмотрам.
    Views,
    /// По заголовку.
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
/// Направление сортировки.
pub enum Direction {
    /// По возрастанию.
    Asc,
    /// По убыванию.
    Desc,
}

/// Строка из одних пробелов сервер отклоняет так же, как пустую.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, content: &str) -> PostInput {
        PostInput {
            title: title.to_string(),
            content: content.to_string(),
            ..PostInput::default()
        }
    }

    #[test]
    fn post_input_rejects_whitespace_only_fields() {
        assert!(post("Title", "body").validate().is_ok());

        let errors = post("   ", "\n\t").validate().expect_err("must fail");
        let fields = errors.field_errors();
        assert_eq!(fields["title"][0].code, "blank");
        assert_eq!(fields["content"][0].code, "blank");
    }

    #[test]
    fn empty_post_fields_keep_length_message() {
        let errors = post("", "").validate().expect_err("must fail");
        let fields = errors.field_errors();
        assert_eq!(
            fields["content"][0].message.as_deref(),
            Some("content is required")
        );
    }

    #[test]
    fn comment_must_not_be_blank() {
        let comment = CreateCommentRequest {
            post_id: 1,
            parent_id: None,
            content: "  ".to_string(),
        };
        assert!(comment.validate().is_err());
    }
}
