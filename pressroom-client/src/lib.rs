//! Клиентская библиотека блога поверх его REST API.
//!
//! Предоставляет `BlogClient` с сервисами ресурсов и клиентское состояние:
//! - сессия и тема во внедряемом хранилище (`KeyValueStore`);
//! - навигация с централизованной обработкой 401;
//! - автосохранение черновиков с дебаунсом;
//! - оглавление markdown, выбор версий для сравнения, кнопки реакций.
//!
//! JWT-токен сохраняется после `register`/`login` и подставляется во все
//! запросы автоматически.
#![warn(missing_docs)]

mod autosave;
mod confirm;
mod drafts;
mod error;
mod format;
mod http_client;
mod models;
mod navigation;
mod reactions;
mod selection;
mod services;
mod session;
mod storage;
mod theme;
mod toc;
mod wire;

use std::sync::Arc;

pub use autosave::{
    AutoSave, AutoSaveStatus, DEFAULT_AUTOSAVE_DELAY, DraftSaver, SaveOutcome, Snapshot,
};
pub use confirm::{AssumeNo, AssumeYes, Confirm, DestructiveAction, confirm_then};
pub use drafts::{DraftForm, PostDraftSaver};
pub use error::{ClientError, ClientResult};
pub use format::{format_date, format_date_short, format_timestamp};
pub use http_client::{ClientConfig, DEFAULT_API_URL};
pub use models::{
    Archive, AuthResponse, AuthUser, Category, Comment, CreateCommentRequest, Direction,
    LoginRequest, Page, PageRequest, Post, PostInput, PostVersion, RegisterRequest, RssInfo,
    SortBy, Tag, UpdateProfileRequest, UploadedFile, UserProfile, VersionComparison,
    VersionStats,
};
pub use navigation::{Navigator, Route};
pub use reactions::{Reaction, ReactionSnapshot, ReactionToggle};
pub use selection::CompareSelection;
pub use services::{
    ArchiveService, AuthService, CategoryService, CommentService, FavoriteService, FileService,
    LikeService, MAX_UPLOAD_BYTES, PostService, RssService, TagService, UserService,
    VersionService,
};
pub use session::{Refresh, SessionContext, SessionState};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use theme::{Theme, ThemeContext};
pub use toc::{ACTIVE_HEADING_OFFSET, Heading, active_heading, extract_headings, heading_id};

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Клиент REST API блога.
///
/// Дёшево клонируется: клоны разделяют соединения, сессию и навигатор.
pub struct BlogClient {
    http: HttpClient,
}

impl BlogClient {
    /// Создаёт клиент поверх внедрённых сессии и навигатора.
    pub fn new(
        config: ClientConfig,
        session: SessionContext,
        navigator: Navigator,
    ) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config, session, navigator)?,
        })
    }

    /// Создаёт клиент, восстанавливая сессию из хранилища.
    pub fn with_store(config: ClientConfig, store: Arc<dyn KeyValueStore>) -> ClientResult<Self> {
        Self::new(config, SessionContext::load(store), Navigator::default())
    }

    /// Контекст сессии.
    pub fn session(&self) -> &SessionContext {
        self.http.session()
    }

    /// Навигатор.
    pub fn navigator(&self) -> &Navigator {
        self.http.navigator()
    }

    /// Регистрация, вход, выход.
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.http)
    }

    /// Посты и черновики.
    pub fn posts(&self) -> PostService<'_> {
        PostService::new(&self.http)
    }

    /// Комментарии.
    pub fn comments(&self) -> CommentService<'_> {
        CommentService::new(&self.http)
    }

    /// Лайки.
    pub fn likes(&self) -> LikeService<'_> {
        LikeService::new(&self.http)
    }

    /// Избранное.
    pub fn favorites(&self) -> FavoriteService<'_> {
        FavoriteService::new(&self.http)
    }

    /// Теги.
    pub fn tags(&self) -> TagService<'_> {
        TagService::new(&self.http)
    }

    /// Категории.
    pub fn categories(&self) -> CategoryService<'_> {
        CategoryService::new(&self.http)
    }

    /// Загрузка изображений.
    pub fn files(&self) -> FileService<'_> {
        FileService::new(&self.http)
    }

    /// Профили пользователей.
    pub fn users(&self) -> UserService<'_> {
        UserService::new(&self.http)
    }

    /// История версий.
    pub fn versions(&self) -> VersionService<'_> {
        VersionService::new(&self.http)
    }

    /// Архив по месяцам.
    pub fn archives(&self) -> ArchiveService<'_> {
        ArchiveService::new(&self.http)
    }

    /// RSS.
    pub fn rss(&self) -> RssService<'_> {
        RssService::new(&self.http)
    }
}
