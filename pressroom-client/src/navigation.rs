use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Экраны клиента.
pub enum Route {
    /// Лента постов.
    Home,
    /// Вход.
    Login,
    /// Регистрация.
    Register,
    /// Страница поста.
    PostDetail(i64),
    /// Новый пост.
    CreatePost,
    /// Редактирование поста.
    EditPost(i64),
    /// Черновики текущего пользователя.
    Drafts,
    /// Избранное.
    Favorites,
    /// Профиль.
    Profile,
    /// Архив за месяц.
    Archive {
        /// Год.
        year: i32,
        /// Месяц, 1-12.
        month: u32,
    },
    /// Посты с тегом.
    TagPosts(i64),
    /// Сравнение двух версий поста.
    VersionCompare {
        /// Пост.
        post_id: i64,
        /// Первая выбранная версия.
        v1: u32,
        /// Вторая выбранная версия.
        v2: u32,
    },
}

impl Route {
    /// Экраны, доступные без входа, с которых не нужно уводить на логин.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// Путь экрана.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::PostDetail(id) => format!("/posts/{id}"),
            Self::CreatePost => "/create-post".to_string(),
            Self::EditPost(id) => format!("/edit-post/{id}"),
            Self::Drafts => "/drafts".to_string(),
            Self::Favorites => "/favorites".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Archive { year, month } => format!("/archives/{year}/{month}"),
            Self::TagPosts(id) => format!("/tags/{id}"),
            Self::VersionCompare { post_id, v1, v2 } => {
                format!("/posts/{post_id}/compare?v1={v1}&v2={v2}")
            }
        }
    }
}

#[derive(Debug, Clone)]
/// Текущий экран и подписка на переходы.
pub struct Navigator {
    state: Arc<watch::Sender<Route>>,
}

impl Navigator {
    /// Навигатор, стоящий на указанном экране.
    pub fn new(initial: Route) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state: Arc::new(state),
        }
    }

    /// Текущий экран.
    pub fn current(&self) -> Route {
        self.state.borrow().clone()
    }

    /// Переход на экран.
    pub fn navigate(&self, route: Route) {
        debug!(path = %route.path(), "navigate");
        self.state.send_replace(route);
    }

    /// Уводит на логин, если пользователь не на экране входа/регистрации.
    ///
    /// Возвращает `true`, если переход состоялся.
    pub fn redirect_to_login(&self) -> bool {
        if self.current().is_unauthenticated() {
            return false;
        }
        self.navigate(Route::Login);
        true
    }

    /// Подписка на переходы.
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.state.subscribe()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}
