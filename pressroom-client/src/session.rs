//! Состояние сессии: токен и пользователь.
//!
//! Вместо глобального доступа к хранилищу компоненты получают
//! `SessionContext` явно: читают текущее состояние, подписываются на его
//! изменения и получают сигнал обновления после входа/выхода.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use crate::models::{AuthResponse, AuthUser};
use crate::storage::KeyValueStore;

pub(crate) const TOKEN_KEY: &str = "token";
pub(crate) const USER_KEY: &str = "user";

const REFRESH_CAPACITY: usize = 16;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Снимок сессии.
pub struct SessionState {
    /// Bearer-токен.
    pub token: Option<String>,
    /// Пользователь, вошедший в систему.
    pub user: Option<AuthUser>,
}

impl SessionState {
    /// Есть ли токен.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Сигнал зависимым компонентам: данные, завязанные на пользователя, устарели.
pub enum Refresh {
    /// Выполнен вход.
    LoggedIn,
    /// Выполнен выход.
    LoggedOut,
    /// Сервер отверг токен (401), сессия сброшена.
    Expired,
}

fn parse_token(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn parse_user(raw: &str) -> Option<AuthUser> {
    serde_json::from_str::<AuthUser>(raw).ok()
}

#[derive(Clone)]
/// Общий контекст сессии. Клоны разделяют одно состояние.
pub struct SessionContext {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Arc<dyn KeyValueStore>,
    state: watch::Sender<SessionState>,
    refresh: broadcast::Sender<Refresh>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("SessionContext")
            .field("authenticated", &state.is_authenticated())
            .field("user", &state.user.as_ref().map(|u| u.username.as_str()))
            .finish()
    }
}

impl SessionContext {
    /// Поднимает сессию из хранилища.
    ///
    /// Пустой токен и нечитаемая запись пользователя считаются отсутствующими.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let token = match store.get(TOKEN_KEY) {
            Ok(raw) => raw.as_deref().and_then(parse_token),
            Err(err) => {
                warn!(error = %err, "failed to read session token");
                None
            }
        };
        let user = match store.get(USER_KEY) {
            Ok(raw) => raw.as_deref().and_then(parse_user),
            Err(err) => {
                warn!(error = %err, "failed to read session user");
                None
            }
        };

        let (state, _) = watch::channel(SessionState { token, user });
        let (refresh, _) = broadcast::channel(REFRESH_CAPACITY);
        Self {
            inner: Arc::new(SessionInner {
                store,
                state,
                refresh,
            }),
        }
    }

    /// Текущий снимок сессии.
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Текущий токен.
    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token.clone()
    }

    /// Текущий пользователь.
    pub fn user(&self) -> Option<AuthUser> {
        self.inner.state.borrow().user.clone()
    }

    /// Есть ли активная сессия.
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    /// Подписка на изменения сессии.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Подписка на сигналы обновления (вход, выход, истечение).
    pub fn refresh_events(&self) -> broadcast::Receiver<Refresh> {
        self.inner.refresh.subscribe()
    }

    /// Сохраняет токен и пользователя после входа или регистрации.
    pub fn establish(&self, auth: &AuthResponse) {
        let token = parse_token(&auth.token);
        if let Some(token) = token.as_deref() {
            self.persist(TOKEN_KEY, token);
            match serde_json::to_string(&auth.user) {
                Ok(raw) => self.persist(USER_KEY, &raw),
                Err(err) => warn!(error = %err, "failed to serialize session user"),
            }
        }

        self.inner.state.send_replace(SessionState {
            user: token.as_ref().map(|_| auth.user.clone()),
            token,
        });
        info!(username = %auth.user.username, "session established");
        self.signal(Refresh::LoggedIn);
    }

    /// Явный выход пользователя.
    pub fn clear(&self) {
        self.wipe();
        info!("session cleared");
        self.signal(Refresh::LoggedOut);
    }

    /// Сброс сессии после ответа 401.
    pub fn purge_expired(&self) {
        self.wipe();
        warn!("session expired, token purged");
        self.signal(Refresh::Expired);
    }

    fn wipe(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.inner.store.remove(key) {
                warn!(key, error = %err, "failed to remove session entry");
            }
        }
        self.inner.state.send_replace(SessionState::default());
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(err) = self.inner.store.set(key, value) {
            warn!(key, error = %err, "failed to persist session entry");
        }
    }

    fn signal(&self, event: Refresh) {
        // Подписчиков может не быть.
        let _ = self.inner.refresh.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn auth(token: &str) -> AuthResponse {
        AuthResponse {
            token: token.to_string(),
            user: AuthUser {
                id: 1,
                username: "u".to_string(),
                email: "u@example.com".to_string(),
                role: "USER".to_string(),
            },
        }
    }

    #[test]
    fn parse_token_trims_and_returns_value() {
        let token = parse_token("  abc.def.ghi  ");
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_token_rejects_blank() {
        assert!(parse_token("   ").is_none());
    }

    #[test]
    fn parse_user_returns_none_for_invalid_json() {
        assert!(parse_user("{not-json}").is_none());
    }

    #[test]
    fn load_reads_token_and_user_from_store() {
        let store = MemoryStore::with_entries([
            (TOKEN_KEY, " jwt "),
            (
                USER_KEY,
                r#"{"id":1,"username":"u","email":"u@example.com","role":"USER"}"#,
            ),
        ]);
        let session = SessionContext::load(Arc::new(store));

        assert_eq!(session.token().as_deref(), Some("jwt"));
        assert_eq!(session.user().map(|u| u.username), Some("u".to_string()));
        assert!(session.is_authenticated());
    }

    #[test]
    fn establish_persists_and_signals_login() {
        let store = Arc::new(MemoryStore::new());
        let session = SessionContext::load(store.clone());
        let mut events = session.refresh_events();
        let watcher = session.subscribe();

        session.establish(&auth("jwt"));

        assert_eq!(store.get(TOKEN_KEY).expect("get").as_deref(), Some("jwt"));
        assert!(store.get(USER_KEY).expect("get").is_some());
        assert!(watcher.borrow().is_authenticated());
        assert_eq!(events.try_recv().expect("event"), Refresh::LoggedIn);
    }

    #[test]
    fn purge_expired_wipes_store_and_signals_expiry() {
        let store = Arc::new(MemoryStore::new());
        let session = SessionContext::load(store.clone());
        session.establish(&auth("jwt"));
        let mut events = session.refresh_events();

        session.purge_expired();

        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(store.get(TOKEN_KEY).expect("get").is_none());
        assert!(store.get(USER_KEY).expect("get").is_none());
        assert_eq!(events.try_recv().expect("event"), Refresh::Expired);
    }

    #[test]
    fn clones_share_state() {
        let session = SessionContext::load(Arc::new(MemoryStore::new()));
        let other = session.clone();

        session.establish(&auth("jwt"));
        assert!(other.is_authenticated());

        other.clear();
        assert!(!session.is_authenticated());
    }
}
