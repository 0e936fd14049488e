use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::BlogClient;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Реакция на пост.
pub enum Reaction {
    /// Лайк.
    Like,
    /// Избранное.
    Favorite,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Локальное состояние кнопки реакции.
pub struct ReactionSnapshot {
    /// Поставлена ли реакция текущим пользователем.
    pub active: bool,
    /// Сколько всего реакций у поста.
    pub count: u64,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Кнопка лайка/избранного с локальной правкой состояния после ответа сервера.
#[derive(Debug)]
pub struct ReactionToggle {
    client: BlogClient,
    reaction: Reaction,
    post_id: i64,
    state: Mutex<ReactionSnapshot>,
    busy: AtomicBool,
}

impl ReactionToggle {
    /// Загружает счётчик и, если пользователь вошёл, его статус.
    pub async fn load(client: BlogClient, reaction: Reaction, post_id: i64) -> ClientResult<Self> {
        let toggle = Self::with_state(client, reaction, post_id, ReactionSnapshot::default());
        let count = toggle.remote_count().await?;
        let active = if toggle.client.session().is_authenticated() {
            toggle.remote_status().await?
        } else {
            false
        };
        *toggle.lock() = ReactionSnapshot { active, count };
        Ok(toggle)
    }

    /// Кнопка с уже известным состоянием.
    pub fn with_state(
        client: BlogClient,
        reaction: Reaction,
        post_id: i64,
        state: ReactionSnapshot,
    ) -> Self {
        Self {
            client,
            reaction,
            post_id,
            state: Mutex::new(state),
            busy: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ReactionSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Текущее состояние.
    pub fn snapshot(&self) -> ReactionSnapshot {
        *self.lock()
    }

    /// Идёт ли запрос.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Переключает реакцию.
    ///
    /// Без входа возвращает [`ClientError::LoginRequired`]. Пока предыдущий
    /// запрос не завершился, повторный вызов ничего не делает. При ошибке
    /// состояние не меняется.
    pub async fn toggle(&self) -> ClientResult<ReactionSnapshot> {
        if !self.client.session().is_authenticated() {
            return Err(ClientError::LoginRequired);
        }
        if self.busy.swap(true, Ordering::AcqRel) {
            debug!(post_id = self.post_id, "reaction request in flight, ignoring");
            return Ok(self.snapshot());
        }
        let _busy = BusyGuard(&self.busy);

        let active = self.snapshot().active;
        self.send(!active).await?;

        let mut state = self.lock();
        state.active = !active;
        state.count = if state.active {
            state.count.saturating_add(1)
        } else {
            state.count.saturating_sub(1)
        };
        Ok(*state)
    }

    async fn send(&self, activate: bool) -> ClientResult<()> {
        match (self.reaction, activate) {
            (Reaction::Like, true) => self.client.likes().like(self.post_id).await,
            (Reaction::Like, false) => self.client.likes().unlike(self.post_id).await,
            (Reaction::Favorite, true) => self.client.favorites().favorite(self.post_id).await,
            (Reaction::Favorite, false) => self.client.favorites().unfavorite(self.post_id).await,
        }
    }

    async fn remote_count(&self) -> ClientResult<u64> {
        match self.reaction {
            Reaction::Like => self.client.likes().count(self.post_id).await,
            Reaction::Favorite => self.client.favorites().count(self.post_id).await,
        }
    }

    async fn remote_status(&self) -> ClientResult<bool> {
        match self.reaction {
            Reaction::Like => self.client.likes().status(self.post_id).await,
            Reaction::Favorite => self.client.favorites().status(self.post_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::ClientConfig;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn anonymous_client() -> BlogClient {
        BlogClient::with_store(
            ClientConfig::new("http://127.0.0.1:9/api"),
            Arc::new(MemoryStore::new()),
        )
        .expect("client must build")
    }

    #[tokio::test]
    async fn toggle_requires_login() {
        let toggle = ReactionToggle::with_state(
            anonymous_client(),
            Reaction::Like,
            1,
            ReactionSnapshot {
                active: false,
                count: 3,
            },
        );

        let err = toggle.toggle().await.expect_err("must require login");
        assert!(matches!(err, ClientError::LoginRequired));
        assert_eq!(toggle.snapshot().count, 3);
        assert!(!toggle.is_busy());
    }
}
