//! Автосохранение черновика с дебаунсом.
//!
//! Состояния координатора:
//!
//! ```text
//! Idle --observe(изменение)--> Pending --таймер истёк--> Saving --> Idle
//!               Pending --observe(изменение)--> Pending (таймер заново)
//! ```
//!
//! Изменение определяется сравнением с последним наблюдавшимся снимком.
//! Неудачное сохранение возвращает координатор в `Idle`, не трогая маркеры:
//! повторный тот же снимок не вызовет сохранения, а настоящая правка вызовет.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::ClientResult;

/// Задержка автосохранения по умолчанию.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_secs(30);

/// Снимок данных формы, за которым следит координатор.
pub trait Snapshot: Clone + PartialEq + Send + Sync + 'static {
    /// Пустой снимок никогда не сохраняется.
    fn is_blank(&self) -> bool;
}

#[async_trait]
/// Функция сохранения снимка.
///
/// Координатор не знает об идентичности сущности: если её ещё нет,
/// реализация сама выдаёт её при первом сохранении и использует дальше.
pub trait DraftSaver<T>: Send + Sync + 'static {
    /// Сохраняет снимок.
    async fn save(&self, snapshot: &T) -> ClientResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Состояние координатора.
pub enum AutoSaveStatus {
    /// Нечего сохранять.
    Idle,
    /// Таймер взведён.
    Pending,
    /// Идёт сохранение.
    Saving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Итог ручного сохранения.
pub enum SaveOutcome {
    /// Снимок сохранён.
    Saved,
    /// Снимок пустой, сохранение пропущено.
    SkippedBlank,
}

struct State<T> {
    observed: T,
    saved: T,
    pending: Option<JoinHandle<()>>,
    generation: u64,
    saving: bool,
    last_saved_at: Option<DateTime<Utc>>,
}

impl<T> State<T> {
    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }
}

struct Inner<T, S> {
    saver: S,
    delay: Duration,
    state: Mutex<State<T>>,
    // Одно сохранение в полёте.
    gate: tokio::sync::Mutex<()>,
}

impl<T, S> Inner<T, S>
where
    T: Snapshot,
    S: DraftSaver<T>,
{
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn fire(self: Arc<Self>, generation: u64) {
        let snapshot = {
            let mut state = self.lock();
            if state.generation != generation {
                return;
            }
            // Дальше задачу никто не отменит: сохранение доводится до конца.
            state.pending = None;
            state.observed.clone()
        };

        if let Err(err) = self.run_save(snapshot).await {
            error!(error = %err, "auto-save failed");
        }
    }

    async fn run_save(&self, snapshot: T) -> ClientResult<SaveOutcome> {
        if snapshot.is_blank() {
            debug!("blank snapshot, skipping save");
            return Ok(SaveOutcome::SkippedBlank);
        }

        let _gate = self.gate.lock().await;
        self.lock().saving = true;

        let result = self.saver.save(&snapshot).await;

        let mut state = self.lock();
        state.saving = false;
        match result {
            Ok(()) => {
                let now = Utc::now();
                state.saved = snapshot;
                state.last_saved_at = Some(now);
                info!(saved_at = %now, "draft saved");
                Ok(SaveOutcome::Saved)
            }
            Err(err) => Err(err),
        }
    }
}

/// Координатор автосохранения.
///
/// Владеет задачей таймера; при уничтожении координатора взведённый таймер
/// отменяется. Требует рантайм `tokio`.
pub struct AutoSave<T, S>
where
    T: Snapshot,
    S: DraftSaver<T>,
{
    inner: Arc<Inner<T, S>>,
}

impl<T, S> fmt::Debug for AutoSave<T, S>
where
    T: Snapshot,
    S: DraftSaver<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoSave")
            .field("delay", &self.inner.delay)
            .field("status", &self.status())
            .field("last_saved_at", &self.last_saved_at())
            .finish()
    }
}

impl<T, S> AutoSave<T, S>
where
    T: Snapshot,
    S: DraftSaver<T>,
{
    /// Создаёт координатор. `initial` считается уже сохранённым.
    pub fn new(saver: S, initial: T, delay: Duration) -> Self {
        let state = State {
            observed: initial.clone(),
            saved: initial,
            pending: None,
            generation: 0,
            saving: false,
            last_saved_at: None,
        };
        Self {
            inner: Arc::new(Inner {
                saver,
                delay,
                state: Mutex::new(state),
                gate: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Сообщает текущий снимок формы; вызывается на каждую перерисовку.
    pub fn observe(&self, snapshot: T) {
        let mut state = self.inner.lock();
        if snapshot == state.observed {
            return;
        }

        state.observed = snapshot.clone();
        state.cancel_pending();
        if snapshot == state.saved || snapshot.is_blank() {
            return;
        }

        let generation = state.generation;
        let inner = Arc::clone(&self.inner);
        let delay = inner.delay;
        state.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            inner.fire(generation).await;
        }));
        debug!(?delay, "auto-save armed");
    }

    /// Немедленно сохраняет последний снимок, отменяя взведённый таймер.
    ///
    /// Ошибка возвращается вызывающему.
    pub async fn flush(&self) -> ClientResult<SaveOutcome> {
        let snapshot = {
            let mut state = self.inner.lock();
            state.cancel_pending();
            state.observed.clone()
        };

        let result = self.inner.run_save(snapshot).await;
        if let Err(err) = &result {
            error!(error = %err, "manual save failed");
        }
        result
    }

    /// Отменяет взведённый таймер.
    pub fn cancel(&self) {
        self.inner.lock().cancel_pending();
    }

    /// Текущее состояние.
    pub fn status(&self) -> AutoSaveStatus {
        let state = self.inner.lock();
        if state.saving {
            AutoSaveStatus::Saving
        } else if state.pending.is_some() {
            AutoSaveStatus::Pending
        } else {
            AutoSaveStatus::Idle
        }
    }

    /// Идёт ли сохранение.
    pub fn is_saving(&self) -> bool {
        self.status() == AutoSaveStatus::Saving
    }

    /// Время последнего успешного сохранения.
    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.inner.lock().last_saved_at
    }

    /// Задержка дебаунса.
    pub fn delay(&self) -> Duration {
        self.inner.delay
    }

    /// Функция сохранения.
    pub fn saver(&self) -> &S {
        &self.inner.saver
    }
}

impl<T, S> Drop for AutoSave<T, S>
where
    T: Snapshot,
    S: DraftSaver<T>,
{
    fn drop(&mut self) {
        self.cancel();
    }
}
