use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::storage::KeyValueStore;

pub(crate) const THEME_KEY: &str = "blog-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Светлая или тёмная тема.
pub enum Theme {
    /// Светлая (по умолчанию).
    #[default]
    Light,
    /// Тёмная.
    Dark,
}

impl Theme {
    /// Значение атрибута `data-theme`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Противоположная тема.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

#[derive(Clone)]
/// Глобальный флаг темы, сохраняемый в локальном хранилище.
pub struct ThemeContext {
    store: Arc<dyn KeyValueStore>,
    state: Arc<watch::Sender<Theme>>,
}

impl fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeContext")
            .field("theme", &*self.state.borrow())
            .finish()
    }
}

impl ThemeContext {
    /// Читает сохранённую тему; неизвестное значение даёт светлую.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let theme = match store.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!(error = %err, "failed to read theme");
                Theme::default()
            }
        };
        let (state, _) = watch::channel(theme);
        Self {
            store,
            state: Arc::new(state),
        }
    }

    /// Текущая тема.
    pub fn theme(&self) -> Theme {
        *self.state.borrow()
    }

    /// Включена ли тёмная тема.
    pub fn is_dark(&self) -> bool {
        self.theme() == Theme::Dark
    }

    /// Значение для атрибута `data-theme` документа.
    pub fn data_theme(&self) -> &'static str {
        self.theme().as_str()
    }

    /// Устанавливает и сохраняет тему.
    pub fn set(&self, theme: Theme) {
        if let Err(err) = self.store.set(THEME_KEY, theme.as_str()) {
            warn!(error = %err, "failed to persist theme");
        }
        self.state.send_replace(theme);
    }

    /// Переключает тему и возвращает новую.
    pub fn toggle(&self) -> Theme {
        let next = self.theme().toggled();
        self.set(next);
        next
    }

    /// Подписка на смену темы.
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn defaults_to_light_for_missing_or_unknown_value() {
        let empty = ThemeContext::load(Arc::new(MemoryStore::new()));
        assert_eq!(empty.theme(), Theme::Light);

        let garbage = ThemeContext::load(Arc::new(MemoryStore::with_entries([(
            THEME_KEY, "sepia",
        )])));
        assert_eq!(garbage.theme(), Theme::Light);
    }

    #[test]
    fn toggle_persists_and_notifies() {
        let store = Arc::new(MemoryStore::new());
        let theme = ThemeContext::load(store.clone());
        let mut watcher = theme.subscribe();

        assert_eq!(theme.toggle(), Theme::Dark);
        assert!(theme.is_dark());
        assert_eq!(theme.data_theme(), "dark");
        assert_eq!(store.get(THEME_KEY).expect("get").as_deref(), Some("dark"));
        assert!(watcher.has_changed().expect("sender alive"));
        assert_eq!(*watcher.borrow_and_update(), Theme::Dark);

        assert_eq!(theme.toggle(), Theme::Light);
    }
}
