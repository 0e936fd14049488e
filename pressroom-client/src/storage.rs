//! Локальное хранилище ключ-значение для сессии и темы.
//!
//! Хранилище внедряется явно: `FileStore` для CLI, `MemoryStore` для тестов.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{ClientError, ClientResult};

/// Хранилище строковых значений по строковым ключам.
///
/// Блокировок между процессами нет: выигрывает последняя запись.
pub trait KeyValueStore: Send + Sync {
    /// Читает значение по ключу.
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    /// Записывает значение.
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    /// Удаляет значение. Отсутствующий ключ не считается ошибкой.
    fn remove(&self, key: &str) -> ClientResult<()>;
}

#[derive(Debug, Default)]
/// Хранилище в памяти процесса.
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Пустое хранилище.
    pub fn new() -> Self {
        Self::default()
    }

    /// Хранилище с заранее заданными значениями.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[derive(Debug)]
/// Хранилище в JSON-файле (объект `{ "key": "value" }`).
///
/// Файл перечитывается при каждом обращении: другой процесс мог его
/// перезаписать.
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    /// Хранилище в указанном файле. Файл создаётся при первой записи.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Путь к файлу.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ClientResult<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(storage_error(&self.path, err)),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|err| {
            ClientError::Storage(format!("{} is not a valid store: {err}", self.path.display()))
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> ClientResult<()> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|err| ClientError::Storage(format!("failed to serialize store: {err}")))?;
        fs::write(&self.path, raw).map_err(|err| storage_error(&self.path, err))
    }
}

fn storage_error(path: &Path, err: io::Error) -> ClientError {
    ClientError::Storage(format!("{}: {err}", path.display()))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let _guard = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let _guard = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let _guard = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system clock must be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("pressroom-{name}-{nanos}.json"))
    }

    #[test]
    fn memory_store_round_trip_and_remove() {
        let store = MemoryStore::with_entries([("token", "abc")]);
        assert_eq!(store.get("token").expect("get").as_deref(), Some("abc"));

        store.remove("token").expect("remove");
        store.remove("token").expect("second remove is not an error");
        assert!(store.get("token").expect("get").is_none());
    }

    #[test]
    fn file_store_missing_file_reads_as_empty() {
        let store = FileStore::new(temp_file("missing"));
        assert!(store.get("token").expect("get").is_none());
    }

    #[test]
    fn file_store_persists_between_instances() {
        let path = temp_file("persist");
        FileStore::new(&path).set("blog-theme", "dark").expect("set");

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("blog-theme").expect("get").as_deref(),
            Some("dark")
        );

        reopened.remove("blog-theme").expect("remove");
        assert!(FileStore::new(&path).get("blog-theme").expect("get").is_none());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn file_store_rejects_corrupted_file() {
        let path = temp_file("corrupt");
        fs::write(&path, "{not-json}").expect("write");

        let err = FileStore::new(&path).get("token").expect_err("must fail");
        assert!(matches!(err, ClientError::Storage(_)));
        let _ = fs::remove_file(path);
    }
}
