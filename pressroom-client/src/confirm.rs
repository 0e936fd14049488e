//! Подтверждение необратимых действий.

use std::future::Future;

use tracing::debug;

use crate::error::ClientResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Действие, требующее явного согласия пользователя.
pub enum DestructiveAction {
    /// Удаление поста.
    DeletePost,
    /// Удаление комментария.
    DeleteComment,
    /// Удаление черновика.
    DeleteDraft,
    /// Снятие из избранного.
    Unfavorite,
    /// Удаление категории.
    DeleteCategory,
}

impl DestructiveAction {
    /// Вопрос пользователю.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::DeletePost => "Delete this post? This cannot be undone.",
            Self::DeleteComment => "Delete this comment?",
            Self::DeleteDraft => "Delete this draft? This cannot be undone.",
            Self::Unfavorite => "Remove this post from favorites?",
            Self::DeleteCategory => "Delete this category?",
        }
    }
}

/// Источник ответа пользователя: диалог, терминал, флаг `--yes`.
pub trait Confirm {
    /// `true`, если пользователь согласился.
    fn confirm(&self, action: DestructiveAction) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
/// Соглашается без вопросов.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _action: DestructiveAction) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Всегда отказывает.
pub struct AssumeNo;

impl Confirm for AssumeNo {
    fn confirm(&self, _action: DestructiveAction) -> bool {
        false
    }
}

/// Выполняет запрос только после подтверждения.
///
/// При отказе запрос не отправляется и возвращается `Ok(None)`.
pub async fn confirm_then<C, F, T>(
    confirm: &C,
    action: DestructiveAction,
    request: F,
) -> ClientResult<Option<T>>
where
    C: Confirm + ?Sized,
    F: Future<Output = ClientResult<T>>,
{
    if !confirm.confirm(action) {
        debug!(?action, "destructive action declined");
        return Ok(None);
    }
    request.await.map(Some)
}
