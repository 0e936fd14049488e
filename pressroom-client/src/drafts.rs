use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::info;

use crate::BlogClient;
use crate::autosave::{DraftSaver, Snapshot};
use crate::error::ClientResult;
use crate::models::{Post, PostInput};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Содержимое редактора поста.
pub struct DraftForm {
    /// Заголовок.
    pub title: String,
    /// Markdown-текст.
    pub content: String,
    /// Краткое описание.
    pub summary: String,
    /// Обложка.
    pub cover_image: String,
    /// Категория.
    pub category_id: Option<i64>,
    /// Теги.
    pub tags: Vec<String>,
    /// Опубликовать при сохранении.
    pub published: bool,
}

impl DraftForm {
    /// Форма, заполненная из существующего поста.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            summary: post.summary.clone().unwrap_or_default(),
            cover_image: post.cover_image.clone().unwrap_or_default(),
            category_id: post.category_id,
            tags: post.tags.clone(),
            published: post.published,
        }
    }

    /// Данные запроса на создание/обновление.
    pub fn to_input(&self) -> PostInput {
        PostInput {
            title: self.title.clone(),
            content: self.content.clone(),
            summary: Some(self.summary.clone()),
            cover_image: Some(self.cover_image.clone()),
            category_id: self.category_id,
            published: self.published,
            tags: self.tags.clone(),
            change_note: None,
        }
    }
}

impl Snapshot for DraftForm {
    fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }
}

/// Сохраняет форму как пост-черновик.
///
/// Первое сохранение создаёт неопубликованный пост и запоминает его id,
/// следующие обновляют этот пост. Статус публикации автосохранение не меняет:
/// флаг формы игнорируется, отправляется статус поста на момент открытия.
#[derive(Debug)]
pub struct PostDraftSaver {
    client: BlogClient,
    draft_id: Mutex<Option<i64>>,
    published: bool,
}

impl PostDraftSaver {
    /// Новый черновик: id выдаст сервер при первом сохранении.
    pub fn new(client: BlogClient) -> Self {
        Self {
            client,
            draft_id: Mutex::new(None),
            published: false,
        }
    }

    /// Редактирование существующего поста.
    pub fn for_post(client: BlogClient, post: &Post) -> Self {
        Self {
            client,
            draft_id: Mutex::new(Some(post.id)),
            published: post.published,
        }
    }

    /// Id черновика, если он уже создан.
    pub fn draft_id(&self) -> Option<i64> {
        *self.draft_id.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DraftSaver<DraftForm> for PostDraftSaver {
    async fn save(&self, snapshot: &DraftForm) -> ClientResult<()> {
        let input = PostInput {
            published: self.published,
            ..snapshot.to_input()
        };

        match self.draft_id() {
            Some(id) => {
                self.client.posts().update(id, &input).await?;
            }
            None => {
                let post = self.client.posts().create(&input).await?;
                info!(post_id = post.id, "draft created");
                *self.draft_id.lock().unwrap_or_else(PoisonError::into_inner) = Some(post.id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_is_blank_without_title_and_content() {
        let form = DraftForm {
            title: "  ".to_string(),
            content: "\n".to_string(),
            summary: "summary only".to_string(),
            ..DraftForm::default()
        };
        assert!(form.is_blank());

        let form = DraftForm {
            content: "text".to_string(),
            ..DraftForm::default()
        };
        assert!(!form.is_blank());
    }

    #[test]
    fn form_converts_to_post_input() {
        let form = DraftForm {
            title: "t".to_string(),
            content: "c".to_string(),
            tags: vec!["rust".to_string()],
            ..DraftForm::default()
        };

        let input = form.to_input();
        assert_eq!(input.title, "t");
        assert_eq!(input.tags, vec!["rust"]);
        assert_eq!(input.summary.as_deref(), Some(""));
        assert!(!input.published);
    }
}
