//! Тонкие обёртки над REST-ресурсами. Локального состояния и кэша нет.

mod archives;
mod auth;
mod categories;
mod comments;
mod favorites;
mod files;
mod likes;
mod posts;
mod rss;
mod tags;
mod users;
mod versions;

pub use archives::ArchiveService;
pub use auth::AuthService;
pub use categories::CategoryService;
pub use comments::CommentService;
pub use favorites::FavoriteService;
pub use files::{FileService, MAX_UPLOAD_BYTES};
pub use likes::LikeService;
pub use posts::PostService;
pub use rss::RssService;
pub use tags::TagService;
pub use users::UserService;
pub use versions::VersionService;

use validator::Validate;

use crate::error::{ClientError, ClientResult};

pub(crate) fn validate<T: Validate>(payload: &T) -> ClientResult<()> {
    payload.validate().map_err(ClientError::from_validation)
}
