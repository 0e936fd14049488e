use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::error::{ClientError, ClientResult};
use crate::http_client::HttpClient;
use crate::models::UploadedFile;

/// Максимальный размер загружаемого изображения, как на сервере.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_IMAGES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
];

fn image_mime(filename: &str) -> Option<&'static str> {
    let extension = Path::new(filename)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    ALLOWED_IMAGES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

fn upload_error(message: String) -> ClientError {
    ClientError::Validation {
        message: message.clone(),
        fields: [("file".to_string(), message)].into(),
    }
}

#[derive(Debug, Clone, Copy)]
/// Загрузка изображений (обложки, картинки в markdown).
pub struct FileService<'a> {
    http: &'a HttpClient,
}

impl<'a> FileService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Загружает изображение полем `file` и возвращает его публичный путь.
    ///
    /// Расширение и размер проверяются до отправки.
    pub async fn upload_image(&self, filename: &str, bytes: Vec<u8>) -> ClientResult<UploadedFile> {
        let mime = image_mime(filename).ok_or_else(|| {
            upload_error(format!(
                "unsupported image type: {filename} (allowed: jpg, jpeg, png, gif, webp, bmp)"
            ))
        })?;
        if bytes.is_empty() {
            return Err(upload_error("file is empty".to_string()));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(upload_error(format!(
                "file is too large: {} bytes, limit is {MAX_UPLOAD_BYTES}",
                bytes.len()
            )));
        }

        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime)
            .map_err(|err| ClientError::InvalidRequest(format!("invalid mime type: {err}")))?;
        let form = Form::new().part("file", part);

        self.http.send_multipart("/files/upload", form).await
    }
}
