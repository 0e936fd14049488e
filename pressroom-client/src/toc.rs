//! Оглавление markdown-документа.

use std::sync::LazyLock;

use regex::Regex;

/// Порог (в пикселях от верха окна), выше которого заголовок считается активным.
pub const ACTIVE_HEADING_OFFSET: f64 = 100.0;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6})\s+(.+)$").expect("heading pattern is valid"));

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_\x{4E00}-\x{9FA5}]+").expect("anchor pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
/// Пункт оглавления.
pub struct Heading {
    /// Уровень, 1-6.
    pub level: u8,
    /// Текст заголовка.
    pub text: String,
    /// Якорь.
    pub id: String,
}

/// Заголовки документа в порядке появления.
///
/// Одинаковые заголовки получают одинаковые якоря.
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    HEADING
        .captures_iter(markdown)
        .map(|caps| {
            let text = caps[2].trim().to_string();
            Heading {
                level: caps[1].len() as u8,
                id: heading_id(&text),
                text,
            }
        })
        .collect()
}

/// Якорь заголовка.
pub fn heading_id(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_WORD
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Индекс активного заголовка: последний, чей верх не ниже `threshold`.
///
/// `offsets`: верхние координаты заголовков относительно окна, в порядке
/// документа. Вызывается на каждое событие прокрутки.
pub fn active_heading(offsets: &[f64], threshold: f64) -> Option<usize> {
    offsets
        .iter()
        .enumerate()
        .filter(|(_, top)| **top <= threshold)
        .map(|(index, _)| index)
        .last()
}
