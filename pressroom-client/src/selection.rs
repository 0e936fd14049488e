use crate::navigation::Route;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Выбор двух версий поста для сравнения.
///
/// Хранит не больше двух номеров; третий вытесняет выбранный раньше всех.
pub struct CompareSelection {
    selected: Vec<u32>,
}

impl CompareSelection {
    /// Пустой выбор.
    pub fn new() -> Self {
        Self::default()
    }

    /// Отмечает версию; повторный выбор снимает отметку.
    pub fn toggle(&mut self, version: u32) {
        if let Some(index) = self.selected.iter().position(|v| *v == version) {
            self.selected.remove(index);
            return;
        }
        if self.selected.len() == 2 {
            self.selected.remove(0);
        }
        self.selected.push(version);
    }

    /// Выбранные версии в порядке выбора.
    pub fn selected(&self) -> &[u32] {
        &self.selected
    }

    /// Отмечена ли версия.
    pub fn contains(&self, version: u32) -> bool {
        self.selected.contains(&version)
    }

    /// Пара для сравнения, когда выбраны обе версии.
    pub fn pair(&self) -> Option<(u32, u32)> {
        match self.selected.as_slice() {
            [v1, v2] => Some((*v1, *v2)),
            _ => None,
        }
    }

    /// Экран сравнения для выбранной пары.
    pub fn compare_route(&self, post_id: i64) -> Option<Route> {
        self.pair()
            .map(|(v1, v2)| Route::VersionCompare { post_id, v1, v2 })
    }

    /// Сбрасывает выбор.
    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_selection_evicts_the_oldest() {
        let mut selection = CompareSelection::new();
        for version in [1, 2, 3] {
            selection.toggle(version);
        }
        assert_eq!(selection.selected(), &[2, 3]);
        assert_eq!(selection.pair(), Some((2, 3)));
    }

    #[test]
    fn reselecting_deselects() {
        let mut selection = CompareSelection::new();
        selection.toggle(4);
        selection.toggle(5);
        selection.toggle(4);

        assert_eq!(selection.selected(), &[5]);
        assert_eq!(selection.pair(), None);
        assert!(selection.compare_route(9).is_none());
    }

    #[test]
    fn full_pair_builds_compare_route() {
        let mut selection = CompareSelection::new();
        selection.toggle(3);
        selection.toggle(1);

        assert_eq!(
            selection.compare_route(7),
            Some(Route::VersionCompare {
                post_id: 7,
                v1: 3,
                v2: 1
            })
        );

        selection.clear();
        assert!(selection.selected().is_empty());
    }
}
