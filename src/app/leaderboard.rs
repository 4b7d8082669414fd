use crate::types::TopSearchItem;
use crate::utils::compute_pyramid_rows;

pub const LEADERBOARD_LIMIT: usize = 9;

/// Most-searched accounts widget. It stays hidden unless the fetch produced
/// at least one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Leaderboard {
    #[default]
    NotRequested,
    Loading,
    Loaded(Vec<TopSearchItem>),
    Unavailable,
}

impl Leaderboard {
    pub fn apply(&mut self, items: Option<Vec<TopSearchItem>>) {
        *self = match items {
            Some(items) if !items.is_empty() => Leaderboard::Loaded(items),
            _ => Leaderboard::Unavailable,
        };
    }

    /// Top and bottom chip rows, if there is anything to show
    pub fn rows(&self) -> Option<(&[TopSearchItem], &[TopSearchItem])> {
        match self {
            Leaderboard::Loaded(items) => Some(compute_pyramid_rows(items)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(name: &str, hit: u64) -> TopSearchItem {
        TopSearchItem {
            username: name.to_string(),
            hit,
            avatar_url: None,
            last_searched_at: None,
        }
    }

    #[test]
    fn test_failure_hides_widget() {
        let mut board = Leaderboard::Loading;
        board.apply(None);
        assert_eq!(board, Leaderboard::Unavailable);
        assert!(board.rows().is_none());

        board.apply(Some(vec![]));
        assert!(board.rows().is_none());
    }

    #[test]
    fn test_rows() {
        let mut board = Leaderboard::default();
        board.apply(Some((0..5).map(|i| item(&format!("user{}", i), 10 - i)).collect()));
        let (top, bottom) = board.rows().unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(bottom.len(), 2);
        assert_eq!(top[0].username, "user0");
        assert_eq!(bottom[1].username, "user4");
    }
}
