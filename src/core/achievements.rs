//! # Achievements
//!
//! Badges earned on the platform, filtered by unlocked state, with an
//! optional open badge for the detail view.

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "Comum",
            Rarity::Rare => "Raro",
            Rarity::Epic => "Épico",
            Rarity::Legendary => "Lendário",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: u32,
    pub total: u32,
}

impl Progress {
    pub fn remaining(self) -> u32 {
        self.total.saturating_sub(self.current)
    }

    /// Completed fraction in `0.0..=1.0`.
    pub fn ratio(self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (f64::from(self.current) / f64::from(self.total)).min(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub rarity: Rarity,
    pub unlocked_on: Option<NaiveDate>,
    pub progress: Option<Progress>,
}

impl Badge {
    pub fn is_unlocked(&self) -> bool {
        self.unlocked_on.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeFilter {
    #[default]
    All,
    Unlocked,
    Locked,
}

impl BadgeFilter {
    pub const ALL: [BadgeFilter; 3] = [BadgeFilter::All, BadgeFilter::Unlocked, BadgeFilter::Locked];

    pub fn label(self) -> &'static str {
        match self {
            BadgeFilter::All => "Todos",
            BadgeFilter::Unlocked => "Desbloqueados",
            BadgeFilter::Locked => "Bloqueados",
        }
    }

    pub fn accepts(self, badge: &Badge) -> bool {
        match self {
            BadgeFilter::All => true,
            BadgeFilter::Unlocked => badge.is_unlocked(),
            BadgeFilter::Locked => !badge.is_unlocked(),
        }
    }
}

const MONTHS: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

/// `15 de setembro de 2023`
pub fn long_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{:02} de {} de {}", date.day(), month, date.year())
}

#[derive(Debug, Clone)]
pub struct AchievementBoard {
    badges: Vec<Badge>,
    pub filter: BadgeFilter,
    open: Option<String>,
}

impl AchievementBoard {
    pub fn new(badges: Vec<Badge>) -> Self {
        Self {
            badges,
            filter: BadgeFilter::default(),
            open: None,
        }
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn filtered(&self) -> impl Iterator<Item = &Badge> {
        self.badges.iter().filter(|b| self.filter.accepts(b))
    }

    pub fn unlocked_count(&self) -> usize {
        self.badges.iter().filter(|b| b.is_unlocked()).count()
    }

    /// Open the detail for `id`, or close it with `None`. Unknown ids close it.
    pub fn open(&mut self, id: Option<&str>) {
        self.open = id
            .filter(|id| self.badges.iter().any(|b| b.id == *id))
            .map(str::to_string);
    }

    pub fn opened(&self) -> Option<&Badge> {
        let id = self.open.as_deref()?;
        self.badges.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed;

    fn board() -> AchievementBoard {
        AchievementBoard::new(seed::badges())
    }

    #[test]
    fn filter_splits_unlocked_and_locked() {
        let mut board = board();
        assert_eq!(board.filtered().count(), 8);

        board.filter = BadgeFilter::Unlocked;
        assert!(board.filtered().all(Badge::is_unlocked));
        assert_eq!(board.filtered().count(), board.unlocked_count());

        board.filter = BadgeFilter::Locked;
        assert_eq!(board.filtered().count(), 8 - board.unlocked_count());
        assert!(board.filtered().all(|b| !b.is_unlocked()));
    }

    #[test]
    fn open_and_close_detail() {
        let mut board = board();
        board.open(Some("3"));
        assert_eq!(board.opened().map(|b| b.name.as_str()), Some("Mestre em React"));

        board.open(Some("missing"));
        assert!(board.opened().is_none());

        board.open(Some("1"));
        board.open(None);
        assert!(board.opened().is_none());
    }

    #[test]
    fn progress_math() {
        let progress = Progress { current: 8, total: 10 };
        assert_eq!(progress.remaining(), 2);
        assert!((progress.ratio() - 0.8).abs() < f64::EPSILON);
        assert_eq!(Progress { current: 0, total: 0 }.ratio(), 0.0);
    }

    #[test]
    fn long_date_in_portuguese() {
        let date = NaiveDate::from_ymd_opt(2023, 9, 5).unwrap();
        assert_eq!(long_date(date), "05 de setembro de 2023");
    }
}
