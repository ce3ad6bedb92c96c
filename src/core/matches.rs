//! # Matches
//!
//! Skill-exchange matches grouped by status, plus suggested profiles.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStatus {
    #[default]
    New,
    InProgress,
    Completed,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 3] = [
        MatchStatus::New,
        MatchStatus::InProgress,
        MatchStatus::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MatchStatus::New => "Novos",
            MatchStatus::InProgress => "Em andamento",
            MatchStatus::Completed => "Concluídos",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: String,
    pub partner_name: String,
    pub your_skills: Vec<String>,
    pub partner_skills: Vec<String>,
    /// 0..=100
    pub compatibility: u8,
    pub status: MatchStatus,
    pub last_interaction: Option<String>,
    pub bio: Option<String>,
    pub shared_interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestedMatch {
    pub id: String,
    pub partner_name: String,
    pub your_missing_skills: Vec<String>,
    pub partner_missing_skills: Vec<String>,
    pub potential_compatibility: u8,
    pub mutual_connections: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatibilityBand {
    High,
    Medium,
    Low,
}

impl CompatibilityBand {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage > 80 {
            CompatibilityBand::High
        } else if percentage > 60 {
            CompatibilityBand::Medium
        } else {
            CompatibilityBand::Low
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchBoard {
    pub matches: Vec<Match>,
    pub suggestions: Vec<SuggestedMatch>,
    pub active_filter: MatchStatus,
    selected: Option<String>,
}

impl MatchBoard {
    pub fn new(matches: Vec<Match>, suggestions: Vec<SuggestedMatch>) -> Self {
        Self {
            matches,
            suggestions,
            active_filter: MatchStatus::default(),
            selected: None,
        }
    }

    pub fn filtered(&self) -> impl Iterator<Item = &Match> {
        self.matches
            .iter()
            .filter(move |m| m.status == self.active_filter)
    }

    pub fn set_filter(&mut self, status: MatchStatus) {
        self.active_filter = status;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select `id`, or clear the selection if `id` is already selected.
    pub fn toggle_selected(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.to_string());
        }
    }

    /// Filtered matches plus suggestions, as shown in the page footer.
    pub fn available_profiles(&self) -> usize {
        self.filtered().count() + self.suggestions.len()
    }
}

/// "1 match" / "3 matches".
pub fn match_count_label(count: usize) -> String {
    if count == 1 {
        format!("{count} match")
    } else {
        format!("{count} matches")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed;

    fn board() -> MatchBoard {
        MatchBoard::new(seed::matches(), seed::suggested_matches())
    }

    #[test]
    fn filter_by_status() {
        let mut board = board();
        let new: Vec<_> = board.filtered().map(|m| m.id.as_str()).collect();
        assert_eq!(new, vec!["1"]);

        board.set_filter(MatchStatus::InProgress);
        let in_progress: Vec<_> = board.filtered().map(|m| m.id.as_str()).collect();
        assert_eq!(in_progress, vec!["2"]);
    }

    #[test]
    fn toggle_selection() {
        let mut board = board();
        board.toggle_selected("1");
        assert_eq!(board.selected(), Some("1"));
        board.toggle_selected("2");
        assert_eq!(board.selected(), Some("2"));
        board.toggle_selected("2");
        assert_eq!(board.selected(), None);
    }

    #[test]
    fn compatibility_bands() {
        assert_eq!(CompatibilityBand::from_percentage(91), CompatibilityBand::High);
        assert_eq!(CompatibilityBand::from_percentage(80), CompatibilityBand::Medium);
        assert_eq!(CompatibilityBand::from_percentage(61), CompatibilityBand::Medium);
        assert_eq!(CompatibilityBand::from_percentage(60), CompatibilityBand::Low);
    }

    #[test]
    fn available_profiles_counts_suggestions() {
        assert_eq!(board().available_profiles(), 3);
    }

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(match_count_label(1), "1 match");
        assert_eq!(match_count_label(0), "0 matches");
    }
}
