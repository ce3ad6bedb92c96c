//! # Exchange History
//!
//! Past skill exchanges and the date/skill/rating filters over them.

use chrono::{Duration, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeStatus {
    Completed,
    Pending,
    Cancelled,
}

impl ExchangeStatus {
    pub fn label(self) -> &'static str {
        match self {
            ExchangeStatus::Completed => "Concluída",
            ExchangeStatus::Pending => "Pendente",
            ExchangeStatus::Cancelled => "Cancelada",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub date: NaiveDate,
    pub partner: String,
    pub skills: Vec<String>,
    pub status: ExchangeStatus,
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFilter {
    #[default]
    All,
    /// Last 30 days
    Month,
    /// Last 365 days
    Year,
}

impl DateFilter {
    pub fn next(self) -> Self {
        match self {
            DateFilter::All => DateFilter::Month,
            DateFilter::Month => DateFilter::Year,
            DateFilter::Year => DateFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DateFilter::All => "Todo o período",
            DateFilter::Month => "Último mês",
            DateFilter::Year => "Último ano",
        }
    }

    fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            DateFilter::All => None,
            DateFilter::Month => Some(today - Duration::days(30)),
            DateFilter::Year => Some(today - Duration::days(365)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingFilter {
    #[default]
    All,
    Five,
    FourPlus,
    ThreePlus,
}

impl RatingFilter {
    pub fn next(self) -> Self {
        match self {
            RatingFilter::All => RatingFilter::Five,
            RatingFilter::Five => RatingFilter::FourPlus,
            RatingFilter::FourPlus => RatingFilter::ThreePlus,
            RatingFilter::ThreePlus => RatingFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RatingFilter::All => "Todas",
            RatingFilter::Five => "5 estrelas",
            RatingFilter::FourPlus => "4+ estrelas",
            RatingFilter::ThreePlus => "3+ estrelas",
        }
    }

    /// Unrated exchanges only pass `All`.
    fn accepts(self, rating: Option<u8>) -> bool {
        match (self, rating) {
            (RatingFilter::All, _) => true,
            (_, None) => false,
            (RatingFilter::Five, Some(r)) => r == 5,
            (RatingFilter::FourPlus, Some(r)) => r >= 4,
            (RatingFilter::ThreePlus, Some(r)) => r >= 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub date: DateFilter,
    /// Case-insensitive substring; `None` means all skills.
    pub skill: Option<String>,
    pub rating: RatingFilter,
}

impl HistoryFilter {
    pub fn matches(&self, exchange: &Exchange, today: NaiveDate) -> bool {
        let date_ok = self
            .date
            .cutoff(today)
            .is_none_or(|cutoff| exchange.date > cutoff);

        let skill_ok = self.skill.as_deref().is_none_or(|needle| {
            let needle = needle.to_lowercase();
            exchange
                .skills
                .iter()
                .any(|s| s.to_lowercase().contains(&needle))
        });

        date_ok && skill_ok && self.rating.accepts(exchange.rating)
    }
}

pub fn filter_exchanges<'a>(
    exchanges: &'a [Exchange],
    filter: &HistoryFilter,
    today: NaiveDate,
) -> Vec<&'a Exchange> {
    exchanges
        .iter()
        .filter(|e| filter.matches(e, today))
        .collect()
}

/// Distinct skills in first-seen order, for cycling the skill filter.
pub fn known_skills(exchanges: &[Exchange]) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in exchanges.iter().flat_map(|e| e.skills.iter()) {
        if !skills.contains(skill) {
            skills.push(skill.clone());
        }
    }
    skills
}

/// Average rating across rated exchanges.
pub fn average_rating(exchanges: &[&Exchange]) -> Option<f32> {
    let ratings: Vec<u8> = exchanges.iter().filter_map(|e| e.rating).collect();
    if ratings.is_empty() {
        return None;
    }
    Some(ratings.iter().map(|&r| f32::from(r)).sum::<f32>() / ratings.len() as f32)
}
