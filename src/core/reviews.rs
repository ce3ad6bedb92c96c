//! # Reviews
//!
//! Reviews left on a public profile: sorting, likes and owner replies.

use chrono::NaiveDate;
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewSort {
    #[default]
    Recent,
    Relevant,
    Highest,
    Lowest,
}

impl ReviewSort {
    pub fn next(self) -> Self {
        match self {
            ReviewSort::Recent => ReviewSort::Relevant,
            ReviewSort::Relevant => ReviewSort::Highest,
            ReviewSort::Highest => ReviewSort::Lowest,
            ReviewSort::Lowest => ReviewSort::Recent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReviewSort::Recent => "Mais recentes",
            ReviewSort::Relevant => "Mais relevantes",
            ReviewSort::Highest => "Maior nota",
            ReviewSort::Lowest => "Menor nota",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub id: String,
    pub author: String,
    pub comment: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: String,
    pub author: String,
    pub role: String,
    /// 0.0..=5.0, half steps allowed
    pub rating: f32,
    pub comment: String,
    pub date: NaiveDate,
    pub likes: u32,
    pub liked: bool,
    pub replies: Vec<Reply>,
}

impl Review {
    /// Likes plus replies.
    pub fn relevance(&self) -> u32 {
        self.likes + self.replies.len() as u32
    }
}

/// Sort `reviews` in place. Stable, so ties keep seed order.
pub fn sort_reviews(reviews: &mut [Review], sort: ReviewSort) {
    match sort {
        ReviewSort::Recent => reviews.sort_by_key(|r| Reverse(r.date)),
        ReviewSort::Relevant => reviews.sort_by_key(|r| Reverse(r.relevance())),
        ReviewSort::Highest => reviews.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        ReviewSort::Lowest => reviews.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
    }
}

/// Number of (full, half, empty) stars for a 5-star display.
pub fn star_breakdown(rating: f32) -> (u8, u8, u8) {
    let rating = rating.clamp(0.0, 5.0);
    let full = rating.floor() as u8;
    let half = u8::from(rating.fract() >= 0.5);
    (full, half, 5 - full - half)
}

#[derive(Debug, Clone, Default)]
pub struct ReviewBoard {
    reviews: Vec<Review>,
    pub sort: ReviewSort,
}

impl ReviewBoard {
    pub fn new(reviews: Vec<Review>) -> Self {
        let mut board = Self {
            reviews,
            sort: ReviewSort::default(),
        };
        sort_reviews(&mut board.reviews, board.sort);
        board
    }

    /// Reviews in the current sort order.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn set_sort(&mut self, sort: ReviewSort) {
        self.sort = sort;
        sort_reviews(&mut self.reviews, sort);
    }

    pub fn average_rating(&self) -> Option<f32> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: f32 = self.reviews.iter().map(|r| r.rating).sum();
        Some(total / self.reviews.len() as f32)
    }

    /// Flip the like on `id`. Returns the new like count.
    pub fn toggle_like(&mut self, id: &str) -> Option<u32> {
        let review = self.reviews.iter_mut().find(|r| r.id == id)?;
        if review.liked {
            review.likes = review.likes.saturating_sub(1);
        } else {
            review.likes += 1;
        }
        review.liked = !review.liked;
        Some(review.likes)
    }

    /// Append an owner reply. Whitespace-only text is rejected.
    pub fn submit_reply(&mut self, id: &str, author: &str, text: &str, today: NaiveDate) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let Some(review) = self.reviews.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        let reply_id = format!("{}-{}", review.id, review.replies.len() + 1);
        review.replies.push(Reply {
            id: reply_id,
            author: author.to_string(),
            comment: text.to_string(),
            date: today,
        });
        true
    }
}
