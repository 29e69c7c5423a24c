use crate::{count_due, Card};
use chrono::{DateTime, Utc};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectionStats {
    pub total: usize,
    pub due_now: usize,
    pub never_reviewed: usize,
    pub total_lapses: u64,
    pub mean_ease: Option<f64>,
}

pub fn summarize(cards: &[Card], now: DateTime<Utc>) -> CollectionStats {
    let total = cards.len();
    let mean_ease = if total == 0 {
        None
    } else {
        Some(cards.iter().map(|c| c.ease).sum::<f64>() / total as f64)
    };
    CollectionStats {
        total,
        due_now: count_due(cards, now),
        never_reviewed: cards.iter().filter(|c| c.is_new()).count(),
        total_lapses: cards.iter().map(|c| c.lapses as u64).sum(),
        mean_ease,
    }
}
