use recall_core::{CollectionStats, IntervalUnit};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct NewCardIn {
    pub question: String,
    pub answer: String,
}

#[derive(Deserialize)]
pub struct ReviewIn {
    pub card_id: String,
    pub rating: String,
}

#[derive(Serialize)]
pub struct StatsOut {
    pub total: usize,
    pub due_now: usize,
    pub never_reviewed: usize,
    pub total_lapses: u64,
    pub mean_ease: Option<f64>,
    pub unit: IntervalUnit,
}

impl StatsOut {
    pub fn new(s: CollectionStats, unit: IntervalUnit) -> Self {
        Self {
            total: s.total,
            due_now: s.due_now,
            never_reviewed: s.never_reviewed,
            total_lapses: s.total_lapses,
            mean_ease: s.mean_ease,
            unit,
        }
    }
}
