use crate::Card;
use chrono::{DateTime, Utc};

/// Cards presentable at `now`, most overdue first.
///
/// A card without a next-review time counts as due since the epoch, so it
/// sorts ahead of everything else. Ties keep collection order.
pub fn due_cards(cards: &[Card], now: DateTime<Utc>) -> Vec<Card> {
    let mut due: Vec<Card> = cards.iter().filter(|c| c.is_due(now)).cloned().collect();
    due.sort_by_key(|c| c.effective_next_review());
    due
}

pub fn count_due(cards: &[Card], now: DateTime<Utc>) -> usize {
    cards.iter().filter(|c| c.is_due(now)).count()
}
