use crate::{Card, IntervalUnit, Rating, EASE_MIN, INTERVAL_MIN};
use chrono::{DateTime, Utc};

const HARD_FACTOR: f64 = 1.2;
const GOOD_FACTOR: f64 = 2.0;
const EASY_FACTOR: f64 = 2.5;

const AGAIN_EASE_PENALTY: f64 = 0.2;
const HARD_EASE_PENALTY: f64 = 0.05;
const EASY_EASE_BONUS: f64 = 0.15;

fn floor_ease(x: f64) -> f64 {
    x.max(EASE_MIN)
}

// Half away from zero, then the floor of one unit.
fn grow(interval: u32, factor: f64) -> u32 {
    let next = (interval as f64 * factor).round();
    if next >= u32::MAX as f64 {
        u32::MAX
    } else {
        (next as u32).max(INTERVAL_MIN)
    }
}

/// Computes the state of `card` after it was rated `rating` at `now`.
///
/// Total over every rating; the input card is never touched and the caller
/// persists the returned value.
pub fn schedule(card: &Card, rating: Rating, now: DateTime<Utc>, unit: IntervalUnit) -> Card {
    let (interval, ease, lapses) = match rating {
        Rating::Again => (
            INTERVAL_MIN,
            floor_ease(card.ease - AGAIN_EASE_PENALTY),
            card.lapses.saturating_add(1),
        ),
        Rating::Hard => (
            grow(card.interval, HARD_FACTOR),
            floor_ease(card.ease - HARD_EASE_PENALTY),
            card.lapses,
        ),
        Rating::Good => (grow(card.interval, GOOD_FACTOR), card.ease, card.lapses),
        Rating::Easy => (
            grow(card.interval, EASY_FACTOR),
            card.ease + EASY_EASE_BONUS,
            card.lapses,
        ),
    };

    Card {
        interval,
        ease,
        lapses,
        last_reviewed: Some(now),
        next_review: Some(
            now.checked_add_signed(unit.span(interval))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        ),
        ..card.clone()
    }
}
