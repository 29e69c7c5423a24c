use crate::{schedule, Card, CardId, CoreError, IntervalUnit, Rating, EASE_MIN, INTERVAL_MIN};
use chrono::{DateTime, Utc};

pub fn new_card(question: &str, answer: &str, now: DateTime<Utc>) -> Result<Card, CoreError> {
    let question = question.trim();
    let answer = answer.trim();
    if question.is_empty() || answer.is_empty() {
        return Err(CoreError::Invalid("question and answer are both required"));
    }
    Ok(Card::new(question, answer, now))
}

/// Newest cards go first.
pub fn insert_card(cards: &mut Vec<Card>, card: Card) {
    cards.insert(0, card);
}

pub fn replace_card(cards: &mut [Card], updated: Card) -> Result<(), CoreError> {
    let slot = cards
        .iter_mut()
        .find(|c| c.id == updated.id)
        .ok_or(CoreError::NotFound("card"))?;
    *slot = updated;
    Ok(())
}

/// Looks a card up by its full id or by a prefix matching exactly one card.
pub fn find_card<'a>(cards: &'a [Card], selector: &str) -> Result<&'a Card, CoreError> {
    let sel = selector.trim();
    if sel.is_empty() {
        return Err(CoreError::Invalid("empty card id"));
    }
    if let Some(c) = cards.iter().find(|c| c.id == sel) {
        return Ok(c);
    }
    let mut hits = cards.iter().filter(|c| c.id.starts_with(sel));
    match (hits.next(), hits.next()) {
        (Some(c), None) => Ok(c),
        (Some(_), Some(_)) => Err(CoreError::Invalid("ambiguous card id prefix")),
        (None, _) => Err(CoreError::NotFound("card")),
    }
}

/// Rates one card in place and returns its new state.
pub fn review_card(
    cards: &mut [Card],
    id: &CardId,
    rating: Rating,
    now: DateTime<Utc>,
    unit: IntervalUnit,
) -> Result<Card, CoreError> {
    let slot = cards
        .iter_mut()
        .find(|c| &c.id == id)
        .ok_or(CoreError::NotFound("card"))?;
    let updated = schedule(slot, rating, now, unit);
    *slot = updated.clone();
    Ok(updated)
}

pub fn reset(cards: &mut Vec<Card>) {
    cards.clear();
}

/// Pulls a card loaded from storage back inside the ease and interval floors.
pub fn repair_card(card: &mut Card) -> bool {
    let mut changed = false;
    if !card.ease.is_finite() || card.ease < EASE_MIN {
        card.ease = EASE_MIN;
        changed = true;
    }
    if card.interval < INTERVAL_MIN {
        card.interval = INTERVAL_MIN;
        changed = true;
    }
    changed
}

/// Repairs every card in a freshly loaded collection, returning how many changed.
pub fn repair_all(cards: &mut [Card]) -> usize {
    let mut repaired = 0;
    for card in cards.iter_mut() {
        if repair_card(card) {
            tracing::warn!(card = %card.id, "repaired card outside ease/interval floors");
            repaired += 1;
        }
    }
    repaired
}
