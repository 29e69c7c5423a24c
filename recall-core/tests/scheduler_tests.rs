use chrono::{DateTime, Utc};
use recall_core::{schedule, Card, IntervalUnit, Rating, EASE_DEFAULT, EASE_MIN};

fn at(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap()
}

fn fresh() -> Card {
    Card::new("hola", "hello", at(0))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn good_on_new_card_in_minutes() {
    let c = schedule(&fresh(), Rating::Good, at(0), IntervalUnit::Minutes);

    assert_eq!(c.interval, 2);
    assert!(close(c.ease, 2.5));
    assert_eq!(c.lapses, 0);
    assert_eq!(c.last_reviewed, Some(at(0)));
    assert_eq!(c.next_review, Some(at(120_000)));
}

#[test]
fn again_on_new_card_in_minutes() {
    let c = schedule(&fresh(), Rating::Again, at(0), IntervalUnit::Minutes);

    assert_eq!(c.interval, 1);
    assert!(close(c.ease, 2.3));
    assert_eq!(c.lapses, 1);
    assert_eq!(c.next_review, Some(at(60_000)));
}

#[test]
fn again_resets_any_interval() {
    let mut card = fresh();
    card.interval = 240;
    card.ease = 3.1;
    card.lapses = 4;

    let c = schedule(&card, Rating::Again, at(10), IntervalUnit::Days);
    assert_eq!(c.interval, 1);
    assert_eq!(c.lapses, 5);
    assert!(close(c.ease, 2.9));
}

#[test]
fn hard_holds_ease_floor() {
    let mut card = fresh();
    card.ease = EASE_MIN;

    let c = schedule(&card, Rating::Hard, at(0), IntervalUnit::Days);
    assert_eq!(c.ease, EASE_MIN);
}

#[test]
fn again_holds_ease_floor() {
    let mut card = fresh();
    card.ease = 1.4;

    let c = schedule(&card, Rating::Again, at(0), IntervalUnit::Days);
    assert_eq!(c.ease, EASE_MIN);
}

#[test]
fn hard_grows_slowly() {
    let mut card = fresh();
    assert_eq!(schedule(&card, Rating::Hard, at(0), IntervalUnit::Days).interval, 1);

    card.interval = 3;
    let c = schedule(&card, Rating::Hard, at(0), IntervalUnit::Days);
    assert_eq!(c.interval, 4);
    assert!(close(c.ease, EASE_DEFAULT - 0.05));
    assert_eq!(c.lapses, 0);
}

#[test]
fn easy_rounds_half_away_from_zero() {
    let c1 = schedule(&fresh(), Rating::Easy, at(0), IntervalUnit::Days);
    assert_eq!(c1.interval, 3);
    assert!(close(c1.ease, 2.65));

    let c2 = schedule(&c1, Rating::Easy, at(0), IntervalUnit::Days);
    assert_eq!(c2.interval, 8);
    assert!(close(c2.ease, 2.8));
}

#[test]
fn easy_beats_good() {
    let mut card = fresh();
    for interval in 1..50 {
        card.interval = interval;
        let good = schedule(&card, Rating::Good, at(0), IntervalUnit::Days);
        let easy = schedule(&card, Rating::Easy, at(0), IntervalUnit::Days);
        assert!(easy.interval > good.interval, "interval {interval}");
        assert!(easy.ease > card.ease);
    }
}

#[test]
fn floors_hold_for_every_rating() {
    let eases = [EASE_MIN, 1.35, 1.5, 2.5, 4.0];
    for interval in [1u32, 2, 3, 7, 50, 365] {
        for ease in eases {
            let mut card = fresh();
            card.interval = interval;
            card.ease = ease;
            for rating in Rating::ALL {
                let c = schedule(&card, rating, at(0), IntervalUnit::Days);
                assert!(c.ease >= EASE_MIN, "{rating} from ease {ease}");
                assert!(c.interval >= 1, "{rating} from interval {interval}");
            }
        }
    }
}

#[test]
fn next_review_follows_interval_and_unit() {
    let now = at(1_700_000_000_000);
    for unit in [IntervalUnit::Minutes, IntervalUnit::Days] {
        let mut card = fresh();
        for rating in [Rating::Good, Rating::Easy, Rating::Hard, Rating::Again, Rating::Good] {
            card = schedule(&card, rating, now, unit);
            let last = card.last_reviewed.unwrap();
            let expected = last.timestamp_millis() + card.interval as i64 * unit.millis();
            assert_eq!(card.next_review.unwrap().timestamp_millis(), expected);
        }
    }
}

#[test]
fn payload_and_identity_pass_through() {
    let card = fresh();
    let c = schedule(&card, Rating::Good, at(5_000), IntervalUnit::Days);

    assert_eq!(c.id, card.id);
    assert_eq!(c.question, card.question);
    assert_eq!(c.answer, card.answer);
    assert_eq!(c.created, card.created);
    // input is left as it was
    assert_eq!(card.interval, 1);
    assert_eq!(card.last_reviewed, None);
}

#[test]
fn unit_from_flag() {
    assert_eq!(IntervalUnit::from_minutes_flag(true), IntervalUnit::Minutes);
    assert_eq!(IntervalUnit::from_minutes_flag(false), IntervalUnit::Days);
    assert_eq!(IntervalUnit::Days.millis(), 86_400_000);
}

#[test]
fn ratings_parse_from_keys_and_words() {
    assert_eq!("1".parse::<Rating>().unwrap(), Rating::Again);
    assert_eq!("Hard".parse::<Rating>().unwrap(), Rating::Hard);
    assert_eq!(" g ".parse::<Rating>().unwrap(), Rating::Good);
    assert_eq!("EASY".parse::<Rating>().unwrap(), Rating::Easy);
    assert!("5".parse::<Rating>().is_err());
    assert_eq!(Rating::Easy.as_score(), 3);
}
