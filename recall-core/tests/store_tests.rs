use chrono::{DateTime, Utc};
use recall_core::{Card, CollectionStore, MemoryStore, DEFAULT_COLLECTION};

fn at(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap()
}

#[tokio::test]
async fn memory_store_round_trip() {
    let store = MemoryStore::new();
    assert_eq!(store.collection(), DEFAULT_COLLECTION);
    assert!(store.load().await.unwrap().is_empty());

    let cards = vec![Card::new("q", "a", at(7))];
    store.save(&cards).await.unwrap();
    assert_eq!(store.load().await.unwrap(), cards);

    store.save(&[]).await.unwrap();
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn memory_store_keys_are_isolated() {
    let a = MemoryStore::with_key("a");
    let b = a.sibling("b");
    a.save(&[Card::new("q", "a", at(0))]).await.unwrap();

    assert_eq!(a.load().await.unwrap().len(), 1);
    assert!(b.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn memory_store_repairs_on_load() {
    let store = MemoryStore::new();
    let mut bad = Card::new("q", "a", at(0));
    bad.ease = 1.0;
    store.save(&[bad]).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded[0].ease, recall_core::EASE_MIN);
}

#[test]
fn serialized_form_uses_camel_case_millis() {
    let mut card = Card::new("q", "a", at(1_000));
    card.id = "k1".into();
    let v = serde_json::to_value(&card).unwrap();

    assert_eq!(v["created"], 1_000);
    assert_eq!(v["nextReview"], 1_000);
    assert!(v["lastReviewed"].is_null());
    assert_eq!(v["ease"], 2.5);
}

#[test]
fn reads_blob_written_by_browser_build() {
    let raw = r#"[
        {"id":"lq2x9a","question":"2+2","answer":"4","created":1700000000000,
         "lastReviewed":null,"interval":1,"ease":2.5,"lapses":0,"nextReview":1700000000000},
        {"id":"lq2x9b","question":"capital of France","answer":"Paris","created":1700000000000,
         "lastReviewed":1700000600000,"interval":3,"ease":2.65,"lapses":1}
    ]"#;
    let cards: Vec<Card> = serde_json::from_str(raw).unwrap();

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].next_review, Some(at(1_700_000_000_000)));
    assert_eq!(cards[1].next_review, None);
    assert_eq!(cards[1].last_reviewed, Some(at(1_700_000_600_000)));
    assert_eq!(cards[1].effective_next_review(), DateTime::<Utc>::UNIX_EPOCH);
}
