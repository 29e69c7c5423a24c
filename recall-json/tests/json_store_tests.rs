use chrono::{DateTime, Utc};
use recall_core::{schedule, Card, CollectionStore, IntervalUnit, Rating, StorageError};
use recall_json::JsonStore;
use std::fs;

fn at(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap()
}

#[tokio::test]
async fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open_in(dir.path(), "deck", 3).unwrap();

    assert!(store.load().await.unwrap().is_empty());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn save_then_load_in_a_new_store() {
    let dir = tempfile::tempdir().unwrap();
    let card = Card::new("hola", "hello", at(0));
    let reviewed = schedule(&card, Rating::Good, at(10), IntervalUnit::Days);
    {
        let store = JsonStore::open_in(dir.path(), "deck", 3).unwrap();
        store.save(&[reviewed.clone(), Card::new("adios", "bye", at(1))]).await.unwrap();
    }

    let reopened = JsonStore::open_in(dir.path(), "deck", 3).unwrap();
    let cards = reopened.load().await.unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0], reviewed);
}

#[tokio::test]
async fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open_in(dir.path(), "deck", 3).unwrap();
    fs::write(store.path(), "{ not json").unwrap();

    let err = store.load().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialize(_)));
    // the bad file stays for the user to inspect
    assert!(store.path().exists());
}

#[tokio::test]
async fn reads_bare_array_blob() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open_in(dir.path(), "flashcards_v1", 3).unwrap();
    fs::write(
        store.path(),
        r#"[{"id":"x1","question":"q","answer":"a","created":0,"lastReviewed":null,
             "interval":0,"ease":2.5,"lapses":0}]"#,
    )
    .unwrap();

    let cards = store.load().await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, "x1");
    assert_eq!(cards[0].interval, 1);
    assert_eq!(cards[0].next_review, None);
}

#[tokio::test]
async fn backups_rotate_per_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open_in(dir.path(), "deck", 3).unwrap();
    for i in 0..5 {
        fs::write(store.backups_dir().join(format!("deck-20000101-00000{i}.000.json")), "[]").unwrap();
    }
    fs::write(store.backups_dir().join("other-20000101-000000.000.json"), "[]").unwrap();

    store.save(&[Card::new("q", "a", at(0))]).await.unwrap();

    let mut names: Vec<String> = fs::read_dir(store.backups_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .filter(|n| n.starts_with("deck-"))
        .collect();
    names.sort();
    assert_eq!(names.len(), 3);
    assert_eq!(names[0], "deck-20000101-000003.000.json");
    assert!(!names[2].starts_with("deck-2000"));
    assert!(store.backups_dir().join("other-20000101-000000.000.json").exists());
}

#[tokio::test]
async fn rotation_ignores_keys_sharing_a_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let deck = JsonStore::open_in(dir.path(), "deck", 2).unwrap();
    let deck_one = JsonStore::open_in(dir.path(), "deck-1", 2).unwrap();
    let deck_old = JsonStore::open_in(dir.path(), "deck-old", 2).unwrap();

    deck_one.save(&[Card::new("q1", "a1", at(0))]).await.unwrap();
    deck_old.save(&[Card::new("q2", "a2", at(0))]).await.unwrap();
    for i in 0..3 {
        fs::write(deck.backups_dir().join(format!("deck-20000101-00000{i}.000.json")), "[]").unwrap();
    }
    deck.save(&[Card::new("q", "a", at(0))]).await.unwrap();

    let names: Vec<String> = fs::read_dir(deck.backups_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    let count = |prefix: &str| {
        names
            .iter()
            .filter(|n| n.strip_prefix(prefix).is_some_and(|r| r.starts_with('2')))
            .count()
    };
    assert_eq!(count("deck-1-"), 1);
    assert_eq!(count("deck-old-"), 1);
    assert_eq!(count("deck-"), 2);
}

#[test]
fn rejects_path_like_keys() {
    let dir = tempfile::tempdir().unwrap();
    assert!(JsonStore::open_in(dir.path(), "../escape", 3).is_err());
    assert!(JsonStore::open_in(dir.path(), "", 3).is_err());
}
