use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::CoreError;

pub type CardId = String;

pub const EASE_MIN: f64 = 1.3;
pub const EASE_DEFAULT: f64 = 2.5;
pub const INTERVAL_MIN: u32 = 1;
pub const INTERVAL_DEFAULT: u32 = 1;

/// Key the browser build kept its collection under; reused so old blobs load unchanged.
pub const DEFAULT_COLLECTION: &str = "flashcards_v1";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    pub fn as_score(&self) -> u8 {
        match self {
            Rating::Again => 0,
            Rating::Hard => 1,
            Rating::Good => 2,
            Rating::Easy => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::Again => "again",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rating {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "a" | "again" => Ok(Rating::Again),
            "2" | "h" | "hard" => Ok(Rating::Hard),
            "3" | "g" | "good" => Ok(Rating::Good),
            "4" | "e" | "easy" => Ok(Rating::Easy),
            _ => Err(CoreError::Invalid("rating must be again, hard, good or easy")),
        }
    }
}

/// Unit every card interval is measured in. Chosen once per process.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Minutes,
    #[default]
    Days,
}

impl IntervalUnit {
    pub fn from_minutes_flag(unit_is_minutes: bool) -> Self {
        if unit_is_minutes {
            IntervalUnit::Minutes
        } else {
            IntervalUnit::Days
        }
    }

    pub fn millis(&self) -> i64 {
        match self {
            IntervalUnit::Minutes => 60_000,
            IntervalUnit::Days => 86_400_000,
        }
    }

    pub fn span(&self, interval: u32) -> Duration {
        Duration::milliseconds(interval as i64 * self.millis())
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntervalUnit::Minutes => "minutes",
            IntervalUnit::Days => "days",
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub question: String,
    pub answer: String,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created: DateTime<Utc>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_reviewed: Option<DateTime<Utc>>,

    pub interval: u32,
    pub ease: f64,
    #[serde(default)]
    pub lapses: u32,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub next_review: Option<DateTime<Utc>>,
}

impl Card {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question: question.into(),
            answer: answer.into(),
            created,
            last_reviewed: None,
            interval: INTERVAL_DEFAULT,
            ease: EASE_DEFAULT,
            lapses: 0,
            next_review: Some(created),
        }
    }

    /// Next-review time with a missing value read as the epoch.
    pub fn effective_next_review(&self) -> DateTime<Utc> {
        self.next_review.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.effective_next_review() <= now
    }

    pub fn is_new(&self) -> bool {
        self.last_reviewed.is_none()
    }
}
