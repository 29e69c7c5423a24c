use crate::api::server as api_server;
use crate::cli::opts::*;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, Utc};
use recall_core::{
    due_cards, find_card, insert_card, new_card, review_card, summarize, Card,
    CollectionStore, IntervalUnit, Rating,
};
use recall_json::{paths::data_root, JsonStore, DEFAULT_MAX_BACKUPS};
use recall_sqlite::SqliteStore;
use std::io::{stdin, stdout, Write};
use std::sync::Arc;

pub async fn run_cli(args: Cli) -> Result<()> {
    let store = open_store(&args).await?;
    let unit: IntervalUnit = args.unit.into();
    match args.cmd.clone() {
        // main drives the TUI from its own runtime; blocking on one from here would nest
        Command::Tui => bail!("the TUI cannot start from inside the async runtime"),
        Command::Api(api) => {
            let addr: std::net::SocketAddr = api.addr.parse()?;
            api_server::run(store, unit, addr).await
        }
        Command::Add(a) => add_cmd(&*store, a).await,
        Command::Review(r) => review_cmd(&*store, unit, r).await,
        Command::Rate(r) => rate_cmd(&*store, unit, r).await,
        Command::Due => due_cmd(&*store).await,
        Command::Browse => browse_cmd(&*store).await,
        Command::Stats => stats_cmd(&*store, unit).await,
        Command::Reset { yes } => reset_cmd(&*store, yes).await,
    }
}

pub async fn open_store(args: &Cli) -> Result<Arc<dyn CollectionStore>> {
    let root = args.data_dir.clone().unwrap_or_else(data_root);
    match args.store {
        StoreKind::Json => {
            let s = JsonStore::open_in(&root, &args.collection, DEFAULT_MAX_BACKUPS)?;
            Ok(Arc::new(s))
        }
        StoreKind::Sqlite => {
            let p = args.db_path.clone().unwrap_or_else(|| root.join("recall.sqlite3"));
            if let Some(parent) = p.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let s = SqliteStore::open_file(&p, &args.collection).await?;
            Ok(Arc::new(s))
        }
    }
}

async fn add_cmd(store: &dyn CollectionStore, a: CardAdd) -> Result<()> {
    let mut cards = store.load().await?;
    let card = new_card(&a.question, &a.answer, Utc::now())?;
    let id = card.id.clone();
    insert_card(&mut cards, card);
    store.save(&cards).await?;
    println!("{id}");
    Ok(())
}

async fn review_cmd(store: &dyn CollectionStore, unit: IntervalUnit, cmd: ReviewCmd) -> Result<()> {
    let mut cards = store.load().await?;
    let pool = due_cards(&cards, Utc::now());
    if pool.is_empty() {
        println!("no cards due");
        return Ok(());
    }

    let total = pool.len().min(cmd.max);
    let mut reviewed = 0usize;
    for (i, card) in pool.into_iter().take(cmd.max).enumerate() {
        println!("\n[{}/{}] {}", i + 1, total, short_id(&card));
        println!("Q: {}", card.question);
        prompt_enter("[enter=show]")?;
        println!("A: {}", card.answer);
        println!("[1=Again, 2=Hard, 3=Good, 4=Easy, s=skip, q=quit]");
        let rating = loop {
            let line = read_line("rating> ")?;
            match line.trim().to_lowercase().as_str() {
                "s" | "skip" => break None,
                "q" | "quit" => {
                    println!("\nreviewed {reviewed}");
                    return Ok(());
                }
                other => match other.parse::<Rating>() {
                    Ok(r) => break Some(r),
                    Err(_) => println!("enter 1-4, s, or q"),
                },
            }
        };

        if let Some(rating) = rating {
            let updated = review_card(&mut cards, &card.id, rating, Utc::now(), unit)?;
            store.save(&cards).await?;
            reviewed += 1;
            println!("→ next review in {} {}", updated.interval, unit);
        }
    }

    println!("\nreviewed {reviewed}");
    Ok(())
}

async fn rate_cmd(store: &dyn CollectionStore, unit: IntervalUnit, cmd: RateCmd) -> Result<()> {
    let rating: Rating = cmd.rating.parse()?;
    let mut cards = store.load().await?;
    let id = find_card(&cards, &cmd.card)?.id.clone();
    let updated = review_card(&mut cards, &id, rating, Utc::now(), unit)?;
    store.save(&cards).await?;
    println!(
        "{}\tinterval={} {}\tease={:.2}\tnext={}",
        short_id(&updated),
        updated.interval,
        unit,
        updated.ease,
        fmt_time(updated.next_review)
    );
    Ok(())
}

async fn due_cmd(store: &dyn CollectionStore) -> Result<()> {
    let cards = store.load().await?;
    let due = due_cards(&cards, Utc::now());
    if due.is_empty() {
        println!("no cards due");
    }
    for c in due {
        println!("{}\t{}\tdue={}", short_id(&c), c.question, fmt_time(c.next_review));
    }
    Ok(())
}

async fn browse_cmd(store: &dyn CollectionStore) -> Result<()> {
    let cards = store.load().await?;
    if cards.is_empty() {
        println!("no cards yet");
    }
    for c in cards {
        println!(
            "{}\t{}\t{}\tnext={}\tinterval={}\tease={:.2}\tlapses={}",
            short_id(&c),
            c.question,
            c.answer,
            fmt_time(c.next_review.or(Some(c.created))),
            c.interval,
            c.ease,
            c.lapses
        );
    }
    Ok(())
}

async fn stats_cmd(store: &dyn CollectionStore, unit: IntervalUnit) -> Result<()> {
    let cards = store.load().await?;
    let s = summarize(&cards, Utc::now());
    println!("total\t{}", s.total);
    println!("due now\t{}", s.due_now);
    println!("never reviewed\t{}", s.never_reviewed);
    println!("lapses\t{}", s.total_lapses);
    match s.mean_ease {
        Some(e) => println!("mean ease\t{e:.2}"),
        None => println!("mean ease\t-"),
    }
    println!("unit\t{unit}");
    Ok(())
}

async fn reset_cmd(store: &dyn CollectionStore, yes: bool) -> Result<()> {
    if !yes {
        let answer = read_line("Reset all cards? This cannot be undone. [y/N] ")?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            bail!("reset cancelled");
        }
    }
    // overwrite without loading, so a corrupt collection can still be cleared
    store.save(&[]).await?;
    println!("ok");
    Ok(())
}

// ===== Helpers =====
pub fn short_id(card: &Card) -> &str {
    card.id.get(..8).unwrap_or(&card.id)
}

pub fn fmt_time(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(t) => t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "now".to_string(),
    }
}

fn prompt_enter(label: &str) -> Result<()> { print!("{label}"); stdout().flush().ok(); let mut s = String::new(); stdin().read_line(&mut s)?; Ok(()) }
fn read_line(prompt: &str) -> Result<String> { print!("{prompt}"); stdout().flush().ok(); let mut s = String::new(); stdin().read_line(&mut s)?; Ok(s) }
