use clap::{Args, Parser, Subcommand, ValueEnum};
use recall_core::{IntervalUnit, DEFAULT_COLLECTION};
use std::path::PathBuf;

#[derive(Debug, Clone, ValueEnum)]
pub enum StoreKind {
    Json,
    Sqlite,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitArg {
    Minutes,
    Days,
}

impl From<UnitArg> for IntervalUnit {
    fn from(u: UnitArg) -> Self {
        IntervalUnit::from_minutes_flag(matches!(u, UnitArg::Minutes))
    }
}

#[derive(Debug, Parser, Clone)]
#[command(name = "recall", version, about = "Spaced-repetition flashcards: CLI/TUI/API")]
pub struct Cli {
    /// Storage backend (applies to CLI/TUI/API)
    #[arg(long, value_enum, default_value_t = StoreKind::Json)]
    pub store: StoreKind,

    /// Directory holding the JSON collection and its backups
    #[arg(long, env = "RECALL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// SQLite DB path when --store sqlite (defaults to app data dir)
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Unit every interval is counted in; minutes is handy for trying things out
    #[arg(long, value_enum, env = "RECALL_UNIT", default_value_t = UnitArg::Days)]
    pub unit: UnitArg,

    /// Name the collection is stored under
    #[arg(long, env = "RECALL_COLLECTION", default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Add a card (due immediately)
    Add(CardAdd),
    /// Review loop over due cards (CLI)
    Review(ReviewCmd),
    /// Rate a single card without the loop
    Rate(RateCmd),
    /// List due cards, most overdue first
    Due,
    /// List every card with its next review time
    Browse,
    /// Collection totals
    Stats,
    /// Delete every card in the collection
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Launch Terminal UI
    Tui,
    /// Launch Axum HTTP API
    Api(ApiCmd),
}

#[derive(Debug, Args, Clone)]
pub struct CardAdd {
    #[arg(long, short)]
    pub question: String,
    #[arg(long, short)]
    pub answer: String,
}

#[derive(Debug, Args, Clone)]
pub struct ReviewCmd {
    #[arg(long, default_value_t = 50)]
    pub max: usize,
}

#[derive(Debug, Args, Clone)]
pub struct RateCmd {
    /// Card id or a unique prefix of it
    pub card: String,
    /// again|hard|good|easy (or 1-4)
    pub rating: String,
}

#[derive(Debug, Args, Clone)]
pub struct ApiCmd {
    /// Bind address (host:port)
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: String,
}
