use crate::tui::{inputs::{map_event, Action}, views::{self, RightPane, Sidebar}};
use chrono::Utc;
use crossterm::{
    event::{self},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use recall_core::{due_cards, review_card, summarize, Card, CollectionStore, IntervalUnit, Rating};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Review,
    Browse,
}

pub struct TuiApp {
    pub store: Arc<dyn CollectionStore>,
    pub unit: IntervalUnit,
    pub rt: Arc<Runtime>,
    cards: Vec<Card>,
    pane: Pane,
    queue: Vec<Card>,
    idx: usize,
    reveal: bool,
    browse_sel: usize,
    status: Option<String>,
}

impl TuiApp {
    pub fn new(store: Arc<dyn CollectionStore>, unit: IntervalUnit, rt: Arc<Runtime>) -> Self {
        Self {
            store,
            unit,
            rt,
            cards: vec![],
            pane: Pane::Review,
            queue: vec![],
            idx: 0,
            reveal: false,
            browse_sel: 0,
            status: None,
        }
    }

    fn reload(&mut self) {
        match self.rt.block_on(self.store.load()) {
            Ok(cards) => {
                self.cards = cards;
                self.status = None;
            }
            Err(e) => {
                self.status = Some(format!("load failed: {e}"));
            }
        }
        self.browse_sel = self.browse_sel.min(self.cards.len().saturating_sub(1));
        self.build_queue();
    }

    fn build_queue(&mut self) {
        self.queue = due_cards(&self.cards, Utc::now());
        self.idx = 0;
        self.reveal = false;
    }

    fn rate_current(&mut self, rating: Rating) {
        let Some(id) = self.queue.get(self.idx).map(|c| c.id.clone()) else { return };
        let snapshot = self.cards.clone();
        let res = review_card(&mut self.cards, &id, rating, Utc::now(), self.unit)
            .map_err(|e| e.to_string())
            .and_then(|_| {
                self.rt
                    .block_on(self.store.save(&self.cards))
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = res {
            self.cards = snapshot;
            self.status = Some(format!("rating not saved: {e}"));
            return;
        }
        self.advance();
    }

    fn advance(&mut self) {
        if self.idx + 1 < self.queue.len() {
            self.idx += 1;
            self.reveal = false;
        } else {
            // ratings in minutes can make cards due again within the session
            self.build_queue();
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.reload();

        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.mainloop(&mut terminal);

        disable_raw_mode().ok();
        let mut out: Stdout = std::io::stdout();
        execute!(out, LeaveAlternateScreen).ok();
        terminal.show_cursor().ok();

        res
    }

    fn mainloop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        loop {
            let stats = summarize(&self.cards, Utc::now());
            terminal.draw(|f| {
                let side = Sidebar { stats: &stats, unit: self.unit, status: self.status.as_deref() };
                let right = match self.pane {
                    Pane::Review => match self.queue.get(self.idx) {
                        Some(card) => RightPane::Review {
                            card,
                            reveal: self.reveal,
                            pos: self.idx,
                            len: self.queue.len(),
                        },
                        None => RightPane::Empty("No cards due. Add some with `recall add`."),
                    },
                    Pane::Browse => RightPane::Browse { cards: &self.cards, sel: self.browse_sel },
                };
                views::draw_ui(f, f.size(), side, right);
            })?;

            if event::poll(std::time::Duration::from_millis(250))? {
                let ev = event::read()?;
                match map_event(ev) {
                    Action::Quit => break,
                    Action::SwitchPane => {
                        self.pane = match self.pane {
                            Pane::Review => Pane::Browse,
                            Pane::Browse => Pane::Review,
                        };
                    }
                    Action::Up => {
                        if self.pane == Pane::Browse { self.browse_sel = self.browse_sel.saturating_sub(1); }
                    }
                    Action::Down => {
                        if self.pane == Pane::Browse && self.browse_sel + 1 < self.cards.len() { self.browse_sel += 1; }
                    }
                    Action::ToggleReveal => { if self.pane == Pane::Review { self.reveal = !self.reveal; } }
                    Action::Skip => { if self.pane == Pane::Review { self.advance(); } }
                    Action::Rate(rating) => {
                        if self.pane == Pane::Review && self.reveal { self.rate_current(rating); }
                    }
                    Action::Refresh => self.reload(),
                    Action::None => {}
                }
            }
        }
        Ok(())
    }
}
