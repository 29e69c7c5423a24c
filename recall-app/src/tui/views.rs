use crate::cli::commands::{fmt_time, short_id};
use crate::tui::theme::*;
use recall_core::{Card, CollectionStats, IntervalUnit};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub enum RightPane<'a> {
    Review { card: &'a Card, reveal: bool, pos: usize, len: usize },
    Browse { cards: &'a [Card], sel: usize },
    Empty(&'a str),
}

pub struct Sidebar<'a> {
    pub stats: &'a CollectionStats,
    pub unit: IntervalUnit,
    pub status: Option<&'a str>,
}

pub fn draw_ui(f: &mut Frame, area: Rect, side: Sidebar, right: RightPane) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);
    draw_sidebar(f, chunks[0], side);
    draw_right(f, chunks[1], right);

    let foot = Paragraph::new(Line::from(vec![
        Span::raw(" tab review/browse  "),
        Span::raw(" space reveal  "),
        Span::raw(" 1-4 again/hard/good/easy  "),
        Span::raw(" s skip  "),
        Span::raw(" r reload  "),
        Span::raw(" q quit "),
    ]))
    .style(footer_style());
    f.render_widget(foot, rows[1]);
}

fn draw_sidebar(f: &mut Frame, area: Rect, side: Sidebar) {
    let s = side.stats;
    let mut lines = vec![
        Line::from(Span::raw("Stats").style(title_style())),
        Line::from(format!("Total: {}", s.total)),
        Line::from(format!("Due now: {}", s.due_now)),
        Line::from(format!("Never reviewed: {}", s.never_reviewed)),
        Line::from(format!("Lapses: {}", s.total_lapses)),
        Line::from(format!("Unit: {}", side.unit)),
    ];
    if let Some(msg) = side.status {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::raw(msg).style(status_style())));
    }
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

fn draw_right(f: &mut Frame, area: Rect, pane: RightPane) {
    match pane {
        RightPane::Empty(msg) => {
            let p = Paragraph::new(msg)
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Review").borders(Borders::ALL));
            f.render_widget(p, area);
        }
        RightPane::Review { card, reveal, pos, len } => {
            let block = Block::default()
                .title(format!("Review {}/{}", pos + 1, len))
                .borders(Borders::ALL);
            let mut text = vec![
                Line::from(vec![Span::raw("Q: ").style(title_style()), Span::raw(&card.question)]),
                Line::from(""),
            ];
            if reveal {
                text.push(Line::from(vec![
                    Span::raw("A: ").style(title_style()),
                    Span::raw(&card.answer),
                ]));
            } else {
                text.push(Line::from(
                    Span::raw(format!("Next: {}", fmt_time(card.next_review))).style(muted_style()),
                ));
            }
            let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(block);
            f.render_widget(p, area);
        }
        RightPane::Browse { cards, sel } => {
            let items: Vec<_> = cards
                .iter()
                .map(|c| {
                    ListItem::new(Line::from(format!(
                        "{}  {}  next {}",
                        short_id(c),
                        c.question,
                        fmt_time(c.next_review.or(Some(c.created)))
                    )))
                })
                .collect();
            let list = List::new(items)
                .highlight_style(selected_style())
                .block(Block::default().title("Browse").borders(Borders::ALL));
            let mut state = ListState::default().with_selected(Some(sel));
            f.render_stateful_widget(list, area, &mut state);
        }
    }
}
