use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use recall_core::Rating;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    Up,
    Down,
    SwitchPane,
    ToggleReveal,
    Rate(Rating),
    Skip,
    Refresh,
    None,
}

pub fn map_event(ev: Event) -> Action {
    if let Event::Key(KeyEvent { code, kind, .. }) = ev {
        if kind == KeyEventKind::Release {
            return Action::None;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => Action::Up,
            KeyCode::Down | KeyCode::Char('j') => Action::Down,
            KeyCode::Tab => Action::SwitchPane,
            KeyCode::Char(' ') | KeyCode::Enter => Action::ToggleReveal,
            KeyCode::Char('1') => Action::Rate(Rating::Again),
            KeyCode::Char('2') => Action::Rate(Rating::Hard),
            KeyCode::Char('3') => Action::Rate(Rating::Good),
            KeyCode::Char('4') => Action::Rate(Rating::Easy),
            KeyCode::Char('s') => Action::Skip,
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::None,
        }
    } else {
        Action::None
    }
}
