use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{Action, App, GateAction, Screen};
use crate::chase::ChaseAction;
use crate::crossword::CrosswordAction;
use crate::grid::Dir;
use crate::memory::MemoryAction;
use crate::progress::Room;
use crate::tiles::PuzzleAction;

fn direction(key: KeyCode) -> Option<Dir> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => Some(Dir::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Dir::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Dir::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Dir::Right),
        _ => None,
    }
}

fn is_quit_chord(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
}

/// Translates a key press into an action for the current screen.
pub fn map_key(app: &App, key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if is_quit_chord(&key) {
        return Some(Action::Quit);
    }

    match &app.screen {
        Screen::Gate(_) => match key.code {
            KeyCode::Enter => Some(Action::Gate(GateAction::Submit)),
            KeyCode::Backspace => Some(Action::Gate(GateAction::Erase)),
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char(c) => Some(Action::Gate(GateAction::Type(c))),
            _ => None,
        },
        Screen::Hub => hub_key(app.hub_cursor, key.code),
        Screen::Room(_) if key.code == KeyCode::Esc => Some(Action::Leave),
        Screen::Room(room) => room_key(*room, key.code),
    }
}

fn hub_key(cursor: usize, code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::HubMove(-1)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::HubMove(1)),
        KeyCode::Enter | KeyCode::Char(' ') => Room::from_index(cursor).map(Action::OpenRoom),
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            Room::from_index(idx).map(Action::OpenRoom)
        }
        KeyCode::Char('x') => Some(Action::Logout),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

fn room_key(room: Room, code: KeyCode) -> Option<Action> {
    match room {
        Room::Puzzle => match code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Puzzle(PuzzleAction::Select)),
            KeyCode::Char('s') => Some(Action::Puzzle(PuzzleAction::Shuffle)),
            KeyCode::Char('n') => Some(Action::NextRoom),
            code => Some(Action::Puzzle(PuzzleAction::MoveCursor(direction(code)?))),
        },
        Room::Crossword => match code {
            KeyCode::Tab | KeyCode::Down => Some(Action::Crossword(CrosswordAction::NextEntry)),
            KeyCode::BackTab | KeyCode::Up => Some(Action::Crossword(CrosswordAction::PrevEntry)),
            KeyCode::Backspace => Some(Action::Crossword(CrosswordAction::Erase)),
            KeyCode::Enter => Some(Action::NextRoom),
            KeyCode::Char(c) => Some(Action::Crossword(CrosswordAction::Type(c))),
            _ => None,
        },
        Room::Memory => match code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Memory(MemoryAction::Flip)),
            KeyCode::Char('r') => Some(Action::Memory(MemoryAction::Restart)),
            KeyCode::Char('n') => Some(Action::NextRoom),
            code => Some(Action::Memory(MemoryAction::MoveCursor(direction(code)?))),
        },
        Room::Chase => match code {
            KeyCode::Char('r') => Some(Action::Chase(ChaseAction::Restart)),
            KeyCode::Char('n') => Some(Action::NextRoom),
            code => Some(Action::Chase(ChaseAction::Move(direction(code)?))),
        },
    }
}
