//! Screen state machine: password gate, hub, and the four rooms.
//!
//! `App::update` takes one action and returns the next state. Nothing here
//! touches the terminal; drawing is done from the state by `render`.

use chrono::{DateTime, FixedOffset};
use log::{info, warn};
use rand::Rng;

use crate::chase::{ChaseAction, ChaseGame, ChaseRules, Level};
use crate::config::Settings;
use crate::crossword::{build_layout, CrosswordAction, CrosswordPuzzle, Layout, LayoutOptions};
use crate::error::ContentError;
use crate::memory::{MemoryAction, MemoryGame};
use crate::progress::{Progress, Room, ROOM_COUNT};
use crate::text::normalize_answer;
use crate::tiles::{PuzzleAction, SwapPuzzle};

/// Validated, ready-to-play content.
#[derive(Clone, Debug)]
pub struct Content {
    pub password: String,
    pub target: DateTime<FixedOffset>,
    pub puzzle_size: usize,
    pub layout: Layout,
    pub level: Level,
    pub rules: ChaseRules,
    pub symbols: Vec<String>,
}

impl Content {
    pub fn from_settings(settings: &Settings) -> Result<Self, ContentError> {
        if let Some(clue) = settings
            .clues
            .iter()
            .find(|c| normalize_answer(&c.answer).chars().count() == 1)
        {
            return Err(ContentError::ShortAnswer {
                clue: clue.prompt.clone(),
            });
        }
        let layout = build_layout(&settings.clues, &LayoutOptions::default())?;
        let level = Level::parse(&settings.maze)?;
        if settings.memory_symbols.is_empty() {
            return Err(ContentError::NoSymbols);
        }
        Ok(Self {
            password: settings.password.clone(),
            target: settings.target,
            puzzle_size: settings.puzzle_size,
            layout,
            level,
            rules: settings.chase,
            symbols: settings.memory_symbols.clone(),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GateStatus {
    #[default]
    Prompt,
    Denied,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GateState {
    pub input: String,
    pub status: GateStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Gate(GateState),
    Hub,
    Room(Room),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warn(String),
    Celebrate(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateAction {
    Type(char),
    Erase,
    Submit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Gate(GateAction),
    HubMove(isize),
    OpenRoom(Room),
    Logout,
    Leave,
    NextRoom,
    Puzzle(PuzzleAction),
    Crossword(CrosswordAction),
    Memory(MemoryAction),
    Chase(ChaseAction),
}

#[derive(Clone, Debug)]
pub struct Rooms {
    pub puzzle: SwapPuzzle,
    pub crossword: CrosswordPuzzle,
    pub memory: MemoryGame,
    pub chase: ChaseGame,
}

impl Rooms {
    fn new(content: &Content, rng: &mut impl Rng) -> Self {
        Self {
            puzzle: SwapPuzzle::new(content.puzzle_size, rng),
            crossword: CrosswordPuzzle::new(content.layout.clone()),
            memory: MemoryGame::new(&content.symbols, rng),
            chase: ChaseGame::new(content.level.clone(), content.rules),
        }
    }

    fn is_solved(&self, room: Room) -> bool {
        match room {
            Room::Puzzle => self.puzzle.is_solved(),
            Room::Crossword => self.crossword.is_solved(),
            Room::Memory => self.memory.is_solved(),
            Room::Chase => self.chase.is_won(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct App {
    pub content: Content,
    pub progress: Progress,
    pub screen: Screen,
    pub rooms: Rooms,
    pub hub_cursor: usize,
    pub notice: Option<Notice>,
    pub quit: bool,
}

impl App {
    pub fn new(content: Content, progress: Progress, rng: &mut impl Rng) -> Self {
        let rooms = Rooms::new(&content, rng);
        let screen = if progress.authenticated {
            Screen::Hub
        } else {
            Screen::Gate(GateState::default())
        };
        Self {
            content,
            progress,
            screen,
            rooms,
            hub_cursor: 0,
            notice: None,
            quit: false,
        }
    }

    pub fn update(mut self, action: Action, rng: &mut impl Rng) -> Self {
        self.notice = None;
        if action == Action::Quit {
            self.quit = true;
            return self;
        }
        if !self.progress.authenticated && !matches!(self.screen, Screen::Gate(_)) {
            self.screen = Screen::Gate(GateState::default());
            self.notice = Some(Notice::Warn("You need to log in to see this page.".into()));
            return self;
        }

        match action {
            Action::Quit => {}
            Action::Gate(a) => self.on_gate(a),
            Action::HubMove(delta) => {
                if self.screen == Screen::Hub {
                    let next = self.hub_cursor as isize + delta;
                    self.hub_cursor = next.rem_euclid(ROOM_COUNT as isize) as usize;
                }
            }
            Action::OpenRoom(room) => {
                if self.screen == Screen::Hub {
                    self.hub_cursor = room.index();
                    self.open_room(room);
                }
            }
            Action::Logout => {
                info!("logged out");
                self.progress.authenticated = false;
                self.screen = Screen::Gate(GateState::default());
            }
            Action::Leave => {
                if matches!(self.screen, Screen::Room(_)) {
                    self.screen = Screen::Hub;
                }
            }
            Action::NextRoom => self.next_room(),
            Action::Puzzle(a) => {
                if self.in_room(Room::Puzzle) {
                    self.rooms.puzzle.apply(a, rng);
                    self.check_solved(Room::Puzzle);
                }
            }
            Action::Crossword(a) => {
                if self.in_room(Room::Crossword) {
                    self.rooms.crossword.apply(a);
                    self.check_solved(Room::Crossword);
                }
            }
            Action::Memory(a) => {
                if self.in_room(Room::Memory) {
                    self.rooms.memory.apply(a, rng);
                    self.check_solved(Room::Memory);
                }
            }
            Action::Chase(a) => {
                if self.in_room(Room::Chase) {
                    self.rooms.chase.apply(a, rng);
                    self.check_solved(Room::Chase);
                }
            }
        }
        self
    }

    fn in_room(&self, room: Room) -> bool {
        self.screen == Screen::Room(room)
    }

    fn on_gate(&mut self, action: GateAction) {
        let Screen::Gate(gate) = &mut self.screen else {
            return;
        };
        match action {
            GateAction::Type(c) => gate.input.push(c),
            GateAction::Erase => {
                gate.input.pop();
            }
            GateAction::Submit => {
                if gate.input.is_empty() {
                    gate.status = GateStatus::Prompt;
                } else if gate.input == self.content.password {
                    info!("gate opened");
                    self.progress.authenticated = true;
                    self.screen = Screen::Hub;
                    self.notice = Some(Notice::Info("Access granted. Welcome, my love!".into()));
                } else {
                    warn!("wrong password attempt");
                    gate.input.clear();
                    gate.status = GateStatus::Denied;
                }
            }
        }
    }

    fn open_room(&mut self, room: Room) {
        if !self.progress.is_unlocked(room) {
            let prev = room.prev().unwrap_or(room);
            self.notice = Some(Notice::Warn(format!(
                "Room {} is locked. Solve \"{}\" first.",
                room.index() + 1,
                prev.title()
            )));
            return;
        }
        info!("entering room {:?}", room);
        self.screen = Screen::Room(room);
        self.notice = Some(Notice::Info(format!(
            "Room {}: {}",
            room.index() + 1,
            room.title()
        )));
    }

    fn next_room(&mut self) {
        let Screen::Room(room) = self.screen else {
            return;
        };
        if !self.progress.is_solved(room) {
            self.notice = Some(Notice::Warn("Finish this room first.".into()));
            return;
        }
        match room.next() {
            Some(next) => self.open_room(next),
            None => {
                self.screen = Screen::Hub;
                self.notice = Some(Notice::Celebrate("Every room is open. Happy day!".into()));
            }
        }
    }

    fn check_solved(&mut self, room: Room) {
        if !self.rooms.is_solved(room) || !self.progress.mark_solved(room) {
            return;
        }
        info!("room {:?} solved", room);
        let message = match room.next() {
            Some(next) => format!(
                "{} solved! \"{}\" is now unlocked.",
                room.title(),
                next.title()
            ),
            None => format!("{} solved! You did it, all four rooms!", room.title()),
        };
        self.notice = Some(Notice::Celebrate(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Dir;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn app(rng: &mut StdRng) -> App {
        let settings = Settings {
            password: "open".into(),
            ..Settings::default()
        };
        let content = Content::from_settings(&settings).unwrap();
        App::new(content, Progress::default(), rng)
    }

    fn logged_in(rng: &mut StdRng) -> App {
        let a = type_str(app(rng), "open", rng);
        a.update(Action::Gate(GateAction::Submit), rng)
    }

    fn type_str(mut app: App, s: &str, rng: &mut StdRng) -> App {
        for c in s.chars() {
            app = app.update(Action::Gate(GateAction::Type(c)), rng);
        }
        app
    }

    #[test]
    fn wrong_password_is_denied_and_cleared() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = type_str(app(&mut rng), "nope", &mut rng);
        let a = a.update(Action::Gate(GateAction::Submit), &mut rng);
        assert_eq!(
            a.screen,
            Screen::Gate(GateState {
                input: String::new(),
                status: GateStatus::Denied
            })
        );
        assert!(!a.progress.authenticated);
    }

    #[test]
    fn empty_submit_only_prompts() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = app(&mut rng);
        let a = a.update(Action::Gate(GateAction::Submit), &mut rng);
        assert_eq!(a.screen, Screen::Gate(GateState::default()));
    }

    #[test]
    fn correct_password_opens_the_hub() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = type_str(app(&mut rng), "opex", &mut rng);
        let a = a.update(Action::Gate(GateAction::Erase), &mut rng);
        let a = type_str(a, "n", &mut rng);
        let a = a.update(Action::Gate(GateAction::Submit), &mut rng);
        assert_eq!(a.screen, Screen::Hub);
        assert!(a.progress.authenticated);
    }

    #[test]
    fn locked_rooms_stay_closed() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = logged_in(&mut rng);
        let a = a.update(Action::OpenRoom(Room::Memory), &mut rng);
        assert_eq!(a.screen, Screen::Hub);
        assert!(matches!(a.notice, Some(Notice::Warn(_))));
        let a = a.update(Action::OpenRoom(Room::Puzzle), &mut rng);
        assert_eq!(a.screen, Screen::Room(Room::Puzzle));
    }

    #[test]
    fn room_actions_need_authentication() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut a = app(&mut rng);
        a.screen = Screen::Room(Room::Puzzle);
        let a = a.update(Action::Puzzle(PuzzleAction::Select), &mut rng);
        assert_eq!(a.screen, Screen::Gate(GateState::default()));
        assert_eq!(a.rooms.puzzle.selected(), None);
    }

    #[test]
    fn hub_cursor_wraps() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = logged_in(&mut rng);
        let a = a.update(Action::HubMove(-1), &mut rng);
        assert_eq!(a.hub_cursor, ROOM_COUNT - 1);
        let a = a.update(Action::HubMove(1), &mut rng);
        assert_eq!(a.hub_cursor, 0);
    }

    #[test]
    fn solving_a_room_unlocks_the_next() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut a = logged_in(&mut rng);
        a.rooms.puzzle = SwapPuzzle::from_order(3, vec![1, 0, 2, 3, 4, 5, 6, 7, 8]);
        let a = a.update(Action::OpenRoom(Room::Puzzle), &mut rng);
        let a = a.update(Action::NextRoom, &mut rng);
        assert_eq!(a.screen, Screen::Room(Room::Puzzle));

        let a = a.update(Action::Puzzle(PuzzleAction::Select), &mut rng);
        let right = Action::Puzzle(PuzzleAction::MoveCursor(Dir::Right));
        let a = a.update(right, &mut rng);
        let a = a.update(Action::Puzzle(PuzzleAction::Select), &mut rng);
        assert!(a.progress.is_solved(Room::Puzzle));
        assert!(matches!(a.notice, Some(Notice::Celebrate(_))));

        let a = a.update(Action::NextRoom, &mut rng);
        assert_eq!(a.screen, Screen::Room(Room::Crossword));
        let a = a.update(Action::Logout, &mut rng);
        assert!(matches!(a.screen, Screen::Gate(_)));
        assert!(a.progress.is_solved(Room::Puzzle));
    }
}
