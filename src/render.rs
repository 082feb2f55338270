//! Projection of `App` into coloured text lines, and a painter that puts
//! those lines on the terminal redrawing only what changed.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, GateStatus, Notice, Screen};
use crate::chase::{ChaseGame, ChaseMode, ChaseStatus, Tile};
use crate::countdown::{remaining, Countdown};
use crate::crossword::{CrosswordPuzzle, Orientation, Square};
use crate::grid::Pos;
use crate::memory::{CardState, MemoryGame, COLUMNS};
use crate::progress::Room;
use crate::tiles::SwapPuzzle;

const CELL_W: usize = 2;
const CARD_COLORS: [Color; 4] = [Color::Yellow, Color::Green, Color::Blue, Color::Magenta];
const CONFETTI: &str = "🎈 🎉 ✨ 🎊 🎈 🎉 ✨ 🎊 🎈";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub color: Color,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line(pub Vec<Span>);

impl Line {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::colored(text, Color::Reset)
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Line(vec![Span {
            text: text.into(),
            color,
        }])
    }

    pub fn push(&mut self, text: impl Into<String>, color: Color) {
        self.0.push(Span {
            text: text.into(),
            color,
        });
    }

    pub fn text(&self) -> String {
        self.0.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn width(&self) -> usize {
        self.0
            .iter()
            .map(|s| UnicodeWidthStr::width(s.text.as_str()))
            .sum()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<Line>,
}

impl Frame {
    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn width(&self) -> usize {
        self.lines.iter().map(Line::width).max().unwrap_or(0)
    }

    /// Plain text of the whole frame, one entry per line.
    pub fn text(&self) -> Vec<String> {
        self.lines.iter().map(Line::text).collect()
    }
}

pub fn frame(app: &App, now: DateTime<Utc>) -> Frame {
    let mut f = Frame::default();
    match &app.screen {
        Screen::Gate(gate) => {
            f.push(Line::colored("🔒 Restricted access", Color::White));
            f.blank();
            f.push(Line::plain("Enter the password:"));
            let mask = "•".repeat(gate.input.chars().count());
            f.push(Line::colored(format!("> {mask}"), Color::Cyan));
            f.blank();
            f.push(match gate.status {
                GateStatus::Prompt => Line::plain("Please enter your password to continue."),
                GateStatus::Denied => Line::colored("❌ Wrong password. Try again.", Color::Red),
            });
            f.blank();
            f.push(Line::colored("Enter: unlock   Esc: quit", Color::DarkGrey));
        }
        Screen::Hub => hub(&mut f, app, now),
        Screen::Room(room) => {
            let title = format!("{} · {}", room.index() + 1, room.title());
            f.push(Line::colored(title, CARD_COLORS[room.index()]));
            f.blank();
            match room {
                Room::Puzzle => puzzle(&mut f, &app.rooms.puzzle),
                Room::Crossword => crossword(&mut f, &app.rooms.crossword),
                Room::Memory => memory(&mut f, &app.rooms.memory),
                Room::Chase => chase(&mut f, &app.rooms.chase),
            }
            f.blank();
            if app.progress.is_solved(*room) {
                let next = match room {
                    Room::Crossword => "Enter",
                    _ => "n",
                };
                f.push(Line::colored(
                    format!("✅ Done! Press {next} to go on to the next room."),
                    Color::Green,
                ));
            }
            f.push(Line::colored(room_keys(*room), Color::DarkGrey));
        }
    }
    notice(&mut f, app.notice.as_ref());
    f
}

fn room_keys(room: Room) -> &'static str {
    match room {
        Room::Puzzle => "arrows: move   space: pick/swap   s: shuffle   Esc: back",
        Room::Crossword => "type letters   Tab/↓ ↑: entry   Backspace: erase   Esc: back",
        Room::Memory => "arrows: move   space: flip   r: restart   Esc: back",
        Room::Chase => "arrows/hjkl: move   r: restart   Esc: back",
    }
}

fn notice(f: &mut Frame, notice: Option<&Notice>) {
    let Some(notice) = notice else {
        return;
    };
    f.blank();
    match notice {
        Notice::Info(msg) => f.push(Line::colored(msg.clone(), Color::Cyan)),
        Notice::Warn(msg) => f.push(Line::colored(msg.clone(), Color::Yellow)),
        Notice::Celebrate(msg) => {
            f.push(Line::colored(CONFETTI, Color::Magenta));
            f.push(Line::colored(format!("🎉 {msg}"), Color::Green));
            f.push(Line::colored(CONFETTI, Color::Magenta));
        }
    }
}

fn hub(f: &mut Frame, app: &App, now: DateTime<Utc>) {
    let target = app.content.target;
    let local = now.with_timezone(target.offset());
    f.push(Line::plain(format!(
        "📅 Current date (UTC{}): {}",
        target.offset(),
        local.format("%Y-%m-%d %H:%M:%S%.3f")
    )));
    f.blank();

    let mut cards = Line::default();
    for room in Room::ALL {
        let idx = room.index();
        let marker = if app.progress.is_solved(room) {
            " ✓"
        } else if app.progress.is_unlocked(room) {
            ""
        } else {
            " 🔒"
        };
        let label = format!("[ {} · {}{} ]", idx + 1, room.title(), marker);
        let (label, color) = if idx == app.hub_cursor {
            (format!(">{label}<"), Color::White)
        } else {
            (format!(" {label} "), CARD_COLORS[idx])
        };
        cards.push(label, color);
        cards.push(" ", Color::Reset);
    }
    f.push(cards);
    f.blank();

    let day = target.format("%-d %B %Y");
    f.push(Line::plain(format!("⏳ Time left until {day}")));
    match remaining(&now, &target) {
        Countdown::Arrived => {
            f.push(Line::colored(CONFETTI, Color::Magenta));
            f.push(Line::colored(format!("🎉 {day} is here!"), Color::Green));
        }
        left => f.push(Line::colored(left.to_string(), Color::White)),
    }
    f.blank();
    f.push(Line::colored(
        "←/→: choose   Enter or 1-4: open   x: log out   q: quit",
        Color::DarkGrey,
    ));
}

fn puzzle(f: &mut Frame, p: &SwapPuzzle) {
    let n = p.size();
    for r in 0..n {
        let mut line = Line::default();
        for c in 0..n {
            let idx = r * n + c;
            let tile = p.tile_at(idx);
            let text = if p.selected() == Some(idx) {
                format!("[{:>2}]", tile + 1)
            } else {
                format!(" {:>2} ", tile + 1)
            };
            let color = if p.cursor() == Pos::new(r, c) {
                Color::Yellow
            } else if tile == idx {
                Color::Green
            } else {
                Color::White
            };
            line.push(text, color);
        }
        f.push(line);
    }
    f.blank();
    f.push(Line::plain(format!("Moves: {}", p.moves())));
    if p.is_solved() {
        let msg = format!("🎉 Puzzle solved in {} moves!", p.moves());
        f.push(Line::colored(msg, Color::Green));
    } else {
        f.push(Line::plain("Pick two squares to swap their tiles."));
    }
}

fn crossword(f: &mut Frame, x: &CrosswordPuzzle) {
    for row in x.squares() {
        let mut line = Line::default();
        for sq in row {
            let (text, color) = match sq {
                Square::Block => ("  ".to_string(), Color::Reset),
                Square::Blank { .. } => ("_ ".to_string(), Color::DarkGrey),
                Square::Letter { letter, .. } => {
                    (format!("{letter} ").to_uppercase(), Color::White)
                }
            };
            line.push(text, color);
        }
        f.push(line);
    }
    f.blank();

    let mut heading = None;
    for (idx, (entry, guess)) in x.entries().enumerate() {
        if heading != Some(entry.orientation) {
            heading = Some(entry.orientation);
            let title = match entry.orientation {
                Orientation::Across => "Across",
                Orientation::Down => "Down",
            };
            f.push(Line::colored(title, Color::Cyan));
        }
        let mut line = Line::default();
        let pointer = if idx == x.cursor() { "> " } else { "  " };
        line.push(pointer, Color::Yellow);
        line.push(
            format!(
                "{:>2}. {} ({})  ",
                entry.number,
                entry.clue.as_deref().unwrap_or("?"),
                entry.answer.chars().count()
            ),
            Color::Reset,
        );
        let correct = x.is_entry_correct(idx);
        let color = if correct { Color::Green } else { Color::White };
        line.push(guess.to_uppercase(), color);
        if correct {
            line.push(" ✓", Color::Green);
        }
        f.push(line);
    }
}

fn memory(f: &mut Frame, m: &MemoryGame) {
    for (r, row) in m.cards().chunks(COLUMNS).enumerate() {
        let mut line = Line::default();
        for (c, card) in row.iter().enumerate() {
            let face = match card.state {
                CardState::Hidden => "?",
                CardState::Revealed | CardState::Matched => card.symbol.as_str(),
            };
            let pad = " ".repeat(CELL_W.saturating_sub(UnicodeWidthStr::width(face)));
            let color = if m.cursor() == Pos::new(r, c) {
                Color::Yellow
            } else if card.state == CardState::Matched {
                Color::Green
            } else {
                Color::White
            };
            line.push(format!("[ {face}{pad}] "), color);
        }
        f.push(line);
    }
    f.blank();
    f.push(Line::plain(format!("Moves: {}", m.moves())));
    if m.is_solved() {
        f.push(Line::colored("🎉 All pairs found!", Color::Green));
    }
}

fn chase(f: &mut Frame, g: &ChaseGame) {
    let mode = match g.mode() {
        ChaseMode::Chasing => "chasing".to_string(),
        ChaseMode::Fright => format!("fright {}", g.fright()),
    };
    f.push(Line::plain(format!(
        "Score: {}  Lives: {}  Pellets: {}  Ghosts: {}",
        g.score(),
        g.lives(),
        g.pellets_left(),
        mode
    )));
    let maze = g.maze();
    for row in 0..maze.rows() {
        let mut line = Line::default();
        for col in 0..maze.cols() {
            let (text, color) = chase_cell(g, Pos::new(row, col));
            line.push(pad_cell(text), color);
        }
        f.push(line);
    }
    let score = g.score();
    match g.status() {
        ChaseStatus::Playing => {}
        ChaseStatus::Won => {
            let msg = format!("🎉 Maze cleared! Final score: {score}");
            f.push(Line::colored(msg, Color::Green));
        }
        ChaseStatus::GameOver => {
            let msg = format!("GAME OVER - Final Score: {score} (press r to try again)");
            f.push(Line::colored(msg, Color::Red));
        }
    }
}

fn chase_cell(g: &ChaseGame, pos: Pos) -> (&'static str, Color) {
    if pos == g.player() {
        return ("😃", Color::Yellow);
    }
    if g.ghosts().contains(&pos) {
        return match g.mode() {
            ChaseMode::Fright => ("😱", Color::Blue),
            ChaseMode::Chasing => ("👻", Color::Red),
        };
    }
    if g.maze().tile(pos) == Tile::Wall {
        return ("██", Color::Blue);
    }
    if g.has_power(pos) {
        return ("● ", Color::Magenta);
    }
    if g.has_pellet(pos) {
        return ("· ", Color::White);
    }
    ("  ", Color::Reset)
}

fn pad_cell(text: &str) -> String {
    let w = UnicodeWidthStr::width(text);
    let mut s = text.to_string();
    for _ in w..CELL_W {
        s.push(' ');
    }
    s
}

/// Draws frames centred on the terminal, rewriting only changed lines.
pub struct Painter {
    last: Vec<Line>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Default for Painter {
    fn default() -> Self {
        Self::new()
    }
}

impl Painter {
    pub fn new() -> Self {
        Self {
            last: Vec::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 0,
        }
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn draw<W: Write>(
        &mut self,
        out: &mut W,
        frame: &Frame,
        term_size: (u16, u16),
    ) -> io::Result<()> {
        let (term_w, term_h) = term_size;
        let needed_w = frame.width() as u16;
        let needed_h = frame.lines.len() as u16;

        if term_w < needed_w || term_h < needed_h {
            out.queue(Clear(ClearType::All))?;
            out.queue(MoveTo(0, 0))?;
            out.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            )))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2;
        let moved = origin_x != self.origin_x || origin_y != self.origin_y;
        if moved || frame.lines.len() != self.last.len() {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        for (i, line) in frame.lines.iter().enumerate() {
            if !self.needs_full && self.last.get(i) == Some(line) {
                continue;
            }
            out.queue(MoveTo(0, self.origin_y + i as u16))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(MoveTo(self.origin_x, self.origin_y + i as u16))?;
            for span in &line.0 {
                out.queue(SetForegroundColor(span.color))?;
                out.queue(Print(&span.text))?;
            }
            out.queue(ResetColor)?;
        }
        self.last = frame.lines.clone();
        self.needs_full = false;
        out.flush()
    }
}
