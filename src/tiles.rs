use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{nudge, Dir, Pos};

pub const MIN_SIZE: usize = 3;
pub const MAX_SIZE: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleAction {
    MoveCursor(Dir),
    Select,
    Shuffle,
}

/// Tile-swap picture puzzle: pick two squares to exchange their tiles.
#[derive(Clone, Debug)]
pub struct SwapPuzzle {
    size: usize,
    order: Vec<usize>,
    selected: Option<usize>,
    cursor: Pos,
    moves: u32,
    solved: bool,
}

impl SwapPuzzle {
    pub fn new(size: usize, rng: &mut impl Rng) -> Self {
        let size = size.clamp(MIN_SIZE, MAX_SIZE);
        let mut puzzle = Self {
            size,
            order: (0..size * size).collect(),
            selected: None,
            cursor: Pos::new(0, 0),
            moves: 0,
            solved: false,
        };
        puzzle.shuffle(rng);
        puzzle
    }

    /// A puzzle laid out in a given order, for tests and replays.
    pub fn from_order(size: usize, order: Vec<usize>) -> Self {
        let solved = is_identity(&order);
        Self {
            size,
            order,
            selected: None,
            cursor: Pos::new(0, 0),
            moves: 0,
            solved,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Tile shown at board position `idx` (row-major).
    pub fn tile_at(&self, idx: usize) -> usize {
        self.order[idx]
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn apply(&mut self, action: PuzzleAction, rng: &mut impl Rng) {
        match action {
            PuzzleAction::MoveCursor(dir) => {
                self.cursor = nudge(self.cursor, dir, self.size, self.size)
            }
            PuzzleAction::Select => self.select(self.cursor.row * self.size + self.cursor.col),
            PuzzleAction::Shuffle => self.shuffle(rng),
        }
    }

    pub fn select(&mut self, pos: usize) {
        if self.solved || pos >= self.order.len() {
            return;
        }
        match self.selected.take() {
            None => self.selected = Some(pos),
            Some(first) => {
                if first != pos {
                    self.order.swap(first, pos);
                    self.moves += 1;
                }
                if is_identity(&self.order) {
                    self.solved = true;
                }
            }
        }
    }

    fn shuffle(&mut self, rng: &mut impl Rng) {
        self.order = (0..self.size * self.size).collect();
        while is_identity(&self.order) {
            self.order.shuffle(rng);
        }
        self.selected = None;
        self.moves = 0;
        self.solved = false;
    }
}

fn is_identity(order: &[usize]) -> bool {
    order.iter().enumerate().all(|(i, &t)| i == t)
}
