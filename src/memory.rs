use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{nudge, Dir, Pos};

pub const COLUMNS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    Hidden,
    Revealed,
    Matched,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub symbol: String,
    pub state: CardState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryAction {
    MoveCursor(Dir),
    Flip,
    Restart,
}

/// Matching-pairs game. A wrong pair stays face-up until the next flip.
#[derive(Clone, Debug)]
pub struct MemoryGame {
    symbols: Vec<String>,
    cards: Vec<Card>,
    cursor: Pos,
    first: Option<usize>,
    mismatch: Option<(usize, usize)>,
    moves: u32,
}

impl MemoryGame {
    pub fn new(symbols: &[String], rng: &mut impl Rng) -> Self {
        let mut game = Self {
            symbols: symbols.to_vec(),
            cards: Vec::new(),
            cursor: Pos::new(0, 0),
            first: None,
            mismatch: None,
            moves: 0,
        };
        game.deal(rng);
        game
    }

    /// Cards in a fixed order, for tests.
    pub fn from_symbols_in_order(order: &[&str]) -> Self {
        let cards = order
            .iter()
            .map(|s| Card {
                symbol: s.to_string(),
                state: CardState::Hidden,
            })
            .collect();
        let mut symbols: Vec<String> = order.iter().map(|s| s.to_string()).collect();
        symbols.sort();
        symbols.dedup();
        Self {
            symbols,
            cards,
            cursor: Pos::new(0, 0),
            first: None,
            mismatch: None,
            moves: 0,
        }
    }

    fn deal(&mut self, rng: &mut impl Rng) {
        self.cards = self
            .symbols
            .iter()
            .chain(self.symbols.iter())
            .map(|s| Card {
                symbol: s.clone(),
                state: CardState::Hidden,
            })
            .collect();
        self.cards.shuffle(rng);
        self.cursor = Pos::new(0, 0);
        self.first = None;
        self.mismatch = None;
        self.moves = 0;
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn rows(&self) -> usize {
        self.cards.len().div_ceil(COLUMNS)
    }

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_solved(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.state == CardState::Matched)
    }

    pub fn apply(&mut self, action: MemoryAction, rng: &mut impl Rng) {
        match action {
            MemoryAction::MoveCursor(dir) => {
                let next = nudge(self.cursor, dir, self.rows(), COLUMNS);
                if next.row * COLUMNS + next.col < self.cards.len() {
                    self.cursor = next;
                }
            }
            MemoryAction::Flip => self.flip(self.cursor.row * COLUMNS + self.cursor.col),
            MemoryAction::Restart => self.deal(rng),
        }
    }

    pub fn flip(&mut self, idx: usize) {
        if let Some((a, b)) = self.mismatch.take() {
            self.cards[a].state = CardState::Hidden;
            self.cards[b].state = CardState::Hidden;
        }
        match self.cards.get(idx) {
            Some(card) if card.state == CardState::Hidden => {}
            _ => return,
        }
        self.cards[idx].state = CardState::Revealed;

        let Some(first) = self.first.take() else {
            self.first = Some(idx);
            return;
        };
        self.moves += 1;
        if self.cards[first].symbol == self.cards[idx].symbol {
            self.cards[first].state = CardState::Matched;
            self.cards[idx].state = CardState::Matched;
        } else {
            self.mismatch = Some((first, idx));
        }
    }
}
