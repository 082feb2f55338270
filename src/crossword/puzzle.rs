use std::collections::HashMap;

use crate::crossword::layout::{Entry, Layout};
use crate::text::normalize_letter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrosswordAction {
    NextEntry,
    PrevEntry,
    Type(char),
    Erase,
}

/// What a single grid square shows to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Square {
    Block,
    Blank { number: Option<u32> },
    Letter { letter: char, number: Option<u32> },
}

/// Crossword room: one guess per entry, Across entries first.
#[derive(Clone, Debug)]
pub struct CrosswordPuzzle {
    layout: Layout,
    guesses: Vec<String>,
    cursor: usize,
}

impl CrosswordPuzzle {
    pub fn new(layout: Layout) -> Self {
        let guesses = vec![String::new(); layout.entries().count()];
        Self {
            layout,
            guesses,
            cursor: 0,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Entry, &str)> {
        self.layout
            .entries()
            .zip(self.guesses.iter().map(String::as_str))
    }

    pub fn apply(&mut self, action: CrosswordAction) {
        let count = self.guesses.len();
        if count == 0 {
            return;
        }
        match action {
            CrosswordAction::NextEntry => self.select((self.cursor + 1) % count),
            CrosswordAction::PrevEntry => self.select((self.cursor + count - 1) % count),
            CrosswordAction::Type(c) => {
                let Some(letter) = normalize_letter(c) else {
                    return;
                };
                let limit = self.entry_len(self.cursor);
                let guess = &mut self.guesses[self.cursor];
                if guess.chars().count() < limit {
                    guess.push(letter);
                }
            }
            CrosswordAction::Erase => {
                self.guesses[self.cursor].pop();
            }
        }
    }

    /// Moves to entry `idx`; an empty guess starts with the letters its
    /// crossings already supply, up to the first gap.
    fn select(&mut self, idx: usize) {
        self.cursor = idx;
        if !self.guesses[idx].is_empty() {
            return;
        }
        let typed = self.typed_cells();
        let Some(entry) = self.layout.entries().nth(idx) else {
            return;
        };
        let seed: String = entry
            .cells()
            .map_while(|cell| typed.get(&cell).copied())
            .collect();
        self.guesses[idx] = seed;
    }

    fn typed_cells(&self) -> HashMap<(usize, usize), char> {
        let mut typed = HashMap::new();
        for (entry, guess) in self.entries() {
            for (cell, letter) in entry.cells().zip(guess.chars()) {
                typed.insert(cell, letter);
            }
        }
        typed
    }

    fn entry_len(&self, idx: usize) -> usize {
        self.layout
            .entries()
            .nth(idx)
            .map(|e| e.answer.chars().count())
            .unwrap_or(0)
    }

    pub fn is_entry_correct(&self, idx: usize) -> bool {
        match (self.layout.entries().nth(idx), self.guesses.get(idx)) {
            (Some(entry), Some(guess)) => entry.answer == *guess,
            _ => false,
        }
    }

    pub fn is_solved(&self) -> bool {
        (0..self.guesses.len()).all(|i| self.is_entry_correct(i))
    }

    /// Guessed letters projected on the grid; later entries win on conflicts.
    pub fn squares(&self) -> Vec<Vec<Square>> {
        let typed = self.typed_cells();
        let grid = &self.layout.grid;
        (0..grid.rows)
            .map(|r| {
                (0..grid.cols)
                    .map(|c| {
                        if !grid.is_open(r, c) {
                            return Square::Block;
                        }
                        let number = self.layout.numbers.get(&(r, c)).copied();
                        match typed.get(&(r, c)) {
                            Some(&letter) => Square::Letter { letter, number },
                            None => Square::Blank { number },
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
