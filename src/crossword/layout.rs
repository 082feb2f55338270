//! Greedy crossword auto-layout.
//!
//! Words are placed one at a time in input order on an unbounded signed grid.
//! Each word first tries to cross a letter that is already on the board; if no
//! crossing fits it is dropped into the first free line past the occupied
//! area. Nothing is ever moved once committed, so the result depends only on
//! the input order.

use std::collections::{BTreeMap, HashMap};

use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::text::normalize_answer;

/// Signed board coordinate `(row, col)` used while placing.
pub type Coord = (i32, i32);

/// Row-major clue numbering of the compacted grid.
pub type NumberMap = BTreeMap<(usize, usize), u32>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Across,
    Down,
}

impl Orientation {
    fn step(self) -> Coord {
        match self {
            Orientation::Across => (0, 1),
            Orientation::Down => (1, 0),
        }
    }

    pub fn perpendicular(self) -> Orientation {
        match self {
            Orientation::Across => Orientation::Down,
            Orientation::Down => Orientation::Across,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub prompt: String,
    pub answer: String,
}

impl Clue {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedWord {
    pub word: String,
    pub clue: String,
    pub orientation: Orientation,
    pub anchor: Coord,
}

impl PlacedWord {
    pub fn cells(&self) -> impl Iterator<Item = (Coord, char)> + '_ {
        let (dr, dc) = self.orientation.step();
        let (r0, c0) = self.anchor;
        self.word
            .chars()
            .enumerate()
            .map(move |(i, ch)| {
                let i = i as i32;
                ((r0 + dr * i, c0 + dc * i), ch)
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Orientation of the seed word and of fallback placements.
    pub seed: Orientation,
    /// How many lines past the occupied area the fallback scan may try.
    pub scan_limit: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            seed: Orientation::Across,
            scan_limit: 64,
        }
    }
}

/// The board translated so that its top-left occupied extent is `(0, 0)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompactGrid {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<Option<char>>,
}

impl CompactGrid {
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col]
    }

    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// One string per row, `.` for blocks.
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.rows)
            .map(|r| {
                (0..self.cols)
                    .map(|c| self.get(r, c).unwrap_or('.'))
                    .collect()
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub number: u32,
    pub orientation: Orientation,
    pub row: usize,
    pub col: usize,
    pub answer: String,
    /// Prompt of the clue whose normalized answer reads this run.
    pub clue: Option<String>,
}

impl Entry {
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let across = self.orientation == Orientation::Across;
        (0..self.answer.chars().count()).map(move |i| {
            if across {
                (self.row, self.col + i)
            } else {
                (self.row + i, self.col)
            }
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub grid: CompactGrid,
    pub numbers: NumberMap,
    pub across: Vec<Entry>,
    pub down: Vec<Entry>,
    /// Placed words with anchors in compacted coordinates.
    pub words: Vec<PlacedWord>,
}

impl Layout {
    /// Across entries followed by Down entries.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.across.iter().chain(self.down.iter())
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Occupant {
    letter: char,
    across: bool,
    down: bool,
}

impl Occupant {
    fn used_by(&self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Across => self.across,
            Orientation::Down => self.down,
        }
    }
}

#[derive(Default)]
struct Board {
    cells: HashMap<Coord, Occupant>,
    index: IndexMap<char, IndexSet<Coord>>,
}

impl Board {
    fn occupied(&self, at: Coord) -> bool {
        self.cells.contains_key(&at)
    }

    /// Strict check: letters agree, no parallel overlap, no abutting runs and
    /// no new side contact with letters outside the crossing.
    fn fits(&self, letters: &[char], anchor: Coord, orientation: Orientation) -> bool {
        let (dr, dc) = orientation.step();
        let (pr, pc) = orientation.perpendicular().step();
        let len = letters.len() as i32;
        let before = (anchor.0 - dr, anchor.1 - dc);
        let after = (anchor.0 + dr * len, anchor.1 + dc * len);
        if self.occupied(before) || self.occupied(after) {
            return false;
        }
        for (i, &ch) in letters.iter().enumerate() {
            let at = (anchor.0 + dr * i as i32, anchor.1 + dc * i as i32);
            match self.cells.get(&at) {
                Some(occ) => {
                    if occ.letter != ch || occ.used_by(orientation) {
                        return false;
                    }
                }
                None => {
                    let after = (at.0 + pr, at.1 + pc);
                    let before = (at.0 - pr, at.1 - pc);
                    if self.occupied(after) || self.occupied(before) {
                        return false;
                    }
                }
            }
        }
        true
    }

    fn commit(&mut self, word: &PlacedWord) {
        for (at, ch) in word.cells() {
            let occ = self.cells.entry(at).or_insert(Occupant {
                letter: ch,
                ..Occupant::default()
            });
            match word.orientation {
                Orientation::Across => occ.across = true,
                Orientation::Down => occ.down = true,
            }
            self.index.entry(ch).or_default().insert(at);
        }
    }

    fn crossing(&self, letters: &[char]) -> Option<(Coord, Orientation)> {
        for (i, ch) in letters.iter().enumerate() {
            let Some(spots) = self.index.get(ch) else {
                continue;
            };
            for &at in spots {
                let occ = self.cells[&at];
                let orientation = match (occ.across, occ.down) {
                    (true, false) => Orientation::Down,
                    (false, true) => Orientation::Across,
                    _ => continue,
                };
                let (dr, dc) = orientation.step();
                let anchor = (at.0 - dr * i as i32, at.1 - dc * i as i32);
                if self.fits(letters, anchor, orientation) {
                    return Some((anchor, orientation));
                }
            }
        }
        None
    }

    fn bounds(&self) -> Option<(Coord, Coord)> {
        let mut keys = self.cells.keys();
        let first = *keys.next()?;
        let (mut lo, mut hi) = (first, first);
        for &(r, c) in keys {
            lo = (lo.0.min(r), lo.1.min(c));
            hi = (hi.0.max(r), hi.1.max(c));
        }
        Some((lo, hi))
    }

    /// First free line past the occupied area, scanning along its extent.
    fn scan(&self, letters: &[char], orientation: Orientation, scan_limit: u32) -> Option<Coord> {
        let ((min_r, min_c), (max_r, max_c)) = self.bounds()?;
        for offset in 1..=scan_limit as i32 {
            match orientation {
                Orientation::Across => {
                    let row = max_r + offset;
                    for col in min_c..=max_c {
                        if self.fits(letters, (row, col), orientation) {
                            return Some((row, col));
                        }
                    }
                }
                Orientation::Down => {
                    let col = max_c + offset;
                    for row in min_r..=max_r {
                        if self.fits(letters, (row, col), orientation) {
                            return Some((row, col));
                        }
                    }
                }
            }
        }
        None
    }
}

/// Lays out `clues` in order and derives numbering and entry lists.
pub fn build_layout(clues: &[Clue], options: &LayoutOptions) -> Result<Layout, LayoutError> {
    if clues.is_empty() {
        return Err(LayoutError::NoClues);
    }

    let mut normalized = Vec::with_capacity(clues.len());
    for clue in clues {
        let word = normalize_answer(&clue.answer);
        if word.is_empty() {
            return Err(LayoutError::EmptyAnswer {
                clue: clue.prompt.clone(),
            });
        }
        normalized.push(word);
    }

    let mut board = Board::default();
    let mut placed: Vec<PlacedWord> = Vec::with_capacity(clues.len());

    for (clue, word) in clues.iter().zip(&normalized) {
        let letters: Vec<char> = word.chars().collect();
        let (anchor, orientation) = if placed.is_empty() {
            ((0, 0), options.seed)
        } else if let Some(spot) = board.crossing(&letters) {
            spot
        } else {
            let anchor = board
                .scan(&letters, options.seed, options.scan_limit)
                .ok_or_else(|| LayoutError::Unplaceable { word: word.clone() })?;
            warn!("no crossing for {word:?}, placed alone at {anchor:?}");
            (anchor, options.seed)
        };
        debug!("placed {word:?} {orientation:?} at {anchor:?}");
        let pw = PlacedWord {
            word: word.clone(),
            clue: clue.prompt.clone(),
            orientation,
            anchor,
        };
        board.commit(&pw);
        placed.push(pw);
    }

    let (grid, origin) = compact(&board);
    for pw in &mut placed {
        pw.anchor = (pw.anchor.0 - origin.0, pw.anchor.1 - origin.1);
    }
    let numbers = number_cells(&grid);

    let (across, down) = collect_entries(&grid, &numbers, &ClueIndex::new(&placed));

    Ok(Layout {
        grid,
        numbers,
        across,
        down,
        words: placed,
    })
}

fn compact(board: &Board) -> (CompactGrid, Coord) {
    let Some(((min_r, min_c), (max_r, max_c))) = board.bounds() else {
        return (
            CompactGrid {
                rows: 0,
                cols: 0,
                cells: Vec::new(),
            },
            (0, 0),
        );
    };
    let rows = (max_r - min_r + 1) as usize;
    let cols = (max_c - min_c + 1) as usize;
    let mut cells = vec![None; rows * cols];
    for (&(r, c), occ) in &board.cells {
        let idx = (r - min_r) as usize * cols + (c - min_c) as usize;
        cells[idx] = Some(occ.letter);
    }
    (CompactGrid { rows, cols, cells }, (min_r, min_c))
}

fn starts_across(grid: &CompactGrid, r: usize, c: usize) -> bool {
    grid.is_open(r, c) && (c == 0 || !grid.is_open(r, c - 1)) && grid.is_open(r, c + 1)
}

fn starts_down(grid: &CompactGrid, r: usize, c: usize) -> bool {
    grid.is_open(r, c) && (r == 0 || !grid.is_open(r - 1, c)) && grid.is_open(r + 1, c)
}

/// Numbers every run start in row-major order.
pub fn number_cells(grid: &CompactGrid) -> NumberMap {
    let mut numbers = NumberMap::new();
    let mut next = 1;
    for r in 0..grid.rows {
        for c in 0..grid.cols {
            if starts_across(grid, r, c) || starts_down(grid, r, c) {
                numbers.insert((r, c), next);
                next += 1;
            }
        }
    }
    numbers
}

/// Finds the prompt for a run: first the word placed at that start and
/// orientation, then any placed word with the same letters.
struct ClueIndex<'a> {
    by_start: HashMap<((usize, usize), Orientation), &'a PlacedWord>,
    by_word: HashMap<&'a str, &'a str>,
}

impl<'a> ClueIndex<'a> {
    fn new(placed: &'a [PlacedWord]) -> Self {
        let mut by_start = HashMap::new();
        let mut by_word = HashMap::new();
        for pw in placed {
            let (r, c) = pw.anchor;
            if r >= 0 && c >= 0 {
                let start = (r as usize, c as usize);
                by_start.insert((start, pw.orientation), pw);
            }
            by_word.entry(pw.word.as_str()).or_insert(pw.clue.as_str());
        }
        Self { by_start, by_word }
    }

    fn prompt(
        &self,
        start: (usize, usize),
        orientation: Orientation,
        answer: &str,
    ) -> Option<String> {
        match self.by_start.get(&(start, orientation)) {
            Some(pw) if pw.word == answer => Some(pw.clue.clone()),
            _ => self.by_word.get(answer).map(|p| p.to_string()),
        }
    }
}

fn collect_entries(
    grid: &CompactGrid,
    numbers: &NumberMap,
    clues: &ClueIndex<'_>,
) -> (Vec<Entry>, Vec<Entry>) {
    let mut across = Vec::new();
    let mut down = Vec::new();
    for (&(r, c), &number) in numbers {
        if starts_across(grid, r, c) {
            let answer: String = (c..grid.cols).map_while(|cc| grid.get(r, cc)).collect();
            let clue = clues.prompt((r, c), Orientation::Across, &answer);
            across.push(Entry {
                number,
                orientation: Orientation::Across,
                row: r,
                col: c,
                answer,
                clue,
            });
        }
        if starts_down(grid, r, c) {
            let answer: String = (r..grid.rows).map_while(|rr| grid.get(rr, c)).collect();
            let clue = clues.prompt((r, c), Orientation::Down, &answer);
            down.push(Entry {
                number,
                orientation: Orientation::Down,
                row: r,
                col: c,
                answer,
                clue,
            });
        }
    }
    (across, down)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clues(pairs: &[(&str, &str)]) -> Vec<Clue> {
        pairs.iter().map(|(p, a)| Clue::new(*p, *a)).collect()
    }

    fn layout_of(pairs: &[(&str, &str)]) -> Result<Layout, LayoutError> {
        build_layout(&clues(pairs), &LayoutOptions::default())
    }

    #[test]
    fn two_words_share_their_common_letter() {
        let layout = layout_of(&[("a", "AB"), ("b", "BC")]).unwrap();
        assert_eq!(layout.grid.rows, 2);
        assert_eq!(layout.grid.cols, 2);
        assert_eq!(layout.grid.occupied(), 3);
        assert_eq!(
            layout.grid.to_lines(),
            vec!["ab".to_string(), ".c".to_string()]
        );
        assert_eq!(layout.words[1].orientation, Orientation::Down);
        assert_eq!(layout.words[1].anchor, (0, 1));
    }

    #[test]
    fn numbering_shares_a_number_for_double_starts() {
        let layout = layout_of(&[("x", "cat"), ("y", "cow")]).unwrap();
        // "cow" crosses the leading c going down.
        assert_eq!(layout.numbers.get(&(0, 0)), Some(&1));
        assert_eq!(layout.numbers.len(), 1);
        assert_eq!(layout.across[0].number, 1);
        assert_eq!(layout.down[0].number, 1);
        assert_eq!(layout.across[0].clue.as_deref(), Some("x"));
        assert_eq!(layout.down[0].clue.as_deref(), Some("y"));
    }

    #[test]
    fn repeated_answers_keep_their_own_prompts() {
        let pairs = [("x", "cat"), ("y", "a"), ("z", "cat")];
        let layout = layout_of(&pairs).unwrap();
        assert_eq!(layout.across[0].answer, "cat");
        assert_eq!(layout.across[0].clue.as_deref(), Some("x"));
        assert_eq!(layout.down[0].answer, "cat");
        assert_eq!(layout.down[0].clue.as_deref(), Some("z"));
    }

    #[test]
    fn rejects_answers_without_letters() {
        let err = layout_of(&[("ok", "fine"), ("year", "2025")]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::EmptyAnswer {
                clue: "year".to_string()
            }
        );
    }

    #[test]
    fn rejects_empty_clue_list() {
        assert_eq!(layout_of(&[]), Err(LayoutError::NoClues));
    }

    #[test]
    fn words_without_shared_letters_fall_back_below() {
        let layout = layout_of(&[("a", "abc"), ("b", "xyz")]).unwrap();
        assert_eq!(layout.words[1].orientation, Orientation::Across);
        assert_eq!(
            layout.grid.to_lines(),
            vec!["abc".to_string(), "...".to_string(), "xyz".to_string()]
        );
    }

    #[test]
    fn zero_scan_limit_makes_fallback_fatal() {
        let options = LayoutOptions {
            scan_limit: 0,
            ..LayoutOptions::default()
        };
        let pairs = clues(&[("a", "abc"), ("b", "xyz")]);
        let err = build_layout(&pairs, &options).unwrap_err();
        assert_eq!(
            err,
            LayoutError::Unplaceable {
                word: "xyz".to_string()
            }
        );
    }

    #[test]
    fn seed_orientation_is_respected() {
        let options = LayoutOptions {
            seed: Orientation::Down,
            ..LayoutOptions::default()
        };
        let layout = build_layout(&clues(&[("a", "abc")]), &options).unwrap();
        assert_eq!(layout.grid.rows, 3);
        assert_eq!(layout.grid.cols, 1);
        assert_eq!(layout.down.len(), 1);
        assert!(layout.across.is_empty());
    }

    #[test]
    fn parallel_overlap_is_rejected() {
        let board = {
            let mut b = Board::default();
            b.commit(&PlacedWord {
                word: "ab".into(),
                clue: String::new(),
                orientation: Orientation::Across,
                anchor: (0, 0),
            });
            b
        };
        assert!(!board.fits(&['a', 'b'], (0, 0), Orientation::Across));
        assert!(!board.fits(&['b', 'c'], (0, 2), Orientation::Across));
        assert!(board.fits(&['b', 'c'], (0, 1), Orientation::Down));
        // Side contact with the seed's first letter.
        assert!(!board.fits(&['x', 'c'], (1, 0), Orientation::Across));
    }
}
