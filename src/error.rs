use thiserror::Error;

/// Fatal problems with authored crossword content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("no clues were given")]
    NoClues,
    #[error("answer for clue {clue:?} has no letters after normalization")]
    EmptyAnswer { clue: String },
    #[error("word {word:?} could not be placed within the scan window")]
    Unplaceable { word: String },
}

/// Problems parsing a chase level from its ASCII art.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze has no rows")]
    Empty,
    #[error("maze row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown maze glyph {glyph:?} at row {row}, col {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("maze has no player start")]
    MissingPlayer,
    #[error("second player start at row {row}, col {col}")]
    ExtraPlayer { row: usize, col: usize },
}

/// Authored content that cannot be turned into playable rooms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("crossword: {0}")]
    Layout(#[from] LayoutError),
    #[error("chase maze: {0}")]
    Maze(#[from] MazeError),
    #[error("crossword answer for clue {clue:?} needs at least two letters")]
    ShortAnswer { clue: String },
    #[error("memory game needs at least one symbol")]
    NoSymbols,
}
