pub mod layout;
pub mod puzzle;

pub use layout::{
    build_layout, Clue, CompactGrid, Entry, Layout, LayoutOptions, NumberMap, Orientation,
    PlacedWord,
};
pub use puzzle::{CrosswordAction, CrosswordPuzzle, Square};
