//! A small gift: a password gate in front of four puzzle rooms that unlock
//! one after another, and a countdown to the big day.
//!
//! The interesting pieces are [`crossword::build_layout`], which lays a list
//! of clue answers out as a crossing grid, and [`chase::advance_ghosts`],
//! which moves the maze ghosts toward or away from the player.

pub mod app;
pub mod chase;
pub mod config;
pub mod content;
pub mod countdown;
pub mod crossword;
pub mod error;
pub mod grid;
pub mod input;
pub mod memory;
pub mod progress;
pub mod render;
pub mod storage;
pub mod term;
pub mod text;
pub mod tiles;

pub use chase::advance_ghosts;
pub use crossword::build_layout;
pub use error::{ContentError, LayoutError, MazeError};
