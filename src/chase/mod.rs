pub mod game;
pub mod maze;
pub mod stepper;

pub use game::{ChaseAction, ChaseGame, ChaseMode, ChaseRules, ChaseStatus};
pub use maze::{Level, Maze, Tile};
pub use stepper::advance_ghosts;
