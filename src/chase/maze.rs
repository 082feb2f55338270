use std::collections::BTreeSet;

use crate::error::MazeError;
use crate::grid::{Dir, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Open,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    rows: usize,
    cols: usize,
    tiles: Vec<Vec<Tile>>,
}

impl Maze {
    pub fn new(tiles: Vec<Vec<Tile>>) -> Self {
        let rows = tiles.len();
        let cols = tiles.first().map_or(0, Vec::len);
        Self { rows, cols, tiles }
    }

    /// A maze with no walls at all.
    pub fn open(rows: usize, cols: usize) -> Self {
        Self::new(vec![vec![Tile::Open; cols]; rows])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile(&self, pos: Pos) -> Tile {
        self.tiles
            .get(pos.row)
            .and_then(|r| r.get(pos.col))
            .copied()
            .unwrap_or(Tile::Wall)
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        self.tile(pos) == Tile::Open
    }

    /// Target of a move from `pos`, if it stays inside and lands on an open cell.
    pub fn step(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        pos.step_within(dir, self.rows, self.cols)
            .filter(|next| self.is_open(*next))
    }

    pub fn open_neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        Dir::ALL
            .into_iter()
            .filter_map(move |dir| self.step(pos, dir))
    }
}

/// A chase level as authored: walls, spawns, pellets and power cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub maze: Maze,
    pub player: Pos,
    pub ghosts: Vec<Pos>,
    pub pellets: BTreeSet<Pos>,
    pub power: BTreeSet<Pos>,
}

impl Level {
    /// Parses ASCII art: `#` wall, `.` pellet, `o` power cell, `P` player,
    /// `G` ghost, space for an empty corridor.
    pub fn parse<S: AsRef<str>>(art: &[S]) -> Result<Self, MazeError> {
        if art.is_empty() {
            return Err(MazeError::Empty);
        }
        let expected = art[0].as_ref().chars().count();
        if expected == 0 {
            return Err(MazeError::Empty);
        }

        let mut tiles = Vec::with_capacity(art.len());
        let mut player = None;
        let mut ghosts = Vec::new();
        let mut pellets = BTreeSet::new();
        let mut power = BTreeSet::new();

        for (row, line) in art.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != expected {
                return Err(MazeError::Ragged {
                    row,
                    expected,
                    found,
                });
            }
            let mut tile_row = Vec::with_capacity(expected);
            for (col, glyph) in line.chars().enumerate() {
                let pos = Pos::new(row, col);
                let tile = match glyph {
                    '#' => Tile::Wall,
                    ' ' => Tile::Open,
                    '.' => {
                        pellets.insert(pos);
                        Tile::Open
                    }
                    'o' => {
                        power.insert(pos);
                        Tile::Open
                    }
                    'P' => {
                        if player.is_some() {
                            return Err(MazeError::ExtraPlayer { row, col });
                        }
                        player = Some(pos);
                        Tile::Open
                    }
                    'G' => {
                        ghosts.push(pos);
                        Tile::Open
                    }
                    _ => return Err(MazeError::UnknownGlyph { glyph, row, col }),
                };
                tile_row.push(tile);
            }
            tiles.push(tile_row);
        }

        Ok(Self {
            maze: Maze::new(tiles),
            player: player.ok_or(MazeError::MissingPlayer)?,
            ghosts,
            pellets,
            power,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_glyphs_into_sets() {
        let level = Level::parse(&["#####", "#P.o#", "# G #", "#####"]).unwrap();
        assert_eq!(level.maze.rows(), 4);
        assert_eq!(level.maze.cols(), 5);
        assert_eq!(level.player, Pos::new(1, 1));
        assert_eq!(level.ghosts, vec![Pos::new(2, 2)]);
        assert!(level.pellets.contains(&Pos::new(1, 2)));
        assert!(level.power.contains(&Pos::new(1, 3)));
        assert!(!level.maze.is_open(Pos::new(0, 0)));
        assert!(level.maze.is_open(Pos::new(2, 1)));
    }

    #[test]
    fn rejects_malformed_art() {
        assert_eq!(Level::parse::<&str>(&[]), Err(MazeError::Empty));
        assert_eq!(
            Level::parse(&["###", "#P"]),
            Err(MazeError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Level::parse(&["#P#", "#x#"]),
            Err(MazeError::UnknownGlyph {
                glyph: 'x',
                row: 1,
                col: 1
            })
        );
        assert_eq!(Level::parse(&["#.#"]), Err(MazeError::MissingPlayer));
        assert_eq!(
            Level::parse(&["PP"]),
            Err(MazeError::ExtraPlayer { row: 0, col: 1 })
        );
    }

    #[test]
    fn steps_stop_at_walls_and_edges() {
        let level = Level::parse(&["P #"]).unwrap();
        let maze = &level.maze;
        assert_eq!(maze.step(Pos::new(0, 0), Dir::Right), Some(Pos::new(0, 1)));
        assert_eq!(maze.step(Pos::new(0, 1), Dir::Right), None);
        assert_eq!(maze.step(Pos::new(0, 0), Dir::Up), None);
        assert_eq!(
            maze.open_neighbors(Pos::new(0, 1)).collect::<Vec<_>>(),
            vec![Pos::new(0, 0)]
        );
    }
}
