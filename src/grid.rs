use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(self, other: Pos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Neighbour in `dir`, or `None` when it would leave a `rows` x `cols` board.
    pub fn step_within(self, dir: Dir, rows: usize, cols: usize) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let nr = self.row as isize + dr;
        let nc = self.col as isize + dc;
        if nr < 0 || nc < 0 {
            return None;
        }
        let (nr, nc) = (nr as usize, nc as usize);
        if nr >= rows || nc >= cols {
            return None;
        }
        Some(Pos::new(nr, nc))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }
}

/// Moves a cursor one step, staying put at the board edge.
pub fn nudge(pos: Pos, dir: Dir, rows: usize, cols: usize) -> Pos {
    pos.step_within(dir, rows, cols).unwrap_or(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_within_rejects_edges() {
        let origin = Pos::new(0, 0);
        assert_eq!(origin.step_within(Dir::Up, 3, 3), None);
        assert_eq!(origin.step_within(Dir::Left, 3, 3), None);
        assert_eq!(origin.step_within(Dir::Right, 3, 3), Some(Pos::new(0, 1)));
        assert_eq!(Pos::new(2, 2).step_within(Dir::Down, 3, 3), None);
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Pos::new(1, 5);
        let b = Pos::new(4, 2);
        assert_eq!(a.manhattan(b), 6);
        assert_eq!(b.manhattan(a), 6);
    }

    #[test]
    fn nudge_clamps_to_board() {
        assert_eq!(nudge(Pos::new(0, 2), Dir::Right, 3, 3), Pos::new(0, 2));
        assert_eq!(nudge(Pos::new(0, 2), Dir::Down, 3, 3), Pos::new(1, 2));
    }
}
