use rand::seq::SliceRandom;
use rand::Rng;

use crate::chase::maze::Maze;
use crate::grid::Pos;

/// Moves every ghost one open cell: toward the player while `fright_turns`
/// is zero, away from it otherwise. Ties are broken at random; a boxed-in
/// ghost stays where it is.
pub fn advance_ghosts(
    maze: &Maze,
    player: Pos,
    ghosts: &[Pos],
    fright_turns: u32,
    rng: &mut impl Rng,
) -> Vec<Pos> {
    let flee = fright_turns > 0;
    ghosts
        .iter()
        .map(|&ghost| ghost_next_pos(maze, ghost, player, flee, rng))
        .collect()
}

fn ghost_next_pos(maze: &Maze, ghost: Pos, player: Pos, flee: bool, rng: &mut impl Rng) -> Pos {
    let mut options = Vec::new();
    let mut best: Option<usize> = None;
    for next in maze.open_neighbors(ghost) {
        let d = next.manhattan(player);
        let better = match best {
            None => true,
            Some(b) if flee => d > b,
            Some(b) => d < b,
        };
        if better {
            best = Some(d);
            options.clear();
            options.push(next);
        } else if best == Some(d) {
            options.push(next);
        }
    }
    options.choose(rng).copied().unwrap_or(ghost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chase::maze::Level;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    #[test]
    fn pursuing_ghost_closes_in_along_an_open_row() {
        let maze = Maze::open(1, 4);
        let mut rng = StdRng::seed_from_u64(7);
        let next = advance_ghosts(&maze, Pos::new(0, 3), &[Pos::new(0, 0)], 0, &mut rng);
        assert_eq!(next, vec![Pos::new(0, 1)]);
    }

    #[test]
    fn frightened_ghost_backs_away() {
        let maze = Maze::open(1, 5);
        let mut rng = StdRng::seed_from_u64(7);
        let next = advance_ghosts(&maze, Pos::new(0, 4), &[Pos::new(0, 2)], 3, &mut rng);
        assert_eq!(next, vec![Pos::new(0, 1)]);
    }

    #[test]
    fn walled_in_ghost_stays_put() {
        let level = Level::parse(&["###", "#G#", "###", "P  "]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let next = advance_ghosts(&level.maze, level.player, &level.ghosts, 0, &mut rng);
        assert_eq!(next, level.ghosts);
    }

    #[test]
    fn ties_only_pick_among_best_moves() {
        // Player diagonal from the ghost: up and left are both one step closer.
        let maze = Maze::open(3, 3);
        let player = Pos::new(0, 0);
        let ghost = Pos::new(1, 1);
        let mut seen = BTreeSet::new();
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            seen.insert(advance_ghosts(&maze, player, &[ghost], 0, &mut rng)[0]);
        }
        assert_eq!(seen, BTreeSet::from([Pos::new(0, 1), Pos::new(1, 0)]));
    }
}
