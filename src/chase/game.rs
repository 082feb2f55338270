use std::collections::BTreeSet;

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chase::maze::{Level, Maze};
use crate::chase::stepper::advance_ghosts;
use crate::grid::{Dir, Pos};

const PELLET_SCORE: u32 = 10;
const POWER_SCORE: u32 = 50;
const GHOST_SCORE: u32 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseRules {
    pub lives: u32,
    pub fright_turns: u32,
}

impl Default for ChaseRules {
    fn default() -> Self {
        Self {
            lives: 3,
            fright_turns: 12,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChaseMode {
    Chasing,
    Fright,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChaseStatus {
    Playing,
    Won,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChaseAction {
    Move(Dir),
    Restart,
}

#[derive(Clone, Debug)]
pub struct ChaseGame {
    level: Level,
    rules: ChaseRules,
    player: Pos,
    ghosts: Vec<Pos>,
    pellets: BTreeSet<Pos>,
    power: BTreeSet<Pos>,
    score: u32,
    lives: u32,
    fright: u32,
    status: ChaseStatus,
}

impl ChaseGame {
    pub fn new(level: Level, rules: ChaseRules) -> Self {
        Self {
            player: level.player,
            ghosts: level.ghosts.clone(),
            pellets: level.pellets.clone(),
            power: level.power.clone(),
            score: 0,
            lives: rules.lives,
            fright: 0,
            status: ChaseStatus::Playing,
            level,
            rules,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.level.maze
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn ghosts(&self) -> &[Pos] {
        &self.ghosts
    }

    pub fn has_pellet(&self, pos: Pos) -> bool {
        self.pellets.contains(&pos)
    }

    pub fn has_power(&self, pos: Pos) -> bool {
        self.power.contains(&pos)
    }

    pub fn pellets_left(&self) -> usize {
        self.pellets.len() + self.power.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn fright(&self) -> u32 {
        self.fright
    }

    pub fn status(&self) -> ChaseStatus {
        self.status
    }

    pub fn mode(&self) -> ChaseMode {
        if self.fright > 0 {
            ChaseMode::Fright
        } else {
            ChaseMode::Chasing
        }
    }

    pub fn is_won(&self) -> bool {
        self.status == ChaseStatus::Won
    }

    pub fn apply(&mut self, action: ChaseAction, rng: &mut impl Rng) {
        match action {
            ChaseAction::Restart => *self = ChaseGame::new(self.level.clone(), self.rules),
            ChaseAction::Move(dir) => {
                if self.status == ChaseStatus::Playing {
                    self.turn(dir, rng);
                }
            }
        }
    }

    fn turn(&mut self, dir: Dir, rng: &mut impl Rng) {
        let Some(next) = self.level.maze.step(self.player, dir) else {
            return;
        };
        self.player = next;
        self.consume_tile();
        self.handle_collisions();
        if self.status != ChaseStatus::Playing {
            return;
        }
        if self.pellets.is_empty() && self.power.is_empty() {
            info!("chase cleared with score {}", self.score);
            self.status = ChaseStatus::Won;
            return;
        }

        self.ghosts = advance_ghosts(
            &self.level.maze,
            self.player,
            &self.ghosts,
            self.fright,
            rng,
        );
        self.handle_collisions();
        self.tick_fright();
    }

    fn consume_tile(&mut self) {
        if self.pellets.remove(&self.player) {
            self.score += PELLET_SCORE;
        } else if self.power.remove(&self.player) {
            self.score += POWER_SCORE;
            self.fright = self.rules.fright_turns;
        }
    }

    fn tick_fright(&mut self) {
        if self.fright > 0 {
            self.fright -= 1;
        }
    }

    fn handle_collisions(&mut self) {
        if self.status != ChaseStatus::Playing {
            return;
        }
        let hits: Vec<usize> = self
            .ghosts
            .iter()
            .enumerate()
            .filter(|(_, g)| **g == self.player)
            .map(|(idx, _)| idx)
            .collect();
        if hits.is_empty() {
            return;
        }

        if self.fright > 0 {
            for idx in hits {
                self.score += GHOST_SCORE;
                self.ghosts[idx] = self.level.ghosts[idx];
            }
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        self.player = self.level.player;
        self.ghosts = self.level.ghosts.clone();
        self.fright = 0;
        if self.lives == 0 {
            info!("chase lost with score {}", self.score);
            self.status = ChaseStatus::GameOver;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game(art: &[&str], rules: ChaseRules) -> ChaseGame {
        ChaseGame::new(Level::parse(art).unwrap(), rules)
    }

    #[test]
    fn eating_pellets_scores_and_clearing_wins() {
        let mut g = game(&["P..", "###", "G  "], ChaseRules::default());
        let mut rng = StdRng::seed_from_u64(3);
        g.apply(ChaseAction::Move(Dir::Right), &mut rng);
        assert_eq!(g.score(), 10);
        assert_eq!(g.status(), ChaseStatus::Playing);
        g.apply(ChaseAction::Move(Dir::Right), &mut rng);
        assert_eq!(g.score(), 20);
        assert!(g.is_won());
        g.apply(ChaseAction::Move(Dir::Left), &mut rng);
        assert_eq!(g.player(), Pos::new(0, 2));
    }

    #[test]
    fn bumping_a_wall_costs_no_turn() {
        let mut g = game(&["P#.", " G "], ChaseRules::default());
        let mut rng = StdRng::seed_from_u64(3);
        g.apply(ChaseAction::Move(Dir::Right), &mut rng);
        assert_eq!(g.player(), Pos::new(0, 0));
        assert_eq!(g.ghosts(), &[Pos::new(1, 1)]);
    }

    #[test]
    fn power_cell_frightens_and_ghost_is_sent_home() {
        let rules = ChaseRules {
            lives: 3,
            fright_turns: 5,
        };
        let mut g = game(&["Po G.", "#####"], rules);
        let mut rng = StdRng::seed_from_u64(9);
        g.apply(ChaseAction::Move(Dir::Right), &mut rng);
        assert_eq!(g.score(), 50);
        assert_eq!(g.mode(), ChaseMode::Fright);
        // The ghost flees to the right, fright ticks once per turn.
        assert_eq!(g.ghosts(), &[Pos::new(0, 4)]);
        assert_eq!(g.fright(), 4);
        g.apply(ChaseAction::Move(Dir::Right), &mut rng);
        g.apply(ChaseAction::Move(Dir::Right), &mut rng);
        // Cornered at the end of the row, the ghost is forced back and eaten.
        assert_eq!(g.score(), 50 + GHOST_SCORE);
        assert_eq!(g.lives(), 3);
    }

    #[test]
    fn caught_while_chasing_loses_a_life_and_keeps_pellets() {
        let rules = ChaseRules {
            lives: 2,
            fright_turns: 5,
        };
        let mut g = game(&["P.G..", "#####"], rules);
        let mut rng = StdRng::seed_from_u64(1);
        g.apply(ChaseAction::Move(Dir::Right), &mut rng);
        assert_eq!(g.lives(), 1);
        assert_eq!(g.player(), Pos::new(0, 0));
        assert_eq!(g.ghosts(), &[Pos::new(0, 2)]);
        assert!(!g.has_pellet(Pos::new(0, 1)));
        assert_eq!(g.score(), 10);

        g.apply(ChaseAction::Move(Dir::Right), &mut rng);
        assert_eq!(g.status(), ChaseStatus::GameOver);
        g.apply(ChaseAction::Move(Dir::Right), &mut rng);
        assert_eq!(g.player(), Pos::new(0, 0));

        g.apply(ChaseAction::Restart, &mut rng);
        assert_eq!(g.status(), ChaseStatus::Playing);
        assert_eq!(g.lives(), 2);
        assert!(g.has_pellet(Pos::new(0, 1)));
    }
}
