use giftbox::chase::{
    advance_ghosts, ChaseAction, ChaseGame, ChaseRules, ChaseStatus, Level, Maze, Tile,
};
use giftbox::grid::{Dir, Pos};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_maze(rng: &mut StdRng, rows: usize, cols: usize) -> Maze {
    let tiles = (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| {
                    if rng.gen_bool(0.3) {
                        Tile::Wall
                    } else {
                        Tile::Open
                    }
                })
                .collect()
        })
        .collect();
    Maze::new(tiles)
}

fn random_open(rng: &mut StdRng, maze: &Maze) -> Option<Pos> {
    let open: Vec<Pos> = (0..maze.rows())
        .flat_map(|r| (0..maze.cols()).map(move |c| Pos::new(r, c)))
        .filter(|p| maze.is_open(*p))
        .collect();
    if open.is_empty() {
        None
    } else {
        Some(open[rng.gen_range(0..open.len())])
    }
}

#[test]
fn ghosts_take_a_best_scoring_neighbour() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let maze = random_maze(&mut rng, 7, 9);
        let player = random_open(&mut rng, &maze);
        let ghost = random_open(&mut rng, &maze);
        let (Some(player), Some(ghost)) = (player, ghost) else {
            continue;
        };
        let dists: Vec<usize> = maze
            .open_neighbors(ghost)
            .map(|n| n.manhattan(player))
            .collect();

        let chased = advance_ghosts(&maze, player, &[ghost], 0, &mut rng)[0];
        let fled = advance_ghosts(&maze, player, &[ghost], 4, &mut rng)[0];
        match (dists.iter().min(), dists.iter().max()) {
            (Some(&lo), Some(&hi)) => {
                assert_eq!(chased.manhattan(player), lo);
                assert_eq!(fled.manhattan(player), hi);
                assert_eq!(chased.manhattan(ghost), 1);
                assert!(maze.is_open(chased) && maze.is_open(fled));
            }
            _ => {
                assert_eq!(chased, ghost);
                assert_eq!(fled, ghost);
            }
        }
    }
}

#[test]
fn every_ghost_moves_independently() {
    let maze = Maze::open(1, 7);
    let mut rng = StdRng::seed_from_u64(11);
    let ghosts = [Pos::new(0, 0), Pos::new(0, 6)];
    let next = advance_ghosts(&maze, Pos::new(0, 3), &ghosts, 0, &mut rng);
    assert_eq!(next, vec![Pos::new(0, 1), Pos::new(0, 5)]);
}

#[test]
fn a_full_round_can_be_won() {
    let art = ["#######", "#P...o#", "#######", "#G    #", "#######"];
    let level = Level::parse(&art).unwrap();
    let mut game = ChaseGame::new(level, ChaseRules::default());
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..4 {
        game.apply(ChaseAction::Move(Dir::Right), &mut rng);
    }
    assert_eq!(game.status(), ChaseStatus::Won);
    assert_eq!(game.score(), 3 * 10 + 50);
    assert_eq!(game.pellets_left(), 0);
}
