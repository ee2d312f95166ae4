#![allow(missing_docs)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snake_evo::simulation::environment::SnakeGame;
use snake_evo::simulation::error::SimulationError;
use snake_evo::simulation::grid::{Cell, Direction};
use snake_evo::simulation::params::Params;

fn cells(coords: &[(i32, i32)]) -> Vec<Cell> {
    coords.iter().map(|&(x, y)| Cell::new(x, y)).collect()
}

fn body_of(game: &SnakeGame) -> Vec<Cell> {
    game.body().iter().copied().collect()
}

#[test]
fn test_new_game_layout() {
    let mut rng = StdRng::seed_from_u64(1);
    let params = Params::default();
    let game = SnakeGame::new(&params, &mut rng).unwrap();

    assert!(game.is_alive());
    assert_eq!(game.score(), 0);
    assert_eq!(game.direction(), Direction::Right);
    assert_eq!(body_of(&game), cells(&[(10, 10), (9, 10), (8, 10)]));
    assert!(!game.body().contains(&game.food()));
    assert!(game.food().in_bounds(20));
}

#[test]
fn test_move_without_food_keeps_length() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut game = SnakeGame::from_parts(
        20,
        cells(&[(5, 5), (4, 5), (3, 5)]),
        Direction::Right,
        Cell::new(15, 15),
    )
    .unwrap();

    let outcome = game.step(Direction::Right, &mut rng).unwrap();
    assert!(outcome.alive);
    assert!(!outcome.ate_food);
    assert_eq!(outcome.score_delta(), 0);
    assert_eq!(body_of(&game), cells(&[(6, 5), (5, 5), (4, 5)]));
}

#[test]
fn test_reversal_is_ignored() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut game = SnakeGame::from_parts(
        20,
        cells(&[(5, 5), (4, 5), (3, 5)]),
        Direction::Right,
        Cell::new(15, 15),
    )
    .unwrap();

    let outcome = game.step(Direction::Left, &mut rng).unwrap();
    assert!(outcome.alive);
    assert_eq!(game.direction(), Direction::Right);
    assert_eq!(game.head(), Cell::new(6, 5));
}

#[test]
fn test_turn_changes_heading() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut game = SnakeGame::from_parts(
        20,
        cells(&[(5, 5), (4, 5), (3, 5)]),
        Direction::Right,
        Cell::new(15, 15),
    )
    .unwrap();

    game.step(Direction::Up, &mut rng).unwrap();
    assert_eq!(game.direction(), Direction::Up);
    assert_eq!(game.head(), Cell::new(5, 4));
}

#[test]
fn test_eating_grows_and_respawns_food() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut game = SnakeGame::from_parts(
        20,
        cells(&[(5, 5), (4, 5), (3, 5)]),
        Direction::Right,
        Cell::new(6, 5),
    )
    .unwrap();

    let outcome = game.step(Direction::Right, &mut rng).unwrap();
    assert!(outcome.alive);
    assert!(outcome.ate_food);
    assert_eq!(outcome.score_delta(), 1);
    assert_eq!(outcome.distance_delta, -1);
    assert_eq!(game.score(), 1);
    assert_eq!(body_of(&game), cells(&[(6, 5), (5, 5), (4, 5), (3, 5)]));
    assert!(!game.body().contains(&game.food()));
}

#[test]
fn test_distance_delta_sign() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut game = SnakeGame::from_parts(
        20,
        cells(&[(5, 5), (4, 5)]),
        Direction::Right,
        Cell::new(10, 5),
    )
    .unwrap();
    assert_eq!(game.step(Direction::Right, &mut rng).unwrap().distance_delta, -1);
    assert_eq!(game.step(Direction::Up, &mut rng).unwrap().distance_delta, 1);
}

#[test]
fn test_wall_collision_freezes_game() {
    let mut rng = StdRng::seed_from_u64(7);
    let body = cells(&[(19, 5), (18, 5), (17, 5)]);
    let food = Cell::new(0, 0);
    let mut game = SnakeGame::from_parts(20, body.clone(), Direction::Right, food).unwrap();

    let outcome = game.step(Direction::Right, &mut rng).unwrap();
    assert!(!outcome.alive);
    assert!(!outcome.ate_food);
    assert!(!game.is_alive());
    assert_eq!(body_of(&game), body);
    assert_eq!(game.food(), food);

    // Later steps are no-ops
    for dir in Direction::ALL {
        let outcome = game.step(dir, &mut rng).unwrap();
        assert!(!outcome.alive);
        assert_eq!(outcome.distance_delta, 0);
    }
    assert_eq!(body_of(&game), body);
    assert_eq!(game.food(), food);
    assert_eq!(game.score(), 0);
}

#[test]
fn test_wall_collision_on_each_edge() {
    let mut rng = StdRng::seed_from_u64(8);
    let cases = [
        ((0, 5), Direction::Left),
        ((5, 0), Direction::Up),
        ((5, 19), Direction::Down),
        ((19, 5), Direction::Right),
    ];
    for ((x, y), heading) in cases {
        let mut game =
            SnakeGame::from_parts(20, cells(&[(x, y)]), heading, Cell::new(10, 10)).unwrap();
        assert!(!game.step(heading, &mut rng).unwrap().alive, "{heading:?}");
    }
}

#[test]
fn test_self_collision() {
    let mut rng = StdRng::seed_from_u64(9);
    // Heading left with the body curling below the head
    let body = cells(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)]);
    let mut game =
        SnakeGame::from_parts(20, body.clone(), Direction::Left, Cell::new(15, 15)).unwrap();

    let outcome = game.step(Direction::Down, &mut rng).unwrap();
    assert!(!outcome.alive);
    assert_eq!(body_of(&game), body);
}

#[test]
fn test_moving_into_tail_is_fatal() {
    let mut rng = StdRng::seed_from_u64(10);
    // The tail would move away this tick, but the cell still counts as occupied
    let body = cells(&[(5, 5), (5, 6), (6, 6), (6, 5)]);
    let mut game = SnakeGame::from_parts(20, body, Direction::Up, Cell::new(15, 15)).unwrap();

    assert!(!game.step(Direction::Right, &mut rng).unwrap().alive);
}

#[test]
fn test_danger_matches_lethality() {
    let game = SnakeGame::from_parts(
        20,
        cells(&[(19, 0), (18, 0), (17, 0)]),
        Direction::Right,
        Cell::new(10, 10),
    )
    .unwrap();
    assert!(game.danger(Direction::Right));
    assert!(game.danger(Direction::Up));
    assert!(game.danger(Direction::Left));
    assert!(!game.danger(Direction::Down));
}

#[test]
fn test_food_never_on_body_during_random_play() {
    let mut rng = StdRng::seed_from_u64(11);
    let params = Params {
        grid_size: 6,
        ..Params::default()
    };

    for _ in 0..50 {
        let mut game = SnakeGame::new(&params, &mut rng).unwrap();
        for _ in 0..200 {
            let action = Direction::ALL[rng.random_range(0..4)];
            let outcome = game.step(action, &mut rng).unwrap();
            if !outcome.alive {
                break;
            }
            assert!(!game.body().contains(&game.food()));
            assert!(game.food().in_bounds(6));
        }
    }
}

#[test]
fn test_filling_the_board_reports_saturation() {
    let mut rng = StdRng::seed_from_u64(12);
    // 2x2 board: eating the last free cell leaves nowhere for food
    let mut game = SnakeGame::from_parts(
        2,
        cells(&[(0, 1), (0, 0), (1, 0)]),
        Direction::Down,
        Cell::new(1, 1),
    )
    .unwrap();

    assert_eq!(
        game.step(Direction::Right, &mut rng),
        Err(SimulationError::BoardSaturated { cells: 4 })
    );

    // The failed meal ends the life without committing the move
    assert!(!game.is_alive());
    assert_eq!(game.score(), 0);
    assert_eq!(body_of(&game), cells(&[(0, 1), (0, 0), (1, 0)]));
    assert_eq!(game.food(), Cell::new(1, 1));
    assert!(!game.body().contains(&game.food()));
    assert!(!game.step(Direction::Right, &mut rng).unwrap().alive);
}

#[test]
fn test_from_parts_rejects_bad_layouts() {
    assert!(matches!(
        SnakeGame::from_parts(20, Vec::new(), Direction::Right, Cell::new(1, 1)),
        Err(SimulationError::InvalidLayout { .. })
    ));
    assert!(matches!(
        SnakeGame::from_parts(20, cells(&[(1, 1), (0, 1)]), Direction::Right, Cell::new(0, 1)),
        Err(SimulationError::InvalidLayout { .. })
    ));
}
