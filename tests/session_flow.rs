use sandtrix::{Cell, Command, Grid, LineClearer, Phase, Session, SimConfig};
use std::time::Duration;

fn small_config(seed: u64) -> SimConfig {
    SimConfig {
        width: 10,
        height: 20,
        scale: 1,
        seed: Some(seed),
        ..SimConfig::default()
    }
}

fn lowest_occupied_row(grid: &Grid) -> Option<usize> {
    (0..grid.height())
        .rev()
        .find(|&y| (0..grid.width()).any(|x| grid.is_occupied(x, y)))
}

#[test]
fn toy_grid_row_clears() {
    let mut grid = Grid::new(6, 4);
    for x in 0..6 {
        grid.set(x, 2, Cell::Sand(0));
    }
    let mut clearer = LineClearer::new(6, 4);
    assert_eq!(clearer.clear_lines(&mut grid), 6);
    assert!((0..6).all(|x| grid.get(x, 2) == Some(Cell::Empty)));
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn hard_drop_lands_on_floor_and_promotes_next() {
    let mut s = Session::new(small_config(11)).unwrap();
    let next = s.next().clone();
    assert!(s.apply(Command::HardDrop));

    assert_eq!(s.grid().occupied_count(), 4);
    assert_eq!(lowest_occupied_row(s.grid()), Some(19));
    assert_eq!(s.active().kind, next.kind);
    assert_eq!(s.active().color, next.color);
    assert_eq!(s.active().y, 0);
    assert_eq!(s.snapshot().pieces_locked, 1);
}

#[test]
fn stacking_to_the_top_ends_the_game_until_reset() {
    let mut s = Session::new(small_config(3)).unwrap();
    for _ in 0..100 {
        if s.snapshot().game_over {
            break;
        }
        s.apply(Command::HardDrop);
    }
    assert_eq!(s.phase(), Phase::GameOver);

    let grid = s.grid().clone();
    for _ in 0..30 {
        let snap = s.tick(Duration::from_millis(50));
        assert!(snap.game_over);
        assert_eq!(snap.last_cleared, 0);
    }
    assert_eq!(s.grid(), &grid);
    assert!(!s.apply(Command::Rotate));

    assert!(s.apply(Command::NewGame));
    let snap = s.snapshot();
    assert_eq!(snap.phase, Phase::Playing);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.pieces_locked, 0);
    assert_eq!(s.grid().occupied_count(), 0);
}

#[test]
fn same_seed_replays_the_same_game() {
    let play = |seed| {
        let mut s = Session::new(small_config(seed)).unwrap();
        for i in 0..200 {
            match i % 7 {
                0 => s.apply(Command::MoveLeft),
                3 => s.apply(Command::Rotate),
                5 => s.apply(Command::HardDrop),
                _ => false,
            };
            s.tick(Duration::from_millis(20));
        }
        (s.grid().clone(), s.snapshot())
    };
    assert_eq!(play(42), play(42));
}

#[test]
fn invalid_config_is_an_error() {
    let cfg = SimConfig {
        scale: 0,
        ..SimConfig::default()
    };
    let err = Session::new(cfg).unwrap_err();
    assert_eq!(err.to_string(), "scale must be at least 1");
}
