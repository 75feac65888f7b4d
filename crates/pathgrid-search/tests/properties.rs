//! Property tests for the incremental search engine.
//!
//! 1. A reachable goal is found within as many steps as there are reachable cells
//! 2. An unreachable goal exhausts after settling exactly the reachable set
//! 3. The reconstructed path length equals the goal's settled distance and
//!    the BFS distance
//! 4. Settled distances never change
//! 5. Re-initializing with the same input replays the same step sequence

use std::collections::{HashMap, VecDeque};

use pathgrid_core::{Coord, Grid};
use pathgrid_search::{SearchEngine, StepOutcome, StepReport};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Case {
    rows: usize,
    cols: usize,
    walls: Vec<bool>,
    start: usize,
    end: usize,
}

fn case_strategy() -> impl Strategy<Value = Case> {
    (1usize..9, 1usize..9).prop_flat_map(|(rows, cols)| {
        let n = rows * cols;
        (
            prop::collection::vec(prop::bool::weighted(0.3), n),
            0..n,
            0..n,
        )
            .prop_map(move |(walls, start, end)| Case {
                rows,
                cols,
                walls,
                start,
                end,
            })
    })
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn build(case: &Case) -> (Grid, Coord, Coord) {
    let mut grid = Grid::new(case.rows, case.cols).unwrap();
    let bounds = grid.bounds();
    let start = bounds.coord(case.start);
    let end = bounds.coord(case.end);
    for (i, &wall) in case.walls.iter().enumerate() {
        let p = bounds.coord(i);
        if wall && p != start && p != end {
            grid.set_wall(p, true).unwrap();
        }
    }
    (grid, start, end)
}

/// Plain BFS distances from `start`, independent of the engine.
fn bfs(grid: &Grid, start: Coord) -> HashMap<Coord, u32> {
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(start, 0);
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        let d = dist[&p];
        for n in grid.neighbors(p) {
            if !dist.contains_key(&n) {
                dist.insert(n, d + 1);
                queue.push_back(n);
            }
        }
    }
    dist
}

fn run(engine: &mut SearchEngine, grid: &Grid) -> Vec<StepReport> {
    let mut reports = Vec::new();
    loop {
        let r = engine.step(grid).unwrap();
        let done = r.outcome != StepOutcome::Continuing;
        reports.push(r);
        if done {
            return reports;
        }
    }
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn terminates_with_correct_outcome(case in case_strategy()) {
        let (grid, start, end) = build(&case);
        let reachable = bfs(&grid, start);

        let mut engine = SearchEngine::new();
        engine.initialize(&grid, start, end).unwrap();
        let reports = run(&mut engine, &grid);
        let last = reports.last().unwrap();

        if let Some(&goal_dist) = reachable.get(&end) {
            prop_assert_eq!(last.outcome, StepOutcome::Found);
            prop_assert!(engine.steps() <= reachable.len());
            let path = engine.path().unwrap();
            prop_assert_eq!(path.length() as u32, goal_dist);
            prop_assert_eq!(engine.distance(end), Some(goal_dist));
            prop_assert_eq!(path.start(), Some(start));
            prop_assert_eq!(path.end(), Some(end));
            for w in path.coords().windows(2) {
                prop_assert_eq!(w[0].manhattan(w[1]), 1);
                prop_assert!(!grid.is_wall(w[1]));
            }
        } else {
            prop_assert_eq!(last.outcome, StepOutcome::Exhausted);
            let mut settled: Vec<Coord> = engine.settled().collect();
            let mut expected: Vec<Coord> = reachable.keys().copied().collect();
            settled.sort();
            expected.sort();
            prop_assert_eq!(settled, expected);
        }
    }

    #[test]
    fn settled_distances_are_final(case in case_strategy()) {
        let (grid, start, end) = build(&case);
        let reachable = bfs(&grid, start);

        let mut engine = SearchEngine::new();
        engine.initialize(&grid, start, end).unwrap();
        let mut frozen: Vec<(Coord, u32)> = Vec::new();
        loop {
            let r = engine.step(&grid).unwrap();
            if let Some(p) = r.settled {
                let d = engine.distance(p).unwrap();
                prop_assert_eq!(Some(&d), reachable.get(&p));
                frozen.push((p, d));
            }
            for &(p, d) in &frozen {
                prop_assert_eq!(engine.distance(p), Some(d));
                prop_assert!(engine.is_settled(p));
            }
            if r.outcome != StepOutcome::Continuing {
                break;
            }
        }
    }

    #[test]
    fn reinitialize_replays_identically(case in case_strategy()) {
        let (grid, start, end) = build(&case);
        let mut engine = SearchEngine::new();

        engine.initialize(&grid, start, end).unwrap();
        let first = run(&mut engine, &grid);
        engine.initialize(&grid, start, end).unwrap();
        let second = run(&mut engine, &grid);

        prop_assert_eq!(first, second);
    }
}

// ── Scenarios ───────────────────────────────────────────────────────────

#[test]
fn tie_at_distance_three_pops_the_same_way_twice() {
    // Open 4x4 grid from the top-left corner: (0, 3), (1, 2), (2, 1) and
    // (3, 0) all sit at distance 3.
    let grid = Grid::new(4, 4).unwrap();
    let mut order = Vec::new();
    for _ in 0..2 {
        let mut engine = SearchEngine::new();
        engine
            .initialize(&grid, Coord::ORIGIN, Coord::new(3, 3))
            .unwrap();
        let settled_at_3: Vec<Coord> = run(&mut engine, &grid)
            .iter()
            .filter_map(|r| r.settled)
            .filter(|&p| engine.distance(p) == Some(3))
            .collect();
        order.push(settled_at_3);
    }
    assert_eq!(order[0], order[1]);
    assert_eq!(
        order[0],
        vec![
            Coord::new(0, 3),
            Coord::new(1, 2),
            Coord::new(2, 1),
            Coord::new(3, 0),
        ]
    );
}

#[test]
fn enclosed_goal_settles_everything_outside_the_wall() {
    // 5x5 grid, goal in the centre surrounded by a wall ring.
    let mut grid = Grid::new(5, 5).unwrap();
    for (r, c) in [(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2), (3, 3)] {
        grid.set_wall(Coord::new(r, c), true).unwrap();
    }
    let goal = Coord::new(2, 2);
    let mut engine = SearchEngine::new();
    engine.initialize(&grid, Coord::ORIGIN, goal).unwrap();
    let reports = run(&mut engine, &grid);

    assert_eq!(reports.last().unwrap().outcome, StepOutcome::Exhausted);
    // 25 cells, 8 walls, 1 enclosed goal.
    assert_eq!(engine.settled_count(), 16);
    assert!(!engine.is_settled(goal));
}
