use super::Solver;
use crate::algorithm::longest_simple_path;
use crate::common::SearchOutcome;
use crate::config::Config;
use crate::map::Map;
use crate::stat::Stats;

use std::time::Instant;
use tracing::{info, warn};

// Above this many passable cells an uncondensed search is rarely practical.
const LARGE_GRID_CELLS: usize = 400;

/// Searches cell by cell without condensing corridors first. Exponential in
/// the number of open cells; meant for small maps and for cross-checking
/// [`super::GraphSolver`].
pub struct GridSolver {
    map: Map,
    directed: bool,
    stats: Stats,
}

impl GridSolver {
    pub fn new(map: &Map, directed: bool) -> Self {
        let mut stats = Stats::new("grid", directed);
        for y in 0..map.height {
            for x in 0..map.width {
                if map.is_passable((x, y)) {
                    stats.vertices += 1;
                    stats.edges += map.neighbors((x, y), directed).len();
                }
            }
        }
        GridSolver {
            map: map.clone(),
            directed,
            stats,
        }
    }
}

impl Solver for GridSolver {
    fn solve(&mut self, config: &Config) -> SearchOutcome {
        let solve_start_time = Instant::now();
        self.stats.expanded_states = 0;
        if self.stats.vertices > LARGE_GRID_CELLS && config.budget.is_none() {
            warn!(
                "grid search over {} cells without a budget may not finish",
                self.stats.vertices
            );
        }

        let map = &self.map;
        let directed = self.directed;
        let outcome = longest_simple_path(
            map.entry,
            map.exit,
            |pos| {
                map.neighbors(pos, directed)
                    .into_iter()
                    .map(|next| (next, 1))
            },
            config.budget,
            &mut self.stats,
        );

        self.stats.time_us = solve_start_time.elapsed().as_micros() as usize;
        self.stats.length = outcome.length();
        self.stats.print();
        if let SearchOutcome::BudgetExceeded { expanded } = outcome {
            info!("grid search aborted after {expanded} states");
        }

        outcome
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_map_with_slopes() {
        let map = Map::from_file("map_file/test/sample.map").unwrap();
        let mut solver = GridSolver::new(&map, true);
        let outcome = solver.solve(&Config::default());
        assert_eq!(outcome.length(), Some(94));
        if let SearchOutcome::Longest { route, .. } = outcome {
            assert_eq!(route.len(), 95);
        }
    }

    #[test]
    fn test_route_follows_the_corridor() {
        let map = Map::from_file("map_file/test/corridor.map").unwrap();
        let outcome = GridSolver::new(&map, false).solve(&Config::default());
        assert_eq!(
            outcome,
            SearchOutcome::Longest {
                length: 2,
                route: vec![(1, 0), (1, 1), (1, 2)],
            }
        );
    }

    #[test]
    fn test_unreachable_exit() {
        let map: Map = "#.#\n###\n#.#".parse().unwrap();
        for directed in [true, false] {
            assert_eq!(
                GridSolver::new(&map, directed).solve(&Config::default()),
                SearchOutcome::Unreachable
            );
        }
    }
}
