mod graph;
mod grid;

pub use graph::GraphSolver;
pub use grid::GridSolver;

use crate::common::SearchOutcome;
use crate::config::Config;
use crate::map::Map;
use crate::stat::Stats;

use anyhow::anyhow;

pub trait Solver {
    fn solve(&mut self, config: &Config) -> SearchOutcome;

    fn stats(&self) -> &Stats;
}

/// Builds the solver named in the config for one movement regime.
pub fn build_solver(name: &str, map: &Map, directed: bool) -> anyhow::Result<Box<dyn Solver>> {
    match name {
        "graph" => Ok(Box::new(GraphSolver::new(map, directed))),
        "grid" => Ok(Box::new(GridSolver::new(map, directed))),
        other => Err(anyhow!("Unknown solver {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("info")
            .try_init();
    }

    // Walled-in square maze with the entry top left and the exit bottom right.
    fn random_map<R: Rng>(size: usize, rng: &mut R) -> Map {
        let mut rows = Vec::with_capacity(size);
        for y in 0..size {
            let row: String = (0..size)
                .map(|x| {
                    if y == 0 {
                        if x == 1 { '.' } else { '#' }
                    } else if y == size - 1 {
                        if x == size - 2 { '.' } else { '#' }
                    } else if x == 0 || x == size - 1 {
                        '#'
                    } else {
                        let roll: f64 = rng.gen();
                        if roll < 0.65 {
                            '.'
                        } else if roll < 0.85 {
                            '#'
                        } else {
                            ['^', 'v', '<', '>'][rng.gen_range(0..4)]
                        }
                    }
                })
                .collect();
            rows.push(row);
        }
        Map::parse(&rows).unwrap()
    }

    fn assert_valid_grid_route(map: &Map, outcome: &SearchOutcome, directed: bool) {
        if let SearchOutcome::Longest { length, route } = outcome {
            assert_eq!(route.len(), length + 1);
            assert_eq!(route.first(), Some(&map.entry));
            assert_eq!(route.last(), Some(&map.exit));
            let distinct: HashSet<_> = route.iter().collect();
            assert_eq!(distinct.len(), route.len());
            for step in route.windows(2) {
                assert!(map.neighbors(step[0], directed).contains(&step[1]));
            }
        }
    }

    #[test]
    fn test_build_solver_by_name() {
        let map = Map::from_file("map_file/test/corridor.map").unwrap();
        let config = Config::default();
        for name in ["graph", "grid"] {
            let mut solver = build_solver(name, &map, true).unwrap();
            assert_eq!(solver.solve(&config).length(), Some(2));
            assert_eq!(solver.stats().solver, name);
        }
        assert!(build_solver("cbs", &map, true).is_err());
    }

    #[test]
    fn test_condensed_search_matches_grid_search() {
        init_tracing();
        let mut rng = StdRng::seed_from_u64(23);
        let config = Config::default();

        for _ in 0..100 {
            let map = random_map(7, &mut rng);
            let mut lengths = Vec::new();
            for directed in [true, false] {
                let graph_outcome = GraphSolver::new(&map, directed).solve(&config);
                let grid_outcome = GridSolver::new(&map, directed).solve(&config);
                assert_valid_grid_route(&map, &grid_outcome, directed);
                assert_eq!(graph_outcome.length(), grid_outcome.length(), "\n{map}");
                lengths.push(graph_outcome.length());
            }

            // Following slopes can only lose routes.
            match (lengths[0], lengths[1]) {
                (Some(sloped), Some(free)) => assert!(sloped <= free, "\n{map}"),
                (Some(_), None) => panic!("slopes reach the exit but free movement does not\n{map}"),
                _ => {}
            }
        }
    }
}
