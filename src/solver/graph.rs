use super::Solver;
use crate::algorithm::longest_simple_path;
use crate::common::SearchOutcome;
use crate::config::Config;
use crate::graph::{condense, CompressedGraph};
use crate::map::Map;
use crate::stat::Stats;

use std::time::Instant;
use tracing::info;

/// Searches the condensed graph, so only decision points are branched on.
pub struct GraphSolver {
    graph: CompressedGraph,
    stats: Stats,
}

impl GraphSolver {
    pub fn new(map: &Map, directed: bool) -> Self {
        let graph = condense(map, directed);
        let mut stats = Stats::new("graph", directed);
        stats.vertices = graph.vertex_count();
        stats.edges = graph.edge_count();
        GraphSolver { graph, stats }
    }

    pub fn graph(&self) -> &CompressedGraph {
        &self.graph
    }
}

impl Solver for GraphSolver {
    fn solve(&mut self, config: &Config) -> SearchOutcome {
        let solve_start_time = Instant::now();
        self.stats.expanded_states = 0;

        let graph = &self.graph;
        let outcome = longest_simple_path(
            graph.entry(),
            graph.exit(),
            move |vertex| graph.edges(vertex).iter().map(|edge| (edge.to, edge.weight)),
            config.budget,
            &mut self.stats,
        )
        .map_route(|vertex| graph.position(vertex));

        self.stats.time_us = solve_start_time.elapsed().as_micros() as usize;
        self.stats.length = outcome.length();
        self.stats.print();
        if let SearchOutcome::BudgetExceeded { expanded } = outcome {
            info!("graph search aborted after {expanded} states");
        }

        outcome
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }
}
