use crate::common::SearchOutcome;
use crate::stat::Stats;

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, instrument, trace};

/// One partial route on the frontier. Each state is owned by its stack slot
/// and dropped once it has been expanded.
#[derive(Debug, Clone)]
struct SearchState<N> {
    route: Vec<N>,
    visited: HashSet<N>,
    weight: usize,
}

impl<N: Copy + Eq + Hash> SearchState<N> {
    fn new(start: N) -> Self {
        SearchState {
            route: vec![start],
            visited: HashSet::from([start]),
            weight: 0,
        }
    }

    // The route is never empty.
    fn current(&self) -> N {
        self.route[self.route.len() - 1]
    }

    fn contains(&self, node: &N) -> bool {
        self.visited.contains(node)
    }

    fn extend(&self, next: N, weight: usize) -> Self {
        let mut state = self.clone();
        state.route.push(next);
        state.visited.insert(next);
        state.weight += weight;
        state
    }
}

/// Exhaustive depth-first search for the heaviest simple route from `start`
/// to `goal`.
///
/// `successors` yields `(next, weight)` pairs. Routes stop as soon as they reach
/// `goal`. When `budget` is set and that many states have been expanded while
/// work remains, the search gives up with [`SearchOutcome::BudgetExceeded`].
#[instrument(skip_all, name = "longest_simple_path", fields(start = ?start, goal = ?goal), level = "debug")]
pub fn longest_simple_path<N, F, I>(
    start: N,
    goal: N,
    mut successors: F,
    budget: Option<usize>,
    stats: &mut Stats,
) -> SearchOutcome<N>
where
    N: Copy + Eq + Hash + Debug,
    F: FnMut(N) -> I,
    I: IntoIterator<Item = (N, usize)>,
{
    let mut frontier = vec![SearchState::new(start)];
    let mut best: Option<SearchState<N>> = None;
    let mut expanded = 0;

    while let Some(state) = frontier.pop() {
        if budget.is_some_and(|limit| expanded >= limit) {
            debug!("budget exhausted after {expanded} states");
            return SearchOutcome::BudgetExceeded { expanded };
        }
        expanded += 1;
        stats.expanded_states += 1;

        let current = state.current();
        if current == goal {
            // Strictly greater keeps the first maximum found.
            if best.as_ref().map_or(true, |best| state.weight > best.weight) {
                trace!("new longest route of length {}", state.weight);
                best = Some(state);
            }
            continue;
        }

        for (next, weight) in successors(current) {
            if !state.contains(&next) {
                frontier.push(state.extend(next, weight));
            }
        }
    }

    debug!("search finished after {expanded} states");
    match best {
        Some(state) => SearchOutcome::Longest {
            length: state.weight,
            route: state.route,
        },
        None => SearchOutcome::Unreachable,
    }
}
