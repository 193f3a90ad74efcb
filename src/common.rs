/// Grid coordinate as `(x, y)`, column first.
pub type Position = (usize, usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<N = Position> {
    /// Longest simple route found and its total weight.
    Longest { length: usize, route: Vec<N> },
    /// The goal cannot be reached without revisiting a node.
    Unreachable,
    /// The expansion budget ran out before the search space was exhausted.
    BudgetExceeded { expanded: usize },
}

impl<N> SearchOutcome<N> {
    pub fn length(&self) -> Option<usize> {
        match self {
            SearchOutcome::Longest { length, .. } => Some(*length),
            _ => None,
        }
    }

    pub fn map_route<M, F>(self, f: F) -> SearchOutcome<M>
    where
        F: FnMut(N) -> M,
    {
        match self {
            SearchOutcome::Longest { length, route } => SearchOutcome::Longest {
                length,
                route: route.into_iter().map(f).collect(),
            },
            SearchOutcome::Unreachable => SearchOutcome::Unreachable,
            SearchOutcome::BudgetExceeded { expanded } => {
                SearchOutcome::BudgetExceeded { expanded }
            }
        }
    }
}
