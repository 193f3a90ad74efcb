use crate::common::Position;
use crate::map::Map;

use std::collections::HashMap;
use tracing::{debug, instrument, trace};

pub type VertexId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: VertexId,
    pub weight: usize, // Grid steps along the corridor
}

/// Decision points of a map joined by weighted corridors.
///
/// Vertex `0` is always the entry and vertex `1` the exit. Parallel corridors
/// stay separate edges, and a corridor that loops back to its own vertex is a
/// self-edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedGraph {
    vertices: Vec<Position>,
    index: HashMap<Position, VertexId>,
    adjacency: Vec<Vec<Edge>>,
    directed: bool,
}

impl CompressedGraph {
    fn with_endpoints(entry: Position, exit: Position, directed: bool) -> Self {
        let mut graph = CompressedGraph {
            vertices: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            directed,
        };
        graph.insert_vertex(entry);
        graph.insert_vertex(exit);
        graph
    }

    // Returns the vertex handle and whether it was newly created.
    fn insert_vertex(&mut self, position: Position) -> (VertexId, bool) {
        if let Some(&id) = self.index.get(&position) {
            return (id, false);
        }
        let id = self.vertices.len();
        self.vertices.push(position);
        self.index.insert(position, id);
        self.adjacency.push(Vec::new());
        (id, true)
    }

    fn add_edge(&mut self, from: VertexId, to: VertexId, weight: usize) {
        self.adjacency[from].push(Edge { to, weight });
    }

    pub fn entry(&self) -> VertexId {
        0
    }

    pub fn exit(&self) -> VertexId {
        1
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of adjacency entries. In the undirected case every corridor is
    /// counted once from each end.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn position(&self, vertex: VertexId) -> Position {
        self.vertices[vertex]
    }

    pub fn vertex(&self, position: Position) -> Option<VertexId> {
        self.index.get(&position).copied()
    }

    pub fn vertices(&self) -> impl Iterator<Item = Position> + '_ {
        self.vertices.iter().copied()
    }

    pub fn edges(&self, vertex: VertexId) -> &[Edge] {
        &self.adjacency[vertex]
    }

    /// Sorted weights of every edge leaving `from` towards `to`.
    pub fn weights_between(&self, from: VertexId, to: VertexId) -> Vec<usize> {
        let mut weights: Vec<usize> = self.adjacency[from]
            .iter()
            .filter(|edge| edge.to == to)
            .map(|edge| edge.weight)
            .collect();
        weights.sort_unstable();
        weights
    }
}

// Bookkeeping that only lives for one condensation pass.
struct Condenser<'a> {
    map: &'a Map,
    directed: bool,
    live: Vec<bool>, // Row-major, false for walls and filled dead ends
}

impl<'a> Condenser<'a> {
    fn new(map: &'a Map, directed: bool) -> Self {
        let mut condenser = Condenser {
            map,
            directed,
            live: map
                .grid
                .iter()
                .flatten()
                .map(|cell| cell.is_passable())
                .collect(),
        };
        condenser.fill_dead_ends();
        condenser
    }

    fn index(&self, (x, y): Position) -> usize {
        y * self.map.width + x
    }

    fn is_live(&self, pos: Position) -> bool {
        self.live[self.index(pos)]
    }

    // A cell with at most one live neighbor can never be crossed by a simple
    // route from entry to exit, so drop it and recheck whatever it touched.
    fn fill_dead_ends(&mut self) {
        let mut stack: Vec<Position> = (0..self.map.height)
            .flat_map(|y| (0..self.map.width).map(move |x| (x, y)))
            .filter(|&pos| self.is_live(pos))
            .collect();
        let mut filled = 0;

        while let Some(pos) = stack.pop() {
            if !self.is_live(pos) || pos == self.map.entry || pos == self.map.exit {
                continue;
            }
            let remaining = self.live_neighbors(pos, false);
            if remaining.len() <= 1 {
                let index = self.index(pos);
                self.live[index] = false;
                filled += 1;
                stack.extend(remaining);
            }
        }

        debug!("filled {filled} dead-end cells");
    }

    fn live_neighbors(&self, pos: Position, directed: bool) -> Vec<Position> {
        self.map
            .neighbors(pos, directed)
            .into_iter()
            .filter(|&next| self.is_live(next))
            .collect()
    }

    fn is_vertex(&self, pos: Position) -> bool {
        pos == self.map.entry || pos == self.map.exit || self.live_neighbors(pos, false).len() >= 3
    }

    /// Follows the corridor that leaves `origin` through `first` until it reaches
    /// a vertex. Returns that vertex and the number of steps, or `None` when the
    /// corridor cannot be walked to the end.
    fn walk(&self, origin: Position, first: Position) -> Option<(Position, usize)> {
        let mut previous = origin;
        let mut current = first;
        let mut steps = 1;

        loop {
            if self.is_vertex(current) {
                return Some((current, steps));
            }

            let mut onward = self
                .live_neighbors(current, self.directed)
                .into_iter()
                .filter(|&next| next != previous);
            match (onward.next(), onward.next()) {
                (Some(next), None) => {
                    previous = current;
                    current = next;
                    steps += 1;
                }
                (Some(_), Some(_)) => return Some((current, steps)),
                (None, _) => {
                    trace!("corridor from {origin:?} stops at {current:?}");
                    return None;
                }
            }
        }
    }
}

/// Collapses every corridor of `map` into a single weighted edge.
///
/// With `directed` set, corridors are only recorded in the directions that
/// the slopes allow; otherwise each corridor shows up in the adjacency of
/// both of its ends.
#[instrument(skip(map), level = "debug")]
pub fn condense(map: &Map, directed: bool) -> CompressedGraph {
    let condenser = Condenser::new(map, directed);
    let mut graph = CompressedGraph::with_endpoints(map.entry, map.exit, directed);

    // Every vertex is pushed exactly once, when it is first discovered.
    let mut worklist = vec![graph.exit(), graph.entry()];

    while let Some(vertex) = worklist.pop() {
        let origin = graph.position(vertex);
        for first in condenser.live_neighbors(origin, directed) {
            let Some((end, steps)) = condenser.walk(origin, first) else {
                continue;
            };
            let (to, discovered) = graph.insert_vertex(end);
            if discovered {
                worklist.push(to);
            }
            trace!("edge {origin:?} -> {end:?} ({steps} steps)");
            graph.add_edge(vertex, to, steps);
        }
    }

    debug!(
        "condensed {}x{} map into {} vertices and {} edges",
        map.width,
        map.height,
        graph.vertex_count(),
        graph.edge_count()
    );
    graph
}
