use anyhow::Context;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub solver: String,
    pub directed: bool,
    pub length: Option<usize>,
    pub vertices: usize,
    pub edges: usize,
    pub expanded_states: usize,
    pub time_us: usize,
}

impl Stats {
    pub(crate) fn new(solver: &str, directed: bool) -> Self {
        Stats {
            solver: solver.to_string(),
            directed,
            ..Stats::default()
        }
    }

    pub fn print(&self) {
        info!(
            "Solver {} Directed {} Length {:?} Vertices {} Edges {} Expanded states {} Time(microseconds) {}",
            self.solver,
            self.directed,
            self.length,
            self.vertices,
            self.edges,
            self.expanded_states,
            self.time_us
        );
    }

    /// Appends these stats to `path` as one JSON line.
    pub fn append_json(&self, path: &str) -> anyhow::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open output file {path}"))?;
        let line = serde_json::to_string(self)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}
