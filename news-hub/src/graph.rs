use crate::types::{NewsHubError, Result};
use std::collections::HashSet;
use std::fmt;

/// Node of the news pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageId {
    Fetch,
    Curate,
    Blog,
    Summary,
    Categories,
    Trends,
}

impl StageId {
    pub const ALL: [StageId; 6] = [
        StageId::Fetch,
        StageId::Curate,
        StageId::Blog,
        StageId::Summary,
        StageId::Categories,
        StageId::Trends,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StageId::Fetch => "fetch",
            StageId::Curate => "curate",
            StageId::Blog => "blog",
            StageId::Summary => "summary",
            StageId::Categories => "categories",
            StageId::Trends => "trends",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dependency edges between pipeline nodes. A node is ready once every
/// node it depends on has completed.
#[derive(Debug, Clone)]
pub struct StageGraph {
    edges: Vec<(StageId, StageId)>,
}

impl Default for StageGraph {
    /// Fetch -> Curate -> {Blog, Summary, Categories, Trends}
    fn default() -> Self {
        Self::empty()
            .with_edge(StageId::Fetch, StageId::Curate)
            .with_edge(StageId::Curate, StageId::Blog)
            .with_edge(StageId::Curate, StageId::Summary)
            .with_edge(StageId::Curate, StageId::Categories)
            .with_edge(StageId::Curate, StageId::Trends)
    }
}

impl StageGraph {
    pub fn empty() -> Self {
        Self { edges: Vec::new() }
    }

    /// `to` may only run after `from` has completed
    pub fn with_edge(mut self, from: StageId, to: StageId) -> Self {
        if !self.edges.contains(&(from, to)) {
            self.edges.push((from, to));
        }
        self
    }

    pub fn dependencies(&self, node: StageId) -> Vec<StageId> {
        self.edges
            .iter()
            .filter(|(_, to)| *to == node)
            .map(|(from, _)| *from)
            .collect()
    }

    /// Nodes not yet completed whose dependencies all are, in declaration order
    pub fn ready(&self, completed: &HashSet<StageId>) -> Vec<StageId> {
        StageId::ALL
            .iter()
            .copied()
            .filter(|node| !completed.contains(node))
            .filter(|node| self.dependencies(*node).iter().all(|dep| completed.contains(dep)))
            .collect()
    }

    /// Group nodes into successive waves of mutually independent nodes.
    pub fn waves(&self) -> Result<Vec<Vec<StageId>>> {
        let mut completed = HashSet::new();
        let mut waves = Vec::new();

        while completed.len() < StageId::ALL.len() {
            let wave = self.ready(&completed);
            if wave.is_empty() {
                let stuck: Vec<&str> = StageId::ALL
                    .iter()
                    .filter(|node| !completed.contains(*node))
                    .map(|node| node.name())
                    .collect();
                return Err(NewsHubError::General(format!(
                    "Stage graph has a cycle through: {}",
                    stuck.join(", ")
                )));
            }
            completed.extend(wave.iter().copied());
            waves.push(wave);
        }

        Ok(waves)
    }
}
