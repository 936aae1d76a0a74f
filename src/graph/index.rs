//! Adjacency index over the `go mod graph` edge list

use crate::domain::ModuleIdentity;
use crate::error::DeptreeError;
use std::collections::HashMap;
use std::io::BufRead;

/// Index of a module identity inside a [`GraphIndex`]
pub type NodeId = usize;

/// Parent → children adjacency keyed by module identity
#[derive(Debug, Default)]
pub struct GraphIndex {
    identities: Vec<ModuleIdentity>,
    ids: HashMap<ModuleIdentity, NodeId>,
    /// Children per node in first-seen order, without repeats
    children: Vec<Vec<NodeId>>,
    /// Whether the node occurs as a child of any edge
    required: Vec<bool>,
    edge_count: usize,
    warnings: Vec<String>,
}

impl GraphIndex {
    /// Parses a line-oriented edge list, one `parent child` pair per line
    ///
    /// Blank lines are ignored, malformed lines are skipped with a warning.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, DeptreeError> {
        let mut graph = GraphIndex::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(DeptreeError::graph_read)?;
            let line_no = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match parse_edge(trimmed) {
                Ok((parent, child)) => graph.add_edge(parent, child),
                Err(reason) => graph.warn(format!("skipping graph line {}: {}", line_no, reason)),
            }
        }

        if graph.edge_count == 0 {
            return Err(DeptreeError::EmptyGraph);
        }

        tracing::debug!(
            "graph holds {} modules and {} edges",
            graph.len(),
            graph.edge_count
        );
        Ok(graph)
    }

    fn intern(&mut self, identity: ModuleIdentity) -> NodeId {
        if let Some(&id) = self.ids.get(&identity) {
            return id;
        }
        let id = self.identities.len();
        self.ids.insert(identity.clone(), id);
        self.identities.push(identity);
        self.children.push(Vec::new());
        self.required.push(false);
        id
    }

    /// Adds a `parent requires child` edge, repeated edges are ignored
    pub fn add_edge(&mut self, parent: ModuleIdentity, child: ModuleIdentity) {
        let parent = self.intern(parent);
        let child = self.intern(child);
        self.required[child] = true;
        if !self.children[parent].contains(&child) {
            self.children[parent].push(child);
            self.edge_count += 1;
        }
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }

    /// Picks the root to build the tree from
    ///
    /// An empty request selects the unique module nobody requires. A request
    /// without version matches the unique module with that path.
    pub fn resolve_root(&self, requested: &str) -> Result<NodeId, DeptreeError> {
        let requested = requested.trim();
        if requested.is_empty() {
            let candidates: Vec<NodeId> = (0..self.len()).filter(|&id| !self.required[id]).collect();
            return match candidates.as_slice() {
                [root] => Ok(*root),
                _ => Err(self.ambiguous(&candidates)),
            };
        }

        let identity: ModuleIdentity = requested
            .parse()
            .map_err(|_| DeptreeError::unknown_root(requested))?;
        if let Some(&id) = self.ids.get(&identity) {
            return Ok(id);
        }
        if identity.has_version() {
            return Err(DeptreeError::unknown_root(requested));
        }

        let matches: Vec<NodeId> = (0..self.len())
            .filter(|&id| self.identities[id].path == identity.path)
            .collect();
        match matches.as_slice() {
            [] => Err(DeptreeError::unknown_root(requested)),
            [root] => Ok(*root),
            _ => Err(self.ambiguous(&matches)),
        }
    }

    fn ambiguous(&self, candidates: &[NodeId]) -> DeptreeError {
        DeptreeError::RootAmbiguous {
            candidates: candidates
                .iter()
                .map(|&id| self.identities[id].to_string())
                .collect(),
        }
    }

    /// Looks up the node of an identity
    pub fn id_of(&self, identity: &ModuleIdentity) -> Option<NodeId> {
        self.ids.get(identity).copied()
    }

    /// Identity of a node
    pub fn identity(&self, id: NodeId) -> &ModuleIdentity {
        &self.identities[id]
    }

    /// Children of a node in first-seen order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.children[id]
    }

    /// Number of distinct modules
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Returns true if the graph holds no module
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Number of distinct edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Warnings recorded for skipped lines
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Splits a line into exactly two module identities
fn parse_edge(line: &str) -> Result<(ModuleIdentity, ModuleIdentity), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [parent, child] = fields.as_slice() else {
        return Err(format!("expected 2 fields, found {}", fields.len()));
    };
    Ok((
        parent.parse::<ModuleIdentity>()?,
        child.parse::<ModuleIdentity>()?,
    ))
}
