use crate::core::ids::{NodeId, NodeRegistry};
use crate::core::project::{Project, Relation};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("project {0} already exists")]
    DuplicateProject(String),

    #[error("relation references unknown project {0}")]
    UnknownProject(String),

    #[error("relation {0} -> {0} is a self-loop")]
    SelfLoop(String),

    #[error("relation between {0} and {1} already exists")]
    DuplicateRelation(String, String),

    #[error("project count exceeds the node id range")]
    TooManyProjects,
}

pub struct GraphBuilder {
    registry: NodeRegistry,
    projects: Vec<Project>,
    srcs: Vec<NodeId>,
    dsts: Vec<NodeId>,
    weights: Vec<f64>,
    pairs: HashSet<(NodeId, NodeId)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            registry: NodeRegistry::new(),
            projects: vec![],
            srcs: vec![],
            dsts: vec![],
            weights: vec![],
            pairs: HashSet::new(),
        }
    }

    pub fn add_project(&mut self, project: Project) -> Result<NodeId, GraphError> {
        let id = self.registry.insert(&project.id)?;
        self.projects.push(project);
        Ok(id)
    }

    pub fn add_relation(&mut self, relation: &Relation) -> Result<(), GraphError> {
        let src = self
            .registry
            .get(&relation.source)
            .ok_or_else(|| GraphError::UnknownProject(relation.source.clone()))?;
        let dst = self
            .registry
            .get(&relation.target)
            .ok_or_else(|| GraphError::UnknownProject(relation.target.clone()))?;
        if src == dst {
            return Err(GraphError::SelfLoop(relation.source.clone()));
        }
        if !self.pairs.insert((src.min(dst), src.max(dst))) {
            return Err(GraphError::DuplicateRelation(
                relation.source.clone(),
                relation.target.clone(),
            ));
        }
        self.srcs.push(src);
        self.dsts.push(dst);
        self.weights.push(relation.weight);
        Ok(())
    }

    pub fn freeze(self) -> ProjectGraph {
        let node_count = self.projects.len();
        let edge_count = self.srcs.len();
        let mut offsets = vec![0; node_count + 1];
        let mut neighbors = vec![0; edge_count * 2];
        let mut incident = vec![0; edge_count * 2];

        // every edge is listed under both of its endpoints
        let mut buf = vec![0usize; node_count];
        for (src, dst) in self.srcs.iter().zip(&self.dsts) {
            buf[*src as usize] += 1;
            buf[*dst as usize] += 1;
        }

        let mut next = 0;
        for (i, degree) in buf.iter().enumerate() {
            offsets[i] = next;
            next += degree;
            offsets[i + 1] = next;
        }

        buf.fill(0);
        for e in 0..edge_count {
            for (at, other) in [(self.srcs[e], self.dsts[e]), (self.dsts[e], self.srcs[e])] {
                let idx = offsets[at as usize] + buf[at as usize];
                neighbors[idx] = other;
                incident[idx] = e;
                buf[at as usize] += 1;
            }
        }

        ProjectGraph {
            projects: self.projects,
            srcs: self.srcs,
            dsts: self.dsts,
            weights: self.weights,
            offsets,
            neighbors,
            incident,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the undirected project graph from the node and edge tables.
pub fn assemble(projects: &[Project], relations: &[Relation]) -> Result<ProjectGraph, GraphError> {
    let mut builder = GraphBuilder::new();
    for project in projects {
        builder.add_project(project.clone())?;
    }
    for relation in relations {
        builder.add_relation(relation)?;
    }
    Ok(builder.freeze())
}

pub struct ProjectGraph {
    projects: Vec<Project>,
    srcs: Vec<NodeId>,
    dsts: Vec<NodeId>,
    weights: Vec<f64>,
    offsets: Vec<usize>,
    neighbors: Vec<NodeId>,
    incident: Vec<usize>,
}

impl ProjectGraph {
    pub fn node_count(&self) -> usize {
        self.projects.len()
    }

    pub fn edge_count(&self) -> usize {
        self.srcs.len()
    }

    pub fn project(&self, node: NodeId) -> &Project {
        &self.projects[node as usize]
    }

    pub fn projects(&self) -> impl Iterator<Item = (NodeId, &Project)> {
        self.projects
            .iter()
            .enumerate()
            .map(|(i, p)| (i as NodeId, p))
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeRef> + '_ {
        (0..self.edge_count()).map(|e| EdgeRef::new(self.srcs[e], self.dsts[e], self.weights[e]))
    }

    pub fn neighbors(&'_ self, node: NodeId) -> NeighborIter<'_> {
        NeighborIter::new(self, node)
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.offsets[node as usize + 1] - self.offsets[node as usize]
    }
}

pub struct NeighborIter<'a> {
    graph: &'a ProjectGraph,
    start: usize,
    end: usize,
    next: usize,
}

impl<'a> NeighborIter<'a> {
    pub fn new(graph: &'a ProjectGraph, node: NodeId) -> Self {
        Self {
            graph,
            start: graph.offsets[node as usize],
            end: graph.offsets[node as usize + 1],
            next: 0,
        }
    }
}

impl<'a> Iterator for NeighborIter<'a> {
    type Item = NeighborRef;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start + self.next < self.end {
            let idx = self.start + self.next;
            let result = Some(NeighborRef::new(
                self.graph.neighbors[idx],
                self.graph.weights[self.graph.incident[idx]],
            ));
            self.next += 1;
            result
        } else {
            None
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct EdgeRef {
    pub src: NodeId,
    pub dst: NodeId,
    pub weight: f64,
}

impl EdgeRef {
    pub fn new(src: NodeId, dst: NodeId, weight: f64) -> Self {
        Self { src, dst, weight }
    }
}

#[derive(Debug, PartialEq)]
pub struct NeighborRef {
    pub node: NodeId,
    pub weight: f64,
}

impl NeighborRef {
    pub fn new(node: NodeId, weight: f64) -> Self {
        Self { node, weight }
    }
}
