//! Immutable simple undirected graph.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::error::{Error, Result};

use super::Vertex;

/// A simple undirected graph over the vertices `1..=n`.
///
/// Edges are stored once, normalized so that `u < v`; the adjacency sets are
/// derived from them and are always symmetric. Self-loops never survive
/// construction and duplicate edges are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    num_vertices: usize,
    edges: BTreeSet<(Vertex, Vertex)>,
    /// `adjacency[v - 1]` holds the neighbors of `v`.
    adjacency: Vec<BTreeSet<Vertex>>,
}

impl Graph {
    /// Builds a graph from a vertex count and a raw edge list.
    ///
    /// Self-loops are dropped and duplicates (in either orientation) merged.
    /// Fails if `num_vertices` is zero or an edge names a vertex outside
    /// `1..=num_vertices`.
    pub fn new(
        num_vertices: usize,
        edges: impl IntoIterator<Item = (Vertex, Vertex)>,
    ) -> Result<Self> {
        if num_vertices < 1 {
            return Err(Error::validation("graph must have at least one vertex"));
        }

        let mut normalized = BTreeSet::new();
        let mut adjacency = vec![BTreeSet::new(); num_vertices];

        for (u, v) in edges {
            for w in [u, v] {
                if !(1..=num_vertices).contains(&w) {
                    return Err(Error::validation(format!(
                        "edge ({u}, {v}) references vertex {w} outside [1, {num_vertices}]"
                    )));
                }
            }
            if u == v {
                continue;
            }
            let (a, b) = if u < v { (u, v) } else { (v, u) };
            if normalized.insert((a, b)) {
                adjacency[a - 1].insert(b);
                adjacency[b - 1].insert(a);
            }
        }

        Ok(Self {
            num_vertices,
            edges: normalized,
            adjacency,
        })
    }

    /// The complete graph on `num_vertices` vertices.
    pub fn complete(num_vertices: usize) -> Result<Self> {
        let edges = (1..=num_vertices)
            .flat_map(|u| ((u + 1)..=num_vertices).map(move |v| (u, v)))
            .collect::<Vec<_>>();
        Self::new(num_vertices, edges)
    }

    /// Number of vertices `n`.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of unordered pairs of distinct vertices that are not edges.
    #[must_use]
    pub fn num_non_edges(&self) -> usize {
        crate::utils::choose2(self.num_vertices) - self.edges.len()
    }

    /// All vertices, in increasing order.
    #[must_use]
    pub fn vertices(&self) -> RangeInclusive<Vertex> {
        1..=self.num_vertices
    }

    /// Unordered pairs `(u, v)`, `u < v`, that are not edges, in lexicographic order.
    pub fn non_edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.vertices().flat_map(move |u| {
            ((u + 1)..=self.num_vertices)
                .filter(move |v| !self.adjacency[u - 1].contains(v))
                .map(move |v| (u, v))
        })
    }

    /// Whether `{u, v}` is an edge. Order does not matter; out-of-range
    /// vertices are simply not adjacent to anything.
    #[must_use]
    pub fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        self.neighbors(u).is_some_and(|n| n.contains(&v))
    }

    /// Neighbor set of `v`, or `None` if `v` is not a vertex.
    #[must_use]
    pub fn neighbors(&self, v: Vertex) -> Option<&BTreeSet<Vertex>> {
        v.checked_sub(1).and_then(|i| self.adjacency.get(i))
    }

    /// Whether `members` are distinct vertices of this graph that are
    /// pairwise adjacent.
    #[must_use]
    pub fn is_clique(&self, members: &[Vertex]) -> bool {
        let distinct: BTreeSet<_> = members.iter().copied().collect();
        if distinct.len() != members.len() {
            return false;
        }
        if !distinct.iter().all(|v| self.vertices().contains(v)) {
            return false;
        }
        members.iter().enumerate().all(|(i, &u)| {
            members[i + 1..].iter().all(|&v| self.has_edge(u, v))
        })
    }
}
