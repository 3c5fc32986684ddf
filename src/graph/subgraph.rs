//! Adjacency subgraph: a local view over a subset of a parent graph's
//! vertices, carrying a level value per local vertex and a structural
//! checksum of the parent to reject mismatched inputs (§3.4, §4.5).

use crate::error::{Result, SolverError};
use crate::graph::adjacency::AdjGraph;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

fn structural_hash(graph: &AdjGraph) -> u64 {
    // FNV-1a over the graph's own CSR-like arrays; cheap and good enough to
    // catch "this subgraph was built from a different parent" mistakes.
    let mut hash: u64 = 0xcbf29ce484222325;
    let mut mix = |x: usize| {
        hash ^= x as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    };
    mix(graph.size_vertex());
    mix(graph.is_directed() as usize);
    for v in 0..graph.size_vertex() {
        for &nb in graph.neighbors(v) {
            mix(nb);
        }
    }
    hash
}

/// A local view over a subset of a parent [`AdjGraph`]'s vertices. Level 0
/// denotes the primary partition; `level = k > 0` denotes a vertex pulled
/// in through `k` levels of neighbour expansion.
#[derive(Debug, Clone)]
pub struct AdjacencySubgraph {
    graph: AdjGraph,
    local_to_global: Vec<usize>,
    level: Vec<usize>,
    parent_hash: u64,
}

impl AdjacencySubgraph {
    /// Builds a subgraph over `vertices` (global indices) from `parent`.
    /// All levels are initialised to `0`.
    pub fn from_parent(parent: &AdjGraph, vertices: &[usize]) -> Result<Self> {
        for &v in vertices {
            if v >= parent.size_vertex() {
                return Err(SolverError::IndexOutOfBounds { index: v, bound: parent.size_vertex(), context: "AdjacencySubgraph::from_parent".into() });
            }
        }
        let mut local_to_global: Vec<usize> = vertices.to_vec();
        local_to_global.sort_unstable();
        local_to_global.dedup();

        let mut graph = AdjGraph::new(parent.is_directed());
        graph.resize(local_to_global.len());
        for (i, &gi) in local_to_global.iter().enumerate() {
            for &gj in parent.neighbors(gi) {
                if let Ok(j) = local_to_global.binary_search(&gj) {
                    if i != j {
                        graph.insert(i, j)?;
                    }
                }
            }
        }

        let level = alloc::vec![0usize; local_to_global.len()];
        Ok(AdjacencySubgraph { graph, local_to_global, level, parent_hash: structural_hash(parent) })
    }

    /// The local graph.
    pub fn graph(&self) -> &AdjGraph {
        &self.graph
    }

    /// Maps a local vertex index to its global index in the parent.
    pub fn local_to_global(&self, local: usize) -> usize {
        self.local_to_global[local]
    }

    /// Maps a global vertex index to its local index, if present.
    pub fn global_to_local(&self, global: usize) -> Option<usize> {
        self.local_to_global.binary_search(&global).ok()
    }

    /// The level value of a local vertex.
    pub fn level(&self, local: usize) -> usize {
        self.level[local]
    }

    fn check_parent(&self, parent: &AdjGraph) -> Result<()> {
        if structural_hash(parent) != self.parent_hash {
            return Err(SolverError::SubgraphParentMismatch);
        }
        Ok(())
    }

    /// Extends the subgraph by `levels` additional rounds of neighbour
    /// expansion in `parent`, starting from the level-0 vertex set. Newly
    /// reached vertices are added with their BFS distance from that set as
    /// their level; edges among newly added vertices, and between new and
    /// existing vertices, are copied in wherever `parent` has them.
    pub fn extend(&mut self, parent: &AdjGraph, levels: usize) -> Result<()> {
        self.check_parent(parent)?;
        if levels == 0 {
            return Ok(());
        }

        let seeds: Vec<usize> =
            self.local_to_global.iter().zip(self.level.iter()).filter(|(_, &l)| l == 0).map(|(&g, _)| g).collect();

        let mut dist = alloc::vec![usize::MAX; parent.size_vertex()];
        let mut queue = VecDeque::new();
        for &s in &seeds {
            dist[s] = 0;
            queue.push_back(s);
        }
        while let Some(front) = queue.pop_front() {
            if dist[front] == levels {
                continue;
            }
            for &nb in parent.neighbors(front) {
                if dist[nb] == usize::MAX {
                    dist[nb] = dist[front] + 1;
                    queue.push_back(nb);
                }
            }
        }

        for (g, &d) in dist.iter().enumerate() {
            if d != usize::MAX && d > 0 && self.global_to_local(g).is_none() {
                self.local_to_global.push(g);
                self.level.push(d);
            }
        }

        let mut order: Vec<usize> = (0..self.local_to_global.len()).collect();
        order.sort_by_key(|&i| self.local_to_global[i]);
        let sorted_globals: Vec<usize> = order.iter().map(|&i| self.local_to_global[i]).collect();
        let sorted_levels: Vec<usize> = order.iter().map(|&i| self.level[i]).collect();

        let mut new_graph = AdjGraph::new(self.graph.is_directed());
        new_graph.resize(sorted_globals.len());
        for (i, &gi) in sorted_globals.iter().enumerate() {
            for &gj in parent.neighbors(gi) {
                if let Ok(j) = sorted_globals.binary_search(&gj) {
                    if i != j {
                        new_graph.insert(i, j)?;
                    }
                }
            }
        }

        self.graph = new_graph;
        self.local_to_global = sorted_globals;
        self.level = sorted_levels;
        Ok(())
    }

    /// Shrinks the subgraph to only vertices with `level <= max_level`,
    /// compacting `local -> global` and the level vector consistently.
    pub fn shrink(&mut self, max_level: usize) -> Result<()> {
        let keep: Vec<usize> = (0..self.local_to_global.len()).filter(|&i| self.level[i] <= max_level).collect();
        let mut old_to_new = alloc::vec![None; self.local_to_global.len()];
        let mut new_local_to_global = Vec::with_capacity(keep.len());
        let mut new_level = Vec::with_capacity(keep.len());
        for (new_i, &old_i) in keep.iter().enumerate() {
            old_to_new[old_i] = Some(new_i);
            new_local_to_global.push(self.local_to_global[old_i]);
            new_level.push(self.level[old_i]);
        }

        let mut new_graph = AdjGraph::new(self.graph.is_directed());
        new_graph.resize(new_local_to_global.len());
        for old_i in 0..self.local_to_global.len() {
            let Some(new_i) = old_to_new[old_i] else { continue };
            for &old_j in self.graph.neighbors(old_i) {
                if let Some(new_j) = old_to_new[old_j] {
                    new_graph.insert(new_i, new_j)?;
                }
            }
        }

        self.graph = new_graph;
        self.local_to_global = new_local_to_global;
        self.level = new_level;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph(n: usize) -> AdjGraph {
        let edges: Vec<(usize, usize)> = (0..n - 1).map(|i| (i, i + 1)).collect();
        AdjGraph::from_edges(&edges, false).unwrap()
    }

    #[test]
    fn from_parent_builds_induced_subgraph() {
        let parent = path_graph(6);
        let sub = AdjacencySubgraph::from_parent(&parent, &[1, 2, 3]).unwrap();
        assert_eq!(sub.graph().size_vertex(), 3);
        assert!(sub.graph().contains(0, 1));
        assert!(sub.graph().contains(1, 2));
        assert!(!sub.graph().contains(0, 2));
    }

    #[test]
    fn extend_adds_neighbour_levels() {
        let parent = path_graph(6);
        let mut sub = AdjacencySubgraph::from_parent(&parent, &[2, 3]).unwrap();
        sub.extend(&parent, 1).unwrap();
        assert_eq!(sub.graph().size_vertex(), 4);
        let local1 = sub.global_to_local(1).unwrap();
        let local4 = sub.global_to_local(4).unwrap();
        assert_eq!(sub.level(local1), 1);
        assert_eq!(sub.level(local4), 1);
    }

    #[test]
    fn extend_rejects_mismatched_parent() {
        let parent = path_graph(6);
        let other = path_graph(8);
        let mut sub = AdjacencySubgraph::from_parent(&parent, &[2, 3]).unwrap();
        assert!(sub.extend(&other, 1).is_err());
    }

    #[test]
    fn shrink_drops_outer_levels() {
        let parent = path_graph(6);
        let mut sub = AdjacencySubgraph::from_parent(&parent, &[2, 3]).unwrap();
        sub.extend(&parent, 2).unwrap();
        sub.shrink(1).unwrap();
        assert!(sub.global_to_local(0).is_none());
        assert!(sub.global_to_local(1).is_some());
    }
}
