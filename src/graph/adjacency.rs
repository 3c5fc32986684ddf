//! Adjacency graph: a CSR-like edge set supporting reordering, BFS level
//! traversal, pseudo-peripheral vertex search, and level-expansion
//! partitioning (§3.3, §4.4).

use crate::error::{Result, SolverError};
use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// A directed or undirected graph stored as CSR-like offsets over an
/// adjacency list. For undirected graphs every edge `{u, v}` appears twice
/// (once in each endpoint's slice); for directed graphs each edge appears
/// once, from `u`'s slice only. Neighbour lists are strictly ascending and
/// contain no self-loops.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjGraph {
    directed: bool,
    offset: Vec<usize>,
    adjacent_list: Vec<usize>,
}

impl AdjGraph {
    /// An empty graph of the given directedness.
    pub fn new(directed: bool) -> Self {
        AdjGraph { directed, offset: alloc::vec![0], adjacent_list: Vec::new() }
    }

    /// Builds a graph from a list of edges. For an undirected graph, edges
    /// are unordered pairs; for a directed graph, ordered `(from, to)`
    /// pairs. Vertex count is `max(endpoint) + 1` across all edges.
    /// Self-loops (`u == v`) are rejected.
    pub fn from_edges(edges: &[(usize, usize)], directed: bool) -> Result<Self> {
        let mut graph = AdjGraph::new(directed);
        for &(u, v) in edges {
            graph.insert(u, v)?;
        }
        Ok(graph)
    }

    /// True if this is a directed graph.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of vertices, `|V|`.
    pub fn size_vertex(&self) -> usize {
        self.offset.len().saturating_sub(1)
    }

    /// Number of edges, `|E|` (each undirected edge counted once).
    pub fn size_edge(&self) -> usize {
        if self.directed {
            self.adjacent_list.len()
        } else {
            self.adjacent_list.len() / 2
        }
    }

    /// True iff `offset.len() < 2`, i.e. there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.offset.len() < 2
    }

    /// The degree (neighbour count) of vertex `v`.
    pub fn degree(&self, v: usize) -> usize {
        self.offset[v + 1] - self.offset[v]
    }

    /// The sorted neighbour slice of vertex `v`.
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjacent_list[self.offset[v]..self.offset[v + 1]]
    }

    /// Grows or shrinks the graph to `new_size` vertices. Growing extends
    /// `offset` with the current adjacency-list length (no new edges).
    /// Shrinking drops every vertex with index `>= new_size` and removes
    /// their incident edges from surviving rows.
    pub fn resize(&mut self, new_size: usize) {
        let old_size = self.size_vertex();
        if new_size >= old_size {
            let last = *self.offset.last().unwrap_or(&0);
            self.offset.resize(new_size + 1, last);
            return;
        }
        let mut carry = 0usize;
        for v in 0..new_size {
            let start = self.offset[v];
            let end = self.offset[v + 1] - carry;
            let cut = self.adjacent_list[start..end].partition_point(|&n| n < new_size);
            let removed = (end - start) - cut;
            if removed > 0 {
                self.adjacent_list.drain(start + cut..end);
                carry += removed;
            }
            self.offset[v + 1] -= carry;
        }
        self.adjacent_list.truncate(self.offset[new_size]);
        self.offset.truncate(new_size + 1);
    }

    fn insert_directed(&mut self, from: usize, to: usize) -> bool {
        let (start, end) = (self.offset[from], self.offset[from + 1]);
        let pos = start + self.adjacent_list[start..end].partition_point(|&n| n < to);
        if pos < end && self.adjacent_list[pos] == to {
            return false;
        }
        self.adjacent_list.insert(pos, to);
        for o in self.offset[from + 1..].iter_mut() {
            *o += 1;
        }
        true
    }

    /// Inserts edge `(u, v)`, growing the vertex count if needed. For
    /// undirected graphs both directions are recorded. Rejects self-loops.
    pub fn insert(&mut self, u: usize, v: usize) -> Result<bool> {
        if u == v {
            return Err(SolverError::InvalidGraphOperation { reason: "self-loops are not permitted".into() });
        }
        let needed = u.max(v) + 1;
        if needed > self.size_vertex() {
            self.resize(needed);
        }
        let inserted = self.insert_directed(u, v);
        if !self.directed {
            let mirrored = self.insert_directed(v, u);
            debug_assert_eq!(inserted, mirrored, "undirected mirror insertion out of sync");
        }
        Ok(inserted)
    }

    /// True iff edge `(u, v)` is present.
    pub fn contains(&self, u: usize, v: usize) -> bool {
        if u >= self.size_vertex() {
            return false;
        }
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// Removes every vertex for which `predicate(i)` holds, along with all
    /// incident edges. Surviving vertices keep their original indices; use
    /// [`AdjGraph::reorder`] separately to relabel.
    pub fn erase_if(&mut self, predicate: impl Fn(usize) -> bool) {
        let n = self.size_vertex();
        let removed: Vec<bool> = (0..n).map(&predicate).collect();
        let mut new_offset = alloc::vec![0usize; n + 1];
        let mut new_adjacent = Vec::new();
        for v in 0..n {
            if !removed[v] {
                for &nb in self.neighbors(v) {
                    if !removed[nb] {
                        new_adjacent.push(nb);
                    }
                }
            }
            new_offset[v + 1] = new_adjacent.len();
        }
        self.offset = new_offset;
        self.adjacent_list = new_adjacent;
    }

    /// Reorders the graph under permutation `pi` (`pi[old] = new`),
    /// returning a new graph whose edge set is the image of this one's
    /// under `pi`. `pi` must be a bijection on `0..size_vertex()`; this is
    /// checked both by a checksum (`sum(pi) == n*(n-1)/2`, necessary but
    /// not sufficient) and by a seen-bitset (sufficient).
    pub fn reorder(&self, pi: &[usize]) -> Result<AdjGraph> {
        let n = self.size_vertex();
        if pi.len() != n {
            return Err(SolverError::InvalidPermutation { reason: alloc::format!("expected length {}, got {}", n, pi.len()) });
        }
        let checksum: usize = pi.iter().sum();
        if n > 0 && checksum != n * (n - 1) / 2 {
            return Err(SolverError::InvalidPermutation { reason: "permutation checksum mismatch".into() });
        }
        let mut seen = alloc::vec![false; n];
        for &p in pi {
            if p >= n || seen[p] {
                return Err(SolverError::InvalidPermutation { reason: "permutation is not a bijection".into() });
            }
            seen[p] = true;
        }

        let mut new_offset = alloc::vec![0usize; n + 1];
        for v in 0..n {
            new_offset[pi[v] + 1] = self.degree(v);
        }
        for i in 0..n {
            new_offset[i + 1] += new_offset[i];
        }

        let mut new_adjacent = alloc::vec![0usize; self.adjacent_list.len()];
        let mut cursor = new_offset.clone();
        for v in 0..n {
            let mut row: Vec<usize> = self.neighbors(v).iter().map(|&u| pi[u]).collect();
            row.sort_unstable();
            let dst = pi[v];
            let start = cursor[dst];
            new_adjacent[start..start + row.len()].copy_from_slice(&row);
            cursor[dst] += row.len();
        }

        Ok(AdjGraph { directed: self.directed, offset: new_offset, adjacent_list: new_adjacent })
    }

    /// Breadth-first level traversal from `start`, assigning each reachable
    /// vertex its graph distance, up to a cutoff `end_level`. Unreached
    /// vertices (or those beyond the cutoff) carry the sentinel
    /// `usize::MAX`.
    ///
    /// To distinguish "unvisited" from "level 0" the levels are biased by
    /// one for the duration of the sweep (`usize::MAX` wraps to `0` on the
    /// bias step, so "unvisited" and "biased level zero" never collide),
    /// then un-biased before returning.
    pub fn level_traversal(&self, start: usize, end_level: usize) -> Vec<usize> {
        debug_assert!(!self.is_empty(), "graph is empty");
        debug_assert!(start < self.size_vertex(), "start vertex out of range");

        let mut level = alloc::vec![usize::MAX; self.size_vertex()];
        level[start] = 0;
        for l in level.iter_mut() {
            *l = l.wrapping_add(1);
        }

        let mut queue = VecDeque::new();
        queue.push_back(start);
        while let Some(front) = queue.pop_front() {
            if level[front] == end_level.wrapping_add(1) {
                continue;
            }
            for &nb in self.neighbors(front) {
                if level[nb] == 0 {
                    level[nb] = level[front] + 1;
                    queue.push_back(nb);
                }
            }
        }

        for l in level.iter_mut() {
            *l = l.wrapping_sub(1);
        }
        level
    }

    /// Finds a pseudo-peripheral vertex: repeatedly runs a level traversal
    /// from the current candidate and moves to the reached vertex of
    /// maximum distance (breaking ties by smaller degree), until the
    /// candidate stops changing.
    pub fn pseudo_peripheral(&self, start: usize) -> usize {
        debug_assert!(!self.is_empty(), "graph is empty");
        debug_assert!(start < self.size_vertex(), "start vertex out of range");

        if self.degree(start) == 0 {
            log::warn!("pseudo_peripheral: start vertex {} has degree 0", start);
            return start;
        }

        let mut candidate = start;
        loop {
            let distance = self.level_traversal(candidate, usize::MAX);
            let mut max_distance = 0;
            let mut next = candidate;
            let mut moved = false;
            for v in 0..self.size_vertex() {
                if distance[v] > max_distance || (distance[v] == max_distance && self.degree(v) < self.degree(next)) {
                    max_distance = distance[v];
                    next = v;
                    moved = true;
                }
            }
            if !moved || next == candidate {
                return candidate;
            }
            candidate = next;
        }
    }

    /// Colours every vertex with the index of its nearest seed, via
    /// alternating forward/backward sweeps of per-colour queues (to keep
    /// the tie-distance bias even across colours). Fails if the colouring
    /// does not complete within `size_vertex()` iterations, which indicates
    /// a disjoint graph.
    pub fn level_expansion(&self, seeds: &[usize]) -> Result<Vec<usize>> {
        if self.is_empty() {
            return Err(SolverError::InvalidGraphOperation { reason: "graph is empty".into() });
        }
        if seeds.is_empty() {
            return Err(SolverError::InvalidGraphOperation { reason: "no seeds given".into() });
        }
        let n = self.size_vertex();
        let mut color = alloc::vec![usize::MAX; n];
        let mut queues: Vec<VecDeque<usize>> = alloc::vec![VecDeque::new(); seeds.len()];
        for (i, &s) in seeds.iter().enumerate() {
            if s >= n {
                return Err(SolverError::InvalidGraphOperation { reason: "seed index out of range".into() });
            }
            queues[i].push_back(s);
            color[s] = i;
        }

        let mut iteration = 0usize;
        while queues.iter().any(|q| !q.is_empty()) {
            for i in 0..queues.len() {
                let idx = if iteration % 2 == 0 { i } else { queues.len() - i - 1 };
                let mut new_queue = VecDeque::new();
                while let Some(front) = queues[idx].pop_front() {
                    for &nb in self.neighbors(front) {
                        if color[nb] == usize::MAX {
                            color[nb] = color[front];
                            new_queue.push_back(nb);
                        }
                    }
                }
                queues[idx] = new_queue;
            }
            iteration += 1;
            if iteration >= n {
                return Err(SolverError::InvalidGraphOperation { reason: "level expansion did not converge; is the graph disjoint?".into() });
            }
        }
        Ok(color)
    }
}
