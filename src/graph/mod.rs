//! Adjacency graph: a dual-purpose structure used both as a sparsity-
//! pattern carrier and as the substrate for reordering, level traversal,
//! pseudo-peripheral search and level-expansion partitioning.

pub mod adjacency;
pub mod subgraph;

pub use adjacency::AdjGraph;
pub use subgraph::AdjacencySubgraph;
