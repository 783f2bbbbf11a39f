//! `mapf-graph`: graphs, grids, and shortest-distance queries.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`graph`]  | `Graph` (adjacency lists), `Edge`, random graph generation   |
//! | [`oracle`] | `SearchGraph` trait, `DistanceOracle` (cached Dijkstra)      |
//! | [`grid`]   | `GridGraph`: 4-connected obstacle grid, Manhattan heuristic |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on `Edge`.              |
//! | `parallel` | `DistanceOracle::precompute_all` runs on Rayon's pool.    |

pub mod graph;
pub mod grid;
pub mod oracle;

#[cfg(test)]
mod tests;

pub use graph::{Edge, Graph};
pub use grid::GridGraph;
pub use oracle::{DistanceOracle, SearchGraph};
