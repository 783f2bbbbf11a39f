//! 4-connected obstacle grids.
//!
//! Cell `(x, y)` maps to `NodeId(y * dim_x + x)`.  Every open cell is joined
//! to its open left/right/up/down neighbours by unit-weight edges in both
//! directions; blocked cells keep their node id but have no edges.
//!
//! Because every edge costs 1 and moves one unit along an axis, Manhattan
//! distance never overstates the true remaining cost, so the grid replaces
//! the oracle's exact-distance heuristic with it and avoids a Dijkstra run
//! per search origin.

use mapf_core::{MapfError, MapfResult, NodeId};

use crate::graph::{Edge, Graph};
use crate::oracle::{DistanceOracle, SearchGraph};

/// Rectangular grid of open and blocked cells.
#[derive(Debug)]
pub struct GridGraph {
    oracle: DistanceOracle,
    dim_x:  usize,
    dim_y:  usize,
    open:   Vec<bool>,
}

impl GridGraph {
    /// A grid with every cell open.
    pub fn open(dim_x: usize, dim_y: usize) -> Self {
        Self::build(dim_x, dim_y, vec![true; dim_x * dim_y])
    }

    /// A grid from a row-major open-cell mask (`true` = traversable).
    pub fn from_cells(dim_x: usize, dim_y: usize, open: Vec<bool>) -> MapfResult<Self> {
        let expected = dim_x * dim_y;
        if open.len() != expected {
            return Err(MapfError::GridShape { dim_x, dim_y, expected, got: open.len() });
        }
        Ok(Self::build(dim_x, dim_y, open))
    }

    /// An open grid with the listed `(x, y)` cells blocked.
    pub fn with_walls(dim_x: usize, dim_y: usize, walls: &[(usize, usize)]) -> MapfResult<Self> {
        let mut open = vec![true; dim_x * dim_y];
        for &(x, y) in walls {
            if x >= dim_x || y >= dim_y {
                return Err(MapfError::CellOutOfRange { x, y, dim_x, dim_y });
            }
            open[y * dim_x + x] = false;
        }
        Ok(Self::build(dim_x, dim_y, open))
    }

    fn build(dim_x: usize, dim_y: usize, open: Vec<bool>) -> Self {
        let mut grid = Self {
            oracle: DistanceOracle::new(Graph::new(dim_x * dim_y)),
            dim_x,
            dim_y,
            open,
        };
        grid.rebuild_edges();
        grid
    }

    // ── Coordinates ───────────────────────────────────────────────────────

    pub fn dims(&self) -> (usize, usize) {
        (self.dim_x, self.dim_y)
    }

    #[inline]
    pub fn id_from_coords(&self, x: usize, y: usize) -> NodeId {
        NodeId((y * self.dim_x + x) as u32)
    }

    #[inline]
    pub fn coords_from_id(&self, id: NodeId) -> (usize, usize) {
        (id.index() % self.dim_x, id.index() / self.dim_x)
    }

    pub fn is_open(&self, x: usize, y: usize) -> bool {
        x < self.dim_x && y < self.dim_y && self.open[y * self.dim_x + x]
    }

    /// Ids of all open cells in row-major order.
    pub fn open_nodes(&self) -> Vec<NodeId> {
        self.open
            .iter()
            .enumerate()
            .filter(|(_, open)| **open)
            .map(|(i, _)| NodeId(i as u32))
            .collect()
    }

    pub fn oracle(&self) -> &DistanceOracle {
        &self.oracle
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Open or block cell `(x, y)` and rewire its edges.  Clears the
    /// distance cache.
    pub fn set_open(&mut self, x: usize, y: usize, open: bool) -> MapfResult<()> {
        if x >= self.dim_x || y >= self.dim_y {
            return Err(MapfError::CellOutOfRange { x, y, dim_x: self.dim_x, dim_y: self.dim_y });
        }
        self.open[y * self.dim_x + x] = open;
        self.rebuild_edges();
        Ok(())
    }

    fn rebuild_edges(&mut self) {
        self.oracle.clear_edges();
        for y in 0..self.dim_y {
            for x in 0..self.dim_x {
                if !self.is_open(x, y) {
                    continue;
                }
                let here = self.id_from_coords(x, y);
                if self.is_open(x + 1, y) {
                    let right = self.id_from_coords(x + 1, y);
                    self.link(here, right);
                }
                if self.is_open(x, y + 1) {
                    let below = self.id_from_coords(x, y + 1);
                    self.link(here, below);
                }
            }
        }
    }

    fn link(&mut self, a: NodeId, b: NodeId) {
        // Both ids come from in-range coordinates and the weight is 1.0, so
        // the checked insert cannot fail.
        let _ = self.oracle.add_edge_bidirectional(a, b, 1.0);
    }
}

impl SearchGraph for GridGraph {
    fn node_count(&self) -> usize {
        self.oracle.node_count()
    }

    fn neighbours(&self, node: NodeId) -> &[Edge] {
        self.oracle.neighbours(node)
    }

    fn distance(&self, origin: NodeId, dest: NodeId) -> f64 {
        self.oracle.distance(origin, dest)
    }

    /// Manhattan distance between the two cells.
    fn distance_heuristic(&self, origin: NodeId, dest: NodeId) -> f64 {
        let (x1, y1) = self.coords_from_id(origin);
        let (x2, y2) = self.coords_from_id(dest);
        (x1.abs_diff(x2) + y1.abs_diff(y2)) as f64
    }
}
