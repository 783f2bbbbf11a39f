//! Warehouse floor used by the demo.
//!
//! Shelving racks (`#`) split the floor into one-lane aisles joined by three
//! cross corridors, so agents heading in opposite directions have to queue.

use mapf_core::MapfResult;
use mapf_graph::GridGraph;

const FLOOR: &str = "\
...........
.#.#.#.#.#.
.#.#.#.#.#.
...........
.#.#.#.#.#.
.#.#.#.#.#.
...........";

/// Build the warehouse grid.  `.` is floor, anything else is a rack.
pub fn build_floor() -> MapfResult<GridGraph> {
    let rows: Vec<&str> = FLOOR.lines().collect();
    let dim_y = rows.len();
    let dim_x = rows.first().map_or(0, |r| r.len());
    let cells = rows
        .iter()
        .flat_map(|r| r.bytes().map(|b| b == b'.'))
        .collect();
    GridGraph::from_cells(dim_x, dim_y, cells)
}

/// `(start, goal)` cell coordinates of each agent, in priority order.
///
/// The first four sweep east or west along the corridors; the rest cross
/// them through the aisles.
pub const AGENTS: [((usize, usize), (usize, usize)); 8] = [
    ((0, 0),  (10, 0)),
    ((10, 3), (0, 3)),
    ((0, 6),  (10, 6)),
    ((10, 0), (0, 0)),
    ((2, 0),  (4, 6)),
    ((6, 6),  (8, 0)),
    ((0, 2),  (10, 4)),
    ((4, 3),  (4, 0)),
];
