//! Static topology of the 24 playable intersections.
//!
//! The board consists of three concentric squares connected at the edge
//! midpoints. Cells are counted from left to right and bottom to top:
//!
//! ```text
//! 21----------22----------23
//! |           |           |
//! |   18------19------20  |
//! |   |       |       |   |
//! |   |   15--16--17  |   |
//! |   |   |       |   |   |
//! 9---10--11      12--13--14
//! |   |   |       |   |   |
//! |   |   6---7---8   |   |
//! |   |       |       |   |
//! |   3-------4-------5   |
//! |           |           |
//! 0-----------1-----------2
//! ```
//!
//! The order of each neighbor list is load-bearing: the mill test pairs
//! neighbors positionally (see [`mill_through`]), so the table below must
//! stay exactly as constructed.

/// Number of playable intersections on the board.
pub const CELL_COUNT: usize = 24;

/// Shape category of an intersection, fixed by its position on the board.
///
/// The category determines how many neighbors a cell has and which of them
/// pair up into straight lines for mill detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Two neighbors; sits on a square's corner.
    Corner,
    /// Three neighbors; edge midpoint whose third neighbor points inward.
    TJunctionBottom,
    /// Three neighbors; edge midpoint whose third neighbor points outward.
    TJunctionTop,
    /// Four neighbors; an edge midpoint of the middle square.
    Cross,
}

/// Immutable description of one intersection.
pub struct CellInfo {
    /// The cell's shape category.
    pub topology: Topology,
    /// Adjacent cell indices, in mill-pairing order.
    pub neighbors: &'static [u8],
}

use Topology::{Corner, Cross, TJunctionBottom, TJunctionTop};

/// The full board graph, indexed by cell.
#[rustfmt::skip]
pub static CELLS: [CellInfo; CELL_COUNT] = [
    CellInfo { topology: Corner,          neighbors: &[9, 1] },
    CellInfo { topology: TJunctionBottom, neighbors: &[0, 2, 4] },
    CellInfo { topology: Corner,          neighbors: &[1, 14] },
    CellInfo { topology: Corner,          neighbors: &[10, 4] },
    CellInfo { topology: Cross,           neighbors: &[3, 5, 7, 1] },
    CellInfo { topology: Corner,          neighbors: &[4, 13] },
    CellInfo { topology: Corner,          neighbors: &[11, 7] },
    CellInfo { topology: TJunctionTop,    neighbors: &[6, 8, 4] },
    CellInfo { topology: Corner,          neighbors: &[7, 12] },
    CellInfo { topology: TJunctionBottom, neighbors: &[21, 0, 10] },
    CellInfo { topology: Cross,           neighbors: &[18, 3, 11, 9] },
    CellInfo { topology: TJunctionTop,    neighbors: &[15, 6, 10] },
    CellInfo { topology: TJunctionTop,    neighbors: &[8, 17, 13] },
    CellInfo { topology: Cross,           neighbors: &[5, 20, 12, 14] },
    CellInfo { topology: TJunctionBottom, neighbors: &[2, 23, 13] },
    CellInfo { topology: Corner,          neighbors: &[16, 11] },
    CellInfo { topology: TJunctionTop,    neighbors: &[17, 15, 19] },
    CellInfo { topology: Corner,          neighbors: &[12, 16] },
    CellInfo { topology: Corner,          neighbors: &[19, 10] },
    CellInfo { topology: Cross,           neighbors: &[20, 18, 16, 22] },
    CellInfo { topology: Corner,          neighbors: &[13, 19] },
    CellInfo { topology: Corner,          neighbors: &[22, 9] },
    CellInfo { topology: TJunctionBottom, neighbors: &[23, 21, 19] },
    CellInfo { topology: Corner,          neighbors: &[14, 22] },
];

/// Tests whether `cell` would sit in a completed mill, assuming its own
/// occupant matches the predicate's color and `excluded` counts as empty.
///
/// `held` reports whether a cell holds a man of the color under test. The
/// exclusion applies to direct neighbors only; it exists so that a man
/// moving out of `excluded` onto `cell` does not count itself twice.
///
/// Pairing rules by topology:
/// - a corner pairs neighbor `k` with that neighbor's own neighbor `k`,
///   giving its two lines,
/// - a T-junction pairs its first two neighbors (the in-square line) and
///   reaches the crossing line through its third neighbor's adjacency,
/// - a cross pairs neighbors `(0, 1)` and `(2, 3)`.
///
/// # Arguments
/// * `cell` - The cell assumed to be occupied by the color under test
/// * `excluded` - A cell assumed empty regardless of its actual occupant
/// * `held` - Occupancy predicate for the color under test
///
/// # Returns
/// `true` if any line through `cell` is fully held.
pub fn mill_through(cell: u8, excluded: Option<u8>, held: impl Fn(u8) -> bool) -> bool {
    let info = &CELLS[cell as usize];
    let nb = info.neighbors;
    let open = |i: u8| excluded != Some(i);
    match info.topology {
        Topology::Corner => (0..nb.len()).any(|k| {
            let n = nb[k];
            open(n) && held(n) && held(CELLS[n as usize].neighbors[k])
        }),
        Topology::TJunctionBottom => {
            (open(nb[0]) && held(nb[0]) && open(nb[1]) && held(nb[1]))
                || (open(nb[2]) && held(nb[2]) && held(CELLS[nb[2] as usize].neighbors[2]))
        }
        Topology::TJunctionTop => {
            (open(nb[0]) && held(nb[0]) && open(nb[1]) && held(nb[1]))
                || (open(nb[2]) && held(nb[2]) && held(CELLS[nb[2] as usize].neighbors[3]))
        }
        Topology::Cross => {
            (open(nb[0]) && held(nb[0]) && open(nb[1]) && held(nb[1]))
                || (open(nb[2]) && held(nb[2]) && open(nb[3]) && held(nb[3]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every mill line of the standard board, for cross-checking the
    /// pairing rules against the adjacency table.
    const LINES: [[u8; 3]; 16] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        [9, 10, 11],
        [12, 13, 14],
        [15, 16, 17],
        [18, 19, 20],
        [21, 22, 23],
        [0, 9, 21],
        [3, 10, 18],
        [6, 11, 15],
        [1, 4, 7],
        [16, 19, 22],
        [8, 12, 17],
        [5, 13, 20],
        [2, 14, 23],
    ];

    #[test]
    fn adjacency_is_symmetric() {
        for (i, info) in CELLS.iter().enumerate() {
            for &n in info.neighbors {
                assert!(
                    CELLS[n as usize].neighbors.contains(&(i as u8)),
                    "cell {i} lists {n} but not vice versa"
                );
            }
        }
    }

    #[test]
    fn neighbor_counts_match_topology() {
        for info in &CELLS {
            let expected = match info.topology {
                Topology::Corner => 2,
                Topology::TJunctionBottom | Topology::TJunctionTop => 3,
                Topology::Cross => 4,
            };
            assert_eq!(info.neighbors.len(), expected);
        }
    }

    /// For each line, holding the other two cells completes a mill through
    /// each member; holding any fewer does not.
    #[test]
    fn pairing_covers_exactly_the_sixteen_lines() {
        for cell in 0..CELL_COUNT as u8 {
            for line in &LINES {
                if !line.contains(&cell) {
                    continue;
                }
                let held = |i: u8| line.contains(&i) && i != cell;
                assert!(
                    mill_through(cell, None, held),
                    "cell {cell} should complete line {line:?}"
                );
            }
            // No spurious mills: holding no cells at all never completes one.
            assert!(!mill_through(cell, None, |_| false));
        }
    }

    #[test]
    fn exclusion_breaks_the_line_through_a_direct_neighbor() {
        // Men on 0 and 1; a man sliding 1 -> 2 must not count cell 1.
        let held = |i: u8| i == 0 || i == 1;
        assert!(mill_through(2, None, held));
        assert!(!mill_through(2, Some(1), held));
    }
}
