//! Board state, rules, and legal-move enumeration.
//!
//! The board couples the 24-cell graph from [`crate::cell`] with the four
//! piles, a per-color tracking array locating each of the nine men, and
//! the placement-phase latch. All rule knowledge lives here: mill
//! detection on live occupancy, phase-dependent move generation, capture
//! eligibility, and the draw/loss endgame conditions.

use std::fmt;

use log::warn;
use thiserror::Error;

use crate::cell::{CELL_COUNT, CELLS, mill_through};
use crate::moves::{Location, Move};
use crate::pile::{PILE_CAPACITY, Pile, PileId};
use crate::player::Player;
use crate::priority_set::MultiPrioritySet;

/// Men each party starts the game with.
pub const MEN_PER_SIDE: usize = 9;

/// Raised when a party has no legal move left, or fewer than three men.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{0} has no move left and loses the game")]
pub struct GameLost(pub Player);

/// Rejection of an externally supplied board state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// A color's men on board plus piles did not sum to nine.
    #[error("{player} has {found} men in play instead of nine")]
    ManCount { player: Player, found: usize },
    /// A pile was reported with more than nine men.
    #[error("pile {pile:?} cannot hold {count} men")]
    PileOverflow { pile: PileId, count: u8 },
}

/// The complete game state.
///
/// A `Board` is plain data; `clone()` yields a fully independent copy the
/// search can mutate without affecting the original. Equality compares
/// occupancy, piles, tracking and phase state bit for bit, which the
/// apply/undo round-trip tests rely on.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    /// Occupant per intersection.
    cells: [Option<Player>; CELL_COUNT],
    /// The four piles, indexed by [`PileId::index`].
    piles: [Pile; PileId::COUNT],
    /// Current location of each of a color's nine men, indexed by
    /// [`Player::index`]. Slots are not kept in any particular order.
    tracked: [[Location; MEN_PER_SIDE]; 2],
    /// Latched to `true` the first time a color's reserve runs empty and
    /// never cleared again, not even when a move is undone.
    placed_all: [bool; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates the opening position: all cells empty, both reserves full.
    pub fn new() -> Board {
        let mut piles = [Pile::new(); PileId::COUNT];
        piles[PileId::WhiteReserve.index()] = Pile::filled(Player::White, MEN_PER_SIDE);
        piles[PileId::BlackReserve.index()] = Pile::filled(Player::Black, MEN_PER_SIDE);
        Board {
            cells: [None; CELL_COUNT],
            piles,
            tracked: [
                [Location::Pile(PileId::BlackReserve); MEN_PER_SIDE],
                [Location::Pile(PileId::WhiteReserve); MEN_PER_SIDE],
            ],
            placed_all: [false, false],
        }
    }

    /// The occupant of an intersection.
    #[inline]
    pub fn occupant(&self, cell: u8) -> Option<Player> {
        self.cells[cell as usize]
    }

    /// Read access to one pile.
    #[inline]
    pub fn pile(&self, id: PileId) -> &Pile {
        &self.piles[id.index()]
    }

    /// Whether the color has finished its placement phase.
    ///
    /// This is the latch, not the live reserve count; after undoing the
    /// final placement the two can disagree.
    #[inline]
    pub fn placement_done(&self, color: Player) -> bool {
        self.placed_all[color.index()]
    }

    /// Whether the man on `cell` sits in a completed mill of its color.
    pub fn in_mill(&self, cell: u8) -> bool {
        match self.cells[cell as usize] {
            Some(color) => mill_through(cell, None, |i| self.cells[i as usize] == Some(color)),
            None => false,
        }
    }

    /// Whether a man of `color` arriving on `cell` would complete a mill,
    /// treating `vacated` (the cell the man comes from, if any) as empty.
    pub fn would_form_mill(&self, cell: u8, color: Player, vacated: Option<u8>) -> bool {
        mill_through(cell, vacated, |i| self.cells[i as usize] == Some(color))
    }

    /// Number of completed mills the color currently holds.
    pub fn mills_of(&self, color: Player) -> usize {
        let milled = self.tracked[color.index()]
            .iter()
            .filter(|loc| matches!(loc, Location::Cell(c) if self.in_mill(*c)))
            .count();
        milled / 3
    }

    /// Number of the color's men standing on the board.
    ///
    /// # Arguments
    /// * `exact` - `false` trusts the tracking array (O(9)); `true`
    ///   recounts the cells (O(24)), for use after ingesting an external
    ///   board state.
    pub fn men_on_board(&self, color: Player, exact: bool) -> usize {
        if exact {
            self.cells.iter().filter(|&&c| c == Some(color)).count()
        } else {
            self.tracked[color.index()]
                .iter()
                .filter(|loc| matches!(loc, Location::Cell(_)))
                .count()
        }
    }

    /// Enumerates the color's legal moves into a plain list, in generation
    /// order.
    ///
    /// # Returns
    /// An empty list if both sides are down to three men (the draw
    /// condition, signaled by the caller, not here).
    ///
    /// # Errors
    /// [`GameLost`] if the color has fewer than three men or no legal
    /// move.
    pub fn possible_moves(&self, color: Player) -> Result<Vec<Move>, GameLost> {
        if self.game_over(color)? {
            return Ok(Vec::new());
        }
        let mut moves = Vec::new();
        self.generate(color, &mut |mv| moves.push(mv));
        if moves.is_empty() {
            return Err(GameLost(color));
        }
        Ok(moves)
    }

    /// Enumerates the color's legal moves into an ordered move set.
    ///
    /// Every generated move is first integrated into `pool`, so a move
    /// already known there keeps its accumulated estimation; `out`
    /// receives the canonical instances. Both sets must be configured
    /// with the same orders.
    ///
    /// # Errors
    /// [`GameLost`] under the same conditions as
    /// [`possible_moves`](Board::possible_moves).
    pub fn collect_moves(
        &self,
        color: Player,
        pool: &mut MultiPrioritySet<Move>,
        out: &mut MultiPrioritySet<Move>,
    ) -> Result<(), GameLost> {
        if self.game_over(color)? {
            return Ok(());
        }
        let mut produced = false;
        self.generate(color, &mut |mv| {
            let canonical = pool.integrate(mv).clone();
            out.add(canonical);
            produced = true;
        });
        if !produced {
            return Err(GameLost(color));
        }
        Ok(())
    }

    /// Draw/loss gate run before any enumeration.
    ///
    /// # Returns
    /// `Ok(true)` when both sides are down to exactly three men, the
    /// draw condition under which enumeration yields nothing.
    fn game_over(&self, color: Player) -> Result<bool, GameLost> {
        let own_caught = self.piles[PileId::captured(color).index()].count();
        let enemy_caught = self.piles[PileId::captured(color.opponent()).index()].count();
        if own_caught == 6 && enemy_caught == 6 {
            return Ok(true);
        }
        if own_caught > 6 {
            return Err(GameLost(color));
        }
        Ok(false)
    }

    /// Phase-dispatching move generator. Emits every legal move exactly
    /// once; the caller decides how to store them.
    fn generate(&self, color: Player, emit: &mut impl FnMut(Move)) {
        let prison = Location::Pile(PileId::captured(color.opponent()));
        // Victims already found to be protected, so each man's mill test
        // runs at most once per enumeration.
        let mut milled: Vec<u8> = Vec::new();
        if self.placed_all[color.index()] {
            for &location in &self.tracked[color.index()] {
                let Location::Cell(src) = location else {
                    continue;
                };
                for &dst in CELLS[src as usize].neighbors {
                    if self.cells[dst as usize].is_some() {
                        continue;
                    }
                    if self.would_form_mill(dst, color, Some(src)) {
                        self.captures(color, location, dst, prison, &mut milled, emit);
                    } else {
                        emit(Move::relocation(color, location, Location::Cell(dst)));
                    }
                }
            }
        } else {
            let reserve = Location::Pile(PileId::reserve(color));
            for dst in 0..CELL_COUNT as u8 {
                if self.cells[dst as usize].is_some() {
                    continue;
                }
                if self.would_form_mill(dst, color, None) {
                    self.captures(color, reserve, dst, prison, &mut milled, emit);
                } else {
                    emit(Move::relocation(color, reserve, Location::Cell(dst)));
                }
            }
        }
    }

    /// Emits one capture per unprotected opponent man for a mill-closing
    /// move from `from` onto `dst`.
    ///
    /// A man standing in a mill of its own color is protected. If every
    /// opponent man is protected the mill-closing move is not playable at
    /// all and nothing is emitted.
    fn captures(
        &self,
        color: Player,
        from: Location,
        dst: u8,
        prison: Location,
        milled: &mut Vec<u8>,
        emit: &mut impl FnMut(Move),
    ) {
        let enemy = color.opponent();
        for &location in &self.tracked[enemy.index()] {
            let Location::Cell(victim) = location else {
                continue;
            };
            if milled.contains(&victim) {
                continue;
            }
            if self.in_mill(victim) {
                milled.push(victim);
            } else {
                emit(Move::capture(
                    color,
                    from,
                    Location::Cell(dst),
                    location,
                    prison,
                ));
            }
        }
    }

    /// Executes a move, or undoes it.
    ///
    /// Within each pick-up/placement pair the pick-up determines which
    /// tracking slot the placement rewrites. Undo replays the reversed
    /// move through the same machinery. The placement-phase latch is
    /// re-examined after every move but only ever flips forward.
    ///
    /// # Panics
    /// Panics if the move does not fit the board (picking up from an
    /// empty cell or pile); such a move is a programming defect.
    pub fn apply(&mut self, mv: &Move, reverse: bool) {
        let undo;
        let mv = if reverse {
            undo = mv.reversed();
            &undo
        } else {
            mv
        };
        let mut slot: Option<usize> = None;
        for action in mv.actions() {
            let side = action.color.index();
            if action.place {
                let slot = slot.expect("a pick-up precedes every placement");
                self.tracked[side][slot] = action.target;
                match action.target {
                    Location::Cell(c) => self.cells[c as usize] = Some(action.color),
                    Location::Pile(p) => self.piles[p.index()].push(action.color),
                }
            } else {
                match action.target {
                    Location::Cell(c) => self.cells[c as usize] = None,
                    Location::Pile(p) => self.piles[p.index()].pop(),
                }
                slot = self.tracked[side]
                    .iter()
                    .rposition(|&loc| loc == action.target);
                assert!(slot.is_some(), "picked-up man is not tracked");
            }
        }
        if !(self.placed_all[0] && self.placed_all[1]) {
            for color in Player::ALL {
                if self.piles[PileId::reserve(color).index()].is_empty() {
                    self.placed_all[color.index()] = true;
                }
            }
        }
    }

    /// Serializes the state for the UI/perception boundary.
    ///
    /// # Returns
    /// Per-cell occupancy plus the four pile counts in
    /// [`PileId::ALL`] order.
    pub fn to_exchange_format(&self) -> ([Option<Player>; CELL_COUNT], [u8; PileId::COUNT]) {
        let mut counts = [0u8; PileId::COUNT];
        for id in PileId::ALL {
            counts[id.index()] = self.piles[id.index()].count() as u8;
        }
        (self.cells, counts)
    }

    /// Rebuilds a board from externally observed state.
    ///
    /// The tracking arrays are reconstructed (reserve men first, then
    /// captured, then a board scan) and the placement flags derived from
    /// the reserve counts; the undo latch cannot survive this boundary.
    ///
    /// # Errors
    /// [`ExchangeError`] if a pile count exceeds nine or a color's men
    /// do not sum to nine.
    pub fn from_exchange_format(
        cells: [Option<Player>; CELL_COUNT],
        pile_counts: [u8; PileId::COUNT],
    ) -> Result<Board, ExchangeError> {
        for id in PileId::ALL {
            let count = pile_counts[id.index()];
            if count as usize > PILE_CAPACITY {
                warn!("rejecting external board state: {count} men reported on {id:?}");
                return Err(ExchangeError::PileOverflow { pile: id, count });
            }
        }
        for color in Player::ALL {
            let on_board = cells.iter().filter(|&&c| c == Some(color)).count();
            let found = on_board
                + pile_counts[PileId::reserve(color).index()] as usize
                + pile_counts[PileId::captured(color).index()] as usize;
            if found != MEN_PER_SIDE {
                warn!("rejecting external board state: {found} {color} men in play");
                return Err(ExchangeError::ManCount {
                    player: color,
                    found,
                });
            }
        }
        let mut piles = [Pile::new(); PileId::COUNT];
        for id in PileId::ALL {
            piles[id.index()] = Pile::filled(id.content_color(), pile_counts[id.index()] as usize);
        }
        let mut tracked = [[Location::Cell(0); MEN_PER_SIDE]; 2];
        let mut placed_all = [false, false];
        for color in Player::ALL {
            let row = &mut tracked[color.index()];
            let mut next = 0;
            for id in [PileId::reserve(color), PileId::captured(color)] {
                for _ in 0..pile_counts[id.index()] {
                    row[next] = Location::Pile(id);
                    next += 1;
                }
            }
            for (i, &occupant) in cells.iter().enumerate() {
                if occupant == Some(color) {
                    row[next] = Location::Cell(i as u8);
                    next += 1;
                }
            }
            placed_all[color.index()] = pile_counts[PileId::reserve(color).index()] == 0;
        }
        Ok(Board {
            cells,
            piles,
            tracked,
            placed_all,
        })
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = |i: usize| match self.cells[i] {
            Some(Player::White) => 'W',
            Some(Player::Black) => 'B',
            None => '.',
        };
        writeln!(
            f,
            "{}-----------{}-----------{}     white reserve: {}  white captured: {}",
            m(21),
            m(22),
            m(23),
            self.piles[PileId::WhiteReserve.index()].count(),
            self.piles[PileId::WhiteCaptured.index()].count(),
        )?;
        writeln!(f, "|           |           |")?;
        writeln!(
            f,
            "|   {}-------{}-------{}   |     black reserve: {}  black captured: {}",
            m(18),
            m(19),
            m(20),
            self.piles[PileId::BlackReserve.index()].count(),
            self.piles[PileId::BlackCaptured.index()].count(),
        )?;
        writeln!(f, "|   |       |       |   |")?;
        writeln!(f, "|   |   {}---{}---{}   |   |", m(15), m(16), m(17))?;
        writeln!(f, "|   |   |       |   |   |")?;
        writeln!(
            f,
            "{}---{}---{}       {}---{}---{}",
            m(9),
            m(10),
            m(11),
            m(12),
            m(13),
            m(14)
        )?;
        writeln!(f, "|   |   |       |   |   |")?;
        writeln!(f, "|   |   {}---{}---{}   |   |", m(6), m(7), m(8))?;
        writeln!(f, "|   |       |       |   |")?;
        writeln!(f, "|   {}-------{}-------{}   |", m(3), m(4), m(5))?;
        writeln!(f, "|           |           |")?;
        write!(f, "{}-----------{}-----------{}", m(0), m(1), m(2))
    }
}
