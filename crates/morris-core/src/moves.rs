//! Reversible move representation and its orderings.

use std::cmp::Ordering;
use std::fmt;

use arrayvec::ArrayVec;

use crate::cell::CELL_COUNT;
use crate::pile::PileId;
use crate::player::Player;

/// A place a man can occupy: one of the 24 intersections or one of the
/// four piles.
///
/// The derived ordering runs through the cells first and the piles after,
/// matching [`Location::index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Location {
    /// A playable intersection, `0..24`.
    Cell(u8),
    /// One of the piles beside the board.
    Pile(PileId),
}

impl Location {
    /// Flat index over cells (`0..24`) and piles (`24..28`).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Location::Cell(cell) => cell as usize,
            Location::Pile(pile) => CELL_COUNT + pile.index(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Cell(cell) => write!(f, "{cell}"),
            Location::Pile(PileId::WhiteReserve) => write!(f, "white reserve"),
            Location::Pile(PileId::BlackReserve) => write!(f, "black reserve"),
            Location::Pile(PileId::WhiteCaptured) => write!(f, "white captures"),
            Location::Pile(PileId::BlackCaptured) => write!(f, "black captures"),
        }
    }
}

/// One pick-up or put-down of a single man.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Action {
    /// True to set a man down, false to take one away.
    pub place: bool,
    /// The color of the man being handled.
    pub color: Player,
    /// Where the action happens.
    pub target: Location,
}

/// A complete turn of one party: either one relocation (two actions), or a
/// relocation that closes a mill plus the resulting capture (four actions).
///
/// Within each action pair a man is picked up first and set down second;
/// constructors enforce this. Moves carry a mutable `estimation` used to
/// reorder siblings during search; it is raised monotonically and excluded
/// from the structural comparison, so moves generated along different tree
/// paths still compare equal.
#[derive(Clone, Debug)]
pub struct Move {
    actions: ArrayVec<Action, 4>,
    estimation: i32,
}

impl Move {
    /// Builds a move from raw actions, validating the pick-up/put-down
    /// pairing.
    ///
    /// # Panics
    /// Panics if the slice does not hold 2 or 4 actions or if any pair is
    /// not a pick-up followed by a placement. Such input is a programming
    /// defect, not a runtime condition.
    pub fn from_actions(actions: &[Action]) -> Move {
        assert!(
            actions.len() == 2 || actions.len() == 4,
            "a move holds exactly two or four actions"
        );
        for pair in actions.chunks_exact(2) {
            assert!(
                !pair[0].place && pair[1].place,
                "a man has to be picked up before one can be set down"
            );
        }
        Move {
            actions: actions.iter().copied().collect(),
            estimation: 0,
        }
    }

    /// A plain relocation of one man of `color` from `from` to `to`.
    pub fn relocation(color: Player, from: Location, to: Location) -> Move {
        Move::from_actions(&[
            Action {
                place: false,
                color,
                target: from,
            },
            Action {
                place: true,
                color,
                target: to,
            },
        ])
    }

    /// A mill-closing relocation plus the capture of an opponent man.
    ///
    /// The `victim` is picked up and set down on `prison`, the capture pile
    /// of the mover's opponent.
    pub fn capture(
        color: Player,
        from: Location,
        to: Location,
        victim: Location,
        prison: Location,
    ) -> Move {
        let taken = color.opponent();
        Move::from_actions(&[
            Action {
                place: false,
                color,
                target: from,
            },
            Action {
                place: true,
                color,
                target: to,
            },
            Action {
                place: false,
                color: taken,
                target: victim,
            },
            Action {
                place: true,
                color: taken,
                target: prison,
            },
        ])
    }

    /// The actions making up this move, in execution order.
    #[inline]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of actions (2 or 4).
    #[inline]
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Whether this move captures an opponent man.
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.actions.len() == 4
    }

    /// The party executing this move.
    #[inline]
    pub fn color(&self) -> Player {
        self.actions[0].color
    }

    /// Where the moving man is taken from.
    #[inline]
    pub fn source(&self) -> Location {
        self.actions[0].target
    }

    /// Where the moving man ends up.
    #[inline]
    pub fn destination(&self) -> Location {
        self.actions[1].target
    }

    /// The captured man's cell, if this move is a capture.
    #[inline]
    pub fn victim(&self) -> Option<Location> {
        self.actions.get(2).map(|a| a.target)
    }

    /// The heuristic score accumulated for this move so far.
    #[inline]
    pub fn estimation(&self) -> i32 {
        self.estimation
    }

    /// Raises the estimation to `estimation` if it is higher than the
    /// current value; never lowers it.
    #[inline]
    pub fn raise_estimation(&mut self, estimation: i32) {
        self.estimation = self.estimation.max(estimation);
    }

    /// Produces the inverse move, used to undo this one.
    ///
    /// Within each pair the placement negates into a pick-up and the order
    /// swaps, so executing the result restores the board. The inverse
    /// starts with a fresh estimation.
    pub fn reversed(&self) -> Move {
        let mut actions = ArrayVec::new();
        for pair in self.actions.chunks_exact(2) {
            actions.push(Action {
                place: !pair[1].place,
                ..pair[1]
            });
            actions.push(Action {
                place: !pair[0].place,
                ..pair[0]
            });
        }
        Move {
            actions,
            estimation: 0,
        }
    }
}

/// Moves compare by content only: length, then action kinds, then colors,
/// then target indices. The estimation never takes part.
impl Ord for Move {
    fn cmp(&self, other: &Move) -> Ordering {
        match self.actions.len().cmp(&other.actions.len()) {
            Ordering::Equal => {}
            ord => return ord,
        }
        for (a, b) in self.actions.iter().zip(&other.actions) {
            match a.place.cmp(&b.place) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        for (a, b) in self.actions.iter().zip(&other.actions) {
            match a.color.cmp(&b.color) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        for (a, b) in self.actions.iter().zip(&other.actions) {
            match a.target.cmp(&b.target) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Move {
    fn partial_cmp(&self, other: &Move) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Move {}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            self.color(),
            self.source(),
            self.destination()
        )?;
        if let Some(victim) = self.victim() {
            write!(f, " capturing {victim}")?;
        }
        Ok(())
    }
}

/// Structural comparison, the membership order of every move set.
pub fn structural(a: &Move, b: &Move) -> Ordering {
    a.cmp(b)
}

/// Killer ordering: moves with the highest estimation come first.
pub fn by_estimation_desc(a: &Move, b: &Move) -> Ordering {
    b.estimation.cmp(&a.estimation)
}
