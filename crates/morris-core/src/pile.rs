//! The four piles standing beside the board.
//!
//! Each party owns a reserve pile (men not yet placed) and is drained into
//! the opponent's capture pile as the game progresses. A pile is a small
//! stack: men enter at the first free slot and leave from the last occupied
//! one, so the occupied prefix stays contiguous.

use crate::player::Player;

/// Maximum number of men a pile can hold.
pub const PILE_CAPACITY: usize = 9;

/// Identifies one of the four piles, in board exchange order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PileId {
    /// White men waiting to be placed.
    WhiteReserve,
    /// Black men captured by white.
    BlackCaptured,
    /// Black men waiting to be placed.
    BlackReserve,
    /// White men captured by black.
    WhiteCaptured,
}

impl PileId {
    /// Number of piles in a game.
    pub const COUNT: usize = 4;

    /// All piles, in exchange order.
    pub const ALL: [PileId; PileId::COUNT] = [
        PileId::WhiteReserve,
        PileId::BlackCaptured,
        PileId::BlackReserve,
        PileId::WhiteCaptured,
    ];

    /// Converts the `PileId` into a `usize` index (0-3, exchange order).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The reserve pile `color` draws from during the placement phase.
    #[inline]
    pub fn reserve(color: Player) -> PileId {
        match color {
            Player::White => PileId::WhiteReserve,
            Player::Black => PileId::BlackReserve,
        }
    }

    /// The pile collecting `color`'s captured men.
    #[inline]
    pub fn captured(color: Player) -> PileId {
        match color {
            Player::White => PileId::WhiteCaptured,
            Player::Black => PileId::BlackCaptured,
        }
    }

    /// The color of the men this pile holds.
    #[inline]
    pub fn content_color(self) -> Player {
        match self {
            PileId::WhiteReserve | PileId::WhiteCaptured => Player::White,
            PileId::BlackReserve | PileId::BlackCaptured => Player::Black,
        }
    }
}

/// A stack of up to nine men of mixed occupancy slots.
///
/// Slots are exposed positionally as well, which deep copies and test
/// fixtures rely on; regular play only uses [`push`](Pile::push) and
/// [`pop`](Pile::pop).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pile {
    slots: [Option<Player>; PILE_CAPACITY],
}

impl Default for Pile {
    fn default() -> Self {
        Self::new()
    }
}

impl Pile {
    /// Creates an empty pile.
    #[inline]
    pub fn new() -> Pile {
        Pile {
            slots: [None; PILE_CAPACITY],
        }
    }

    /// Creates a pile holding `count` men of the given color.
    ///
    /// # Panics
    /// Panics if `count` exceeds the pile capacity.
    pub fn filled(color: Player, count: usize) -> Pile {
        assert!(count <= PILE_CAPACITY, "a pile holds at most nine men");
        let mut pile = Pile::new();
        for slot in 0..count {
            pile.slots[slot] = Some(color);
        }
        pile
    }

    /// Puts a man onto the first free slot.
    ///
    /// # Panics
    /// Panics if the pile is already full.
    pub fn push(&mut self, man: Player) {
        let slot = self
            .slots
            .iter()
            .position(|s| s.is_none())
            .expect("push onto a full pile");
        self.slots[slot] = Some(man);
    }

    /// Removes the man from the last occupied slot.
    ///
    /// # Panics
    /// Panics if the pile is empty.
    pub fn pop(&mut self) {
        let slot = self
            .slots
            .iter()
            .rposition(|s| s.is_some())
            .expect("pop from an empty pile");
        self.slots[slot] = None;
    }

    /// Returns the occupant of the given slot.
    #[inline]
    pub fn get(&self, position: usize) -> Option<Player> {
        self.slots[position]
    }

    /// Overwrites the given slot.
    #[inline]
    pub fn set(&mut self, position: usize, man: Option<Player>) {
        self.slots[position] = man;
    }

    /// Returns how many men the pile holds.
    #[inline]
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns whether the pile holds no men.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots[0].is_none()
    }

    /// Removes all men from the pile.
    pub fn clear(&mut self) {
        self.slots = [None; PILE_CAPACITY];
    }
}
