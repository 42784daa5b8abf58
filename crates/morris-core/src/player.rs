use std::fmt;
use std::ops::Not;

/// One of the two parties of a Nine Men's Morris game.
///
/// White traditionally moves first. The discriminant order (black before
/// white) is part of the structural ordering of moves and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Both players, in index order.
    pub const ALL: [Player; 2] = [Player::Black, Player::White];

    /// Converts the `Player` into a `usize` index.
    ///
    /// # Returns
    ///
    /// `0` for black and `1` for white, usable to address per-player tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the other party.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl Not for Player {
    type Output = Player;

    #[inline]
    fn not(self) -> Player {
        self.opponent()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "black"),
            Player::White => write!(f, "white"),
        }
    }
}
