//! Adaptive tuning of the search depth against a wall-clock window.
//!
//! Search cost grows exponentially with depth and shrinks as the game
//! thins out, so a fixed depth either wastes strength early or stalls
//! late. The calibrator empirically probes full move selections on a
//! private copy of the live board between turns and recommends the
//! deepest setting whose cost lands inside the target window. It never
//! touches an in-flight search.

use std::time::{Duration, Instant};

use log::debug;

use crate::board::Board;
use crate::player::Player;
use crate::search::{Engine, SearchOutcome};

/// Probes faster than this push the depth up aggressively.
const MIN_TIME: Duration = Duration::from_secs(1);
/// Probes slower than this back the depth off.
const MAX_TIME: Duration = Duration::from_secs(30);

/// Recommends a search depth for one player based on timed probe runs.
///
/// The calibrator keeps its recommendation between calls, so successive
/// recalibrations start from the previously settled depth rather than
/// from scratch.
pub struct DepthCalibrator {
    board: Board,
    color: Player,
    depth: u32,
}

impl DepthCalibrator {
    /// Creates a calibrator for `color`, starting at depth two.
    pub fn new(board: &Board, color: Player) -> DepthCalibrator {
        DepthCalibrator {
            board: board.clone(),
            color,
            depth: 2,
        }
    }

    /// Replaces the calibrator's private copy of the game situation.
    pub fn update_board(&mut self, board: &Board) {
        self.board = board.clone();
    }

    /// Runs timed probes at rising depths and settles on a
    /// recommendation.
    ///
    /// Each probe is a complete move selection by a fresh [`Engine`] on a
    /// scratch copy of the stored board. A probe under the window raises
    /// the depth by four and probes again; one inside the window settles
    /// one ply deeper; one over the window settles one ply shallower,
    /// never below two.
    pub fn recommended_depth(&mut self) -> u32 {
        loop {
            let elapsed = self.probe(self.depth);
            debug!("depth {} probed in {:.3}s", self.depth, elapsed.as_secs_f64());
            if let Some(depth) = self.evaluate_probe(elapsed) {
                return depth;
            }
        }
    }

    /// Applies the window rule to one probe result.
    ///
    /// # Returns
    /// The settled recommendation, or `None` to probe again at the
    /// raised depth.
    fn evaluate_probe(&mut self, elapsed: Duration) -> Option<u32> {
        if elapsed < MIN_TIME {
            self.depth += 4;
            None
        } else if elapsed > MAX_TIME {
            self.depth = (self.depth - 1).max(2);
            Some(self.depth)
        } else {
            self.depth += 1;
            Some(self.depth)
        }
    }

    /// Times one full move selection at the given depth.
    fn probe(&self, depth: u32) -> Duration {
        let mut engine = Engine::new();
        engine.set_max_depth(depth);
        let mut scratch = self.board.clone();
        let start = Instant::now();
        match engine.choose_move(&scratch, self.color) {
            SearchOutcome::Move(mv) | SearchOutcome::Won(mv) => scratch.apply(&mv, false),
            SearchOutcome::Drawn | SearchOutcome::Lost(_) => {}
        }
        start.elapsed()
    }
}
