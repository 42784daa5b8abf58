//! NegaScout move selection with killer-move reordering.
//!
//! The engine walks a lazily expanded [`SearchTree`]: a node's children
//! are generated from the board exactly once, ordered by descending
//! estimation, immediately before they are searched. Most children are
//! probed with a null window and only re-searched with the full window
//! when the probe lands strictly between the bounds. Sibling results feed
//! back into a shared per-ply move set (the killer heuristic), so a move
//! that refuted one line is tried first in the next.

mod tree;

use log::debug;

use crate::board::{Board, GameLost};
use crate::moves::{self, Move};
use crate::player::Player;
use crate::priority_set::MultiPrioritySet;

use tree::{NodeId, SearchTree};

/// A move set ordered structurally (membership) and by descending
/// estimation (search order).
pub(crate) fn move_set() -> MultiPrioritySet<Move> {
    MultiPrioritySet::with_orders(vec![moves::structural, moves::by_estimation_desc])
}

/// What a move selection can end in, besides a regular move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The best move found within the depth limit.
    Move(Move),
    /// This move leaves the opponent without any reply; playing it wins
    /// immediately.
    Won(Move),
    /// Both sides are down to three men; the game ends in a draw.
    Drawn,
    /// The named player has no legal move and loses.
    Lost(Player),
}

/// The depth-limited NegaScout engine.
///
/// An engine only holds configuration; all search state lives on the
/// stack of one [`choose_move`](Engine::choose_move) call, so a fresh
/// instance per probe is cheap.
pub struct Engine {
    max_depth: u32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine searching four plies deep.
    pub fn new() -> Engine {
        Engine { max_depth: 4 }
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline]
    pub fn set_max_depth(&mut self, depth: u32) {
        self.max_depth = depth;
    }

    /// Selects a move for `color` on the given board.
    ///
    /// The board is only read; the search works on a private copy. A
    /// configured depth below two is raised to two first.
    ///
    /// # Returns
    /// [`SearchOutcome::Move`] with the best candidate, or one of the
    /// three terminal outcomes; callers must branch on all four.
    pub fn choose_move(&mut self, board: &Board, color: Player) -> SearchOutcome {
        self.max_depth = self.max_depth.max(2);
        let mut board = board.clone();
        let mut tree = SearchTree::new();
        let root = tree.root();
        let mut killers = move_set();
        {
            let mut pool = move_set();
            let mut opening = move_set();
            if let Err(GameLost(loser)) = board.collect_moves(color, &mut pool, &mut opening) {
                return SearchOutcome::Lost(loser);
            }
            tree.add_all(root, &opening, 1);
        }
        let Some(child) = tree.pop(root) else {
            return SearchOutcome::Drawn;
        };
        board.apply(tree.move_of(child), false);
        if self
            .expand(&board, &mut tree, child, color.opponent(), &mut killers)
            .is_err()
        {
            let winner = tree.move_of(child).clone();
            debug!("{winner} wins the game outright");
            return SearchOutcome::Won(winner);
        }
        let mut best = tree.move_of(child).clone();
        let beta = i32::MAX;
        let mut alpha = -self.negascout(
            &mut board,
            &mut tree,
            child,
            -beta,
            i32::MAX,
            color,
            color.opponent(),
            &mut killers,
        );
        board.apply(tree.move_of(child), true);
        while let Some(child) = tree.pop(root) {
            board.apply(tree.move_of(child), false);
            if self
                .expand(&board, &mut tree, child, color.opponent(), &mut killers)
                .is_err()
            {
                let winner = tree.move_of(child).clone();
                debug!("{winner} wins the game outright");
                return SearchOutcome::Won(winner);
            }
            let mut estimation = self
                .negascout(
                    &mut board,
                    &mut tree,
                    child,
                    -alpha - 1,
                    -alpha,
                    color,
                    color.opponent(),
                    &mut killers,
                )
                .wrapping_neg();
            if alpha < estimation && estimation < beta {
                estimation = self
                    .negascout(
                        &mut board,
                        &mut tree,
                        child,
                        -beta,
                        -estimation,
                        color,
                        color.opponent(),
                        &mut killers,
                    )
                    .wrapping_neg();
            }
            if alpha < estimation {
                alpha = estimation;
                best = tree.move_of(child).clone();
            }
            board.apply(tree.move_of(child), true);
        }
        debug!(
            "selected {best} with score {alpha} at depth {}",
            self.max_depth
        );
        SearchOutcome::Move(best)
    }

    /// Populates a node's children with the replies available to `color`
    /// after the node's move, integrated through the shared pool.
    fn expand(
        &self,
        board: &Board,
        tree: &mut SearchTree,
        node: NodeId,
        color: Player,
        pool: &mut MultiPrioritySet<Move>,
    ) -> Result<(), GameLost> {
        let mut replies = move_set();
        board.collect_moves(color, pool, &mut replies)?;
        tree.add_all(node, &replies, 1);
        Ok(())
    }

    /// The recursive NegaScout step, after Reinefeld (1989).
    ///
    /// Returns the value of the node's subtree for the player to move at
    /// the node, within the window `(alpha, beta)`. `killers` holds the
    /// sibling results of the caller's ply; each child's result is folded
    /// back into it. Window arithmetic wraps on negation; degenerate
    /// windows only arise once a forced win is already on the table, and
    /// the root takes the maximum regardless.
    #[allow(clippy::too_many_arguments)]
    fn negascout(
        &self,
        board: &mut Board,
        tree: &mut SearchTree,
        node: NodeId,
        mut alpha: i32,
        beta: i32,
        color: Player,
        current: Player,
        killers: &mut MultiPrioritySet<Move>,
    ) -> i32 {
        if !tree.has_child(node) {
            if board.men_on_board(Player::White, false) == 3
                && board.men_on_board(Player::Black, false) == 3
            {
                return 0;
            }
            let score = evaluate(board, color);
            return if current == color { score } else { -score };
        }
        // Reply pool shared by all children of this node; it doubles as
        // the killer set one ply further down.
        let mut pool = move_set();
        let child = tree.pop(node).expect("node has a child");
        board.apply(tree.move_of(child), false);
        let branch = tree.depth(child) < self.max_depth;
        if branch {
            match self.expand(board, tree, child, current.opponent(), &mut pool) {
                Ok(()) => {
                    let estimation = self
                        .negascout(
                            board,
                            tree,
                            child,
                            beta.wrapping_neg(),
                            alpha.wrapping_neg(),
                            color,
                            current.opponent(),
                            &mut pool,
                        )
                        .wrapping_neg();
                    raise_killer(killers, tree.move_of(child), estimation);
                    alpha = alpha.max(estimation);
                }
                // The opponent cannot answer this child at all.
                Err(GameLost(_)) => alpha = i32::MAX,
            }
        }
        if alpha >= beta {
            tree.clear(node);
        }
        board.apply(tree.move_of(child), true);
        while let Some(child) = tree.pop(node) {
            board.apply(tree.move_of(child), false);
            if branch
                && self
                    .expand(board, tree, child, current.opponent(), &mut pool)
                    .is_err()
            {
                alpha = i32::MAX;
            }
            let mut estimation = self
                .negascout(
                    board,
                    tree,
                    child,
                    alpha.wrapping_neg().wrapping_sub(1),
                    alpha.wrapping_neg(),
                    color,
                    current.opponent(),
                    &mut pool,
                )
                .wrapping_neg();
            if alpha < estimation && estimation < beta {
                estimation = self
                    .negascout(
                        board,
                        tree,
                        child,
                        beta.wrapping_neg(),
                        estimation.wrapping_neg(),
                        color,
                        current.opponent(),
                        &mut pool,
                    )
                    .wrapping_neg();
            }
            raise_killer(killers, tree.move_of(child), estimation);
            alpha = alpha.max(estimation);
            if alpha >= beta {
                tree.clear(node);
            }
            board.apply(tree.move_of(child), true);
        }
        alpha
    }
}

/// Folds a child's search result into the sibling killer set.
///
/// The canonical instance is taken out before its estimation changes,
/// since the estimation keys the set's second order.
fn raise_killer(killers: &mut MultiPrioritySet<Move>, mv: &Move, estimation: i32) {
    let mut canonical = killers.take(mv).unwrap_or_else(|| mv.clone());
    canonical.raise_estimation(estimation);
    killers.add(canonical);
}

/// Material-and-mills heuristic from `color`'s point of view.
fn evaluate(board: &Board, color: Player) -> i32 {
    let enemy = color.opponent();
    board.men_on_board(color, false) as i32 - board.men_on_board(enemy, false) as i32
        + 3 * (board.mills_of(color) as i32 - board.mills_of(enemy) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::cell::CELL_COUNT;
    use crate::moves::Location;
    use crate::pile::PileId;
    use crate::player::Player;

    fn board_from(
        white: &[u8],
        black: &[u8],
        pile_counts: [u8; PileId::COUNT],
    ) -> Board {
        let mut cells = [None; CELL_COUNT];
        for &c in white {
            cells[c as usize] = Some(Player::White);
        }
        for &c in black {
            cells[c as usize] = Some(Player::Black);
        }
        Board::from_exchange_format(cells, pile_counts).expect("valid fixture")
    }

    #[test]
    fn opening_search_returns_a_legal_placement() {
        let board = Board::new();
        let mut engine = Engine::new();
        engine.set_max_depth(2);
        match engine.choose_move(&board, Player::White) {
            SearchOutcome::Move(mv) => {
                let legal = board.possible_moves(Player::White).unwrap();
                assert!(legal.contains(&mv), "{mv} is not a legal opening");
            }
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn mill_capture_reducing_opponent_below_three_wins() {
        // White closes 0-1-2 by sliding 4 -> 1; any capture leaves black
        // with two men and no reply.
        let board = board_from(
            &[0, 2, 4, 6, 9, 11, 15, 16, 17],
            &[5, 18, 23],
            [0, 6, 0, 0],
        );
        let mut engine = Engine::new();
        engine.set_max_depth(2);
        let outcome = engine.choose_move(&board, Player::White);
        assert_eq!(
            outcome,
            SearchOutcome::Won(Move::capture(
                Player::White,
                Location::Cell(4),
                Location::Cell(1),
                Location::Cell(5),
                Location::Pile(PileId::BlackCaptured),
            ))
        );
    }

    #[test]
    fn a_three_on_three_leaf_scores_as_a_draw() {
        // Black holds the 3-10-18 mill; material alone would put white at
        // minus three, but three men each ends the game level.
        let engine = Engine::new();
        let mut tree = SearchTree::new();
        let mut killers = move_set();
        let root = tree.root();
        let mut board = board_from(&[0, 1, 4], &[3, 10, 18], [0, 6, 0, 6]);
        let score = engine.negascout(
            &mut board,
            &mut tree,
            root,
            i32::MIN + 1,
            i32::MAX,
            Player::White,
            Player::White,
            &mut killers,
        );
        assert_eq!(score, 0);
        // One extra white man and the same leaf is scored on material again.
        let mut board = board_from(&[0, 1, 4, 9], &[3, 10, 18], [0, 6, 0, 5]);
        let score = engine.negascout(
            &mut board,
            &mut tree,
            root,
            i32::MIN + 1,
            i32::MAX,
            Player::White,
            Player::White,
            &mut killers,
        );
        assert_eq!(score, -2);
    }

    #[test]
    fn capturing_down_to_three_each_outscores_a_losing_shuffle() {
        // Black, a man down, can close 16-19-22 by sliding 23 -> 22 and
        // capture. Every leaf behind that move is three men each and
        // scores zero; every quiet alternative leaves black at minus one.
        let board = board_from(&[0, 2, 7, 21], &[16, 19, 23], [0, 6, 0, 5]);
        let mut engine = Engine::new();
        engine.set_max_depth(2);
        match engine.choose_move(&board, Player::Black) {
            SearchOutcome::Move(mv) => {
                assert_eq!(mv.source(), Location::Cell(23));
                assert_eq!(mv.destination(), Location::Cell(22));
                assert!(mv.is_capture());
            }
            other => panic!("expected the mill capture, got {other:?}"),
        }
    }

    #[test]
    fn both_sides_at_three_men_is_drawn() {
        let board = board_from(&[0, 1, 4], &[10, 13, 19], [0, 6, 0, 6]);
        let mut engine = Engine::new();
        engine.set_max_depth(2);
        assert_eq!(
            engine.choose_move(&board, Player::White),
            SearchOutcome::Drawn
        );
    }

    #[test]
    fn blocked_player_is_lost() {
        let board = board_from(&[0, 2, 6, 8], &[1, 7, 9, 11, 12, 14], [0, 3, 0, 5]);
        let mut engine = Engine::new();
        engine.set_max_depth(2);
        assert_eq!(
            engine.choose_move(&board, Player::White),
            SearchOutcome::Lost(Player::White)
        );
    }

    #[test]
    fn configured_depth_below_two_is_raised() {
        let mut engine = Engine::new();
        engine.set_max_depth(0);
        engine.choose_move(&Board::new(), Player::White);
        assert_eq!(engine.max_depth(), 2);
    }

    #[test]
    fn raised_killers_lead_their_order() {
        let mut killers = move_set();
        let a = Move::relocation(Player::White, Location::Cell(0), Location::Cell(1));
        let b = Move::relocation(Player::White, Location::Cell(2), Location::Cell(1));
        killers.add(a.clone());
        killers.add(b.clone());
        raise_killer(&mut killers, &b, 7);
        assert_eq!(killers.first(1), Some(&b));
        assert_eq!(killers.first(1).unwrap().estimation(), 7);
        // Raising never lowers an already better result.
        raise_killer(&mut killers, &b, 3);
        assert_eq!(killers.first(1).unwrap().estimation(), 7);
        assert_eq!(killers.len(), 2);
    }

    #[test]
    fn a_raised_sibling_leads_the_next_expansion_of_its_ply() {
        let board = Board::new();
        let mut pool = move_set();
        let mut first = move_set();
        board
            .collect_moves(Player::White, &mut pool, &mut first)
            .unwrap();
        let favored = Move::relocation(
            Player::White,
            Location::Pile(PileId::WhiteReserve),
            Location::Cell(17),
        );
        // A sibling's subtree refuted this placement; fold the result back
        // into the shared pool, as the search does after each child.
        raise_killer(&mut pool, &favored, 11);
        let mut replies = move_set();
        board
            .collect_moves(Player::White, &mut pool, &mut replies)
            .unwrap();
        let mut tree = SearchTree::new();
        let root = tree.root();
        tree.add_all(root, &replies, 1);
        let child = tree.pop(root).expect("opening has children");
        assert_eq!(tree.move_of(child).destination(), Location::Cell(17));
        assert_eq!(tree.move_of(child).estimation(), 11);
    }

    #[test]
    fn evaluation_counts_men_and_mills() {
        let board = board_from(
            &[0, 1, 14],
            &[3, 10, 18, 4, 6, 8, 19, 22, 23],
            [0, 0, 0, 6],
        );
        // Black leads by six men and one mill.
        assert_eq!(evaluate(&board, Player::Black), 9);
        assert_eq!(evaluate(&board, Player::White), -9);
    }

    #[test]
    fn deeper_search_still_finds_the_forced_win() {
        let board = board_from(
            &[0, 2, 4, 6, 9, 11, 15, 16, 17],
            &[5, 18, 23],
            [0, 6, 0, 0],
        );
        let mut engine = Engine::new();
        engine.set_max_depth(4);
        match engine.choose_move(&board, Player::White) {
            SearchOutcome::Won(mv) => {
                assert_eq!(mv.destination(), Location::Cell(1));
                assert!(mv.is_capture());
            }
            other => panic!("expected a win, got {other:?}"),
        }
    }
}
