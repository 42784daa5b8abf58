use morris_core::board::{Board, GameLost, MEN_PER_SIDE};
use morris_core::pile::PileId;
use morris_core::player::Player;
use morris_core::search::{Engine, SearchOutcome};

use rand::RngExt;

fn assert_nine_men_invariant(board: &Board) {
    for color in Player::ALL {
        let total = board.men_on_board(color, true)
            + board.pile(PileId::reserve(color)).count()
            + board.pile(PileId::captured(color)).count();
        assert_eq!(total, MEN_PER_SIDE, "{color} men went missing");
        assert_eq!(
            board.men_on_board(color, true),
            board.men_on_board(color, false),
            "tracking diverged from occupancy for {color}"
        );
    }
}

#[test]
fn engine_self_play_preserves_the_board_invariants() {
    let mut board = Board::new();
    let mut engine = Engine::new();
    engine.set_max_depth(2);
    let mut color = Player::White;
    for _ in 0..40 {
        match engine.choose_move(&board, color) {
            SearchOutcome::Move(mv) | SearchOutcome::Won(mv) => {
                assert_eq!(mv.color(), color);
                board.apply(&mv, false);
            }
            SearchOutcome::Drawn | SearchOutcome::Lost(_) => break,
        }
        assert_nine_men_invariant(&board);
        color = color.opponent();
    }
}

#[test]
fn engine_versus_random_opponent_round_trips_every_move() {
    let mut rng = rand::rng();
    let mut board = Board::new();
    let mut engine = Engine::new();
    engine.set_max_depth(2);
    let mut color = Player::White;
    for _ in 0..60 {
        let mv = if color == Player::White {
            match engine.choose_move(&board, color) {
                SearchOutcome::Move(mv) | SearchOutcome::Won(mv) => mv,
                SearchOutcome::Drawn | SearchOutcome::Lost(_) => break,
            }
        } else {
            let moves = match board.possible_moves(color) {
                Ok(moves) if !moves.is_empty() => moves,
                _ => break,
            };
            moves[rng.random_range(0..moves.len())].clone()
        };
        let before = board.clone();
        board.apply(&mv, false);
        let mut undone = board.clone();
        undone.apply(&mv, true);
        // Occupancy and piles must return exactly; the tracking arrays may
        // permute when a capture lands on a non-empty pile, so the undo is
        // compared through the exchange format.
        assert_eq!(
            undone.to_exchange_format(),
            before.to_exchange_format(),
            "undo of {mv} did not restore the position"
        );
        assert_nine_men_invariant(&board);
        color = color.opponent();
    }
}

#[test]
fn a_walled_in_player_has_lost() {
    let mut cells = [None; 24];
    for c in [0u8, 2, 6, 8] {
        cells[c as usize] = Some(Player::White);
    }
    for c in [1u8, 7, 9, 11, 12, 14] {
        cells[c as usize] = Some(Player::Black);
    }
    let board = Board::from_exchange_format(cells, [0, 3, 0, 5]).unwrap();
    assert_eq!(
        board.possible_moves(Player::White),
        Err(GameLost(Player::White))
    );
    let mut engine = Engine::new();
    assert_eq!(
        engine.choose_move(&board, Player::White),
        SearchOutcome::Lost(Player::White)
    );
}

#[test]
fn the_full_placement_phase_empties_both_reserves() {
    let mut board = Board::new();
    let mut color = Player::White;
    for turn in 0..2 * MEN_PER_SIDE {
        assert!(!board.placement_done(color), "reserve drained early");
        let moves = board.possible_moves(color).unwrap();
        // Captures become possible as soon as a placement can close a mill.
        let mv = moves.iter().find(|mv| !mv.is_capture()).unwrap_or(&moves[0]);
        board.apply(mv, false);
        assert_nine_men_invariant(&board);
        assert_eq!(
            board.pile(PileId::reserve(color)).count(),
            MEN_PER_SIDE - turn / 2 - 1
        );
        color = color.opponent();
    }
    assert!(board.placement_done(Player::White));
    assert!(board.placement_done(Player::Black));
}
