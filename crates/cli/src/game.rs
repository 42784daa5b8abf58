//! Interactive game loop for the Nine Men's Morris CLI.
//!
//! A session alternates between the engine and, unless the session runs
//! in automatic mode, a human entering moves on stdin. Moves are typed as
//! `<from> <to> [victim]`, where cells are their board indices and `r`
//! stands for the own reserve during the placement phase, e.g. `r 4` to
//! place on cell 4 or `4 1 5` to slide 4 to 1 and capture the man on 5.

use std::io::{self, BufRead, Write};

use log::info;

use morris_core::board::{Board, GameLost};
use morris_core::calibrate::DepthCalibrator;
use morris_core::cell::CELL_COUNT;
use morris_core::moves::{Location, Move};
use morris_core::pile::PileId;
use morris_core::player::Player;
use morris_core::search::{Engine, SearchOutcome};

/// Morris has no repetition rule; stop runaway engine-only games.
const TURN_LIMIT: u32 = 500;

/// One game of Nine Men's Morris from the opening position.
pub struct GameSession {
    board: Board,
    side_to_move: Player,
    engine: Engine,
    human: Option<Player>,
    /// One calibrator per engine-controlled color, present in adaptive
    /// mode, indexed by [`Player::index`].
    calibrators: Option<[DepthCalibrator; 2]>,
}

impl GameSession {
    pub fn new(human: Option<Player>, depth: u32, adaptive: bool) -> GameSession {
        let board = Board::new();
        let mut engine = Engine::new();
        engine.set_max_depth(depth);
        let calibrators = adaptive.then(|| {
            [
                DepthCalibrator::new(&board, Player::Black),
                DepthCalibrator::new(&board, Player::White),
            ]
        });
        GameSession {
            board,
            side_to_move: Player::White,
            engine,
            human,
            calibrators,
        }
    }

    /// Plays the game to its end, or until the human quits.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        for _ in 0..TURN_LIMIT {
            println!();
            println!("{}", self.board);
            let proceed = if self.human == Some(self.side_to_move) {
                self.human_turn(&mut input)?
            } else {
                self.engine_turn()
            };
            if !proceed {
                return Ok(());
            }
            self.side_to_move = self.side_to_move.opponent();
        }
        println!("move limit reached, game abandoned");
        Ok(())
    }

    /// Lets the engine pick and play a move.
    ///
    /// # Returns
    /// `false` once the game has ended.
    fn engine_turn(&mut self) -> bool {
        let color = self.side_to_move;
        if let Some(calibrators) = self.calibrators.as_mut() {
            let calibrator = &mut calibrators[color.index()];
            calibrator.update_board(&self.board);
            let depth = calibrator.recommended_depth();
            info!("search depth for {color} recalibrated to {depth}");
            self.engine.set_max_depth(depth);
        }
        match self.engine.choose_move(&self.board, color) {
            SearchOutcome::Move(mv) => {
                println!("{color} plays {mv}");
                self.board.apply(&mv, false);
                true
            }
            SearchOutcome::Won(mv) => {
                println!("{color} plays {mv}");
                self.board.apply(&mv, false);
                println!();
                println!("{}", self.board);
                println!("{color} wins the game");
                false
            }
            SearchOutcome::Drawn => {
                println!("both sides are down to three men, the game is drawn");
                false
            }
            SearchOutcome::Lost(loser) => {
                println!("{loser} cannot move anymore, {} wins", loser.opponent());
                false
            }
        }
    }

    /// Prompts until the human enters a legal move or ends the session.
    fn human_turn(&mut self, input: &mut impl BufRead) -> io::Result<bool> {
        let color = self.side_to_move;
        let legal = match self.board.possible_moves(color) {
            Ok(moves) if moves.is_empty() => {
                println!("both sides are down to three men, the game is drawn");
                return Ok(false);
            }
            Ok(moves) => moves,
            Err(GameLost(loser)) => {
                println!("{loser} cannot move anymore, {} wins", loser.opponent());
                return Ok(false);
            }
        };
        loop {
            print!("{color}> ");
            io::stdout().flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                println!();
                return Ok(false);
            }
            let line = line.trim();
            match line {
                "" => continue,
                "quit" => return Ok(false),
                "moves" => {
                    for mv in &legal {
                        println!("  {mv}");
                    }
                    continue;
                }
                _ => {}
            }
            match parse_request(line, color) {
                Ok(request) => {
                    if let Some(mv) = find_move(&legal, request) {
                        let mv = mv.clone();
                        self.board.apply(&mv, false);
                        return Ok(true);
                    }
                    println!("that move is not legal here; 'moves' lists your options");
                }
                Err(reason) => println!("{reason}"),
            }
        }
    }
}

/// What the human asked for: source, destination, and an optional victim.
type MoveRequest = (Location, Location, Option<Location>);

fn parse_request(line: &str, color: Player) -> Result<MoveRequest, String> {
    let mut tokens = line.split_whitespace();
    let from = tokens
        .next()
        .ok_or_else(|| "expected a source".to_string())?;
    let to = tokens
        .next()
        .ok_or_else(|| "expected a destination cell".to_string())?;
    let victim = tokens.next();
    if tokens.next().is_some() {
        return Err("expected at most '<from> <to> [victim]'".to_string());
    }
    let from = if from == "r" {
        Location::Pile(PileId::reserve(color))
    } else {
        Location::Cell(parse_cell(from)?)
    };
    let to = Location::Cell(parse_cell(to)?);
    let victim = victim.map(parse_cell).transpose()?.map(Location::Cell);
    Ok((from, to, victim))
}

fn parse_cell(token: &str) -> Result<u8, String> {
    match token.parse::<u8>() {
        Ok(cell) if (cell as usize) < CELL_COUNT => Ok(cell),
        _ => Err(format!("'{token}' is not a cell index (0-23)")),
    }
}

fn find_move(legal: &[Move], (from, to, victim): MoveRequest) -> Option<&Move> {
    legal
        .iter()
        .find(|mv| mv.source() == from && mv.destination() == to && mv.victim() == victim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_parse_placements_relocations_and_captures() {
        assert_eq!(
            parse_request("r 4", Player::White),
            Ok((
                Location::Pile(PileId::WhiteReserve),
                Location::Cell(4),
                None
            ))
        );
        assert_eq!(
            parse_request("4 1 5", Player::Black),
            Ok((
                Location::Cell(4),
                Location::Cell(1),
                Some(Location::Cell(5))
            ))
        );
    }

    #[test]
    fn malformed_requests_are_rejected() {
        assert!(parse_request("4", Player::White).is_err());
        assert!(parse_request("24 1", Player::White).is_err());
        assert!(parse_request("4 x", Player::White).is_err());
        assert!(parse_request("4 1 5 6", Player::White).is_err());
    }

    #[test]
    fn requests_resolve_against_the_legal_move_list() {
        let board = Board::new();
        let legal = board.possible_moves(Player::White).unwrap();
        let request = parse_request("r 13", Player::White).unwrap();
        let mv = find_move(&legal, request).expect("placement on 13 is legal");
        assert_eq!(mv.destination(), Location::Cell(13));
        let request = parse_request("0 1", Player::White).unwrap();
        assert!(find_move(&legal, request).is_none());
    }
}
