mod game;

use clap::{Parser, ValueEnum};
use morris_core::player::Player;

#[derive(Parser, Debug)]
#[command(about = "Play Nine Men's Morris against the search engine")]
struct Cli {
    /// Search depth of the engine, in plies
    #[arg(long, default_value = "4")]
    depth: u32,

    /// The color played by the human
    #[arg(long, value_enum, default_value_t = Side::Black)]
    color: Side,

    /// Let the engine play both sides
    #[arg(long)]
    auto: bool,

    /// Recalibrate the search depth between engine turns
    #[arg(long)]
    adaptive: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Player {
    fn from(side: Side) -> Player {
        match side {
            Side::White => Player::White,
            Side::Black => Player::Black,
        }
    }
}

fn main() {
    env_logger::init();

    let args = Cli::parse();
    let human = if args.auto {
        None
    } else {
        Some(args.color.into())
    };
    let mut session = game::GameSession::new(human, args.depth, args.adaptive);
    if let Err(err) = session.run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
