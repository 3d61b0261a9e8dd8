extern crate clap;
use clap::{Parser, Subcommand};

use gobang::selfplay::{self, SelfPlayRunner};
use gobang::{Game, Point, RuleError, RuleSet, Side};

static ABOUT_TEXT: &str = "Gobang rule engine ";

static SELF_PLAY_HELP_TEXT: &str = "
Play engine-vs-engine matches and optionally export the records as JSON
";

static PLAY_HELP_TEXT: &str = "
Play against the engine in the terminal. Enter moves as `x y` (1-indexed),
`undo` to take back the last exchange, or `quit` to leave.
";

/// Gobang
#[derive(Parser, Debug)]
#[clap(author, version, about = ABOUT_TEXT, long_about = Some(ABOUT_TEXT))]
struct Arguments {
    #[clap(subcommand)]
    verb: Option<Verb>,
}

#[derive(Subcommand, Debug)]
enum Verb {
    /// Playing engine-vs-engine matches
    #[clap(after_help=SELF_PLAY_HELP_TEXT)]
    SelfPlay {
        /// Number of matches to play
        #[clap(short, long, default_value_t = 10)]
        games: u32,

        /// Board side length (odd, 7..=19)
        #[clap(short, long, default_value_t = 15)]
        size: i32,

        /// Enable the advanced rule set (forbidden moves for black)
        #[clap(short, long)]
        advanced: bool,

        /// Write match records to this JSON file
        #[clap(short, long)]
        export: Option<String>,
    },

    /// Playing against the engine in the terminal
    #[clap(after_help=PLAY_HELP_TEXT)]
    Play {
        /// Board side length (odd, 7..=19)
        #[clap(short, long, default_value_t = 15)]
        size: i32,

        /// Enable the advanced rule set (forbidden moves for black)
        #[clap(short, long)]
        advanced: bool,

        /// Let the engine play black and move first
        #[clap(short, long)]
        engine_black: bool,
    },
}

fn rule_set(advanced: bool) -> RuleSet {
    if advanced {
        RuleSet::Renju
    } else {
        RuleSet::Freestyle
    }
}

#[tokio::main]
async fn main() {
    let args = Arguments::parse();
    let outcome = match args.verb {
        Some(Verb::SelfPlay {
            games,
            size,
            advanced,
            export,
        }) => run_self_play(games, size, rule_set(advanced), export).await,
        Some(Verb::Play {
            size,
            advanced,
            engine_black,
        }) => run_play(size, rule_set(advanced), engine_black),
        None => {
            println!("Nothing to do. Try --help.");
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run_self_play(
    games: u32,
    size: i32,
    rule_set: RuleSet,
    export: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let runner = SelfPlayRunner::new(games, size, rule_set);
    let records = runner.run().await?;

    let totals = selfplay::tally(&records);
    println!(
        "{} matches: black {} / white {} / draw {}",
        records.len(),
        totals.black_wins,
        totals.white_wins,
        totals.draws
    );

    if let Some(path) = export {
        selfplay::export_records(&records, &path).await?;
        println!("Records written to {}", path);
    }
    Ok(())
}

fn run_play(
    size: i32,
    rule_set: RuleSet,
    engine_black: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut game = Game::new(size, rule_set)?;
    let engine = if engine_black {
        Side::Black
    } else {
        Side::White
    };

    while !game.status().is_over() {
        if game.turn() == engine {
            let (pos, _) = game.engine_move()?;
            println!("Engine plays {}", pos);
            continue;
        }

        println!("{}", game.board());
        match read_command(game.turn())? {
            Command::Quit => return Ok(()),
            Command::Undo => {
                // take back the engine's reply and the human's move
                game.undo()?;
                game.undo()?;
            }
            Command::Move(pos) => match game.place(pos) {
                Ok(_) => {}
                Err(RuleError::ForbiddenMove(pos, kind)) => {
                    println!("{} is forbidden: {}", pos, kind);
                }
                Err(RuleError::OutOfBounds(pos)) => {
                    println!("{} is outside the board", pos);
                }
                Err(e) => println!("{}", e),
            },
        }
    }

    println!("{}", game.board());
    println!("Result: {:?}", game.status());
    if !game.winning_chain().is_empty() {
        let chain: Vec<String> = game
            .winning_chain()
            .iter()
            .map(|pos| pos.to_string())
            .collect();
        println!("Winning chain: {}", chain.join(" "));
    }
    Ok(())
}

enum Command {
    Move(Point),
    Undo,
    Quit,
}

fn read_command(side: Side) -> Result<Command, std::io::Error> {
    loop {
        print!("{:?} to move> ", side);
        use std::io::Write;
        std::io::stdout().flush()?;

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            return Ok(Command::Quit); // EOF
        }
        let line = line.trim();
        match line {
            "quit" | "exit" => return Ok(Command::Quit),
            "undo" => return Ok(Command::Undo),
            _ => {}
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if let [x, y] = fields[..] {
            if let (Ok(x), Ok(y)) = (x.parse(), y.parse()) {
                return Ok(Command::Move(Point::new(x, y)));
            }
        }
        println!("Enter a move as `x y`, or `undo` / `quit`.");
    }
}
