use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use treasure_battleship::{
    init_logging,
    ui::{parse_coord, render_match},
    Difficulty, MatchConfig, MatchController, MatchState, TREASURE_COUNT,
};

#[derive(Parser)]
#[command(author, version, about = "Battleship against the computer, with hidden treasure", long_about = None)]
struct Cli {
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = TREASURE_COUNT, help = "Treasures hidden on the enemy board")]
    treasures: usize,
}

/// One line of user input.
enum Command {
    Cell(String),
    Rotate,
    Debug,
    Restart,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Command {
    match line.trim().to_ascii_lowercase().as_str() {
        "r" | "rotate" => Command::Rotate,
        "d" | "debug" => Command::Debug,
        "s" | "restart" => Command::Restart,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => Command::Cell(other.to_string()),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  A5        place the current ship / fire at a cell (columns A-J, rows 1-10)");
    println!("  r         rotate the ship being placed");
    println!("  d         toggle debug reveal of enemy ships and treasure");
    println!("  s         restart the match");
    println!("  q         quit");
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    if let Some(s) = cli.seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let config = MatchConfig {
        difficulty: cli.difficulty,
        seed: cli.seed,
        computer_treasures: cli.treasures,
        ..MatchConfig::default()
    };
    let mut game = MatchController::new(config).context("failed to set up match")?;
    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        println!("\n{}", render_match(&game));
        let prompt = match game.state() {
            MatchState::PlacingShips => "Place ship (e.g. A1, r to rotate)",
            MatchState::FiringShots => "Fire at",
            MatchState::GameOver => "Game over - s to restart, q to quit",
        };
        print!("{}> ", prompt);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match parse_command(&line?) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Rotate => {
                game.toggle_current_vessel_orientation();
            }
            Command::Debug => game.toggle_debug_reveal(),
            Command::Restart => game.restart()?,
            Command::Cell(text) => {
                let at = match parse_coord(&text) {
                    Ok(at) => at,
                    Err(e) => {
                        println!("✗ {}", e);
                        continue;
                    }
                };
                let accepted = match game.state() {
                    MatchState::PlacingShips => game.attempt_placement(at),
                    MatchState::FiringShots => game.attempt_attack(at)?,
                    MatchState::GameOver => false,
                };
                if !accepted {
                    println!("✗ {} not accepted", at);
                }
            }
        }
    }
    Ok(())
}
