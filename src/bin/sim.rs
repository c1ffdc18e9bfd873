use anyhow::{anyhow, bail};
use clap::Parser;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde_json::json;
use treasure_battleship::{
    Coordinate, Difficulty, MatchConfig, MatchController, MatchState, Opponent, Side, Strategy,
    GRID_HEIGHT, GRID_WIDTH,
};

/// Play one match headless, with an autopilot in the human seat.
#[derive(Parser)]
struct Args {
    /// Seed for the match itself.
    seed: u64,
    /// Seed for the autopilot.
    autopilot_seed: u64,
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,
    #[arg(long, value_enum, default_value_t = Difficulty::Easy)]
    autopilot: Difficulty,
}

const MAX_INPUTS: usize = 100_000;

fn main() -> anyhow::Result<()> {
    treasure_battleship::init_logging();
    let args = Args::parse();

    let mut game = MatchController::new(MatchConfig {
        difficulty: args.difficulty,
        seed: Some(args.seed),
        ..MatchConfig::default()
    })?;
    let mut rng = SmallRng::seed_from_u64(args.autopilot_seed);
    let mut pilot = Opponent::for_difficulty(args.autopilot, GRID_WIDTH, GRID_HEIGHT);

    let mut inputs = 0;
    while game.state() != MatchState::GameOver {
        inputs += 1;
        if inputs > MAX_INPUTS {
            bail!("match did not finish after {} inputs", MAX_INPUTS);
        }
        match game.state() {
            MatchState::PlacingShips => {
                if rng.random_bool(0.5) {
                    game.toggle_current_vessel_orientation();
                }
                let at = Coordinate::new(
                    rng.random_range(1..GRID_WIDTH),
                    rng.random_range(1..GRID_HEIGHT),
                );
                game.attempt_placement(at);
            }
            MatchState::FiringShots => {
                let at = pilot.select_move(game.computer_board(), &mut rng)?;
                if !game.attempt_attack(at)? {
                    return Err(anyhow!("autopilot shot at {} was rejected", at));
                }
            }
            MatchState::GameOver => {}
        }
    }

    let winner = match game.winner() {
        Some(Side::Player) => "player",
        Some(Side::Computer) => "computer",
        None => "none",
    };
    let result = json!({
        "winner": winner,
        "difficulty": args.difficulty,
        "player": {"shots": game.shots(Side::Player), "hits": game.hits(Side::Player)},
        "computer": {"shots": game.shots(Side::Computer), "hits": game.hits(Side::Computer)},
        "events": game.events().len(),
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
