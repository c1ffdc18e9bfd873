use rand::rngs::SmallRng;
use rand::SeedableRng;
use treasure_battleship::{
    Board, BoardError, BoardView, Coordinate, Difficulty, MatchConfig, MatchController, MatchError,
    MatchState, Opponent, Orientation, Outcome, Side, FLEET, GRID_HEIGHT, GRID_WIDTH,
};

fn easy_match(seed: u64, player: Board, computer: Board) -> MatchController {
    let config = MatchConfig {
        difficulty: Difficulty::Easy,
        seed: Some(seed),
        ..MatchConfig::default()
    };
    MatchController::with_parts(
        config,
        SmallRng::seed_from_u64(seed),
        player,
        computer,
        Opponent::for_difficulty(Difficulty::Easy, GRID_WIDTH, GRID_HEIGHT),
    )
    .unwrap()
}

fn easy_match_result(seed: u64, computer: Board) -> Result<MatchController, MatchError> {
    MatchController::with_parts(
        MatchConfig {
            difficulty: Difficulty::Easy,
            seed: Some(seed),
            ..MatchConfig::default()
        },
        SmallRng::seed_from_u64(seed),
        Board::new(),
        computer,
        Opponent::for_difficulty(Difficulty::Easy, GRID_WIDTH, GRID_HEIGHT),
    )
}

/// One vessel per row, rows 1-5, flush left.
fn place_fleet(game: &mut MatchController) {
    for row in 1..=FLEET.len() {
        assert!(game.attempt_placement(Coordinate::new(1, row)));
    }
    assert_eq!(game.state(), MatchState::FiringShots);
}

fn open_water(board: &Board) -> Vec<Coordinate> {
    board
        .playable_cells()
        .into_iter()
        .filter(|&c| {
            let m = board.marker_at(c).unwrap();
            !m.is_ship() && !m.is_treasure() && !m.is_hit()
        })
        .collect()
}

#[test]
fn test_new_match_starts_placing() {
    let mut game = MatchController::new(MatchConfig {
        seed: Some(1),
        ..MatchConfig::default()
    })
    .unwrap();
    assert_eq!(game.state(), MatchState::PlacingShips);
    assert_eq!(game.placing_vessel().unwrap().length(), 5);
    assert_eq!(game.placing_vessel().unwrap().orientation(), Orientation::Horizontal);
    assert_eq!(game.computer_board().vessels().len(), FLEET.len());
    assert_eq!(game.computer_board().treasures().len(), 3);
    assert!(game.player_board().treasures().is_empty());
    assert!(game.player_board().reveals_ships());

    // firing is not allowed yet
    assert_eq!(game.attempt_attack(Coordinate::new(3, 3)), Ok(false));
    assert_eq!(game.computer_board().attacked_count(), 0);
}

#[test]
fn test_placement_sequence() {
    let mut game = easy_match(2, Board::new(), Board::new());

    assert!(!game.attempt_placement(Coordinate::new(0, 4)));
    assert!(game.attempt_placement(Coordinate::new(1, 1)));
    assert_eq!(game.placing_index(), 1);
    assert_eq!(game.placing_vessel().unwrap().length(), 4);

    // collides with the carrier
    assert!(!game.attempt_placement(Coordinate::new(2, 1)));
    assert_eq!(game.placing_index(), 1);

    assert!(game.toggle_current_vessel_orientation());
    assert!(game.attempt_placement(Coordinate::new(1, 2)));
    let battleship = game.player_board().vessels()[1];
    assert_eq!(battleship.orientation(), Orientation::Vertical);
    assert_eq!(battleship.anchor(), Coordinate::new(1, 2));

    // next vessel starts horizontal again
    assert_eq!(game.placing_vessel().unwrap().orientation(), Orientation::Horizontal);
    assert!(game.attempt_placement(Coordinate::new(3, 3)));
    assert!(game.attempt_placement(Coordinate::new(3, 5)));
    assert_eq!(game.state(), MatchState::PlacingShips);
    assert!(game.attempt_placement(Coordinate::new(3, 7)));

    assert_eq!(game.state(), MatchState::FiringShots);
    assert!(game.placing_vessel().is_none());
    assert!(game.placing_footprint().is_empty());
    assert!(!game.toggle_current_vessel_orientation());
    assert!(!game.attempt_placement(Coordinate::new(5, 9)));
    assert_eq!(game.player_board().vessels().len(), FLEET.len());
}

#[test]
fn test_placement_is_pulled_inside_grid() {
    let mut game = easy_match(3, Board::new(), Board::new());
    game.move_placing_vessel(Coordinate::new(10, 4));
    assert_eq!(game.placing_vessel().unwrap().anchor(), Coordinate::new(6, 4));
    assert!(game.placement_is_valid());
    assert_eq!(
        game.placing_footprint(),
        (6..=10).map(|x| Coordinate::new(x, 4)).collect::<Vec<_>>()
    );

    assert!(game.attempt_placement(Coordinate::new(10, 1)));
    assert_eq!(game.player_board().vessels()[0].anchor(), Coordinate::new(6, 1));
}

#[test]
fn test_invalid_attacks_are_ignored() {
    let mut game = easy_match(4, Board::new(), Board::new());
    place_fleet(&mut game);

    assert_eq!(game.attempt_attack(Coordinate::new(0, 3)), Ok(false));
    assert_eq!(game.attempt_attack(Coordinate::new(4, 0)), Ok(false));
    assert_eq!(game.attempt_attack(Coordinate::new(11, 4)), Ok(false));
    assert_eq!(game.shots(Side::Player), 0);
    assert_eq!(game.shots(Side::Computer), 0);

    let target = open_water(game.computer_board())[0];
    assert_eq!(game.attempt_attack(target), Ok(true));
    assert_eq!(game.shots(Side::Player), 1);
    assert_eq!(game.shots(Side::Computer), 1);
    assert_eq!(game.last_event(Side::Player).unwrap().outcome, Outcome::Miss);

    assert_eq!(game.attempt_attack(target), Ok(false));
    assert_eq!(game.shots(Side::Player), 1);
    assert_eq!(game.shots(Side::Computer), 1);
    assert_eq!(game.player_board().attacked_count(), 1);
}

#[test]
fn test_repeat_hit_is_not_counted_twice() {
    let mut game = easy_match(5, Board::new(), Board::new());
    place_fleet(&mut game);

    let vessel = game.computer_board().vessels()[0];
    let target = vessel.anchor();
    assert_eq!(game.attempt_attack(target), Ok(true));
    assert_eq!(game.last_event(Side::Player).unwrap().outcome, Outcome::Hit);
    assert_eq!(game.hits(Side::Player), 1);
    assert_eq!(game.computer_board().vessels()[0].destroyed_segments(), 1);

    assert_eq!(game.attempt_attack(target), Ok(false));
    assert_eq!(game.hits(Side::Player), 1);
    assert_eq!(game.computer_board().vessels()[0].destroyed_segments(), 1);
}

#[test]
fn test_treasure_skips_one_computer_turn() {
    let treasure = Coordinate::new(10, 10);
    let mut computer = Board::new();
    computer.place_treasure(treasure).unwrap();
    let mut game = easy_match(6, Board::new(), computer);
    place_fleet(&mut game);

    assert_eq!(game.attempt_attack(treasure), Ok(true));
    assert_eq!(
        game.last_event(Side::Player).unwrap().outcome,
        Outcome::TreasureFound
    );
    assert_eq!(game.shots(Side::Computer), 0);
    assert_eq!(game.hits(Side::Player), 1);
    assert!(!game.has_extra_turn(Side::Player));
    assert!(game.computer_board().treasures()[0].opened);

    // flag consumed: the computer answers the next shot
    let target = open_water(game.computer_board())[0];
    assert_eq!(game.attempt_attack(target), Ok(true));
    assert_eq!(game.shots(Side::Computer), 1);
}

#[test]
fn test_player_win_freezes_match() {
    let mut game = easy_match(7, Board::new(), Board::new());
    place_fleet(&mut game);

    let targets: Vec<Coordinate> = game
        .computer_board()
        .vessels()
        .iter()
        .flat_map(|v| v.occupied_cells())
        .collect();
    for &at in &targets {
        assert_eq!(game.attempt_attack(at), Ok(true));
    }

    assert_eq!(game.state(), MatchState::GameOver);
    assert_eq!(game.winner(), Some(Side::Player));
    assert!(game.computer_board().is_all_destroyed());
    assert_eq!(
        game.last_event(Side::Player).unwrap().outcome,
        Outcome::PlayerWon
    );
    // no computer reply to the winning shot
    assert_eq!(game.shots(Side::Computer), targets.len() - 1);
    assert!(game
        .events()
        .iter()
        .any(|e| matches!(e.outcome, Outcome::Sunk("Carrier"))));

    let player_attacked = game.player_board().attacked_count();
    let computer_attacked = game.computer_board().attacked_count();
    for at in open_water(game.computer_board()).into_iter().take(5) {
        assert_eq!(game.attempt_attack(at), Ok(false));
    }
    assert!(!game.attempt_placement(Coordinate::new(1, 8)));
    assert_eq!(game.player_board().attacked_count(), player_attacked);
    assert_eq!(game.computer_board().attacked_count(), computer_attacked);

    game.restart().unwrap();
    assert_eq!(game.state(), MatchState::PlacingShips);
    assert_eq!(game.winner(), None);
    assert_eq!(game.shots(Side::Player), 0);
    assert_eq!(game.computer_board().attacked_count(), 0);
    assert!(game.events().is_empty());
}

/// Treasures everywhere below the fleet, so most computer shots chain.
fn treasure_field() -> Board {
    let mut board = Board::new();
    for y in 6..GRID_HEIGHT {
        for x in 1..GRID_WIDTH {
            board.place_treasure(Coordinate::new(x, y)).unwrap();
        }
    }
    board
}

#[test]
fn test_computer_treasure_chains_extra_shots() {
    let mut game = easy_match(8, treasure_field(), Board::new());
    place_fleet(&mut game);

    let mut water = open_water(game.computer_board()).into_iter();
    while game.state() == MatchState::FiringShots {
        let before = game.events().len();
        assert_eq!(game.attempt_attack(water.next().unwrap()), Ok(true));
        let replies: Vec<_> = game.events()[before + 1..]
            .iter()
            .filter(|e| e.side == Side::Computer && e.at.is_some())
            .collect();
        assert!(!replies.is_empty());
        let (last, chained) = replies.split_last().unwrap();
        assert!(chained.iter().all(|e| e.outcome == Outcome::TreasureFound));
        if game.state() == MatchState::FiringShots {
            assert_ne!(last.outcome, Outcome::TreasureFound);
        }
        assert!(!game.has_extra_turn(Side::Computer));
    }

    assert_eq!(game.winner(), Some(Side::Computer));
    assert_eq!(
        game.last_event(Side::Computer).unwrap().outcome,
        Outcome::AiWon
    );
    assert!(game.player_board().is_all_destroyed());
    // treasures only open for the player
    assert!(game.player_board().treasures().iter().all(|t| !t.opened));
}

#[test]
fn test_debug_reveal_and_restart() {
    let mut game = easy_match(9, Board::new(), Board::new());
    assert!(!game.debug_reveal());
    assert!(!game.computer_board().reveals_ships());
    game.toggle_debug_reveal();
    assert!(game.debug_reveal());
    assert!(game.computer_board().reveals_ships());
    place_fleet(&mut game);
    game.toggle_debug_reveal();
    assert!(!game.debug_reveal());
    assert!(!game.computer_board().reveals_ships());
    game.toggle_debug_reveal();

    let target = open_water(game.computer_board())[0];
    game.attempt_attack(target).unwrap();
    assert_eq!(game.drain_events().len(), 2);
    assert!(game.events().is_empty());

    game.restart().unwrap();
    assert!(!game.debug_reveal());
    assert!(!game.computer_board().reveals_ships());
    assert_eq!(game.state(), MatchState::PlacingShips);
    assert!(game.player_board().vessels().is_empty());
    assert_eq!(game.player_board().attacked_count(), 0);
    assert_eq!(game.computer_board().vessels().len(), FLEET.len());
    assert_eq!(game.placing_index(), 0);
}

/// Room for the fleet only in row 1 and the left of row 2; everything else
/// is treasure, so random placement often runs out of attempts.
fn crowded_board() -> Board {
    let mut board = Board::new();
    for at in board.playable_cells() {
        let free = at.y == 1 || (at.y == 2 && at.x <= 7);
        if !free {
            board.place_treasure(at).unwrap();
        }
    }
    board
}

#[test]
fn test_failed_restart_keeps_current_match() {
    let mut failures = 0;
    for seed in 0..40 {
        let Ok(mut game) = easy_match_result(seed, crowded_board()) else {
            continue;
        };
        place_fleet(&mut game);
        let target = game.computer_board().vessels()[0].anchor();
        assert_eq!(game.attempt_attack(target), Ok(true));

        for _ in 0..20 {
            let vessels: Vec<_> = game.computer_board().vessels().to_vec();
            let shots = game.shots(Side::Player);
            match game.restart() {
                Ok(()) => {
                    assert_eq!(game.state(), MatchState::PlacingShips);
                    place_fleet(&mut game);
                }
                Err(err) => {
                    failures += 1;
                    assert!(matches!(
                        err,
                        MatchError::Board(BoardError::PlacementExhausted { .. })
                    ));
                    assert_eq!(game.state(), MatchState::FiringShots);
                    assert_eq!(game.player_board().vessels().len(), FLEET.len());
                    assert_eq!(game.computer_board().vessels(), &vessels[..]);
                    assert_eq!(game.shots(Side::Player), shots);
                }
            }
        }

        // the surviving match plays on normally
        let next = game
            .computer_board()
            .playable_cells()
            .into_iter()
            .find(|&c| !game.computer_board().is_attacked(c))
            .unwrap();
        assert_eq!(game.attempt_attack(next), Ok(true));
        assert_ne!(game.winner(), Some(Side::Computer));
    }
    assert!(failures > 0);
}
