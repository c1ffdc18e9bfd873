#![cfg(feature = "std")]

//! Text rendering of boards and status lines, plus coordinate parsing for
//! the terminal front end.

use std::fmt::Write;

use crate::{
    Board, BoardView, Coordinate, MatchController, MatchEvent, MatchState, Outcome, Side, FLEET,
};

/// Parse a cell name such as `A1` or `j10` into a board coordinate.
pub fn parse_coord(input: &str) -> Result<Coordinate, String> {
    let input = input.trim();
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("No column letter")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let x = (col_ch as u8 - b'A') as usize + 1;
    let row_str: String = chars.collect();
    let y: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if y == 0 {
        return Err("Row cannot be 0 - must be 1-10".to_string());
    }
    Ok(Coordinate::new(x, y))
}

/// What a single cell shows.
fn cell_glyph(board: &Board, at: Coordinate, show_ships: bool, show_treasures: bool) -> char {
    let Some(marker) = board.marker_at(at) else {
        return ' ';
    };
    if marker.is_treasure() {
        let opened = board.treasures().iter().any(|t| t.at == at && t.opened);
        return match (marker.is_hit(), opened) {
            (_, true) => '$',
            (true, false) => 'T',
            (false, false) if show_treasures => 't',
            _ => '.',
        };
    }
    let sunk = board.vessel_at(at).is_some_and(|v| v.is_destroyed());
    match (marker.is_hit(), marker.is_ship()) {
        (true, true) if sunk => '#',
        (true, true) => 'X',
        (true, false) => 'o',
        (false, true) if show_ships || sunk => 'S',
        _ => '.',
    }
}

/// Render one board with column letters and row numbers.
///
/// `preview` cells are drawn as `+` (or `!` when `preview_ok` is false).
pub fn render_board(
    board: &Board,
    show_ships: bool,
    show_treasures: bool,
    preview: &[Coordinate],
    preview_ok: bool,
) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for x in 1..board.width() {
        // past Z, fall back to the last digit of the column number
        let label = Coordinate::new(x, 1)
            .column_letter()
            .or_else(|| char::from_digit((x % 10) as u32, 10))
            .unwrap_or('?');
        let _ = write!(out, " {}", label);
    }
    out.push('\n');
    for y in 1..board.height() {
        let _ = write!(out, "  {:2}", y);
        for x in 1..board.width() {
            let at = Coordinate::new(x, y);
            let ch = if preview.contains(&at) {
                if preview_ok {
                    '+'
                } else {
                    '!'
                }
            } else {
                cell_glyph(board, at, show_ships, show_treasures)
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

/// Status line text for an event.
pub fn describe_event(event: &MatchEvent) -> String {
    let who = match event.side {
        Side::Player => "YOU",
        Side::Computer => "ENEMY",
    };
    let at = event.at.map(|c| format!(" at {}", c)).unwrap_or_default();
    match event.outcome {
        Outcome::Hit => format!("{}{} HIT!", who, at),
        Outcome::Miss => format!("{}{} MISSED!", who, at),
        Outcome::Sunk(name) => match event.side {
            Side::Player => format!("{}{} HIT! ENEMY'S {} HAS SUNK!", who, at, name.to_uppercase()),
            Side::Computer => format!("{}{} HIT! YOUR {} HAS SUNK!", who, at, name.to_uppercase()),
        },
        Outcome::TreasureFound => match event.side {
            Side::Player => format!("TREASURE FOUND{}! YOU HAVE 1 MORE MOVE!", at),
            Side::Computer => format!("ENEMY FOUND TREASURE{}! IT FIRES AGAIN!", at),
        },
        Outcome::PlayerWon => "YOU WIN! ALL ENEMY SHIPS DESTROYED.".to_string(),
        Outcome::AiWon => "YOU LOSE! YOUR FLEET IS DESTROYED.".to_string(),
    }
}

/// Both boards plus the status lines for the current match.
pub fn render_match(game: &MatchController) -> String {
    let mut out = String::new();
    let reveal = game.debug_reveal();

    out.push_str("Enemy waters:\n");
    out.push_str(&render_board(
        game.computer_board(),
        game.computer_board().reveals_ships(),
        reveal,
        &[],
        true,
    ));

    out.push_str("\nYour fleet:\n");
    let preview = game.placing_footprint();
    out.push_str(&render_board(
        game.player_board(),
        game.player_board().reveals_ships(),
        true,
        &preview,
        game.placement_is_valid(),
    ));

    let _ = writeln!(
        out,
        "\nHits - you: {}  enemy: {}",
        game.hits(Side::Player),
        game.hits(Side::Computer)
    );
    match game.state() {
        MatchState::PlacingShips => {
            if let Some(&class) = FLEET.get(game.placing_index()) {
                let _ = writeln!(
                    out,
                    "Place your {} (length {}), {}/{}",
                    class.name(),
                    class.length(),
                    game.placing_index() + 1,
                    FLEET.len()
                );
            }
        }
        MatchState::FiringShots | MatchState::GameOver => {
            for side in [Side::Player, Side::Computer] {
                if let Some(event) = game.last_event(side) {
                    let _ = writeln!(out, "{}", describe_event(&event));
                }
            }
        }
    }
    out
}
