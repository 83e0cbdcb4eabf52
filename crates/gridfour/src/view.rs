//! Renders session state into [`ViewContent`] payloads.
//!
//! The body text uses platform emoji shortcodes (`:yellow_square:` and
//! friends); how those are displayed is the presentation boundary's
//! concern. Seat 0 always renders yellow and seat 1 red, matching the
//! seat-to-color mapping in the session crate.

use gridfour_protocol::{ChannelKind, ViewContent};
use gridfour_session::{GameSession, RoundEnd};

use crate::gateway::MatchStats;

const TITLE: &str = "Find Four";

const SEAT_SQUARES: [&str; 2] = [":yellow_square:", ":red_square:"];

const COLUMN_HEADER: &str =
    ":one: :two: :three: :four: :five: :six: :seven:";

/// Shown when an establish command arrives for an occupied channel.
pub(crate) const ALREADY_ESTABLISHED: &str = "A Find Four session is already \
    running in this channel.\nReact on its menu to take a seat, or finish \
    the current game first.";

/// Shown once a session has been torn down.
pub(crate) const DISBANDED: &str =
    "The Find Four session is over. Type `/findfour` to play again.";

/// The setup surface: roster plus a legend of the offered reactions.
pub fn menu_view(session: &GameSession) -> ViewContent {
    let mut body = String::from("**------ Players ------**\n");
    for seat in 0..2 {
        let name = session
            .players()
            .get(seat)
            .map(|p| p.name.as_str())
            .unwrap_or("*open seat*");
        let mover = if seat == 0 { "First mover " } else { "Second mover" };
        body.push_str(&format!("{mover} : {} {name}\n", SEAT_SQUARES[seat]));
    }
    body.push_str("\n:arrow_forward: : start the game\n");
    body.push_str(":left_right_arrow: : swap first and second mover\n");
    match session.kind() {
        ChannelKind::Group => {
            body.push_str(":raising_hand: : take a seat\n");
            body.push_str(":wave: : give up your seat\n");
        }
        ChannelKind::Direct => {
            body.push_str(":wave: : quit the game\n");
        }
    }
    ViewContent::new(TITLE, body)
}

/// The board surface: turn markers, the grid, and the round result once
/// there is one.
pub fn board_view(session: &GameSession, result: Option<RoundEnd>) -> ViewContent {
    let mut body = String::new();
    for seat in 0..2 {
        let name = session
            .players()
            .get(seat)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        // The marker points at the seat to move; once the round is over,
        // no seat is to move.
        let marker = if result.is_none() && session.active_seat() == seat {
            ":arrow_forward:"
        } else {
            ":black_large_square:"
        };
        body.push_str(&format!("{marker} {} **{name}**\n", SEAT_SQUARES[seat]));
    }
    body.push('\n');
    body.push_str(COLUMN_HEADER);
    body.push('\n');
    let board = session.board();
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            if col > 0 {
                body.push(' ');
            }
            body.push_str(match board.cell(row, col) {
                Some(gridfour_board::Piece::A) => SEAT_SQUARES[0],
                Some(gridfour_board::Piece::B) => SEAT_SQUARES[1],
                None => ":white_square_button:",
            });
        }
        body.push('\n');
    }
    if let Some(end) = result {
        body.push('\n');
        match end.winner {
            Some(seat) => {
                let name = session
                    .players()
                    .get(seat as usize)
                    .map(|p| p.name.as_str())
                    .unwrap_or("?");
                body.push_str(&format!(":trophy: **{name} wins the round!**\n"));
            }
            None => body.push_str(":handshake: **The round is a draw.**\n"),
        }
        body.push_str("\n:repeat: : play another round\n");
        body.push_str(":wrench: : back to the menu\n");
    }
    ViewContent::new(TITLE, body)
}

/// Aggregate statistics as a plain notice text.
///
/// The AI win rate reads `---` while no AI-seated match has finished,
/// rather than a fake 0 %.
pub fn statistics_text(stats: &MatchStats) -> String {
    let rate = match stats.ai_win_rate() {
        Some(rate) => format!("{rate:.1} %"),
        None => "---".to_string(),
    };
    format!(
        "**Find Four statistics**\n\
         Matches played: {}\n\
         vs humans: {}\n\
         vs AI: {} (AI win rate: {rate})",
        stats.total,
        stats.human_matches(),
        stats.vs_ai,
    )
}
