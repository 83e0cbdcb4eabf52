//! The game session state machine.

use std::fmt;

use gridfour_board::{Board, Outcome, Piece};
use gridfour_protocol::{ChannelId, ChannelKind, SurfaceId, UserId};
use serde::{Deserialize, Serialize};

use crate::SessionError;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The coarse-grained lifecycle stage of a session.
///
/// ```text
///            start            win / draw
/// Setup ───────────→ Playing ───────────→ Finished
///   ↑                   ↑                    │
///   │                   └──── rematch ───────┤
///   └───────────── back to setup ────────────┘
/// ```
///
/// - **Setup**: roster is forming; join/leave/switch-sides/start accepted.
/// - **Playing**: a round is live; only column placements accepted.
/// - **Finished**: the round completed; only rematch or back-to-setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Playing,
    Finished,
}

impl Phase {
    pub fn is_setup(&self) -> bool {
        matches!(self, Self::Setup)
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "Setup"),
            Self::Playing => write!(f, "Playing"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A seated participant: platform identity plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: UserId,
    pub name: String,
    /// True for the solver-backed opponent.
    pub is_bot: bool,
}

impl Player {
    pub fn human(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_bot: false,
        }
    }

    pub fn bot(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_bot: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Operation outcomes
// ---------------------------------------------------------------------------

/// What a successful leave left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// At least one player remains seated.
    Remaining,
    /// The roster is empty; the caller should destroy the session.
    Empty,
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundEnd {
    /// Winning seat (0 = first-mover, 1 = second-mover), `None` for a draw.
    pub winner: Option<u8>,
}

/// Result of a placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placed {
    /// Piece landed; the round continues and the turn has flipped.
    Continue,
    /// The column is full. Nothing changed, the turn did not flip.
    ColumnFull,
    /// Piece landed and completed the round; phase is now `Finished`.
    RoundOver(RoundEnd),
}

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// The live state of one game bound to one channel.
///
/// Seat 0 is the first-mover and always plays [`Piece::A`]; seat 1 plays
/// [`Piece::B`]. Switching sides reorders the roster, never the mapping
/// from seat to color, which is why turn ownership is checked by identity
/// rather than array position.
#[derive(Debug, Clone)]
pub struct GameSession {
    channel: ChannelId,
    kind: ChannelKind,
    players: Vec<Player>,
    board: Board,
    turn: Piece,
    history: String,
    vs_ai: bool,
    phase: Phase,
    menu_surface: Option<SurfaceId>,
    board_surface: Option<SurfaceId>,
}

impl GameSession {
    /// Creates a session in `Setup` with the establishing user seated
    /// first.
    pub fn new(channel: ChannelId, kind: ChannelKind, first: Player) -> Self {
        let vs_ai = first.is_bot;
        Self {
            channel,
            kind,
            players: vec![first],
            board: Board::default(),
            turn: Piece::A,
            history: String::new(),
            vs_ai,
            phase: Phase::Setup,
            menu_surface: None,
            board_surface: None,
        }
    }

    // -- accessors ----------------------------------------------------------

    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &str {
        &self.history
    }

    pub fn vs_ai(&self) -> bool {
        self.vs_ai
    }

    pub fn is_member(&self, user: UserId) -> bool {
        self.players.iter().any(|p| p.id == user)
    }

    /// The seat a user occupies, if any.
    pub fn seat_of(&self, user: UserId) -> Option<usize> {
        self.players.iter().position(|p| p.id == user)
    }

    /// The seat whose color moves next (0 or 1).
    pub fn active_seat(&self) -> usize {
        match self.turn {
            Piece::A => 0,
            Piece::B => 1,
        }
    }

    /// The player whose turn it is, if that seat is occupied.
    pub fn turn_holder(&self) -> Option<&Player> {
        self.players.get(self.active_seat())
    }

    pub fn menu_surface(&self) -> Option<SurfaceId> {
        self.menu_surface
    }

    pub fn set_menu_surface(&mut self, surface: Option<SurfaceId>) {
        self.menu_surface = surface;
    }

    pub fn board_surface(&self) -> Option<SurfaceId> {
        self.board_surface
    }

    pub fn set_board_surface(&mut self, surface: Option<SurfaceId>) {
        self.board_surface = surface;
    }

    // -- setup-phase operations ---------------------------------------------

    /// Seats a player.
    ///
    /// Rejected once the roster is full, once the joiner is already
    /// seated, or outside `Setup`.
    pub fn join(&mut self, player: Player) -> Result<(), SessionError> {
        self.require_phase(Phase::Setup)?;
        if self.players.len() >= 2 {
            return Err(SessionError::RosterFull(self.channel));
        }
        if self.is_member(player.id) {
            return Err(SessionError::AlreadySeated(player.id));
        }
        if player.is_bot {
            self.vs_ai = true;
        }
        tracing::info!(
            channel = %self.channel,
            user = %player.id,
            seat = self.players.len(),
            "player seated"
        );
        self.players.push(player);
        Ok(())
    }

    /// Removes a seated player. Only valid during `Setup`.
    ///
    /// The survivor (if any) shifts into the first-mover seat.
    pub fn leave(&mut self, user: UserId) -> Result<LeaveOutcome, SessionError> {
        self.require_phase(Phase::Setup)?;
        let seat = self
            .seat_of(user)
            .ok_or(SessionError::NotSeated(user))?;
        self.players.remove(seat);
        tracing::info!(
            channel = %self.channel,
            user = %user,
            remaining = self.players.len(),
            "player left"
        );
        if self.players.is_empty() {
            Ok(LeaveOutcome::Empty)
        } else {
            Ok(LeaveOutcome::Remaining)
        }
    }

    /// Swaps first- and second-mover. Requires exactly two players.
    pub fn switch_sides(&mut self) -> Result<(), SessionError> {
        self.require_phase(Phase::Setup)?;
        if self.players.len() != 2 {
            return Err(SessionError::RosterIncomplete);
        }
        self.players.swap(0, 1);
        Ok(())
    }

    /// Begins a round: clears board and history, first-mover to act.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.require_phase(Phase::Setup)?;
        if self.players.len() != 2 {
            return Err(SessionError::RosterIncomplete);
        }
        self.begin_round();
        tracing::info!(channel = %self.channel, vs_ai = self.vs_ai, "round started");
        Ok(())
    }

    // -- playing-phase operations -------------------------------------------

    /// Drops the active seat's piece into `col`.
    ///
    /// A full column is reported as [`Placed::ColumnFull`] with no state
    /// change and no turn flip; the event source relies on this being a
    /// cheap no-op. A completed round transitions the session to
    /// `Finished`.
    pub fn place(&mut self, col: usize) -> Result<Placed, SessionError> {
        self.require_phase(Phase::Playing)?;
        if col >= self.board.cols() {
            return Err(SessionError::IllegalColumn(col));
        }
        if !self.board.place(self.turn, col) {
            return Ok(Placed::ColumnFull);
        }
        // Solver position encoding: 1-indexed column digits in play order.
        self.history.push_str(&(col + 1).to_string());

        match self.board.evaluate() {
            Outcome::None => {
                self.turn = self.turn.opponent();
                Ok(Placed::Continue)
            }
            Outcome::Win(piece) => {
                self.phase = Phase::Finished;
                let winner = match piece {
                    Piece::A => 0,
                    Piece::B => 1,
                };
                tracing::info!(
                    channel = %self.channel,
                    winner,
                    history = %self.history,
                    "round won"
                );
                Ok(Placed::RoundOver(RoundEnd {
                    winner: Some(winner),
                }))
            }
            Outcome::Draw => {
                self.phase = Phase::Finished;
                tracing::info!(
                    channel = %self.channel,
                    history = %self.history,
                    "round drawn"
                );
                Ok(Placed::RoundOver(RoundEnd { winner: None }))
            }
        }
    }

    // -- finished-phase operations ------------------------------------------

    /// Starts another round with the same roster and first-mover.
    pub fn rematch(&mut self) -> Result<(), SessionError> {
        self.require_phase(Phase::Finished)?;
        self.begin_round();
        tracing::info!(channel = %self.channel, "rematch started");
        Ok(())
    }

    /// Returns to `Setup`, clearing the finished round.
    pub fn back_to_setup(&mut self) -> Result<(), SessionError> {
        self.require_phase(Phase::Finished)?;
        self.board.reset();
        self.history.clear();
        self.turn = Piece::A;
        self.phase = Phase::Setup;
        Ok(())
    }

    // -- internals ----------------------------------------------------------

    fn begin_round(&mut self) {
        self.board.reset();
        self.history.clear();
        self.turn = Piece::A;
        self.phase = Phase::Playing;
    }

    fn require_phase(&self, expected: Phase) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }
}
