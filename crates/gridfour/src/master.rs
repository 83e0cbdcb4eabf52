//! Session orchestration: the layer that owns the store and drives the
//! outward boundaries.

use std::time::{SystemTime, UNIX_EPOCH};

use gridfour_autodelete::{DeleteQueue, DEFAULT_NOTICE_TTL};
use gridfour_protocol::{
    ChannelId, ChannelKind, ChoiceToken, MatchRecord, MatchWinner, SurfaceId,
    UserId,
};
use gridfour_session::{
    GameSession, LeaveOutcome, Placed, Player, RoundEnd, SessionError,
    SessionStore,
};
use gridfour_solver::{MoveSolver, SolverError};

use crate::error::GridfourError;
use crate::gateway::{MatchStore, MatchStats, Presenter};
use crate::view;

/// Orchestrates every session against the presentation, persistence, and
/// solver boundaries.
///
/// Generic over all three so embedders wire in platform adapters and tests
/// wire in fakes. One master serves all channels; per-channel isolation
/// comes from the [`SessionStore`] keying.
pub struct GameMaster<P, M, V> {
    sessions: SessionStore,
    presenter: P,
    records: M,
    solver: V,
    bot: Player,
    notices: DeleteQueue,
}

impl<P, M, V> GameMaster<P, M, V>
where
    P: Presenter,
    M: MatchStore,
    V: MoveSolver,
{
    /// `bot_user` is the platform identity the solver-backed opponent is
    /// seated under in direct channels.
    pub fn new(presenter: P, records: M, solver: V, bot_user: UserId) -> Self {
        Self {
            sessions: SessionStore::new(),
            presenter,
            records,
            solver,
            bot: Player::bot(bot_user, "AI"),
            notices: DeleteQueue::new(),
        }
    }

    pub fn session(&self, channel: ChannelId) -> Option<&GameSession> {
        self.sessions.get(channel)
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn records(&self) -> &M {
        &self.records
    }

    /// The queue of advisory surfaces awaiting auto-removal. The embedder
    /// parks `expired()` in its event loop and feeds the results to
    /// [`delete_notice`](Self::delete_notice).
    pub fn notices_mut(&mut self) -> &mut DeleteQueue {
        &mut self.notices
    }

    /// Removes an expired advisory surface.
    pub async fn delete_notice(
        &mut self,
        surface: SurfaceId,
    ) -> Result<(), GridfourError> {
        self.presenter.delete_view(surface).await?;
        Ok(())
    }

    // -- commands -----------------------------------------------------------

    /// Establishes a session for `channel` and renders its menu.
    ///
    /// In a direct channel the solver-backed opponent takes the second
    /// seat immediately. If the channel already has a session, a transient
    /// advisory is posted instead and scheduled for auto-removal.
    pub async fn establish(
        &mut self,
        channel: ChannelId,
        kind: ChannelKind,
        actor: Player,
    ) -> Result<(), GridfourError> {
        if self.sessions.contains(channel) {
            tracing::debug!(%channel, "establish refused: session exists");
            let surface = self
                .presenter
                .send_notice(channel, view::ALREADY_ESTABLISHED)
                .await?;
            self.notices.push(surface, DEFAULT_NOTICE_TTL);
            return Ok(());
        }
        let mut session = GameSession::new(channel, kind, actor);
        if kind == ChannelKind::Direct {
            session.join(self.bot.clone())?;
        }
        self.sessions.create(session)?;
        self.render_menu(channel).await
    }

    /// Tears down the channel's session, if any, and says goodbye.
    pub async fn break_session(
        &mut self,
        channel: ChannelId,
    ) -> Result<(), GridfourError> {
        if !self.sessions.contains(channel) {
            tracing::debug!(%channel, "break ignored: no session");
            return Ok(());
        }
        self.destroy(channel).await
    }

    /// Posts aggregate statistics over the full record history.
    pub async fn show_statistics(
        &mut self,
        channel: ChannelId,
    ) -> Result<(), GridfourError> {
        let records = self.records.load_all().await?;
        let stats = MatchStats::from_records(&records, self.bot.id);
        let text = view::statistics_text(&stats);
        self.presenter.send_notice(channel, &text).await?;
        Ok(())
    }

    // -- setup-surface choices ----------------------------------------------

    pub async fn join(
        &mut self,
        channel: ChannelId,
        actor: Player,
    ) -> Result<(), GridfourError> {
        self.require_session_mut(channel)?.join(actor)?;
        self.render_menu(channel).await
    }

    /// A leave that empties the roster, or any leave in a direct channel,
    /// tears the session down.
    pub async fn leave(
        &mut self,
        channel: ChannelId,
        actor: UserId,
    ) -> Result<(), GridfourError> {
        let (outcome, kind) = {
            let session = self.require_session_mut(channel)?;
            (session.leave(actor)?, session.kind())
        };
        if outcome == LeaveOutcome::Empty || kind == ChannelKind::Direct {
            self.destroy(channel).await
        } else {
            self.render_menu(channel).await
        }
    }

    pub async fn switch_sides(
        &mut self,
        channel: ChannelId,
    ) -> Result<(), GridfourError> {
        self.require_session_mut(channel)?.switch_sides()?;
        self.render_menu(channel).await
    }

    /// Starts the round and renders the board. When the solver-backed
    /// opponent holds the first-mover seat, it opens immediately.
    pub async fn start(&mut self, channel: ChannelId) -> Result<(), GridfourError> {
        self.require_session_mut(channel)?.start()?;
        self.render_board(channel, None).await?;
        self.run_solver_turns(channel).await
    }

    // -- board-surface choices ----------------------------------------------

    /// Applies a human placement, then lets the solver-backed opponent
    /// answer for as long as it holds the turn.
    pub async fn place(
        &mut self,
        channel: ChannelId,
        col: usize,
    ) -> Result<(), GridfourError> {
        match self.apply_placement(channel, col).await? {
            Placed::Continue => self.run_solver_turns(channel).await,
            Placed::ColumnFull | Placed::RoundOver(_) => Ok(()),
        }
    }

    /// Starts a fresh round with the same roster, on a fresh board
    /// surface.
    pub async fn rematch(&mut self, channel: ChannelId) -> Result<(), GridfourError> {
        let old_board = {
            let session = self.require_session_mut(channel)?;
            session.rematch()?;
            let surface = session.board_surface();
            session.set_board_surface(None);
            surface
        };
        if let Some(surface) = old_board {
            self.presenter.delete_view(surface).await?;
        }
        self.render_board(channel, None).await?;
        self.run_solver_turns(channel).await
    }

    /// Returns the session to setup and re-renders the menu from scratch.
    pub async fn back_to_menu(
        &mut self,
        channel: ChannelId,
    ) -> Result<(), GridfourError> {
        let (menu, board) = {
            let session = self.require_session_mut(channel)?;
            session.back_to_setup()?;
            let surfaces = (session.menu_surface(), session.board_surface());
            session.set_menu_surface(None);
            session.set_board_surface(None);
            surfaces
        };
        if let Some(surface) = board {
            self.presenter.delete_view(surface).await?;
        }
        if let Some(surface) = menu {
            self.presenter.delete_view(surface).await?;
        }
        self.render_menu(channel).await
    }

    // -- internals ----------------------------------------------------------

    fn require_session_mut(
        &mut self,
        channel: ChannelId,
    ) -> Result<&mut GameSession, SessionError> {
        self.sessions
            .get_mut(channel)
            .ok_or(SessionError::NotFound(channel))
    }

    /// Applies one placement for the seat currently holding the turn and
    /// refreshes the board surface. On round completion the result footer
    /// and follow-up tokens are rendered and the match is persisted.
    async fn apply_placement(
        &mut self,
        channel: ChannelId,
        col: usize,
    ) -> Result<Placed, GridfourError> {
        let placed = self.require_session_mut(channel)?.place(col)?;
        match placed {
            Placed::ColumnFull => {
                tracing::debug!(%channel, col, "placement into full column ignored");
            }
            Placed::Continue => {
                self.render_board(channel, None).await?;
            }
            Placed::RoundOver(end) => {
                self.render_board(channel, Some(end)).await?;
                let surface = self
                    .sessions
                    .get(channel)
                    .and_then(|s| s.board_surface());
                if let Some(surface) = surface {
                    self.presenter
                        .attach_choices(surface, &ChoiceToken::result_tokens())
                        .await?;
                }
                self.persist_round(channel, end).await?;
            }
        }
        Ok(placed)
    }

    /// Plays solver moves until the turn returns to a human or the round
    /// ends. An explicit loop: a bot-vs-anything game advances one move
    /// per iteration and a finished round breaks out, so it terminates.
    async fn run_solver_turns(
        &mut self,
        channel: ChannelId,
    ) -> Result<(), GridfourError> {
        loop {
            let history = {
                let Some(session) = self.sessions.get(channel) else {
                    return Ok(());
                };
                if !session.phase().is_playing() {
                    return Ok(());
                }
                match session.turn_holder() {
                    Some(holder) if holder.is_bot => session.history().to_string(),
                    _ => return Ok(()),
                }
            };
            let col = self.solver.best_column(&history).await?;
            match self.apply_placement(channel, col).await? {
                Placed::Continue => {}
                Placed::RoundOver(_) => return Ok(()),
                Placed::ColumnFull => {
                    // A correct solver never picks a full column; treat it
                    // as a bad answer rather than spinning.
                    return Err(SolverError::MalformedScores(format!(
                        "solver picked full column {col}"
                    ))
                    .into());
                }
            }
        }
    }

    async fn persist_round(
        &mut self,
        channel: ChannelId,
        end: RoundEnd,
    ) -> Result<(), GridfourError> {
        let record = {
            let session = self
                .sessions
                .get(channel)
                .ok_or(SessionError::NotFound(channel))?;
            let players = session.players();
            MatchRecord {
                channel,
                timestamp_ms: unix_ms(),
                players: [players[0].id, players[1].id],
                history: session.history().to_string(),
                vs_ai: session.vs_ai(),
                winner: end
                    .winner
                    .map(MatchWinner::Seat)
                    .unwrap_or(MatchWinner::Draw),
            }
        };
        tracing::info!(%channel, winner = ?record.winner, "match recorded");
        self.records.append(record).await?;
        Ok(())
    }

    /// Sends or refreshes the setup surface.
    async fn render_menu(&mut self, channel: ChannelId) -> Result<(), GridfourError> {
        let (content, kind, existing) = {
            let session = self
                .sessions
                .get(channel)
                .ok_or(SessionError::NotFound(channel))?;
            (view::menu_view(session), session.kind(), session.menu_surface())
        };
        match existing {
            Some(surface) => self.presenter.update_view(surface, content).await?,
            None => {
                let surface = self.presenter.send_view(channel, content).await?;
                self.presenter
                    .attach_choices(surface, &ChoiceToken::setup_tokens(kind))
                    .await?;
                self.require_session_mut(channel)?
                    .set_menu_surface(Some(surface));
            }
        }
        Ok(())
    }

    /// Sends or refreshes the board surface.
    async fn render_board(
        &mut self,
        channel: ChannelId,
        result: Option<RoundEnd>,
    ) -> Result<(), GridfourError> {
        let (content, existing) = {
            let session = self
                .sessions
                .get(channel)
                .ok_or(SessionError::NotFound(channel))?;
            (view::board_view(session, result), session.board_surface())
        };
        match existing {
            Some(surface) => self.presenter.update_view(surface, content).await?,
            None => {
                let surface = self.presenter.send_view(channel, content).await?;
                self.presenter
                    .attach_choices(surface, &ChoiceToken::column_tokens())
                    .await?;
                self.require_session_mut(channel)?
                    .set_board_surface(Some(surface));
            }
        }
        Ok(())
    }

    /// Removes the session and its surfaces, then posts a farewell.
    async fn destroy(&mut self, channel: ChannelId) -> Result<(), GridfourError> {
        let session = self.sessions.remove(channel)?;
        if let Some(surface) = session.board_surface() {
            self.presenter.delete_view(surface).await?;
        }
        if let Some(surface) = session.menu_surface() {
            self.presenter.delete_view(surface).await?;
        }
        let surface = self.presenter.send_notice(channel, view::DISBANDED).await?;
        self.notices.push(surface, DEFAULT_NOTICE_TTL);
        Ok(())
    }
}

fn unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
