//! The single entry point for inbound platform events.
//!
//! Every event runs the same gauntlet: vocabulary, session lookup, surface
//! match, phase, actor. Events that fall out at any step are silently
//! discarded with a `debug!` trace and reported as not consumed, so the
//! embedder can leave foreign reactions alone. Only events that survive the
//! whole pipeline mutate anything.

use gridfour_protocol::{
    ChannelId, ChannelKind, ChoiceToken, Command, SurfaceId,
};
use gridfour_session::Player;
use gridfour_solver::MoveSolver;

use crate::error::GridfourError;
use crate::gateway::{MatchStore, Presenter};
use crate::master::GameMaster;

/// Routes raw messages and reactions into [`GameMaster`] operations.
pub struct EventRouter<P, M, V> {
    master: GameMaster<P, M, V>,
}

impl<P, M, V> EventRouter<P, M, V>
where
    P: Presenter,
    M: MatchStore,
    V: MoveSolver,
{
    pub fn new(master: GameMaster<P, M, V>) -> Self {
        Self { master }
    }

    pub fn master(&self) -> &GameMaster<P, M, V> {
        &self.master
    }

    pub fn master_mut(&mut self) -> &mut GameMaster<P, M, V> {
        &mut self.master
    }

    /// Handles a raw channel message.
    ///
    /// Returns `Ok(true)` when the message was addressed to this game and
    /// acted upon, `Ok(false)` when it is someone else's conversation.
    pub async fn on_command(
        &mut self,
        channel: ChannelId,
        kind: ChannelKind,
        actor: Player,
        text: &str,
    ) -> Result<bool, GridfourError> {
        let Some(command) = Command::parse(text) else {
            return Ok(false);
        };
        tracing::debug!(%channel, user = %actor.id, ?command, "command received");
        match command {
            Command::Establish => self.master.establish(channel, kind, actor).await?,
            Command::Break => self.master.break_session(channel).await?,
            Command::Statistics => self.master.show_statistics(channel).await?,
        }
        Ok(true)
    }

    /// Handles a raw reaction on a surface.
    ///
    /// Returns `Ok(true)` when the reaction was consumed (so the embedder
    /// should clear it from the surface), `Ok(false)` when it was not ours
    /// to act on. Errors only escape for boundary failures; invalid game
    /// input never becomes an error.
    pub async fn on_choice(
        &mut self,
        channel: ChannelId,
        surface: SurfaceId,
        actor: &Player,
        emoji: &str,
    ) -> Result<bool, GridfourError> {
        let Some(token) = ChoiceToken::from_emoji(emoji) else {
            return Ok(false);
        };
        let Some(session) = self.master.session(channel) else {
            tracing::debug!(%channel, ?token, "reaction dropped: no session");
            return Ok(false);
        };

        // Each token is only live on the surface it was attached to; a
        // reaction on a superseded board or a random message is foreign.
        let expected = match token {
            ChoiceToken::Join
            | ChoiceToken::Leave
            | ChoiceToken::SwitchSides
            | ChoiceToken::Start => session.menu_surface(),
            ChoiceToken::Column(_)
            | ChoiceToken::Rematch
            | ChoiceToken::BackToMenu => session.board_surface(),
        };
        if expected != Some(surface) {
            tracing::debug!(%channel, %surface, ?token, "reaction dropped: stale surface");
            return Ok(false);
        }

        let phase = session.phase();
        let member = session.is_member(actor.id);
        let roster = session.players().len();
        let holds_turn = session.turn_holder().map(|p| p.id) == Some(actor.id);

        // Turn ownership is an identity check, never a seat-index check:
        // switching sides reorders seats but a reaction still belongs to
        // whoever made it.
        let permitted = match token {
            ChoiceToken::Join => phase.is_setup() && !member && roster < 2,
            ChoiceToken::Leave => phase.is_setup() && member,
            ChoiceToken::SwitchSides | ChoiceToken::Start => {
                phase.is_setup() && member && roster == 2
            }
            ChoiceToken::Column(_) => phase.is_playing() && holds_turn,
            ChoiceToken::Rematch | ChoiceToken::BackToMenu => {
                phase.is_finished() && member
            }
        };
        if !permitted {
            tracing::debug!(
                %channel,
                user = %actor.id,
                ?token,
                %phase,
                "reaction dropped: not permitted"
            );
            return Ok(false);
        }

        match token {
            ChoiceToken::Join => self.master.join(channel, actor.clone()).await?,
            ChoiceToken::Leave => self.master.leave(channel, actor.id).await?,
            ChoiceToken::SwitchSides => self.master.switch_sides(channel).await?,
            ChoiceToken::Start => self.master.start(channel).await?,
            ChoiceToken::Column(col) => {
                self.master.place(channel, col as usize).await?
            }
            ChoiceToken::Rematch => self.master.rematch(channel).await?,
            ChoiceToken::BackToMenu => self.master.back_to_menu(channel).await?,
        }
        Ok(true)
    }
}
