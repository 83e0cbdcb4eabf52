//! The session store: one live session per channel, at most.

use std::collections::HashMap;

use gridfour_protocol::ChannelId;

use crate::{GameSession, SessionError};

/// Maps each channel to its single active session.
///
/// The store is plain data, no locking. The engine mutates it from one
/// handler at a time (cooperative event processing), so interior
/// synchronization would only hide bugs.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<ChannelId, GameSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, channel: ChannelId) -> Option<&GameSession> {
        self.sessions.get(&channel)
    }

    pub fn get_mut(&mut self, channel: ChannelId) -> Option<&mut GameSession> {
        self.sessions.get_mut(&channel)
    }

    /// Inserts a new session for its channel.
    ///
    /// Establishing while a session exists is rejected, not queued.
    pub fn create(
        &mut self,
        session: GameSession,
    ) -> Result<&mut GameSession, SessionError> {
        let channel = session.channel();
        if self.sessions.contains_key(&channel) {
            return Err(SessionError::AlreadyExists(channel));
        }
        tracing::info!(%channel, "session created");
        Ok(self.sessions.entry(channel).or_insert(session))
    }

    /// Removes and returns the channel's session.
    pub fn remove(
        &mut self,
        channel: ChannelId,
    ) -> Result<GameSession, SessionError> {
        let session = self
            .sessions
            .remove(&channel)
            .ok_or(SessionError::NotFound(channel))?;
        tracing::info!(%channel, "session destroyed");
        Ok(session)
    }

    pub fn contains(&self, channel: ChannelId) -> bool {
        self.sessions.contains_key(&channel)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
