//! Shared vocabulary for Gridfour.
//!
//! This crate defines everything the engine and its collaborators agree on:
//!
//! - **Identity** ([`ChannelId`], [`UserId`], [`SurfaceId`]): opaque
//!   platform-issued ids.
//! - **Vocabulary** ([`Command`], [`ChoiceToken`]): the fixed set of
//!   textual commands and reaction tokens the engine understands.
//! - **Payloads** ([`ViewContent`], [`MatchRecord`]): what crosses the
//!   presentation and persistence boundaries.
//!
//! It sits below every other crate and has no opinion about sessions,
//! boards, or rendering; it only names things.

mod command;
mod types;

pub use command::{ChoiceToken, Command, COLUMN_COUNT};
pub use types::{
    ChannelId, ChannelKind, MatchRecord, MatchWinner, SurfaceId, UserId,
    ViewContent,
};
