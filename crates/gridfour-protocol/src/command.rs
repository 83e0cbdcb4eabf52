//! The fixed command and reaction-token vocabulary.
//!
//! The engine only reacts to what a correctly-rendered surface offers, so
//! both vocabularies are closed sets. Parsing returns `None` for anything
//! outside them: "not addressed to this game" is an expected case, not an
//! error.

use crate::ChannelKind;

/// Number of playable columns, and therefore of column reaction tokens.
pub const COLUMN_COUNT: usize = 7;

/// Column reaction emoji, index = column.
const COLUMN_EMOJI: [&str; COLUMN_COUNT] =
    ["1\u{fe0f}\u{20e3}", "2\u{fe0f}\u{20e3}", "3\u{fe0f}\u{20e3}", "4\u{fe0f}\u{20e3}", "5\u{fe0f}\u{20e3}", "6\u{fe0f}\u{20e3}", "7\u{fe0f}\u{20e3}"];

const JOIN_EMOJI: &str = "\u{1f64b}"; // 🙋
const LEAVE_EMOJI: &str = "\u{1f44b}"; // 👋
const SWITCH_EMOJI: &str = "\u{2194}\u{fe0f}"; // ↔️
const START_EMOJI: &str = "\u{25b6}\u{fe0f}"; // ▶️
const REMATCH_EMOJI: &str = "\u{1f501}"; // 🔁
const BACK_EMOJI: &str = "\u{1f527}"; // 🔧

// ---------------------------------------------------------------------------
// Textual commands
// ---------------------------------------------------------------------------

/// A textual command addressed to this game family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Establish a new session in the channel.
    Establish,
    /// Hidden command: tear the channel's session down.
    Break,
    /// Show aggregate win/loss statistics.
    Statistics,
}

impl Command {
    /// Parses a raw message, case- and space-insensitively.
    ///
    /// Returns `None` when the text is not addressed to this game family.
    pub fn parse(text: &str) -> Option<Self> {
        let normalized: String = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "/findfour" | "/find4" | "/connectfour" | "/connect4" => {
                Some(Self::Establish)
            }
            "/breakfindfour" | "/breakfind4" => Some(Self::Break),
            "/findfourstatistics" | "/find4statistics" => {
                Some(Self::Statistics)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Reaction tokens
// ---------------------------------------------------------------------------

/// A selectable reaction token on one of the engine's surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceToken {
    /// Take a seat (setup surface).
    Join,
    /// Give up a seat (setup surface).
    Leave,
    /// Swap first- and second-mover (setup surface).
    SwitchSides,
    /// Begin the round (setup surface).
    Start,
    /// Drop a piece into the given column, 0-indexed (board surface).
    Column(u8),
    /// Play another round with the same roster (round-result surface).
    Rematch,
    /// Return to the setup surface (round-result surface).
    BackToMenu,
}

impl ChoiceToken {
    /// Maps a raw reaction emoji to a token.
    ///
    /// Returns `None` for emoji outside the vocabulary.
    pub fn from_emoji(emoji: &str) -> Option<Self> {
        if let Some(col) = COLUMN_EMOJI.iter().position(|e| *e == emoji) {
            return Some(Self::Column(col as u8));
        }
        match emoji {
            JOIN_EMOJI => Some(Self::Join),
            LEAVE_EMOJI => Some(Self::Leave),
            SWITCH_EMOJI => Some(Self::SwitchSides),
            START_EMOJI => Some(Self::Start),
            REMATCH_EMOJI => Some(Self::Rematch),
            BACK_EMOJI => Some(Self::BackToMenu),
            _ => None,
        }
    }

    /// The emoji rendered for this token.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Join => JOIN_EMOJI,
            Self::Leave => LEAVE_EMOJI,
            Self::SwitchSides => SWITCH_EMOJI,
            Self::Start => START_EMOJI,
            Self::Column(col) => COLUMN_EMOJI[*col as usize % COLUMN_COUNT],
            Self::Rematch => REMATCH_EMOJI,
            Self::BackToMenu => BACK_EMOJI,
        }
    }

    /// Tokens attached to the setup surface.
    ///
    /// A direct channel has no one else to invite, so it omits `Join`;
    /// `Leave` doubles as "quit the game" there.
    pub fn setup_tokens(kind: ChannelKind) -> Vec<Self> {
        match kind {
            ChannelKind::Group => {
                vec![Self::Start, Self::SwitchSides, Self::Join, Self::Leave]
            }
            ChannelKind::Direct => {
                vec![Self::Start, Self::SwitchSides, Self::Leave]
            }
        }
    }

    /// The seven column tokens attached to the board surface.
    pub fn column_tokens() -> Vec<Self> {
        (0..COLUMN_COUNT as u8).map(Self::Column).collect()
    }

    /// Tokens attached once a round has completed.
    pub fn result_tokens() -> Vec<Self> {
        vec![Self::Rematch, Self::BackToMenu]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_establish_variants() {
        for text in ["/findfour", "/find4", "/connectfour", "/connect4"] {
            assert_eq!(Command::parse(text), Some(Command::Establish), "{text}");
        }
    }

    #[test]
    fn test_parse_is_case_and_space_insensitive() {
        assert_eq!(Command::parse("/Find Four"), Some(Command::Establish));
        assert_eq!(Command::parse("/CONNECT 4"), Some(Command::Establish));
        assert_eq!(
            Command::parse("/break find four"),
            Some(Command::Break)
        );
        assert_eq!(
            Command::parse("/Find4 Statistics"),
            Some(Command::Statistics)
        );
    }

    #[test]
    fn test_parse_rejects_foreign_text() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse("/findfive"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_column_emoji_maps_to_zero_indexed_columns() {
        // "1️⃣" is column 0, "7️⃣" is column 6.
        assert_eq!(
            ChoiceToken::from_emoji("1\u{fe0f}\u{20e3}"),
            Some(ChoiceToken::Column(0))
        );
        assert_eq!(
            ChoiceToken::from_emoji("7\u{fe0f}\u{20e3}"),
            Some(ChoiceToken::Column(6))
        );
    }

    #[test]
    fn test_emoji_round_trip_for_every_token() {
        let mut tokens = vec![
            ChoiceToken::Join,
            ChoiceToken::Leave,
            ChoiceToken::SwitchSides,
            ChoiceToken::Start,
            ChoiceToken::Rematch,
            ChoiceToken::BackToMenu,
        ];
        tokens.extend(ChoiceToken::column_tokens());
        for token in tokens {
            assert_eq!(ChoiceToken::from_emoji(token.emoji()), Some(token));
        }
    }

    #[test]
    fn test_unknown_emoji_is_not_ours() {
        assert_eq!(ChoiceToken::from_emoji("\u{1f980}"), None); // 🦀
        assert_eq!(ChoiceToken::from_emoji(""), None);
    }

    #[test]
    fn test_setup_tokens_differ_by_channel_kind() {
        let group = ChoiceToken::setup_tokens(ChannelKind::Group);
        assert!(group.contains(&ChoiceToken::Join));
        let direct = ChoiceToken::setup_tokens(ChannelKind::Direct);
        assert!(!direct.contains(&ChoiceToken::Join));
        assert!(direct.contains(&ChoiceToken::Leave));
    }

    #[test]
    fn test_column_tokens_cover_all_columns() {
        let tokens = ChoiceToken::column_tokens();
        assert_eq!(tokens.len(), COLUMN_COUNT);
        assert_eq!(tokens[0], ChoiceToken::Column(0));
        assert_eq!(tokens[6], ChoiceToken::Column(6));
    }
}
