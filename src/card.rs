//! Card catalog - the fixed set of Sushi Go card kinds
//!
//! Cards are plain values. Maki and nigiri carry their face value, and the
//! textual codes below are the vocabulary exchanged with drivers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Number of distinct kinds that can be dealt from the deck
pub const KIND_COUNT: usize = 12;

/// A single card. `Unknown` is a hand-only placeholder for an unobserved card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Card {
    Tempura,
    Sashimi,
    Dumpling,
    /// Maki roll showing 1-3 roll icons
    Maki(u8),
    /// Nigiri worth 1 (egg), 2 (salmon) or 3 (squid)
    Nigiri(u8),
    Pudding,
    Wasabi,
    Chopsticks,
    Unknown,
}

impl Card {
    /// Every kind that exists in the deck, in catalog order
    pub const DEALT: [Card; KIND_COUNT] = [
        Card::Tempura,
        Card::Sashimi,
        Card::Dumpling,
        Card::Maki(2),
        Card::Maki(3),
        Card::Maki(1),
        Card::Nigiri(2),
        Card::Nigiri(3),
        Card::Nigiri(1),
        Card::Pudding,
        Card::Wasabi,
        Card::Chopsticks,
    ];

    /// Slot of this kind in `Card::DEALT`, `None` for placeholders or
    /// out-of-range face values
    #[inline]
    pub fn kind_index(self) -> Option<usize> {
        match self {
            Card::Tempura => Some(0),
            Card::Sashimi => Some(1),
            Card::Dumpling => Some(2),
            Card::Maki(2) => Some(3),
            Card::Maki(3) => Some(4),
            Card::Maki(1) => Some(5),
            Card::Nigiri(2) => Some(6),
            Card::Nigiri(3) => Some(7),
            Card::Nigiri(1) => Some(8),
            Card::Pudding => Some(9),
            Card::Wasabi => Some(10),
            Card::Chopsticks => Some(11),
            _ => None,
        }
    }

    #[inline]
    pub fn is_unknown(self) -> bool {
        self == Card::Unknown
    }

    /// Roll icons on a maki card, 0 for everything else
    #[inline]
    pub fn maki_rolls(self) -> u32 {
        match self {
            Card::Maki(rolls) => rolls as u32,
            _ => 0,
        }
    }

    /// Short code used on the driver boundary
    pub fn code(self) -> &'static str {
        match self {
            Card::Tempura => "T",
            Card::Sashimi => "S",
            Card::Dumpling => "D",
            Card::Maki(1) => "1M",
            Card::Maki(2) => "2M",
            Card::Maki(3) => "3M",
            Card::Nigiri(1) => "1N",
            Card::Nigiri(2) => "2N",
            Card::Nigiri(3) => "3N",
            Card::Pudding => "P",
            Card::Wasabi => "W",
            Card::Chopsticks => "C",
            // Face values outside 1-3 never come out of the parser or the deck
            Card::Maki(_) | Card::Nigiri(_) | Card::Unknown => "?",
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Card {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        let card = match code.as_str() {
            "T" => Card::Tempura,
            "S" => Card::Sashimi,
            "D" => Card::Dumpling,
            "P" => Card::Pudding,
            "W" => Card::Wasabi,
            "C" => Card::Chopsticks,
            "?" => Card::Unknown,
            "1M" => Card::Maki(1),
            "2M" => Card::Maki(2),
            "3M" => Card::Maki(3),
            "1N" => Card::Nigiri(1),
            "2N" => Card::Nigiri(2),
            "3N" => Card::Nigiri(3),
            _ => return Err(EngineError::InvalidCardCode(s.to_string())),
        };
        Ok(card)
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.code().to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = EngineError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

/// Parse a whitespace or comma separated list of codes, e.g. `"T 2N, W"`
pub fn parse_cards(input: &str) -> Result<Vec<Card>, EngineError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}
