//! Deck - multiset of undrawn cards
//!
//! Counts are stored per kind in catalog order, so cloning a deck for a search
//! branch is a fixed-size copy. A kind with a zero count is absent: nothing in
//! the public API can observe a zero entry.

use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::card::{Card, KIND_COUNT};
use crate::error::{EngineError, Result};

/// Starting count of each kind, indexed like `Card::DEALT`
pub const INITIAL_COUNTS: [u8; KIND_COUNT] = [14, 14, 14, 12, 8, 6, 10, 5, 5, 10, 6, 4];

/// Total number of cards in a fresh deck
pub const DECK_SIZE: usize = 108;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<Card, u8>", try_from = "BTreeMap<Card, u8>")]
pub struct Deck {
    counts: [u8; KIND_COUNT],
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Full 108-card deck
    pub fn new() -> Self {
        Deck {
            counts: INITIAL_COUNTS,
        }
    }

    /// Deck holding no cards
    pub fn empty() -> Self {
        Deck {
            counts: [0; KIND_COUNT],
        }
    }

    /// Remaining copies of `card` (0 when absent)
    #[inline]
    pub fn count(&self, card: Card) -> u8 {
        card.kind_index().map_or(0, |i| self.counts[i])
    }

    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.count(card) > 0
    }

    /// Total number of individual cards left
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Kinds still present with their counts, in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (Card, u8)> + '_ {
        Card::DEALT
            .iter()
            .zip(self.counts.iter())
            .filter(|&(_, &count)| count > 0)
            .map(|(&card, &count)| (card, count))
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, card: Card) {
        let index = card.kind_index().expect("only dealt kinds go in a deck");
        self.counts[index] += 1;
    }

    /// Remove one copy of a specific card.
    ///
    /// Fails with `CardNotInDeck` when no copy is left; the deck is untouched.
    pub fn draw_named(&mut self, card: Card) -> Result<Card> {
        match card.kind_index() {
            Some(i) if self.counts[i] > 0 => {
                self.counts[i] -= 1;
                Ok(card)
            }
            _ => Err(EngineError::CardNotInDeck(card)),
        }
    }

    /// Remove one card chosen uniformly over the remaining individual cards.
    ///
    /// A point in `[1, len]` is drawn and kinds are scanned in catalog order
    /// with a running total; the first kind whose running total reaches the
    /// point is taken. Returns `None` on an empty deck.
    pub fn draw_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        let total = self.len();
        if total == 0 {
            return None;
        }

        let point = rng.gen_range(1..=total);
        let mut cumulative = 0usize;
        for (i, count) in self.counts.iter_mut().enumerate() {
            cumulative += *count as usize;
            if *count > 0 && cumulative >= point {
                *count -= 1;
                return Some(Card::DEALT[i]);
            }
        }

        None
    }
}

impl From<Deck> for BTreeMap<Card, u8> {
    fn from(deck: Deck) -> Self {
        deck.iter().collect()
    }
}

impl TryFrom<BTreeMap<Card, u8>> for Deck {
    type Error = EngineError;

    fn try_from(map: BTreeMap<Card, u8>) -> Result<Self> {
        let mut deck = Deck::empty();
        for (card, count) in map {
            let index = card.kind_index().ok_or(EngineError::UnknownCard(card))?;
            deck.counts[index] = count;
        }
        Ok(deck)
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (card, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", card, count)?;
        }
        f.write_str("}")
    }
}
