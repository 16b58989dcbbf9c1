//! Player - one seat's hand, field and running score

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::card::Card;
use crate::error::{EngineError, Result};

/// Largest hand dealt (two-player game)
pub const MAX_HAND_SIZE: usize = 10;

pub type Hand = SmallVec<[Card; MAX_HAND_SIZE]>;
pub type Field = SmallVec<[Card; 16]>;

/// Cards that were claimed for unknown placeholders during a play
pub type Revealed = SmallVec<[Card; 2]>;

/// Where a played card came from, so a failed double play can be undone
#[derive(Debug, Clone, Copy)]
struct Taken {
    position: usize,
    held: Card,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    hand: Hand,
    /// Play order matters: wasabi only boosts nigiri played after it
    field: Field,
    score: i32,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[inline]
    pub fn field(&self) -> &[Card] {
        &self.field
    }

    #[inline]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[inline]
    pub fn hand_len(&self) -> usize {
        self.hand.len()
    }

    #[inline]
    pub fn is_hand_empty(&self) -> bool {
        self.hand.is_empty()
    }

    /// Number of placeholders still in hand
    pub fn unknown_count(&self) -> usize {
        self.hand.iter().filter(|c| c.is_unknown()).count()
    }

    pub fn has_chopsticks(&self) -> bool {
        self.field.contains(&Card::Chopsticks)
    }

    /// Append `n` placeholders for cards this seat holds but nobody has seen
    pub fn add_unknown_cards(&mut self, n: usize) {
        self.hand.extend(std::iter::repeat(Card::Unknown).take(n));
    }

    /// Append a known card. The card is assumed to be valid.
    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Move one or two cards from hand to field, all or nothing.
    ///
    /// Each card is taken from hand by exact match first; failing that an
    /// unknown placeholder is consumed and the claimed card goes to the field.
    /// A two-card play needs chopsticks already in the field, which return to
    /// hand once both cards are down.
    ///
    /// Returns the claimed cards that consumed placeholders.
    pub fn play_cards(&mut self, cards: &[Card]) -> Result<Revealed> {
        if cards.is_empty() || cards.len() > 2 {
            return Err(EngineError::InvalidPlayCount(cards.len()));
        }

        let chopsticks_at = if cards.len() == 2 {
            let at = self
                .field
                .iter()
                .position(|&c| c == Card::Chopsticks)
                .ok_or(EngineError::MissingChopsticks)?;
            Some(at)
        } else {
            None
        };

        let mut taken: SmallVec<[Taken; 2]> = SmallVec::new();
        for &card in cards {
            match self.take_from_hand(card) {
                Some(t) => {
                    self.field.push(card);
                    taken.push(t);
                }
                None => {
                    for t in taken.iter().rev() {
                        self.field.pop();
                        self.hand.insert(t.position, t.held);
                    }
                    return Err(EngineError::UnknownCard(card));
                }
            }
        }

        if let Some(at) = chopsticks_at {
            let chopsticks = self.field.remove(at);
            self.hand.push(chopsticks);
        }

        Ok(taken
            .iter()
            .zip(cards)
            .filter(|(t, _)| t.held.is_unknown())
            .map(|(_, &card)| card)
            .collect())
    }

    fn take_from_hand(&mut self, card: Card) -> Option<Taken> {
        // Only catalog cards can be played; this also rules out the placeholder
        card.kind_index()?;
        let position = self
            .hand
            .iter()
            .position(|&c| c == card)
            .or_else(|| self.hand.iter().position(|c| c.is_unknown()))?;
        let held = self.hand.remove(position);
        Some(Taken { position, held })
    }

    /// Empty the field but keep every pudding, which count at game end
    pub fn clear_field_keep_puddings(&mut self) {
        let puddings = self.num_puddings();
        self.field.clear();
        self.field
            .extend(std::iter::repeat(Card::Pudding).take(puddings));
    }

    /// Total roll icons on maki in the field
    pub fn num_maki(&self) -> u32 {
        self.field.iter().map(|c| c.maki_rolls()).sum()
    }

    pub fn num_puddings(&self) -> usize {
        self.field.iter().filter(|&&c| c == Card::Pudding).count()
    }

    pub(crate) fn add_score(&mut self, points: i32) {
        self.score += points;
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub(crate) fn take_hand(&mut self) -> Hand {
        std::mem::take(&mut self.hand)
    }

    pub(crate) fn set_hand(&mut self, hand: Hand) {
        self.hand = hand;
    }

    #[cfg(test)]
    pub(crate) fn with_field(field: &[Card]) -> Self {
        Player {
            field: field.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score = {}", self.score)?;
        write!(f, "Hand = [")?;
        write_cards(f, &self.hand)?;
        write!(f, "]\nField = [")?;
        write_cards(f, &self.field)?;
        write!(f, "]")
    }
}

fn write_cards(f: &mut fmt::Formatter<'_>, cards: &[Card]) -> fmt::Result {
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", card)?;
    }
    Ok(())
}
