//! GameState - the searchable Sushi Go state
//!
//! Owns every seat and the deck. Seat 0 is the agent being searched for;
//! the other seats are humans whose hands are placeholders until their cards
//! are revealed by play or by `resolve_unknowns`.
//!
//! Turns are simultaneous. A ply is one play per seat; once every seat has
//! played, hands rotate to the next seat, and once every hand is empty the
//! round is scored.

use std::fmt;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::card::Card;
use crate::deck::Deck;
use crate::error::{EngineError, Result};
use crate::player::Player;
use crate::scoring;

/// Seat searched for by convention
pub const AGENT_SEAT: usize = 0;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;
/// Game ends once this round is scored
pub const FINAL_ROUND: u8 = 3;

/// One or two cards played together
pub type Play = SmallVec<[Card; 2]>;

/// Cards dealt to each seat per round for a given table size
pub fn cards_per_player(player_count: usize) -> Option<usize> {
    match player_count {
        2 => Some(10),
        3 => Some(9),
        4 => Some(8),
        5 => Some(7),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Waiting for the round's hands to be dealt
    Dealing,
    Playing,
    /// Final round scored
    Terminal,
}

/// How to deal the next round when a move ends the current one
pub enum Redeal<'a> {
    /// Deal every seat at random from the deck (simulation)
    Random(&'a mut dyn RngCore),
    /// Stay in `Phase::Dealing` until the driver calls `deal_known`
    Deferred,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameStateSnapshot")]
pub struct GameState {
    players: SmallVec<[Player; MAX_PLAYERS]>,
    deck: Deck,
    round: u8,
    phase: Phase,
}

/// Unchecked wire form of `GameState`
#[derive(Deserialize)]
struct GameStateSnapshot {
    players: SmallVec<[Player; MAX_PLAYERS]>,
    deck: Deck,
    round: u8,
    phase: Phase,
}

impl TryFrom<GameStateSnapshot> for GameState {
    type Error = EngineError;

    fn try_from(snapshot: GameStateSnapshot) -> Result<Self> {
        let GameStateSnapshot {
            players,
            deck,
            round,
            phase,
        } = snapshot;

        let hand_size = cards_per_player(players.len())
            .ok_or(EngineError::InvalidPlayerCount(players.len()))?;
        if !(1..=FINAL_ROUND).contains(&round) {
            return Err(EngineError::InvalidSnapshot(format!(
                "round {} outside 1-{}",
                round, FINAL_ROUND
            )));
        }
        for (seat, player) in players.iter().enumerate() {
            if player.hand_len() > hand_size {
                return Err(EngineError::InvalidSnapshot(format!(
                    "seat {} holds {} cards, at most {} are dealt",
                    seat,
                    player.hand_len(),
                    hand_size
                )));
            }
            if player.field().iter().any(|c| c.is_unknown()) {
                return Err(EngineError::InvalidSnapshot(format!(
                    "seat {} has an unknown card in its field",
                    seat
                )));
            }
        }

        Ok(GameState {
            players,
            deck,
            round,
            phase,
        })
    }
}

impl GameState {
    /// Start a game for 2-5 seats. Nothing is dealt yet.
    pub fn new(player_count: usize) -> Result<Self> {
        if cards_per_player(player_count).is_none() {
            return Err(EngineError::InvalidPlayerCount(player_count));
        }

        Ok(GameState {
            players: (0..player_count).map(|_| Player::new()).collect(),
            deck: Deck::new(),
            round: 1,
            phase: Phase::Dealing,
        })
    }

    #[inline]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Result<&Player> {
        self.players.get(seat).ok_or(EngineError::InvalidSeat(seat))
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[inline]
    pub fn round(&self) -> u8 {
        self.round
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }

    /// Hand size every seat is dealt this game
    pub fn hand_size(&self) -> usize {
        cards_per_player(self.players.len()).unwrap_or(0)
    }

    fn expect_phase(&self, expected: Phase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(EngineError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    // ========================================
    // DEALING
    // ========================================

    /// Deal the agent one card it was actually given.
    ///
    /// Fails with `CardNotInDeck` if no copy of `card` is left, in which case
    /// the caller should ask for that card again. Once the agent holds a full
    /// hand every other seat gets the same number of placeholders.
    pub fn deal_known_card(&mut self, card: Card) -> Result<()> {
        self.expect_phase(Phase::Dealing)?;
        self.deck.draw_named(card)?;
        self.players[AGENT_SEAT].add_card(card);

        let hand_size = self.hand_size();
        if self.players[AGENT_SEAT].hand_len() >= hand_size {
            for player in self.players.iter_mut().skip(1) {
                let missing = hand_size.saturating_sub(player.hand_len());
                player.add_unknown_cards(missing);
            }
            self.phase = Phase::Playing;
            tracing::debug!(round = self.round, "dealt known hand");
        }
        Ok(())
    }

    /// Deal known cards one at a time until the agent's hand is full.
    ///
    /// Stops at the first card that cannot be drawn; cards dealt before it
    /// stay dealt. Cards left over once the hand is full are not consumed.
    pub fn deal_known<I>(&mut self, cards: I) -> Result<()>
    where
        I: IntoIterator<Item = Card>,
    {
        self.expect_phase(Phase::Dealing)?;
        for card in cards {
            if self.phase != Phase::Dealing {
                break;
            }
            if let Err(e) = self.deal_known_card(card) {
                tracing::warn!(%card, error = %e, "rejected known card");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Fill every hand at random from the deck (simulation only)
    pub fn deal_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.expect_phase(Phase::Dealing)?;
        self.fill_hands(rng);
        Ok(())
    }

    fn fill_hands<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let hand_size = self.hand_size();
        for player in self.players.iter_mut() {
            while player.hand_len() < hand_size {
                let card = draw_or_abort(&mut self.deck, rng);
                player.add_card(card);
            }
        }
        self.phase = Phase::Playing;
        tracing::debug!(round = self.round, deck = self.deck.len(), "dealt random hands");
    }

    // ========================================
    // HIDDEN INFORMATION
    // ========================================

    /// Replace placeholders in `seat`'s hand with cards the driver has seen.
    ///
    /// Each revealed card is drawn from the deck by identity. All or nothing.
    pub fn resolve_unknowns(&mut self, seat: usize, cards: &[Card]) -> Result<()> {
        self.expect_phase(Phase::Playing)?;
        let player = self.players.get(seat).ok_or(EngineError::InvalidSeat(seat))?;

        let unknown = player.unknown_count();
        if cards.len() > unknown {
            return Err(EngineError::UnresolvedCards {
                seat,
                unknown,
                revealed: cards.len(),
            });
        }

        let mut deck = self.deck.clone();
        for &card in cards {
            deck.draw_named(card)?;
        }
        self.deck = deck;

        let hand = self.players[seat].hand_mut();
        let slots = hand.iter_mut().filter(|c| c.is_unknown());
        for (slot, &card) in slots.zip(cards) {
            *slot = card;
        }
        Ok(())
    }

    /// Turn every placeholder in every hand into a random card from the deck
    pub fn determinize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for player in self.players.iter_mut() {
            for slot in player.hand_mut().iter_mut().filter(|c| c.is_unknown()) {
                *slot = draw_or_abort(&mut self.deck, rng);
            }
        }
    }

    // ========================================
    // MOVES
    // ========================================

    fn largest_hand(&self) -> usize {
        self.players.iter().map(Player::hand_len).max().unwrap_or(0)
    }

    /// A seat has played this ply once its hand is shorter than the rest
    pub fn has_moved(&self, seat: usize) -> bool {
        self.players
            .get(seat)
            .is_some_and(|p| p.hand_len() < self.largest_hand())
    }

    /// True when nobody has played yet in the current ply
    pub fn is_ply_start(&self) -> bool {
        let largest = self.largest_hand();
        self.players.iter().all(|p| p.hand_len() == largest)
    }

    /// Play one or two cards for `seat`.
    ///
    /// Seats may play in any order, each once per ply. When every seat has
    /// played, hands rotate; when every hand is empty the round is scored and
    /// the next one dealt per `redeal`.
    pub fn apply_move(&mut self, cards: &[Card], seat: usize, redeal: Redeal<'_>) -> Result<()> {
        self.expect_phase(Phase::Playing)?;
        self.player(seat)?;
        if self.has_moved(seat) {
            return Err(EngineError::AlreadyMoved(seat));
        }

        let revealed = self.players[seat].play_cards(cards)?;
        for card in revealed {
            // Claims are trusted even when the deck disagrees
            if self.deck.draw_named(card).is_err() {
                tracing::trace!(seat, %card, "claimed card already gone from deck");
            }
        }

        self.end_of_play(redeal);
        Ok(())
    }

    fn end_of_play(&mut self, redeal: Redeal<'_>) {
        if !self.is_ply_start() {
            return;
        }

        if self.players.iter().all(Player::is_hand_empty) {
            self.finish_round(redeal);
        } else {
            self.rotate_hands();
        }
    }

    /// Pass every hand to the next seat
    fn rotate_hands(&mut self) {
        let count = self.players.len();
        let mut hands: SmallVec<[_; MAX_PLAYERS]> =
            self.players.iter_mut().map(Player::take_hand).collect();
        hands.rotate_right(1);
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.set_hand(hand);
        }
        tracing::trace!(
            seats = count,
            cards = self.players[AGENT_SEAT].hand_len(),
            "rotated hands"
        );
    }

    fn finish_round(&mut self, redeal: Redeal<'_>) {
        scoring::update_scores(&mut self.players, self.round);

        if self.round >= FINAL_ROUND {
            self.phase = Phase::Terminal;
            tracing::debug!("game over");
            return;
        }

        self.round += 1;
        for player in self.players.iter_mut() {
            player.clear_field_keep_puddings();
        }
        self.phase = Phase::Dealing;
        tracing::debug!(round = self.round, "starting round");

        if let Redeal::Random(rng) = redeal {
            self.fill_hands(rng);
        }
    }

    /// Every play available to `seat`: each hand position alone, plus each
    /// ordered pair of distinct positions when chopsticks are in the field
    pub fn legal_plays(&self, seat: usize) -> Result<Vec<Play>> {
        let player = self.player(seat)?;
        let hand = player.hand();

        let mut plays: Vec<Play> = hand.iter().map(|&card| smallvec![card]).collect();
        if player.has_chopsticks() {
            for (i, &first) in hand.iter().enumerate() {
                for (j, &second) in hand.iter().enumerate() {
                    if i != j {
                        plays.push(smallvec![first, second]);
                    }
                }
            }
        }
        Ok(plays)
    }

    /// States reachable by one agent play.
    ///
    /// Empty unless playing, and also once the agent has played this ply or
    /// while its hand still holds placeholders.
    pub fn legal_next_states(&self) -> Vec<GameState> {
        if self.phase != Phase::Playing
            || self.has_moved(AGENT_SEAT)
            || self.players[AGENT_SEAT].unknown_count() > 0
        {
            return Vec::new();
        }

        let plays = match self.legal_plays(AGENT_SEAT) {
            Ok(plays) => plays,
            Err(e) => invariant_violation("agent seat missing", &e),
        };

        plays
            .iter()
            .map(|play| {
                let mut next = self.clone();
                if let Err(e) = next.apply_move(play, AGENT_SEAT, Redeal::Deferred) {
                    invariant_violation("generated agent play rejected", &e);
                }
                next
            })
            .collect()
    }

    /// One random ply from this state.
    ///
    /// Hidden hands are determinized first. Every seat that has not played
    /// yet this ply makes one uniformly random play. A round boundary deals
    /// the next round at random.
    pub fn random_next_state<R: Rng>(&self, rng: &mut R) -> GameState {
        let mut next = self.clone();
        match next.phase {
            Phase::Terminal => return next,
            Phase::Dealing => next.fill_hands(rng),
            Phase::Playing => {}
        }
        next.determinize(rng);

        let movers: SmallVec<[usize; MAX_PLAYERS]> = (0..next.players.len())
            .filter(|&seat| !next.has_moved(seat))
            .collect();

        for seat in movers {
            let plays = match next.legal_plays(seat) {
                Ok(plays) if !plays.is_empty() => plays,
                Ok(_) => invariant_violation("seat has no play", &format!("seat {}", seat)),
                Err(e) => invariant_violation("seat missing", &e),
            };
            let play = &plays[rng.gen_range(0..plays.len())];
            if let Err(e) = next.apply_move(play, seat, Redeal::Random(&mut *rng)) {
                invariant_violation("generated random play rejected", &e);
            }
        }

        next
    }

    // ========================================
    // OUTCOME
    // ========================================

    /// Seats with the best score, ties broken by most puddings.
    ///
    /// Empty until the final round is scored.
    pub fn winners(&self) -> Vec<usize> {
        if self.phase != Phase::Terminal || !self.players[AGENT_SEAT].is_hand_empty() {
            return Vec::new();
        }

        let best = self
            .players
            .iter()
            .map(|p| (p.score(), p.num_puddings()))
            .max();

        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| Some((p.score(), p.num_puddings())) == best)
            .map(|(seat, _)| seat)
            .collect()
    }
}

fn draw_or_abort<R: Rng + ?Sized>(deck: &mut Deck, rng: &mut R) -> Card {
    match deck.draw_random(rng) {
        Some(card) => card,
        None => invariant_violation("deck exhausted", &"no cards left to deal"),
    }
}

/// The engine produced an action it cannot execute itself; searching on
/// from here would be meaningless.
#[cold]
fn invariant_violation(context: &str, err: &dyn fmt::Display) -> ! {
    tracing::error!(context, error = %err, "engine invariant violated");
    panic!("{}: {}", context, err);
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Current round = {}", self.round)?;
        write!(f, "\nPhase = {:?}", self.phase)?;
        write!(f, "\nDeck = {}", self.deck)?;
        for (seat, player) in self.players.iter().enumerate() {
            write!(f, "\n===============================================")?;
            write!(f, "\nPlayer {}:\n{}", seat, player)?;
        }
        Ok(())
    }
}
