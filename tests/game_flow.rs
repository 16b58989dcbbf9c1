//! Driver-level tests for a full game with one known seat
//!
//! Plays the way a live driver would: the agent's hands come in as card codes,
//! the human's plays are claimed against placeholders, and hands the agent
//! receives after a rotation are revealed before it moves again.

use sushigo_engine::card::parse_cards;
use sushigo_engine::{Card, EngineError, GameState, Phase, Redeal, SearchState, AGENT_SEAT};

const HUMAN: usize = 1;

fn cards(codes: &str) -> Vec<Card> {
    parse_cards(codes).expect("valid card codes")
}

/// First card in `seat`'s hand, which must be known
fn first_known(state: &GameState, seat: usize) -> Card {
    let card = state.players()[seat].hand()[0];
    assert!(!card.is_unknown(), "seat {} holds an unrevealed hand", seat);
    card
}

/// One two-player round where both seats always play the first card in hand.
///
/// `dealt` is the agent's hand, `opening` is the human's first claim and
/// `revealed` is the human's hand as seen once it reaches the agent.
fn play_round(state: &mut GameState, dealt: &[Card], opening: Card, revealed: &[Card]) {
    state.deal_known(dealt.iter().copied()).unwrap();
    assert_eq!(state.phase(), Phase::Playing);
    assert_eq!(state.children().len(), 10);

    state.apply_move(&[dealt[0]], AGENT_SEAT, Redeal::Deferred).unwrap();
    state.apply_move(&[opening], HUMAN, Redeal::Deferred).unwrap();

    // The human's unseen hand rotated to the agent
    assert_eq!(state.players()[AGENT_SEAT].unknown_count(), 9);
    assert!(state.children().is_empty());
    state.resolve_unknowns(AGENT_SEAT, revealed).unwrap();

    for _ in 1..10 {
        assert!(!state.children().is_empty());
        let agent = first_known(state, AGENT_SEAT);
        let human = first_known(state, HUMAN);
        state.apply_move(&[agent], AGENT_SEAT, Redeal::Deferred).unwrap();
        state.apply_move(&[human], HUMAN, Redeal::Deferred).unwrap();
    }
}

#[test]
fn test_known_game_to_pudding_tie_break() {
    let dealt = cards("T T T T S S S S D D");
    let revealed = cards("3M 1M W 2N 3M P P P 1N");
    let opening: Card = "2M".parse().unwrap();

    let mut state = GameState::new(2).unwrap();

    // Agent: T T S S D, 3M W 1N 3M, one pudding = 5 + 1 + 3, maki 6 wins
    // Human: T T S S D, 2M 1M 2N, two puddings = 5 + 1 + 2, maki 3 second
    play_round(&mut state, &dealt, opening, &revealed);
    assert_eq!(state.round(), 2);
    assert_eq!(state.phase(), Phase::Dealing);
    assert_eq!(state.players()[AGENT_SEAT].score(), 15);
    assert_eq!(state.players()[HUMAN].score(), 11);
    assert_eq!(state.players()[AGENT_SEAT].field(), &[Card::Pudding]);
    assert_eq!(state.players()[HUMAN].field(), &[Card::Pudding, Card::Pudding]);
    assert!(state.terminal_ranking().is_empty());

    play_round(&mut state, &dealt, opening, &revealed);
    assert_eq!(state.round(), 3);
    assert_eq!(state.players()[AGENT_SEAT].score(), 30);
    assert_eq!(state.players()[HUMAN].score(), 22);

    play_round(&mut state, &dealt, opening, &revealed);
    assert_eq!(state.phase(), Phase::Terminal);

    // Puddings 3 vs 6: -6 and +6 leave both on 39
    assert_eq!(state.players()[AGENT_SEAT].score(), 39);
    assert_eq!(state.players()[HUMAN].score(), 39);
    assert_eq!(state.terminal_ranking(), vec![HUMAN]);
    assert!(state.children().is_empty());

    // Three rounds of draws by identity
    let deck = state.deck();
    assert_eq!(deck.count(Card::Tempura), 14 - 12);
    assert_eq!(deck.count(Card::Maki(3)), 8 - 6);
    assert_eq!(deck.count(Card::Maki(2)), 12 - 3);
    assert_eq!(deck.count(Card::Pudding), 10 - 9);
    assert_eq!(deck.len(), 108 - 60);
}

#[test]
fn test_driver_retries_exhausted_known_card() {
    let mut state = GameState::new(3).unwrap();
    let mut source = cards("C C C C C W W W W W").into_iter();

    let mut rejected = Vec::new();
    while state.phase() == Phase::Dealing {
        let card = source.next().expect("source ran dry");
        if let Err(e) = state.deal_known_card(card) {
            assert_eq!(e, EngineError::CardNotInDeck(Card::Chopsticks));
            rejected.push(card);
        }
    }

    assert_eq!(rejected, vec![Card::Chopsticks]);
    assert_eq!(state.players()[AGENT_SEAT].hand_len(), 9);
    assert_eq!(state.deck().count(Card::Chopsticks), 0);
    assert_eq!(state.players()[2].unknown_count(), 9);
}

#[test]
fn test_chopsticks_double_play_from_driver() {
    let mut state = GameState::new(2).unwrap();
    state.deal_known(cards("C W 3N T T S S D D P")).unwrap();

    state.apply_move(&[Card::Chopsticks], AGENT_SEAT, Redeal::Deferred).unwrap();
    state.apply_move(&[Card::Tempura], HUMAN, Redeal::Deferred).unwrap();
    state.resolve_unknowns(AGENT_SEAT, &cards("W 3N 1N 1N 2N 2N 2M 2M 3M")).unwrap();

    // 9 singles plus 9 * 8 ordered pairs
    assert_eq!(state.children().len(), 9 + 72);

    state
        .apply_move(&[Card::Wasabi, Card::Nigiri(3)], AGENT_SEAT, Redeal::Deferred)
        .unwrap();
    let agent = &state.players()[AGENT_SEAT];
    assert_eq!(agent.field(), &[Card::Wasabi, Card::Nigiri(3)]);
    assert_eq!(agent.hand_len(), 8);
    assert!(agent.hand().contains(&Card::Chopsticks));

    // The human has not moved yet, so the ply is still open
    assert_eq!(
        state.apply_move(&[Card::Maki(2)], AGENT_SEAT, Redeal::Deferred),
        Err(EngineError::AlreadyMoved(AGENT_SEAT))
    );
}

#[test]
fn test_snapshot_survives_json() {
    let mut state = GameState::new(4).unwrap();
    state.deal_known(cards("T S D 1M 2M 3M 1N P")).unwrap();
    state.apply_move(&[Card::Pudding], AGENT_SEAT, Redeal::Deferred).unwrap();

    let json = serde_json::to_string(&state).unwrap();
    let back: GameState = serde_json::from_str(&json).unwrap();

    assert_eq!(back, state);
    assert!(json.contains("\"?\""));
    assert!(json.contains("\"playing\""));
}
