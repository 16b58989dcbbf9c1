//! A flat Monte Carlo driver written only against `SearchState`

use rand::rngs::SmallRng;
use rand::SeedableRng;

use sushigo_engine::card::parse_cards;
use sushigo_engine::{Card, GameState, Redeal, SearchState, AGENT_SEAT};

/// Index of the child whose rollouts the actor wins most often
fn flat_monte_carlo<S: SearchState>(root: &S, rollouts: usize, rng: &mut SmallRng) -> Option<usize> {
    let actor = root.last_actor();
    let children = root.children();

    let mut best: Option<(usize, usize)> = None;
    for (index, child) in children.iter().enumerate() {
        let wins = (0..rollouts)
            .filter(|_| child.sample_rollout(rng).terminal_ranking().contains(&actor))
            .count();
        if best.map_or(true, |(_, most)| wins > most) {
            best = Some((index, wins));
        }
    }
    best.map(|(index, _)| index)
}

fn dealt_state() -> GameState {
    let mut state = GameState::new(3).unwrap();
    state
        .deal_known(parse_cards("S S S T T D W 3N C").unwrap())
        .unwrap();
    state
}

#[test]
fn test_driver_picks_a_child_without_touching_root() {
    let root = dealt_state();
    let before = root.clone();
    let mut rng = SmallRng::seed_from_u64(3);

    let choice = flat_monte_carlo(&root, 8, &mut rng);

    assert!(choice.is_some_and(|i| i < 9));
    assert_eq!(root, before);
}

#[test]
fn test_driver_is_reproducible_with_seed() {
    let root = dealt_state();

    let a = flat_monte_carlo(&root, 6, &mut SmallRng::seed_from_u64(17));
    let b = flat_monte_carlo(&root, 6, &mut SmallRng::seed_from_u64(17));

    assert_eq!(a, b);
}

#[test]
fn test_no_choice_without_information() {
    let mut state = dealt_state();
    state.apply_move(&[Card::Sashimi], AGENT_SEAT, Redeal::Deferred).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);

    // Mid-ply
    assert_eq!(flat_monte_carlo(&state, 4, &mut rng), None);

    state.apply_move(&[Card::Pudding], 1, Redeal::Deferred).unwrap();
    state.apply_move(&[Card::Maki(2)], 2, Redeal::Deferred).unwrap();

    // Rotated into an unseen hand
    assert_eq!(state.players()[AGENT_SEAT].unknown_count(), 8);
    assert_eq!(flat_monte_carlo(&state, 4, &mut rng), None);

    // A rollout still plays the hidden game out
    let end = state.sample_rollout(&mut rng);
    assert!(end.is_terminal());
    assert!(!end.terminal_ranking().is_empty());
}

#[test]
fn test_rollout_from_mid_ply_child() {
    let root = dealt_state();
    let child = root.children().remove(0);
    let mut rng = SmallRng::seed_from_u64(8);

    let next = child.random_child(&mut rng);
    for player in next.players() {
        assert_eq!(player.field().len(), 1);
        assert_eq!(player.hand_len(), 8);
    }
    assert_eq!(next.players()[AGENT_SEAT].field(), &[Card::Sashimi]);
}
