//! Search contract - what a tree search needs from a game state
//!
//! The search only sees states: which seat acted, which successors it may
//! choose from, one random step, and who won.

use rand::Rng;

use crate::game_state::{GameState, AGENT_SEAT};

/// A state that an information-set search can explore.
///
/// Implementors are plain values: `children` and `random_child` return fresh
/// clones and never mutate the receiver, so branches can be explored in any
/// order or on different threads.
pub trait SearchState: Clone {
    /// Seat whose move produced this state.
    ///
    /// Simultaneous-turn games report one fixed seat.
    fn last_actor(&self) -> usize;

    /// Successor states the searching seat can choose between.
    ///
    /// Empty when the game is over or when branching further needs
    /// information the state does not have yet.
    fn children(&self) -> Vec<Self>;

    /// One random step of simulated play
    fn random_child<R: Rng>(&self, rng: &mut R) -> Self;

    /// Winning seats, empty until the game is over
    fn terminal_ranking(&self) -> Vec<usize>;

    /// Play random steps until the game has a ranking
    fn sample_rollout<R: Rng>(&self, rng: &mut R) -> Self {
        let mut state = self.random_child(rng);
        while state.terminal_ranking().is_empty() {
            state = state.random_child(rng);
        }
        state
    }
}

impl SearchState for GameState {
    fn last_actor(&self) -> usize {
        AGENT_SEAT
    }

    fn children(&self) -> Vec<Self> {
        self.legal_next_states()
    }

    fn random_child<R: Rng>(&self, rng: &mut R) -> Self {
        self.random_next_state(rng)
    }

    fn terminal_ranking(&self) -> Vec<usize> {
        self.winners()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_rollout_from_known_hand_reaches_ranking() {
        let mut rng = SmallRng::seed_from_u64(21);
        let mut state = GameState::new(4).unwrap();
        state
            .deal_known([
                Card::Tempura,
                Card::Tempura,
                Card::Sashimi,
                Card::Sashimi,
                Card::Sashimi,
                Card::Dumpling,
                Card::Chopsticks,
                Card::Pudding,
            ])
            .unwrap();

        let end = state.sample_rollout(&mut rng);

        assert!(end.is_terminal());
        assert!(!end.terminal_ranking().is_empty());
        assert!(end.terminal_ranking().iter().all(|&seat| seat < 4));
        // Rollouts never touch their source
        assert_eq!(state.players()[1].unknown_count(), 8);
        assert_eq!(state.round(), 1);
    }

    #[test]
    fn test_same_seed_same_rollout() {
        let mut state = GameState::new(3).unwrap();
        state.deal_random(&mut SmallRng::seed_from_u64(1)).unwrap();

        let a = state.sample_rollout(&mut SmallRng::seed_from_u64(99));
        let b = state.sample_rollout(&mut SmallRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_children_are_agent_moves() {
        let mut state = GameState::new(2).unwrap();
        state.deal_random(&mut SmallRng::seed_from_u64(5)).unwrap();

        assert_eq!(state.last_actor(), AGENT_SEAT);
        let children = state.children();
        assert_eq!(children.len(), 10);
        for child in &children {
            assert!(child.has_moved(AGENT_SEAT));
            assert!(child.children().is_empty());
            assert!(child.terminal_ranking().is_empty());
        }
    }
}
