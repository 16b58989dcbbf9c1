//! Sushi Go engine - imperfect-information game state for tree search
//!
//! `GameState` tracks one seat's true hand (the agent, seat 0) and stands in
//! placeholders for every card it has not seen. Search algorithms consume it
//! through the `SearchState` trait; `simulate` plays fully random games.

#![deny(clippy::all)]

pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod game_state;
pub mod player;
pub mod scoring;
pub mod search;
pub mod simulate;

pub use card::Card;
pub use config::SimulationConfig;
pub use deck::Deck;
pub use error::{EngineError, Result, SimulationError};
pub use game_state::{GameState, Phase, Redeal, AGENT_SEAT};
pub use player::Player;
pub use search::SearchState;
