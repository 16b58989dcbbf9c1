//! Simulation configuration

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::game_state::{MAX_PLAYERS, MIN_PLAYERS};

/// Settings for a headless batch of random games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seats per game (2-5)
    pub player_count: usize,
    pub games: usize,
    /// Base seed; game `i` is seeded with `seed + i`. Random when unset.
    pub seed: Option<u64>,
    /// Worker threads for the batch
    pub num_workers: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            games: 1000,
            seed: None,
            num_workers: num_cpus::get(),
        }
    }
}

impl SimulationConfig {
    /// Small reproducible batch for smoke runs
    pub fn quick() -> Self {
        Self {
            games: 50,
            seed: Some(0),
            num_workers: 1,
            ..Default::default()
        }
    }

    /// Defaults overridden by `SUSHIGO_PLAYERS`, `SUSHIGO_GAMES`,
    /// `SUSHIGO_SEED` and `SUSHIGO_WORKERS`
    pub fn from_env() -> Result<Self, SimulationError> {
        let mut config = Self::default();
        if let Some(players) = env_number("SUSHIGO_PLAYERS")? {
            config.player_count = players as usize;
        }
        if let Some(games) = env_number("SUSHIGO_GAMES")? {
            config.games = games as usize;
        }
        if let Some(seed) = env_number("SUSHIGO_SEED")? {
            config.seed = Some(seed);
        }
        if let Some(workers) = env_number("SUSHIGO_WORKERS")? {
            config.num_workers = workers as usize;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(SimulationError::InvalidConfig(format!(
                "player_count must be {}-{}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, self.player_count
            )));
        }
        if self.num_workers == 0 {
            return Err(SimulationError::InvalidConfig(
                "num_workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_number(key: &str) -> Result<Option<u64>, SimulationError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SimulationError::InvalidConfig(format!("{} is not a number: {:?}", key, value))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.player_count, 4);
        assert_eq!(config.games, 1000);
        assert!(config.seed.is_none());
        assert!(config.num_workers > 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quick_preset_is_seeded() {
        let config = SimulationConfig::quick();
        assert_eq!(config.seed, Some(0));
        assert_eq!(config.player_count, 4);
        assert!(config.games < SimulationConfig::default().games);
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        for player_count in [0, 1, 6] {
            let config = SimulationConfig {
                player_count,
                ..SimulationConfig::quick()
            };
            assert!(matches!(
                config.validate(),
                Err(SimulationError::InvalidConfig(_))
            ));
        }

        let config = SimulationConfig {
            num_workers: 0,
            ..SimulationConfig::quick()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimulationConfig::quick();
        let json = serde_json::to_string(&config).unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
