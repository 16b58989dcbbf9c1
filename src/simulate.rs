//! Headless simulator - full random games without any driver
//!
//! Every seat plays uniformly random legal moves and every round is dealt at
//! random. Batches run on a dedicated rayon pool; each game gets its own
//! `SmallRng` seeded from the batch seed and the game index, so a seeded batch
//! gives the same results whatever the worker count.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::game_state::GameState;

/// Outcome of one simulated game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winners: Vec<usize>,
    pub scores: Vec<i32>,
    pub puddings: Vec<usize>,
    pub rounds: u8,
}

/// Aggregate statistics over a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStats {
    pub player_count: usize,
    pub games_played: usize,
    /// Games each seat won outright or shared
    pub wins: Vec<usize>,
    /// Games each seat shared the win with another seat
    pub shared_wins: Vec<usize>,
    pub average_scores: Vec<f64>,
    pub total_time_ms: f64,
    pub games_per_second: f64,
}

/// Play one game from a fresh deal to the end of the final round
pub fn run_game<R: Rng>(player_count: usize, rng: &mut R) -> Result<GameResult> {
    let mut state = GameState::new(player_count)?;
    state.deal_random(rng)?;

    while !state.is_terminal() {
        state = state.random_next_state(rng);
    }

    let players = state.players();
    Ok(GameResult {
        winners: state.winners(),
        scores: players.iter().map(|p| p.score()).collect(),
        puddings: players.iter().map(|p| p.num_puddings()).collect(),
        rounds: state.round(),
    })
}

/// Run `config.games` independent games in parallel
pub fn run_batch(config: &SimulationConfig) -> std::result::Result<BatchStats, SimulationError> {
    config.validate()?;
    let base_seed = config.seed.unwrap_or_else(rand::random);
    let player_count = config.player_count;

    tracing::info!(
        games = config.games,
        players = player_count,
        workers = config.num_workers,
        seed = base_seed,
        "starting batch"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_workers)
        .build()?;

    let start = Instant::now();
    let results: Vec<GameResult> = pool.install(|| {
        (0..config.games)
            .into_par_iter()
            .map(|i| {
                let mut rng = SmallRng::seed_from_u64(base_seed.wrapping_add(i as u64));
                run_game(player_count, &mut rng)
            })
            .collect::<Result<Vec<_>>>()
    })?;
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;

    let stats = summarize(player_count, &results, total_ms);
    tracing::info!(
        games = stats.games_played,
        ms = stats.total_time_ms,
        games_per_second = stats.games_per_second,
        "batch finished"
    );
    Ok(stats)
}

fn summarize(player_count: usize, results: &[GameResult], total_ms: f64) -> BatchStats {
    let mut wins = vec![0usize; player_count];
    let mut shared_wins = vec![0usize; player_count];
    let mut score_totals = vec![0i64; player_count];

    for result in results {
        for &seat in &result.winners {
            wins[seat] += 1;
            if result.winners.len() > 1 {
                shared_wins[seat] += 1;
            }
        }
        for (total, &score) in score_totals.iter_mut().zip(&result.scores) {
            *total += score as i64;
        }
    }

    let games_played = results.len();
    let average_scores = score_totals
        .iter()
        .map(|&total| {
            if games_played > 0 {
                total as f64 / games_played as f64
            } else {
                0.0
            }
        })
        .collect();
    let games_per_second = if total_ms > 0.0 {
        games_played as f64 / (total_ms / 1000.0)
    } else {
        0.0
    };

    BatchStats {
        player_count,
        games_played,
        wins,
        shared_wins,
        average_scores,
        total_time_ms: total_ms,
        games_per_second,
    }
}
