//! Scoring engine - end-of-round scoring over every seat's field
//!
//! Field cards are scored per player, then maki majorities are compared
//! across the table, and in the final round puddings are compared too. All
//! splits use truncating integer division; the remainder is dropped.

use smallvec::SmallVec;

use crate::card::Card;
use crate::game_state::{FINAL_ROUND, MAX_PLAYERS};
use crate::player::Player;

/// Dumpling points by count within a group of five
const DUMPLING_POINTS: [i32; 5] = [0, 1, 3, 6, 10];
/// Points for each complete group of five dumplings
const DUMPLING_GROUP_POINTS: i32 = 15;

const SASHIMI_SET_POINTS: i32 = 10;
const TEMPURA_PAIR_POINTS: i32 = 5;
const WASABI_MULTIPLIER: i32 = 3;

const MAKI_FIRST_POINTS: i32 = 6;
const MAKI_SECOND_POINTS: i32 = 3;
/// Fewest rolls that can win a maki award
const MAKI_BASELINE: u32 = 1;

const PUDDING_POINTS: i32 = 6;

pub type Awards = SmallVec<[i32; MAX_PLAYERS]>;

/// Score a round's worth of cards, in play order
pub fn score_field(field: &[Card]) -> i32 {
    let mut wasabi = 0u32;
    let mut sashimi = 0usize;
    let mut tempura = 0usize;
    let mut dumplings = 0usize;
    let mut score = 0i32;

    for &card in field {
        match card {
            Card::Wasabi => wasabi += 1,
            Card::Nigiri(value) => {
                if wasabi > 0 {
                    score += value as i32 * WASABI_MULTIPLIER;
                    wasabi -= 1;
                } else {
                    score += value as i32;
                }
            }
            Card::Sashimi => sashimi += 1,
            Card::Tempura => tempura += 1,
            Card::Dumpling => dumplings += 1,
            _ => {}
        }
    }

    score += SASHIMI_SET_POINTS * (sashimi / 3) as i32;
    score += TEMPURA_PAIR_POINTS * (tempura / 2) as i32;
    score += dumpling_points(dumplings);
    score
}

/// 15 per full group of five, remainder looked up in the tier table
pub fn dumpling_points(count: usize) -> i32 {
    DUMPLING_GROUP_POINTS * (count / 5) as i32 + DUMPLING_POINTS[count % 5]
}

/// Maki majority points for each seat given its roll count.
///
/// A single leader takes 6 and the runners-up split 3; a tied lead splits 6
/// and nobody gets second. Seats below `MAKI_BASELINE` never place.
pub fn maki_awards(rolls: &[u32]) -> Awards {
    let mut awards: Awards = SmallVec::from_elem(0, rolls.len());

    let first = match rolls.iter().copied().filter(|&r| r >= MAKI_BASELINE).max() {
        Some(first) => first,
        None => return awards,
    };
    let leaders = rolls.iter().filter(|&&r| r == first).count() as i32;

    if leaders > 1 {
        for (award, &r) in awards.iter_mut().zip(rolls) {
            if r == first {
                *award = MAKI_FIRST_POINTS / leaders;
            }
        }
        return awards;
    }

    let second = rolls
        .iter()
        .copied()
        .filter(|&r| r >= MAKI_BASELINE && r < first)
        .max();
    let runners_up = second.map_or(0, |s| rolls.iter().filter(|&&r| r == s).count() as i32);

    for (award, &r) in awards.iter_mut().zip(rolls) {
        if r == first {
            *award = MAKI_FIRST_POINTS;
        } else if Some(r) == second {
            *award = MAKI_SECOND_POINTS / runners_up;
        }
    }
    awards
}

/// Final-round pudding points: the most split +6, the fewest split -6.
///
/// When everyone is tied both rules hit the whole table, including in a
/// two-player game.
pub fn pudding_awards(puddings: &[usize]) -> Awards {
    let mut awards: Awards = SmallVec::from_elem(0, puddings.len());
    let (most, least) = match (puddings.iter().max(), puddings.iter().min()) {
        (Some(&most), Some(&least)) => (most, least),
        _ => return awards,
    };

    let most_count = puddings.iter().filter(|&&p| p == most).count() as i32;
    let least_count = puddings.iter().filter(|&&p| p == least).count() as i32;

    for (award, &p) in awards.iter_mut().zip(puddings) {
        if p == most {
            *award += PUDDING_POINTS / most_count;
        }
        if p == least {
            *award += -PUDDING_POINTS / least_count;
        }
    }
    awards
}

/// Apply one round boundary to every seat's running score
pub fn update_scores(players: &mut [Player], current_round: u8) {
    for player in players.iter_mut() {
        let points = score_field(player.field());
        player.add_score(points);
    }

    let rolls: SmallVec<[u32; MAX_PLAYERS]> = players.iter().map(Player::num_maki).collect();
    for (player, award) in players.iter_mut().zip(maki_awards(&rolls)) {
        player.add_score(award);
    }

    if current_round == FINAL_ROUND {
        let puddings: SmallVec<[usize; MAX_PLAYERS]> =
            players.iter().map(Player::num_puddings).collect();
        for (player, award) in players.iter_mut().zip(pudding_awards(&puddings)) {
            player.add_score(award);
        }
    }

    tracing::debug!(
        round = current_round,
        scores = ?players.iter().map(Player::score).collect::<Vec<_>>(),
        "scored round"
    );
}
