//! Transitive win credit.
//!
//! Walks the win graph exactly two hops past a team's own wins:
//! - direct: the team's wins
//! - second level: wins of every team it beat
//! - third level: wins of every team beaten by a team it beat
//!
//! Third-level paths are summed per path. A team reachable through two
//! different beaten opponents has its wins counted twice.

use crate::models::{
    TeamDetails, WeightedCredit, DIRECT_WEIGHT, SECOND_LEVEL_WEIGHT, THIRD_LEVEL_WEIGHT,
};

use super::WinGraph;

/// Compute credit for every team in graph order. Rankings are left at zero.
pub fn propagate_credit(graph: &WinGraph) -> Vec<WeightedCredit> {
    graph
        .teams()
        .iter()
        .map(|stats| {
            let second_level_wins: u32 = stats
                .defeated
                .iter()
                .map(|opponent| graph.wins_of(opponent))
                .sum();

            let third_level_wins: u32 = stats
                .defeated
                .iter()
                .flat_map(|opponent| graph.defeated_by(opponent))
                .map(|second_opponent| graph.wins_of(second_opponent))
                .sum();

            WeightedCredit::new(
                stats.team.clone(),
                DIRECT_WEIGHT * stats.wins as f64,
                SECOND_LEVEL_WEIGHT * second_level_wins as f64,
                THIRD_LEVEL_WEIGHT * third_level_wins as f64,
            )
            .with_details(TeamDetails {
                wins: stats.wins,
                defeated: stats.defeated.clone(),
                games: stats.games.clone(),
            })
        })
        .collect()
}
