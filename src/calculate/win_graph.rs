//! Conference win graph.
//!
//! Each team points at the distinct teams it has beaten. Only completed
//! conference games hosted by the selected conference are considered.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::{GameRecord, TeamStats};

/// Per-team win records for one conference, in deterministic team order.
#[derive(Debug, Clone, Default)]
pub struct WinGraph {
    teams: Vec<TeamStats>,
    index: HashMap<String, usize>,
    games_considered: usize,
    undecided_games: usize,
}

impl WinGraph {
    /// Build the graph for `conference` from a season's games.
    ///
    /// Team order is every home team in game order, then every away team,
    /// keeping the first occurrence. Tied and unscored games register both
    /// teams but award no win.
    pub fn build(games: &[GameRecord], conference: &str) -> Self {
        let scored: Vec<&GameRecord> = games.iter().filter(|g| g.counts_for(conference)).collect();

        let mut graph = WinGraph {
            games_considered: scored.len(),
            ..Default::default()
        };

        let participants = scored
            .iter()
            .map(|g| g.home_team.as_str())
            .chain(scored.iter().map(|g| g.away_team.as_str()));
        for team in participants {
            graph.insert_team(team);
        }

        for game in &scored {
            let Some((winner, loser)) = game.winner_loser() else {
                warn!(
                    "No winner for {} vs {} on {} ({:?}), skipping",
                    game.home_team,
                    game.away_team,
                    game.start_date,
                    game.outcome()
                );
                graph.undecided_games += 1;
                continue;
            };

            if let Some(&idx) = graph.index.get(winner) {
                graph.teams[idx].record_win(loser, game.score_line(), game.start_date.clone());
            }
        }

        debug!(
            "Built win graph for {}: {} teams, {} games, {} undecided",
            conference,
            graph.teams.len(),
            graph.games_considered,
            graph.undecided_games
        );

        graph
    }

    fn insert_team(&mut self, team: &str) {
        if !self.index.contains_key(team) {
            self.index.insert(team.to_string(), self.teams.len());
            self.teams.push(TeamStats::new(team));
        }
    }

    /// Teams in graph order.
    pub fn teams(&self) -> &[TeamStats] {
        &self.teams
    }

    pub fn get(&self, team: &str) -> Option<&TeamStats> {
        self.index.get(team).map(|&idx| &self.teams[idx])
    }

    /// Wins for `team`. A team absent from the graph contributes zero.
    pub fn wins_of(&self, team: &str) -> u32 {
        self.get(team).map_or(0, |s| s.wins)
    }

    /// Teams beaten by `team`. A team absent from the graph has beaten no one.
    pub fn defeated_by<'a>(&'a self, team: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.get(team)
            .into_iter()
            .flat_map(|s| s.defeated.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Completed conference games that fed the graph.
    pub fn games_considered(&self) -> usize {
        self.games_considered
    }

    /// Games among those that were tied or missing a score.
    pub fn undecided_games(&self) -> usize {
        self.undecided_games
    }
}
