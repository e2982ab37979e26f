//! Conference-scoped team records.

use serde::{Deserialize, Serialize};

/// One win in a team's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Team that lost
    pub opponent: String,

    /// Final score as "home-away"
    pub score: String,

    /// Kickoff timestamp as reported by the provider
    pub date: String,
}

/// Win record for one team within a conference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub team: String,

    pub wins: u32,

    /// Distinct teams beaten at least once, in order of first win. Repeat
    /// wins only show in `wins`.
    pub defeated: Vec<String>,

    /// Wins in processing order
    pub games: Vec<GameSummary>,
}

impl TeamStats {
    /// Create an empty record.
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            ..Default::default()
        }
    }

    /// Record a win over `opponent`.
    pub fn record_win(&mut self, opponent: &str, score: String, date: String) {
        self.wins += 1;
        if !self.defeated.iter().any(|d| d == opponent) {
            self.defeated.push(opponent.to_string());
        }
        self.games.push(GameSummary {
            opponent: opponent.to_string(),
            score,
            date,
        });
    }
}
