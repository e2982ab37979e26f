//! Weighted credit and dominance ranking models.

use serde::{Deserialize, Serialize};

use super::GameSummary;

/// Weight applied to a team's own wins.
pub const DIRECT_WEIGHT: f64 = 2.0;

/// Weight applied to wins of teams it beat.
pub const SECOND_LEVEL_WEIGHT: f64 = 0.5;

/// Weight applied to wins of teams beaten by teams it beat.
pub const THIRD_LEVEL_WEIGHT: f64 = 0.25;

/// Win record carried alongside a ranking row for the detail view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamDetails {
    pub wins: u32,
    pub defeated: Vec<String>,
    pub games: Vec<GameSummary>,
}

/// Credit breakdown and ranking for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCredit {
    pub team: String,
    pub direct_credit: f64,
    pub second_level_credit: f64,
    pub third_level_credit: f64,
    pub total_credit: f64,

    /// Min-max normalized total credit in [0, 100]
    pub dominance_ranking: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<TeamDetails>,
}

impl WeightedCredit {
    /// Build a row from its three credit levels. Ranking starts at zero.
    pub fn new(
        team: String,
        direct_credit: f64,
        second_level_credit: f64,
        third_level_credit: f64,
    ) -> Self {
        Self {
            team,
            direct_credit,
            second_level_credit,
            third_level_credit,
            total_credit: direct_credit + second_level_credit + third_level_credit,
            dominance_ranking: 0.0,
            details: None,
        }
    }

    pub fn with_details(mut self, details: TeamDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Drop the per-team detail payload.
    pub fn without_details(mut self) -> Self {
        self.details = None;
        self
    }
}

/// Ranking for one conference, with the counts behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConferenceReport {
    pub conference: String,

    /// Completed conference games hosted by this conference
    pub games_considered: usize,

    /// Games among those that were tied or missing a score
    pub undecided_games: usize,

    /// Sorted by `dominance_ranking`, highest first
    pub rankings: Vec<WeightedCredit>,
}

impl ConferenceReport {
    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }
}
