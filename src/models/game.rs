//! Game result model.

use serde::{Deserialize, Serialize};

/// One played or scheduled matchup, as delivered by the data provider.
///
/// The provider has used both snake_case and camelCase keys over time, so
/// each field accepts either spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Provider game ID
    #[serde(default)]
    pub id: Option<u64>,

    /// Season year
    #[serde(default)]
    pub season: Option<i32>,

    /// Week of the season
    #[serde(default)]
    pub week: Option<u32>,

    /// Both teams play in the same conference
    #[serde(rename = "conference_game", alias = "conferenceGame", default)]
    pub is_conference_game: bool,

    #[serde(alias = "homeConference", default)]
    pub home_conference: Option<String>,

    #[serde(alias = "awayConference", default)]
    pub away_conference: Option<String>,

    #[serde(alias = "homeTeam")]
    pub home_team: String,

    #[serde(alias = "awayTeam")]
    pub away_team: String,

    /// Final home score, absent until the game is played
    #[serde(alias = "homePoints", default)]
    pub home_points: Option<u32>,

    /// Final away score, absent until the game is played
    #[serde(alias = "awayPoints", default)]
    pub away_points: Option<u32>,

    /// Kickoff timestamp (ISO-8601)
    #[serde(alias = "startDate", default)]
    pub start_date: String,

    #[serde(default)]
    pub completed: bool,
}

/// How a game resolves for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    /// Equal scores. No win is awarded.
    Tie,
    /// At least one score is missing. No win is awarded.
    Unscored,
}

impl GameRecord {
    /// Create a completed conference game between two teams.
    pub fn conference_result(
        conference: &str,
        home_team: &str,
        away_team: &str,
        home_points: u32,
        away_points: u32,
        start_date: &str,
    ) -> Self {
        Self {
            id: None,
            season: None,
            week: None,
            is_conference_game: true,
            home_conference: Some(conference.to_string()),
            away_conference: Some(conference.to_string()),
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home_points: Some(home_points),
            away_points: Some(away_points),
            start_date: start_date.to_string(),
            completed: true,
        }
    }

    /// Whether this record is scored for `conference`.
    pub fn counts_for(&self, conference: &str) -> bool {
        self.is_conference_game
            && self.completed
            && self.home_conference.as_deref() == Some(conference)
    }

    /// Resolve the winner by strictly greater score.
    pub fn outcome(&self) -> Outcome {
        match (self.home_points, self.away_points) {
            (Some(home), Some(away)) => match home.cmp(&away) {
                std::cmp::Ordering::Greater => Outcome::HomeWin,
                std::cmp::Ordering::Less => Outcome::AwayWin,
                std::cmp::Ordering::Equal => Outcome::Tie,
            },
            _ => Outcome::Unscored,
        }
    }

    /// `(winner, loser)` for decided games.
    pub fn winner_loser(&self) -> Option<(&str, &str)> {
        match self.outcome() {
            Outcome::HomeWin => Some((self.home_team.as_str(), self.away_team.as_str())),
            Outcome::AwayWin => Some((self.away_team.as_str(), self.home_team.as_str())),
            Outcome::Tie | Outcome::Unscored => None,
        }
    }

    /// Score as "home-away", or empty when unscored.
    pub fn score_line(&self) -> String {
        match (self.home_points, self.away_points) {
            (Some(home), Some(away)) => format!("{}-{}", home, away),
            _ => String::new(),
        }
    }
}
