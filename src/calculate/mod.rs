//! Conference dominance calculation engine.
//!
//! Computes rankings from a season's game list:
//! - Win graph per conference (wins and distinct beaten opponents)
//! - Weighted credit two hops past direct wins
//! - Min-max normalization into a 0-100 dominance ranking
//!
//! Every function here is pure. Callers pass the game snapshot in and get a
//! fresh result back; nothing is cached between calls.

mod credit;
mod normalize;
mod win_graph;

pub use credit::propagate_credit;
pub use normalize::normalize_rankings;
pub use win_graph::WinGraph;

use std::collections::HashSet;

use tracing::debug;

use crate::models::{ConferenceReport, GameRecord, WeightedCredit};

/// Conferences hosting at least one conference game, in order of first appearance.
pub fn list_conferences(games: &[GameRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    games
        .iter()
        .filter(|g| g.is_conference_game)
        .filter_map(|g| g.home_conference.as_deref())
        .filter(|c| !c.is_empty())
        .filter(|c| seen.insert(*c))
        .map(str::to_string)
        .collect()
}

/// Rank every team in `conference`, highest dominance first.
///
/// An unknown conference yields an empty ranking.
pub fn analyze(games: &[GameRecord], conference: &str) -> Vec<WeightedCredit> {
    analyze_report(games, conference).rankings
}

/// Rank a conference and report how many games fed the ranking.
pub fn analyze_report(games: &[GameRecord], conference: &str) -> ConferenceReport {
    let graph = WinGraph::build(games, conference);
    let rankings = normalize_rankings(propagate_credit(&graph));

    debug!(
        "Ranked {} teams in {} from {} games",
        rankings.len(),
        conference,
        graph.games_considered()
    );

    ConferenceReport {
        conference: conference.to_string(),
        games_considered: graph.games_considered(),
        undecided_games: graph.undecided_games(),
        rankings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn game(conf: &str, home: &str, away: &str, hp: u32, ap: u32) -> GameRecord {
        GameRecord::conference_result(conf, home, away, hp, ap, "2024-11-02T20:00:00.000Z")
    }

    fn ranking_of(rankings: &[WeightedCredit], team: &str) -> f64 {
        rankings
            .iter()
            .find(|r| r.team == team)
            .map(|r| r.dominance_ranking)
            .unwrap()
    }

    #[test]
    fn test_analyze_empty() {
        assert!(analyze(&[], "ACC").is_empty());
    }

    #[test]
    fn test_analyze_unknown_conference() {
        let games = vec![game("SEC", "LSU", "Ole Miss", 29, 26)];
        let report = analyze_report(&games, "Pac-12");

        assert!(report.is_empty());
        assert_eq!(report.games_considered, 0);
    }

    #[test]
    fn test_analyze_three_team_example() {
        let games = vec![
            game("ACC", "A", "B", 45, 10),
            game("ACC", "B", "C", 20, 17),
            game("ACC", "A", "C", 30, 0),
        ];

        let rankings = analyze(&games, "ACC");
        let teams: Vec<&str> = rankings.iter().map(|r| r.team.as_str()).collect();

        assert_eq!(teams, vec!["A", "B", "C"]);
        assert_eq!(rankings[0].total_credit, 4.5);
        assert_eq!(rankings[1].total_credit, 2.0);
        assert_eq!(rankings[2].total_credit, 0.0);
        assert_eq!(ranking_of(&rankings, "A"), 100.0);
        assert!((ranking_of(&rankings, "B") - 44.44).abs() < 0.01);
        assert_eq!(ranking_of(&rankings, "C"), 0.0);

        let a = rankings[0].details.as_ref().unwrap();
        assert_eq!(a.wins, 2);
        assert_eq!(a.defeated, vec!["B".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_only_tied_game_ranks_both_100() {
        let games = vec![game("MAC", "Ohio", "Toledo", 14, 14)];
        let report = analyze_report(&games, "MAC");

        assert_eq!(report.undecided_games, 1);
        assert_eq!(report.rankings.len(), 2);
        assert!(report.rankings.iter().all(|r| r.dominance_ranking == 100.0));
    }

    #[test]
    fn test_more_direct_wins_rank_higher() {
        // Both winners beat teams with no wins, so only direct credit differs.
        let games = vec![
            game("MWC", "Boise State", "Nevada", 28, 21),
            game("MWC", "Boise State", "Utah State", 56, 14),
            game("MWC", "UNLV", "Hawaii", 41, 34),
        ];

        let rankings = analyze(&games, "MWC");
        assert!(ranking_of(&rankings, "Boise State") >= ranking_of(&rankings, "UNLV"));
        assert!(ranking_of(&rankings, "UNLV") > ranking_of(&rankings, "Nevada"));
    }

    #[test]
    fn test_bounds_hold() {
        let games = vec![
            game("SEC", "Georgia", "Texas", 30, 15),
            game("SEC", "Texas", "Georgia", 22, 19),
            game("SEC", "Texas", "Texas A&M", 17, 7),
            game("SEC", "Texas A&M", "LSU", 38, 23),
            game("SEC", "LSU", "Ole Miss", 29, 26),
            game("SEC", "Ole Miss", "Georgia", 28, 10),
        ];

        let rankings = analyze(&games, "SEC");
        assert!(rankings
            .iter()
            .all(|r| (0.0..=100.0).contains(&r.dominance_ranking)));
        assert!(rankings.iter().any(|r| r.dominance_ranking == 100.0));
        assert!(rankings.iter().any(|r| r.dominance_ranking == 0.0));
        assert!(rankings
            .windows(2)
            .all(|w| w[0].dominance_ranking >= w[1].dominance_ranking));
    }

    #[test]
    fn test_double_counted_third_level() {
        // T1 and T2 both beat Y; Y has one win over W. X beats T1 and T2.
        let games = vec![
            game("AAC", "Y", "W", 24, 17),
            game("AAC", "T1", "Y", 31, 28),
            game("AAC", "T2", "Y", 20, 13),
            game("AAC", "X", "T1", 27, 3),
            game("AAC", "X", "T2", 35, 10),
        ];

        let rankings = analyze(&games, "AAC");
        let x = rankings.iter().find(|r| r.team == "X").unwrap();

        // Y's single win reaches X twice: 0.25 * (1 + 1)
        assert_eq!(x.third_level_credit, 0.5);
        assert_eq!(x.total_credit, 4.0 + 1.0 + 0.5);
    }

    #[test]
    fn test_analyze_idempotent() {
        let games = vec![
            game("Big Ten", "Oregon", "Ohio State", 32, 31),
            game("Big Ten", "Ohio State", "Penn State", 20, 13),
            game("Big Ten", "Penn State", "USC", 33, 30),
        ];

        let first = analyze(&games, "Big Ten");
        let second = analyze(&games, "Big Ten");
        assert_eq!(first, second);
    }

    #[test]
    fn test_list_conferences() {
        let mut non_conf = game("Independent", "Notre Dame", "Navy", 51, 14);
        non_conf.is_conference_game = false;
        let mut missing = game("", "Army", "Air Force", 20, 3);
        missing.home_conference = None;

        let games = vec![
            game("SEC", "Alabama", "Georgia", 41, 34),
            non_conf,
            game("ACC", "Clemson", "Virginia Tech", 24, 14),
            missing,
            game("SEC", "Tennessee", "Florida", 23, 17),
            game("", "Nowhere", "Elsewhere", 1, 0),
        ];

        assert_eq!(list_conferences(&games), vec!["SEC", "ACC"]);
    }
}
