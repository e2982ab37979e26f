//! Min-max normalization of total credit onto a 0-100 dominance ranking.

use crate::models::WeightedCredit;

/// Ranking given to every team when all totals are equal.
const TIED_RANKING: f64 = 100.0;

/// Assign `dominance_ranking` to each team and sort highest first.
///
/// When every team has the same total (including a lone team) all of them
/// rank 100. The sort is stable, so equal rankings keep their input order.
pub fn normalize_rankings(mut credits: Vec<WeightedCredit>) -> Vec<WeightedCredit> {
    let Some((min_credit, max_credit)) = credit_bounds(&credits) else {
        return credits;
    };

    let spread = max_credit - min_credit;
    for credit in &mut credits {
        credit.dominance_ranking = if spread == 0.0 {
            TIED_RANKING
        } else {
            100.0 * (credit.total_credit - min_credit) / spread
        };
    }

    credits.sort_by(|a, b| b.dominance_ranking.total_cmp(&a.dominance_ranking));
    credits
}

/// `(min, max)` of total credit, or `None` for an empty slice.
fn credit_bounds(credits: &[WeightedCredit]) -> Option<(f64, f64)> {
    credits.iter().map(|c| c.total_credit).fold(None, |acc, total| {
        Some(match acc {
            None => (total, total),
            Some((min, max)) => (min.min(total), max.max(total)),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credit(team: &str, direct: f64, second: f64, third: f64) -> WeightedCredit {
        WeightedCredit::new(team.to_string(), direct, second, third)
    }

    #[test]
    fn test_empty() {
        assert!(normalize_rankings(Vec::new()).is_empty());
    }

    #[test]
    fn test_single_team_ranks_100() {
        let ranked = normalize_rankings(vec![credit("Army", 0.0, 0.0, 0.0)]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].dominance_ranking, 100.0);
    }

    #[test]
    fn test_all_tied_rank_100() {
        let ranked = normalize_rankings(vec![
            credit("Navy", 2.0, 0.5, 0.0),
            credit("Tulane", 2.0, 0.0, 0.5),
        ]);
        assert!(ranked.iter().all(|c| c.dominance_ranking == 100.0));
        assert_eq!(ranked[0].team, "Navy");
    }

    #[test]
    fn test_min_max_scaling_and_order() {
        let ranked = normalize_rankings(vec![
            credit("C", 0.0, 0.0, 0.0),
            credit("B", 2.0, 0.0, 0.0),
            credit("A", 4.0, 0.5, 0.0),
        ]);

        let teams: Vec<&str> = ranked.iter().map(|c| c.team.as_str()).collect();
        assert_eq!(teams, vec!["A", "B", "C"]);
        assert_eq!(ranked[0].dominance_ranking, 100.0);
        assert!((ranked[1].dominance_ranking - 44.444).abs() < 0.01);
        assert_eq!(ranked[2].dominance_ranking, 0.0);
    }

    #[test]
    fn test_stable_among_ties() {
        let ranked = normalize_rankings(vec![
            credit("Low", 0.0, 0.0, 0.0),
            credit("First", 2.0, 0.0, 0.0),
            credit("Second", 2.0, 0.0, 0.0),
        ]);

        let teams: Vec<&str> = ranked.iter().map(|c| c.team.as_str()).collect();
        assert_eq!(teams, vec!["First", "Second", "Low"]);
    }

    #[test]
    fn test_bounds() {
        let ranked = normalize_rankings(vec![
            credit("A", 6.0, 1.5, 0.75),
            credit("B", 4.0, 0.5, 0.0),
            credit("C", 2.0, 1.0, 0.25),
            credit("D", 0.0, 0.0, 0.0),
        ]);

        assert!(ranked
            .iter()
            .all(|c| (0.0..=100.0).contains(&c.dominance_ranking)));
        assert_eq!(ranked.first().unwrap().dominance_ranking, 100.0);
        assert_eq!(ranked.last().unwrap().dominance_ranking, 0.0);
    }
}
