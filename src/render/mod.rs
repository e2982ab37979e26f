//! Terminal rendering of conference rankings.
//!
//! Everything here formats into a `String` so the CLI decides where it goes.

mod chart;
mod table;

pub use chart::{render_bar_chart, DEFAULT_CHART_WIDTH};
pub use table::render_detail_table;

use std::fmt::Write;

use crate::models::ConferenceReport;

/// Numbered conference list, one per line.
pub fn render_conference_list(conferences: &[String]) -> String {
    let mut out = String::new();
    if conferences.is_empty() {
        out.push_str("No conferences found.\n");
        return out;
    }

    let _ = writeln!(out, "=== Conferences ({}) ===", conferences.len());
    let pad = conferences.len().to_string().len();
    for (i, conference) in conferences.iter().enumerate() {
        let _ = writeln!(out, "  {:>pad$}. {}", i + 1, conference, pad = pad);
    }
    out
}

/// Report header followed by the bar chart and, optionally, the detail table.
pub fn render_report(report: &ConferenceReport, width: usize, details: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Conference Dominance: {} ===", report.conference);
    let _ = writeln!(
        out,
        "Games considered: {}  Teams: {}",
        report.games_considered,
        report.rankings.len()
    );
    if report.undecided_games > 0 {
        let _ = writeln!(
            out,
            "Undecided games (tied or unscored): {}",
            report.undecided_games
        );
    }
    out.push('\n');

    if report.is_empty() {
        out.push_str("No completed conference games found.\n");
        return out;
    }

    out.push_str(&render_bar_chart(&report.rankings, width));
    if details {
        out.push('\n');
        out.push_str(&render_detail_table(&report.rankings));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::analyze_report;
    use crate::models::GameRecord;

    #[test]
    fn test_conference_list() {
        let out = render_conference_list(&["SEC".to_string(), "Big Ten".to_string()]);
        assert!(out.contains("Conferences (2)"));
        assert!(out.contains("1. SEC"));
        assert!(out.contains("2. Big Ten"));
    }

    #[test]
    fn test_conference_list_empty() {
        assert_eq!(render_conference_list(&[]), "No conferences found.\n");
    }

    #[test]
    fn test_report_empty() {
        let report = analyze_report(&[], "Sun Belt");
        let out = render_report(&report, 40, true);

        assert!(out.contains("Conference Dominance: Sun Belt"));
        assert!(out.contains("No completed conference games found."));
    }

    #[test]
    fn test_report_with_details() {
        let games = vec![
            GameRecord::conference_result("Sun Belt", "James Madison", "App State", 35, 14, ""),
            GameRecord::conference_result("Sun Belt", "Marshall", "Arkansas State", 24, 24, ""),
        ];
        let report = analyze_report(&games, "Sun Belt");

        let summary = render_report(&report, 40, false);
        assert!(summary.contains("James Madison"));
        assert!(summary.contains("Undecided games (tied or unscored): 1"));
        assert!(!summary.contains("Direct Wins"));

        let detailed = render_report(&report, 40, true);
        assert!(detailed.contains("Direct Wins (2pts)"));
    }
}
