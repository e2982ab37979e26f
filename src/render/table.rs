//! Detailed credit breakdown table.

use std::fmt::Write;

use crate::models::WeightedCredit;

const HEADERS: [&str; 7] = [
    "Team",
    "Direct Wins (2pts)",
    "2nd Level (0.5pts)",
    "3rd Level (0.25pts)",
    "Total Score",
    "Ranking",
    "Defeated",
];

/// Plain-text table with one row per team, columns padded to fit.
pub fn render_detail_table(rankings: &[WeightedCredit]) -> String {
    let rows: Vec<[String; 7]> = rankings.iter().map(row).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in &rows {
        write_row(&mut out, row, &widths);
    }
    out
}

fn row(credit: &WeightedCredit) -> [String; 7] {
    let (wins, defeated) = match &credit.details {
        Some(details) => (details.wins.to_string(), details.defeated.join(", ")),
        None => (format!("{}", credit.direct_credit / 2.0), String::new()),
    };

    [
        credit.team.clone(),
        format!("{} ({:.1})", wins, credit.direct_credit),
        format!("{:.2}", credit.second_level_credit),
        format!("{:.2}", credit.third_level_credit),
        format!("{:.2}", credit.total_credit),
        format!("{:.2}", credit.dominance_ranking),
        defeated,
    ]
}

fn write_row(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}
