//! Horizontal bar chart of dominance rankings.

use std::fmt::Write;

use crate::models::WeightedCredit;

pub const DEFAULT_CHART_WIDTH: usize = 50;

const BAR: char = '█';

/// One bar per team in the given order, scaled so 100 fills `width` cells.
pub fn render_bar_chart(rankings: &[WeightedCredit], width: usize) -> String {
    let name_width = rankings
        .iter()
        .map(|r| r.team.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for ranking in rankings {
        let bar: String = std::iter::repeat(BAR)
            .take(bar_length(ranking.dominance_ranking, width))
            .collect();
        let _ = writeln!(
            out,
            "{:<name_width$} │{:<width$}│ {:>6.2}",
            ranking.team,
            bar,
            ranking.dominance_ranking,
            name_width = name_width,
            width = width,
        );
    }
    out
}

fn bar_length(ranking: f64, width: usize) -> usize {
    let cells = (ranking.clamp(0.0, 100.0) / 100.0 * width as f64).round();
    cells as usize
}
