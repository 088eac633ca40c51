//! Text rendering of a token's lifetime timeline.

use colored::Colorize;

use crate::commands::format_timestamp;
use crate::core::timeline::Timeline;

/// Width of the bar in characters.
pub const BAR_WIDTH: usize = 50;

/// Render the bar and its legend.
///
/// The bar spans the timeline's `min..=max`; the part before `now` is
/// drawn with `=` and the remainder with `-`, and every marker is drawn
/// as `|`.
pub fn render_timeline(timeline: &Timeline) -> String {
    let markers = timeline.markers();
    let now_column = column(timeline.elapsed_percent());

    let mut bar: Vec<char> = (0..BAR_WIDTH)
        .map(|i| if i < now_column { '=' } else { '-' })
        .collect();
    for marker in &markers {
        bar[column(marker.percent)] = '|';
    }
    let bar: String = bar.into_iter().collect();

    let mut lines = vec![format!("[{bar}]")];
    for marker in &markers {
        let label = format!("{:<4}", marker.label);
        let label = if marker.label == "now" {
            label.bold().to_string()
        } else {
            label
        };
        lines.push(format!(
            "  {label} {}  {:>3}%",
            format_timestamp(marker.timestamp),
            marker.percent
        ));
    }
    lines.join("\n")
}

fn column(percent: u8) -> usize {
    usize::from(percent.min(100)) * (BAR_WIDTH - 1) / 100
}
