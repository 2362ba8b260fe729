// Copyright 2025 Linebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Horizontal bar-chart layout and number formatting.

/// Glyph used for the filled portion of a bar.
pub const FILLED: char = '█';

/// Glyph used for the empty portion of a bar.
pub const EMPTY: char = '░';

/// Format a value with one decimal digit and a magnitude suffix.
///
/// Values of a million and above render as `X.YM`, a thousand and
/// above as `X.Yk`, everything else plain. `unit` is appended verbatim.
pub fn format_value(value: f64, unit: &str) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M{unit}", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}k{unit}", value / 1_000.0)
    } else {
        format!("{value:.1}{unit}")
    }
}

/// Render a horizontal bar chart.
///
/// Entries are sorted descending by value. Each row carries the label
/// padded to the widest label, a bar scaled against the maximum value,
/// and the formatted value right-aligned. `width` is the target total
/// row width; the bar gets whatever remains after labels, values and a
/// fixed 4-character gutter.
pub fn horizontal_bar_chart(
    data: &[(String, f64)],
    title: &str,
    unit: &str,
    width: usize,
) -> String {
    if data.is_empty() {
        return format!("{title}\n(No data)");
    }

    let mut entries: Vec<&(String, f64)> = data.iter().collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));

    let max_value = entries[0].1;
    // Widths are in characters, not bytes, so non-ASCII labels line up.
    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let value_width = entries
        .iter()
        .map(|(_, value)| format_value(*value, unit).chars().count())
        .max()
        .unwrap_or(0);
    let bar_width = width.saturating_sub(label_width + value_width + 4);

    let mut lines = vec![title.to_string(), "─".repeat(width)];
    for (label, value) in entries {
        lines.push(format!(
            "{label:<label_width$} {bar} {value:>value_width$}",
            bar = bar(*value, max_value, bar_width),
            value = format_value(*value, unit),
        ));
    }
    lines.join("\n")
}

/// Build one bar of `bar_width` glyphs, `floor(value/max * width)` of
/// them filled. An all-zero dataset renders an empty bar.
pub fn bar(value: f64, max_value: f64, bar_width: usize) -> String {
    let filled = if max_value > 0.0 {
        (((value / max_value) * bar_width as f64) as usize).min(bar_width)
    } else {
        0
    };
    let mut bar = String::with_capacity(bar_width);
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar.extend(std::iter::repeat(EMPTY).take(bar_width - filled));
    bar
}
