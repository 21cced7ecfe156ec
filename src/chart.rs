//! Plain-text charts over the statistics history.
//!
//! Long series are thinned with a uniform stride before rendering; the final
//! point is always kept. The input slices are never modified.

use std::fmt::Write;

const BAR_WIDTH: usize = 50;

/// Indices to render for a series of `len` points, at most roughly
/// `max_points` of them, always ending at `len - 1`.
pub fn sample_indices(len: usize, max_points: usize) -> Vec<usize> {
    let max_points = max_points.max(1);
    if len <= max_points {
        return (0..len).collect();
    }
    let step = (len / max_points).max(1);
    let mut indices: Vec<usize> = (0..len).step_by(step).collect();
    if indices.last() != Some(&(len - 1)) {
        indices.push(len - 1);
    }
    indices
}

/// One labelled bar per sampled point; the label is the 1-based year.
pub fn line_chart(title: &str, series: &[u64], max_points: usize) -> String {
    let indices = sample_indices(series.len(), max_points);
    let mut out = String::new();
    let _ = writeln!(out, "{title} (showing {}/{} points)", indices.len(), series.len());
    let peak = indices.iter().map(|&i| series[i]).max().unwrap_or(0);
    for index in indices {
        let value = series[index];
        let _ = writeln!(
            out,
            "{:>6} |{} {value}",
            index + 1,
            bar(value as f64, peak as f64)
        );
    }
    out
}

pub fn bar_chart(title: &str, rows: &[(String, f64)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let peak = rows.iter().map(|(_, value)| *value).fold(0.0, f64::max);
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        let shown = if value.fract() == 0.0 {
            format!("{value:.0}")
        } else {
            format!("{value:.3}")
        };
        let _ = writeln!(
            out,
            "{label:>label_width$} |{} {shown}",
            bar(*value, peak)
        );
    }
    out
}

fn bar(value: f64, peak: f64) -> String {
    if peak <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let width = ((value / peak) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(width.max(1))
}
