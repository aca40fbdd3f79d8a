use crate::metrics::{LatencyAggregator, LatencyKind, SeriesStats, StatsSnapshot};

pub const DELIMITED_HEADER: &str = "Type,Latency (ms)";

/// Magnitudes at or above this are written in exponent form.
const EXPONENT_ABOVE: f64 = 1e21;
/// Non-zero magnitudes below this are written in exponent form.
const EXPONENT_BELOW: f64 = 1e-6;

/// Formats a sample the way a browser prints a number: `Infinity`, `NaN`,
/// and `1e+21` style exponents outside the plain decimal range.
fn format_sample(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    let magnitude = value.abs();
    if magnitude == 0.0 {
        return "0".to_owned();
    }
    if magnitude >= EXPONENT_ABOVE || magnitude < EXPONENT_BELOW {
        let text = format!("{:e}", value);
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            Some(_) | None => text,
        };
    }
    value.to_string()
}

/// Renders `Type,Latency (ms)` followed by one row per retained sample,
/// click rows before display rows.
#[must_use]
pub fn render_delimited(aggregator: &LatencyAggregator) -> String {
    let rows = aggregator
        .series(LatencyKind::Click)
        .len()
        .saturating_add(aggregator.series(LatencyKind::Display).len());
    let mut output = String::with_capacity(rows.saturating_add(1).saturating_mul(16));
    output.push_str(DELIMITED_HEADER);
    output.push('\n');
    for kind in [LatencyKind::Click, LatencyKind::Display] {
        for value in aggregator.series(kind).iter() {
            output.push_str(kind.label());
            output.push(',');
            output.push_str(&format_sample(value));
            output.push('\n');
        }
    }
    output
}

#[must_use]
pub fn render_report(snapshot: &StatsSnapshot) -> String {
    let mut lines = Vec::with_capacity(14);
    lines.push("=== LATENCY STATISTICS ===".to_owned());
    lines.push(String::new());
    push_section(&mut lines, "CLICK LATENCY:", &snapshot.click);
    lines.push(String::new());
    push_section(&mut lines, "DISPLAY LATENCY:", &snapshot.display);

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn push_section(lines: &mut Vec<String>, title: &str, stats: &SeriesStats) {
    lines.push(title.to_owned());
    lines.push(format!("  Count: {}", stats.count));
    lines.push(format!("  Average: {:.2} ms", stats.avg));
    lines.push(format!("  Minimum: {:.2} ms", stats.min));
    lines.push(format!("  Maximum: {:.2} ms", stats.max));
    lines.push(format!("  Last: {:.2} ms", stats.last));
}
