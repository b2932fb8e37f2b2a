use chrono::NaiveDate;
use serde_json::{Value, json};

use crate::core::{Analysis, SeriesAnalysis};
use tally_core::{ChartConfig, Granularity, TraceStyle};

const PALETTE: [&str; 6] = [
    "#1f77b4", "#2ca02c", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];
const TREND_COLOR: &str = "#d62728";
const REFERENCE_COLOR: &str = "gray";
const SPREAD_COLOR: &str = "#ff7f0e";

/// Build the Plotly figure (`{"data": [...], "layout": {...}}`) for an analysis.
///
/// Trace order per series: values, rolling average, mean, median, standard
/// deviation band. The spread bar, when present, comes last.
#[must_use]
pub fn figure(analysis: &Analysis, chart: &ChartConfig) -> Value {
    let overlay = analysis.series.len() > 1;
    let mut data: Vec<Value> = Vec::new();
    let mut annotations: Vec<Value> = Vec::new();

    for (i, s) in analysis.series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        data.push(value_trace(s, chart.style, color, overlay));
        if let Some(rolling) = &s.rolling {
            let y: Vec<Option<f64>> = rolling.values();
            let trend_color = if overlay { color } else { TREND_COLOR };
            data.push(json!({
                "type": "scatter",
                "mode": "lines",
                "name": format!("{} trend ({}-period centered average)", s.label, rolling.window),
                "x": dates(&s.buckets.periods()),
                "y": y,
                "line": { "color": trend_color, "width": 3 },
            }));
        }
        let reference_color = if overlay { color } else { REFERENCE_COLOR };
        if chart.show_mean {
            data.push(reference_line(s, s.stats.mean, "mean", "dash", reference_color));
        }
        if chart.show_median {
            data.push(reference_line(s, s.stats.median, "median", "dot", reference_color));
        }
        if chart.show_std_band {
            data.extend(std_band(s, color));
        }
        if chart.annotate_peak {
            annotations.push(peak_annotation(s, analysis.granularity));
        }
    }

    if let Some(spread) = &analysis.spread {
        let name = match analysis.series.as_slice() {
            [a, b, ..] => format!("{} - {}", a.label, b.label),
            _ => "spread".to_string(),
        };
        data.push(json!({
            "type": "bar",
            "name": name,
            "x": dates(&spread.periods()),
            "y": spread.values(),
            "marker": { "color": SPREAD_COLOR },
            "opacity": 0.5,
        }));
    }

    json!({
        "data": data,
        "layout": layout(chart, analysis.granularity, annotations),
    })
}

fn value_trace(s: &SeriesAnalysis, style: TraceStyle, color: &str, overlay: bool) -> Value {
    let x = dates(&s.buckets.periods());
    let y = s.buckets.values();
    let opacity = if overlay { 0.6 } else { 0.8 };
    match style {
        TraceStyle::Bar => json!({
            "type": "bar",
            "name": s.label,
            "x": x,
            "y": y,
            "marker": { "color": color },
            "opacity": opacity,
        }),
        TraceStyle::Area => json!({
            "type": "scatter",
            "mode": "none",
            "fill": "tozeroy",
            "name": s.label,
            "x": x,
            "y": y,
            "fillcolor": rgba(color, 0.3),
        }),
        TraceStyle::Line => json!({
            "type": "scatter",
            "mode": "lines+markers",
            "name": s.label,
            "x": x,
            "y": y,
            "line": { "color": color, "width": 2 },
        }),
    }
}

fn reference_line(s: &SeriesAnalysis, level: f64, what: &str, dash: &str, color: &str) -> Value {
    json!({
        "type": "scatter",
        "mode": "lines",
        "name": format!("{} {what} ({})", s.label, thousands(level)),
        "x": edges(s),
        "y": [level, level],
        "line": { "color": color, "width": 2, "dash": dash },
    })
}

fn std_band(s: &SeriesAnalysis, color: &str) -> [Value; 2] {
    let (lower, upper) = s.stats.std_band();
    let x = edges(s);
    [
        json!({
            "type": "scatter",
            "mode": "lines",
            "x": x,
            "y": [upper, upper],
            "line": { "width": 0 },
            "showlegend": false,
            "hoverinfo": "skip",
        }),
        json!({
            "type": "scatter",
            "mode": "lines",
            "name": format!("{} mean ± 1σ", s.label),
            "x": x,
            "y": [lower, lower],
            "line": { "width": 0 },
            "fill": "tonexty",
            "fillcolor": rgba(color, 0.15),
        }),
    ]
}

fn peak_annotation(s: &SeriesAnalysis, granularity: Granularity) -> Value {
    let when = match granularity {
        Granularity::Month => s.peak.period_start.format("%b %Y").to_string(),
        Granularity::Week => format!("week of {}", s.peak.period_start.format("%Y-%m-%d")),
    };
    json!({
        "x": s.peak.period_start.format("%Y-%m-%d").to_string(),
        "y": s.peak.value,
        "text": format!("Peak {}<br>{when}<br>{}", s.label, thousands(s.peak.value)),
        "showarrow": true,
        "arrowhead": 1,
        "arrowcolor": "black",
        "ax": 0,
        "ay": -80,
        "bordercolor": "#c7c7c7",
        "borderwidth": 1,
        "bgcolor": "rgba(255, 255, 255, 0.85)",
    })
}

fn layout(chart: &ChartConfig, granularity: Granularity, annotations: Vec<Value>) -> Value {
    let title = match &chart.subtitle {
        Some(sub) => format!("<b>{}</b><br><sup>{sub}</sup>", chart.title),
        None => format!("<b>{}</b>", chart.title),
    };
    let dtick = match granularity {
        Granularity::Month => json!("M1"),
        // one week in milliseconds
        Granularity::Week => json!(604_800_000),
    };
    json!({
        "title": { "text": title },
        "xaxis": { "title": { "text": chart.x_title }, "type": "date", "dtick": dtick },
        "yaxis": { "title": { "text": chart.y_title } },
        "template": "plotly_white",
        "barmode": "overlay",
        "legend": { "x": 0.01, "y": 0.99, "bgcolor": "rgba(255,255,255,0.7)" },
        "annotations": annotations,
    })
}

fn dates(periods: &[NaiveDate]) -> Vec<String> {
    periods.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect()
}

fn edges(s: &SeriesAnalysis) -> Vec<String> {
    let periods: Vec<NaiveDate> = s
        .buckets
        .first_period()
        .into_iter()
        .chain(s.buckets.last_period())
        .collect();
    dates(&periods)
}

fn rgba(hex: &str, alpha: f64) -> String {
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2).unwrap_or("00"), 16).unwrap_or(0);
    format!("rgba({}, {}, {}, {alpha})", channel(1), channel(3), channel(5))
}

/// Round to an integer and group digits by thousands, e.g. `12,345`.
#[allow(clippy::cast_possible_truncation)]
fn thousands(v: f64) -> String {
    let rounded = v.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
