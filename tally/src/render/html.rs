use std::fs;
use std::path::Path;

use tally_core::{ChartConfig, TallyError};

use super::figure::figure;
use crate::core::Analysis;

/// plotly.js bundle loaded by the generated page.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Render a standalone HTML page embedding the analysis figure.
///
/// # Errors
/// Returns `Other` if the figure cannot be serialized.
pub fn html_page(analysis: &Analysis, chart: &ChartConfig) -> Result<String, TallyError> {
    let fig = figure(analysis, chart);
    let payload = serde_json::to_string(&fig)
        .map_err(|e| TallyError::Other(format!("figure serialization: {e}")))?
        // keep the payload from closing the script element
        .replace("</", "<\\/");
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>{title}</title>
<script src="{cdn}" charset="utf-8"></script>
</head>
<body>
<div id="tally-chart" style="width:100%;height:90vh;"></div>
<script>
const figure = {payload};
Plotly.newPlot("tally-chart", figure.data, figure.layout, {{ responsive: true }});
</script>
</body>
</html>
"#,
        title = escape(&chart.title),
        cdn = PLOTLY_CDN,
    ))
}

/// Write the HTML page for `analysis` to `path`.
///
/// The page is fully rendered before the file is created, so a failure never
/// leaves a partial file behind.
///
/// # Errors
/// - `Other` if the figure cannot be serialized.
/// - `Io` if the file cannot be written.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "tally::render::write_html", skip_all, fields(path = %path.as_ref().display()))
)]
pub fn write_html(
    analysis: &Analysis,
    chart: &ChartConfig,
    path: impl AsRef<Path>,
) -> Result<(), TallyError> {
    let path = path.as_ref();
    let page = html_page(analysis, chart)?;
    fs::write(path, page).map_err(|e| TallyError::io(path.display().to_string(), e))?;
    #[cfg(feature = "tracing")]
    tracing::info!(path = %path.display(), "chart written");
    Ok(())
}

/// `analysis.report()` as pretty-printed JSON.
///
/// # Errors
/// Returns `Other` if the report cannot be serialized.
pub fn report_json(analysis: &Analysis) -> Result<String, TallyError> {
    serde_json::to_string_pretty(&analysis.report())
        .map_err(|e| TallyError::Other(format!("report serialization: {e}")))
}

/// Write `analysis.report()` as pretty-printed JSON to `path`.
///
/// # Errors
/// - `Other` if the report cannot be serialized.
/// - `Io` if the file cannot be written.
pub fn write_report(analysis: &Analysis, path: impl AsRef<Path>) -> Result<(), TallyError> {
    let path = path.as_ref();
    let body = report_json(analysis)?;
    fs::write(path, body).map_err(|e| TallyError::io(path.display().to_string(), e))
}

/// Write the chart page and, when `report` is given, the JSON report.
///
/// Both payloads are rendered before anything touches the disk. If a write
/// fails, files already written by this call are removed again, so the run
/// leaves either every output or none.
///
/// # Errors
/// - `Other` if the figure or the report cannot be serialized.
/// - `Io` if a file cannot be written.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "tally::render::write_outputs", skip_all, fields(html = %html.display()))
)]
pub fn write_outputs(
    analysis: &Analysis,
    chart: &ChartConfig,
    html: &Path,
    report: Option<&Path>,
) -> Result<(), TallyError> {
    let mut pending = vec![(html, html_page(analysis, chart)?)];
    if let Some(path) = report {
        pending.push((path, report_json(analysis)?));
    }

    let mut written: Vec<&Path> = Vec::with_capacity(pending.len());
    for (path, body) in pending {
        if let Err(e) = fs::write(path, body) {
            for done in written {
                let _ = fs::remove_file(done);
            }
            return Err(TallyError::io(path.display().to_string(), e));
        }
        written.push(path);
    }
    #[cfg(feature = "tracing")]
    tracing::info!(files = written.len(), "outputs written");
    Ok(())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
